//! HTTP handlers for the wizard API

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::application::{GenerateServerRequest, GenerateServerResponse};
use crate::generation::{Capabilities, ServerKind, examples::example_config, validate_config};
use crate::wizard::{WizardEvent, WizardState};

use super::{AppState, errors::ApiError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardRequest {
    #[serde(default)]
    pub state: WizardState,
    pub event: WizardEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardResponse {
    pub state: WizardState,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "MCP Generator Web UI".to_string(),
    })
}

/// Example descriptor configuration for a server kind
pub async fn get_example(Path(server_type): Path<String>) -> ApiResult<Json<Capabilities>> {
    let kind = server_type
        .parse::<ServerKind>()
        .map_err(|_| ApiError::NotFound("Server type not found".to_string()))?;
    Ok(Json(example_config(kind)))
}

pub async fn validate(Json(config): Json<Capabilities>) -> Json<ValidateResponse> {
    let report = validate_config(&config);
    Json(ValidateResponse {
        valid: report.is_valid(),
        errors: report.errors,
        warnings: report.warnings,
    })
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateServerRequest>,
) -> ApiResult<Json<GenerateServerResponse>> {
    let response = state.use_case.execute(request).await?;
    Ok(Json(response))
}

/// Return a stored archive once; later requests for the same key get 404
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    let archive = state.archives.take(&filename).await?;
    info!(key = %filename, bytes = archive.bytes.len(), "Serving archive");

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", archive.download_name),
            ),
        ],
        archive.bytes,
    )
        .into_response())
}

/// Apply one wizard event to the state sent by the client
pub async fn wizard(Json(request): Json<WizardRequest>) -> ApiResult<Json<WizardResponse>> {
    let state = request.state.apply(request.event)?;
    Ok(Json(WizardResponse { state }))
}
