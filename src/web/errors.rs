//! Mapping of domain errors onto HTTP responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::application::ApplicationError;
use crate::generation::GenerationError;
use crate::infrastructure::store::StoreError;
use crate::wizard::WizardError;

/// Error body returned by every API endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unprocessable { detail: String, errors: Vec<String> },
    NotFound(String),
    BadGateway(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Unprocessable { detail, errors } => ErrorResponse { detail, errors },
            ApiError::BadRequest(detail)
            | ApiError::NotFound(detail)
            | ApiError::BadGateway(detail)
            | ApiError::Internal(detail) => ErrorResponse {
                detail,
                errors: Vec::new(),
            },
        };

        if status.is_server_error() {
            error!(%status, detail = %body.detail, "Request failed");
        } else {
            warn!(%status, detail = %body.detail, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InvalidSpec { errors } => ApiError::Unprocessable {
                detail: "Invalid server spec".to_string(),
                errors,
            },
            GenerationError::UnsupportedKind(kind) => {
                ApiError::BadRequest(format!("Unknown server type: {kind}"))
            }
            GenerationError::ExternalGeneration(message) => ApiError::BadGateway(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::ValidationError(e) => ApiError::BadRequest(e.to_string()),
            ApplicationError::GenerationError(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<WizardError> for ApiError {
    fn from(err: WizardError) -> Self {
        ApiError::Unprocessable {
            detail: err.to_string(),
            errors: err.messages(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(_: StoreError) -> Self {
        ApiError::NotFound("File not found".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ValidationError;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (
                ApplicationError::from(ValidationError::MissingName).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                GenerationError::UnsupportedKind("mega".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                GenerationError::InvalidSpec { errors: vec!["x".into()] }.into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                GenerationError::ExternalGeneration("timeout".into()).into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                GenerationError::RenderError("boom".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::Expired("a.zip".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                WizardError::invalid("nope").into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{error:?}");
        }
    }

    #[test]
    fn test_validation_error_keeps_message() {
        match ApiError::from(ApplicationError::from(ValidationError::MissingServerType)) {
            ApiError::BadRequest(detail) => assert_eq!(detail, "Server type is required"),
            other => panic!("Unexpected {other:?}"),
        }
    }
}
