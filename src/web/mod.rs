//! HTTP transport: the wizard UI and its JSON API

pub mod errors;
pub mod handlers;
pub mod ui;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::info;

use crate::application::GenerateServerUseCase;
use crate::config::AppConfig;
use crate::generation::{CodeGenerator, GenerationError};
use crate::infrastructure::{ArchiveStore, ArchiveStoreOutputService, select_generator};

pub use errors::{ApiError, ErrorResponse};

/// Shared state for all handlers
pub struct AppState {
    pub use_case: GenerateServerUseCase,
    pub archives: Arc<ArchiveStore>,
}

impl AppState {
    pub fn new(generator: Arc<dyn CodeGenerator>, archives: Arc<ArchiveStore>) -> Self {
        let output = Arc::new(ArchiveStoreOutputService::new(archives.clone()));
        Self {
            use_case: GenerateServerUseCase::new(generator, output),
            archives,
        }
    }

    /// Build the generator and archive store described by the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        let generator = select_generator(
            config.generator.backend,
            Arc::new(config.runtime()),
            config.anthropic_settings(),
        )?;
        let archives = Arc::new(ArchiveStore::new(config.archive_ttl()));
        Ok(Self::new(generator, archives))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/examples/{server_type}", get(handlers::get_example))
        .route("/api/validate", post(handlers::validate))
        .route("/api/generate", post(handlers::generate))
        .route("/api/generate-and-prepare", post(handlers::generate))
        .route("/api/download/{filename}", get(handlers::download))
        .route("/api/wizard", post(handlers::wizard))
        .fallback(ui::serve_ui)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(addr: SocketAddr, config: &AppConfig) -> Result<()> {
    let state = AppState::from_config(config).context("Failed to initialize generator")?;
    let janitor = state.archives.spawn_janitor(config.purge_interval());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, backend = %config.generator.backend, "Web UI listening on http://{addr}");

    let result = axum::serve(listener, router(state)).await;
    janitor.abort();
    result.context("Web server terminated unexpectedly")
}
