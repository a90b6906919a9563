//! Embedded single-page wizard UI

use axum::{
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use super::errors::ApiError;

#[derive(RustEmbed)]
#[folder = "static/"]
struct UiAssets;

/// Serve `/` and any other embedded asset; unknown API paths get a JSON 404
pub async fn serve_ui(uri: Uri) -> Response {
    let path = match uri.path().trim_start_matches('/') {
        "" => "index.html",
        other => other,
    };

    if let Some(content) = UiAssets::get(path) {
        return serve_file(path, content.data.as_ref());
    }

    if !path.starts_with("api/") {
        if let Some(content) = UiAssets::get("index.html") {
            return serve_file("index.html", content.data.as_ref());
        }
    }

    ApiError::NotFound("Not found".to_string()).into_response()
}

fn serve_file(path: &str, content: &[u8]) -> Response {
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime_type.as_ref())],
        content.to_vec(),
    )
        .into_response()
}
