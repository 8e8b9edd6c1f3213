use axum::{extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::AppState;

/// Axum handler: GET /health
pub async fn handler(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.store.ping().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "DB connection failed")
    }
}
