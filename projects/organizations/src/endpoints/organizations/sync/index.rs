use axum::{extract::Extension, response::Redirect};

use crate::{app::AppState, sync::run_sync_pass};

/// Axum handler: GET /sync
///
/// Runs a full sync pass before answering. Per-year failures only show up in
/// the logs; the caller is always sent back to the list.
pub async fn handler(Extension(state): Extension<AppState>) -> Redirect {
    run_sync_pass(state.source.as_ref(), state.store.as_ref(), &state.sync_years).await;
    Redirect::to("/")
}
