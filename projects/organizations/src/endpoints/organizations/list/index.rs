use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use chrono::Utc;
use thiserror::Error;
use tracing::error;

use crate::{
    app::AppState,
    render::page::{render_organizations_page, RenderPageError},
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("ListOrganizations: {source}")]
    ListOrganizations {
        #[from]
        source: StoreError,
    },
    #[error("RenderPage: {source}")]
    RenderPage {
        #[from]
        source: RenderPageError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        error!(error = %self, "Failed to serve organization list");
        match self {
            HandlerError::ListOrganizations { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
            HandlerError::RenderPage { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

/// Axum handler: GET /
pub async fn handler(Extension(state): Extension<AppState>) -> Result<Html<String>, HandlerError> {
    let organizations = state.store.list_all().await?;
    let page = render_organizations_page(&organizations, Utc::now())?;
    Ok(Html(page))
}
