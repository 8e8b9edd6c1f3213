use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

use crate::endpoints::{
    health::index::handler as health_handler,
    organizations::{
        list::index::handler as organizations_list_handler,
        sync::index::handler as organizations_sync_handler,
    },
};
use crate::store::OrganizationStore;
use crate::sync::OrganizationSource;

/// Shared by every handler through an `Extension` layer.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrganizationStore>,
    pub source: Arc<dyn OrganizationSource>,
    pub sync_years: Arc<[i32]>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn OrganizationStore>,
        source: Arc<dyn OrganizationSource>,
        sync_years: &[i32],
    ) -> Self {
        Self {
            store,
            source,
            sync_years: sync_years.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(organizations_list_handler))
        .route("/sync", get(organizations_sync_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
