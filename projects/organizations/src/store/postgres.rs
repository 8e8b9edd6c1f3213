use async_trait::async_trait;
use tracing::warn;

use super::{OrganizationStore, StoreError};
use crate::db::{
    organization::{
        models::{NewOrganization, Organization},
        queries::{insert_organization_if_absent, list_organizations, ping},
    },
    PgPool,
};

/// [`OrganizationStore`] over an r2d2 pool. Diesel calls block, so each one
/// runs on the blocking thread pool.
#[derive(Clone)]
pub struct PgOrganizationStore {
    pool: PgPool,
}

impl PgOrganizationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationStore for PgOrganizationStore {
    async fn insert_if_absent(&self, new: NewOrganization) -> Result<bool, StoreError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<bool, StoreError> {
            let mut conn = pool.get()?;
            Ok(insert_organization_if_absent(&mut conn, &new)?)
        })
        .await?
    }

    async fn list_all(&self) -> Result<Vec<Organization>, StoreError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<Organization>, StoreError> {
            let mut conn = pool.get()?;
            Ok(list_organizations(&mut conn)?)
        })
        .await?
    }

    async fn ping(&self) -> bool {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || -> Result<(), String> {
            let mut conn = pool.get().map_err(|err| err.to_string())?;
            ping(&mut conn).map_err(|err| err.to_string())
        })
        .await;

        match result {
            Ok(Ok(())) => true,
            Ok(Err(error)) => {
                warn!(%error, "Database ping failed");
                false
            }
            Err(error) => {
                warn!(%error, "Database ping task failed");
                false
            }
        }
    }
}
