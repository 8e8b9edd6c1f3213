//! Storage seam shared by the sync pass and the HTTP handlers.

pub mod postgres;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

use crate::db::organization::{
    models::{NewOrganization, Organization},
    queries::{InsertOrganizationError, ListOrganizationsError},
};

pub use postgres::PgOrganizationStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error(transparent)]
    InsertOrganization {
        #[from]
        source: InsertOrganizationError,
    },
    #[error(transparent)]
    ListOrganizations {
        #[from]
        source: ListOrganizationsError,
    },
    #[error("Join: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

impl StoreError {
    /// True when the database rejected a single row. Pool, connection and
    /// task failures are not row errors.
    pub fn is_row_error(&self) -> bool {
        match self {
            StoreError::InsertOrganization {
                source: InsertOrganizationError::InsertOrganization { source },
            } => matches!(
                source,
                diesel::result::Error::DatabaseError(kind, _)
                    if !matches!(kind, DatabaseErrorKind::ClosedConnection)
            ),
            _ => false,
        }
    }
}

#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// Inserts unless (name, year) is already stored. Returns whether a row was added.
    async fn insert_if_absent(&self, new: NewOrganization) -> Result<bool, StoreError>;

    /// Every organization, year descending then name ascending.
    async fn list_all(&self) -> Result<Vec<Organization>, StoreError>;

    async fn ping(&self) -> bool;
}
