use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::{OrganizationStore, StoreError};
use crate::db::organization::{
    models::{NewOrganization, Organization},
    queries::{InsertOrganizationError, ListOrganizationsError},
};

/// In-memory double with the same key and ordering rules as the table.
/// Failures are reported as the diesel errors Postgres would surface.
#[derive(Default)]
pub struct MemoryOrganizationStore {
    rows: Mutex<BTreeMap<(i32, String), Organization>>,
    unreachable: bool,
    fail_inserts_for_year: Option<i32>,
    reject_name: Option<String>,
}

fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
    DieselError::DatabaseError(kind, Box::new(message.to_string()))
}

fn insert_error(kind: DatabaseErrorKind, message: &str) -> StoreError {
    StoreError::InsertOrganization {
        source: InsertOrganizationError::InsertOrganization {
            source: database_error(kind, message),
        },
    }
}

impl MemoryOrganizationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the connection was lost.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Inserts for `year` fail as if the connection dropped mid-year.
    pub fn failing_inserts_for(year: i32) -> Self {
        Self {
            fail_inserts_for_year: Some(year),
            ..Self::default()
        }
    }

    /// The database rejects any row called `name`; other rows are stored.
    pub fn rejecting_name(name: &str) -> Self {
        Self {
            reject_name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl OrganizationStore for MemoryOrganizationStore {
    async fn insert_if_absent(&self, new: NewOrganization) -> Result<bool, StoreError> {
        if self.unreachable || self.fail_inserts_for_year == Some(new.year) {
            return Err(insert_error(
                DatabaseErrorKind::ClosedConnection,
                "server closed the connection unexpectedly",
            ));
        }
        if self.reject_name.as_deref() == Some(new.name.as_str()) {
            return Err(insert_error(DatabaseErrorKind::Unknown, "row rejected"));
        }

        let mut rows = self.rows.lock().unwrap();
        let key = (new.year, new.name.clone());
        if rows.contains_key(&key) {
            return Ok(false);
        }
        rows.insert(key, new.into());
        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<Organization>, StoreError> {
        if self.unreachable {
            return Err(StoreError::ListOrganizations {
                source: ListOrganizationsError::ListOrganizations {
                    source: database_error(
                        DatabaseErrorKind::ClosedConnection,
                        "server closed the connection unexpectedly",
                    ),
                },
            });
        }
        let rows = self.rows.lock().unwrap();
        let mut all: Vec<Organization> = rows.values().cloned().collect();
        all.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.name.cmp(&b.name)));
        Ok(all)
    }

    async fn ping(&self) -> bool {
        !self.unreachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(name: &str, year: i32) -> NewOrganization {
        NewOrganization {
            name: name.to_string(),
            description: "GSoC Organization".to_string(),
            url: String::new(),
            year,
        }
    }

    #[tokio::test]
    async fn double_matches_table_rules() {
        let store = MemoryOrganizationStore::new();
        assert!(store.insert_if_absent(org("b", 2023)).await.unwrap());
        assert!(!store.insert_if_absent(org("b", 2023)).await.unwrap());
        assert!(store.insert_if_absent(org("a", 2023)).await.unwrap());
        assert!(store.insert_if_absent(org("c", 2024)).await.unwrap());

        let names: Vec<(i32, String)> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|o| (o.year, o.name))
            .collect();
        assert_eq!(
            names,
            vec![(2024, "c".into()), (2023, "a".into()), (2023, "b".into())]
        );
    }

    #[tokio::test]
    async fn failures_classify_like_postgres() {
        let rejecting = MemoryOrganizationStore::rejecting_name("bad");
        assert!(rejecting.insert_if_absent(org("bad", 2023)).await.unwrap_err().is_row_error());
        assert!(rejecting.insert_if_absent(org("good", 2023)).await.unwrap());

        let down = MemoryOrganizationStore::unreachable();
        assert!(!down.insert_if_absent(org("good", 2023)).await.unwrap_err().is_row_error());
        assert!(!down.ping().await);
    }
}
