use diesel::prelude::*;
use thiserror::Error;
use crate::db::{organization::models::*, schema::organizations::dsl::*};

pub const CREATE_ORGANIZATIONS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS organizations (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        url TEXT NOT NULL DEFAULT '',
        year INTEGER NOT NULL,
        CONSTRAINT unique_org_year UNIQUE (name, year)
    )";

#[derive(Debug, Error)]
pub enum CreateOrganizationsTableError {
    #[error("CreateOrganizationsTable: {source}")]
    CreateOrganizationsTable {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn create_organizations_table(
    conn: &mut PgConnection,
) -> Result<(), CreateOrganizationsTableError> {
    diesel::sql_query(CREATE_ORGANIZATIONS_TABLE)
        .execute(conn)
        .map(|_| ())
        .map_err(|source| CreateOrganizationsTableError::CreateOrganizationsTable { source })
}

#[derive(Debug, Error)]
pub enum InsertOrganizationError {
    #[error("InsertOrganization: {source}")]
    InsertOrganization {
        #[from]
        source: diesel::result::Error,
    },
}

/// Returns `true` when a row was written, `false` when (name, year) already existed.
pub fn insert_organization_if_absent(
    conn: &mut PgConnection,
    new: &NewOrganization,
) -> Result<bool, InsertOrganizationError> {
    diesel::insert_into(organizations)
        .values(new)
        .on_conflict((name, year))
        .do_nothing()
        .execute(conn)
        .map(|inserted| inserted > 0)
        .map_err(|source| InsertOrganizationError::InsertOrganization { source })
}

#[derive(Debug, Error)]
pub enum ListOrganizationsError {
    #[error("ListOrganizations: {source}")]
    ListOrganizations {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn list_organizations(
    conn: &mut PgConnection,
) -> Result<Vec<Organization>, ListOrganizationsError> {
    organizations
        .order((year.desc(), name.asc()))
        .select(Organization::as_select())
        .load(conn)
        .map_err(|source| ListOrganizationsError::ListOrganizations { source })
}

#[derive(Debug, Error)]
pub enum PingError {
    #[error("Ping: {source}")]
    Ping {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn ping(conn: &mut PgConnection) -> Result<(), PingError> {
    diesel::sql_query("SELECT 1")
        .execute(conn)
        .map(|_| ())
        .map_err(|source| PingError::Ping { source })
}
