//! GSoC organizations tracking service
//!
//! - HTTP endpoints in `endpoints/`
//! - PostgreSQL schema, models and queries in `db/`
//! - Year-by-year sync pass in `sync/`
//! - Reads DB_USER / DB_PASSWORD / DB_HOST / DB_NAME from the environment

pub mod app;
pub mod config;
pub mod db;
pub mod endpoints;
pub mod render;
pub mod store;
pub mod sync;
