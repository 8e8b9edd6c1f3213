//! Client for the public GSoC organizations API
//!
//! - One JSON document per year at `<base_url><year>.json`
//! - The document root is an object keyed by organization name

pub mod index;
