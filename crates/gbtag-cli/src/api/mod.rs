//! Entrez API module
//!
//! HTTP client for the NCBI E-utilities search and fetch endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::EntrezClient;
pub use types::{RecordId, SearchResult};
