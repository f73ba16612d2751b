//! E-utilities endpoint URL builders
//!
//! Query parameters are attached by the client so that terms containing `|`,
//! spaces or brackets are encoded correctly.

/// Public NCBI web root, used for operator-facing record links
pub const NCBI_WEB_URL: &str = "https://www.ncbi.nlm.nih.gov";

/// Build esearch endpoint URL
pub fn esearch_url(base_url: &str) -> String {
    format!("{}/esearch.fcgi", base_url.trim_end_matches('/'))
}

/// Build efetch endpoint URL
pub fn efetch_url(base_url: &str) -> String {
    format!("{}/efetch.fcgi", base_url.trim_end_matches('/'))
}

/// Browser link for a record, e.g. `https://www.ncbi.nlm.nih.gov/nuccore/12345`
pub fn record_url(database: &str, id: &str) -> String {
    format!("{}/{}/{}", NCBI_WEB_URL, database, id)
}
