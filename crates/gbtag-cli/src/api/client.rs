//! HTTP client for NCBI Entrez E-utilities
//!
//! Wraps the two endpoints gbtag needs: esearch (term -> record UIDs) and
//! efetch (UID -> GenBank flat file).

use crate::api::endpoints;
use crate::api::types::{RecordId, SearchResult};
use crate::config::Config;
use crate::error::{CliError, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info, warn};

// ============================================================================
// Entrez Client Constants
// ============================================================================

/// Production E-utilities base URL
pub const DEFAULT_EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default Entrez database
pub const DEFAULT_DATABASE: &str = "nuccore";

/// efetch `retmode` for flat-file text
pub const DEFAULT_RETMODE: &str = "text";

/// efetch `rettype` for GenBank with all feature parts inlined
pub const DEFAULT_RETTYPE: &str = "gbwithparts";

/// Default timeout for a single request in seconds.
/// Large `gbwithparts` records can take minutes to stream.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Entrez E-utilities client
#[derive(Debug, Clone)]
pub struct EntrezClient {
    client: Client,
    base_url: String,
}

impl EntrezClient {
    /// Create a client against `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gbtag/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.eutils_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Run an esearch query and return candidate UIDs in Entrez order
    pub async fn search(&self, term: &str, database: &str) -> Result<Vec<RecordId>> {
        let url = endpoints::esearch_url(&self.base_url);
        debug!(term = %term, db = %database, "esearch");

        let response = self
            .client
            .get(&url)
            .query(&[("db", database), ("term", term)])
            .send()
            .await?;
        let body = checked(response).await?.text().await?;

        let result = SearchResult::parse(&body)?;
        debug!(term = %term, count = ?result.count, returned = result.ids.len(), "esearch complete");
        if let Some(ref message) = result.error {
            warn!(term = %term, error = %message, "Entrez reported a search error");
        }

        Ok(result.ids)
    }

    /// Fetch a record as GenBank text with the default `retmode`/`rettype`
    pub async fn fetch_record(&self, id: &RecordId, database: &str) -> Result<String> {
        self.fetch_record_as(id, database, DEFAULT_RETMODE, DEFAULT_RETTYPE)
            .await
    }

    /// Fetch a record's full text. Transport and status failures are returned
    /// as-is; nothing is retried.
    pub async fn fetch_record_as(
        &self,
        id: &RecordId,
        database: &str,
        retmode: &str,
        rettype: &str,
    ) -> Result<String> {
        let url = endpoints::efetch_url(&self.base_url);
        info!(
            "Fetching data for {}. It may take a while.",
            endpoints::record_url(database, id.as_str())
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("id", id.as_str()),
                ("db", database),
                ("retmode", retmode),
                ("rettype", rettype),
            ])
            .send()
            .await?;
        let bytes = checked(response).await?.bytes().await?;

        debug!(id = %id, bytes = bytes.len(), "efetch complete");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Map non-2xx responses to [`CliError::Http`]
async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CliError::Http {
            url: response.url().to_string(),
            status: status.as_u16(),
        })
    }
}
