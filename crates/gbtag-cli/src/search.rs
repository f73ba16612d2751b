//! Locus-tag lookup for a single search term
//!
//! A term may hold several alternative locus tags separated by `|`. The whole
//! term goes to esearch as-is; each candidate record is then fetched and the
//! alternatives are tried against it in order.

use crate::api::endpoints;
use crate::api::EntrezClient;
use crate::error::Result;
use crate::extract::{extract, ExtractionResult};
use tracing::{info, warn};

/// Separator between alternative locus tags in a term
pub const SUBTERM_SEPARATOR: char = '|';

/// Outcome of looking up one term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// esearch returned no candidate records
    NoResults,
    /// Candidates were fetched, but no sub-term matched any of them
    NoMatch,
    /// First successful extraction
    Found(ExtractionResult),
}

impl SearchOutcome {
    /// `None` when nothing was searched; an empty pair when nothing matched
    pub fn into_result(self) -> Option<ExtractionResult> {
        match self {
            SearchOutcome::NoResults => None,
            SearchOutcome::NoMatch => Some(ExtractionResult::default()),
            SearchOutcome::Found(result) => Some(result),
        }
    }
}

/// Split a term into the locus tags to try, in order
pub fn subterms(term: &str) -> impl Iterator<Item = &str> {
    term.split(SUBTERM_SEPARATOR)
}

pub struct TermSearcher {
    client: EntrezClient,
    database: String,
}

impl TermSearcher {
    pub fn new(client: EntrezClient, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    /// Look up `term`, returning the first CDS match across candidate records.
    ///
    /// Candidates are visited in the order esearch lists them, one fetch at a
    /// time. Extraction misses are logged and skipped; network and parse
    /// failures are returned to the caller.
    pub async fn search_term(&self, term: &str) -> Result<SearchOutcome> {
        let ids = self.client.search(term, &self.database).await?;

        if ids.is_empty() {
            info!(term = %term, "No results found");
            return Ok(SearchOutcome::NoResults);
        }

        info!(term = %term, candidates = ids.len(), "Results found in:");
        for id in &ids {
            info!("{}", endpoints::record_url(&self.database, id.as_str()));
        }

        for id in &ids {
            let content = self.client.fetch_record(id, &self.database).await?;

            for subterm in subterms(term) {
                info!("Searching for {} in ID: {}", subterm, id);
                match extract(subterm, &content) {
                    Ok(result) => return Ok(SearchOutcome::Found(result)),
                    Err(e) if e.is_not_found() => {
                        warn!(
                            "No data found in {} for {}",
                            endpoints::record_url(&self.database, id.as_str()),
                            subterm
                        );
                    },
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(SearchOutcome::NoMatch)
    }
}
