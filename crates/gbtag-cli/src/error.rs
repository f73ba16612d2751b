//! Error types for gbtag
//!
//! Messages are shown to the operator as-is, so each one says what failed and,
//! where there is one, what to check.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// No CDS block for this locus tag ends in a `/translation` qualifier.
    /// Expected for most sub-terms; the searcher recovers from it.
    #[error("No CDS block with a translation found for locus tag '{locus_tag}'")]
    NotFound { locus_tag: String },

    /// Transport-level failure talking to Entrez
    #[error("Network request failed: {0}. Check your internet connection and the E-utilities URL.")]
    Network(#[from] reqwest::Error),

    /// Entrez answered with a non-success status
    #[error("Entrez returned HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    /// esearch body was not the expected XML
    #[error("Failed to parse esearch response: {0}")]
    XmlParse(#[from] quick_xml::DeError),

    /// Report could not be written
    #[error("Error creating output file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file could not be read
    #[error("Cannot read input file '{}': {source}. Verify the path exists and you have read permissions.", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}. Check your command-line flags and environment variables.")]
    Config(String),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn not_found(locus_tag: impl Into<String>) -> Self {
        Self::NotFound {
            locus_tag: locus_tag.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this is an extraction miss rather than a real failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
