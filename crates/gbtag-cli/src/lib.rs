//! gbtag Library
//!
//! Batch lookup of protein products by locus tag in NCBI Entrez.
//!
//! # Overview
//!
//! For each term in an input file gbtag:
//!
//! - **Searches** Entrez (`esearch`) for candidate nucleotide records
//! - **Fetches** each candidate as GenBank text (`efetch`, `gbwithparts`)
//! - **Extracts** `product` and `protein_id` from the CDS carrying the locus tag
//! - **Reports** one CSV row per term to `<input stem>_results.csv`

pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod search;

// Re-export commonly used types
pub use batch::{BatchSummary, ReportRow};
pub use config::Config;
pub use error::{CliError, Result};
pub use extract::{extract, ExtractionResult};
pub use search::{SearchOutcome, TermSearcher};

use clap::Parser;
use std::path::PathBuf;

/// gbtag - look up CDS products for locus tags in NCBI Entrez
#[derive(Parser, Debug)]
#[command(name = "gbtag")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File with one search term per line; `a|b` tries locus tag `a`, then `b`.
    /// Prompted for when omitted.
    pub file: Option<PathBuf>,

    /// Entrez database to search and fetch from [default: nuccore]
    #[arg(long)]
    pub db: Option<String>,

    /// Number of terms looked up concurrently [default: 1]
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Write an empty row for a term whose lookup fails instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Directory for the results file [default: current directory]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// E-utilities base URL
    #[arg(long)]
    pub eutils_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
