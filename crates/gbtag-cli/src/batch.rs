//! Batch driver: terms file in, CSV report out
//!
//! Each input line is one term. Rows are written in input order, one per term,
//! whether or not anything was found for it.

use crate::api::EntrezClient;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::extract::ExtractionResult;
use crate::search::{SearchOutcome, TermSearcher};
use futures::{stream, StreamExt, TryStreamExt};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Header row of the report
pub const REPORT_HEADER: [&str; 3] = ["term", "product", "protein_id"];

/// Suffix appended to the input file stem
pub const REPORT_SUFFIX: &str = "_results.csv";

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub term: String,
    pub product: String,
    pub protein_id: String,
}

impl ReportRow {
    pub fn new(term: impl Into<String>, result: ExtractionResult) -> Self {
        Self {
            term: term.into(),
            product: result.product,
            protein_id: result.protein_id,
        }
    }

    pub fn empty(term: impl Into<String>) -> Self {
        Self::new(term, ExtractionResult::default())
    }
}

/// What happened to one term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermStatus {
    Matched,
    Unmatched,
    /// Lookup failed and `keep_going` turned the error into an empty row
    Failed,
}

/// Result of a whole batch run
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub report_path: PathBuf,
    pub rows: Vec<ReportRow>,
    pub matched: usize,
    pub unmatched: usize,
    pub failed: usize,
    /// Set when the report could not be written
    pub write_error: Option<String>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.rows.len()
    }
}

/// Read terms, one per line, with trailing whitespace stripped.
/// Blank lines are kept as empty terms.
pub fn read_terms(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content.lines().map(|line| line.trim_end().to_string()).collect())
}

/// `<output_dir>/<input stem>_results.csv`
pub fn report_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}{}", stem, REPORT_SUFFIX))
}

/// Write the header and `rows` to `path`, replacing any existing file
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let write_error = |source: std::io::Error| CliError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    writer
        .write_record(REPORT_HEADER)
        .map_err(|e| write_error(e.into()))?;
    for row in rows {
        writer.serialize(row).map_err(|e| write_error(e.into()))?;
    }
    writer.flush().map_err(write_error)?;

    Ok(())
}

/// Run every term in `input` through the searcher and write the report.
///
/// A failed report write is logged and returned in the summary rather than as
/// an error. Lookup failures abort the run unless `config.keep_going` is set.
pub async fn run(config: &Config, input: &Path) -> Result<BatchSummary> {
    let terms = read_terms(input)?;
    let client = EntrezClient::from_config(config)?;
    let searcher = TermSearcher::new(client, config.database.clone());

    info!(
        input = %input.display(),
        terms = terms.len(),
        db = %config.database,
        jobs = config.jobs,
        "Starting batch"
    );

    let results: Vec<(ReportRow, TermStatus)> = stream::iter(terms)
        .map(|term| lookup(&searcher, term, config.keep_going))
        .buffered(config.jobs)
        .try_collect()
        .await?;

    let mut summary = BatchSummary {
        report_path: report_path(input, &config.output_dir),
        rows: Vec::with_capacity(results.len()),
        matched: 0,
        unmatched: 0,
        failed: 0,
        write_error: None,
    };
    for (row, status) in results {
        match status {
            TermStatus::Matched => summary.matched += 1,
            TermStatus::Unmatched => summary.unmatched += 1,
            TermStatus::Failed => summary.failed += 1,
        }
        summary.rows.push(row);
    }

    match write_report(&summary.report_path, &summary.rows) {
        Ok(()) => info!(path = %summary.report_path.display(), rows = summary.total(), "Report written"),
        Err(e) => {
            error!(error = %e, "Failed to write report");
            summary.write_error = Some(e.to_string());
        },
    }

    Ok(summary)
}

async fn lookup(searcher: &TermSearcher, term: String, keep_going: bool) -> Result<(ReportRow, TermStatus)> {
    match searcher.search_term(&term).await {
        Ok(SearchOutcome::Found(result)) => Ok((ReportRow::new(term, result), TermStatus::Matched)),
        Ok(SearchOutcome::NoResults | SearchOutcome::NoMatch) => {
            warn!("No results found for {}", term);
            Ok((ReportRow::empty(term), TermStatus::Unmatched))
        },
        Err(e) if keep_going => {
            error!(term = %term, error = %e, "Lookup failed, continuing");
            Ok((ReportRow::empty(term), TermStatus::Failed))
        },
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_terms_strips_trailing_whitespace_keeps_blanks() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("terms.txt");
        std::fs::write(&input, "geneA|geneB  \n\nb0001\t\r\n").unwrap();

        let terms = read_terms(&input).unwrap();
        assert_eq!(terms, vec!["geneA|geneB", "", "b0001"]);
    }

    #[test]
    fn test_read_terms_missing_file() {
        let err = read_terms(Path::new("/nonexistent/terms.txt")).unwrap_err();
        assert!(matches!(err, CliError::InputRead { .. }));
    }

    #[test]
    fn test_report_path_uses_input_stem() {
        let path = report_path(Path::new("/data/in/locus_tags.txt"), Path::new("/work"));
        assert_eq!(path, PathBuf::from("/work/locus_tags_results.csv"));

        let path = report_path(Path::new("tags"), Path::new("/work"));
        assert_eq!(path, PathBuf::from("/work/tags_results.csv"));
    }

    #[test]
    fn test_write_report_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![
            ReportRow::new("geneA|geneB", ExtractionResult::new("Hypothetical protein", "")),
            ReportRow::empty("missingGene"),
            ReportRow::new("b0002", ExtractionResult::new("kinase, fused", "NP_414543.1")),
        ];

        write_report(&path, &rows).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "term,product,protein_id\n\
             geneA|geneB,Hypothetical protein,\n\
             missingGene,,\n\
             b0002,\"kinase, fused\",NP_414543.1\n"
        );
    }

    #[test]
    fn test_write_report_empty_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        write_report(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "term,product,protein_id\n");
    }

    #[test]
    fn test_write_report_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");
        let err = write_report(&path, &[]).unwrap_err();
        assert!(matches!(err, CliError::FileWrite { .. }));
    }
}
