//! Runtime configuration for gbtag
//!
//! Process-wide inputs (environment, working directory, flags) are resolved
//! once here and handed to the batch driver as a plain value.

use crate::api::client::{DEFAULT_DATABASE, DEFAULT_EUTILS_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{CliError, Result};
use crate::Cli;
use std::path::PathBuf;

/// Upper bound for `--jobs`; NCBI throttles clients without an API key at 3 req/s.
pub const MAX_JOBS: usize = 3;

#[derive(Debug, Clone)]
pub struct Config {
    /// E-utilities base URL (without the `*.fcgi` suffix)
    pub eutils_url: String,

    /// Entrez database searched and fetched from
    pub database: String,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// Directory the `<stem>_results.csv` report is written to
    pub output_dir: PathBuf,

    /// Terms processed concurrently; 1 means strictly sequential
    pub jobs: usize,

    /// Record a failed term as an empty row instead of aborting the run
    pub keep_going: bool,
}

impl Config {
    /// Defaults, with the report going to the current working directory
    pub fn new() -> Result<Self> {
        Ok(Self {
            eutils_url: DEFAULT_EUTILS_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_dir: std::env::current_dir()?,
            jobs: 1,
            keep_going: false,
        })
    }

    /// Load config from environment variables
    ///
    /// - `GBTAG_EUTILS_URL`
    /// - `GBTAG_TIMEOUT_SECS`
    /// - `GBTAG_OUTPUT_DIR`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new()?;

        if let Ok(url) = std::env::var("GBTAG_EUTILS_URL") {
            config.eutils_url = url;
        }

        if let Ok(secs) = std::env::var("GBTAG_TIMEOUT_SECS") {
            config.timeout_secs = secs
                .parse()
                .map_err(|_| CliError::config(format!("GBTAG_TIMEOUT_SECS is not a number: '{}'", secs)))?;
        }

        if let Ok(dir) = std::env::var("GBTAG_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Environment first, then command-line flags on top
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(ref url) = cli.eutils_url {
            config.eutils_url = url.clone();
        }
        if let Some(ref db) = cli.db {
            config.database = db.clone();
        }
        if let Some(ref dir) = cli.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(jobs) = cli.jobs {
            config.jobs = jobs;
        }
        config.keep_going = cli.keep_going;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.eutils_url.starts_with("http://") || self.eutils_url.starts_with("https://")) {
            return Err(CliError::config(format!(
                "E-utilities URL must start with http:// or https://, got '{}'",
                self.eutils_url
            )));
        }

        if self.database.trim().is_empty() {
            return Err(CliError::config("Database name cannot be empty"));
        }

        if self.jobs < 1 || self.jobs > MAX_JOBS {
            return Err(CliError::config(format!("Jobs must be between 1 and {}", MAX_JOBS)));
        }

        if self.timeout_secs == 0 {
            return Err(CliError::config("Timeout must be at least one second"));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_config_defaults() {
        let config = Config::new().unwrap();
        assert_eq!(config.eutils_url, DEFAULT_EUTILS_URL);
        assert_eq!(config.database, "nuccore");
        assert_eq!(config.jobs, 1);
        assert!(!config.keep_going);
        assert_eq!(config.output_dir, std::env::current_dir().unwrap());
        config.validate().unwrap();
    }

    #[test]
    fn test_config_from_env_then_cli() {
        std::env::set_var("GBTAG_EUTILS_URL", "http://env.example.com/eutils");
        std::env::set_var("GBTAG_TIMEOUT_SECS", "42");
        std::env::set_var("GBTAG_OUTPUT_DIR", "/tmp/gbtag-env");

        let env_only = Config::from_env().unwrap();
        assert_eq!(env_only.eutils_url, "http://env.example.com/eutils");
        assert_eq!(env_only.timeout_secs, 42);
        assert_eq!(env_only.output_dir, PathBuf::from("/tmp/gbtag-env"));

        let cli = Cli::parse_from([
            "gbtag",
            "terms.txt",
            "--db",
            "protein",
            "--jobs",
            "2",
            "--keep-going",
            "--eutils-url",
            "http://cli.example.com",
        ]);
        let config = Config::resolve(&cli).unwrap();
        assert_eq!(config.eutils_url, "http://cli.example.com");
        assert_eq!(config.database, "protein");
        assert_eq!(config.jobs, 2);
        assert!(config.keep_going);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/gbtag-env"));

        std::env::set_var("GBTAG_TIMEOUT_SECS", "soon");
        assert!(Config::from_env().is_err());

        std::env::remove_var("GBTAG_EUTILS_URL");
        std::env::remove_var("GBTAG_TIMEOUT_SECS");
        std::env::remove_var("GBTAG_OUTPUT_DIR");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::new().unwrap();
        config.jobs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new().unwrap();
        config.jobs = MAX_JOBS + 1;
        assert!(config.validate().is_err());

        let mut config = Config::new().unwrap();
        config.eutils_url = "ftp://ncbi".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::new().unwrap();
        config.database = " ".to_string();
        assert!(config.validate().is_err());
    }
}
