//! gbtag - Main entry point

use clap::Parser;
use colored::Colorize;
use gbtag::{batch, BatchSummary, Cli, Config};
use gbtag_common::logging::{init_logging, LogConfig, LogLevel};
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Info })
        .log_file_prefix("gbtag")
        .build();

    // Environment variables take precedence
    let log_config = match log_config.clone().merge_env() {
        Ok(merged) => merged,
        Err(e) => {
            eprintln!("{} {}, ignoring logging environment", "Warning:".yellow().bold(), e);
            log_config
        },
    };

    // Progress goes through the console layer, so keep it even when the log
    // file or the extra filters cannot be set up
    let guard = match init_logging(&log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} {}, logging to console only", "Warning:".yellow().bold(), e);
            init_logging(&log_config.console_only()).ok()
        },
    };

    match execute(&cli).await {
        Ok(summary) => report(&summary),
        Err(e) => {
            error!(error = %e, "Batch failed");
            eprintln!("{} {}", "Error:".red().bold(), e);
            // Flush the file appender; process::exit skips destructors
            drop(guard);
            process::exit(1);
        },
    }
}

async fn execute(cli: &Cli) -> gbtag::Result<BatchSummary> {
    let config = Config::resolve(cli)?;
    let input = match cli.file {
        Some(ref path) => path.clone(),
        None => prompt_input_file()?,
    };

    batch::run(&config, &input).await
}

/// Ask for the input file, or take one line from stdin when it is piped
fn prompt_input_file() -> gbtag::Result<PathBuf> {
    let stdin = io::stdin();
    let answer = if stdin.is_terminal() {
        inquire::Text::new("Input file:").prompt()?
    } else {
        let mut line = String::new();
        stdin.lock().read_line(&mut line)?;
        line
    };

    Ok(PathBuf::from(answer.trim()))
}

fn report(summary: &BatchSummary) {
    println!(
        "{} terms: {} matched, {} without results, {} failed",
        summary.total(),
        summary.matched.to_string().green(),
        summary.unmatched.to_string().yellow(),
        summary.failed.to_string().red()
    );

    match summary.write_error {
        None => println!(
            "{} Output file {} successfully created.",
            "✓".green(),
            summary.report_path.display()
        ),
        Some(ref message) => eprintln!("{} {}", "✗".red(), message),
    }
}
