//! Command-line interface.
//!
//! `squatscan <DOMAIN> [FLAGS]` generates permutations of a domain, checks
//! them and prints the results.

mod scan;

pub use scan::ScanCommand;

use crate::config::AppSettings;
use crate::error::CliResult;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// squatscan - find typosquatting and lookalike domains.
///
/// Generates permutations of a domain name with a set of fuzzers and checks
/// which of them resolve, optionally collecting MX/NS records, GeoIP
/// countries and HTTP/SMTP banners.
#[derive(Parser, Debug)]
#[command(name = "squatscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Domain permutation scanner for typosquatting detection", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanCommand,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "squatscan=debug"
        } else if self.quiet {
            "squatscan=error"
        } else {
            "squatscan=warn"
        }
    }

    /// Load settings from `--config` or the default location.
    pub fn settings(&self) -> CliResult<AppSettings> {
        let settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };
        debug!(?settings, "loaded settings");
        Ok(settings)
    }

    /// Run the command.
    pub async fn execute(&self) -> CliResult<()> {
        let settings = self.settings()?;
        self.scan.execute(&settings, self.quiet).await
    }
}
