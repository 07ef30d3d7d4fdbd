//! Output formatting module.
//!
//! Provides formatters for the cli table, JSON, CSV and plain domain lists.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::{to_csv, CSV_HEADER};
pub use json_format::to_json;
pub use plain::{print_info, to_cli, to_list};

use crate::types::Candidate;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table
    #[default]
    Cli,
    /// Pretty-printed JSON array
    Json,
    /// CSV with one row per candidate
    Csv,
    /// One domain per line
    List,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Cli => "cli",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::List => "list",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cli" => Ok(OutputFormat::Cli),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "list" => Ok(OutputFormat::List),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Records shown for one kind: all of them, or only the first.
pub(crate) fn shown_records(records: &[String], all_records: bool) -> &[String] {
    if all_records {
        records
    } else {
        &records[..records.len().min(1)]
    }
}

/// Render candidates in the given format.
///
/// `styled` only affects the cli table. `all_records` affects the cli table
/// and CSV; JSON always carries every record.
pub fn render(
    candidates: &[Candidate],
    format: OutputFormat,
    styled: bool,
    all_records: bool,
) -> String {
    match format {
        OutputFormat::Cli => to_cli(candidates, styled, all_records),
        OutputFormat::Json => to_json(candidates),
        OutputFormat::Csv => to_csv(candidates, all_records).unwrap_or_else(|e| {
            warn!(error = %e, "failed to write CSV");
            String::new()
        }),
        OutputFormat::List => to_list(candidates),
    }
}

/// Render candidates by format name; an unknown name yields an empty string.
///
/// Table and CSV output show the first record of each kind.
pub fn format_results(candidates: &[Candidate], selector: &str) -> String {
    match selector.parse::<OutputFormat>() {
        Ok(format) => render(candidates, format, false, false),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Candidate> {
        vec![
            Candidate::new("original", "example.com", ""),
            Candidate::new("addition", "examplea.com", ""),
        ]
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("cli".parse::<OutputFormat>().unwrap(), OutputFormat::Cli);
        assert_eq!("list".parse::<OutputFormat>().unwrap(), OutputFormat::List);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Cli);
    }

    #[test]
    fn test_format_results_selectors() {
        let candidates = sample();
        for selector in ["json", "csv", "list", "cli"] {
            assert!(!format_results(&candidates, selector).is_empty(), "{}", selector);
        }
        assert_eq!(format_results(&candidates, "invalid"), "");
    }

    #[test]
    fn test_list_and_cli_cover_every_candidate() {
        let candidates = sample();
        assert_eq!(format_results(&candidates, "list").lines().count(), 2);
        assert_eq!(format_results(&candidates, "cli").lines().count(), 2);
        assert_eq!(format_results(&candidates, "csv").lines().count(), 3);
    }

    #[test]
    fn test_all_records_only_changes_table_and_csv() {
        let mut c = Candidate::new("original", "example.com", "");
        c.dns.insert(
            crate::types::RecordKind::A,
            vec!["192.0.2.1".to_string(), "192.0.2.2".to_string()],
        );
        let candidates = vec![c];

        let first_only = render(&candidates, OutputFormat::Cli, false, false);
        assert!(first_only.contains("192.0.2.1"));
        assert!(!first_only.contains("192.0.2.2"));
        assert!(render(&candidates, OutputFormat::Cli, false, true).contains("192.0.2.1;192.0.2.2"));

        assert!(!render(&candidates, OutputFormat::Csv, false, false).contains("192.0.2.2"));
        assert!(render(&candidates, OutputFormat::Csv, false, true).contains("192.0.2.1;192.0.2.2"));

        assert!(render(&candidates, OutputFormat::Json, false, false).contains("192.0.2.2"));
    }

    #[test]
    fn test_shown_records() {
        let records = vec!["a".to_string(), "b".to_string()];
        assert_eq!(shown_records(&records, false), ["a"]);
        assert_eq!(shown_records(&records, true), ["a", "b"]);
        assert!(shown_records(&[], false).is_empty());
    }
}
