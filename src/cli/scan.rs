//! Scan command implementation.
//!
//! Turns command-line flags and stored settings into engine options, runs
//! the engine and writes the rendered results.

use crate::config::AppSettings;
use crate::engine::{Engine, Options};
use crate::error::CliResult;
use crate::fuzzer::dictionary::split_paths;
use crate::output::{self, OutputFormat};
use crate::types::RegisteredBy;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Generate and check permutations of a domain.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// Domain name to permute (e.g. example.com)
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// Comma-separated fuzzers to run (default: all except tld-swap and dictionary)
    ///
    /// Available: addition, bitsquatting, homoglyph, hyphenation, insertion,
    /// omission, repetition, replacement, subdomain, transposition,
    /// vowel-swap, tld-swap, dictionary
    #[arg(long, value_name = "LIST")]
    pub fuzzers: Option<String>,

    /// TLD dictionary for tld-swap (repeatable or comma-separated)
    #[arg(long = "tld", value_name = "FILE")]
    pub tld: Vec<String>,

    /// Word dictionary for the dictionary fuzzer (repeatable or comma-separated)
    #[arg(long = "dictionary", value_name = "FILE")]
    pub dictionary: Vec<String>,

    /// Number of concurrent lookups
    #[arg(short = 't', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Look up the country of each resolved address
    #[arg(short = 'g', long)]
    pub geoip: bool,

    /// GeoIP2/GeoLite2 country database
    #[arg(long = "geoip-db", value_name = "FILE")]
    pub geoip_db: Option<PathBuf>,

    /// Capture HTTP and SMTP service banners
    #[arg(short = 'b', long)]
    pub banners: bool,

    /// Resolve MX records
    #[arg(short = 'm', long = "mxcheck")]
    pub mx_check: bool,

    /// Resolve NS records
    #[arg(short = 'x', long = "nscheck")]
    pub ns_check: bool,

    /// Show every DNS record instead of only the first of each kind
    #[arg(short = 'a', long = "all")]
    pub all_records: bool,

    /// Nameservers to query as ip[:port]; only the first is used
    #[arg(short = 'n', long, value_name = "LIST", value_delimiter = ',')]
    pub nameservers: Vec<String>,

    /// User-Agent for HTTP banner requests
    #[arg(long = "useragent", value_name = "STRING")]
    pub user_agent: Option<String>,

    /// Timeout for each DNS query, connect and read, in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Show only registered domains
    #[arg(short = 'r', long)]
    pub registered: bool,

    /// Show only unregistered domains
    #[arg(short = 'u', long)]
    pub unregistered: bool,

    /// Record kind that decides whether a domain is registered
    #[arg(long = "registered-by", value_enum, default_value = "a")]
    pub registered_by: RegisteredBy,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write results to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,
}

impl ScanCommand {
    /// Merge flags over settings.
    pub fn to_options(&self, settings: &AppSettings) -> Options {
        let tld_files = if self.tld.is_empty() {
            settings.tld_files.clone()
        } else {
            self.tld.iter().flat_map(|s| split_paths(s)).collect()
        };
        let dictionary_files = if self.dictionary.is_empty() {
            settings.dictionary_files.clone()
        } else {
            self.dictionary.iter().flat_map(|s| split_paths(s)).collect()
        };
        let nameservers = if self.nameservers.is_empty() {
            settings.nameservers.clone()
        } else {
            self.nameservers.clone()
        };

        Options {
            domain: self.domain.clone(),
            fuzzers: self.fuzzers.clone().unwrap_or_else(|| settings.fuzzers.clone()),
            tld_files,
            dictionary_files,
            threads: self.threads.unwrap_or(settings.threads),
            geoip: self.geoip,
            geoip_database: self
                .geoip_db
                .clone()
                .unwrap_or_else(|| settings.geoip_database()),
            banners: self.banners,
            mx_check: self.mx_check,
            ns_check: self.ns_check,
            all_records: self.all_records,
            nameservers,
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| settings.user_agent.clone()),
            timeout: self
                .timeout
                .map(Duration::from_millis)
                .unwrap_or_else(|| settings.timeout()),
            progress: self.progress || settings.progress,
            registered: self.registered,
            unregistered: self.unregistered,
            registered_by: self.registered_by,
            ..Options::default()
        }
    }

    /// Execute the scan command.
    pub async fn execute(&self, settings: &AppSettings, quiet: bool) -> CliResult<()> {
        let format = self.format.unwrap_or_else(|| settings.output_format());
        let mut options = self.to_options(settings);
        if quiet {
            options.progress = false;
        }

        let all_records = options.all_records;
        let engine = Engine::new(options)?;
        let results = engine.run().await;

        match &self.output {
            Some(path) => {
                fs::write(path, output::render(&results, format, false, all_records))?;
                if !quiet {
                    output::print_info(&format!(
                        "Wrote {} results to {}",
                        results.len(),
                        path.display()
                    ));
                }
            }
            None => print!("{}", output::render(&results, format, true, all_records)),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> ScanCommand {
        let mut argv = vec!["squatscan"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv).scan
    }

    #[test]
    fn test_defaults_come_from_settings() {
        let settings = AppSettings {
            threads: 25,
            fuzzers: "omission".to_string(),
            ..Default::default()
        };
        let options = parse(&["example.com"]).to_options(&settings);

        assert_eq!(options.domain, "example.com");
        assert_eq!(options.threads, 25);
        assert_eq!(options.fuzzers, "omission");
        assert_eq!(options.nameservers, vec!["8.8.8.8:53"]);
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.registered_by, RegisteredBy::A);
    }

    #[test]
    fn test_flags_override_settings() {
        let options = parse(&[
            "example.com",
            "-t",
            "3",
            "--fuzzers",
            "addition,homoglyph",
            "-n",
            "1.1.1.1,9.9.9.9",
            "--useragent",
            "squat/1.0",
            "--timeout",
            "750",
            "-r",
            "--registered-by",
            "ns",
            "-bmxa",
        ])
        .to_options(&AppSettings::default());

        assert_eq!(options.threads, 3);
        assert_eq!(options.fuzzers, "addition,homoglyph");
        assert_eq!(options.nameservers, vec!["1.1.1.1", "9.9.9.9"]);
        assert_eq!(options.user_agent, "squat/1.0");
        assert_eq!(options.timeout, Duration::from_millis(750));
        assert!(options.registered);
        assert_eq!(options.registered_by, RegisteredBy::Ns);
        assert!(options.banners && options.mx_check && options.ns_check && options.all_records);
    }

    #[test]
    fn test_dictionary_paths_are_split() {
        let options = parse(&[
            "example.com",
            "--tld",
            "a.dict,b.dict",
            "--tld",
            "c.dict",
            "--dictionary",
            "words.dict",
        ])
        .to_options(&AppSettings::default());

        assert_eq!(
            options.tld_files,
            vec![
                PathBuf::from("a.dict"),
                PathBuf::from("b.dict"),
                PathBuf::from("c.dict")
            ]
        );
        assert_eq!(options.dictionary_files, vec![PathBuf::from("words.dict")]);
    }

    #[test]
    fn test_format_flag() {
        assert_eq!(parse(&["example.com", "-f", "json"]).format, Some(OutputFormat::Json));
        assert_eq!(parse(&["example.com"]).format, None);
    }

    #[tokio::test]
    async fn test_execute_rejects_conflicting_filters() {
        let cmd = parse(&["example.com", "-r", "-u"]);
        let result = cmd.execute(&AppSettings::default(), true).await;
        assert!(matches!(
            result,
            Err(crate::error::CliError::Engine(
                crate::error::EngineError::ConflictingFilters
            ))
        ));
    }
}
