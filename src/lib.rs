//! # squatscan - Domain Permutation Scanner
//!
//! squatscan detects typosquatting, phishing and brand-impersonation domains.
//! It generates plausible misspellings of a target domain and checks each of
//! them for DNS records, GeoIP location and service banners.
//!
//! ## Features
//!
//! - **Fuzzers**: addition, bitsquatting, homoglyph, hyphenation, insertion,
//!   omission, repetition, replacement, subdomain, transposition, vowel-swap,
//!   tld-swap and dictionary
//! - **IDN Aware**: Unicode candidates are encoded to punycode and validated
//!   in their ASCII form
//! - **Bounded Concurrency**: Candidates are enriched by async tasks gated by
//!   a fixed number of permits
//! - **Enrichment**: A, MX and NS records, GeoIP country, HTTP `Server:` and
//!   SMTP greeting banners
//! - **Multiple Output Formats**: cli table, JSON, CSV and plain lists
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use squatscan::engine::{Engine, Options};
//!
//! #[tokio::main]
//! async fn main() {
//!     let options = Options {
//!         fuzzers: "homoglyph,omission".to_string(),
//!         registered: true,
//!         ..Options::new("example.com")
//!     };
//!     let engine = Engine::new(options).unwrap();
//!
//!     for candidate in engine.run().await {
//!         println!("{} {:?}", candidate, candidate.a_records());
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - The `Candidate` record and domain decomposition
//! - [`fuzzer`] - Mutation engine producing validated candidates
//! - [`scanner`] - Enrichment scanner and the `DnsLookup` trait
//! - [`banner`] - HTTP and SMTP banner grabbing
//! - [`engine`] - Option validation, orchestration and filtering
//! - [`config`] - Stored application settings
//! - [`output`] - Output formatting utilities
//! - [`error`] - Error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fuzzer;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use engine::{Engine, Options};
pub use error::{EngineError, FuzzError, ScanError};
pub use fuzzer::{FqdnGrammar, Fuzzer, Mutator};
pub use output::{format_results, OutputFormat};
pub use scanner::{ScanConfig, Scanner};
pub use types::{Candidate, RecordKind, RegisteredBy};
