//! Error types for squatscan.
//!
//! Uses `thiserror` for ergonomic error definitions. Only construction-time
//! problems surface as errors; generation drops and enrichment failures are
//! absorbed where they happen.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up the mutation engine.
#[derive(Error, Debug)]
pub enum FuzzError {
    #[error("invalid domain name: {0}")]
    InvalidDomain(String),

    #[error("invalid domain grammar: {0}")]
    InvalidGrammar(#[from] regex::Error),

    #[error("unknown fuzzer: {0}")]
    UnknownFuzzer(String),
}

/// Errors raised by the enrichment scanner.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("DNS lookup for {name} failed: {reason}")]
    DnsLookup { name: String, reason: String },

    #[error("invalid nameserver address: {0}")]
    InvalidNameserver(String),

    #[error("GeoIP database error: {0}")]
    GeoIp(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors related to configuration management.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while validating engine options.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("domain name is required")]
    MissingDomain,

    #[error("number of threads must be between 1 and {max}")]
    InvalidThreads { max: usize },

    #[error("options registered and unregistered are mutually exclusive")]
    ConflictingFilters,

    #[error(transparent)]
    Fuzz(#[from] FuzzError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Top-level error for the command line.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fuzzer operations.
pub type FuzzResult<T> = Result<T, FuzzError>;

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
