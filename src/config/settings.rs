//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration and data.

use crate::error::{ConfigError, ConfigResult};
use crate::output::OutputFormat;
use crate::scanner::{DEFAULT_GEOIP_DATABASE, DEFAULT_NAMESERVER, DEFAULT_USER_AGENT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/squatscan)
    pub config_dir: PathBuf,
    /// Data directory (~/.local/share/squatscan)
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using XDG directories. Nothing is created on disk.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "squatscan", "squatscan")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
            data_dir: project.data_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Get the path where a GeoIP database is looked for by default.
    pub fn geoip_database(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_GEOIP_DATABASE)
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default number of concurrent lookups.
    pub threads: usize,
    /// Timeout for each DNS query, connect and read, in milliseconds.
    pub timeout_ms: u64,
    /// Nameservers; only the first is queried.
    pub nameservers: Vec<String>,
    /// User-Agent for HTTP banner requests.
    pub user_agent: String,
    /// Default comma-separated fuzzer selection; empty for the default set.
    pub fuzzers: String,
    /// GeoIP database; the data directory is searched when unset.
    pub geoip_database: Option<PathBuf>,
    /// TLD dictionaries used by `tld-swap` when none are given.
    pub tld_files: Vec<PathBuf>,
    /// Word dictionaries used by `dictionary` when none are given.
    pub dictionary_files: Vec<PathBuf>,
    /// Default output format.
    pub default_format: String,
    /// Show a progress bar by default.
    pub progress: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            threads: 10,
            timeout_ms: 5000,
            nameservers: vec![DEFAULT_NAMESERVER.to_string()],
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fuzzers: String::new(),
            geoip_database: None,
            tld_files: Vec::new(),
            dictionary_files: Vec::new(),
            default_format: OutputFormat::Cli.to_string(),
            progress: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location; a missing file yields defaults.
    pub fn load() -> ConfigResult<Self> {
        let paths = Paths::new()?;
        let file = paths.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Save settings to a specific file.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Per-operation timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Default output format; an unrecognised name falls back to the table.
    pub fn output_format(&self) -> OutputFormat {
        self.default_format.parse().unwrap_or_default()
    }

    /// GeoIP database to open when GeoIP is requested.
    ///
    /// Without an explicit path the working directory is searched first,
    /// then the data directory.
    pub fn geoip_database(&self) -> PathBuf {
        if let Some(path) = &self.geoip_database {
            return path.clone();
        }

        let mut candidates = vec![PathBuf::from(DEFAULT_GEOIP_DATABASE)];
        if let Ok(paths) = Paths::new() {
            candidates.push(paths.geoip_database());
        }
        first_existing(&candidates)
    }
}

/// First path that exists on disk, or the first one when none do.
fn first_existing(candidates: &[PathBuf]) -> PathBuf {
    candidates
        .iter()
        .find(|path| path.is_file())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_default()
}
