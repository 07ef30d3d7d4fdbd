//! Dictionary file loading for TLD swapping and keyword combination.
//!
//! Format: one entry per line. Blank lines and lines starting with `//` are
//! skipped; an inline `//` truncates the line; surrounding whitespace is
//! trimmed.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// TLD dictionary used when `tld-swap` runs without explicit files.
pub const DEFAULT_TLD_FILE: &str = "dictionaries/common_tlds.dict";

/// Keywords combined with the label when no word dictionary is given.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "account", "admin", "app", "bank", "cloud", "help", "login", "mail", "online", "pay",
    "portal", "secure", "service", "shop", "signin", "store", "support", "update", "verify",
    "web",
];

/// Parse dictionary content into entries, in file order.
pub fn parse_dictionary(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                return None;
            }
            let entry = match line.find("//") {
                Some(idx) => line[..idx].trim(),
                None => line,
            };
            (!entry.is_empty()).then(|| entry.to_lowercase())
        })
        .collect()
}

/// Read a single dictionary file.
pub fn read_dictionary(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_dictionary(&content))
}

/// Read and merge several dictionary files.
///
/// Entries keep the order of their first appearance; later duplicates are
/// dropped. Files that cannot be read are skipped with a warning.
pub fn load_dictionaries(paths: &[PathBuf]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for path in paths {
        match read_dictionary(path) {
            Ok(words) => {
                debug!(path = %path.display(), count = words.len(), "loaded dictionary");
                for word in words {
                    if seen.insert(word.clone()) {
                        entries.push(word);
                    }
                }
            }
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable dictionary"),
        }
    }

    entries
}

/// Split a comma-separated list of paths, ignoring empty segments.
pub fn split_paths(list: &str) -> Vec<PathBuf> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
