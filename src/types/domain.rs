//! Target domain decomposition.
//!
//! A target such as `mail.example.co` is split into a fixed subdomain prefix
//! (`mail`), the primary label that gets mutated (`example`) and the
//! top-level domain (`co`).

use crate::error::FuzzError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A target domain split into its mutable and fixed parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainParts {
    /// Labels before the primary label, joined with dots. Empty if none.
    pub prefix: String,
    /// The primary label.
    pub label: String,
    /// The top-level domain.
    pub tld: String,
}

impl DomainParts {
    /// Parse a fully qualified domain name.
    ///
    /// Input is trimmed, lowercased and stripped of one trailing dot. At
    /// least two labels are required and neither the primary label nor the
    /// TLD may be empty.
    pub fn parse(input: &str) -> Result<Self, FuzzError> {
        let normalized = input.trim().to_lowercase();
        let normalized = normalized.strip_suffix('.').unwrap_or(&normalized);

        let parts: Vec<&str> = normalized.split('.').collect();
        if parts.len() < 2 {
            return Err(FuzzError::InvalidDomain(input.to_string()));
        }

        let tld = parts[parts.len() - 1];
        let label = parts[parts.len() - 2];
        if tld.is_empty() || label.is_empty() {
            return Err(FuzzError::InvalidDomain(input.to_string()));
        }

        Ok(Self {
            prefix: parts[..parts.len() - 2].join("."),
            label: label.to_string(),
            tld: tld.to_string(),
        })
    }

    /// Build a full name from a (possibly mutated) label and TLD.
    pub fn compose(&self, label: &str, tld: &str) -> String {
        if self.prefix.is_empty() {
            format!("{}.{}", label, tld)
        } else {
            format!("{}.{}.{}", self.prefix, label, tld)
        }
    }

    /// Build a full name with the original TLD.
    pub fn with_label(&self, label: &str) -> String {
        self.compose(label, &self.tld)
    }
}

impl FromStr for DomainParts {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DomainParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.with_label(&self.label))
    }
}
