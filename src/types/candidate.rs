//! Candidate domains and the data gathered about them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fuzzer tag given to the unmodified input domain.
pub const ORIGINAL: &str = "original";

/// DNS record kinds collected during enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "MX")]
    Mx,
    #[serde(rename = "NS")]
    Ns,
}

impl RecordKind {
    /// Tag used in output and maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Mx => "MX",
            Self::Ns => "NS",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protocols a service banner can be captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Http,
    Smtp,
}

impl fmt::Display for BannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Smtp => write!(f, "smtp"),
        }
    }
}

/// Record kind that decides whether a candidate counts as registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegisteredBy {
    /// Registered when at least one A record resolved.
    #[default]
    A,
    /// Registered when at least one NS record resolved.
    Ns,
}

impl FromStr for RegisteredBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(Self::A),
            "ns" => Ok(Self::Ns),
            _ => Err(format!("unknown record type: {}", s)),
        }
    }
}

/// One generated domain variant plus everything learned about it.
///
/// Candidates are created by the [`Fuzzer`](crate::fuzzer::Fuzzer), enriched
/// once by the [`Scanner`](crate::scanner::Scanner) and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Mutator that produced this candidate, or `"original"`.
    pub fuzzer: String,
    /// The candidate domain, possibly containing Unicode.
    pub domain: String,
    /// ASCII-compatible form of `domain`; empty for plain ASCII names.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub punycode: String,
    /// Whether `domain` contains Cyrillic code points.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cyrillic: bool,
    /// Resolved records, in answer order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dns: BTreeMap<RecordKind, Vec<String>>,
    /// Country of the first A record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geoip: Option<String>,
    /// Captured service banners.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub banner: BTreeMap<BannerKind, String>,
    /// Reserved for WHOIS data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub whois: BTreeMap<String, String>,
    /// Reserved for page similarity scores.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub lsh: BTreeMap<String, u32>,
    /// Reserved for visual similarity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phash: Option<u32>,
}

impl Candidate {
    /// Create an unenriched candidate.
    ///
    /// `punycode` must be the ASCII form of `domain` when `domain` is not
    /// ASCII, and empty otherwise.
    pub fn new(
        fuzzer: impl Into<String>,
        domain: impl Into<String>,
        punycode: impl Into<String>,
    ) -> Self {
        let domain = domain.into();
        let cyrillic = contains_cyrillic(&domain);
        Self {
            fuzzer: fuzzer.into(),
            domain,
            punycode: punycode.into(),
            cyrillic,
            dns: BTreeMap::new(),
            geoip: None,
            banner: BTreeMap::new(),
            whois: BTreeMap::new(),
            lsh: BTreeMap::new(),
            phash: None,
        }
    }

    /// Name to put on the wire: punycode when present, else the domain.
    pub fn ascii_name(&self) -> &str {
        if self.punycode.is_empty() {
            &self.domain
        } else {
            &self.punycode
        }
    }

    /// Records of the given kind, empty if none were resolved.
    pub fn records(&self, kind: RecordKind) -> &[String] {
        self.dns.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn a_records(&self) -> &[String] {
        self.records(RecordKind::A)
    }

    pub fn mx_records(&self) -> &[String] {
        self.records(RecordKind::Mx)
    }

    pub fn ns_records(&self) -> &[String] {
        self.records(RecordKind::Ns)
    }

    pub fn has_a_records(&self) -> bool {
        !self.a_records().is_empty()
    }

    pub fn has_mx_records(&self) -> bool {
        !self.mx_records().is_empty()
    }

    pub fn has_ns_records(&self) -> bool {
        !self.ns_records().is_empty()
    }

    /// Check registration status according to the chosen record kind.
    pub fn is_registered(&self, by: RegisteredBy) -> bool {
        match by {
            RegisteredBy::A => self.has_a_records(),
            RegisteredBy::Ns => self.has_ns_records(),
        }
    }

    /// Banner captured for a protocol, if any.
    pub fn banner(&self, kind: BannerKind) -> Option<&str> {
        self.banner.get(&kind).map(String::as_str)
    }

    /// Check if the domain contains non-ASCII code points.
    pub fn is_idn(&self) -> bool {
        !self.domain.is_ascii()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.punycode.is_empty() {
            write!(f, "{}", self.domain)
        } else {
            write!(f, "{} ({})", self.domain, self.punycode)
        }
    }
}

/// Check if a string contains characters from the Cyrillic blocks.
///
/// Covers Cyrillic (U+0400–U+04FF) and Cyrillic Supplement (U+0500–U+052F).
/// Greek and Latin-extended lookalikes are not counted.
pub fn contains_cyrillic(s: &str) -> bool {
    s.chars().any(|c| ('\u{0400}'..='\u{052F}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_candidate_has_empty_maps() {
        let c = Candidate::new(ORIGINAL, "example.com", "");
        assert!(c.dns.is_empty());
        assert!(c.banner.is_empty());
        assert!(c.whois.is_empty());
        assert!(c.lsh.is_empty());
        assert!(c.a_records().is_empty());
        assert!(!c.cyrillic);
        assert_eq!(c.ascii_name(), "example.com");
    }

    #[test]
    fn test_contains_cyrillic() {
        assert!(contains_cyrillic("g\u{043E}ogle.com"));
        assert!(contains_cyrillic("googl\u{0435}.com"));
        assert!(contains_cyrillic("\u{0501}omain.com"));
        assert!(!contains_cyrillic("g\u{03BF}\u{03BF}gle.com"));
        assert!(!contains_cyrillic("google.com"));
    }

    #[test]
    fn test_ascii_name_prefers_punycode() {
        let c = Candidate::new("homoglyph", "g\u{043E}ogle.com", "xn--gogle-3ve.com");
        assert_eq!(c.ascii_name(), "xn--gogle-3ve.com");
        assert!(c.cyrillic);
        assert!(c.is_idn());
    }

    #[test]
    fn test_is_registered() {
        let mut c = Candidate::new(ORIGINAL, "example.com", "");
        assert!(!c.is_registered(RegisteredBy::A));

        c.dns.insert(RecordKind::Ns, vec!["ns1.example.com".to_string()]);
        assert!(!c.is_registered(RegisteredBy::A));
        assert!(c.is_registered(RegisteredBy::Ns));

        c.dns.insert(RecordKind::A, vec!["93.184.216.34".to_string()]);
        assert!(c.is_registered(RegisteredBy::A));
    }

    #[test]
    fn test_serialization_uses_record_tags() {
        let mut c = Candidate::new("addition", "examplea.com", "");
        c.dns.insert(RecordKind::A, vec!["1.2.3.4".to_string()]);
        c.banner.insert(BannerKind::Http, "nginx".to_string());

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["dns"]["A"][0], "1.2.3.4");
        assert_eq!(json["banner"]["http"], "nginx");
        assert!(json.get("punycode").is_none());
        assert!(json.get("geoip").is_none());
    }

    #[test]
    fn test_registered_by_from_str() {
        assert_eq!("A".parse::<RegisteredBy>().unwrap(), RegisteredBy::A);
        assert_eq!("ns".parse::<RegisteredBy>().unwrap(), RegisteredBy::Ns);
        assert!("mx".parse::<RegisteredBy>().is_err());
    }
}
