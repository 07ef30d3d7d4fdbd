//! Domain name grammar used to gate generated candidates.

use crate::error::FuzzResult;
use regex::Regex;

/// Strict FQDN grammar: ASCII labels of 1-63 characters and an alphabetic TLD.
pub const STRICT_FQDN_PATTERN: &str = r"^([a-z0-9-]{1,63}\.)+[a-z]{2,63}$";

/// Grammar every stored candidate must satisfy.
///
/// Passed into the [`Fuzzer`](super::Fuzzer) as a value so that callers can
/// swap in a relaxed pattern without touching global state.
#[derive(Debug, Clone)]
pub struct FqdnGrammar {
    pattern: Regex,
}

impl FqdnGrammar {
    /// The strict ASCII grammar.
    pub fn strict() -> Self {
        Self {
            pattern: Regex::new(STRICT_FQDN_PATTERN).expect("strict FQDN pattern is valid"),
        }
    }

    /// Build a grammar from a custom regular expression.
    pub fn new(pattern: &str) -> FuzzResult<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Check a name against the grammar. Input is lowercased first.
    pub fn is_match(&self, name: &str) -> bool {
        self.pattern.is_match(&name.to_lowercase())
    }

    /// The underlying pattern.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for FqdnGrammar {
    fn default() -> Self {
        Self::strict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_accepts_valid_names() {
        let grammar = FqdnGrammar::strict();
        assert!(grammar.is_match("example.com"));
        assert!(grammar.is_match("sub.example-1.org"));
        assert!(grammar.is_match("xn--gogle-3ve.com"));
        assert!(grammar.is_match("EXAMPLE.COM"));
    }

    #[test]
    fn test_strict_rejects_invalid_names() {
        let grammar = FqdnGrammar::strict();
        assert!(!grammar.is_match("example"));
        assert!(!grammar.is_match("exa_mple.com"));
        assert!(!grammar.is_match("example.c"));
        assert!(!grammar.is_match("example.c0m"));
        assert!(!grammar.is_match("ex..ample.com"));
        assert!(!grammar.is_match("g\u{043E}ogle.com"));
        assert!(!grammar.is_match(&format!("{}.com", "a".repeat(64))));
    }

    #[test]
    fn test_pattern_is_exposed() {
        assert_eq!(FqdnGrammar::strict().as_str(), STRICT_FQDN_PATTERN);
        assert_eq!(FqdnGrammar::new(r"^.+$").unwrap().as_str(), r"^.+$");
    }

    #[test]
    fn test_custom_grammar() {
        let relaxed = FqdnGrammar::new(r"^.+\..+$").unwrap();
        assert!(relaxed.is_match("g\u{043E}ogle.com"));
        assert!(FqdnGrammar::new("(").is_err());
    }
}
