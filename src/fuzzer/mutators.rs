//! Mutation algorithms.
//!
//! Each function takes the primary label and returns the mutated labels in
//! generation order. Validation happens later, in the fuzzer.

use super::tables::{homoglyphs, qwerty_neighbours, ALPHANUMERIC, VOWELS};
use crate::error::FuzzError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named mutation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mutator {
    Addition,
    Bitsquatting,
    Homoglyph,
    Hyphenation,
    Insertion,
    Omission,
    Repetition,
    Replacement,
    Subdomain,
    Transposition,
    VowelSwap,
    TldSwap,
    Dictionary,
}

impl Mutator {
    /// Mutators run when no selection is given.
    pub const DEFAULT: [Mutator; 11] = [
        Mutator::Addition,
        Mutator::Bitsquatting,
        Mutator::Homoglyph,
        Mutator::Hyphenation,
        Mutator::Insertion,
        Mutator::Omission,
        Mutator::Repetition,
        Mutator::Replacement,
        Mutator::Subdomain,
        Mutator::Transposition,
        Mutator::VowelSwap,
    ];

    /// Name used in selectors and as the candidate tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Bitsquatting => "bitsquatting",
            Self::Homoglyph => "homoglyph",
            Self::Hyphenation => "hyphenation",
            Self::Insertion => "insertion",
            Self::Omission => "omission",
            Self::Repetition => "repetition",
            Self::Replacement => "replacement",
            Self::Subdomain => "subdomain",
            Self::Transposition => "transposition",
            Self::VowelSwap => "vowel-swap",
            Self::TldSwap => "tld-swap",
            Self::Dictionary => "dictionary",
        }
    }

    /// Apply a label-level mutator.
    ///
    /// Returns `None` for mutators that need external data (`tld-swap`,
    /// `dictionary`); the fuzzer drives those itself.
    pub fn apply(&self, label: &str) -> Option<Vec<String>> {
        let labels = match self {
            Self::Addition => addition(label),
            Self::Bitsquatting => bitsquatting(label),
            Self::Homoglyph => homoglyph(label),
            Self::Hyphenation => hyphenation(label),
            Self::Insertion => insertion(label),
            Self::Omission => omission(label),
            Self::Repetition => repetition(label),
            Self::Replacement => replacement(label),
            Self::Subdomain => subdomain(label),
            Self::Transposition => transposition(label),
            Self::VowelSwap => vowel_swap(label),
            Self::TldSwap | Self::Dictionary => return None,
        };
        Some(labels)
    }
}

impl fmt::Display for Mutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mutator {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "addition" => Ok(Self::Addition),
            "bitsquatting" => Ok(Self::Bitsquatting),
            "homoglyph" => Ok(Self::Homoglyph),
            "hyphenation" => Ok(Self::Hyphenation),
            "insertion" => Ok(Self::Insertion),
            "omission" => Ok(Self::Omission),
            "repetition" => Ok(Self::Repetition),
            "replacement" => Ok(Self::Replacement),
            "subdomain" => Ok(Self::Subdomain),
            "transposition" => Ok(Self::Transposition),
            "vowel-swap" => Ok(Self::VowelSwap),
            "tld-swap" => Ok(Self::TldSwap),
            "dictionary" => Ok(Self::Dictionary),
            other => Err(FuzzError::UnknownFuzzer(other.to_string())),
        }
    }
}

/// Replace the character at `index` with `with`.
fn substitute(chars: &[char], index: usize, with: char) -> String {
    chars[..index]
        .iter()
        .chain(std::iter::once(&with))
        .chain(&chars[index + 1..])
        .collect()
}

/// Insert `with` before the character at `index`.
fn insert_at(chars: &[char], index: usize, with: char) -> String {
    chars[..index]
        .iter()
        .chain(std::iter::once(&with))
        .chain(&chars[index..])
        .collect()
}

pub fn addition(label: &str) -> Vec<String> {
    ALPHANUMERIC.chars().map(|c| format!("{}{}", label, c)).collect()
}

/// Flip each bit of each ASCII byte, keeping results in `[a-z0-9-]`.
pub fn bitsquatting(label: &str) -> Vec<String> {
    let bytes = label.as_bytes();
    let mut labels = Vec::new();

    for (i, &byte) in bytes.iter().enumerate() {
        if !byte.is_ascii() {
            continue;
        }
        for bit in 0..8 {
            let flipped = byte ^ (1 << bit);
            if flipped.is_ascii_lowercase() || flipped.is_ascii_digit() || flipped == b'-' {
                let mut mutated = bytes.to_vec();
                mutated[i] = flipped;
                // Only an ASCII byte was swapped for another ASCII byte.
                if let Ok(s) = String::from_utf8(mutated) {
                    labels.push(s);
                }
            }
        }
    }

    labels
}

pub fn homoglyph(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    let mut labels = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        for &glyph in homoglyphs(c) {
            labels.push(substitute(&chars, i, glyph));
        }
    }

    labels
}

pub fn hyphenation(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    (1..chars.len()).map(|i| insert_at(&chars, i, '-')).collect()
}

pub fn insertion(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    let mut labels = Vec::new();

    for i in 0..=chars.len() {
        for c in ALPHANUMERIC.chars() {
            labels.push(insert_at(&chars, i, c));
        }
    }

    labels
}

pub fn omission(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    (0..chars.len())
        .map(|i| chars[..i].iter().chain(&chars[i + 1..]).collect::<String>())
        .collect()
}

pub fn repetition(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    (0..chars.len()).map(|i| insert_at(&chars, i, chars[i])).collect()
}

pub fn replacement(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    let mut labels = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        for key in qwerty_neighbours(c).chars() {
            labels.push(substitute(&chars, i, key));
        }
    }

    labels
}

/// Split the label with a dot at internal boundaries not touching a hyphen.
///
/// Every internal boundary counts, including the last one (`googl.e`).
pub fn subdomain(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    (1..chars.len())
        .filter(|&i| chars[i] != '-' && chars[i - 1] != '-')
        .map(|i| insert_at(&chars, i, '.'))
        .collect()
}

/// Swap adjacent characters.
///
/// Equal pairs are skipped since swapping them yields the label itself, so
/// `google` gives 4 outputs rather than 5.
pub fn transposition(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    let mut labels = Vec::new();

    for i in 0..chars.len().saturating_sub(1) {
        if chars[i] == chars[i + 1] {
            continue;
        }
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        labels.push(swapped.into_iter().collect::<String>());
    }

    labels
}

pub fn vowel_swap(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    let mut labels = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        if !VOWELS.contains(&c) {
            continue;
        }
        for &v in VOWELS.iter().filter(|&&v| v != c) {
            labels.push(substitute(&chars, i, v));
        }
    }

    labels
}

/// Combine the label with dictionary words, as prefix and suffix.
pub fn dictionary(label: &str, words: &[String]) -> Vec<String> {
    let mut labels = Vec::with_capacity(words.len() * 4);

    for word in words {
        labels.push(format!("{}-{}", label, word));
        labels.push(format!("{}{}", label, word));
        labels.push(format!("{}-{}", word, label));
        labels.push(format!("{}{}", word, label));
    }

    labels
}
