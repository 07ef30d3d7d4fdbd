//! Mutation engine - generates candidate domains from a target.
//!
//! The engine splits the target into prefix/label/TLD, runs the selected
//! mutators over the label and passes every result through a [`FqdnGrammar`]
//! before keeping it. [`Fuzzer::generate`] hands back an owned, finished
//! list; nothing is shared or locked.

pub mod dictionary;
mod grammar;
mod mutators;
mod tables;

pub use dictionary::{load_dictionaries, parse_dictionary, DEFAULT_KEYWORDS, DEFAULT_TLD_FILE};
pub use grammar::{FqdnGrammar, STRICT_FQDN_PATTERN};
pub use mutators::Mutator;

use crate::error::FuzzResult;
use crate::types::{Candidate, DomainParts, ORIGINAL};
use std::path::PathBuf;
use tracing::{debug, trace, warn};

/// A parsed mutator selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Recognized mutators in selector order, without repeats.
    pub mutators: Vec<Mutator>,
    /// Tokens that did not name a mutator.
    pub unknown: Vec<String>,
}

impl Selection {
    /// Parse a comma-separated selector. An empty selector means the default set.
    pub fn parse(selector: &str) -> Self {
        if selector.trim().is_empty() {
            return Self {
                mutators: Mutator::DEFAULT.to_vec(),
                unknown: Vec::new(),
            };
        }

        let mut mutators = Vec::new();
        let mut unknown = Vec::new();

        for token in selector.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<Mutator>() {
                Ok(m) if !mutators.contains(&m) => mutators.push(m),
                Ok(_) => {}
                Err(_) => unknown.push(token.to_string()),
            }
        }

        Self { mutators, unknown }
    }
}

/// Domain permutation engine.
#[derive(Debug, Clone)]
pub struct Fuzzer {
    parts: DomainParts,
    grammar: FqdnGrammar,
    tld_files: Vec<PathBuf>,
    dictionary_files: Vec<PathBuf>,
}

impl Fuzzer {
    /// Create a fuzzer for a fully qualified domain name.
    ///
    /// Fails with [`FuzzError::InvalidDomain`](crate::error::FuzzError) when
    /// the name has fewer than two labels.
    pub fn new(domain: &str) -> FuzzResult<Self> {
        Ok(Self {
            parts: DomainParts::parse(domain)?,
            grammar: FqdnGrammar::strict(),
            tld_files: Vec::new(),
            dictionary_files: Vec::new(),
        })
    }

    /// Use a different grammar to validate candidates.
    pub fn with_grammar(mut self, grammar: FqdnGrammar) -> Self {
        debug!(pattern = grammar.as_str(), "using grammar");
        self.grammar = grammar;
        self
    }

    /// TLD dictionaries for `tld-swap`.
    pub fn with_tld_files(mut self, files: Vec<PathBuf>) -> Self {
        self.tld_files = files;
        self
    }

    /// Word dictionaries for `dictionary`.
    pub fn with_dictionary_files(mut self, files: Vec<PathBuf>) -> Self {
        self.dictionary_files = files;
        self
    }

    /// The decomposed target.
    pub fn parts(&self) -> &DomainParts {
        &self.parts
    }

    /// Generate candidates for a comma-separated mutator selector.
    ///
    /// The original domain comes first. Unknown mutator names are skipped
    /// with a warning.
    pub fn generate(&self, selector: &str) -> Vec<Candidate> {
        let selection = Selection::parse(selector);
        for token in &selection.unknown {
            warn!(fuzzer = %token, "ignoring unknown fuzzer");
        }
        self.generate_with(&selection.mutators)
    }

    /// Generate candidates for an explicit list of mutators.
    pub fn generate_with(&self, mutators: &[Mutator]) -> Vec<Candidate> {
        let mut collector = Collector::new(&self.grammar);
        collector.add(ORIGINAL, self.parts.to_string());

        for &mutator in mutators {
            let before = collector.len();
            match mutator {
                Mutator::TldSwap => self.tld_swap(&mut collector),
                Mutator::Dictionary => self.dictionary(&mut collector),
                _ => {
                    for label in mutator.apply(&self.parts.label).unwrap_or_default() {
                        collector.add(mutator.name(), self.parts.with_label(&label));
                    }
                }
            }
            debug!(fuzzer = %mutator, count = collector.len() - before, "generated candidates");
        }

        collector.finish()
    }

    fn tld_swap(&self, collector: &mut Collector<'_>) {
        let files = if self.tld_files.is_empty() {
            vec![PathBuf::from(DEFAULT_TLD_FILE)]
        } else {
            self.tld_files.clone()
        };

        for tld in load_dictionaries(&files) {
            if tld == self.parts.tld {
                continue;
            }
            collector.add(
                Mutator::TldSwap.name(),
                self.parts.compose(&self.parts.label, &tld),
            );
        }
    }

    fn dictionary(&self, collector: &mut Collector<'_>) {
        let words = if self.dictionary_files.is_empty() {
            DEFAULT_KEYWORDS.iter().map(|w| w.to_string()).collect()
        } else {
            load_dictionaries(&self.dictionary_files)
        };

        for label in mutators::dictionary(&self.parts.label, &words) {
            collector.add(Mutator::Dictionary.name(), self.parts.with_label(&label));
        }
    }
}

/// Accumulates validated candidates during a single generation pass.
struct Collector<'a> {
    grammar: &'a FqdnGrammar,
    candidates: Vec<Candidate>,
}

impl<'a> Collector<'a> {
    fn new(grammar: &'a FqdnGrammar) -> Self {
        Self {
            grammar,
            candidates: Vec::new(),
        }
    }

    /// Validate and store a candidate; invalid names are dropped.
    ///
    /// ASCII names are checked as-is. Non-ASCII names are converted to
    /// punycode and the punycode form is checked instead, so every stored
    /// IDN candidate carries a resolvable ASCII name.
    fn add(&mut self, fuzzer: &str, name: String) {
        let punycode = if name.is_ascii() {
            String::new()
        } else {
            match idna::domain_to_ascii(&name) {
                Ok(ascii) if ascii != name => ascii,
                _ => {
                    trace!(fuzzer, %name, "dropping candidate without punycode form");
                    return;
                }
            }
        };

        let wire_name = if punycode.is_empty() { &name } else { &punycode };
        if !self.grammar.is_match(wire_name) {
            trace!(fuzzer, %name, "dropping invalid candidate");
            return;
        }

        self.candidates.push(Candidate::new(fuzzer, name, punycode));
    }

    fn len(&self) -> usize {
        self.candidates.len()
    }

    fn finish(self) -> Vec<Candidate> {
        self.candidates
    }
}
