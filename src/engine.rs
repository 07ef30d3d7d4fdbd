//! Orchestration of a full run: generate, enrich, filter.

use crate::error::{EngineError, EngineResult};
use crate::fuzzer::{FqdnGrammar, Fuzzer};
use crate::scanner::{DnsLookup, ScanConfig, Scanner, DEFAULT_GEOIP_DATABASE, DEFAULT_USER_AGENT};
use crate::types::{Candidate, RegisteredBy};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::info;

/// Options for a single run.
#[derive(Debug, Clone)]
pub struct Options {
    pub domain: String,
    /// Comma-separated mutator names; empty selects the default set.
    pub fuzzers: String,
    pub tld_files: Vec<PathBuf>,
    pub dictionary_files: Vec<PathBuf>,
    pub grammar: FqdnGrammar,
    pub threads: usize,
    pub geoip: bool,
    pub geoip_database: PathBuf,
    pub banners: bool,
    pub mx_check: bool,
    pub ns_check: bool,
    /// Show every record in table and CSV output instead of the first one.
    pub all_records: bool,
    pub nameservers: Vec<String>,
    pub user_agent: String,
    pub timeout: Duration,
    pub progress: bool,
    /// Keep only candidates that resolve.
    pub registered: bool,
    /// Keep only candidates that do not resolve.
    pub unregistered: bool,
    pub registered_by: RegisteredBy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            domain: String::new(),
            fuzzers: String::new(),
            tld_files: Vec::new(),
            dictionary_files: Vec::new(),
            grammar: FqdnGrammar::strict(),
            threads: 10,
            geoip: false,
            geoip_database: PathBuf::from(DEFAULT_GEOIP_DATABASE),
            banners: false,
            mx_check: false,
            ns_check: false,
            all_records: false,
            nameservers: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(5),
            progress: false,
            registered: false,
            unregistered: false,
            registered_by: RegisteredBy::default(),
        }
    }
}

impl Options {
    /// Options for a domain with everything else defaulted.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// Check option combinations before any work starts.
    pub fn validate(&self) -> EngineResult<()> {
        if self.domain.trim().is_empty() {
            return Err(EngineError::MissingDomain);
        }
        if self.registered && self.unregistered {
            return Err(EngineError::ConflictingFilters);
        }
        if self.threads < 1 || self.threads > Semaphore::MAX_PERMITS {
            return Err(EngineError::InvalidThreads {
                max: Semaphore::MAX_PERMITS,
            });
        }
        Ok(())
    }

    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            threads: self.threads,
            geoip: self.geoip,
            geoip_database: self.geoip_database.clone(),
            banners: self.banners,
            mx_check: self.mx_check,
            // NS answers are needed to filter by NS
            ns_check: self.ns_check
                || ((self.registered || self.unregistered) && self.registered_by == RegisteredBy::Ns),
            nameservers: self.nameservers.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            progress: self.progress,
            ..ScanConfig::default()
        }
    }
}

/// A validated run, ready to execute.
pub struct Engine {
    options: Options,
    fuzzer: Fuzzer,
    scanner: Scanner,
}

impl Engine {
    /// Validate options and build the fuzzer and scanner.
    pub fn new(options: Options) -> EngineResult<Self> {
        options.validate()?;
        let fuzzer = Self::build_fuzzer(&options)?;
        let scanner = Scanner::new(options.scan_config())?;
        Ok(Self { options, fuzzer, scanner })
    }

    /// Like [`Engine::new`] but with a custom resolver.
    pub fn with_resolver(options: Options, resolver: Arc<dyn DnsLookup>) -> EngineResult<Self> {
        options.validate()?;
        let fuzzer = Self::build_fuzzer(&options)?;
        let scanner = Scanner::with_resolver(options.scan_config(), resolver)?;
        Ok(Self { options, fuzzer, scanner })
    }

    fn build_fuzzer(options: &Options) -> EngineResult<Fuzzer> {
        Ok(Fuzzer::new(&options.domain)?
            .with_grammar(options.grammar.clone())
            .with_tld_files(options.tld_files.clone())
            .with_dictionary_files(options.dictionary_files.clone()))
    }

    /// Generate candidates only, without touching the network.
    pub fn generate(&self) -> Vec<Candidate> {
        self.fuzzer.generate(&self.options.fuzzers)
    }

    /// Generate, enrich and filter.
    pub async fn run(&self) -> Vec<Candidate> {
        let candidates = self.generate();
        let parts = self.fuzzer.parts();
        info!(
            label = %parts.label,
            tld = %parts.tld,
            candidates = candidates.len(),
            "generated"
        );

        let results = self.scanner.scan(candidates).await;
        filter_registered(
            results,
            self.options.registered,
            self.options.unregistered,
            self.options.registered_by,
        )
    }
}

/// Keep registered or unregistered candidates; with neither flag set the
/// input is returned unchanged.
pub fn filter_registered(
    candidates: Vec<Candidate>,
    registered: bool,
    unregistered: bool,
    by: RegisteredBy,
) -> Vec<Candidate> {
    if registered == unregistered {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|c| c.is_registered(by) == registered)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FuzzError, ScanError, ScanResult};
    use crate::types::{RecordKind, ORIGINAL};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct TableResolver(HashMap<(String, RecordKind), Vec<String>>);

    impl TableResolver {
        fn new(entries: &[(&str, RecordKind, &str)]) -> Self {
            let mut table: HashMap<(String, RecordKind), Vec<String>> = HashMap::new();
            for (name, kind, value) in entries {
                table
                    .entry((name.to_string(), *kind))
                    .or_default()
                    .push(value.to_string());
            }
            Self(table)
        }
    }

    #[async_trait]
    impl DnsLookup for TableResolver {
        async fn lookup(&self, name: &str, kind: RecordKind) -> ScanResult<Vec<String>> {
            self.0
                .get(&(name.to_string(), kind))
                .cloned()
                .ok_or_else(|| ScanError::DnsLookup {
                    name: name.to_string(),
                    reason: "NXDOMAIN".to_string(),
                })
        }
    }

    fn resolved(domain: &str, kind: RecordKind, value: &str) -> Candidate {
        let mut c = Candidate::new("addition", domain, "");
        c.dns.insert(kind, vec![value.to_string()]);
        c
    }

    #[test]
    fn test_validate_rejects_missing_domain() {
        assert!(matches!(
            Options::new("  ").validate(),
            Err(EngineError::MissingDomain)
        ));
    }

    #[test]
    fn test_validate_rejects_conflicting_filters() {
        let options = Options {
            registered: true,
            unregistered: true,
            ..Options::new("example.com")
        };
        assert!(matches!(
            options.validate(),
            Err(EngineError::ConflictingFilters)
        ));
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let options = Options {
            threads: 0,
            ..Options::new("example.com")
        };
        assert!(matches!(options.validate(), Err(EngineError::InvalidThreads { .. })));
    }

    #[test]
    fn test_validate_rejects_threads_above_semaphore_limit() {
        let options = Options {
            threads: usize::MAX,
            ..Options::new("example.com")
        };
        assert!(matches!(options.validate(), Err(EngineError::InvalidThreads { .. })));

        let options = Options {
            threads: Semaphore::MAX_PERMITS,
            ..Options::new("example.com")
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_domain_fails_before_scanning() {
        let result = Engine::with_resolver(Options::new("localhost"), Arc::new(TableResolver::new(&[])));
        assert!(matches!(
            result,
            Err(EngineError::Fuzz(FuzzError::InvalidDomain(_)))
        ));
    }

    #[test]
    fn test_ns_filter_enables_ns_check() {
        let options = Options {
            registered: true,
            registered_by: RegisteredBy::Ns,
            ..Options::new("example.com")
        };
        assert!(options.scan_config().ns_check);
        assert!(!Options::new("example.com").scan_config().ns_check);
    }

    #[test]
    fn test_filter_registered() {
        let candidates = vec![
            resolved("a.com", RecordKind::A, "192.0.2.1"),
            Candidate::new("addition", "b.com", ""),
            resolved("c.com", RecordKind::Ns, "ns.c.com"),
        ];

        let kept = filter_registered(candidates.clone(), true, false, RegisteredBy::A);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].domain, "a.com");

        let kept = filter_registered(candidates.clone(), false, true, RegisteredBy::A);
        let names: Vec<_> = kept.iter().map(|c| c.domain.as_str()).collect();
        assert_eq!(names, ["b.com", "c.com"]);

        let kept = filter_registered(candidates.clone(), true, false, RegisteredBy::Ns);
        assert_eq!(kept[0].domain, "c.com");

        assert_eq!(filter_registered(candidates, false, false, RegisteredBy::A).len(), 3);
    }

    #[tokio::test]
    async fn test_run_keeps_only_registered() {
        let resolver = TableResolver::new(&[("example.com", RecordKind::A, "93.184.215.14")]);
        let options = Options {
            fuzzers: "omission,repetition".to_string(),
            registered: true,
            threads: 4,
            ..Options::new("example.com")
        };
        let engine = Engine::with_resolver(options, Arc::new(resolver)).unwrap();

        let results = engine.run().await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].fuzzer, ORIGINAL);
        assert_eq!(results[0].a_records(), ["93.184.215.14"]);
    }

    #[tokio::test]
    async fn test_run_without_filter_returns_everything() {
        let options = Options {
            fuzzers: "omission".to_string(),
            ..Options::new("example.com")
        };
        let engine = Engine::with_resolver(options, Arc::new(TableResolver::new(&[]))).unwrap();

        let generated = engine.generate();
        let results = engine.run().await;
        assert_eq!(results.len(), generated.len());
        assert!(results.iter().all(|c| c.dns.is_empty()));
    }
}
