//! Enrichment scanner - checks candidates for DNS, GeoIP and banners.
//!
//! Every candidate is enriched by its own tokio task. A semaphore sized to
//! the configured thread count gates how many run at once, and the batch
//! returns only after all tasks have been joined, in input order.

pub mod dns;
pub mod geoip;

pub use dns::{parse_nameserver, select_nameserver, DnsLookup, TrustDnsLookup, DEFAULT_NAMESERVER};
pub use geoip::{GeoIp, DEFAULT_GEOIP_DATABASE};

use crate::banner::{grab_http_banner, grab_smtp_banner, HTTP_PORT, SMTP_PORT};
use crate::error::{ScanError, ScanResult};
use crate::types::{BannerKind, Candidate, RecordKind};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Default User-Agent for HTTP banner requests.
pub const DEFAULT_USER_AGENT: &str = concat!("Mozilla/5.0 squatscan/", env!("CARGO_PKG_VERSION"));

/// Configuration for a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum number of candidates enriched at once.
    pub threads: usize,
    /// Look up the country of the first A record.
    pub geoip: bool,
    /// GeoIP country database.
    pub geoip_database: PathBuf,
    /// Capture the HTTP `Server:` banner.
    pub banners: bool,
    /// Resolve MX records and capture the SMTP greeting.
    pub mx_check: bool,
    /// Resolve NS records.
    pub ns_check: bool,
    /// Port used for the HTTP banner.
    pub http_port: u16,
    /// Port used for the SMTP banner.
    pub smtp_port: u16,
    /// Nameservers; only the first is queried.
    pub nameservers: Vec<String>,
    /// User-Agent sent with HTTP banner requests.
    pub user_agent: String,
    /// Timeout for each DNS exchange, connect and read.
    pub timeout: Duration,
    /// Show a progress bar on stderr.
    pub progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threads: 10,
            geoip: false,
            geoip_database: PathBuf::from(DEFAULT_GEOIP_DATABASE),
            banners: false,
            mx_check: false,
            ns_check: false,
            http_port: HTTP_PORT,
            smtp_port: SMTP_PORT,
            nameservers: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(5),
            progress: false,
        }
    }
}

impl ScanConfig {
    /// Set the number of concurrent tasks.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Enable GeoIP lookups against a database file.
    pub fn with_geoip(mut self, database: impl Into<PathBuf>) -> Self {
        self.geoip = true;
        self.geoip_database = database.into();
        self
    }

    /// Enable banner grabbing.
    pub fn with_banners(mut self) -> Self {
        self.banners = true;
        self
    }

    /// Enable MX lookups and SMTP banners.
    pub fn with_mx_check(mut self) -> Self {
        self.mx_check = true;
        self
    }

    /// Enable NS lookups.
    pub fn with_ns_check(mut self) -> Self {
        self.ns_check = true;
        self
    }

    /// Grab HTTP banners on a different port.
    pub fn with_http_port(mut self, port: u16) -> Self {
        self.http_port = port;
        self
    }

    /// Grab SMTP banners on a different port.
    pub fn with_smtp_port(mut self, port: u16) -> Self {
        self.smtp_port = port;
        self
    }

    /// Set the nameserver list.
    pub fn with_nameservers(mut self, nameservers: Vec<String>) -> Self {
        self.nameservers = nameservers;
        self
    }

    /// Set the User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-operation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Show a progress bar.
    pub fn with_progress(mut self) -> Self {
        self.progress = true;
        self
    }
}

/// Per-candidate enrichment pipeline, shared read-only by all tasks.
struct Enricher {
    resolver: Arc<dyn DnsLookup>,
    geoip: Option<GeoIp>,
    banners: bool,
    mx_check: bool,
    ns_check: bool,
    http_port: u16,
    smtp_port: u16,
    user_agent: String,
    timeout: Duration,
}

impl Enricher {
    /// Run every enabled stage once.
    ///
    /// A failed A lookup ends enrichment; later stages are independent of
    /// each other and fail silently.
    async fn enrich(&self, mut candidate: Candidate) -> Candidate {
        let name = candidate.ascii_name().to_string();

        match self.resolver.lookup(&name, RecordKind::A).await {
            Ok(addresses) => store_records(&mut candidate, RecordKind::A, addresses),
            Err(e) => {
                debug!(domain = %candidate.domain, error = %e, "unresolved");
                return candidate;
            }
        }

        let first_ip = candidate
            .a_records()
            .first()
            .and_then(|a| a.parse::<IpAddr>().ok());

        if let (Some(geoip), Some(ip)) = (&self.geoip, first_ip) {
            candidate.geoip = geoip.country(ip);
        }

        if self.banners {
            if let Some(ip) = first_ip {
                let addr = SocketAddr::new(ip, self.http_port);
                if let Some(banner) =
                    grab_http_banner(addr, &name, &self.user_agent, self.timeout).await
                {
                    candidate.banner.insert(BannerKind::Http, banner);
                }
            }
        }

        if self.mx_check {
            match self.resolver.lookup(&name, RecordKind::Mx).await {
                Ok(hosts) => {
                    store_records(&mut candidate, RecordKind::Mx, hosts);
                    if let Some(mx) = candidate.mx_records().first().cloned() {
                        if let Some(banner) = grab_smtp_banner(&mx, self.smtp_port, self.timeout).await {
                            candidate.banner.insert(BannerKind::Smtp, banner);
                        }
                    }
                }
                Err(e) => debug!(domain = %candidate.domain, error = %e, "MX lookup failed"),
            }
        }

        if self.ns_check {
            match self.resolver.lookup(&name, RecordKind::Ns).await {
                Ok(servers) => store_records(&mut candidate, RecordKind::Ns, servers),
                Err(e) => debug!(domain = %candidate.domain, error = %e, "NS lookup failed"),
            }
        }

        candidate
    }
}

/// Keep every answer, in order; empty answers leave the map untouched.
fn store_records(candidate: &mut Candidate, kind: RecordKind, values: Vec<String>) {
    if !values.is_empty() {
        candidate.dns.insert(kind, values);
    }
}

/// Bounded-concurrency enrichment scanner.
pub struct Scanner {
    enricher: Arc<Enricher>,
    threads: usize,
    progress: bool,
}

impl Scanner {
    /// Create a scanner that queries the first configured nameserver.
    ///
    /// A GeoIP database that cannot be opened disables GeoIP for the session.
    pub fn new(config: ScanConfig) -> ScanResult<Self> {
        let nameserver = select_nameserver(&config.nameservers)?;
        if config.nameservers.len() > 1 {
            warn!(
                using = %nameserver,
                ignored = config.nameservers.len() - 1,
                "only the first nameserver is queried"
            );
        }
        let resolver = Arc::new(TrustDnsLookup::new(nameserver, config.timeout));
        Self::with_resolver(config, resolver)
    }

    /// Create a scanner with a custom resolver.
    pub fn with_resolver(config: ScanConfig, resolver: Arc<dyn DnsLookup>) -> ScanResult<Self> {
        if config.threads == 0 {
            return Err(ScanError::InvalidConfig(
                "number of threads must be greater than zero".to_string(),
            ));
        }
        if config.threads > Semaphore::MAX_PERMITS {
            return Err(ScanError::InvalidConfig(format!(
                "number of threads must not exceed {}",
                Semaphore::MAX_PERMITS
            )));
        }

        let geoip = if config.geoip {
            match GeoIp::open(&config.geoip_database) {
                Ok(db) => Some(db),
                Err(e) => {
                    warn!(error = %e, "GeoIP database unavailable, continuing without it");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            enricher: Arc::new(Enricher {
                resolver,
                geoip,
                banners: config.banners,
                mx_check: config.mx_check,
                ns_check: config.ns_check,
                http_port: config.http_port,
                smtp_port: config.smtp_port,
                user_agent: config.user_agent,
                timeout: config.timeout,
            }),
            threads: config.threads,
            progress: config.progress,
        })
    }

    /// Check if GeoIP lookups are active.
    pub fn has_geoip(&self) -> bool {
        self.enricher.geoip.is_some()
    }

    /// Enrich a batch of candidates.
    ///
    /// The result has the same length and order as the input, whatever
    /// order the tasks finish in.
    pub async fn scan(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let start = Instant::now();
        let total = candidates.len();
        let progress = self.progress_bar(total);
        let semaphore = Arc::new(Semaphore::new(self.threads));

        let mut handles = Vec::with_capacity(total);
        let mut fallbacks = Vec::with_capacity(total);

        for candidate in candidates {
            // Blocks until a running task releases its slot
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .expect("scan semaphore is never closed");

            let enricher = Arc::clone(&self.enricher);
            let progress = progress.clone();
            fallbacks.push(candidate.clone());

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                let enriched = enricher.enrich(candidate).await;
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                enriched
            }));
        }

        let results: Vec<Candidate> = join_all(handles)
            .await
            .into_iter()
            .zip(fallbacks)
            .map(|(joined, fallback)| {
                joined.unwrap_or_else(|e| {
                    warn!(domain = %fallback.domain, error = %e, "enrichment task failed");
                    fallback
                })
            })
            .collect();

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let resolved = results.iter().filter(|c| !c.dns.is_empty()).count();
        info!(
            total,
            resolved,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "scan complete"
        );

        results
    }

    fn progress_bar(&self, total: usize) -> Option<ProgressBar> {
        if !self.progress {
            return None;
        }
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        Some(pb)
    }
}
