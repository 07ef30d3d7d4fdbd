//! Country lookups from a MaxMind GeoLite2/GeoIP2 Country database.

use crate::error::{ScanError, ScanResult};
use maxminddb::{geoip2, Reader};
use std::net::IpAddr;
use std::path::Path;

/// Database file looked for when none is configured.
pub const DEFAULT_GEOIP_DATABASE: &str = "GeoLite2-Country.mmdb";

/// Read-only GeoIP country database, safe to share between tasks.
pub struct GeoIp {
    reader: Reader<Vec<u8>>,
}

impl GeoIp {
    /// Open a database file.
    pub fn open(path: &Path) -> ScanResult<Self> {
        let reader = Reader::open_readfile(path)
            .map_err(|e| ScanError::GeoIp(format!("{}: {}", path.display(), e)))?;
        Ok(Self { reader })
    }

    /// English country name for an address, if known.
    pub fn country(&self, ip: IpAddr) -> Option<String> {
        let record: geoip2::Country = self.reader.lookup(ip).ok()?;
        let names = record.country?.names?;
        names.get("en").map(|name| name.to_string())
    }
}
