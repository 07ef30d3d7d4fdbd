//! JSON output formatting.

use crate::types::Candidate;
use tracing::warn;

/// Render candidates as a pretty-printed JSON array.
///
/// Serialization failures are logged and yield an empty string.
pub fn to_json(candidates: &[Candidate]) -> String {
    serde_json::to_string_pretty(candidates).unwrap_or_else(|e| {
        warn!(error = %e, "failed to serialize results");
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BannerKind, RecordKind};

    #[test]
    fn test_json_shape() {
        let mut c = Candidate::new("original", "example.com", "");
        c.dns.insert(RecordKind::A, vec!["93.184.215.14".to_string()]);
        c.geoip = Some("United States".to_string());
        c.banner.insert(BannerKind::Http, "nginx".to_string());

        let value: serde_json::Value = serde_json::from_str(&to_json(&[c])).unwrap();
        let first = &value[0];
        assert_eq!(first["fuzzer"], "original");
        assert_eq!(first["domain"], "example.com");
        assert_eq!(first["dns"]["A"][0], "93.184.215.14");
        assert_eq!(first["geoip"], "United States");
        assert_eq!(first["banner"]["http"], "nginx");
    }

    #[test]
    fn test_json_empty_list() {
        assert_eq!(to_json(&[]), "[]");
    }
}
