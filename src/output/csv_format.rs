//! CSV output formatting.

use super::shown_records;
use crate::types::Candidate;
use std::io;

/// Column names, in order.
pub const CSV_HEADER: [&str; 5] = ["fuzzer", "domain", "a_records", "mx_records", "ns_records"];

/// Render candidates as CSV with one row per candidate.
///
/// With `all_records`, multiple records of one kind are joined with `;`;
/// otherwise only the first is written.
pub fn to_csv(candidates: &[Candidate], all_records: bool) -> io::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;

    for c in candidates {
        wtr.write_record([
            c.fuzzer.as_str(),
            c.domain.as_str(),
            &shown_records(c.a_records(), all_records).join(";"),
            &shown_records(c.mx_records(), all_records).join(";"),
            &shown_records(c.ns_records(), all_records).join(";"),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordKind;

    #[test]
    fn test_csv_rows() {
        let mut resolved = Candidate::new("original", "example.com", "");
        resolved
            .dns
            .insert(RecordKind::A, vec!["192.0.2.1".to_string(), "192.0.2.2".to_string()]);
        resolved.dns.insert(RecordKind::Mx, vec!["mx.example.com".to_string()]);
        let unresolved = Candidate::new("omission", "exmple.com", "");

        let candidates = [resolved, unresolved];
        let csv = to_csv(&candidates, true).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "fuzzer,domain,a_records,mx_records,ns_records");
        assert_eq!(lines[1], "original,example.com,192.0.2.1;192.0.2.2,mx.example.com,");
        assert_eq!(lines[2], "omission,exmple.com,,,");
        assert_eq!(lines.len(), 3);

        let csv = to_csv(&candidates, false).unwrap();
        assert_eq!(
            csv.lines().nth(1),
            Some("original,example.com,192.0.2.1,mx.example.com,")
        );
    }

    #[test]
    fn test_csv_header_only() {
        assert_eq!(to_csv(&[], false).unwrap(), "fuzzer,domain,a_records,mx_records,ns_records\n");
    }
}
