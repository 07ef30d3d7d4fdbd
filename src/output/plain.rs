//! Plain text output formatting.
//!
//! The cli table lines up fuzzer and domain columns and follows them with
//! whatever was learned about each candidate.

use super::shown_records;
use crate::types::{BannerKind, Candidate};
use console::style;
use std::fmt::Write;

/// One domain per line.
pub fn to_list(candidates: &[Candidate]) -> String {
    let mut out = String::new();
    for c in candidates {
        out.push_str(&c.domain);
        out.push('\n');
    }
    out
}

/// Aligned table of fuzzer, domain and findings.
///
/// With `styled` set, columns are coloured with `console`; colours are still
/// subject to `console`'s terminal detection. Only the first record of each
/// kind is shown unless `all_records` is set.
pub fn to_cli(candidates: &[Candidate], styled: bool, all_records: bool) -> String {
    let fuzzer_width = candidates
        .iter()
        .map(|c| c.fuzzer.chars().count())
        .max()
        .unwrap_or(0);
    let domain_width = candidates
        .iter()
        .map(|c| c.domain.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for c in candidates {
        let fuzzer = format!("{:<width$}", c.fuzzer, width = fuzzer_width + 1);
        let domain = format!("{:<width$}", c.domain, width = domain_width + 1);
        let info = findings(c, all_records);

        if styled {
            let info = if info.is_empty() {
                style("-".to_string()).dim()
            } else {
                style(info.join(" ")).green()
            };
            let _ = writeln!(out, "{} {}{}", style(fuzzer).cyan(), style(domain).bold(), info);
        } else {
            let info = if info.is_empty() { "-".to_string() } else { info.join(" ") };
            let _ = writeln!(out, "{} {}{}", fuzzer, domain, info);
        }
    }
    out
}

/// Findings shown after the domain, in a fixed order.
fn findings(c: &Candidate, all_records: bool) -> Vec<String> {
    let mut info = Vec::new();
    if c.has_a_records() {
        info.push(shown_records(c.a_records(), all_records).join(";"));
    }
    if c.has_mx_records() {
        info.push(format!("MX:{}", shown_records(c.mx_records(), all_records).join(";")));
    }
    if c.has_ns_records() {
        info.push(format!("NS:{}", shown_records(c.ns_records(), all_records).join(";")));
    }
    if let Some(country) = c.geoip.as_deref().filter(|g| !g.is_empty()) {
        info.push(format!("/{}", country));
    }
    if let Some(banner) = c.banner(BannerKind::Http).filter(|b| !b.is_empty()) {
        info.push(format!("HTTP:{}", banner));
    }
    if let Some(banner) = c.banner(BannerKind::Smtp).filter(|b| !b.is_empty()) {
        info.push(format!("SMTP:{}", banner));
    }
    info
}

/// Print an info message to stderr.
pub fn print_info(msg: &str) {
    eprintln!("{} {}", style("ℹ").blue().bold(), msg);
}
