//! Core type definitions shared by the fuzzer, scanner and formatters.

mod candidate;
mod domain;

pub use candidate::{
    contains_cyrillic, BannerKind, Candidate, RecordKind, RegisteredBy, ORIGINAL,
};
pub use domain::DomainParts;
