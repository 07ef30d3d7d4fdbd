//! Configuration management for squatscan.
//!
//! Settings live in an XDG-compliant configuration directory and provide
//! defaults that command-line flags override.

mod settings;

pub use settings::{AppSettings, Paths};
