//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (DNS servers, timeouts, ports, rule thresholds)
//! - Resolver settings presets
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt, OutputFormat, ResolverSettings};
