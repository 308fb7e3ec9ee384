//! Error handling and diagnostics.
//!
//! This module provides:
//! - Error type definitions for DNS resolution, network probes and key parsing
//! - The per-audit diagnostics sink for non-fatal notices
//!
//! Failures are categorized into:
//! - **Errors**: typed results returned by the resolution layer and the probes
//! - **Diagnostics**: notices that never become findings (timeouts, absent records)

mod diagnostics;
mod types;

// Re-export public API
pub use diagnostics::{Diagnostic, Diagnostics};
pub use types::{InitializationError, KeyError, ProbeError, ResolutionError};
