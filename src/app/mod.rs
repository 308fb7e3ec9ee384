//! Console output for the command-line binary.
//!
//! This module renders an [`AuditReport`](crate::AuditReport) as colored text:
//! one table per analyzer, followed by header status and diagnostics when
//! detailed output is requested.

pub mod output;

// Re-export public API
pub use output::{render_report, render_saved};
