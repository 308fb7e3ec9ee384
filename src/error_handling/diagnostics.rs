//! Per-audit diagnostics sink.
//!
//! Non-fatal notices (DNS timeouts, records confirmed absent, checks that
//! could not run) are collected here so the caller can show them next to the
//! findings. Each notice is also forwarded to the `log` facade.

use std::sync::{Arc, Mutex, MutexGuard};

use log::Level;

/// One non-fatal notice raised during an audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the notice
    pub level: Level,
    /// Component that raised it (also used as the log target)
    pub source: &'static str,
    /// Human-readable message
    pub message: String,
}

/// Thread-safe collector of [`Diagnostic`]s.
///
/// Cloning is cheap and clones share the same storage, so one instance is
/// created per audit and handed to every component.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, source: &'static str, message: impl Into<String>) {
        self.record(Level::Info, source, message.into());
    }

    pub fn warn(&self, source: &'static str, message: impl Into<String>) {
        self.record(Level::Warn, source, message.into());
    }

    pub fn error(&self, source: &'static str, message: impl Into<String>) {
        self.record(Level::Error, source, message.into());
    }

    /// Snapshot of everything recorded so far, in order.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Entries at `level` or more severe.
    pub fn at_least(&self, level: Level) -> Vec<Diagnostic> {
        self.lock()
            .iter()
            .filter(|d| d.level <= level)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn record(&self, level: Level, source: &'static str, message: String) {
        log::log!(target: source, level, "{message}");
        self.lock().push(Diagnostic {
            level,
            source,
            message,
        });
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A poisoned lock only means another task panicked mid-push; the
        // vector itself is still usable.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_preserve_order() {
        let diagnostics = Diagnostics::new();
        diagnostics.info("dns", "first");
        diagnostics.warn("host", "second");
        diagnostics.error("dns", "third");

        let entries = diagnostics.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].level, Level::Warn);
        assert_eq!(entries[2].source, "dns");
    }

    #[test]
    fn test_clones_share_storage() {
        let diagnostics = Diagnostics::new();
        let clone = diagnostics.clone();
        clone.warn("dns", "timeout");
        assert!(!diagnostics.is_empty());
        assert_eq!(diagnostics.entries()[0].message, "timeout");
    }

    #[test]
    fn test_at_least_filters_by_severity() {
        let diagnostics = Diagnostics::new();
        diagnostics.info("dns", "absent");
        diagnostics.warn("dns", "timeout");
        diagnostics.error("dns", "failure");

        let warnings = diagnostics.at_least(Level::Warn);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|d| d.level != Level::Info));
    }
}
