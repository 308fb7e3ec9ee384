//! DNS query and record-set types.
//!
//! A [`RecordSet`] is the raw text of the answers to a [`DnsQuery`]. An empty
//! set is a valid answer meaning the record does not exist.

use std::fmt;

/// Record types the audit queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Txt,
    Mx,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordType::Txt => "TXT",
            RecordType::Mx => "MX",
        })
    }
}

/// A single DNS question: a name and the record type wanted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuery {
    name: String,
    record_type: RecordType,
}

impl DnsQuery {
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }

    pub fn txt(name: impl Into<String>) -> Self {
        Self::new(name, RecordType::Txt)
    }

    pub fn mx(name: impl Into<String>) -> Self {
        Self::new(name, RecordType::Mx)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }
}

impl fmt::Display for DnsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.record_type)
    }
}

/// Ordered raw answers to a query.
///
/// TXT answers hold the concatenated character-strings of one record.
/// MX answers are rendered as `"<preference> <exchange>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<String>,
}

impl RecordSet {
    pub fn new(records: Vec<String>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.records.first().map(String::as_str)
    }

    /// Records whose text contains `marker`, compared case-insensitively.
    pub fn containing(&self, marker: &str) -> RecordSet {
        let marker = marker.to_lowercase();
        RecordSet::new(
            self.records
                .iter()
                .filter(|r| r.to_lowercase().contains(&marker))
                .cloned()
                .collect(),
        )
    }

    /// Concatenates all records into one string.
    pub fn joined(&self) -> String {
        self.records.concat()
    }

    /// Exchange hosts of an MX answer, lowest preference first.
    ///
    /// The trailing root dot is removed. Entries that do not look like
    /// `"<preference> <exchange>"` are skipped.
    pub fn mx_hosts(&self) -> Vec<String> {
        let mut exchanges: Vec<(u16, String)> = self
            .records
            .iter()
            .filter_map(|record| {
                let (preference, exchange) = record.trim().split_once(char::is_whitespace)?;
                let preference = preference.parse::<u16>().ok()?;
                let host = exchange.trim().trim_end_matches('.');
                if host.is_empty() {
                    None
                } else {
                    Some((preference, host.to_string()))
                }
            })
            .collect();
        exchanges.sort_by_key(|(preference, _)| *preference);
        exchanges.into_iter().map(|(_, host)| host).collect()
    }
}

impl From<Vec<String>> for RecordSet {
    fn from(records: Vec<String>) -> Self {
        Self::new(records)
    }
}

impl From<Vec<&str>> for RecordSet {
    fn from(records: Vec<&str>) -> Self {
        Self::new(records.into_iter().map(str::to_string).collect())
    }
}

/// Formats an MX answer the way [`RecordSet::mx_hosts`] reads it back.
pub fn format_mx(preference: u16, exchange: &str) -> String {
    format!("{preference} {exchange}")
}
