//! `key=value; key=value` tag lists as used by DMARC and DKIM records.

use std::collections::HashMap;

/// Tags of a semicolon-delimited record, keyed by lowercase name.
///
/// The record is case-folded before parsing, so values are lowercase too.
/// Later duplicates replace earlier ones. Segments without `=` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    tags: HashMap<String, String>,
}

impl TagMap {
    pub fn parse(record: &str) -> Self {
        let tags = record
            .to_lowercase()
            .split(';')
            .filter_map(|segment| {
                let (key, value) = segment.trim().split_once('=')?;
                Some((key.trim().to_string(), value.trim().to_string()))
            })
            .collect();
        Self { tags }
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.tags.get(tag).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
