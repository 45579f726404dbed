//! Ordered bar/timestamp → text mapping and its JSON form

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;

/// Composite key of a [`BarMapping`] entry
///
/// Two keys are equal only when both the bar and the exact timestamp match.
/// `-0.0` is folded into `0.0` so they do not form distinct keys.
#[derive(Debug, Clone, Copy)]
pub struct BarKey {
    /// 1-indexed bar; 0 or negative for lead-in lines
    pub bar: i64,

    /// Timestamp of the line in seconds
    pub timestamp: f64,
}

impl BarKey {
    /// Create a key
    pub fn new(bar: i64, timestamp: f64) -> Self {
        Self {
            bar,
            timestamp: timestamp + 0.0,
        }
    }

    fn identity(&self) -> (i64, u64) {
        (self.bar, self.timestamp.to_bits())
    }
}

impl PartialEq for BarKey {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for BarKey {}

impl Hash for BarKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// JSON key form: `<bar>-<timestamp>`
///
/// The timestamp uses the shortest decimal that round-trips, so distinct
/// keys always print differently (`1-0`, `1-1.9`, `0--1`).
impl fmt::Display for BarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.bar, self.timestamp)
    }
}

/// Lyric text keyed by bar and timestamp, in insertion order
///
/// Inserting an existing key replaces its text in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarMapping {
    entries: Vec<(BarKey, String)>,
    index: HashMap<BarKey, usize>,
}

impl BarMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `text` under `key`, returning the text it replaced
    pub fn insert(&mut self, key: BarKey, text: impl Into<String>) -> Option<String> {
        let text = text.into();
        if let Some(&slot) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[slot].1, text));
        }
        self.index.insert(key, self.entries.len());
        self.entries.push((key, text));
        None
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the mapping has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Text stored for `bar` at `timestamp`
    pub fn get(&self, bar: i64, timestamp: f64) -> Option<&str> {
        self.index
            .get(&BarKey::new(bar, timestamp))
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&BarKey, &str)> {
        self.entries.iter().map(|(key, text)| (key, text.as_str()))
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &BarKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Pretty-printed JSON object, entries in mapping order
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pretty JSON form to `path`, replacing any existing file
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_pretty()?)?;
        tracing::debug!(path = %path.display(), entries = self.len(), "Wrote bar mapping");
        Ok(())
    }
}

impl Serialize for BarMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, text) in &self.entries {
            map.serialize_entry(&key.to_string(), text)?;
        }
        map.end()
    }
}
