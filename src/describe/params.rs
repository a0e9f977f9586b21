//! Ordered string maps for header and query snapshots.
//!
//! The hosting layer decides how duplicates collapse: headers keep the first
//! value seen, query parameters keep the last. Either way a key stays at the
//! position of its first occurrence.

use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::{map::Entry, Map, Value};

/// An insertion-ordered map of unique string keys.
///
/// Backed by `serde_json::Map` with `preserve_order`, so lookups and inserts
/// are hashed while iteration keeps first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParamMap {
    entries: Map<String, Value>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot request headers: lower-case names, first value wins,
    /// values decoded as Latin-1.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut map = Self::new();
        for (name, value) in headers.iter() {
            let value = value.as_bytes().iter().map(|&b| char::from(b)).collect();
            map.insert_first_wins(name.as_str().to_string(), value);
        }
        map
    }

    /// Snapshot a raw query string: form-urlencoded decoding, blank values
    /// kept, last value wins.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut map = Self::new();
        if let Some(query) = query {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                map.insert_last_wins(key.into_owned(), value.into_owned());
            }
        }
        map
    }

    /// Insert unless the key is already present.
    pub fn insert_first_wins(&mut self, key: String, value: String) {
        if let Entry::Vacant(entry) = self.entries.entry(key) {
            entry.insert(Value::String(value));
        }
    }

    /// Insert, replacing the value of an existing key in place.
    pub fn insert_last_wins(&mut self, key: String, value: String) {
        self.entries.insert(key, Value::String(value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str().unwrap_or_default()))
    }
}
