//! Flat key/value metadata attached to annotated errors.
//!
//! Metadata is backend-only debugging context (ids, inputs, counters). It is
//! flat, so layers of a chain can shadow each other's keys; see
//! [`Meta::merge_under`] for the rule used when a chain is echoed.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::consts::{KV_NOT_EVEN_KEY, KV_NOT_EVEN_VALUE};

/// Ordered string-to-string map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta(BTreeMap<String, String>);

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single pair, overwriting any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert alternating key/value arguments.
    ///
    /// An odd-length slice is a caller mistake. Nothing from it is stored;
    /// instead the `kvNotEven` marker is recorded and a diagnostic is logged.
    pub fn extend_pairs(&mut self, kvs: &[&str]) {
        if kvs.len() % 2 != 0 {
            error!("Number of KVs not even ({} arguments)", kvs.len());
            self.insert(KV_NOT_EVEN_KEY, KV_NOT_EVEN_VALUE);
            return;
        }
        for pair in kvs.chunks_exact(2) {
            self.insert(pair[0], pair[1]);
        }
    }

    /// Merge `inner` into `self`, keeping existing keys.
    ///
    /// The chain walker visits links outermost first, so existing keys
    /// belong to outer layers and win over the inner layer's values.
    pub fn merge_under(&mut self, inner: &Meta) {
        for (k, v) in &inner.0 {
            self.0.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Meta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_pairs_are_stored() {
        let mut meta = Meta::new();
        meta.extend_pairs(&["user", "42", "op", "save"]);
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.get("user"), Some("42"));
        assert_eq!(meta.get("op"), Some("save"));
    }

    #[test]
    fn later_pairs_overwrite() {
        let mut meta = Meta::new();
        meta.extend_pairs(&["k", "first"]);
        meta.extend_pairs(&["k", "second"]);
        assert_eq!(meta.get("k"), Some("second"));
    }

    #[test]
    fn odd_pairs_record_marker() {
        let mut meta = Meta::new();
        meta.extend_pairs(&["lonely"]);
        assert_eq!(meta.get(KV_NOT_EVEN_KEY), Some(KV_NOT_EVEN_VALUE));
        assert!(!meta.contains_key("lonely"));
    }

    #[test]
    fn empty_pairs_are_noop() {
        let mut meta = Meta::new();
        meta.extend_pairs(&[]);
        assert!(meta.is_empty());
    }

    #[test]
    fn merge_under_keeps_outer_values() {
        let mut outer: Meta = [("shared", "outer"), ("a", "1")].into_iter().collect();
        let inner: Meta = [("shared", "inner"), ("b", "2")].into_iter().collect();
        outer.merge_under(&inner);
        assert_eq!(outer.get("shared"), Some("outer"));
        assert_eq!(outer.get("a"), Some("1"));
        assert_eq!(outer.get("b"), Some("2"));
    }

    #[test]
    fn display_lists_pairs_in_key_order() {
        let meta: Meta = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(meta.to_string(), "{a: 1, b: 2}");
    }
}
