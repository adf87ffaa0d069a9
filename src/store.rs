//! Key-value store backing content and configuration items

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{StoreKind, ViewError};

/// Named values passed in and out of a view in bulk
pub type Bindings = BTreeMap<String, Value>;

/// A mapping from string keys to arbitrary values
#[derive(Debug, Clone)]
pub struct Store {
    kind: StoreKind,
    entries: Bindings,
}

impl Store {
    /// Create an empty store
    pub fn new(kind: StoreKind) -> Self {
        Self {
            kind,
            entries: Bindings::new(),
        }
    }

    /// Get a value, failing if the key was never set
    pub fn get(&self, key: &str) -> Result<&Value, ViewError> {
        self.entries
            .get(key)
            .ok_or_else(|| ViewError::key_not_found(self.kind, key))
    }

    /// Get a value if present
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get several values by key. An empty key list returns every entry.
    pub fn get_many<K: AsRef<str>>(&self, keys: &[K]) -> Result<Bindings, ViewError> {
        if keys.is_empty() {
            return Ok(self.entries.clone());
        }

        keys.iter()
            .map(|key| {
                let key = key.as_ref();
                self.get(key).map(|value| (key.to_string(), value.clone()))
            })
            .collect()
    }

    /// Set a value, replacing any previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merge a mapping into the store
    pub fn set_many(&mut self, entries: impl IntoIterator<Item = (String, Value)>) {
        self.entries.extend(entries);
    }

    /// Remove a value. Removing an absent key is a no-op.
    pub fn unset(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Remove several values
    pub fn unset_many<K: AsRef<str>>(&mut self, keys: &[K]) {
        for key in keys {
            self.unset(key.as_ref());
        }
    }

    /// True if the key exists, even when its value is null
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_set_then_get() {
        let mut store = Store::new(StoreKind::Content);
        store.set("title", "Home");
        assert_eq!(store.get("title"), Ok(&json!("Home")));
    }

    #[test]
    fn test_get_missing_key() {
        let store = Store::new(StoreKind::Config);
        assert_eq!(
            store.get("views_path"),
            Err(ViewError::key_not_found(StoreKind::Config, "views_path"))
        );
    }

    #[test]
    fn test_has_distinguishes_null_from_absent() {
        let mut store = Store::new(StoreKind::Content);
        store.set("sidebar", Value::Null);
        assert!(store.has("sidebar"));
        assert!(!store.has("footer"));

        store.unset("sidebar");
        assert!(!store.has("sidebar"));
    }

    #[test]
    fn test_get_many_empty_returns_all() {
        let mut store = Store::new(StoreKind::Content);
        store.set("a", 1);
        store.set("b", 2);
        let all = store.get_many::<&str>(&[]).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_get_many_selected() {
        let mut store = Store::new(StoreKind::Content);
        store.set("a", 1);
        store.set("b", 2);
        store.set("c", 3);
        let picked = store.get_many(&["a", "c"]).unwrap();
        assert_eq!(picked.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_get_many_fails_on_missing() {
        let mut store = Store::new(StoreKind::Content);
        store.set("a", 1);
        assert!(matches!(
            store.get_many(&["a", "missing"]),
            Err(ViewError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_set_many_merges() {
        let mut store = Store::new(StoreKind::Content);
        store.set("a", 1);
        store.set_many([("a".to_string(), json!(10)), ("b".to_string(), json!(2))]);
        assert_eq!(store.get("a"), Ok(&json!(10)));
        assert_eq!(store.get("b"), Ok(&json!(2)));
    }

    #[test]
    fn test_unset_many() {
        let mut store = Store::new(StoreKind::Content);
        store.set("a", 1);
        store.set("b", 2);
        store.set("c", 3);
        store.unset_many(&["a", "b", "never-set"]);
        assert_eq!(store.len(), 1);
        assert!(store.has("c"));
    }
}
