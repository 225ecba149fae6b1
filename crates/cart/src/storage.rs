//! Persistent key-value seam the cart serializes into.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// String key-value storage, shaped like a browser's local store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) {
        (**self).set(key, value)
    }
}

/// In-memory key-value store for dev/test.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("missing"), None);

        store.set("cart", "[]".to_string());
        assert_eq!(store.get("cart"), Some("[]".to_string()));

        store.set("cart", "[1]".to_string());
        assert_eq!(store.get("cart"), Some("[1]".to_string()));
    }
}
