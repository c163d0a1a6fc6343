//! In-memory admin session storage.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;
use subsites_sdk::SessionStore;

/// Process-local [`SessionStore`] backed by a map.
///
/// Suitable for tests and single-process deployments; a real host plugs in
/// its own session backend.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    values: Mutex<HashMap<String, Value>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.lock().contains_key(key)
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.values.lock().insert(key.to_owned(), value);
    }

    fn clear(&self, key: &str) {
        self.values.lock().remove(key);
    }
}
