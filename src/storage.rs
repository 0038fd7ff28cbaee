//! Key-value persistence seam
//!
//! The engine reads and writes small strings (high score, config) through
//! this trait. On wasm the backing store is LocalStorage; everywhere else an
//! in-memory map gives tests and the headless demo the same semantics.

use std::collections::HashMap;

/// Minimal string store. Writes are best-effort: a lost save is not fatal.
pub trait KeyValueStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any prior value
    fn set(&mut self, key: &str, value: &str);
}

/// HashMap-backed store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage (WASM only). Blocked or absent storage reads empty
/// and drops writes.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backing() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::backing().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = Self::backing() {
            let _ = storage.set_item(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);

        store.set("best", "120");
        assert_eq!(store.get("best"), Some("120".to_string()));

        store.set("best", "300");
        assert_eq!(store.get("best"), Some("300".to_string()));
    }
}
