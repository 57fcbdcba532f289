//! Session-scoped string storage
//!
//! The cache writes fresh entries through to a [`SessionStorage`] so a new
//! cache instance in the same session (a reloaded page, a restarted view)
//! can hydrate without refetching. Hosts back it with whatever their platform
//! offers; [`MemoryStorage`] keeps items in process.

use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashMap;

/// Minimal key/value string storage
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: String);
    fn remove_item(&self, key: &str);
    /// All keys currently stored
    fn keys(&self) -> Vec<String>;
}

/// In-process storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: String) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn remove_item(&self, key: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_basic() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.set_item("a", "1".into());
        storage.set_item("b", "2".into());
        assert_eq!(storage.get_item("a").as_deref(), Some("1"));
        assert_eq!(storage.len(), 2);

        storage.set_item("a", "3".into());
        assert_eq!(storage.get_item("a").as_deref(), Some("3"));

        storage.remove_item("a");
        assert_eq!(storage.get_item("a"), None);
        assert_eq!(storage.keys(), vec!["b".to_string()]);
    }
}
