use super::backend::{StorageBackend, StorageKey};
use crate::error::{BlogError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<StorageKey, String>>,
    unavailable: bool,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend with no storage behind it, like a browser without
    /// local storage.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to store an arbitrary raw value, e.g. corrupt JSON.
    pub fn set_raw(&self, key: StorageKey, value: &str) {
        self.items.borrow_mut().insert(key, value.to_string());
    }

    /// Test helper to inspect the raw stored value.
    pub fn raw(&self, key: StorageKey) -> Option<String> {
        self.items.borrow().get(&key).cloned()
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(BlogError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn is_available(&self) -> bool {
        !self.unavailable
    }

    fn get_item(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.items.borrow().get(&key).cloned())
    }

    fn set_item(&self, key: StorageKey, value: &str) -> Result<()> {
        self.check_writable()?;
        self.items.borrow_mut().insert(key, value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: StorageKey) -> Result<()> {
        self.check_writable()?;
        self.items.borrow_mut().remove(&key);
        Ok(())
    }
}
