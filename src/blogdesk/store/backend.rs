use crate::error::Result;
use std::fmt;

/// The fixed logical keys of the persisted layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Posts,
    Categories,
    Themes,
    ActiveTheme,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Posts,
        StorageKey::Categories,
        StorageKey::Themes,
        StorageKey::ActiveTheme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Posts => "blog-manager-posts",
            StorageKey::Categories => "blog-manager-categories",
            StorageKey::Themes => "blog-manager-themes",
            StorageKey::ActiveTheme => "blog-manager-active-theme",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract interface for raw key-value storage.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// `BlogStore` handles the "what" (collections, cascades, the active theme).
/// All methods take `&self`: the store is single-threaded and backends use
/// interior mutability where they need it.
pub trait StorageBackend {
    /// Whether a backing store exists at all. When this is false, reads
    /// behave as empty and writes are skipped.
    fn is_available(&self) -> bool;

    /// Read the raw value under `key`.
    /// Returns Ok(None) when the key has never been written.
    fn get_item(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replace the value under `key`. Must be atomic from the caller's
    /// point of view.
    fn set_item(&self, key: StorageKey, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: StorageKey) -> Result<()>;
}
