//! # Storage Layer
//!
//! Blog data lives in three independent collections (posts, categories,
//! themes) plus one scalar, the cached active theme id. Each is stored as a
//! single serialized value under a fixed key.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw key-value I/O. Knows nothing about blogs.
//!   - [`fs_backend::FsBackend`]: production, one JSON file per key.
//!   - [`mem_backend::MemBackend`]: testing, a `RefCell`'d map.
//! - [`blog_store::BlogStore`]: the rules. Upsert by id, the category cascade,
//!   single active theme, seeding.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── blog-manager-posts.json         # [Post]
//! ├── blog-manager-categories.json    # [Category]
//! ├── blog-manager-themes.json        # [Theme]
//! ├── blog-manager-active-theme.json  # bare theme id
//! └── config.json                     # BlogConfig
//! ```
//!
//! ## Failure Policy
//!
//! Reads never fail: a missing backend, an unreadable key or a value that
//! does not parse all read as an empty collection. Writes always report
//! failure to the caller, labelled with the operation that failed.
//!
//! Every write is read-modify-write of the whole collection. There is a
//! single writer, so no locking is needed.

use crate::model::{Category, Post, Theme};
use backend::StorageKey;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod backend;
pub mod blog_store;
pub mod fs_backend;
pub mod mem_backend;

pub use blog_store::BlogStore;

/// A record kind stored as one collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Key of the collection holding records of this kind.
    const KEY: StorageKey;
    /// Name used in user-facing messages ("Failed to save blog").
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

impl Record for Post {
    const KEY: StorageKey = StorageKey::Posts;
    const LABEL: &'static str = "blog";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Category {
    const KEY: StorageKey = StorageKey::Categories;
    const LABEL: &'static str = "category";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Theme {
    const KEY: StorageKey = StorageKey::Themes;
    const LABEL: &'static str = "theme";

    fn id(&self) -> &str {
        &self.id
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::mem_backend::MemBackend;
    use super::BlogStore;
    use crate::model::{Category, Post, Theme, ThemeColors};

    pub struct StoreFixture {
        pub store: BlogStore<MemBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: BlogStore::new(MemBackend::new()),
            }
        }

        /// Seeded the same way a fresh install is.
        pub fn initialized() -> Self {
            let mut fixture = Self::new();
            fixture.store.initialize().unwrap();
            fixture
        }

        pub fn with_post(mut self, id: &str, title: &str, categories: &[&str]) -> Self {
            let mut post = Post::new(title.to_string(), format!("Content of {}", title));
            post.id = id.to_string();
            post.categories = categories.iter().map(|c| c.to_string()).collect();
            self.store.save_post(post).unwrap();
            self
        }

        pub fn with_category(mut self, id: &str, name: &str) -> Self {
            let mut category = Category::new(name.to_string(), None);
            category.id = id.to_string();
            self.store.save_category(category).unwrap();
            self
        }

        pub fn with_theme(mut self, id: &str, name: &str, active: bool) -> Self {
            self.store.save_theme(theme(id, name, active)).unwrap();
            self
        }
    }

    pub fn theme(id: &str, name: &str, active: bool) -> Theme {
        let mut theme = Theme::new(
            name.to_string(),
            ThemeColors {
                primary: "#111111".to_string(),
                secondary: "#222222".to_string(),
                text: "#333333".to_string(),
                background: "#ffffff".to_string(),
            },
            "serif".to_string(),
        );
        theme.id = id.to_string();
        theme.is_active = active;
        theme
    }
}
