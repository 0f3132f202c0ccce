use super::backend::{StorageBackend, StorageKey};
use super::Record;
use crate::config::DEFAULT_EXCERPT_LENGTH;
use crate::error::{BlogError, Result};
use crate::model::{Category, Post, Theme};
use crate::seed;
use chrono::Utc;
use tracing::{debug, info, warn};

/// The blog persistence store.
///
/// Generic over the backend so the same rules run against files in
/// production and an in-memory map in tests.
pub struct BlogStore<B: StorageBackend> {
    backend: B,
    excerpt_length: usize,
}

impl<B: StorageBackend> BlogStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        }
    }

    pub fn with_excerpt_length(mut self, length: usize) -> Self {
        self.excerpt_length = length;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Closes the store, handing the backend back to the caller.
    pub fn into_backend(self) -> B {
        self.backend
    }

    // --- Generic reads ---

    /// All records of one kind, in storage order.
    pub fn all<R: Record>(&self) -> Vec<R> {
        if !self.backend.is_available() {
            return Vec::new();
        }

        let raw = match self.backend.get_item(R::KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %R::KEY, error = %e, "failed to read collection");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(key = %R::KEY, error = %e, "stored collection is corrupt, reading as empty");
                Vec::new()
            }
        }
    }

    pub fn by_id<R: Record>(&self, id: &str) -> Option<R> {
        self.all::<R>().into_iter().find(|r| r.id() == id)
    }

    pub fn all_posts(&self) -> Vec<Post> {
        self.all()
    }

    pub fn post(&self, id: &str) -> Option<Post> {
        self.by_id(id)
    }

    pub fn all_categories(&self) -> Vec<Category> {
        self.all()
    }

    pub fn category(&self, id: &str) -> Option<Category> {
        self.by_id(id)
    }

    pub fn all_themes(&self) -> Vec<Theme> {
        self.all()
    }

    pub fn theme(&self, id: &str) -> Option<Theme> {
        self.by_id(id)
    }

    /// The cached active theme id, if one is stored.
    pub fn active_theme_id(&self) -> Option<String> {
        if !self.backend.is_available() {
            return None;
        }
        match self.backend.get_item(StorageKey::ActiveTheme) {
            Ok(Some(id)) => {
                let id = id.trim();
                (!id.is_empty()).then(|| id.to_string())
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to read active theme id");
                None
            }
        }
    }

    /// Resolves the theme to render with.
    ///
    /// The cached id wins if it still names a stored theme. Otherwise the
    /// first theme flagged active, otherwise the first theme. The cache and
    /// the flags can disagree; this never fails because of it.
    pub fn active_theme(&self) -> Option<Theme> {
        let themes = self.all_themes();

        if let Some(cached) = self.active_theme_id() {
            if let Some(theme) = themes.iter().find(|t| t.id == cached) {
                return Some(theme.clone());
            }
            debug!(id = %cached, "cached active theme id is stale");
        }

        themes
            .iter()
            .find(|t| t.is_active)
            .cloned()
            .or_else(|| themes.into_iter().next())
    }

    // --- Writes ---

    /// Inserts or replaces a post, returning the record as stored.
    pub fn save_post(&mut self, mut post: Post) -> Result<Post> {
        if post.published_at.is_none() {
            post.published_at = Some(post.created_at);
        }
        if post.excerpt.trim().is_empty() {
            post.excerpt = excerpt_from(&post.content, self.excerpt_length);
        }

        self.upsert(post.clone())
            .map_err(|e| BlogError::write_failed("save", Post::LABEL, e))?;
        Ok(post)
    }

    pub fn save_category(&mut self, category: Category) -> Result<Category> {
        self.upsert(category.clone())
            .map_err(|e| BlogError::write_failed("save", Category::LABEL, e))?;
        Ok(category)
    }

    /// Inserts or replaces a theme. Saving an active theme deactivates every
    /// other theme and caches its id.
    pub fn save_theme(&mut self, theme: Theme) -> Result<Theme> {
        self.try_save_theme(&theme)
            .map_err(|e| BlogError::write_failed("save", Theme::LABEL, e))?;
        Ok(theme)
    }

    pub fn delete_post(&mut self, id: &str) -> Result<Option<Post>> {
        self.remove::<Post>(id)
            .map_err(|e| BlogError::write_failed("delete", Post::LABEL, e))
    }

    /// Removes a category and strips its id from every post referencing it.
    /// Posts themselves are never deleted.
    pub fn delete_category(&mut self, id: &str) -> Result<Option<Category>> {
        self.try_delete_category(id)
            .map_err(|e| BlogError::write_failed("delete", Category::LABEL, e))
    }

    /// Removes a theme. The active theme cannot be deleted, and deleting the
    /// last theme re-seeds the defaults.
    pub fn delete_theme(&mut self, id: &str) -> Result<Option<Theme>> {
        if !self.backend.is_available() {
            return Ok(None);
        }

        let themes = self.all_themes();
        if themes.iter().any(|t| t.id == id && t.is_active) {
            return Err(BlogError::ActiveThemeDeletion);
        }

        self.try_delete_theme(themes, id)
            .map_err(|e| BlogError::write_failed("delete", Theme::LABEL, e))
    }

    /// Seeds whatever is missing. Keys that exist are left alone, even when
    /// they hold an empty collection.
    pub fn initialize(&mut self) -> Result<()> {
        if !self.backend.is_available() {
            return Ok(());
        }

        let now = Utc::now();

        if self.is_absent(StorageKey::Posts) {
            self.write_all::<Post>(&[])
                .map_err(|e| BlogError::write_failed("initialize", Post::LABEL, e))?;
        }

        if self.is_absent(StorageKey::Categories) {
            info!("seeding sample categories");
            self.write_all(&seed::sample_categories(now))
                .map_err(|e| BlogError::write_failed("initialize", Category::LABEL, e))?;
        }

        if self.is_absent(StorageKey::Themes) {
            info!("seeding default themes");
            self.write_all(&seed::default_themes(now))
                .and_then(|_| {
                    self.backend
                        .set_item(StorageKey::ActiveTheme, seed::DEFAULT_ACTIVE_THEME_ID)
                })
                .map_err(|e| BlogError::write_failed("initialize", Theme::LABEL, e))?;
        }

        Ok(())
    }

    // --- Internals ---

    fn is_absent(&self, key: StorageKey) -> bool {
        match self.backend.get_item(key) {
            Ok(value) => value.is_none(),
            // Unreadable is not the same as absent: never seed over it.
            Err(e) => {
                warn!(key = %key, error = %e, "cannot read key, skipping seed");
                false
            }
        }
    }

    fn write_all<R: Record>(&self, records: &[R]) -> Result<()> {
        let content = serde_json::to_string(records).map_err(BlogError::Serialization)?;
        self.backend.set_item(R::KEY, &content)?;
        debug!(key = %R::KEY, count = records.len(), "collection written");
        Ok(())
    }

    fn upsert<R: Record>(&self, record: R) -> Result<()> {
        if !self.backend.is_available() {
            return Ok(());
        }
        let mut records = self.all::<R>();
        upsert_in_place(&mut records, record);
        self.write_all(&records)
    }

    fn remove<R: Record>(&self, id: &str) -> Result<Option<R>> {
        if !self.backend.is_available() {
            return Ok(None);
        }
        let mut records = self.all::<R>();
        let removed = take_by_id(&mut records, id);
        if removed.is_some() {
            self.write_all(&records)?;
        }
        Ok(removed)
    }

    fn try_save_theme(&self, theme: &Theme) -> Result<()> {
        if !self.backend.is_available() {
            return Ok(());
        }

        let mut themes = self.all_themes();
        if theme.is_active {
            for other in themes.iter_mut().filter(|t| t.id != theme.id) {
                other.is_active = false;
            }
        }
        upsert_in_place(&mut themes, theme.clone());
        self.write_all(&themes)?;

        if theme.is_active {
            self.backend.set_item(StorageKey::ActiveTheme, &theme.id)?;
        }
        Ok(())
    }

    fn try_delete_category(&self, id: &str) -> Result<Option<Category>> {
        let removed = self.remove::<Category>(id)?;
        if !self.backend.is_available() {
            return Ok(removed);
        }

        let mut posts = self.all_posts();
        let mut touched = 0;
        for post in posts.iter_mut() {
            if post.categories.iter().any(|c| c == id) {
                post.categories.retain(|c| c != id);
                touched += 1;
            }
        }
        if touched > 0 {
            self.write_all(&posts)?;
            info!(category = id, posts = touched, "removed category from posts");
        }
        Ok(removed)
    }

    fn try_delete_theme(&self, mut themes: Vec<Theme>, id: &str) -> Result<Option<Theme>> {
        let removed = take_by_id(&mut themes, id);

        if removed.is_some() {
            if themes.is_empty() {
                info!("last theme deleted, restoring defaults");
                self.write_all(&seed::default_themes(Utc::now()))?;
            } else {
                self.write_all(&themes)?;
            }
        }

        if self.active_theme_id().as_deref() == Some(id) {
            self.backend.remove_item(StorageKey::ActiveTheme)?;
        }
        Ok(removed)
    }
}

/// Replaces the record with the same id in place, or appends it.
fn upsert_in_place<R: Record>(records: &mut Vec<R>, record: R) {
    match records.iter().position(|r| r.id() == record.id()) {
        Some(index) => records[index] = record,
        None => records.push(record),
    }
}

fn take_by_id<R: Record>(records: &mut Vec<R>, id: &str) -> Option<R> {
    records
        .iter()
        .position(|r| r.id() == id)
        .map(|index| records.remove(index))
}

/// The leading `length` characters of `content`, trimmed, with an ellipsis.
pub fn excerpt_from(content: &str, length: usize) -> String {
    let head: String = content.chars().take(length).collect();
    format!("{}...", head.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::{theme, StoreFixture};
    use crate::store::mem_backend::MemBackend;
    use chrono::{Duration, TimeZone};
    use std::error::Error as _;

    fn post(id: &str, content: &str, categories: &[&str]) -> Post {
        let mut post = Post::new("T".into(), content.into());
        post.id = id.into();
        post.categories = categories.iter().map(|c| c.to_string()).collect();
        post
    }

    fn active_ids(store: &BlogStore<MemBackend>) -> Vec<String> {
        store
            .all_themes()
            .into_iter()
            .filter(|t| t.is_active)
            .map(|t| t.id)
            .collect()
    }

    // --- Posts ---

    #[test]
    fn published_at_defaults_to_created_at() {
        let mut store = BlogStore::new(MemBackend::new());
        let mut p = post("blog-1", "C", &[]);
        p.created_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        store.save_post(p.clone()).unwrap();

        let stored = store.post("blog-1").unwrap();
        assert_eq!(stored.published_at, Some(p.created_at));
    }

    #[test]
    fn explicit_published_at_is_kept() {
        let mut store = BlogStore::new(MemBackend::new());
        let mut p = post("blog-1", "C", &[]);
        let when = p.created_at + Duration::days(3);
        p.published_at = Some(when);
        store.save_post(p).unwrap();
        assert_eq!(store.post("blog-1").unwrap().published_at, Some(when));
    }

    #[test]
    fn missing_excerpt_is_filled_from_content() {
        let mut store = BlogStore::new(MemBackend::new());
        let mut p = post("blog-1", "C", &["cat-1"]);
        p.title = "T".into();
        store.save_post(p).unwrap();

        let stored = store.post("blog-1").unwrap();
        assert_eq!(stored.excerpt, "C...");
        assert_eq!(stored.categories, vec!["cat-1"]);
        assert!(!stored.published);
    }

    #[test]
    fn excerpt_takes_first_150_characters() {
        let mut store = BlogStore::new(MemBackend::new());
        let content = "é".repeat(200);
        store.save_post(post("blog-1", &content, &[])).unwrap();

        let excerpt = store.post("blog-1").unwrap().excerpt;
        assert_eq!(excerpt, format!("{}...", "é".repeat(150)));
    }

    #[test]
    fn supplied_excerpt_is_untouched() {
        let mut store = BlogStore::new(MemBackend::new());
        let mut p = post("blog-1", "Long content", &[]);
        p.excerpt = "Custom".into();
        store.save_post(p).unwrap();
        assert_eq!(store.post("blog-1").unwrap().excerpt, "Custom");
    }

    #[test]
    fn excerpt_length_is_configurable() {
        let mut store = BlogStore::new(MemBackend::new()).with_excerpt_length(5);
        store.save_post(post("blog-1", "Hello world", &[])).unwrap();
        assert_eq!(store.post("blog-1").unwrap().excerpt, "Hello...");
    }

    #[test]
    fn save_replaces_in_place() {
        let mut store = StoreFixture::new()
            .with_post("blog-1", "One", &[])
            .with_post("blog-2", "Two", &[])
            .with_post("blog-3", "Three", &[])
            .store;

        let mut updated = store.post("blog-2").unwrap();
        updated.title = "Two (edited)".into();
        store.save_post(updated).unwrap();

        let titles: Vec<String> = store.all_posts().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["One", "Two (edited)", "Three"]);
    }

    #[test]
    fn delete_post_returns_removed_record() {
        let mut store = StoreFixture::new()
            .with_post("blog-1", "One", &[])
            .with_post("blog-2", "Two", &[])
            .store;

        let removed = store.delete_post("blog-1").unwrap();
        assert_eq!(removed.map(|p| p.title).as_deref(), Some("One"));
        assert_eq!(store.all_posts().len(), 1);
        assert!(store.delete_post("blog-1").unwrap().is_none());
    }

    #[test]
    fn write_failure_is_labelled() {
        let mut store = BlogStore::new(MemBackend::new());
        store.backend().set_simulate_write_error(true);

        let err = store.save_post(post("blog-1", "C", &[])).unwrap_err();
        assert_eq!(err.to_string(), "Failed to save blog");
        assert!(err.source().is_some());

        let err = store
            .save_category(Category::new("Tech".into(), None))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to save category");

        let err = store.save_theme(theme("t", "T", true)).unwrap_err();
        assert_eq!(err.to_string(), "Failed to save theme");
    }

    #[test]
    fn delete_failure_is_labelled() {
        let mut store = StoreFixture::new().with_post("blog-1", "One", &[]).store;
        store.backend().set_simulate_write_error(true);
        let err = store.delete_post("blog-1").unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete blog");
    }

    // --- Read failure policy ---

    #[test]
    fn corrupt_collection_reads_as_empty() {
        let store = BlogStore::new(MemBackend::new());
        store.backend().set_raw(StorageKey::Posts, "{not json");
        assert!(store.all_posts().is_empty());
        assert!(store.post("blog-1").is_none());
    }

    #[test]
    fn unavailable_storage_reads_empty_and_skips_writes() {
        let mut store = BlogStore::new(MemBackend::unavailable());
        store.initialize().unwrap();
        store.save_post(post("blog-1", "C", &[])).unwrap();

        assert!(store.all_posts().is_empty());
        assert!(store.all_themes().is_empty());
        assert!(store.active_theme().is_none());
        assert!(store.delete_theme("default-light").unwrap().is_none());
    }

    // --- Categories ---

    #[test]
    fn deleting_category_strips_it_from_posts() {
        let mut store = StoreFixture::new()
            .with_category("cat-1", "Tech")
            .with_category("cat-2", "Life")
            .with_post("blog-1", "One", &["cat-1", "cat-2"])
            .with_post("blog-2", "Two", &["cat-2"])
            .store;
        let untouched = store.post("blog-2").unwrap();

        let removed = store.delete_category("cat-1").unwrap();
        assert_eq!(removed.map(|c| c.name).as_deref(), Some("Tech"));

        assert_eq!(store.post("blog-1").unwrap().categories, vec!["cat-2"]);
        assert_eq!(store.post("blog-2").unwrap(), untouched);
        assert_eq!(store.all_posts().len(), 2);
        assert!(store.category("cat-1").is_none());
    }

    #[test]
    fn cascade_runs_for_dangling_references() {
        let mut store = StoreFixture::new()
            .with_post("blog-1", "One", &["cat-9"])
            .store;
        assert!(store.delete_category("cat-9").unwrap().is_none());
        assert!(store.post("blog-1").unwrap().categories.is_empty());
    }

    #[test]
    fn category_delete_failure_is_labelled() {
        let mut store = StoreFixture::new().with_category("cat-1", "Tech").store;
        store.backend().set_simulate_write_error(true);
        let err = store.delete_category("cat-1").unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete category");
    }

    // --- Themes ---

    #[test]
    fn saving_active_theme_deactivates_others() {
        let mut store = StoreFixture::initialized().store;
        store.save_theme(theme("theme-x", "X", true)).unwrap();

        assert_eq!(active_ids(&store), vec!["theme-x"]);
        assert_eq!(store.active_theme_id().as_deref(), Some("theme-x"));

        let mut dark = store.theme("default-dark").unwrap();
        dark.is_active = true;
        store.save_theme(dark).unwrap();
        assert_eq!(active_ids(&store), vec!["default-dark"]);
        assert_eq!(store.all_themes().len(), 4);
    }

    #[test]
    fn saving_inactive_theme_keeps_current_active() {
        let mut store = StoreFixture::initialized().store;
        store.save_theme(theme("theme-x", "X", false)).unwrap();
        assert_eq!(active_ids(&store), vec!["default-light"]);
        assert_eq!(store.active_theme_id().as_deref(), Some("default-light"));
    }

    #[test]
    fn cannot_delete_active_theme() {
        let mut store = StoreFixture::initialized().store;
        let before = store.all_themes();

        let err = store.delete_theme("default-light").unwrap_err();
        assert!(matches!(err, BlogError::ActiveThemeDeletion));
        assert_eq!(store.all_themes(), before);
    }

    #[test]
    fn deleting_last_theme_reseeds_defaults() {
        let mut store = StoreFixture::new().with_theme("only", "Only", false).store;
        store.delete_theme("only").unwrap();

        let themes = store.all_themes();
        let ids: Vec<&str> = themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["default-light", "default-dark", "elegant"]);
        assert_eq!(active_ids(&store), vec!["default-light"]);
    }

    #[test]
    fn deleting_cached_theme_clears_cache() {
        let mut store = StoreFixture::initialized().store;
        store
            .backend()
            .set_item(StorageKey::ActiveTheme, "elegant")
            .unwrap();

        store.delete_theme("elegant").unwrap();
        assert!(store.active_theme_id().is_none());
        assert_eq!(store.all_themes().len(), 2);
    }

    #[test]
    fn active_theme_prefers_valid_cache() {
        let store = StoreFixture::initialized().store;
        store
            .backend()
            .set_item(StorageKey::ActiveTheme, "elegant")
            .unwrap();
        // Flag still says default-light; the cache wins.
        assert_eq!(store.active_theme().unwrap().id, "elegant");
    }

    #[test]
    fn active_theme_falls_back_to_flag_when_cache_is_stale() {
        let store = StoreFixture::initialized().store;
        store
            .backend()
            .set_item(StorageKey::ActiveTheme, "gone")
            .unwrap();
        assert_eq!(store.active_theme().unwrap().id, "default-light");
    }

    #[test]
    fn active_theme_falls_back_to_first_theme() {
        let store = StoreFixture::new()
            .with_theme("a", "A", false)
            .with_theme("b", "B", false)
            .store;
        assert_eq!(store.active_theme().unwrap().id, "a");
        // Resolution does not write anything.
        assert!(active_ids(&store).is_empty());
    }

    #[test]
    fn active_theme_absent_only_when_no_themes() {
        let store = BlogStore::new(MemBackend::new());
        assert!(store.active_theme().is_none());
    }

    // --- Initialize ---

    #[test]
    fn initialize_seeds_empty_store() {
        let mut store = BlogStore::new(MemBackend::new());
        store.initialize().unwrap();

        assert!(store.all_posts().is_empty());
        assert_eq!(store.backend().raw(StorageKey::Posts).as_deref(), Some("[]"));

        let names: Vec<String> = store.all_categories().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Technology", "Lifestyle", "Travel"]);

        let themes = store.all_themes();
        assert_eq!(themes.len(), 3);
        assert_eq!(active_ids(&store), vec!["default-light"]);
        assert_eq!(store.active_theme_id().as_deref(), Some("default-light"));
    }

    #[test]
    fn initialize_is_idempotent_and_never_overwrites() {
        let mut store = StoreFixture::new()
            .with_post("blog-1", "One", &[])
            .store;
        store.backend().set_raw(StorageKey::Categories, "[]");

        store.initialize().unwrap();
        store.initialize().unwrap();

        assert_eq!(store.all_posts().len(), 1);
        assert!(store.all_categories().is_empty());
        assert_eq!(store.all_themes().len(), 3);
    }
}
