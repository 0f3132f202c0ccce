use crate::error::{BlogError, Result};
use crate::index::{index_posts, index_records, resolve, Indexed, Selector};
use crate::model::{Category, Post, Theme};
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;

pub fn indexed_posts<B: StorageBackend>(store: &BlogStore<B>) -> Vec<Indexed<Post>> {
    index_posts(store.all_posts())
}

pub fn indexed_categories<B: StorageBackend>(store: &BlogStore<B>) -> Vec<Indexed<Category>> {
    index_records(store.all_categories())
}

pub fn indexed_themes<B: StorageBackend>(store: &BlogStore<B>) -> Vec<Indexed<Theme>> {
    index_records(store.all_themes())
}

pub fn resolve_post<B: StorageBackend>(
    store: &BlogStore<B>,
    selector: &Selector,
) -> Result<Indexed<Post>> {
    resolve(&indexed_posts(store), selector).cloned()
}

pub fn resolve_category<B: StorageBackend>(
    store: &BlogStore<B>,
    selector: &Selector,
) -> Result<Indexed<Category>> {
    resolve(&indexed_categories(store), selector).cloned()
}

pub fn resolve_theme<B: StorageBackend>(
    store: &BlogStore<B>,
    selector: &Selector,
) -> Result<Indexed<Theme>> {
    resolve(&indexed_themes(store), selector).cloned()
}

/// Trims a required text field, rejecting it if nothing is left.
pub fn require_text(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BlogError::Api(message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Trims entries, drops blanks and duplicates, keeps first-seen order.
pub fn normalize_list(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}

/// Category ids that do not name a stored category.
pub fn unknown_categories<B: StorageBackend>(
    store: &BlogStore<B>,
    ids: &[String],
) -> Vec<String> {
    let categories = store.all_categories();
    ids.iter()
        .filter(|id| !categories.iter().any(|c| &&c.id == id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_list_trims_and_dedupes() {
        let input = vec![
            " rust ".to_string(),
            "".to_string(),
            "rust".to_string(),
            "cli".to_string(),
        ];
        assert_eq!(normalize_list(&input), vec!["rust", "cli"]);
    }

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text("   ", "Please enter a title").is_err());
        assert_eq!(require_text(" Hi ", "x").unwrap(), "Hi");
    }
}
