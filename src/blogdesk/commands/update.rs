use crate::commands::create::{CONTENT_REQUIRED, TITLE_REQUIRED};
use crate::commands::helpers::{normalize_list, require_text, resolve_post, unknown_categories};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{Indexed, Selector};
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;
use chrono::{DateTime, Utc};

/// Field changes for an existing post. `None` keeps the stored value.
///
/// An empty `excerpt` regenerates it from the content; an empty
/// `cover_image` removes the cover.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub publish: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
}

pub fn run<B: StorageBackend>(
    store: &mut BlogStore<B>,
    selector: &Selector,
    update: PostUpdate,
) -> Result<CmdResult> {
    let Indexed { index, record } = resolve_post(store, selector)?;
    let mut post = record;

    if let Some(title) = update.title {
        post.title = require_text(&title, TITLE_REQUIRED)?;
    }
    if let Some(content) = update.content {
        post.content = require_text(&content, CONTENT_REQUIRED)?;
    }
    if let Some(excerpt) = update.excerpt {
        post.excerpt = excerpt.trim().to_string();
    }
    if let Some(cover) = update.cover_image {
        let cover = cover.trim();
        post.cover_image = (!cover.is_empty()).then(|| cover.to_string());
    }
    if let Some(categories) = update.categories {
        post.categories = normalize_list(&categories);
    }
    if let Some(tags) = update.tags {
        post.tags = normalize_list(&tags);
    }
    if let Some(publish) = update.publish {
        post.published = publish;
    }
    if let Some(published_at) = update.published_at {
        post.published_at = Some(published_at);
    }
    post.updated_at = Utc::now();

    let mut result = CmdResult::default();
    for id in unknown_categories(store, &post.categories) {
        result.add_message(CmdMessage::warning(format!("Unknown category: {}", id)));
    }

    let saved = store.save_post(post)?;
    result.add_message(CmdMessage::success(format!(
        "Blog post updated ({}): {}",
        index, saved.title
    )));
    result.listed_posts.push(Indexed {
        index: 1,
        record: saved.clone(),
    });
    result.affected_posts.push(saved);
    Ok(result)
}
