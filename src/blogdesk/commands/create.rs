use crate::commands::helpers::{indexed_posts, normalize_list, require_text, unknown_categories};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::Indexed;
use crate::model::Post;
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;
use chrono::{DateTime, Utc};

pub const TITLE_REQUIRED: &str = "Please enter a title for your blog post";
pub const CONTENT_REQUIRED: &str = "Please enter content for your blog post";

/// Everything the editor collects for a new post.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub publish: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }
}

pub fn run<B: StorageBackend>(store: &mut BlogStore<B>, draft: PostDraft) -> Result<CmdResult> {
    let title = require_text(&draft.title, TITLE_REQUIRED)?;
    let content = require_text(&draft.content, CONTENT_REQUIRED)?;

    let mut post = Post::new(title, content);
    post.excerpt = draft.excerpt.unwrap_or_default().trim().to_string();
    post.cover_image = draft
        .cover_image
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    post.categories = normalize_list(&draft.categories);
    post.tags = normalize_list(&draft.tags);
    post.published = draft.publish;
    post.published_at = Some(draft.published_at.unwrap_or(post.created_at));

    let mut result = CmdResult::default();
    for id in unknown_categories(store, &post.categories) {
        result.add_message(CmdMessage::warning(format!("Unknown category: {}", id)));
    }

    let saved = store.save_post(post)?;
    let index = indexed_posts(store)
        .iter()
        .find(|e| e.record.id == saved.id)
        .map(|e| e.index)
        .unwrap_or(1);

    result.add_message(CmdMessage::success(if saved.published {
        format!("Blog post published: {}", saved.title)
    } else {
        format!("Blog post saved as draft: {}", saved.title)
    }));
    result.listed_posts.push(Indexed {
        index,
        record: saved.clone(),
    });
    result.affected_posts.push(saved);
    Ok(result)
}
