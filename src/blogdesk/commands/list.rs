use crate::commands::CmdResult;
use crate::error::{BlogError, Result};
use crate::index::Indexed;
use crate::model::{Category, Post};
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;
use std::cmp::Ordering;
use std::str::FromStr;

use super::helpers::indexed_posts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Title,
    Created,
    #[default]
    Updated,
    Published,
}

impl FromStr for SortField {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "created" | "createdat" => Ok(SortField::Created),
            "updated" | "updatedat" => Ok(SortField::Updated),
            "published" | "publishedat" => Ok(SortField::Published),
            other => Err(BlogError::Api(format!("Unknown sort field: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(BlogError::Api(format!("Unknown sort direction: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostListOptions {
    pub search: Option<String>,
    pub sort: SortField,
    pub direction: SortDirection,
    pub published_only: bool,
    pub drafts_only: bool,
}

pub fn run<B: StorageBackend>(store: &BlogStore<B>, options: &PostListOptions) -> Result<CmdResult> {
    let categories = store.all_categories();
    let query = options
        .search
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let mut listed: Vec<Indexed<Post>> = indexed_posts(store)
        .into_iter()
        .filter(|dp| !options.published_only || dp.record.published)
        .filter(|dp| !options.drafts_only || !dp.record.published)
        .filter(|dp| match &query {
            Some(q) => matches_query(&dp.record, q, &categories),
            None => true,
        })
        .collect();

    listed.sort_by(|a, b| {
        let ord = compare(&a.record, &b.record, options.sort);
        match options.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    Ok(CmdResult::default()
        .with_listed_posts(listed)
        .with_categories(categories))
}

/// Case-insensitive match against title, content and category names.
/// `query` is expected already lowercased.
fn matches_query(post: &Post, query: &str, categories: &[Category]) -> bool {
    if post.title.to_lowercase().contains(query) || post.content.to_lowercase().contains(query) {
        return true;
    }
    categories
        .iter()
        .filter(|c| post.categories.contains(&c.id))
        .any(|c| c.name.to_lowercase().contains(query))
}

fn compare(a: &Post, b: &Post, field: SortField) -> Ordering {
    match field {
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Created => a.created_at.cmp(&b.created_at),
        SortField::Updated => a.updated_at.cmp(&b.updated_at),
        SortField::Published => a.publish_date().cmp(&b.publish_date()),
    }
}
