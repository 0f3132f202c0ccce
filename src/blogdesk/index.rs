//! # Display indexes
//!
//! Record ids (`blog-3f2a9c...`) are stable but unpleasant to type, so every
//! listing numbers its records from 1 and commands accept either form:
//!
//! ```text
//! blogdesk post view 2
//! blogdesk post view blog-3f2a9c0d4e5b4c1f9a8e7d6c5b4a3f21
//! ```
//!
//! Numbers are assigned over a canonical order that does not depend on how a
//! listing is filtered or sorted: posts newest-updated first, categories and
//! themes in storage order. A search result therefore shows the same number
//! the post has in the full listing.

use crate::error::{BlogError, Result};
use crate::model::Post;
use crate::store::Record;
use std::fmt;
use std::str::FromStr;

/// A user input selecting one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Index(usize),
    Id(String),
}

impl FromStr for Selector {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BlogError::Api("Empty selector".to_string()));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return match s.parse::<usize>() {
                Ok(0) | Err(_) => Err(BlogError::Api(format!("Invalid index: {}", s))),
                Ok(n) => Ok(Selector::Index(n)),
            };
        }
        Ok(Selector::Id(s.to_string()))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(i) => write!(f, "{}", i),
            Selector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// A record paired with its display index.
#[derive(Debug, Clone)]
pub struct Indexed<R> {
    pub index: usize,
    pub record: R,
}

/// Numbers records in the order given, starting at 1.
pub fn index_records<R>(records: Vec<R>) -> Vec<Indexed<R>> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| Indexed {
            index: i + 1,
            record,
        })
        .collect()
}

/// Numbers posts in canonical order: most recently updated first.
pub fn index_posts(mut posts: Vec<Post>) -> Vec<Indexed<Post>> {
    posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    index_records(posts)
}

/// Finds the record a selector names within an indexed listing.
pub fn resolve<'a, R: Record>(
    indexed: &'a [Indexed<R>],
    selector: &Selector,
) -> Result<&'a Indexed<R>> {
    let found = match selector {
        Selector::Index(i) => indexed.iter().find(|entry| entry.index == *i),
        Selector::Id(id) => indexed.iter().find(|entry| entry.record.id() == id),
    };
    found.ok_or_else(|| BlogError::NotFound {
        kind: R::LABEL,
        id: selector.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn post(id: &str, age_days: i64) -> Post {
        let mut post = Post::new(id.to_string(), String::new());
        post.id = id.to_string();
        post.updated_at = Utc::now() - Duration::days(age_days);
        post
    }

    #[test]
    fn parses_numbers_as_indexes() {
        assert_eq!("3".parse::<Selector>().unwrap(), Selector::Index(3));
        assert_eq!(
            "blog-42".parse::<Selector>().unwrap(),
            Selector::Id("blog-42".into())
        );
        assert!("0".parse::<Selector>().is_err());
        assert!("  ".parse::<Selector>().is_err());
    }

    #[test]
    fn posts_are_numbered_newest_first() {
        let indexed = index_posts(vec![post("old", 10), post("new", 0), post("mid", 5)]);
        let ids: Vec<&str> = indexed.iter().map(|e| e.record.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
        assert_eq!(indexed[0].index, 1);
    }

    #[test]
    fn resolves_by_index_or_id() {
        let indexed = index_posts(vec![post("a", 1), post("b", 0)]);
        assert_eq!(resolve(&indexed, &Selector::Index(2)).unwrap().record.id, "a");
        assert_eq!(
            resolve(&indexed, &Selector::Id("b".into())).unwrap().index,
            1
        );
        let err = resolve(&indexed, &Selector::Index(9)).unwrap_err();
        assert_eq!(err.to_string(), "blog not found: 9");
    }
}
