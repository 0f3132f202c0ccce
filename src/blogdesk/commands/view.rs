use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::Selector;
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;

use super::helpers::resolve_post;

pub fn run<B: StorageBackend>(store: &BlogStore<B>, selectors: &[Selector]) -> Result<CmdResult> {
    let posts = selectors
        .iter()
        .map(|s| resolve_post(store, s))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default()
        .with_listed_posts(posts)
        .with_categories(store.all_categories()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::StoreFixture;

    #[test]
    fn views_by_index_and_id() {
        let store = StoreFixture::new()
            .with_category("cat-1", "Technology")
            .with_post("blog-1", "One", &["cat-1"])
            .store;
        let result = run(
            &store,
            &[Selector::Index(1), Selector::Id("blog-1".into())],
        )
        .unwrap();
        assert_eq!(result.listed_posts.len(), 2);
        assert_eq!(result.listed_posts[1].record.title, "One");
        assert_eq!(result.categories[0].name, "Technology");
    }

    #[test]
    fn missing_post_fails() {
        let store = StoreFixture::new().store;
        assert!(run(&store, &[Selector::Id("blog-x".into())]).is_err());
    }
}
