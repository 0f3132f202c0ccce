use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::Selector;
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;

use super::helpers::resolve_post;

/// Deletes posts. Every selector is resolved before anything is removed,
/// so indexes refer to the listing the user saw.
pub fn run<B: StorageBackend>(store: &mut BlogStore<B>, selectors: &[Selector]) -> Result<CmdResult> {
    let resolved = selectors
        .iter()
        .map(|s| resolve_post(store, s))
        .collect::<Result<Vec<_>>>()?;
    let mut result = CmdResult::default();

    for entry in resolved {
        if let Some(post) = store.delete_post(&entry.record.id)? {
            result.add_message(CmdMessage::success(format!(
                "Blog post deleted ({}): {}",
                entry.index, post.title
            )));
            result.affected_posts.push(post);
        }
    }

    Ok(result)
}
