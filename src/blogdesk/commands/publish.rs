use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::Selector;
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;
use chrono::Utc;

use super::helpers::resolve_post;

/// Sets the published flag on each selected post. Posts already in the
/// requested state are reported and left untouched.
pub fn run<B: StorageBackend>(
    store: &mut BlogStore<B>,
    selectors: &[Selector],
    publish: bool,
) -> Result<CmdResult> {
    let resolved = selectors
        .iter()
        .map(|s| resolve_post(store, s))
        .collect::<Result<Vec<_>>>()?;
    let verb = if publish { "published" } else { "unpublished" };
    let mut result = CmdResult::default();

    for entry in resolved {
        let mut post = entry.record;
        if post.published == publish {
            result.add_message(CmdMessage::info(format!(
                "Blog post already {} ({}): {}",
                verb, entry.index, post.title
            )));
            continue;
        }

        post.published = publish;
        post.updated_at = Utc::now();
        let saved = store.save_post(post)?;
        result.add_message(CmdMessage::success(format!(
            "Blog post {} ({}): {}",
            verb, entry.index, saved.title
        )));
        result.affected_posts.push(saved);
    }

    Ok(result)
}
