use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BlogError, Result};
use crate::index::Selector;
use crate::preview::render_page;
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;
use std::fs;
use std::path::Path;

use super::helpers::{resolve_post, resolve_theme};

/// Renders a post as a standalone HTML page. Uses the given theme, or the
/// active one. With `output` the page is written to that file.
pub fn run<B: StorageBackend>(
    store: &BlogStore<B>,
    selector: &Selector,
    theme: Option<&Selector>,
    date_format: &str,
    output: Option<&Path>,
) -> Result<CmdResult> {
    let post = resolve_post(store, selector)?.record;
    let theme = match theme {
        Some(selector) => Some(resolve_theme(store, selector)?.record),
        None => store.active_theme(),
    };
    let categories = store.all_categories();
    let html = render_page(&post, theme.as_ref(), &categories, date_format);

    let mut result = CmdResult::default()
        .with_active_theme(theme)
        .with_categories(categories);

    if let Some(path) = output {
        fs::write(path, &html).map_err(BlogError::Io)?;
        result.add_message(CmdMessage::success(format!(
            "Preview written to {}",
            path.display()
        )));
        result.paths.push(path.to_path_buf());
    }
    result.affected_posts.push(post);
    Ok(result.with_html(html))
}
