use crate::commands::helpers::{indexed_categories, require_text, resolve_category};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{Indexed, Selector};
use crate::model::Category;
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;

pub const NAME_REQUIRED: &str = "Please enter a category name";

pub fn list<B: StorageBackend>(store: &BlogStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_categories(indexed_categories(store)))
}

pub fn add<B: StorageBackend>(
    store: &mut BlogStore<B>,
    name: &str,
    description: Option<&str>,
) -> Result<CmdResult> {
    let name = require_text(name, NAME_REQUIRED)?;
    let saved = store.save_category(Category::new(name, clean_description(description)))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category created: {}",
        saved.name
    )));
    let index = indexed_categories(store).len();
    result.listed_categories.push(Indexed {
        index,
        record: saved,
    });
    Ok(result)
}

/// Renames a category or replaces its description. An empty description
/// clears it. `created_at` and the id are kept.
pub fn edit<B: StorageBackend>(
    store: &mut BlogStore<B>,
    selector: &Selector,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<CmdResult> {
    let Indexed { index, record } = resolve_category(store, selector)?;
    let mut category = record;

    if let Some(name) = name {
        category.name = require_text(name, NAME_REQUIRED)?;
    }
    if description.is_some() {
        category.description = clean_description(description);
    }

    let saved = store.save_category(category)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category updated ({}): {}",
        index, saved.name
    )));
    result.listed_categories.push(Indexed {
        index,
        record: saved,
    });
    Ok(result)
}

/// Deletes a category. Posts keep existing but lose the category id.
pub fn delete<B: StorageBackend>(store: &mut BlogStore<B>, selector: &Selector) -> Result<CmdResult> {
    let entry = resolve_category(store, selector)?;
    let id = entry.record.id.clone();
    let referencing = store
        .all_posts()
        .iter()
        .filter(|p| p.categories.contains(&id))
        .count();

    let mut result = CmdResult::default();
    if let Some(category) = store.delete_category(&id)? {
        let detail = match referencing {
            0 => String::new(),
            1 => " (removed from 1 post)".to_string(),
            n => format!(" (removed from {} posts)", n),
        };
        result.add_message(CmdMessage::success(format!(
            "Category deleted ({}): {}{}",
            entry.index, category.name, detail
        )));
    }
    Ok(result)
}

fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
