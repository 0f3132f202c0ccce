use crate::commands::helpers::{indexed_themes, require_text, resolve_theme};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BlogError, Result};
use crate::index::{Indexed, Selector};
use crate::model::Theme;
use crate::seed;
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;
use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME_REQUIRED: &str = "Please enter a theme name";

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});

/// Optional overrides for theme fields. Unset fields keep the current
/// value, or the `default-light` palette for a new theme.
#[derive(Debug, Clone, Default)]
pub struct ThemeFields {
    pub name: Option<String>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub text: Option<String>,
    pub background: Option<String>,
    pub font_family: Option<String>,
    /// Only honored when adding a theme.
    pub activate: bool,
}

pub fn list<B: StorageBackend>(store: &BlogStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default()
        .with_listed_themes(indexed_themes(store))
        .with_active_theme(store.active_theme()))
}

/// Shows one theme, or the active one when no selector is given.
pub fn show<B: StorageBackend>(store: &BlogStore<B>, selector: Option<&Selector>) -> Result<CmdResult> {
    let active = store.active_theme();
    let entry = match selector {
        Some(selector) => resolve_theme(store, selector)?,
        None => {
            let active = active
                .clone()
                .ok_or_else(|| BlogError::Api("No themes available".to_string()))?;
            indexed_themes(store)
                .into_iter()
                .find(|t| t.record.id == active.id)
                .unwrap_or(Indexed {
                    index: 1,
                    record: active,
                })
        }
    };
    Ok(CmdResult::default()
        .with_listed_themes(vec![entry])
        .with_active_theme(active))
}

pub fn add<B: StorageBackend>(store: &mut BlogStore<B>, fields: ThemeFields) -> Result<CmdResult> {
    let name = require_text(fields.name.as_deref().unwrap_or_default(), NAME_REQUIRED)?;
    let mut theme = Theme::new(
        name,
        seed::new_theme_colors(),
        seed::new_theme_font().to_string(),
    );
    theme.is_active = fields.activate;
    apply_fields(&mut theme, fields)?;

    let saved = store.save_theme(theme)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Theme created: {}", saved.name)));
    if saved.is_active {
        result.add_message(CmdMessage::success("Theme activated successfully"));
    }
    let index = indexed_themes(store).len();
    result.listed_themes.push(Indexed {
        index,
        record: saved,
    });
    Ok(result)
}

/// Edits a theme in place. The active flag is never changed here.
pub fn edit<B: StorageBackend>(
    store: &mut BlogStore<B>,
    selector: &Selector,
    fields: ThemeFields,
) -> Result<CmdResult> {
    let Indexed { index, record } = resolve_theme(store, selector)?;
    let mut theme = record;
    if let Some(name) = fields.name.as_deref() {
        theme.name = require_text(name, NAME_REQUIRED)?;
    }
    apply_fields(&mut theme, fields)?;

    let saved = store.save_theme(theme)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Theme updated ({}): {}",
        index, saved.name
    )));
    result.listed_themes.push(Indexed {
        index,
        record: saved,
    });
    Ok(result)
}

pub fn activate<B: StorageBackend>(store: &mut BlogStore<B>, selector: &Selector) -> Result<CmdResult> {
    let Indexed { index, mut record } = resolve_theme(store, selector)?;
    record.is_active = true;
    let saved = store.save_theme(record)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Theme activated successfully"));
    result.listed_themes.push(Indexed {
        index,
        record: saved.clone(),
    });
    Ok(result.with_active_theme(Some(saved)))
}

/// Deletes a theme. The active theme is refused; removing the last theme
/// brings the defaults back.
pub fn delete<B: StorageBackend>(store: &mut BlogStore<B>, selector: &Selector) -> Result<CmdResult> {
    let entry = resolve_theme(store, selector)?;
    let was_last = store.all_themes().len() == 1;
    let mut result = CmdResult::default();

    if let Some(theme) = store.delete_theme(&entry.record.id)? {
        result.add_message(CmdMessage::success(format!(
            "Theme deleted ({}): {}",
            entry.index, theme.name
        )));
        if was_last {
            result.add_message(CmdMessage::info("No themes left, default themes restored."));
        }
    }
    Ok(result)
}

fn apply_fields(theme: &mut Theme, fields: ThemeFields) -> Result<()> {
    if let Some(color) = fields.primary {
        theme.primary_color = hex_color("primary", &color)?;
    }
    if let Some(color) = fields.secondary {
        theme.secondary_color = hex_color("secondary", &color)?;
    }
    if let Some(color) = fields.text {
        theme.text_color = hex_color("text", &color)?;
    }
    if let Some(color) = fields.background {
        theme.background_color = hex_color("background", &color)?;
    }
    if let Some(font) = fields.font_family {
        let font = font.trim();
        if !font.is_empty() {
            theme.font_family = font.to_string();
        }
    }
    Ok(())
}

/// Accepts `#rgb` or `#rrggbb`, stored lowercased.
pub fn hex_color(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if !HEX_COLOR_RE.is_match(value) {
        return Err(BlogError::Api(format!(
            "Invalid {} color: {} (expected #rgb or #rrggbb)",
            field, value
        )));
    }
    Ok(value.to_ascii_lowercase())
}
