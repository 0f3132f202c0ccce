//! Fixed seed data written by `initialize` and by theme re-seeding.
//!
//! The ids, names and colors here are part of the storage format: data
//! written by earlier versions refers to them, so they must not change.

use crate::model::{Category, Theme, ThemeColors};
use chrono::{DateTime, Utc};

pub const DEFAULT_ACTIVE_THEME_ID: &str = "default-light";

struct ThemeSeed {
    id: &'static str,
    name: &'static str,
    primary: &'static str,
    secondary: &'static str,
    text: &'static str,
    background: &'static str,
    font: &'static str,
}

const THEME_SEEDS: [ThemeSeed; 3] = [
    ThemeSeed {
        id: "default-light",
        name: "Default Light",
        primary: "#0f766e",
        secondary: "#14b8a6",
        text: "#1e293b",
        background: "#ffffff",
        font: "Inter, sans-serif",
    },
    ThemeSeed {
        id: "default-dark",
        name: "Default Dark",
        primary: "#14b8a6",
        secondary: "#2dd4bf",
        text: "#f1f5f9",
        background: "#1e293b",
        font: "Inter, sans-serif",
    },
    ThemeSeed {
        id: "elegant",
        name: "Elegant",
        primary: "#7c3aed",
        secondary: "#a78bfa",
        text: "#1e293b",
        background: "#f8fafc",
        font: "Georgia, serif",
    },
];

const CATEGORY_SEEDS: [(&str, &str, &str); 3] = [
    (
        "cat-1",
        "Technology",
        "Posts about technology and software development",
    ),
    (
        "cat-2",
        "Lifestyle",
        "Posts about lifestyle and personal experiences",
    ),
    ("cat-3", "Travel", "Posts about travel and adventures"),
];

/// The default theme set, with `default-light` marked active.
pub fn default_themes(now: DateTime<Utc>) -> Vec<Theme> {
    THEME_SEEDS
        .iter()
        .map(|seed| Theme {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            primary_color: seed.primary.to_string(),
            secondary_color: seed.secondary.to_string(),
            text_color: seed.text.to_string(),
            background_color: seed.background.to_string(),
            font_family: seed.font.to_string(),
            created_at: now,
            is_active: seed.id == DEFAULT_ACTIVE_THEME_ID,
        })
        .collect()
}

/// Starting values for a newly created theme: the `default-light` palette.
pub fn new_theme_colors() -> ThemeColors {
    let seed = &THEME_SEEDS[0];
    ThemeColors {
        primary: seed.primary.to_string(),
        secondary: seed.secondary.to_string(),
        text: seed.text.to_string(),
        background: seed.background.to_string(),
    }
}

pub fn new_theme_font() -> &'static str {
    THEME_SEEDS[0].font
}

pub fn sample_categories(now: DateTime<Utc>) -> Vec<Category> {
    CATEGORY_SEEDS
        .iter()
        .map(|(id, name, description)| Category {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            created_at: now,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_default_theme_is_active() {
        let themes = default_themes(Utc::now());
        let ids: Vec<&str> = themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["default-light", "default-dark", "elegant"]);
        let active: Vec<&str> = themes
            .iter()
            .filter(|t| t.is_active)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(active, vec![DEFAULT_ACTIVE_THEME_ID]);
    }

    #[test]
    fn default_theme_colors_are_fixed() {
        let themes = default_themes(Utc::now());
        let dark = &themes[1];
        assert_eq!(dark.primary_color, "#14b8a6");
        assert_eq!(dark.secondary_color, "#2dd4bf");
        assert_eq!(dark.text_color, "#f1f5f9");
        assert_eq!(dark.background_color, "#1e293b");
        assert_eq!(themes[2].font_family, "Georgia, serif");
    }

    #[test]
    fn sample_categories_in_fixed_order() {
        let cats = sample_categories(Utc::now());
        let names: Vec<&str> = cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Technology", "Lifestyle", "Travel"]);
        assert_eq!(cats[0].id, "cat-1");
    }
}
