use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates an opaque, prefixed record id such as `blog-3f2a...`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    // Weak references: category ids may outlive the category they name.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Filled from created_at on save, so stored posts always carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published: bool,
}

impl Post {
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id("blog-"),
            title,
            content,
            excerpt: String::new(),
            cover_image: None,
            categories: Vec::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            published_at: None,
            published: false,
        }
    }

    /// The publication date shown to readers, falling back to creation time
    /// for records written before the field existed.
    pub fn publish_date(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: generate_id("cat-"),
            name,
            description,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub text: String,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub text_color: String,
    pub background_color: String,
    pub font_family: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_active: bool,
}

impl Theme {
    pub fn new(name: String, colors: ThemeColors, font_family: String) -> Self {
        Self {
            id: generate_id("theme-"),
            name,
            primary_color: colors.primary,
            secondary_color: colors.secondary,
            text_color: colors.text,
            background_color: colors.background,
            font_family,
            created_at: Utc::now(),
            is_active: false,
        }
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors {
            primary: self.primary_color.clone(),
            secondary: self.secondary_color.clone(),
            text: self.text_color.clone(),
            background: self.background_color.clone(),
        }
    }

    pub fn set_colors(&mut self, colors: ThemeColors) {
        self.primary_color = colors.primary;
        self.secondary_color = colors.secondary;
        self.text_color = colors.text;
        self.background_color = colors.background;
    }
}
