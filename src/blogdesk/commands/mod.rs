use crate::config::BlogConfig;
use crate::index::Indexed;
use crate::model::{Category, Post, Theme};
use std::path::PathBuf;

pub mod categories;
pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod init;
pub mod list;
pub mod preview;
pub mod publish;
pub mod themes;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_posts: Vec<Post>,
    pub listed_posts: Vec<Indexed<Post>>,
    pub listed_categories: Vec<Indexed<Category>>,
    pub listed_themes: Vec<Indexed<Theme>>,
    /// Lookup table for resolving the category ids of listed posts.
    pub categories: Vec<Category>,
    /// The theme currently applied to previews.
    pub active_theme: Option<Theme>,
    pub html: Option<String>,
    pub paths: Vec<PathBuf>,
    pub config: Option<BlogConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_posts(mut self, posts: Vec<Indexed<Post>>) -> Self {
        self.listed_posts = posts;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_listed_categories(mut self, categories: Vec<Indexed<Category>>) -> Self {
        self.listed_categories = categories;
        self
    }

    pub fn with_listed_themes(mut self, themes: Vec<Indexed<Theme>>) -> Self {
        self.listed_themes = themes;
        self
    }

    pub fn with_active_theme(mut self, theme: Option<Theme>) -> Self {
        self.active_theme = theme;
        self
    }

    pub fn with_html(mut self, html: String) -> Self {
        self.html = Some(html);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: BlogConfig) -> Self {
        self.config = Some(config);
        self
    }
}
