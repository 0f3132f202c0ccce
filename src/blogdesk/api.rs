//! # API Facade
//!
//! A thin layer over the commands. Every blogdesk operation goes through
//! here regardless of the client driving it.
//!
//! The facade:
//! - parses user selectors (`2`, `blog-3f2a...`) into [`Selector`]s
//! - dispatches to the matching `commands::*` function
//! - threads the loaded [`BlogConfig`] into the commands that format dates
//!
//! It does no printing and holds no business rules. Those live in
//! `commands/*.rs` and `store/`.
//!
//! `BlogApi<B: StorageBackend>` is generic over the backend: the CLI runs it
//! on [`FsBackend`](crate::store::fs_backend::FsBackend), tests on
//! [`MemBackend`](crate::store::mem_backend::MemBackend).

use crate::commands;
use crate::config::BlogConfig;
use crate::error::Result;
use crate::index::Selector;
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;
use std::path::{Path, PathBuf};

pub struct BlogApi<B: StorageBackend> {
    store: BlogStore<B>,
    data_dir: PathBuf,
    config: BlogConfig,
}

impl<B: StorageBackend> BlogApi<B> {
    pub fn new(backend: B, data_dir: PathBuf, config: BlogConfig) -> Self {
        let store = BlogStore::new(backend).with_excerpt_length(config.excerpt_length);
        Self {
            store,
            data_dir,
            config,
        }
    }

    pub fn store(&self) -> &BlogStore<B> {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    pub fn init(&mut self) -> Result<CmdResult> {
        commands::init::run(&mut self.store)
    }

    // --- Posts ---

    pub fn list_posts(&self, options: &PostListOptions) -> Result<CmdResult> {
        commands::list::run(&self.store, options)
    }

    pub fn view_posts<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn create_post(&mut self, draft: PostDraft) -> Result<CmdResult> {
        commands::create::run(&mut self.store, draft)
    }

    pub fn update_post(&mut self, selector: &str, update: PostUpdate) -> Result<CmdResult> {
        let selector = selector.parse::<Selector>()?;
        commands::update::run(&mut self.store, &selector, update)
    }

    pub fn delete_posts<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn publish_posts<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::publish::run(&mut self.store, &selectors, true)
    }

    pub fn unpublish_posts<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::publish::run(&mut self.store, &selectors, false)
    }

    pub fn preview_post(
        &self,
        selector: &str,
        theme: Option<&str>,
        output: Option<&Path>,
    ) -> Result<CmdResult> {
        let selector = selector.parse::<Selector>()?;
        let theme = theme.map(str::parse::<Selector>).transpose()?;
        commands::preview::run(
            &self.store,
            &selector,
            theme.as_ref(),
            &self.config.date_format,
            output,
        )
    }

    pub fn export_posts<I: AsRef<str>>(
        &self,
        selectors: &[I],
        output: Option<&Path>,
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        let cwd = std::env::current_dir()?;
        commands::export::run(
            &self.store,
            &selectors,
            &cwd,
            output,
            &self.config.date_format,
        )
    }

    // --- Categories ---

    pub fn list_categories(&self) -> Result<CmdResult> {
        commands::categories::list(&self.store)
    }

    pub fn add_category(&mut self, name: &str, description: Option<&str>) -> Result<CmdResult> {
        commands::categories::add(&mut self.store, name, description)
    }

    pub fn edit_category(
        &mut self,
        selector: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<CmdResult> {
        let selector = selector.parse::<Selector>()?;
        commands::categories::edit(&mut self.store, &selector, name, description)
    }

    pub fn delete_category(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = selector.parse::<Selector>()?;
        commands::categories::delete(&mut self.store, &selector)
    }

    // --- Themes ---

    pub fn list_themes(&self) -> Result<CmdResult> {
        commands::themes::list(&self.store)
    }

    pub fn show_theme(&self, selector: Option<&str>) -> Result<CmdResult> {
        let selector = selector.map(str::parse::<Selector>).transpose()?;
        commands::themes::show(&self.store, selector.as_ref())
    }

    pub fn add_theme(&mut self, fields: ThemeFields) -> Result<CmdResult> {
        commands::themes::add(&mut self.store, fields)
    }

    pub fn edit_theme(&mut self, selector: &str, fields: ThemeFields) -> Result<CmdResult> {
        let selector = selector.parse::<Selector>()?;
        commands::themes::edit(&mut self.store, &selector, fields)
    }

    pub fn activate_theme(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = selector.parse::<Selector>()?;
        commands::themes::activate(&mut self.store, &selector)
    }

    pub fn delete_theme(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = selector.parse::<Selector>()?;
        commands::themes::delete(&mut self.store, &selector)
    }

    // --- Config ---

    pub fn configure(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<Selector>> {
    inputs.iter().map(|s| s.as_ref().parse()).collect()
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::create::PostDraft;
pub use crate::commands::list::{PostListOptions, SortDirection, SortField};
pub use crate::commands::themes::ThemeFields;
pub use crate::commands::update::PostUpdate;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
