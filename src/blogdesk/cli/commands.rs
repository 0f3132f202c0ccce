//! # CLI Layer
//!
//! One client of the blogdesk library, and the only code that touches the
//! terminal. It parses arguments, builds the [`BlogApi`] over an
//! [`FsBackend`], dispatches, and prints each `CmdResult`.
//!
//! Logging goes to stderr through `tracing-subscriber`, so stdout carries
//! only command output (an HTML preview can be piped straight to a file).

use super::print::{
    print_categories, print_full_posts, print_messages, print_posts, print_theme_detail,
    print_themes,
};
use super::setup::{
    CategoryCommands, Cli, Commands, PostCommands, PostFieldArgs, SortArg, ThemeCommands,
    ThemeFieldArgs,
};
use blogdesk::api::{
    BlogApi, ConfigAction, PostDraft, PostListOptions, PostUpdate, SortDirection, SortField,
    ThemeFields,
};
use blogdesk::config::BlogConfig;
use blogdesk::error::{BlogError, Result};
use blogdesk::store::fs_backend::FsBackend;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use directories::ProjectDirs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DATA_DIR_ENV: &str = "BLOGDESK_HOME";
const LOG_ENV: &str = "BLOGDESK_LOG";

struct AppContext {
    api: BlogApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Init) => handle_init(&mut ctx),
        Some(Commands::Post(cmd)) => match cmd {
            PostCommands::List {
                search,
                sort,
                asc,
                published,
                drafts,
            } => {
                let options = PostListOptions {
                    search,
                    sort: sort_field(sort),
                    direction: if asc {
                        SortDirection::Asc
                    } else {
                        SortDirection::Desc
                    },
                    published_only: published,
                    drafts_only: drafts,
                };
                handle_list(&mut ctx, options)
            }
            PostCommands::New { title, fields } => handle_new(&mut ctx, title, fields),
            PostCommands::Edit {
                selector,
                title,
                fields,
                draft,
            } => handle_edit(&mut ctx, selector, title, fields, draft),
            PostCommands::View { selectors } => handle_view(&mut ctx, selectors),
            PostCommands::Delete { selectors } => {
                let result = ctx.api.delete_posts(&selectors)?;
                print_messages(&result.messages);
                Ok(())
            }
            PostCommands::Publish { selectors } => {
                let result = ctx.api.publish_posts(&selectors)?;
                print_messages(&result.messages);
                Ok(())
            }
            PostCommands::Unpublish { selectors } => {
                let result = ctx.api.unpublish_posts(&selectors)?;
                print_messages(&result.messages);
                Ok(())
            }
        },
        Some(Commands::Category(cmd)) => handle_category(&mut ctx, cmd),
        Some(Commands::Theme(cmd)) => handle_theme(&mut ctx, cmd),
        Some(Commands::Preview {
            selector,
            output,
            theme,
        }) => handle_preview(&mut ctx, selector, output, theme),
        Some(Commands::Export { selectors, output }) => {
            let result = ctx.api.export_posts(&selectors, output.as_deref())?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, PostListOptions::default()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (as in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    debug!(dir = %data_dir.display(), "using data directory");

    let config = BlogConfig::load(&data_dir)?;
    let backend = FsBackend::open(&data_dir)?;
    Ok(AppContext {
        api: BlogApi::new(backend, data_dir, config),
    })
}

fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "blogdesk", "blogdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| BlogError::Config("Could not determine a data directory".to_string()))
}

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    println!("Data directory: {}", ctx.api.data_dir().display());
    Ok(())
}

fn handle_list(ctx: &mut AppContext, options: PostListOptions) -> Result<()> {
    let result = ctx.api.list_posts(&options)?;
    print_posts(&result.listed_posts, &result.categories);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.view_posts(&selectors)?;
    print_full_posts(
        &result.listed_posts,
        &result.categories,
        &ctx.api.config().date_format,
    );
    print_messages(&result.messages);
    Ok(())
}

fn handle_new(ctx: &mut AppContext, title: String, fields: PostFieldArgs) -> Result<()> {
    let content = read_content(&fields)?.unwrap_or_default();
    let draft = PostDraft {
        title,
        content,
        excerpt: fields.excerpt,
        cover_image: fields.cover,
        categories: fields.categories,
        tags: fields.tags,
        publish: fields.publish,
        published_at: fields.date.as_deref().map(parse_date).transpose()?,
    };
    let result = ctx.api.create_post(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    selector: String,
    title: Option<String>,
    fields: PostFieldArgs,
    draft: bool,
) -> Result<()> {
    let content = read_content(&fields)?;
    let publish = match (fields.publish, draft) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    };
    let update = PostUpdate {
        title,
        content,
        excerpt: fields.excerpt,
        cover_image: fields.cover,
        categories: (!fields.categories.is_empty()).then_some(fields.categories),
        tags: (!fields.tags.is_empty()).then_some(fields.tags),
        publish,
        published_at: fields.date.as_deref().map(parse_date).transpose()?,
    };
    let result = ctx.api.update_post(&selector, update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_category(ctx: &mut AppContext, cmd: CategoryCommands) -> Result<()> {
    let result = match cmd {
        CategoryCommands::List => {
            let result = ctx.api.list_categories()?;
            print_categories(&result.listed_categories);
            result
        }
        CategoryCommands::Add { name, description } => {
            ctx.api.add_category(&name, description.as_deref())?
        }
        CategoryCommands::Edit {
            selector,
            name,
            description,
        } => ctx
            .api
            .edit_category(&selector, name.as_deref(), description.as_deref())?,
        CategoryCommands::Delete { selector } => ctx.api.delete_category(&selector)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, cmd: ThemeCommands) -> Result<()> {
    let result = match cmd {
        ThemeCommands::List => {
            let result = ctx.api.list_themes()?;
            print_themes(&result.listed_themes, result.active_theme.as_ref());
            result
        }
        ThemeCommands::Show { selector } => {
            let result = ctx.api.show_theme(selector.as_deref())?;
            for entry in &result.listed_themes {
                let active = result
                    .active_theme
                    .as_ref()
                    .is_some_and(|a| a.id == entry.record.id);
                print_theme_detail(&entry.record, active);
            }
            result
        }
        ThemeCommands::Add {
            name,
            fields,
            activate,
        } => ctx.api.add_theme(ThemeFields {
            name: Some(name),
            activate,
            ..theme_fields(fields)
        })?,
        ThemeCommands::Edit {
            selector,
            name,
            fields,
        } => ctx.api.edit_theme(
            &selector,
            ThemeFields {
                name,
                ..theme_fields(fields)
            },
        )?,
        ThemeCommands::Activate { selector } => ctx.api.activate_theme(&selector)?,
        ThemeCommands::Delete { selector } => ctx.api.delete_theme(&selector)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_preview(
    ctx: &mut AppContext,
    selector: String,
    output: Option<PathBuf>,
    theme: Option<String>,
) -> Result<()> {
    let result = ctx
        .api
        .preview_post(&selector, theme.as_deref(), output.as_deref())?;
    if output.is_none() {
        if let Some(html) = &result.html {
            print!("{}", html);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.configure(action)?;
    print_messages(&result.messages);
    Ok(())
}

fn theme_fields(args: ThemeFieldArgs) -> ThemeFields {
    ThemeFields {
        primary: args.primary,
        secondary: args.secondary,
        text: args.text,
        background: args.background,
        font_family: args.font,
        ..ThemeFields::default()
    }
}

fn sort_field(arg: SortArg) -> SortField {
    match arg {
        SortArg::Title => SortField::Title,
        SortArg::Created => SortField::Created,
        SortArg::Updated => SortField::Updated,
        SortArg::Published => SortField::Published,
    }
}

/// Post body from `--content`, or from `--file` (`-` reads stdin).
fn read_content(fields: &PostFieldArgs) -> Result<Option<String>> {
    if let Some(content) = &fields.content {
        return Ok(Some(content.clone()));
    }
    match fields.file.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
        None => Ok(None),
    }
}

fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| BlogError::Api(format!("Invalid date (expected YYYY-MM-DD): {}", value)))
}
