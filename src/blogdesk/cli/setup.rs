use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blogdesk", bin_name = "blogdesk", version)]
#[command(
    about = "Draft, categorize, theme and preview blog posts from the terminal",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the blog data (default: $BLOGDESK_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed sample categories and default themes where missing
    Init,

    /// Manage blog posts
    #[command(subcommand)]
    Post(PostCommands),

    /// Manage categories
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Manage themes
    #[command(subcommand)]
    Theme(ThemeCommands),

    /// Render a post as a themed HTML page
    Preview {
        /// Post index or id
        selector: String,

        /// Write the page to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Theme index or id (default: the active theme)
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Export posts as markdown files in a .tar.gz archive
    Export {
        /// Post indexes or ids (default: all posts)
        selectors: Vec<String>,

        /// Archive path (default: blogdesk-<timestamp>.tar.gz in the current dir)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (excerpt-length, date-format)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SortArg {
    Title,
    Created,
    Updated,
    Published,
}

#[derive(Subcommand, Debug)]
pub enum PostCommands {
    /// List posts
    #[command(alias = "ls")]
    List {
        /// Match title, content or category names
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long, value_enum, default_value = "updated")]
        sort: SortArg,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,

        /// Only published posts
        #[arg(long, conflicts_with = "drafts")]
        published: bool,

        /// Only drafts
        #[arg(long)]
        drafts: bool,
    },

    /// Create a post
    #[command(alias = "n")]
    New {
        title: String,

        #[command(flatten)]
        fields: PostFieldArgs,
    },

    /// Edit a post
    #[command(alias = "e")]
    Edit {
        /// Post index or id
        selector: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: PostFieldArgs,

        /// Mark as draft
        #[arg(long, conflicts_with = "publish")]
        draft: bool,
    },

    /// Show posts in full
    #[command(alias = "v")]
    View {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Delete posts
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Publish posts
    Publish {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Return posts to draft
    Unpublish {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct PostFieldArgs {
    /// Post body (markdown-like markup)
    #[arg(short, long, conflicts_with = "file")]
    pub content: Option<String>,

    /// Read the body from a file ("-" for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Excerpt (default: generated from the content)
    #[arg(long)]
    pub excerpt: Option<String>,

    /// Cover image URL
    #[arg(long, value_name = "URL")]
    pub cover: Option<String>,

    /// Category id (repeatable)
    #[arg(long = "category", value_name = "ID")]
    pub categories: Vec<String>,

    /// Tag (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Publish immediately
    #[arg(long)]
    pub publish: bool,

    /// Publication date, YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories
    #[command(alias = "ls")]
    List,

    /// Add a category
    Add {
        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Rename a category or change its description
    Edit {
        selector: String,

        #[arg(short, long)]
        name: Option<String>,

        /// New description (empty to clear)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a category and remove it from every post
    #[command(alias = "rm")]
    Delete { selector: String },
}

#[derive(Args, Debug, Default)]
pub struct ThemeFieldArgs {
    #[arg(long, value_name = "HEX")]
    pub primary: Option<String>,

    #[arg(long, value_name = "HEX")]
    pub secondary: Option<String>,

    #[arg(long, value_name = "HEX")]
    pub text: Option<String>,

    #[arg(long, value_name = "HEX")]
    pub background: Option<String>,

    /// CSS font-family value
    #[arg(long)]
    pub font: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// List themes
    #[command(alias = "ls")]
    List,

    /// Show one theme (default: the active one)
    Show { selector: Option<String> },

    /// Add a theme
    Add {
        name: String,

        #[command(flatten)]
        fields: ThemeFieldArgs,

        /// Make it the active theme
        #[arg(long)]
        activate: bool,
    },

    /// Edit a theme
    Edit {
        selector: String,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: ThemeFieldArgs,
    },

    /// Make a theme the active one
    Activate { selector: String },

    /// Delete a theme (the active theme cannot be deleted)
    #[command(alias = "rm")]
    Delete { selector: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_post_new_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "blogdesk", "post", "new", "Hello", "--content", "Body", "--category", "cat-1",
            "--category", "cat-2", "--tag", "rust", "--publish",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Post(PostCommands::New { title, fields })) => {
                assert_eq!(title, "Hello");
                assert_eq!(fields.content.as_deref(), Some("Body"));
                assert_eq!(fields.categories, vec!["cat-1", "cat-2"]);
                assert_eq!(fields.tags, vec!["rust"]);
                assert!(fields.publish);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn data_dir_is_global() {
        let cli =
            Cli::try_parse_from(["blogdesk", "theme", "list", "--data-dir", "/tmp/b"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/b")));
    }

    #[test]
    fn content_and_file_conflict() {
        let err = Cli::try_parse_from([
            "blogdesk", "post", "new", "T", "--content", "C", "--file", "f.md",
        ]);
        assert!(err.is_err());
    }
}
