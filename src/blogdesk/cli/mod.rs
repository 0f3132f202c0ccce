//! # CLI Behavior
//!
//! The terminal client for blogdesk. For the layering, see the library docs.
//!
//! ## Naked Execution (`blogdesk`)
//!
//! Running `blogdesk` with no arguments lists posts, newest first.
//!
//! ## Selecting records
//!
//! Every command that targets a post, category or theme takes either the
//! number printed by the matching `list` command or the record id:
//!
//! ```text
//! blogdesk post publish 2
//! blogdesk category delete cat-2
//! blogdesk theme activate elegant
//! ```
//!
//! ## Post content
//!
//! `post new` and `post edit` take the body from `--content`, or from
//! `--file PATH` where `-` reads stdin:
//!
//! ```text
//! cat draft.md | blogdesk post new "Trip report" --file - --category cat-3
//! ```
//!
//! ## Output streams
//!
//! Results go to stdout, logs and errors to stderr. `preview` without
//! `--output` writes the HTML page to stdout.
//!
//! ## Environment
//!
//! - `BLOGDESK_HOME`: data directory, unless `--data-dir` is given
//! - `BLOGDESK_LOG`: `tracing` filter directive (default `warn`, `debug` with `-v`)

mod commands;
mod print;
mod setup;

pub use commands::run;
