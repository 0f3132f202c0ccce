//! # blogdesk binary
//!
//! Thin on purpose: the CLI lives in `cli/`, this file only calls
//! `cli::run()` and turns an error into a message and exit code 1.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/)                                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - context wiring + dispatch (commands.rs)                  │
//! │  - terminal output (print.rs)                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API + Commands + Store (the blogdesk library)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
