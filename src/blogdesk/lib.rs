//! # Blogdesk Architecture
//!
//! Blogdesk is a **UI-agnostic blog management library**: posts, categories
//! and display themes kept in a small key-value store, plus a themed HTML
//! preview. The `blogdesk` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses selectors (indexes or ids)                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, listing, publishing, previews, export        │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - BlogStore: collection rules, cascades, theme fallback    │
//! │  - StorageBackend: FsBackend (production), MemBackend       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward, code never writes to stdout or stderr and never
//! exits the process. Diagnostics go through `tracing`; the binary decides
//! where they end up.
//!
//! ## Testing
//!
//! 1. **Store and commands**: unit tests against `MemBackend` fixtures
//!    (`store::fixtures`, also exported with the `test_utils` feature).
//! 2. **API**: dispatch tests.
//! 3. **CLI**: end-to-end runs of the binary in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: one module per operation
//! - [`store`]: persistence rules and backends
//! - [`model`]: `Post`, `Category`, `Theme`
//! - [`seed`]: default themes and sample categories
//! - [`index`]: display numbering and selectors
//! - [`markup`]: the lightweight markup renderer
//! - [`preview`]: the standalone HTML page
//! - [`config`]: `config.json` settings
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod markup;
pub mod model;
pub mod preview;
pub mod seed;
pub mod store;
