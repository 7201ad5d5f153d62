//! ShowTUI - Terminal browser for TV show search and episode lists
//!
//! A terminal interface for searching TV shows and browsing their episode
//! lists, backed by the TVMaze API. Simple. Fast. Keyboard-driven.
//!
//! # Modules
//!
//! - `models` - Show and Episode records
//! - `api` - TVMaze API client
//! - `ui` - TUI components
//! - `app` - Application state and navigation
//! - `cli` - Command-line interface for scripting
//! - `commands` - CLI command handlers
//! - `config` - Config file handling

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use api::TvMazeClient;
pub use app::{App, AppAction, AppEvent};
pub use models::{Episode, Show};
