//! CLI - Command Line Interface for ShowTUI
//!
//! Designed for scripting and automation. Every TUI action is scriptable
//! and all output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Search for shows
//! showtui search "girls" --json
//!
//! # List episodes for a show
//! showtui episodes 139
//! showtui episodes 139 --limit 10 --json
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Show not found
    ShowNotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// ShowTUI - Terminal browser for TV show search and episode lists
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "showtui",
    version,
    author = "Gorka & Hermes",
    about = "Terminal browser for TV show search and episode lists",
    long_about = "A terminal interface for searching TV shows and browsing \
                  their episode lists, backed by the TVMaze API.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  showtui                      Launch interactive TUI\n\
                  showtui search \"girls\"       Search for shows\n\
                  showtui episodes 139         List a show's episodes\n\
                  showtui search bones --json  Machine-readable output"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// List episodes for a show
    #[command(visible_alias = "ep")]
    Episodes(EpisodesCmd),
}

// =============================================================================
// Search Command
// =============================================================================

/// Search for TV shows by name
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search term. An empty term is allowed and queries the API as-is.
    #[arg(default_value = "")]
    pub term: String,

    /// Maximum number of results (defaults to config search_limit, then 20)
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

// =============================================================================
// Episodes Command
// =============================================================================

/// List the full episode roster for a show
#[derive(Args, Debug)]
pub struct EpisodesCmd {
    /// TVMaze show id (from `search` output)
    #[arg(required = true)]
    pub show_id: u64,

    /// Maximum number of episodes to print (0 = all)
    #[arg(long, short = 'l', default_value = "0")]
    pub limit: usize,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            // For non-JSON, caller should handle formatting
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }

    /// Print a plain result line (suppressed in JSON mode)
    pub fn line(&self, msg: impl std::fmt::Display) {
        if !self.json {
            println!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["showtui", "search", "girls"]);
        assert!(cli.is_cli_mode());
        if let Some(Command::Search(cmd)) = cli.command {
            assert_eq!(cmd.term, "girls");
            // Unset flag stays None so config-level defaults can apply
            assert_eq!(cmd.limit, None);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_search_empty_term_allowed() {
        let cli = Cli::parse_from(["showtui", "search"]);
        if let Some(Command::Search(cmd)) = cli.command {
            assert_eq!(cmd.term, "");
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_episodes_command() {
        let cli = Cli::parse_from(["showtui", "episodes", "139", "--limit", "10"]);
        if let Some(Command::Episodes(cmd)) = cli.command {
            assert_eq!(cmd.show_id, 139);
            assert_eq!(cmd.limit, 10);
        } else {
            panic!("Expected Episodes command");
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["showtui", "--json", "--quiet", "search", "test"]);
        assert!(cli.json);
        assert!(cli.quiet);
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::parse_from(["showtui", "s", "bones"]);
        assert!(matches!(cli.command, Some(Command::Search(_))));

        let cli = Cli::parse_from(["showtui", "ep", "1"]);
        assert!(matches!(cli.command, Some(Command::Episodes(_))));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::ShowNotFound), 4);
    }
}
