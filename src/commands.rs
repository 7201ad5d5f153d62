//! CLI Command Handlers
//!
//! Implements the CLI commands by calling the TVMaze client.
//! Each handler takes CLI args and Output, returns ExitCode.

use std::path::Path;

use crate::api::tvmaze::TvMazeError;
use crate::api::TvMazeClient;
use crate::cli::{EpisodesCmd, ExitCode, Output, SearchCmd};
use crate::config::Config;
use crate::ui::shows::strip_markup;

/// Load config, honoring an explicit --config path
fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(p) => Config::load_from(p).unwrap_or_default(),
        None => Config::load(),
    }
}

fn client_for(config: &Config) -> TvMazeClient {
    TvMazeClient::with_base_url(config.base_url())
}

/// Built-in search result limit when neither the flag nor config set one
const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Resolve the search limit: an explicit --limit wins over the config
/// default, which wins over the built-in default.
fn effective_limit(flag: Option<usize>, config: &Config) -> usize {
    flag.or(config.search_limit).unwrap_or(DEFAULT_SEARCH_LIMIT)
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, output: &Output, config_path: Option<&Path>) -> ExitCode {
    let config = load_config(config_path);
    let client = client_for(&config);

    output.info(format!("Searching for: {}", cmd.term));

    match client.search_shows(&cmd.term).await {
        Ok(mut shows) => {
            shows.truncate(effective_limit(cmd.limit, &config));

            if output.json {
                if let Err(e) = output.print(&shows) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else if shows.is_empty() {
                // An empty result set is still a successful search
                output.info("No shows found");
            } else {
                for show in &shows {
                    output.line(format!("{:>8}  {}", show.id, show.name));
                    let summary = strip_markup(&show.summary);
                    if !summary.is_empty() {
                        output.line(format!("          {}", summary));
                    }
                }
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Search failed: {}", e), ExitCode::NetworkError),
    }
}

// =============================================================================
// Episodes Command
// =============================================================================

pub async fn episodes_cmd(
    cmd: EpisodesCmd,
    output: &Output,
    config_path: Option<&Path>,
) -> ExitCode {
    let config = load_config(config_path);
    let client = client_for(&config);

    output.info(format!("Fetching episodes for show {}", cmd.show_id));

    match client.episodes(cmd.show_id).await {
        Ok(mut episodes) => {
            if cmd.limit > 0 {
                episodes.truncate(cmd.limit);
            }

            if output.json {
                if let Err(e) = output.print(&episodes) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else {
                for episode in &episodes {
                    output.line(episode);
                }
            }
            ExitCode::Success
        }
        Err(e) => match e.downcast_ref::<TvMazeError>() {
            Some(TvMazeError::NotFound) => output.error(
                format!("No show with id {}", cmd.show_id),
                ExitCode::ShowNotFound,
            ),
            _ => output.error(
                format!("Episode fetch failed: {}", e),
                ExitCode::NetworkError,
            ),
        },
    }
}
