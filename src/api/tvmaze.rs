//! TVMaze API client
//!
//! Provides show search and per-show episode listings.
//! API docs: https://www.tvmaze.com/api

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{Episode, Show, MISSING_IMAGE_URL};

/// TVMaze API error types
#[derive(Error, Debug)]
pub enum TvMazeError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TVMaze API client
pub struct TvMazeClient {
    base_url: String,
    client: reqwest::Client,
}

impl TvMazeClient {
    /// Create a new client against the public TVMaze API
    pub fn new() -> Self {
        Self::with_base_url("https://api.tvmaze.com")
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Make a GET request and deserialize the JSON body.
    ///
    /// Failures propagate to the caller; there is no retry.
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(TvMazeError::RequestFailed)?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await.map_err(TvMazeError::RequestFailed)?;
                let parsed: T = serde_json::from_str(&body)
                    .map_err(|e| TvMazeError::InvalidResponse(format!("JSON parse error: {}", e)))?;
                Ok(parsed)
            }
            StatusCode::NOT_FOUND => Err(TvMazeError::NotFound.into()),
            status => Err(TvMazeError::ServerError(status.as_u16()).into()),
        }
    }

    /// Search for shows matching a free-text term.
    ///
    /// The term may be empty; the request is issued either way. An empty
    /// upstream result set yields an empty Vec, not an error. Every returned
    /// [`Show`] has a non-empty `image`: when the upstream record has none,
    /// the fixed placeholder URL is substituted.
    pub async fn search_shows(&self, term: &str) -> Result<Vec<Show>> {
        let endpoint = format!("/search/shows?q={}", urlencoding::encode(term));
        let entries: Vec<SearchEntryRaw> = self.get(&endpoint).await?;
        Ok(entries.into_iter().map(|e| e.into_show()).collect())
    }

    /// Get the full episode list for a show.
    pub async fn episodes(&self, show_id: u64) -> Result<Vec<Episode>> {
        let endpoint = format!("/shows/{}/episodes", show_id);
        let entries: Vec<EpisodeRaw> = self.get(&endpoint).await?;
        Ok(entries.into_iter().map(|e| e.into_episode()).collect())
    }
}

impl Default for TvMazeClient {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchEntryRaw {
    show: ShowRaw,
}

impl SearchEntryRaw {
    fn into_show(self) -> Show {
        let ShowRaw {
            id,
            name,
            summary,
            image,
        } = self.show;

        Show {
            id,
            name,
            summary: summary.unwrap_or_default(),
            image: image
                .map(|i| i.medium)
                .unwrap_or_else(|| MISSING_IMAGE_URL.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ShowRaw {
    id: u64,
    name: String,
    summary: Option<String>,
    image: Option<ImageRaw>,
}

#[derive(Debug, Deserialize)]
struct ImageRaw {
    medium: String,
}

#[derive(Debug, Deserialize)]
struct EpisodeRaw {
    id: u64,
    name: String,
    season: u32,
    number: u32,
}

impl EpisodeRaw {
    fn into_episode(self) -> Episode {
        Episode {
            id: self.id,
            name: self.name,
            season: self.season,
            number: self.number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_with_image_uses_medium_url() {
        let entry = SearchEntryRaw {
            show: ShowRaw {
                id: 139,
                name: "Girls".to_string(),
                summary: Some("<p>Comedy</p>".to_string()),
                image: Some(ImageRaw {
                    medium: "https://static.tvmaze.com/girls.jpg".to_string(),
                }),
            },
        };

        let show = entry.into_show();
        assert_eq!(show.image, "https://static.tvmaze.com/girls.jpg");
        assert_eq!(show.summary, "<p>Comedy</p>");
    }

    #[test]
    fn test_entry_without_image_uses_placeholder() {
        let entry = SearchEntryRaw {
            show: ShowRaw {
                id: 7,
                name: "Obscure Show".to_string(),
                summary: None,
                image: None,
            },
        };

        let show = entry.into_show();
        assert_eq!(show.image, MISSING_IMAGE_URL);
        assert!(!show.image.is_empty());
    }
}
