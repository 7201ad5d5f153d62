//! Data structures and types for ShowTUI
//!
//! Two record shapes flow through the whole application:
//! - **Show**: a TV series as returned by the TVMaze search endpoint
//! - **Episode**: a single episode belonging to a show
//!
//! Both are exact projections of the upstream payload; nothing beyond these
//! fields is retained.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder image URL used when the upstream record carries no image.
pub const MISSING_IMAGE_URL: &str = "https://tinyurl.com/tv-missing";

/// A TV series record from the TVMaze search endpoint.
///
/// `summary` may contain HTML markup and is kept verbatim; the UI strips
/// tags at render time. `image` is never empty: when the upstream record
/// has no image, [`MISSING_IMAGE_URL`] is substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: u64,
    pub name: String,
    pub summary: String,
    pub image: String,
}

impl fmt::Display for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id {})", self.name, self.id)
    }
}

/// A single episode of a show, identified by season and number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub season: u32,
    pub number: u32,
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (season {}, number {})",
            self.name, self.season, self.number
        )
    }
}
