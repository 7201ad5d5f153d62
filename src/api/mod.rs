//! API clients for external services
//!
//! - TVMaze: show search and episode metadata

pub mod tvmaze;

pub use tvmaze::TvMazeClient;
