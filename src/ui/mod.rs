//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout.

pub mod episodes;
pub mod shows;
pub mod theme;

pub use theme::Theme;
