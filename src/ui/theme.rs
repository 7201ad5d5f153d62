//! Color palette and style helpers for the ShowTUI terminal interface.

use ratatui::style::{Color, Modifier, Style};

/// ShowTUI color palette: muted teal/amber on a near-black background.
pub struct Theme;

impl Theme {
    /// Background: #101014 (near black)
    pub const BACKGROUND: Color = Color::Rgb(0x10, 0x10, 0x14);

    /// Primary: #5fd7af (teal)
    pub const PRIMARY: Color = Color::Rgb(0x5f, 0xd7, 0xaf);

    /// Secondary: #af87ff (violet)
    pub const SECONDARY: Color = Color::Rgb(0xaf, 0x87, 0xff);

    /// Accent: #ffd75f (amber)
    pub const ACCENT: Color = Color::Rgb(0xff, 0xd7, 0x5f);

    /// Text: #d0d0d0 (soft white)
    pub const TEXT: Color = Color::Rgb(0xd0, 0xd0, 0xd0);

    /// Dim: #4a4a55 (muted)
    pub const DIM: Color = Color::Rgb(0x4a, 0x4a, 0x55);

    /// Success: #87ff87 (green)
    pub const SUCCESS: Color = Color::Rgb(0x87, 0xff, 0x87);

    /// Error: #ff5f6a (red)
    pub const ERROR: Color = Color::Rgb(0xff, 0x5f, 0x6a);

    /// Slightly lighter background for input fields and the status bar
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x1a, 0x1a, 0x22);

    /// Border color (dim teal)
    pub const BORDER: Color = Color::Rgb(0x3a, 0x7d, 0x68);

    /// Border color when focused (full teal)
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Highlighted row (inverted with primary color)
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text style (violet)
    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Accent text style (amber)
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Loading/spinner indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Show summary text
    pub fn summary() -> Style {
        Style::default().fg(Self::DIM)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Calculate contrast ratio between two colors
/// Returns a value between 1 (same color) and 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Check if a foreground/background pair meets WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// Check if a foreground/background pair meets WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
