//! Theme and Colors
//!
//! Clarify's palette: an indigo brand accent on neutral slate, with amber
//! for the near-limit counter and the usual red/green for outcomes.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Brand
// ============================================================================

/// Brand accent - indigo
pub const BRAND_INDIGO: Color = Color::Rgb(99, 102, 241);

/// Softer accent for the loading scan line
pub const BRAND_INDIGO_SOFT: Color = Color::Rgb(165, 180, 252);

// ============================================================================
// UI Colors
// ============================================================================

/// Primary text
pub const TEXT: Color = Color::Rgb(226, 232, 240);

/// Secondary/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 116, 139);

/// Panel borders
pub const BORDER: Color = Color::Rgb(51, 65, 85);

/// Counter above 90% of the limit
pub const WARNING_AMBER: Color = Color::Rgb(245, 158, 11);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(239, 68, 68);

/// Success green
pub const SUCCESS_GREEN: Color = Color::Rgb(34, 197, 94);

// ============================================================================
// Styles
// ============================================================================

/// Header title
pub fn title() -> Style {
    Style::default()
        .fg(BRAND_INDIGO)
        .add_modifier(Modifier::BOLD)
}

/// Body text
pub fn text() -> Style {
    Style::default().fg(TEXT)
}

/// Hints, placeholders and labels
pub fn dim() -> Style {
    Style::default().fg(DIM_GRAY)
}

/// Selected tone toggle
pub fn tone_selected() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(BRAND_INDIGO)
        .add_modifier(Modifier::BOLD)
}

/// The original text once a rewrite is shown
pub fn before() -> Style {
    Style::default()
        .fg(DIM_GRAY)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Panel border, accented when focused
pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(BRAND_INDIGO)
    } else {
        Style::default().fg(BORDER)
    }
}
