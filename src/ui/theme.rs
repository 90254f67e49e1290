//! Color theme constants for the surimon UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

// ============================================================================
// Chrome
// ============================================================================

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color - white for titles and highlights
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Connected / succeeded
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Connecting / in progress
pub const COLOR_PENDING: Color = Color::Yellow;

pub const COLOR_ERROR: Color = Color::Red;

// ============================================================================
// Log lines
// ============================================================================

pub const COLOR_LOG_EVENT: Color = Color::Gray;

/// Non-JSON message shown raw
pub const COLOR_LOG_RAW: Color = Color::Yellow;

/// Transport errors appended to the log
pub const COLOR_LOG_ERROR: Color = Color::LightRed;

// ============================================================================
// Charts
// ============================================================================

pub const COLOR_BAR: Color = Color::Rgb(0, 122, 204); // blue #007ACC

pub const COLOR_LINE_RECEIVED: Color = Color::Rgb(4, 181, 117); // green #04B575

pub const COLOR_LINE_DROPPED: Color = Color::Red;

/// Category colors for pie and doughnut segments, cycled in order.
pub const SEGMENT_PALETTE: [Color; 8] = [
    Color::Rgb(0, 122, 204),
    Color::Rgb(4, 181, 117),
    Color::Rgb(255, 159, 64),
    Color::Rgb(153, 102, 255),
    Color::Rgb(255, 99, 132),
    Color::Rgb(255, 205, 86),
    Color::Rgb(75, 192, 192),
    Color::Gray,
];

pub fn segment_color(index: usize) -> Color {
    SEGMENT_PALETTE[index % SEGMENT_PALETTE.len()]
}
