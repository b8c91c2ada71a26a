//! Light theme definition.

use ratatui::style::Color;

use super::Theme;

/// Create the light theme.
pub fn theme() -> Theme {
    Theme {
        name: "light".to_string(),

        accent: Color::Blue,

        success: Color::Rgb(0, 128, 0),
        warning: Color::Rgb(180, 120, 0),
        error: Color::Rgb(200, 0, 0),
        info: Color::Blue,

        portal_idle: Color::Gray,
        portal_hover: Color::Rgb(150, 0, 150),
        portal_ready: Color::Blue,
        portal_busy: Color::Rgb(180, 120, 0),

        border: Color::Gray,
        border_focused: Color::Blue,
        highlight: Color::Rgb(200, 200, 230),

        text_primary: Color::Black,
        text_secondary: Color::DarkGray,
        text_muted: Color::Gray,
    }
}
