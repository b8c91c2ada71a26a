//! Dark theme definition.

use ratatui::style::Color;

use super::Theme;

/// Create the dark theme.
pub fn theme() -> Theme {
    Theme {
        name: "dark".to_string(),

        accent: Color::Cyan,

        success: Color::Green,
        warning: Color::Yellow,
        error: Color::Red,
        info: Color::LightBlue,

        portal_idle: Color::DarkGray,
        portal_hover: Color::Magenta,
        portal_ready: Color::Cyan,
        portal_busy: Color::Yellow,

        border: Color::DarkGray,
        border_focused: Color::Cyan,
        highlight: Color::Rgb(70, 70, 100),

        text_primary: Color::White,
        text_secondary: Color::Gray,
        text_muted: Color::DarkGray,
    }
}
