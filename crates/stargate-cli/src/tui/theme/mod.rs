//! Portal color themes.

use ratatui::style::{Color, Modifier, Style};

use stargate_core::portal::{SessionState, StatusKind};

mod dark;
mod light;

/// Colors for the portal screen.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name
    pub name: String,

    /// Accent color for titles and focus
    pub accent: Color,

    // status text
    /// Successful transfer
    pub success: Color,
    /// Notices that need attention
    pub warning: Color,
    /// Failed transfer or rejected submission
    pub error: Color,
    /// Progress messages
    pub info: Color,

    // drop zone
    /// Drop zone border with nothing selected
    pub portal_idle: Color,
    /// Drop zone while a drag hovers over it
    pub portal_hover: Color,
    /// Drop zone holding a selected file
    pub portal_ready: Color,
    /// Drop zone while a transfer is in flight
    pub portal_busy: Color,

    /// Border color (unfocused)
    pub border: Color,
    /// Border color (focused)
    pub border_focused: Color,
    /// Highlight background for the selected browser row
    pub highlight: Color,

    /// Primary text color
    pub text_primary: Color,
    /// Secondary text color
    pub text_secondary: Color,
    /// Muted/disabled text color
    pub text_muted: Color,
}

impl Theme {
    /// Create the dark theme.
    pub fn dark() -> Self {
        dark::theme()
    }

    /// Create the light theme.
    pub fn light() -> Self {
        light::theme()
    }

    /// Create a theme by name. Unknown names fall back to dark.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Drop zone border color for a session state.
    pub const fn portal_color(&self, state: SessionState) -> Color {
        match state {
            SessionState::Idle => self.portal_idle,
            SessionState::DragHover => self.portal_hover,
            SessionState::FileReady => self.portal_ready,
            SessionState::Processing => self.portal_busy,
        }
    }

    /// Style for status text of the given kind.
    pub fn status_style(&self, kind: StatusKind) -> Style {
        match kind {
            StatusKind::Info => Style::default().fg(self.info),
            StatusKind::Success => Style::default()
                .fg(self.success)
                .add_modifier(Modifier::BOLD),
            StatusKind::Error => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        assert_eq!(Theme::from_name("dark").name, "dark");
        assert_eq!(Theme::from_name("LIGHT").name, "light");
        assert_eq!(Theme::from_name("unknown").name, "dark");
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default().name, "dark");
    }

    #[test]
    fn test_portal_color_follows_state() {
        let theme = Theme::dark();
        assert_eq!(theme.portal_color(SessionState::Idle), theme.portal_idle);
        assert_eq!(theme.portal_color(SessionState::DragHover), theme.portal_hover);
        assert_eq!(theme.portal_color(SessionState::Processing), theme.portal_busy);
    }

    #[test]
    fn test_status_style_colors() {
        let theme = Theme::light();
        assert_eq!(theme.status_style(StatusKind::Error).fg, Some(theme.error));
        assert_eq!(theme.status_style(StatusKind::Success).fg, Some(theme.success));
    }
}
