//! Keybinding reference.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::layout::centered_rect;
use crate::tui::theme::Theme;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "PORTAL",
        &[
            ("Enter / o", "Browse for a file"),
            ("paste / drag", "Drop a file onto the portal"),
            ("s", "Send"),
            ("t", "Edit the target address"),
        ],
    ),
    (
        "TARGET FIELD",
        &[
            ("Enter", "Send"),
            ("Ctrl+U", "Clear"),
            ("Esc", "Back to the portal"),
        ],
    ),
    (
        "FILE BROWSER",
        &[
            ("j / k", "Move"),
            ("Enter", "Open folder or pick file"),
            ("Backspace", "Parent folder"),
            (".", "Toggle hidden files"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "ANYWHERE",
        &[
            ("Ctrl+S", "Send"),
            ("Ctrl+O", "Browse"),
            ("Tab", "Switch focus"),
            ("L", "Toggle log"),
            ("Q / Ctrl+C", "Quit"),
        ],
    ),
];

/// Help overlay component.
pub struct HelpOverlay;

impl HelpOverlay {
    /// Render the overlay centered over `area`.
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let overlay = centered_rect(70, 80, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .title(" Help - Esc to close ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));

        let paragraph = Paragraph::new(help_lines(theme))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, overlay);
    }
}

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let key = Style::default().fg(theme.warning);
    let desc = Style::default().fg(theme.text_primary);

    let mut lines = Vec::new();
    for (title, bindings) in SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(format!(" {title}"), heading)));
        for (keys, what) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<14}"), key),
                Span::styled(*what, desc),
            ]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_is_listed() {
        let lines = help_lines(&Theme::dark());
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        for (title, _) in SECTIONS {
            assert!(text.iter().any(|t| t.trim() == *title));
        }
        assert!(text.iter().any(|t| t.contains("Ctrl+S")));
    }
}
