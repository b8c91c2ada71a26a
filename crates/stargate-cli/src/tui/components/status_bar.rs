//! Status bar component.
//!
//! Shows the session state on the left and keybinding hints on the right.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use stargate_core::portal::SessionState;

use crate::tui::layout::LayoutMode;
use crate::tui::theme::Theme;

/// Status bar component.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        session: SessionState,
        mode: LayoutMode,
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(inner);

        let state = Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.portal_color(session))),
            Span::styled(
                state_label(session),
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(state), chunks[0]);

        let hints = match mode {
            LayoutMode::Full => hint_line(
                &[
                    ("Tab", "Focus"),
                    ("^O", "Browse"),
                    ("^S", "Send"),
                    ("?", "Help"),
                    ("Q", "Quit"),
                ],
                theme,
            ),
            LayoutMode::Compact => hint_line(&[("?", "Help"), ("^C", "Quit")], theme),
        };
        frame.render_widget(
            Paragraph::new(hints).alignment(Alignment::Right),
            chunks[1],
        );
    }
}

/// Human label for a session state.
fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "Idle",
        SessionState::FileReady => "Ready",
        SessionState::DragHover => "Drop to select",
        SessionState::Processing => "Transferring",
    }
}

fn hint_line(hints: &[(&'static str, &'static str)], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(
            format!("[{key}]"),
            Style::default().fg(theme.text_secondary),
        ));
        spans.push(Span::styled(
            format!(" {label}  "),
            Style::default().fg(theme.text_muted),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_labels() {
        assert_eq!(state_label(SessionState::Idle), "Idle");
        assert_eq!(state_label(SessionState::Processing), "Transferring");
    }

    #[test]
    fn test_hint_line_pairs() {
        let line = hint_line(&[("?", "Help"), ("Q", "Quit")], &Theme::dark());
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[0].content, "[?]");
        assert_eq!(line.spans[3].content, " Quit  ");
    }
}
