//! Send control and status line.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use stargate_core::portal::StatusMessage;

use crate::tui::theme::Theme;

const SEND_LABEL: &str = " Send ";

/// The send button next to the status text.
pub struct Controls;

impl Controls {
    /// Render the button and the status line.
    ///
    /// The button reads as disabled whenever a submission would be refused.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        send_enabled: bool,
        status: Option<&StatusMessage>,
        theme: &Theme,
    ) {
        #[allow(clippy::cast_possible_truncation)]
        let button_width = SEND_LABEL.len() as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(button_width + 1), Constraint::Min(0)])
            .split(area);

        frame.render_widget(Paragraph::new(send_button(send_enabled, theme)), chunks[0]);

        if let Some(status) = status {
            let line = Line::from(Span::styled(
                status.text.as_str(),
                theme.status_style(status.kind),
            ));
            frame.render_widget(Paragraph::new(line), chunks[1]);
        }
    }
}

fn send_button(enabled: bool, theme: &Theme) -> Line<'static> {
    let style = if enabled {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::DIM)
    };

    Line::from(vec![
        Span::styled("[", Style::default().fg(theme.border)),
        Span::styled(SEND_LABEL, style),
        Span::styled("]", Style::default().fg(theme.border)),
    ])
}
