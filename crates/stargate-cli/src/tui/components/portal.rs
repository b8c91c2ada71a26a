//! The drop zone.
//!
//! One bordered panel whose color and content follow the session state:
//! a hint when idle, the file when one is ready, a glow while a drag
//! hovers, and a spinner while the transfer runs.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

use stargate_core::portal::{SelectedFile, SessionState};

use super::spinner::{Spinner, SpinnerState, SpinnerStyle};
use crate::tui::theme::Theme;

/// What the drop zone needs to draw itself.
pub struct PortalView<'a> {
    /// Session state
    pub state: SessionState,
    /// File picked, dropped or in flight
    pub file: Option<&'a SelectedFile>,
    /// Target of the transfer in flight
    pub target: Option<&'a str>,
    /// Whether the drop zone has keyboard focus
    pub focused: bool,
    /// Whether the file dialog is open
    pub picking: bool,
    /// Spinner frames to use while processing
    pub spinner_style: SpinnerStyle,
}

/// Drop zone panel.
pub struct PortalPanel;

impl PortalPanel {
    /// Render the drop zone.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        view: &PortalView<'_>,
        spinner: &SpinnerState,
        theme: &Theme,
    ) {
        let color = theme.portal_color(view.state);
        let border_type = match view.state {
            SessionState::DragHover => BorderType::Double,
            SessionState::Processing => BorderType::Thick,
            SessionState::Idle | SessionState::FileReady => BorderType::Rounded,
        };
        let mut border_style = Style::default().fg(color);
        if view.focused {
            border_style = border_style.add_modifier(Modifier::BOLD);
        }

        let block = Block::default()
            .title(" Portal ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Self::content(view, spinner, theme);

        // vertical centering
        let pad = (inner.height as usize).saturating_sub(lines.len()) / 2;
        let mut padded = vec![Line::default(); pad];
        padded.append(&mut lines);

        let paragraph = Paragraph::new(padded)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn content<'a>(
        view: &PortalView<'a>,
        spinner: &SpinnerState,
        theme: &Theme,
    ) -> Vec<Line<'a>> {
        let muted = Style::default().fg(theme.text_muted);
        let file_lines = |file: &'a SelectedFile| {
            vec![
                Line::from(Span::styled(
                    file.name(),
                    Style::default()
                        .fg(theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(file.as_str(), muted)),
            ]
        };

        match view.state {
            SessionState::DragHover => vec![Line::from(Span::styled(
                "Release to drop",
                Style::default()
                    .fg(theme.portal_hover)
                    .add_modifier(Modifier::BOLD),
            ))],
            SessionState::Processing => {
                let mut lines = vec![Spinner::new("Transferring")
                    .animation_style(view.spinner_style)
                    .spinner_style(Style::default().fg(theme.portal_busy))
                    .text_style(Style::default().fg(theme.text_secondary))
                    .line(spinner)];
                if let Some(file) = view.file {
                    lines.extend(file_lines(file));
                }
                if let Some(target) = view.target {
                    lines.push(Line::from(vec![
                        Span::styled("to ", muted),
                        Span::styled(target, Style::default().fg(theme.accent)),
                    ]));
                }
                lines
            }
            SessionState::FileReady => {
                let mut lines = match view.file {
                    Some(file) => file_lines(file),
                    None => Vec::new(),
                };
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "Drop or pick another file to replace it",
                    muted,
                )));
                lines
            }
            SessionState::Idle if view.picking => vec![Line::from(Span::styled(
                "Choosing a file...",
                Style::default().fg(theme.text_secondary),
            ))],
            SessionState::Idle => vec![
                Line::from(Span::styled(
                    "Drop a file here",
                    Style::default().fg(theme.text_secondary),
                )),
                Line::from(Span::styled("or press Enter to browse", muted)),
            ],
        }
    }
}
