//! Target address field.

use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::state::TargetInputState;
use crate::tui::theme::Theme;

const PLACEHOLDER: &str = "e.g. 192.168.1.42";

/// Single-line input for the peer address.
pub struct TargetInput;

impl TargetInput {
    /// Render the field, placing the terminal cursor when focused.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        input: &TargetInputState,
        focused: bool,
        theme: &Theme,
    ) {
        let border_style = if focused {
            Style::default().fg(theme.border_focused)
        } else {
            Style::default().fg(theme.border)
        };

        let block = Block::default()
            .title(" Target IP ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);

        let width = inner.width as usize;
        let (visible, cursor_col) = visible_window(&input.value, input.cursor, width);

        let text = if input.value.is_empty() && !focused {
            Span::styled(PLACEHOLDER, Style::default().fg(theme.text_muted))
        } else {
            Span::styled(visible, Style::default().fg(theme.text_primary))
        };

        frame.render_widget(Paragraph::new(text).block(block), area);

        if focused && inner.width > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let x = inner.x + cursor_col as u16;
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }
}

/// Slice of `value` that fits in `width` columns with the cursor on
/// screen, and the cursor's column within that slice.
///
/// Counts characters, so wide glyphs may overflow by a column or two.
pub fn visible_window(value: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }

    // one column is kept for the cursor past the last character
    let start = (cursor + 1).saturating_sub(width);
    let visible: String = value.chars().skip(start).take(width).collect();
    (visible, cursor - start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_value_is_shown_whole() {
        assert_eq!(visible_window("10.0.0.1", 8, 20), ("10.0.0.1".to_string(), 8));
        assert_eq!(visible_window("10.0.0.1", 0, 20), ("10.0.0.1".to_string(), 0));
    }

    #[test]
    fn test_long_value_scrolls_with_cursor() {
        let value = "fe80::1ff:fe23:4567:890a";
        let (visible, col) = visible_window(value, value.len(), 10);
        assert_eq!(visible, "4567:890a");
        assert_eq!(col, 9);

        let (visible, col) = visible_window(value, 0, 10);
        assert_eq!(visible, "fe80::1ff:");
        assert_eq!(col, 0);
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(visible_window("abc", 2, 0), (String::new(), 0));
    }
}
