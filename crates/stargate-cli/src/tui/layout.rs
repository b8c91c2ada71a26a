//! Portal screen layout.
//!
//! ```text
//! ┌────────────────────────────────┐
//! │ Header                         │
//! ├────────────────────────────────┤
//! │ Drop zone                      │
//! │                                │
//! ├────────────────────────────────┤
//! │ Target field                   │
//! │ [ Send ]  status line          │
//! ├────────────────────────────────┤
//! │ Log (optional)                 │
//! ├────────────────────────────────┤
//! │ Status bar                     │
//! └────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout mode based on terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Roomy terminal: bordered panels and full hints
    Full,
    /// Small terminal: tighter panels, short hints
    Compact,
}

impl LayoutMode {
    /// Determine layout mode from terminal size.
    pub fn from_size(width: u16, height: u16) -> Self {
        if width >= 60 && height >= 20 {
            LayoutMode::Full
        } else {
            LayoutMode::Compact
        }
    }
}

/// Computed layout areas for rendering
#[derive(Debug, Clone)]
pub struct ComputedLayout {
    /// Layout mode being used
    pub mode: LayoutMode,
    /// Header area (title bar)
    pub header: Rect,
    /// Drop zone
    pub portal: Rect,
    /// Target address field
    pub target: Rect,
    /// Send control and status text
    pub controls: Rect,
    /// Log panel area (if visible)
    pub log: Option<Rect>,
    /// Status bar area
    pub status: Rect,
}

impl ComputedLayout {
    /// Compute layout for the given terminal size.
    pub fn compute(size: Rect, log_visible: bool) -> Self {
        let mode = LayoutMode::from_size(size.width, size.height);
        let log_height = match mode {
            LayoutMode::Full => 8,
            LayoutMode::Compact => 5,
        };

        let mut constraints = vec![
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ];
        if log_visible {
            constraints.push(Constraint::Length(log_height));
        }
        constraints.push(Constraint::Length(2));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);

        let log = log_visible.then(|| chunks[4]);
        let status = chunks[chunks.len() - 1];

        ComputedLayout {
            mode,
            header: chunks[0],
            portal: chunks[1],
            target: chunks[2],
            controls: chunks[3],
            log,
            status,
        }
    }
}

/// Rect of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_mode_detection() {
        assert_eq!(LayoutMode::from_size(80, 24), LayoutMode::Full);
        assert_eq!(LayoutMode::from_size(60, 20), LayoutMode::Full);
        assert_eq!(LayoutMode::from_size(59, 24), LayoutMode::Compact);
        assert_eq!(LayoutMode::from_size(80, 19), LayoutMode::Compact);
    }

    #[test]
    fn test_computed_layout_basic() {
        let layout = ComputedLayout::compute(Rect::new(0, 0, 80, 24), false);

        assert_eq!(layout.mode, LayoutMode::Full);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.target.height, 3);
        assert_eq!(layout.controls.height, 1);
        assert_eq!(layout.status.height, 2);
        assert!(layout.portal.height >= 5);
        assert!(layout.log.is_none());
    }

    #[test]
    fn test_computed_layout_with_log() {
        let layout = ComputedLayout::compute(Rect::new(0, 0, 80, 30), true);

        let log = layout.log.unwrap();
        assert_eq!(log.height, 8);
        assert!(log.y > layout.controls.y);
        assert!(layout.status.y > log.y);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(80, 50, area);
        assert_eq!(popup.width, 80);
        assert_eq!(popup.height, 20);
        assert!(popup.x > 0 && popup.y > 0);
    }
}
