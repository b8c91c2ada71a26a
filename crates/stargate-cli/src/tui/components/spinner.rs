//! Spinner shown while a transfer is in flight.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

const BRAILLE: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const LINE: &[&str] = &["-", "\\", "|", "/"];

/// Spinner animation frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpinnerStyle {
    /// Braille dots
    #[default]
    Braille,
    /// ASCII, for consoles without braille glyphs
    Line,
}

impl SpinnerStyle {
    /// Pick a style the terminal can draw. The Linux virtual console has
    /// no braille glyphs.
    pub fn for_term(term: Option<&str>) -> Self {
        match term {
            Some("linux") => Self::Line,
            _ => Self::Braille,
        }
    }

    /// Frames for this style.
    pub const fn frames(self) -> &'static [&'static str] {
        match self {
            Self::Braille => BRAILLE,
            Self::Line => LINE,
        }
    }
}

/// Animation position, advanced once per UI tick.
#[derive(Debug, Clone, Default)]
pub struct SpinnerState {
    frame: usize,
    tick: u64,
}

impl SpinnerState {
    /// Advance the animation. Frames change every other tick.
    pub fn tick(&mut self, style: SpinnerStyle) {
        self.tick = self.tick.wrapping_add(1);
        if self.tick % 2 == 0 {
            self.frame = (self.frame + 1) % style.frames().len();
        }
    }

    /// Current frame.
    pub fn current_frame(&self, style: SpinnerStyle) -> &'static str {
        let frames = style.frames();
        frames[self.frame % frames.len()]
    }

    /// Back to the first frame.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.tick = 0;
    }
}

/// A spinner followed by a label.
pub struct Spinner<'a> {
    text: &'a str,
    style: SpinnerStyle,
    spinner_style: Style,
    text_style: Style,
}

impl<'a> Spinner<'a> {
    /// Spinner with the given label.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: SpinnerStyle::default(),
            spinner_style: Style::default(),
            text_style: Style::default(),
        }
    }

    /// Set the frame style.
    #[must_use]
    pub const fn animation_style(mut self, style: SpinnerStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the spinner glyph style.
    #[must_use]
    pub const fn spinner_style(mut self, style: Style) -> Self {
        self.spinner_style = style;
        self
    }

    /// Set the label style.
    #[must_use]
    pub const fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    /// The spinner and label as one line.
    pub fn line(&self, state: &SpinnerState) -> Line<'a> {
        Line::from(vec![
            Span::styled(state.current_frame(self.style), self.spinner_style),
            Span::raw(" "),
            Span::styled(self.text, self.text_style),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_advances_every_other_tick() {
        let mut state = SpinnerState::default();
        state.tick(SpinnerStyle::Braille);
        assert_eq!(state.current_frame(SpinnerStyle::Braille), "⠋");
        state.tick(SpinnerStyle::Braille);
        assert_eq!(state.current_frame(SpinnerStyle::Braille), "⠙");
    }

    #[test]
    fn test_style_for_term() {
        assert_eq!(SpinnerStyle::for_term(Some("linux")), SpinnerStyle::Line);
        assert_eq!(SpinnerStyle::for_term(Some("xterm-256color")), SpinnerStyle::Braille);
        assert_eq!(SpinnerStyle::for_term(None), SpinnerStyle::Braille);
    }

    #[test]
    fn test_spinner_wraps() {
        let mut state = SpinnerState::default();
        for _ in 0..9 {
            state.tick(SpinnerStyle::Line);
        }
        // four frame changes over nine ticks
        assert_eq!(state.current_frame(SpinnerStyle::Line), "-");

        state.reset();
        assert_eq!(state.current_frame(SpinnerStyle::Line), "-");
    }
}
