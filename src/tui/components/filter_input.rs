//! # FilterInput Component
//!
//! One-line text input for the calculation setup process filter, drawn over
//! the help line while it is open.
//!
//! The buffer is internal state. Every edit is reported as
//! `FilterEvent::Changed` so the page narrows while typing. `Enter` closes the
//! input and keeps the text, `Esc` clears it and closes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PROMPT: &str = " Filter: ";

/// High-level events emitted by the filter input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// The filter text changed.
    Changed(String),
}

#[derive(Debug, Default)]
pub struct FilterInputState {
    pub buffer: String,
    pub active: bool,
}

impl FilterInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing, beginning from the filter currently applied.
    pub fn open(&mut self, current: &str) {
        self.buffer = current.to_string();
        self.active = true;
    }
}

impl EventHandler for FilterInputState {
    type Event = FilterEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FilterEvent> {
        if !self.active {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(FilterEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Backspace => self
                .buffer
                .pop()
                .map(|_| FilterEvent::Changed(self.buffer.clone())),
            TuiEvent::Submit => {
                self.active = false;
                None
            }
            TuiEvent::Cancel => {
                self.active = false;
                if self.buffer.is_empty() {
                    return None;
                }
                self.buffer.clear();
                Some(FilterEvent::Changed(String::new()))
            }
            _ => None,
        }
    }
}

pub struct FilterInput<'a> {
    pub state: &'a FilterInputState,
}

impl<'a> FilterInput<'a> {
    pub fn new(state: &'a FilterInputState) -> Self {
        Self { state }
    }
}

impl Component for FilterInput<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(PROMPT, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(self.state.buffer.clone(), Style::default().fg(Color::Green)),
            Span::styled(
                "  (Enter keep · Esc clear)",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(line, area);

        let width = (PROMPT.width() + self.state.buffer.width()) as u16;
        let x = area.x + width.min(area.width.saturating_sub(1));
        frame.set_cursor_position((x, area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> FilterInputState {
        let mut state = FilterInputState::new();
        state.open("");
        for c in text.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
        state
    }

    #[test]
    fn test_typing_reports_every_change() {
        let mut state = FilterInputState::new();
        state.open("ac");
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('e')),
            Some(FilterEvent::Changed("ace".to_string()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Backspace),
            Some(FilterEvent::Changed("ac".to_string()))
        );
    }

    #[test]
    fn test_backspace_on_empty_buffer_is_quiet() {
        let mut state = typed("");
        assert_eq!(state.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_submit_keeps_text_and_closes() {
        let mut state = typed("rer");
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert!(!state.active);
        assert_eq!(state.buffer, "rer");
    }

    #[test]
    fn test_cancel_clears_filter() {
        let mut state = typed("rer");
        assert_eq!(
            state.handle_event(&TuiEvent::Cancel),
            Some(FilterEvent::Changed(String::new()))
        );
        assert!(!state.active);
    }

    #[test]
    fn test_closed_input_ignores_keys() {
        let mut state = FilterInputState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
        assert!(state.buffer.is_empty());
    }

    #[test]
    fn test_render_shows_prompt_and_text() {
        let state = typed("acetone");
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| FilterInput::new(&state).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Filter: acetone"));
    }
}
