use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions (turned into core::Action)
    Quit,
    ForceQuit, // Ctrl+C
    Home,
    Back,
    Forward,
    /// Activate the nav button at this index (digit keys, 0-based).
    Select(usize),
    /// Activate the focused nav button.
    Activate,
    /// Next/previous route in table order.
    NextRoute,
    PrevRoute,
    ToggleNormalize,
    /// Start editing the process filter.
    OpenFilter,

    // TUI-local events (handled directly in TUI)
    FocusNext,
    FocusPrev,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    MouseClick(u16, u16),
    Resize,

    // Filter editing
    InputChar(char),
    Backspace,
    Submit,
    Cancel,
}

/// How key presses are read: as commands, or as text for the filter input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate(mode: InputMode) -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO, mode)
}

pub fn poll_event_timeout(timeout: Duration, mode: InputMode) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(mode, key_event.modifiers, key_event.code)
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

pub fn map_key(mode: InputMode, modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    if mode == InputMode::Filter {
        return match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
            (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
            (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
            (_, KeyCode::Enter) => Some(TuiEvent::Submit),
            (_, KeyCode::Esc) => Some(TuiEvent::Cancel),
            _ => None,
        };
    }
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::ALT, KeyCode::Left) => Some(TuiEvent::Back),
        (KeyModifiers::ALT, KeyCode::Right) => Some(TuiEvent::Forward),
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        (_, KeyCode::Char('h')) => Some(TuiEvent::Home),
        (_, KeyCode::Char(c @ '1'..='9')) => Some(TuiEvent::Select(c as usize - '1' as usize)),
        (_, KeyCode::Char(']')) => Some(TuiEvent::NextRoute),
        (_, KeyCode::Char('[')) => Some(TuiEvent::PrevRoute),
        (_, KeyCode::Char('n')) => Some(TuiEvent::ToggleNormalize),
        (_, KeyCode::Char('/')) => Some(TuiEvent::OpenFilter),
        (_, KeyCode::Char(' ')) | (_, KeyCode::Enter) => Some(TuiEvent::Activate),
        (_, KeyCode::Tab) => Some(TuiEvent::FocusNext),
        (_, KeyCode::BackTab) => Some(TuiEvent::FocusPrev),
        (_, KeyCode::Left) | (_, KeyCode::Backspace) => Some(TuiEvent::Back),
        (_, KeyCode::Right) => Some(TuiEvent::Forward),
        (_, KeyCode::Up) => Some(TuiEvent::ScrollUp),
        (_, KeyCode::Down) => Some(TuiEvent::ScrollDown),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        (_, KeyCode::Home) => Some(TuiEvent::ScrollToTop),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(mode: InputMode, code: KeyCode) -> Option<TuiEvent> {
        map_key(mode, KeyModifiers::NONE, code)
    }

    #[test]
    fn test_normal_mode_keys_are_commands() {
        let mode = InputMode::Normal;
        assert_eq!(key(mode, KeyCode::Char('q')), Some(TuiEvent::Quit));
        assert_eq!(key(mode, KeyCode::Char('2')), Some(TuiEvent::Select(1)));
        assert_eq!(key(mode, KeyCode::Char('n')), Some(TuiEvent::ToggleNormalize));
        assert_eq!(key(mode, KeyCode::Char('/')), Some(TuiEvent::OpenFilter));
        assert_eq!(key(mode, KeyCode::Backspace), Some(TuiEvent::Back));
        assert_eq!(key(mode, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_filter_mode_keys_are_text() {
        let mode = InputMode::Filter;
        assert_eq!(key(mode, KeyCode::Char('q')), Some(TuiEvent::InputChar('q')));
        assert_eq!(key(mode, KeyCode::Char('1')), Some(TuiEvent::InputChar('1')));
        assert_eq!(key(mode, KeyCode::Backspace), Some(TuiEvent::Backspace));
        assert_eq!(key(mode, KeyCode::Enter), Some(TuiEvent::Submit));
        assert_eq!(key(mode, KeyCode::Esc), Some(TuiEvent::Cancel));
        assert_eq!(
            map_key(mode, KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(TuiEvent::ForceQuit)
        );
    }
}
