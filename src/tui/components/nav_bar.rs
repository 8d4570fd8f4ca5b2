//! # NavBar Component
//!
//! The row of header buttons. The look of each button comes entirely from
//! the `StyleDescriptor` and icon name the highlight reconciler wrote into
//! it; this component only translates those into terminal styling:
//!
//! | descriptor            | terminal              |
//! |-----------------------|-----------------------|
//! | `Semibold`            | bold label            |
//! | `tinted`              | tinted background     |
//! | `IconFont::Filled`    | filled glyph          |
//! | keyboard focus        | underlined label      |
//!
//! Keyboard focus is TUI state, separate from the route highlight: Tab moves
//! focus, Enter/Space activates the focused button, digits activate by index.
//! Button rectangles from the last render are kept for mouse hit testing.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::highlight::{FontWeight, IconFont, NavControl};
use crate::core::nav::NavButton;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const BUTTON_WIDTH: u16 = 16;
const TINT: Color = Color::Rgb(40, 52, 72);

/// Emitted when a button should be activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Activate(usize),
}

/// Persistent nav bar state, owned by `TuiState`.
#[derive(Debug, Default)]
pub struct NavBarState {
    pub focused: usize,
    count: usize,
    rects: Vec<Rect>,
}

impl NavBarState {
    pub fn new(count: usize) -> Self {
        Self {
            focused: 0,
            count,
            rects: Vec::new(),
        }
    }

    /// Index of the button under a screen position, using the last layout.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.rects.iter().position(|r| r.contains(pos))
    }
}

impl EventHandler for NavBarState {
    type Event = NavEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<NavEvent> {
        if self.count == 0 {
            return None;
        }
        match *event {
            TuiEvent::FocusNext => {
                self.focused = (self.focused + 1) % self.count;
                None
            }
            TuiEvent::FocusPrev => {
                self.focused = (self.focused + self.count - 1) % self.count;
                None
            }
            TuiEvent::Activate => Some(NavEvent::Activate(self.focused)),
            TuiEvent::Select(index) if index < self.count => {
                self.focused = index;
                Some(NavEvent::Activate(index))
            }
            TuiEvent::MouseClick(column, row) => {
                let index = self.hit_test(column, row)?;
                self.focused = index;
                Some(NavEvent::Activate(index))
            }
            _ => None,
        }
    }
}

/// Evenly spaced button rectangles inside `area`.
pub fn button_rects(area: Rect, count: usize) -> Vec<Rect> {
    Layout::horizontal(vec![Constraint::Length(BUTTON_WIDTH); count])
        .flex(Flex::SpaceAround)
        .split(area)
        .to_vec()
}

/// Terminal glyph for a Material-style icon name.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "home_outlined" => "△",
        "home" => "▲",
        "settings_outlined" => "○",
        "settings" => "●",
        "insert_chart_outlined" => "▯",
        "insert_chart" => "▮",
        _ => "•",
    }
}

fn button_style(button: &NavButton, focused: bool) -> Style {
    let desc = button.style();
    let mut style = Style::default().fg(Color::Gray);
    if desc.weight == FontWeight::Semibold {
        style = style.fg(Color::White).add_modifier(Modifier::BOLD);
    }
    if desc.tinted {
        style = style.bg(TINT);
    }
    if focused {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

pub struct NavBar<'a> {
    pub buttons: &'a [NavButton],
    pub state: &'a mut NavBarState,
}

impl<'a> NavBar<'a> {
    pub fn new(buttons: &'a [NavButton], state: &'a mut NavBarState) -> Self {
        Self { buttons, state }
    }
}

impl Component for NavBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rects = button_rects(area, self.buttons.len());
        self.state.count = self.buttons.len();

        for (i, (button, rect)) in self.buttons.iter().zip(&rects).enumerate() {
            let focused = i == self.state.focused;
            let style = button_style(button, focused);
            let icon_style = match button.style().icon_font {
                IconFont::Filled => style.fg(Color::LightBlue),
                IconFont::Outlined => style.add_modifier(Modifier::DIM),
            };
            let border_style = if button.style().tinted {
                Style::default().fg(Color::LightBlue)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let line = Line::from(vec![
                Span::styled(icon_glyph(button.icon()), icon_style),
                Span::styled(" ", style),
                Span::styled(button.label().to_string(), style),
            ]);
            let paragraph = Paragraph::new(line)
                .alignment(Alignment::Center)
                .style(style)
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(border_style),
                );
            frame.render_widget(paragraph, *rect);
        }

        self.state.rects = rects;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::highlight::StyleDescriptor;
    use crate::core::nav::nav_buttons;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(buttons: &[NavButton], state: &mut NavBarState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        terminal
            .draw(|f| NavBar::new(buttons, state).render(f, f.area()))
            .unwrap();
        terminal
    }

    #[test]
    fn test_button_rects_fit_and_do_not_overlap() {
        let area = Rect::new(0, 1, 60, 3);
        let rects = button_rects(area, 3);
        assert_eq!(rects.len(), 3);
        for pair in rects.windows(2) {
            assert!(pair[0].right() <= pair[1].x);
        }
        assert!(rects.iter().all(|r| r.width == BUTTON_WIDTH && r.y == 1));
    }

    #[test]
    fn test_labels_and_glyphs_render() {
        let buttons = nav_buttons();
        let mut state = NavBarState::new(buttons.len());
        let terminal = render(&buttons, &mut state);
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Home"));
        assert!(text.contains("Modeling"));
        assert!(text.contains("Results"));
        assert!(text.contains("△"));
        assert!(text.contains("○"));
    }

    #[test]
    fn test_highlighted_button_is_bold_and_tinted() {
        let mut buttons = nav_buttons();
        buttons[2].set_style(StyleDescriptor::highlighted());
        buttons[2].set_icon("insert_chart");
        let mut state = NavBarState::new(buttons.len());
        let terminal = render(&buttons, &mut state);

        let rect = state.rects[2];
        let buffer = terminal.backend().buffer();
        let row = rect.y + 1;
        let cells: Vec<_> = (rect.x + 1..rect.right() - 1)
            .map(|x| &buffer[(x, row)])
            .collect();
        assert!(cells.iter().any(|c| c.symbol() == "▮"));
        let label_cell = cells.iter().find(|c| c.symbol() == "R").unwrap();
        assert!(label_cell.modifier.contains(Modifier::BOLD));
        assert_eq!(label_cell.bg, TINT);

        let other = &buffer[(state.rects[1].x + 1, row)];
        assert_ne!(other.bg, TINT);
    }

    #[test]
    fn test_hit_test_uses_last_layout() {
        let buttons = nav_buttons();
        let mut state = NavBarState::new(buttons.len());
        assert_eq!(state.hit_test(5, 1), None);

        render(&buttons, &mut state);
        let results = state.rects[2];
        assert_eq!(state.hit_test(results.x + 2, results.y + 1), Some(2));
        assert_eq!(state.hit_test(0, 0), None);
    }

    #[test]
    fn test_focus_wraps_and_activates() {
        let mut state = NavBarState::new(3);
        assert_eq!(state.handle_event(&TuiEvent::FocusPrev), None);
        assert_eq!(state.focused, 2);
        state.handle_event(&TuiEvent::FocusNext);
        assert_eq!(state.focused, 0);
        assert_eq!(
            state.handle_event(&TuiEvent::Activate),
            Some(NavEvent::Activate(0))
        );
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut state = NavBarState::new(3);
        assert_eq!(
            state.handle_event(&TuiEvent::Select(1)),
            Some(NavEvent::Activate(1))
        );
        assert_eq!(state.focused, 1);
        assert_eq!(state.handle_event(&TuiEvent::Select(7)), None);
        assert_eq!(state.focused, 1);
    }

    #[test]
    fn test_unknown_icon_has_fallback_glyph() {
        assert_eq!(icon_glyph("not-an-icon"), "•");
    }
}
