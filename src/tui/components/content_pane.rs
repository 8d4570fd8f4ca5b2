//! # ContentView Component
//!
//! Scrollable view of the mounted page. The page body is markdown, rendered
//! through [`crate::tui::markdown`] into a `tui_scrollview::ScrollView` sized
//! to the wrapped text.
//!
//! Scroll position is reset whenever the router mounts a new page, detected
//! through the content pane's generation counter.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::pages::PageView;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

/// Scroll state for the content area. Must be persisted in `TuiState`.
#[derive(Default)]
pub struct ContentPaneState {
    pub scroll_state: ScrollViewState,
    /// Generation of the page the scroll offset belongs to.
    generation: u64,
    content_height: u16,
    viewport_height: u16,
}

impl ContentPaneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset scrolling when a different page has been mounted.
    pub fn sync_generation(&mut self, generation: u64) {
        if generation != self.generation {
            self.generation = generation;
            self.scroll_state.scroll_to_top();
        }
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        if self.offset_y() > max_y {
            let x = self.scroll_state.offset().x;
            self.scroll_state.set_offset(Position { x, y: max_y });
        }
    }

    pub fn offset_y(&self) -> u16 {
        self.scroll_state.offset().y
    }
}

impl EventHandler for ContentPaneState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::ScrollToTop => self.scroll_state.scroll_to_top(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

pub struct ContentView<'a> {
    pub view: Option<&'a PageView>,
    pub generation: u64,
    pub state: &'a mut ContentPaneState,
}

impl<'a> ContentView<'a> {
    pub fn new(view: Option<&'a PageView>, generation: u64, state: &'a mut ContentPaneState) -> Self {
        Self {
            view,
            generation,
            state,
        }
    }
}

fn page_text(view: Option<&PageView>) -> Text<'static> {
    match view {
        Some(view) => markdown::render(&view.body, Color::Reset),
        None => Text::from(Line::from(Span::styled(
            "Nothing to show yet.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))),
    }
}

impl Component for ContentView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync_generation(self.generation);

        // Leave a column for the scrollbar.
        let width = area.width.saturating_sub(1).max(1);
        let paragraph = Paragraph::new(page_text(self.view)).wrap(Wrap { trim: false });
        let height = u16::try_from(paragraph.line_count(width)).unwrap_or(u16::MAX);

        self.state.content_height = height;
        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, width, height));
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
