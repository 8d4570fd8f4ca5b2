//! # TitleBar Component
//!
//! Top line: application name, the current location token and the status
//! message. Purely presentational; every field is a prop.
//!
//! ```text
//! PMI-LCA Tool | #results/impact-overview | Impact Overview
//! PMI-LCA Tool | static | Navigation is disabled in static mode
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const APP_TITLE: &str = "PMI-LCA Tool";

pub struct TitleBar {
    /// Location token as the user would see it (`#route`), or `None` in
    /// static mode.
    pub token: Option<String>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(token: Option<String>, status_message: String) -> Self {
        Self {
            token,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let sep = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )];

        spans.push(sep.clone());
        match &self.token {
            Some(token) => spans.push(Span::styled(token.clone(), Style::default().fg(Color::Cyan))),
            None => spans.push(Span::styled("static", Style::default().fg(Color::Yellow))),
        }

        if !self.status_message.is_empty() {
            spans.push(sep);
            spans.push(Span::raw(self.status_message.clone()));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_shows_token_and_status() {
        let mut title_bar = TitleBar::new(
            Some("#results/impact-overview".to_string()),
            "Impact Overview".to_string(),
        );
        let text = draw(&mut title_bar);
        assert!(text.starts_with("PMI-LCA Tool | #results/impact-overview | Impact Overview"));
    }

    #[test]
    fn test_title_bar_static_mode() {
        let mut title_bar = TitleBar::new(None, "Home".to_string());
        let text = draw(&mut title_bar);
        assert!(text.contains("| static |"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_title_bar_empty_status_has_no_trailing_separator() {
        let mut title_bar = TitleBar::new(Some("#home".to_string()), String::new());
        let text = draw(&mut title_bar);
        assert_eq!(text.trim_end(), "PMI-LCA Tool | #home");
    }
}
