use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ContentView, FilterInput, NavBar, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

const HELP_STATIC: &str = " ↑↓ scroll · q quit";
const HELP: &str = " 1-3 / click open · Tab focus · [ ] pages · ←→ history · h home · \
                    n normalize · / filter · ↑↓ scroll · q quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0), Length(1)]);
    let [title_area, nav_area, main_area, help_area] = layout.areas(frame.area());

    let token = app.router.location().map(|loc| {
        let token = loc.token();
        if token.is_empty() {
            app.router.current_route().to_token()
        } else {
            token.to_string()
        }
    });
    TitleBar::new(token, app.status_message.clone()).render(frame, title_area);

    NavBar::new(app.nav_buttons(), &mut tui.nav_bar).render(frame, nav_area);

    let content_area = match &app.error {
        Some(error_msg) => {
            let [error_area, rest] = Layout::vertical([Length(3), Min(0)]).areas(main_area);
            draw_error(frame, error_area, error_msg);
            rest
        }
        None => main_area,
    };
    let generation = app.router.slot().generation();
    ContentView::new(app.current_view(), generation, &mut tui.content).render(frame, content_area);

    if tui.filter.active {
        FilterInput::new(&tui.filter).render(frame, help_area);
        return;
    }
    let help = if app.router.is_static() { HELP_STATIC } else { HELP };
    frame.render_widget(
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
        help_area,
    );
}

fn draw_error(frame: &mut Frame, area: Rect, error_msg: &str) {
    let style = Style::default().fg(Color::Red);
    let paragraph = Paragraph::new(error_msg)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title("ERROR").border_style(style));
    frame.render_widget(paragraph, area);
}
