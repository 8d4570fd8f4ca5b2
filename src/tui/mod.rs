//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event sources
//!
//! Three producers feed the loop, all drained once per iteration:
//!
//! - terminal input, polled with a short timeout
//! - location change notifications, a channel subscribed on the `HashLocation`
//! - the poll timer, a tokio task posting `Action::PollTick`
//!
//! The router's last-rendered guard absorbs the overlap between the second
//! and third, so a redraw only happens when something actually changed.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info};
use std::io::{self, stdout};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tokio::runtime::Handle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::location::{HashLocation, Location};
use crate::core::pages;
use crate::core::route::Route;
use crate::core::scheduler::{Scheduler, TokioScheduler};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ContentPaneState, FilterEvent, FilterInputState, NavBarState, NavEvent,
};
use crate::tui::event::{InputMode, TuiEvent, poll_event_immediate, poll_event_timeout};

const INPUT_POLL: Duration = Duration::from_millis(100);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub nav_bar: NavBarState,
    pub content: ContentPaneState,
    pub filter: FilterInputState,
}

impl TuiState {
    pub fn new(button_count: usize) -> Self {
        Self {
            nav_bar: NavBarState::new(button_count),
            content: ContentPaneState::new(),
            filter: FilterInputState::new(),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if self.filter.active {
            InputMode::Filter
        } else {
            InputMode::Normal
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Map a terminal event to a core action. Scroll and focus are handled here
/// and produce no action.
fn dispatch(event: TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Home => Some(Action::Navigate(Route::home())),
        TuiEvent::Back => Some(Action::HistoryBack),
        TuiEvent::Forward => Some(Action::HistoryForward),
        TuiEvent::NextRoute => Some(Action::Navigate(adjacent_route(app, 1))),
        TuiEvent::PrevRoute => Some(Action::Navigate(adjacent_route(app, -1))),
        TuiEvent::ToggleNormalize => Some(Action::ToggleNormalize),
        TuiEvent::OpenFilter => {
            if app.router.current_route().as_str() == pages::CALCULATION_SETUP {
                tui.filter.open(&app.page_options().process_filter);
            }
            None
        }
        TuiEvent::InputChar(_) | TuiEvent::Backspace | TuiEvent::Submit | TuiEvent::Cancel => {
            let FilterEvent::Changed(filter) = tui.filter.handle_event(&event)?;
            Some(Action::SetProcessFilter(filter))
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToTop => {
            tui.content.handle_event(&event);
            None
        }
        TuiEvent::Resize => None,
        TuiEvent::Select(_)
        | TuiEvent::Activate
        | TuiEvent::FocusNext
        | TuiEvent::FocusPrev
        | TuiEvent::MouseClick(..) => {
            let NavEvent::Activate(index) = tui.nav_bar.handle_event(&event)?;
            let button = app.nav_buttons().get(index)?;
            Some(Action::Navigate(button.target().clone()))
        }
    }
}

/// The route `step` places away from the current one, in table order.
/// A route not in the table counts as sitting just before the first entry.
fn adjacent_route(app: &App, step: isize) -> Route {
    let routes: Vec<&Route> = app.router.table().routes().collect();
    if routes.is_empty() {
        return Route::home();
    }
    let len = routes.len() as isize;
    let current = app.router.current_route();
    let index = match routes.iter().position(|r| *r == current) {
        Some(pos) => (pos as isize + step).rem_euclid(len),
        None if step > 0 => 0,
        None => len - 1,
    };
    routes[index as usize].clone()
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let (location_tx, location_rx) = mpsc::channel::<String>();
    let location: Option<Box<dyn Location>> = if config.static_mode {
        info!("Static mode: no location, navigation disabled");
        None
    } else {
        let mut location = HashLocation::new(&config.initial_token);
        location.subscribe(location_tx);
        Some(Box::new(location) as Box<dyn Location>)
    };

    let mut app = App::from_config(&config, location).map_err(io::Error::other)?;
    app.start();
    let mut tui = TuiState::new(app.nav_buttons().len());

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel::<Action>();

    let mut scheduler = TokioScheduler::new(Handle::try_current().map_err(io::Error::other)?);
    let poll_handle = (!app.router.is_static()).then(|| {
        let poll_tx = tx.clone();
        scheduler.schedule(
            Box::new(move || {
                let _ = poll_tx.send(Action::PollTick);
            }),
            config.poll_interval,
        )
    });

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let mut next_event = poll_event_timeout(INPUT_POLL, tui.input_mode());
        if next_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw.
        // Re-read the mode each time, an event can open or close the filter.
        while let Some(event) = next_event {
            if let Some(action) = dispatch(event, &app, &mut tui) {
                if update(&mut app, action) == Effect::Quit {
                    break 'main;
                }
            }
            next_event = poll_event_immediate(tui.input_mode());
        }

        while let Ok(token) = location_rx.try_recv() {
            if update(&mut app, Action::LocationChanged(token)) == Effect::Redraw {
                needs_redraw = true;
            }
        }

        while let Ok(action) = rx.try_recv() {
            match update(&mut app, action) {
                Effect::Quit => break 'main,
                Effect::Redraw => {
                    debug!("Background action changed the view");
                    needs_redraw = true;
                }
                Effect::None => {}
            }
        }
    }

    if let Some(handle) = poll_handle {
        scheduler.cancel(handle);
    }

    info!("Shutting down at '{}'", app.router.current_route());
    ratatui::restore();
    Ok(())
}
