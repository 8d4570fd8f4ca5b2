//! # Actions
//!
//! Everything that can happen in the dashboard becomes an `Action`.
//! User clicks the Results button? That's `Action::Navigate(route)`.
//! The location hash changed? That's `Action::LocationChanged(token)`.
//! The poll timer fired? That's `Action::PollTick`.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```
//!
//! Location notifications and poll ticks are two producers feeding the same
//! `sync_from_external` entry point. The router's last-rendered guard makes
//! the duplicates harmless, so neither source needs to know about the other.

use log::debug;

use crate::core::pages;
use crate::core::route::Route;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A navigation control was activated.
    Navigate(Route),
    /// The location provider reported a new token.
    LocationChanged(String),
    /// Periodic re-read of the location.
    PollTick,
    HistoryBack,
    HistoryForward,
    /// Switch the impact overview bars between amounts and shares.
    ToggleNormalize,
    /// New search text for the calculation setup process list.
    SetProcessFilter(String),
    Quit,
}

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Redraw,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    if action != Action::PollTick {
        debug!("update: {:?}", action);
    }
    match action {
        Action::Navigate(route) => {
            match app.router.navigate(route) {
                Ok(true) => app.record(Ok(())),
                Ok(false) => {
                    app.status_message = String::from("Navigation is disabled in static mode");
                }
                Err(e) => app.record(Err(e)),
            }
            Effect::Redraw
        }
        Action::LocationChanged(token) => sync(app, &token),
        Action::PollTick => {
            let Some(token) = app.router.location().map(|loc| loc.token().to_string()) else {
                return Effect::None;
            };
            sync(app, &token)
        }
        Action::HistoryBack | Action::HistoryForward => {
            let moved = match app.router.location_mut() {
                Some(loc) if action == Action::HistoryBack => loc.back(),
                Some(loc) => loc.forward(),
                None => false,
            };
            if moved {
                // The location notifies subscribers; read it directly as well
                // so the view follows even when nobody is subscribed.
                let token = app
                    .router
                    .location()
                    .map(|loc| loc.token().to_string())
                    .unwrap_or_default();
                sync(app, &token);
            } else {
                app.status_message = String::from("No more history in that direction");
            }
            Effect::Redraw
        }
        Action::ToggleNormalize => {
            let rebuilt = app.change_options(pages::IMPACT_OVERVIEW, |options| {
                options.normalize_bars = !options.normalize_bars;
            });
            if !rebuilt {
                return Effect::None;
            }
            if app.page_options().normalize_bars {
                app.status_message = String::from("Bars normalized to 100%");
            }
            Effect::Redraw
        }
        Action::SetProcessFilter(filter) => {
            let rebuilt = app.change_options(pages::CALCULATION_SETUP, |options| {
                options.process_filter = filter;
            });
            if rebuilt { Effect::Redraw } else { Effect::None }
        }
        Action::Quit => Effect::Quit,
    }
}

fn sync(app: &mut App, token: &str) -> Effect {
    match app.router.sync_from_external(token) {
        Ok(false) => Effect::None,
        Ok(true) => {
            app.record(Ok(()));
            Effect::Redraw
        }
        Err(e) => {
            app.record(Err(e));
            Effect::Redraw
        }
    }
}
