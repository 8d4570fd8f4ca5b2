//! # Application State
//!
//! Core state for the dashboard. Domain logic only, no TUI-specific types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── router: DashRouter
//! │   ├── table: RouteTable<PageView>       // route → page factory
//! │   ├── highlighter: Highlighter<NavButton>
//! │   ├── slot: ContentPane                 // the mounted page
//! │   ├── location: Option<Box<dyn Location>>
//! │   └── state: RouterState                // current / last rendered route
//! ├── options: SharedOptions                // bar normalization, process filter
//! ├── status_message: String                // status bar text
//! └── error: Option<String>                 // last render failure
//! ```
//!
//! The app is owned by the event loop and handed to `update()` by `&mut`.
//! There is no global instance.

use crate::core::config::ResolvedConfig;
use crate::core::highlight::Highlighter;
use crate::core::location::Location;
use crate::core::nav::{self, NavButton};
use crate::core::pages::{self, ContentPane, PageOptions, PageView, SharedOptions};
use crate::core::router::{RenderError, RouteTableError, Router};

pub type DashRouter = Router<PageView, NavButton, ContentPane>;

pub struct App {
    pub router: DashRouter,
    /// Also held by the computed pages' factories in the route table.
    options: SharedOptions,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    /// Build the dashboard. Pass `None` as location for static mode.
    pub fn from_config(
        config: &ResolvedConfig,
        location: Option<Box<dyn Location>>,
    ) -> Result<Self, RouteTableError> {
        let options = SharedOptions::default();
        let table = pages::route_table(&config.pages, &options)?;
        // Buttons and bindings exist before the router can render anything.
        let highlighter = Highlighter::new(
            nav::control_binding(&config.pages),
            nav::control_styles(),
            nav::nav_buttons(),
        );
        let router = Router::new(table, highlighter, ContentPane::new(), location);
        Ok(Self {
            router,
            options,
            status_message: String::from("Welcome to the PMI-LCA Tool"),
            error: None,
        })
    }

    /// Initial render.
    pub fn start(&mut self) {
        let result = self.router.start();
        self.record(result);
    }

    pub fn nav_buttons(&self) -> &[NavButton] {
        self.router.controls()
    }

    pub fn current_view(&self) -> Option<&PageView> {
        self.router.slot().view()
    }

    pub fn page_options(&self) -> PageOptions {
        self.options.borrow().clone()
    }

    /// Change the page options and rebuild the current page if it is
    /// `route`. Returns true if the page was rebuilt.
    pub(crate) fn change_options(
        &mut self,
        route: &str,
        change: impl FnOnce(&mut PageOptions),
    ) -> bool {
        change(&mut self.options.borrow_mut());
        if self.router.current_route().as_str() != route {
            return false;
        }
        let result = self.router.render_current();
        self.record(result);
        true
    }

    /// Fold a render result into the status line and error slot.
    pub(crate) fn record(&mut self, result: Result<(), RenderError>) {
        match result {
            Ok(()) => {
                self.error = None;
                let shown = self
                    .current_view()
                    .map(|v| v.title.clone())
                    .unwrap_or_default();
                let route = self.router.current_route();
                self.status_message = if let Some(e) = self.router.fallback_error() {
                    format!("Could not open '{route}' ({e}), showing {shown}")
                } else if self.router.table().contains(route) {
                    shown
                } else {
                    format!("No page at '{route}', showing {shown}")
                };
            }
            Err(e) => {
                self.status_message = String::from("Rendering failed");
                self.error = Some(e.to_string());
            }
        }
    }
}
