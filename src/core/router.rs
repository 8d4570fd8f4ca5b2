//! # Router
//!
//! Single source of truth for which route is active and what is displayed.
//!
//! ```text
//!  navigate(route) ─────────────► location.set_token(#route) ─┐
//!                                                             ▼
//!  sync_from_external(token) ─► resolve ─► changed? ──► render_current()
//!                                                             │
//!          ┌──────────────────────────────────────────────────┘
//!          ▼
//!   highlighter.reconcile(route)
//!   view = table.lookup(route)()          ── Err ─► view = table["home"]() (once)
//!   slot.replace_contents(view)
//!   last_rendered_route = route
//! ```
//!
//! Without a location the router runs in static mode: it renders the default
//! route once and ignores navigation.

use log::{debug, error, info, warn};
use std::fmt;
use std::path::PathBuf;

use crate::core::highlight::{Highlighter, NavControl};
use crate::core::location::Location;
use crate::core::route::{Route, resolve};

// ============================================================================
// Errors
// ============================================================================

/// Failure while producing or mounting a view.
#[derive(Debug)]
pub enum ViewError {
    /// A page's backing file does not exist.
    Missing(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Build(String),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::Missing(path) => write!(f, "page file not found: {}", path.display()),
            ViewError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ViewError::Build(msg) => write!(f, "view construction failed: {msg}"),
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Rendering failed for the requested route and for the home fallback.
#[derive(Debug)]
pub struct RenderError {
    /// The route whose view could not be shown.
    pub route: Route,
    pub source: ViewError,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot render route '{}': {}", self.route, self.source)
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RouteTableError {
    MissingHome,
}

impl fmt::Display for RouteTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTableError::MissingHome => write!(f, "route table has no 'home' entry"),
        }
    }
}

impl std::error::Error for RouteTableError {}

// ============================================================================
// Views and the content slot
// ============================================================================

/// Zero-argument view constructor for one route.
pub type ViewFactory<V> = Box<dyn Fn() -> Result<V, ViewError>>;

/// The single mutable container the current view is mounted into.
pub trait ContentSlot<V> {
    /// Replace everything in the slot with `view`.
    ///
    /// On error the previous contents must be left as they were.
    fn replace_contents(&mut self, view: V) -> Result<(), ViewError>;
}

// ============================================================================
// Route table
// ============================================================================

/// Ordered Route → ViewFactory mapping with a guaranteed `home` entry.
pub struct RouteTable<V> {
    entries: Vec<(Route, ViewFactory<V>)>,
    home: usize,
}

impl<V> RouteTable<V> {
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder {
            entries: Vec::new(),
        }
    }

    /// The factory for `route`, or the home factory if the route is unknown.
    pub fn lookup(&self, route: &Route) -> &ViewFactory<V> {
        let entry = self
            .entries
            .iter()
            .find(|(r, _)| r == route)
            .unwrap_or(&self.entries[self.home]);
        &entry.1
    }

    pub fn contains(&self, route: &Route) -> bool {
        self.entries.iter().any(|(r, _)| r == route)
    }

    /// Routes in insertion order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.entries.iter().map(|(r, _)| r)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct RouteTableBuilder<V> {
    entries: Vec<(Route, ViewFactory<V>)>,
}

impl<V> RouteTableBuilder<V> {
    /// Add a route. A later entry for the same route replaces the earlier one.
    pub fn route<F>(mut self, route: impl Into<Route>, factory: F) -> Self
    where
        F: Fn() -> Result<V, ViewError> + 'static,
    {
        let route = route.into();
        let factory: ViewFactory<V> = Box::new(factory);
        if let Some(entry) = self.entries.iter_mut().find(|(r, _)| *r == route) {
            entry.1 = factory;
        } else {
            self.entries.push((route, factory));
        }
        self
    }

    pub fn build(self) -> Result<RouteTable<V>, RouteTableError> {
        let home = self
            .entries
            .iter()
            .position(|(r, _)| r.is_home())
            .ok_or(RouteTableError::MissingHome)?;
        Ok(RouteTable {
            entries: self.entries,
            home,
        })
    }
}

// ============================================================================
// Router
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterState {
    pub current_route: Route,
    /// Route of the last finished render pass. `None` before the first one.
    pub last_rendered_route: Option<Route>,
}

pub struct Router<V, C, S> {
    table: RouteTable<V>,
    highlighter: Highlighter<C>,
    slot: S,
    location: Option<Box<dyn Location>>,
    state: RouterState,
    /// Why the last render showed home instead of the current route.
    fallback: Option<ViewError>,
}

impl<V, C, S> Router<V, C, S>
where
    C: NavControl,
    S: ContentSlot<V>,
{
    /// Build a router. The initial route comes from the location's current
    /// token, or is `home` when there is no location.
    pub fn new(
        table: RouteTable<V>,
        highlighter: Highlighter<C>,
        slot: S,
        location: Option<Box<dyn Location>>,
    ) -> Self {
        let current_route = location
            .as_ref()
            .map(|loc| resolve(loc.token()))
            .unwrap_or_else(Route::home);
        Self {
            table,
            highlighter,
            slot,
            location,
            state: RouterState {
                current_route,
                last_rendered_route: None,
            },
            fallback: None,
        }
    }

    /// Initial render.
    pub fn start(&mut self) -> Result<(), RenderError> {
        info!(
            "Router starting at '{}' ({} routes, {})",
            self.state.current_route,
            self.table.len(),
            if self.is_static() { "static" } else { "interactive" }
        );
        self.render_current()
    }

    pub fn current_route(&self) -> &Route {
        &self.state.current_route
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    pub fn lookup_view(&self, route: &Route) -> &ViewFactory<V> {
        self.table.lookup(route)
    }

    pub fn controls(&self) -> &[C] {
        self.highlighter.controls()
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn location(&self) -> Option<&dyn Location> {
        self.location.as_deref()
    }

    pub fn location_mut(&mut self) -> Option<&mut (dyn Location + 'static)> {
        self.location.as_deref_mut()
    }

    pub fn is_static(&self) -> bool {
        self.location.is_none()
    }

    /// The error that made the last render fall back to home, if any.
    pub fn fallback_error(&self) -> Option<&ViewError> {
        self.fallback.as_ref()
    }

    /// Write `route` to the location and render it. Returns false without
    /// doing anything in static mode.
    ///
    /// The location's change notification that follows is absorbed by the
    /// `last_rendered_route` guard in `sync_from_external`.
    pub fn navigate(&mut self, route: Route) -> Result<bool, RenderError> {
        let Some(location) = self.location.as_mut() else {
            debug!("Static mode: ignoring navigation to '{route}'");
            return Ok(false);
        };
        debug!("Navigating to '{route}'");
        location.set_token(&route.to_token());
        self.state.current_route = route;
        self.render_current().map(|()| true)
    }

    /// Handle a location change. Returns true if a render pass ran.
    pub fn sync_from_external(&mut self, raw: &str) -> Result<bool, RenderError> {
        let route = resolve(raw);
        self.state.current_route = route;
        if self.state.last_rendered_route.as_ref() == Some(&self.state.current_route) {
            return Ok(false);
        }
        self.render_current().map(|()| true)
    }

    /// Mount the current route's view, then reconcile the controls for
    /// whatever was actually mounted. When nothing could be mounted the
    /// controls keep matching the previous content.
    pub fn render_current(&mut self) -> Result<(), RenderError> {
        let route = self.state.current_route.clone();

        self.fallback = None;
        let result = match self.mount(&route) {
            // Unknown routes display the home view, so they highlight like home.
            Ok(()) if self.table.contains(&route) => Ok(route.clone()),
            Ok(()) => Ok(Route::home()),
            Err(e) if route.is_home() => {
                error!("Error rendering route '{route}': {e}");
                Err(RenderError { route: route.clone(), source: e })
            }
            Err(e) => {
                warn!("Error rendering route '{route}': {e}; falling back to home");
                match self.mount(&Route::home()) {
                    Ok(()) => {
                        self.fallback = Some(e);
                        Ok(Route::home())
                    }
                    Err(home_err) => {
                        error!("Home fallback failed too: {home_err}");
                        Err(RenderError {
                            route: Route::home(),
                            source: home_err,
                        })
                    }
                }
            }
        };

        // Recorded on failure too, so polling does not retry every tick.
        self.state.last_rendered_route = Some(route.clone());

        let shown = result?;
        let report = self.highlighter.reconcile(&shown);
        debug!(
            "Reconciled controls for '{route}' (showing '{shown}'): active={:?}, writes={}",
            report.active, report.writes
        );
        Ok(())
    }

    fn mount(&mut self, route: &Route) -> Result<(), ViewError> {
        let view = (self.table.lookup(route))()?;
        self.slot.replace_contents(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::highlight::{ControlBinding, ControlId, ControlStates, ControlStyles};
    use crate::core::location::HashLocation;
    use crate::test_support::{CountingControl, RecordingSlot};
    use std::cell::Cell;
    use std::rc::Rc;

    const C1: ControlId = ControlId(1);
    const C2: ControlId = ControlId(2);

    type TestRouter = Router<&'static str, CountingControl, RecordingSlot<&'static str>>;

    /// Factory that counts its invocations.
    fn counted(
        view: &'static str,
        calls: &Rc<Cell<usize>>,
    ) -> impl Fn() -> Result<&'static str, ViewError> + 'static {
        let calls = calls.clone();
        move || {
            calls.set(calls.get() + 1);
            Ok(view)
        }
    }

    fn failing(
        calls: &Rc<Cell<usize>>,
    ) -> impl Fn() -> Result<&'static str, ViewError> + 'static {
        let calls = calls.clone();
        move || {
            calls.set(calls.get() + 1);
            Err(ViewError::Build("boom".to_string()))
        }
    }

    fn highlighter() -> Highlighter<CountingControl> {
        let binding = ControlBinding::new().bind("home", C1).bind("a/b", C2);
        let styles = ControlStyles::new()
            .with(C1, ControlStates::with_icons("home_outlined", "home"))
            .with(C2, ControlStates::with_icons("settings_outlined", "settings"));
        Highlighter::new(
            binding,
            styles,
            vec![
                CountingControl::new(C1, "home_outlined"),
                CountingControl::new(C2, "settings_outlined"),
            ],
        )
    }

    fn router_with(table: RouteTable<&'static str>, token: Option<&str>) -> TestRouter {
        let location = token.map(|t| Box::new(HashLocation::new(t)) as Box<dyn Location>);
        Router::new(table, highlighter(), RecordingSlot::new(), location)
    }

    fn is_active(control: &CountingControl) -> bool {
        *control.style() == crate::core::highlight::StyleDescriptor::highlighted()
    }

    #[test]
    fn test_table_requires_home() {
        let result = RouteTable::<&str>::builder().route("a", || Ok("a")).build();
        assert_eq!(result.err(), Some(RouteTableError::MissingHome));
    }

    #[test]
    fn test_lookup_unknown_route_returns_home_factory() {
        let table = RouteTable::builder()
            .route("home", || Ok("H"))
            .route("a/b", || Ok("AB"))
            .build()
            .unwrap();

        assert_eq!((table.lookup(&resolve("nope")))().unwrap(), "H");
        assert_eq!((table.lookup(&resolve("#/a/b/")))().unwrap(), "AB");
        assert!(std::ptr::eq(
            table.lookup(&resolve("missing/route")),
            table.lookup(&Route::home())
        ));
    }

    #[test]
    fn test_sync_from_external_scenario() {
        let ab_calls = Rc::new(Cell::new(0));
        let table = RouteTable::builder()
            .route("home", || Ok("H"))
            .route("a/b", counted("AB", &ab_calls))
            .build()
            .unwrap();
        let mut router = router_with(table, Some(""));
        router.start().unwrap();

        assert!(router.sync_from_external("#a/b").unwrap());
        assert_eq!(router.current_route().as_str(), "a/b");
        assert!(!is_active(&router.controls()[0]));
        assert!(is_active(&router.controls()[1]));
        assert_eq!(router.slot().contents, Some("AB"));
        assert_eq!(ab_calls.get(), 1);
    }

    #[test]
    fn test_repeated_sync_is_guarded() {
        let ab_calls = Rc::new(Cell::new(0));
        let table = RouteTable::builder()
            .route("home", || Ok("H"))
            .route("a/b", counted("AB", &ab_calls))
            .build()
            .unwrap();
        let mut router = router_with(table, Some(""));
        router.start().unwrap();
        router.sync_from_external("#a/b").unwrap();

        let writes_before: usize = router.controls().iter().map(|c| c.total_writes()).sum();
        assert!(!router.sync_from_external("#a/b").unwrap());
        let writes_after: usize = router.controls().iter().map(|c| c.total_writes()).sum();

        assert_eq!(writes_before, writes_after);
        assert_eq!(ab_calls.get(), 1);
        assert_eq!(router.slot().replacements, 2);
    }

    #[test]
    fn test_failing_route_falls_back_to_home_once() {
        let home_calls = Rc::new(Cell::new(0));
        let bad_calls = Rc::new(Cell::new(0));
        let table = RouteTable::builder()
            .route("home", counted("H", &home_calls))
            .route("bad", failing(&bad_calls))
            .build()
            .unwrap();
        let mut router = router_with(table, Some(""));
        router.start().unwrap();
        assert_eq!(home_calls.get(), 1);

        router.navigate(resolve("bad")).unwrap();

        assert_eq!(bad_calls.get(), 1);
        assert_eq!(home_calls.get(), 2);
        assert_eq!(router.slot().contents, Some("H"));
        assert_eq!(router.current_route().as_str(), "bad");
        assert_eq!(router.location().unwrap().token(), "#bad");
        assert!(router.fallback_error().is_some());

        router.navigate(Route::home()).unwrap();
        assert!(router.fallback_error().is_none());
    }

    #[test]
    fn test_failing_home_reports_and_keeps_last_good_content() {
        let fail = Rc::new(Cell::new(false));
        let fail_flag = fail.clone();
        let table = RouteTable::builder()
            .route("home", move || {
                if fail_flag.get() {
                    Err(ViewError::Build("home broke".to_string()))
                } else {
                    Ok("H")
                }
            })
            .route("a/b", || Ok("AB"))
            .route("bad", || Err(ViewError::Build("bad".to_string())))
            .build()
            .unwrap();
        let mut router = router_with(table, Some(""));
        router.start().unwrap();
        router.navigate(resolve("a/b")).unwrap();

        fail.set(true);
        let err = router.navigate(resolve("bad")).unwrap_err();
        assert!(err.route.is_home());
        assert_eq!(router.slot().contents, Some("AB"));
        assert_eq!(router.current_route().as_str(), "bad");

        let err = router.navigate(Route::home()).unwrap_err();
        assert!(err.to_string().contains("home broke"));
        assert_eq!(router.slot().contents, Some("AB"));
    }

    #[test]
    fn test_failed_render_keeps_highlight_on_shown_content() {
        let table = RouteTable::builder()
            .route("home", || Ok("H"))
            .route("a/b", || Ok("AB"))
            .build()
            .unwrap();
        let mut router = router_with(table, Some("#a/b"));
        router.start().unwrap();
        assert!(is_active(&router.controls()[1]));

        router.slot.reject("H");
        let writes_before: usize = router.controls().iter().map(|c| c.total_writes()).sum();
        assert!(router.navigate(Route::home()).is_err());

        assert_eq!(router.slot().contents, Some("AB"));
        assert!(!is_active(&router.controls()[0]));
        assert!(is_active(&router.controls()[1]));
        let writes_after: usize = router.controls().iter().map(|c| c.total_writes()).sum();
        assert_eq!(writes_before, writes_after);
    }

    #[test]
    fn test_fallback_highlights_home() {
        let table = RouteTable::builder()
            .route("home", || Ok("H"))
            .route("a/b", || Ok("AB"))
            .route("bad", || Err(ViewError::Build("bad".to_string())))
            .build()
            .unwrap();
        let mut router = router_with(table, Some("#a/b"));
        router.start().unwrap();

        router.navigate(resolve("bad")).unwrap();
        assert_eq!(router.slot().contents, Some("H"));
        assert!(is_active(&router.controls()[0]));
        assert!(!is_active(&router.controls()[1]));
    }

    #[test]
    fn test_mount_failure_triggers_fallback() {
        let table = RouteTable::builder()
            .route("home", || Ok("H"))
            .route("a/b", || Ok("AB"))
            .build()
            .unwrap();
        let mut router = router_with(table, Some(""));
        router.start().unwrap();

        router.slot.reject("AB");
        router.navigate(resolve("a/b")).unwrap();
        assert_eq!(router.slot().contents, Some("H"));
    }

    #[test]
    fn test_static_mode_renders_home_and_ignores_navigation() {
        let ab_calls = Rc::new(Cell::new(0));
        let table = RouteTable::builder()
            .route("home", || Ok("H"))
            .route("a/b", counted("AB", &ab_calls))
            .build()
            .unwrap();
        let mut router = router_with(table, None);
        assert!(router.is_static());
        router.start().unwrap();

        assert!(!router.navigate(resolve("a/b")).unwrap());
        assert!(router.current_route().is_home());
        assert_eq!(router.slot().contents, Some("H"));
        assert_eq!(ab_calls.get(), 0);
    }

    #[test]
    fn test_deep_link_is_initial_route() {
        let table = RouteTable::builder()
            .route("home", || Ok("H"))
            .route("a/b", || Ok("AB"))
            .build()
            .unwrap();
        let mut router = router_with(table, Some("#/a/b/"));
        router.start().unwrap();

        assert_eq!(router.current_route().as_str(), "a/b");
        assert_eq!(router.slot().contents, Some("AB"));
        assert!(is_active(&router.controls()[1]));
    }

    #[test]
    fn test_unknown_route_shows_home_highlight() {
        let table = RouteTable::builder()
            .route("home", || Ok("H"))
            .route("a/b", || Ok("AB"))
            .build()
            .unwrap();
        let mut router = router_with(table, Some("#a/b"));
        router.start().unwrap();

        router.sync_from_external("#nowhere").unwrap();
        assert_eq!(router.current_route().as_str(), "nowhere");
        assert_eq!(router.slot().contents, Some("H"));
        assert!(is_active(&router.controls()[0]));
        assert!(!is_active(&router.controls()[1]));
    }

    #[test]
    fn test_navigate_notification_is_absorbed() {
        use std::sync::mpsc;

        let ab_calls = Rc::new(Cell::new(0));
        let table = RouteTable::builder()
            .route("home", || Ok("H"))
            .route("a/b", counted("AB", &ab_calls))
            .build()
            .unwrap();
        let (tx, rx) = mpsc::channel();
        let mut location = HashLocation::new("");
        location.subscribe(tx);
        let mut router = Router::new(
            table,
            highlighter(),
            RecordingSlot::new(),
            Some(Box::new(location)),
        );
        router.start().unwrap();

        router.navigate(resolve("a/b")).unwrap();
        let token = rx.try_recv().unwrap();
        assert!(!router.sync_from_external(&token).unwrap());
        assert_eq!(ab_calls.get(), 1);
    }
}
