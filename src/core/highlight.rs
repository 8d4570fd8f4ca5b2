//! # Highlight Reconciler
//!
//! Keeps the navigation controls' visual state in line with the current route.
//!
//! Two comparisons drive it:
//!
//! - **identity** (`ControlId`) decides which control is the active one. Two
//!   controls may carry equal styling by coincidence, so values are never used
//!   for this.
//! - **value equality** (`StyleDescriptor`, icon) decides whether a write is
//!   needed at all. Only deltas are written, so reconciling twice with the same
//!   route performs zero writes the second time.
//!
//! ```text
//! route ──► binding[route] ──► active ControlId
//!                                   │
//!   for control in controls (fixed order):
//!       desired = active ? styles.active : styles.default
//!       style != desired.style  → write style
//!       icon  != desired.icon   → write icon
//! ```

use log::debug;
use std::collections::HashMap;

use crate::core::route::Route;

/// Identity of a navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Semibold,
}

/// Which glyph family the control's icon is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconFont {
    #[default]
    Outlined,
    Filled,
}

/// Typed look of a navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleDescriptor {
    pub weight: FontWeight,
    /// Subtle background tint behind the whole control.
    pub tinted: bool,
    pub icon_font: IconFont,
}

impl StyleDescriptor {
    /// Resting look: regular weight, no tint, outlined icon.
    pub const fn resting() -> Self {
        Self {
            weight: FontWeight::Regular,
            tinted: false,
            icon_font: IconFont::Outlined,
        }
    }

    /// Highlighted look: semibold, tinted, filled icon.
    pub const fn highlighted() -> Self {
        Self {
            weight: FontWeight::Semibold,
            tinted: true,
            icon_font: IconFont::Filled,
        }
    }
}

/// Style + icon pair a control should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualState {
    pub style: StyleDescriptor,
    pub icon: String,
}

impl VisualState {
    pub fn new(style: StyleDescriptor, icon: impl Into<String>) -> Self {
        Self {
            style,
            icon: icon.into(),
        }
    }
}

/// The two looks of a single control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlStates {
    pub default: VisualState,
    pub active: VisualState,
}

impl ControlStates {
    /// Resting/highlighted pair with an outlined and a filled icon name.
    pub fn with_icons(outlined: &str, filled: &str) -> Self {
        Self {
            default: VisualState::new(StyleDescriptor::resting(), outlined),
            active: VisualState::new(StyleDescriptor::highlighted(), filled),
        }
    }
}

/// Typed table ControlId → looks, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ControlStyles {
    states: HashMap<ControlId, ControlStates>,
}

impl ControlStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: ControlId, states: ControlStates) -> Self {
        self.states.insert(id, states);
        self
    }

    pub fn get(&self, id: ControlId) -> Option<&ControlStates> {
        self.states.get(&id)
    }
}

/// Ordered mapping Route → ControlId. Several routes may share one control.
#[derive(Debug, Clone, Default)]
pub struct ControlBinding {
    entries: Vec<(Route, ControlId)>,
}

impl ControlBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `route` to `control`, replacing any earlier binding for the route.
    pub fn bind(mut self, route: impl Into<Route>, control: ControlId) -> Self {
        let route = route.into();
        if let Some(entry) = self.entries.iter_mut().find(|(r, _)| *r == route) {
            entry.1 = control;
        } else {
            self.entries.push((route, control));
        }
        self
    }

    pub fn get(&self, route: &Route) -> Option<ControlId> {
        self.entries
            .iter()
            .find(|(r, _)| r == route)
            .map(|(_, id)| *id)
    }

    pub fn contains(&self, route: &Route) -> bool {
        self.get(route).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Route, ControlId)> {
        self.entries.iter()
    }
}

/// A navigational UI element whose look follows the current route.
pub trait NavControl {
    fn id(&self) -> ControlId;
    fn style(&self) -> &StyleDescriptor;
    fn set_style(&mut self, style: StyleDescriptor);
    fn icon(&self) -> &str;
    fn set_icon(&mut self, icon: &str);
}

/// Outcome of one reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    pub active: Option<ControlId>,
    pub writes: usize,
}

/// Bring every control's look in line with `route`, writing only deltas.
///
/// Controls without an entry in `styles` are left untouched. A route with no
/// binding leaves every control in its default look.
pub fn reconcile<C: NavControl>(
    route: &Route,
    binding: &ControlBinding,
    styles: &ControlStyles,
    controls: &mut [C],
) -> ReconcileReport {
    let active = binding.get(route);
    let mut writes = 0;

    for control in controls.iter_mut() {
        let Some(states) = styles.get(control.id()) else {
            debug!("No styles for control {:?}, leaving it as is", control.id());
            continue;
        };
        let desired = if Some(control.id()) == active {
            &states.active
        } else {
            &states.default
        };

        if *control.style() != desired.style {
            control.set_style(desired.style);
            writes += 1;
        }
        if control.icon() != desired.icon {
            control.set_icon(&desired.icon);
            writes += 1;
        }
    }

    ReconcileReport { active, writes }
}

/// Controls plus the tables that decide how they look.
pub struct Highlighter<C> {
    binding: ControlBinding,
    styles: ControlStyles,
    controls: Vec<C>,
}

impl<C: NavControl> Highlighter<C> {
    pub fn new(binding: ControlBinding, styles: ControlStyles, controls: Vec<C>) -> Self {
        Self {
            binding,
            styles,
            controls,
        }
    }

    pub fn reconcile(&mut self, route: &Route) -> ReconcileReport {
        reconcile(route, &self.binding, &self.styles, &mut self.controls)
    }

    pub fn binding(&self) -> &ControlBinding {
        &self.binding
    }

    pub fn controls(&self) -> &[C] {
        &self.controls
    }
}
