//! # Navigation Controls
//!
//! The dashboard's three header buttons and the tables that drive their look.
//!
//! ```text
//!  Button     target route                 routes that light it up
//!  ───────    ──────────────────────────   ─────────────────────────────────
//!  Home       home                         home
//!  Modeling   modeling/calculation-setup   modeling/process-definition,
//!                                          modeling/calculation-setup
//!  Results    results/impact-overview      results/impact-overview,
//!                                          results/contribution-analysis
//! ```
//!
//! Pages added through `[[pages]]` in the config can bind to any section.

use serde::{Deserialize, Serialize};

use crate::core::config::PageEntry;
use crate::core::highlight::{
    ControlBinding, ControlId, ControlStates, ControlStyles, NavControl, StyleDescriptor,
};
use crate::core::pages;
use crate::core::route::{Route, resolve};

pub const HOME_BUTTON: ControlId = ControlId(0);
pub const MODELING_BUTTON: ControlId = ControlId(1);
pub const RESULTS_BUTTON: ControlId = ControlId(2);

/// Header section a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavSection {
    Home,
    Modeling,
    Results,
}

impl NavSection {
    pub fn control(self) -> ControlId {
        match self {
            NavSection::Home => HOME_BUTTON,
            NavSection::Modeling => MODELING_BUTTON,
            NavSection::Results => RESULTS_BUTTON,
        }
    }
}

/// A header button. Clicking it navigates to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    id: ControlId,
    label: String,
    target: Route,
    style: StyleDescriptor,
    icon: String,
}

impl NavButton {
    pub fn new(id: ControlId, label: &str, target: &str, icon: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            target: resolve(target),
            style: StyleDescriptor::resting(),
            icon: icon.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> &Route {
        &self.target
    }
}

impl NavControl for NavButton {
    fn id(&self) -> ControlId {
        self.id
    }

    fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    fn set_style(&mut self, style: StyleDescriptor) {
        self.style = style;
    }

    fn icon(&self) -> &str {
        &self.icon
    }

    fn set_icon(&mut self, icon: &str) {
        self.icon = icon.to_string();
    }
}

/// Header buttons in display order.
pub fn nav_buttons() -> Vec<NavButton> {
    vec![
        NavButton::new(HOME_BUTTON, "Home", pages::HOME, "home_outlined"),
        NavButton::new(
            MODELING_BUTTON,
            "Modeling",
            pages::CALCULATION_SETUP,
            "settings_outlined",
        ),
        NavButton::new(
            RESULTS_BUTTON,
            "Results",
            pages::IMPACT_OVERVIEW,
            "insert_chart_outlined",
        ),
    ]
}

pub fn control_styles() -> ControlStyles {
    ControlStyles::new()
        .with(HOME_BUTTON, ControlStates::with_icons("home_outlined", "home"))
        .with(
            MODELING_BUTTON,
            ControlStates::with_icons("settings_outlined", "settings"),
        )
        .with(
            RESULTS_BUTTON,
            ControlStates::with_icons("insert_chart_outlined", "insert_chart"),
        )
}

/// Route → button binding for the built-in pages plus any configured ones.
pub fn control_binding(extra: &[PageEntry]) -> ControlBinding {
    let builtin = ControlBinding::new()
        .bind(pages::HOME, HOME_BUTTON)
        .bind(pages::PROCESS_DEFINITION, MODELING_BUTTON)
        .bind(pages::CALCULATION_SETUP, MODELING_BUTTON)
        .bind(pages::IMPACT_OVERVIEW, RESULTS_BUTTON)
        .bind(pages::CONTRIBUTION_ANALYSIS, RESULTS_BUTTON);

    extra.iter().fold(builtin, |binding, page| match page.nav {
        Some(section) => binding.bind(page.route.as_str(), section.control()),
        None => binding,
    })
}
