//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::{PageEntry, ResolvedConfig};
use crate::core::highlight::{ControlId, NavControl, StyleDescriptor};
use crate::core::location::{HashLocation, Location};
use crate::core::router::{ContentSlot, ViewError};
use crate::core::state::App;

/// A nav control that counts every write made to it.
pub struct CountingControl {
    id: ControlId,
    style: StyleDescriptor,
    icon: String,
    pub style_writes: usize,
    pub icon_writes: usize,
}

impl CountingControl {
    pub fn new(id: ControlId, icon: &str) -> Self {
        Self {
            id,
            style: StyleDescriptor::resting(),
            icon: icon.to_string(),
            style_writes: 0,
            icon_writes: 0,
        }
    }

    pub fn total_writes(&self) -> usize {
        self.style_writes + self.icon_writes
    }

    pub fn reset_counts(&mut self) {
        self.style_writes = 0;
        self.icon_writes = 0;
    }
}

impl NavControl for CountingControl {
    fn id(&self) -> ControlId {
        self.id
    }

    fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    fn set_style(&mut self, style: StyleDescriptor) {
        self.style = style;
        self.style_writes += 1;
    }

    fn icon(&self) -> &str {
        &self.icon
    }

    fn set_icon(&mut self, icon: &str) {
        self.icon = icon.to_string();
        self.icon_writes += 1;
    }
}

/// A content slot that records what was mounted.
pub struct RecordingSlot<V> {
    pub contents: Option<V>,
    pub replacements: usize,
    rejected: Vec<V>,
}

impl<V> RecordingSlot<V> {
    pub fn new() -> Self {
        Self {
            contents: None,
            replacements: 0,
            rejected: Vec::new(),
        }
    }

    /// Make mounting `view` fail from now on.
    pub fn reject(&mut self, view: V) {
        self.rejected.push(view);
    }
}

impl<V: PartialEq> ContentSlot<V> for RecordingSlot<V> {
    fn replace_contents(&mut self, view: V) -> Result<(), ViewError> {
        if self.rejected.contains(&view) {
            return Err(ViewError::Build("mount rejected".to_string()));
        }
        self.contents = Some(view);
        self.replacements += 1;
        Ok(())
    }
}

fn test_config(pages: Vec<PageEntry>) -> ResolvedConfig {
    ResolvedConfig {
        initial_token: String::new(),
        poll_interval: Duration::from_millis(300),
        static_mode: false,
        log_level: log::LevelFilter::Off,
        log_file: PathBuf::from("test.log"),
        pages,
        warnings: Vec::new(),
    }
}

/// Creates a test App. `None` builds it in static mode.
pub fn test_app(token: Option<&str>) -> App {
    let location = token.map(|t| Box::new(HashLocation::new(t)) as Box<dyn Location>);
    App::from_config(&test_config(Vec::new()), location).unwrap()
}

/// Creates a test App with one extra configured page backed by `file`.
pub fn test_app_with_page(route: &str, file: PathBuf) -> App {
    let page = PageEntry {
        route: route.to_string(),
        title: route.to_string(),
        file,
        nav: None,
    };
    let location: Box<dyn Location> = Box::new(HashLocation::new(""));
    App::from_config(&test_config(vec![page]), Some(location)).unwrap()
}
