//! # Core Application Logic
//!
//! The dashboard's routing and business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │            CORE              │
//!                    │  (this module)               │
//!                    │                              │
//!                    │  • Router (route → view)     │
//!                    │  • Highlight reconciler      │
//!                    │  • Action / update (reducer) │
//!                    │                              │
//!                    │  No terminal I/O.            │
//!                    └──────────────┬───────────────┘
//!                                   │
//!            ┌──────────────────────┼──────────────────────┐
//!            ▼                      ▼                      ▼
//!     ┌────────────┐         ┌────────────┐         ┌────────────┐
//!     │    TUI     │         │    Web     │         │   Tests    │
//!     │  Adapter   │         │  Adapter   │         │  (doubles) │
//!     │ (ratatui)  │         │  (future)  │         │            │
//!     └────────────┘         └────────────┘         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`route`]: `Route` and the total `resolve()` normalizer
//! - [`router`]: route table, content slot, and the `Router` itself
//! - [`highlight`]: navigation controls and the delta-only reconciler
//! - [`location`]: the location provider trait and an in-memory hash history
//! - [`scheduler`]: periodic location polling on tokio
//! - [`pages`] / [`nav`]: the dashboard's pages and header buttons
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod highlight;
pub mod location;
pub mod nav;
pub mod pages;
pub mod route;
pub mod router;
pub mod scheduler;
pub mod state;

pub use route::{Route, resolve};
pub use router::Router;
