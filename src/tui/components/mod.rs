//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: application name, location token and status message
//!
//! ## Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; the component struct is rebuilt each
//! frame with fresh props and a `&mut` to its state:
//!
//! - `NavBar` / `NavBarState`: header buttons, keyboard focus, mouse hit testing
//! - `ContentView` / `ContentPaneState`: the mounted page with scrolling
//! - `FilterInput` / `FilterInputState`: process filter text, over the help line
//!
//! Each file carries its state type, event type, rendering, event handling
//! and tests.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top status line)
//! ├── nav_bar.rs       (header buttons)
//! ├── content_pane.rs  (scrollable page)
//! └── filter_input.rs  (process filter)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod nav_bar;
pub use nav_bar::{NavBar, NavBarState, NavEvent};

pub mod content_pane;
pub use content_pane::{ContentPaneState, ContentView};

pub mod filter_input;
pub use filter_input::{FilterEvent, FilterInput, FilterInputState};
