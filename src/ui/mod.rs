//! User interface rendering layer with component-based architecture.
//!
//! This module turns the session into ANSI-styled output through composable
//! rendering components. It provides theme support, responsive layout, and
//! match highlighting.
//!
//! # Architecture
//!
//! ```text
//! Session → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, HelpOverlay, ItemKind, NoticeLine,
    SearchBarInfo, UIViewModel,
};
