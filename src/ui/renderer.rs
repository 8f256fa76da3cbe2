//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform the `Session` into a `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component layout
//!
//! # Example
//!
//! ```rust
//! use startpage::app::{Session, SessionPaths};
//! use startpage::ui::{render, Theme};
//!
//! let session = Session::new(Theme::default(), SessionPaths::default());
//! render(&session, 24, 80); // Renders to stdout
//! ```

use crate::app::Session;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// # Parameters
///
/// * `session` - Current session
/// * `rows` - Pane height in rows
/// * `cols` - Pane width in columns
///
/// # Output
///
/// Prints ANSI-styled output with absolute cursor positioning. Does not clear
/// the screen; Zellij hands the plugin a fresh frame on every render.
pub fn render(session: &Session, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = session.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &session.theme, cols, rows);
}
