//! Application layer: the start page input engine.
//!
//! This module sits between the plugin runtime (main.rs) and the
//! domain/storage/worker layers. It classifies every query, keeps the
//! selection, decides what Enter does, and turns that decision into actions.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Key → Event → handle_event → Session (resolve_mode, Cursor) → resolve_commit → Actions
//!                    ↑                                                            ↓
//!                    └──────────────────── Worker Responses ──────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`matcher`]: Bookmark and command match predicates
//! - [`modes`]: The [`Mode`] enum and the mode resolver
//! - [`cursor`]: Clamped selection cursor
//! - [`commit`]: Commit resolution and URL classification
//! - [`state`]: The [`Session`] container and view model computation
//! - [`handler`]: Event processing and command dispatch
//! - [`actions`]: Side effect commands emitted by the event handler
//!
//! # Example
//!
//! ```rust
//! use startpage::app::{handle_event, Event, Session, SessionPaths};
//! use startpage::ui::Theme;
//!
//! let mut session = Session::new(Theme::default(), SessionPaths::default());
//! let (_, actions) = handle_event(&mut session, &Event::KeyDown)?;
//! assert!(actions.is_empty());
//! # Ok::<(), startpage::StartpageError>(())
//! ```

pub mod actions;
pub mod commit;
pub mod cursor;
pub mod handler;
pub mod matcher;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use commit::{resolve_commit, Resolution};
pub use cursor::{Cursor, Direction};
pub use handler::{handle_event, Event};
pub use modes::{resolve_mode, Mode, ModeResolution};
pub use state::{LoadState, Notice, NoticeKind, Pending, Session, SessionPaths};
