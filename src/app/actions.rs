//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a
//! `Vec<Action>` and the plugin shim executes them in order, which keeps the
//! whole input engine testable without a host.
//!
//! # Example
//!
//! ```rust
//! use startpage::app::Action;
//! use startpage::worker::WorkerMessage;
//! use std::path::PathBuf;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load(PathBuf::from("/host/data.json"))),
//!     Action::OpenUrl { url: "https://github.com".to_string() },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;
use std::path::PathBuf;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the floating pane.
    CloseFocus,

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Opens a URL in the user's browser and hides the pane.
    ///
    /// Produced for bookmarks, typed URLs, and web searches alike.
    OpenUrl {
        /// Fully formed URL, scheme included.
        url: String,
    },

    /// Opens a file in the user's editor and hides the pane.
    EditFile {
        /// Sandbox path of the file.
        path: PathBuf,
    },
}
