//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Startpage library
//! and the Zellij plugin system. It implements the `ZellijPlugin` and
//! `ZellijWorker` traits, translates Zellij events into library events, and
//! turns library actions into host calls. Everything else lives in the
//! library so it can be tested without a Zellij host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← Session, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │   WorkerShim     │   │  ← Storage, import/export
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create the `Session`
//! 2. **Subscribe**: Register for Key, `CustomMessage`, `RunCommandResult`, `Visible` events
//! 3. **Permissions granted**: Ask the worker to load bookmarks and settings
//! 4. **Visible**: Reload so edits made in an editor show up
//! 5. **Update**: Handle events, delegate to library layer
//! 6. **Render**: Call library render function
//!
//! # Keybindings
//!
//! - `Ctrl+n`/`Down`: Move selection down
//! - `Ctrl+p`/`Up`: Move selection up
//! - `Enter`: Open, run, navigate, or search
//! - `Esc`: Close help, cancel a prompt, or clear the query
//! - `Ctrl+c`: Hide the start page
//! - Anything printable: Type into the search box

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use startpage::infrastructure::host_path;
use startpage::worker::{init_worker_tracing, StartpageWorker, WorkerMessage, WorkerResponse};
use startpage::{handle_event, Action, Config, Event, Session};

register_plugin!(State);
register_worker!(WorkerShim, startpage_worker, STARTPAGE_WORKER);

/// Name shared by the worker registration and its reply messages.
const WORKER_NAME: &str = "startpage";

/// Plugin state wrapper.
///
/// Wraps the library's `Session` with the configured opener command.
struct State {
    /// Core application state from library layer.
    session: Session,

    /// Program that opens URLs (`xdg-open`, `open`, ...).
    open_command: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            session: startpage::initialize(&default_config),
            open_command: default_config.open_command,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests:
    /// - `RunCommands`: Launch the URL opener
    /// - `FullHdAccess`: Read the seed file and write exports
    /// - `OpenFiles`: Open bucket files for `:config` and `:bookmark`
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        startpage::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.session = startpage::initialize(&config);
        self.open_command.clone_from(&config.open_command);

        request_permission(&[
            PermissionType::RunCommands,
            PermissionType::FullHdAccess,
            PermissionType::OpenFiles,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
            EventType::Visible,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                match Self::map_command_result_event(exit_code, stderr) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("permissions granted - loading start page data");
                Event::Initialize
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("permissions denied - plugin functionality limited");
                return false;
            }
            zellij_tile::prelude::Event::Visible(true) => Event::Reload,
            _ => return false,
        };

        match handle_event(&mut self.session, &our_event) {
            Ok((should_render, actions)) => {
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        startpage::ui::render(&self.session, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('c') => Some(Event::CloseFocus),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Maps the opener's exit status; only failures reach the library.
    fn map_command_result_event(exit_code: Option<i32>, stderr: Vec<u8>) -> Option<Event> {
        if exit_code == Some(0) {
            return None;
        }

        let stderr = String::from_utf8(stderr).unwrap_or_default();
        let error = if stderr.trim().is_empty() {
            exit_code.map_or_else(
                || "opener was terminated".to_string(),
                |code| format!("opener exited with status {code}"),
            )
        } else {
            stderr.trim().to_string()
        };
        tracing::debug!(error = %error, "opener command failed");
        Some(Event::OpenerFailed { error })
    }

    /// Serializes a message and posts it to the worker thread.
    ///
    /// Serialization errors are logged, not propagated.
    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Translates a library action into Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::OpenUrl { url } => {
                run_command(&[self.open_command.as_str(), url.as_str()], BTreeMap::new());
                hide_self();
            }
            Action::EditFile { path } => {
                open_file(FileToOpen::new(host_path(path)), BTreeMap::new());
                hide_self();
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
        }
    }
}

/// Zellij-facing wrapper around [`StartpageWorker`].
///
/// The worker itself never touches host functions; this shim feeds it
/// payloads and posts its replies back to the plugin.
#[derive(Default, Serialize, Deserialize)]
struct WorkerShim {
    #[serde(skip)]
    worker: StartpageWorker,
}

impl ZellijWorker<'_> for WorkerShim {
    fn on_message(&mut self, message: String, payload: String) {
        init_worker_tracing();

        if let Some(payload) = self.worker.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            });
        }
    }
}
