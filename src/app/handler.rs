//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes key input,
//! runtime notifications, and worker responses, translating them into session
//! changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. The session is mutated through its own methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Lifecycle**: `Initialize`, `Reload`, `CloseFocus`
//! - **Input**: `Char`, `Backspace`, `KeyUp`, `KeyDown`, `Submit`, `Escape`
//! - **Runtime**: `OpenerFailed`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use startpage::app::{handle_event, Event, Session, SessionPaths};
//! use startpage::ui::Theme;
//!
//! let mut session = Session::new(Theme::default(), SessionPaths::default());
//! let (should_render, actions) = handle_event(&mut session, &Event::Char('g'))?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), startpage::StartpageError>(())
//! ```

use super::commit::Resolution;
use super::cursor::{Cursor, Direction};
use super::modes::Mode;
use super::state::{LoadState, Notice, Pending, Session};
use super::Action;
use crate::domain::{Command, CommandKind, Result};
use crate::infrastructure::{display_path, expand_tilde};
use crate::storage::Bucket;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::path::PathBuf;

/// Events triggered by user input, runtime notifications, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Requests the first data load. Later calls are no-ops.
    Initialize,
    /// Re-reads storage after the pane becomes visible again.
    Reload,
    /// Appends a character to the active text field.
    Char(char),
    /// Removes the last character from the active text field.
    Backspace,
    /// Moves the selection up by one row (clamped).
    KeyUp,
    /// Moves the selection down by one row (clamped).
    KeyDown,
    /// Enter: commits the query, the selection, or the open prompt.
    Submit,
    /// Closes help, cancels a prompt, or clears the query.
    Escape,
    /// Hides the floating pane.
    CloseFocus,

    /// The opener command exited with an error.
    OpenerFailed {
        /// Captured stderr, or the exit code when stderr was empty.
        error: String,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Whether this event comes from the keyboard.
    const fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::Char(_) | Self::Backspace | Self::KeyUp | Self::KeyDown | Self::Submit | Self::Escape
        )
    }
}

/// Processes an event, mutates the session, and returns actions to execute.
///
/// Any key press first clears the previous notice.
///
/// # Parameters
///
/// * `session` - Mutable reference to the session
/// * `event` - Event to process
///
/// # Returns
///
/// `(should_render, actions)`. Actions run in order; the list is empty when
/// the event only changes what is drawn.
///
/// # Errors
///
/// Currently never fails; the signature leaves room for fallible actions.
///
/// # Example
///
/// ```rust
/// use startpage::app::{handle_event, Action, Event, Session, SessionPaths};
/// use startpage::ui::Theme;
///
/// let mut session = Session::new(Theme::default(), SessionPaths::default());
/// let (_, actions) = handle_event(&mut session, &Event::Initialize)?;
/// assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
///
/// let (_, actions) = handle_event(&mut session, &Event::Initialize)?;
/// assert!(actions.is_empty());
/// # Ok::<(), startpage::StartpageError>(())
/// ```
pub fn handle_event(session: &mut Session, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let cleared_notice = event.is_user_input() && session.notice.take().is_some();

    let (should_render, actions) = match event {
        Event::Initialize => {
            if session.load_state != LoadState::Pending {
                tracing::debug!(state = ?session.load_state, "initialize ignored");
                return Ok((false, vec![]));
            }
            session.load_state = LoadState::Requested;
            (false, vec![load_request(session)])
        }
        Event::Reload => {
            if session.load_state == LoadState::Ready {
                (false, vec![load_request(session)])
            } else {
                (false, vec![])
            }
        }
        Event::Char(c) => handle_char(session, *c),
        Event::Backspace => handle_backspace(session),
        Event::KeyUp => {
            session.move_cursor(Direction::Up);
            (true, vec![])
        }
        Event::KeyDown => {
            session.move_cursor(Direction::Down);
            (true, vec![])
        }
        Event::Submit => handle_submit(session),
        Event::Escape => {
            handle_escape(session);
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::OpenerFailed { error } => {
            tracing::warn!(error = %error, "opener command failed");
            session.notice = Some(Notice::error(format!("Could not open browser: {error}")));
            (true, vec![])
        }
        Event::WorkerResponse(response) => handle_worker_response(session, response),
    };

    Ok((should_render || cleared_notice, actions))
}

fn load_request(session: &Session) -> Action {
    Action::PostToWorker(WorkerMessage::load(session.paths.seed_file.clone()))
}

fn handle_char(session: &mut Session, c: char) -> (bool, Vec<Action>) {
    if let Some(Pending::ImportPath(path)) = &mut session.pending {
        path.push(c);
        return (true, vec![]);
    }

    if session.pending == Some(Pending::ConfirmReset) {
        return match c {
            'y' | 'Y' => {
                session.pending = None;
                tracing::debug!("reset confirmed");
                session.notice = Some(Notice::info("Resetting..."));
                let seed_file = session.paths.seed_file.clone();
                (true, vec![Action::PostToWorker(WorkerMessage::reset(seed_file))])
            }
            'n' | 'N' => {
                session.pending = None;
                session.notice = Some(Notice::info("Reset cancelled"));
                (true, vec![])
            }
            _ => (false, vec![]),
        };
    }

    session.help_visible = false;
    session.raw_query.push(c);
    session.refresh_mode();
    tracing::trace!(query = %session.raw_query, char = %c, "query updated");
    (true, vec![])
}

fn handle_backspace(session: &mut Session) -> (bool, Vec<Action>) {
    if let Some(Pending::ImportPath(path)) = &mut session.pending {
        path.pop();
        return (true, vec![]);
    }

    if session.pending.is_some() || session.raw_query.pop().is_none() {
        return (false, vec![]);
    }

    session.refresh_mode();
    (true, vec![])
}

fn handle_submit(session: &mut Session) -> (bool, Vec<Action>) {
    match &session.pending {
        Some(Pending::ImportPath(path)) => {
            let path = path.trim().to_string();
            return submit_import(session, path);
        }
        Some(Pending::ConfirmReset) => return (false, vec![]),
        None => {}
    }

    let resolution = session.commit();
    tracing::debug!(resolution = ?resolution, query = %session.raw_query, "commit resolved");

    match resolution {
        Resolution::RunCommand(command) => run_command(session, command),
        Resolution::OpenBookmark(bookmark) => open_url(session, bookmark.url),
        Resolution::Navigate(url) | Resolution::Search(url) => open_url(session, url),
        Resolution::NoOp => (false, vec![]),
    }
}

fn submit_import(session: &mut Session, path: String) -> (bool, Vec<Action>) {
    if path.is_empty() {
        return (false, vec![]);
    }

    session.pending = None;
    let path = PathBuf::from(expand_tilde(&path));
    session.notice = Some(Notice::info(format!("Importing {}...", display_path(&path))));
    session.clear_query();

    tracing::debug!(path = %path.display(), "import requested");
    (
        true,
        vec![Action::PostToWorker(WorkerMessage::import(
            path,
            session.paths.seed_file.clone(),
        ))],
    )
}

fn open_url(session: &mut Session, url: String) -> (bool, Vec<Action>) {
    session.help_visible = false;
    session.clear_query();
    (true, vec![Action::OpenUrl { url }])
}

fn run_command(session: &mut Session, command: Command) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("run_command", command = command.name).entered();

    let help_was_visible = session.help_visible;
    session.help_visible = false;

    if command.kind == CommandKind::List {
        session.sticky_list_all = true;
        session.set_query(String::new());
        return (true, vec![]);
    }

    session.raw_query = command.name.to_string();
    session.mode = Mode::CommandSuggest(vec![]);
    session.cursor = Cursor::new();

    let seed_file = session.paths.seed_file.clone();
    let actions = match command.kind {
        CommandKind::Config => vec![Action::PostToWorker(WorkerMessage::prepare_edit(
            Bucket::Settings,
            seed_file,
        ))],
        CommandKind::Bookmark => vec![Action::PostToWorker(WorkerMessage::prepare_edit(
            Bucket::Bookmarks,
            seed_file,
        ))],
        CommandKind::Export => {
            session.notice = Some(Notice::info("Exporting..."));
            vec![Action::PostToWorker(WorkerMessage::export(
                session.paths.export_dir.clone(),
                seed_file,
            ))]
        }
        CommandKind::Import => {
            let prefill = format!("{}/", display_path(&session.paths.export_dir));
            session.pending = Some(Pending::ImportPath(prefill));
            vec![]
        }
        CommandKind::Help => {
            session.help_visible = !help_was_visible;
            vec![]
        }
        CommandKind::Reset => {
            session.pending = Some(Pending::ConfirmReset);
            vec![]
        }
        CommandKind::List => vec![],
    };

    (true, actions)
}

fn handle_escape(session: &mut Session) {
    if session.help_visible {
        session.help_visible = false;
        return;
    }

    if let Some(pending) = session.pending.take() {
        let text = match pending {
            Pending::ConfirmReset => "Reset cancelled",
            Pending::ImportPath(_) => "Import cancelled",
        };
        session.notice = Some(Notice::info(text));
        return;
    }

    session.clear_query();
}

fn handle_worker_response(session: &mut Session, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::Loaded(data) => {
            tracing::debug!(
                bookmarks = data.bookmarks.len(),
                source = ?data.source,
                "data loaded"
            );
            session.apply_data(data.clone());
            (true, vec![])
        }
        WorkerResponse::Exported { path } => {
            session.notice = Some(Notice::info(format!("Exported to {}", display_path(path))));
            (true, vec![])
        }
        WorkerResponse::Imported(data) => {
            session.apply_data(data.clone());
            session.notice = Some(Notice::info("Import successful"));
            (true, vec![])
        }
        WorkerResponse::ResetDone(data) => {
            session.apply_data(data.clone());
            session.clear_query();
            session.notice = Some(Notice::info("All settings and bookmarks were reset"));
            (true, vec![])
        }
        WorkerResponse::EditReady { path } => {
            session.clear_query();
            (true, vec![Action::EditFile { path: path.clone() }])
        }
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            session.notice = Some(Notice::error(message.clone()));
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{NoticeKind, SessionPaths};
    use crate::domain::{Bookmark, Settings};
    use crate::storage::{DataSource, StartpageData};
    use crate::ui::Theme;

    fn session_with(bookmarks: Vec<Bookmark>) -> Session {
        let mut session = Session::new(
            Theme::default(),
            SessionPaths {
                seed_file: PathBuf::from("/host/seed.json"),
                export_dir: PathBuf::from("/host/exports"),
            },
        );
        session.apply_data(StartpageData {
            settings: Settings::default(),
            bookmarks,
            source: DataSource::Seed,
        });
        session
    }

    fn send(session: &mut Session, event: Event) -> (bool, Vec<Action>) {
        handle_event(session, &event).expect("handle_event")
    }

    fn type_text(session: &mut Session, text: &str) {
        for c in text.chars() {
            send(session, Event::Char(c));
        }
    }

    #[test]
    fn initialize_requests_one_load() {
        let mut session = Session::new(Theme::default(), SessionPaths::default());
        let (_, actions) = send(&mut session, Event::Initialize);
        assert_eq!(actions.len(), 1);
        assert_eq!(session.load_state, LoadState::Requested);

        let (_, again) = send(&mut session, Event::Initialize);
        assert!(again.is_empty());

        let (_, reload) = send(&mut session, Event::Reload);
        assert!(reload.is_empty(), "reload waits for the first load");
    }

    #[test]
    fn reload_after_ready_posts_load() {
        let mut session = session_with(vec![]);
        let (_, actions) = send(&mut session, Event::Reload);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::Load { .. })]
        ));
    }

    #[test]
    fn typing_resolves_mode_and_resets_cursor() {
        let mut session = session_with(vec![
            Bookmark::new("GitHub", "https://github.com", ["dev"]),
            Bookmark::new("GitLab", "https://gitlab.com", ["dev"]),
        ]);
        type_text(&mut session, "git");
        send(&mut session, Event::KeyDown);
        assert_eq!(session.cursor.index(), 1);

        type_text(&mut session, "l");
        assert_eq!(session.cursor.index(), 0);
        assert_eq!(session.mode.len(), 1);

        send(&mut session, Event::Backspace);
        assert_eq!(session.raw_query, "git");
        assert_eq!(session.mode.len(), 2);
    }

    #[test]
    fn backspace_on_empty_query_does_nothing() {
        let mut session = session_with(vec![]);
        let (render, actions) = send(&mut session, Event::Backspace);
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn submit_with_nothing_is_noop() {
        let mut session = session_with(vec![]);
        let (render, actions) = send(&mut session, Event::Submit);
        assert!(!render);
        assert!(actions.is_empty());

        type_text(&mut session, ":zzz");
        let (_, actions) = send(&mut session, Event::Submit);
        assert!(actions.is_empty());
    }

    #[test]
    fn config_and_bookmark_commands_prepare_edit() {
        let mut session = session_with(vec![]);
        type_text(&mut session, ":conf");
        let (_, actions) = send(&mut session, Event::Submit);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::PrepareEdit { bucket: Bucket::Settings, .. })]
        ));
        assert_eq!(session.raw_query, ":config");
        assert_eq!(session.mode, Mode::CommandSuggest(vec![]));

        session.clear_query();
        type_text(&mut session, ":bookmark");
        let (_, actions) = send(&mut session, Event::Submit);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::PrepareEdit { bucket: Bucket::Bookmarks, .. })]
        ));

        let path = PathBuf::from("/host/data/bookmarks.json");
        let (_, actions) = send(
            &mut session,
            Event::WorkerResponse(WorkerResponse::EditReady { path: path.clone() }),
        );
        assert_eq!(actions, vec![Action::EditFile { path }]);
        assert!(session.raw_query.is_empty());
    }

    #[test]
    fn help_toggles_and_escape_closes_it_first() {
        let mut session = session_with(vec![]);
        type_text(&mut session, ":help");
        send(&mut session, Event::Submit);
        assert!(session.help_visible);
        assert_eq!(session.raw_query, ":help");

        send(&mut session, Event::Escape);
        assert!(!session.help_visible);
        assert_eq!(session.raw_query, ":help", "first Escape only closes help");

        send(&mut session, Event::Submit);
        assert!(session.help_visible);
        send(&mut session, Event::Submit);
        assert!(!session.help_visible);
    }

    #[test]
    fn reset_requires_confirmation() {
        let mut session = session_with(vec![]);
        type_text(&mut session, ":reset");
        let (_, actions) = send(&mut session, Event::Submit);
        assert!(actions.is_empty());
        assert_eq!(session.pending, Some(Pending::ConfirmReset));

        let (_, actions) = send(&mut session, Event::Submit);
        assert!(actions.is_empty(), "Enter does not confirm");
        let (_, actions) = send(&mut session, Event::Char('x'));
        assert!(actions.is_empty());

        send(&mut session, Event::Char('n'));
        assert_eq!(session.pending, None);
        assert_eq!(session.notice, Some(Notice::info("Reset cancelled")));

        send(&mut session, Event::Submit);
        let (_, actions) = send(&mut session, Event::Char('y'));
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::Reset { .. })]
        ));
    }

    #[test]
    fn escape_cancels_pending_prompt() {
        let mut session = session_with(vec![]);
        type_text(&mut session, ":import");
        send(&mut session, Event::Submit);
        assert_eq!(
            session.pending,
            Some(Pending::ImportPath("~/exports/".to_string()))
        );

        send(&mut session, Event::Escape);
        assert_eq!(session.pending, None);
        assert_eq!(session.notice, Some(Notice::info("Import cancelled")));
        assert_eq!(session.raw_query, ":import");
    }

    #[test]
    fn import_prompt_posts_expanded_path() {
        let mut session = session_with(vec![]);
        type_text(&mut session, ":import");
        send(&mut session, Event::Submit);

        type_text(&mut session, "old.json");
        send(&mut session, Event::Backspace);
        type_text(&mut session, "n");
        let (_, actions) = send(&mut session, Event::Submit);

        let [Action::PostToWorker(WorkerMessage::Import { path, .. })] = actions.as_slice() else {
            panic!("expected an import request, got {actions:?}");
        };
        assert_eq!(path, &PathBuf::from("/host/exports/old.json"));
        assert_eq!(session.pending, None);
        assert!(session.raw_query.is_empty());
    }

    #[test]
    fn export_reports_written_path() {
        let mut session = session_with(vec![]);
        type_text(&mut session, ":export");
        let (_, actions) = send(&mut session, Event::Submit);
        let [Action::PostToWorker(WorkerMessage::Export { dir, .. })] = actions.as_slice() else {
            panic!("expected an export request, got {actions:?}");
        };
        assert_eq!(dir, &PathBuf::from("/host/exports"));

        send(
            &mut session,
            Event::WorkerResponse(WorkerResponse::Exported {
                path: PathBuf::from("/host/exports/startpage-export-2026-10-15.json"),
            }),
        );
        assert_eq!(
            session.notice,
            Some(Notice::info("Exported to ~/exports/startpage-export-2026-10-15.json"))
        );
    }

    #[test]
    fn worker_errors_become_error_notices() {
        let mut session = session_with(vec![]);
        send(
            &mut session,
            Event::WorkerResponse(WorkerResponse::Error {
                message: "Failed to import: invalid file format".to_string(),
            }),
        );
        let notice = session.notice.clone().expect("notice");
        assert_eq!(notice.kind, NoticeKind::Error);

        let (render, _) = send(&mut session, Event::Backspace);
        assert!(render, "clearing a notice redraws");
        assert_eq!(session.notice, None);
    }

    #[test]
    fn opener_failure_is_reported() {
        let mut session = session_with(vec![]);
        send(
            &mut session,
            Event::OpenerFailed {
                error: "xdg-open: not found".to_string(),
            },
        );
        assert_eq!(
            session.notice,
            Some(Notice::error("Could not open browser: xdg-open: not found"))
        );
    }

    #[test]
    fn reset_done_returns_to_empty() {
        let mut session = session_with(vec![Bookmark::new("A", "https://a.com", ["x"])]);
        session.sticky_list_all = true;
        session.set_query("a");

        send(
            &mut session,
            Event::WorkerResponse(WorkerResponse::ResetDone(StartpageData::defaults())),
        );
        assert_eq!(session.mode, Mode::Empty);
        assert!(!session.sticky_list_all);
        assert!(session.bookmarks.is_empty());
    }
}
