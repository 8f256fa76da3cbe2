//! Session state and view model computation.
//!
//! [`Session`] is the single source of truth for the start page: the loaded
//! bookmarks and settings, the raw query, the active [`Mode`], the cursor, and
//! the transient prompts layered on top of the search box. Only
//! [`handle_event`](super::handle_event) mutates it.
//!
//! # State Components
//!
//! - **Data**: bookmarks and settings, replaced wholesale when the worker answers
//! - **Query**: raw search box text, the mode it resolved to, and the cursor
//! - **Sticky list**: set by `:list`, keeps every bookmark visible on an empty query
//! - **Prompts**: help overlay, reset confirmation, import path entry
//! - **Notice**: last message shown to the user
//!
//! # Example
//!
//! ```rust
//! use startpage::app::{LoadState, Session, SessionPaths};
//! use startpage::ui::Theme;
//!
//! let mut session = Session::new(Theme::default(), SessionPaths::default());
//! session.set_query("git");
//! assert_eq!(session.load_state, LoadState::Pending);
//! let viewmodel = session.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.search_bar.query, "git");
//! ```

use super::commit::{resolve_commit, Resolution};
use super::cursor::{Cursor, Direction};
use super::matcher::highlight_range;
use super::modes::{resolve_mode, Mode};
use crate::domain::{Bookmark, Command, Settings, COMMANDS};
use crate::infrastructure::{default_seed_file, get_data_dir};
use crate::storage::StartpageData;
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, HelpOverlay, ItemKind, NoticeLine,
    SearchBarInfo, UIViewModel, TITLE_COLUMN_WIDTH,
};
use std::path::PathBuf;

/// Rows taken by everything except the result list.
///
/// Blank line, header, border, three-line search box, column headers, notice,
/// border, footer.
const CHROME_ROWS: usize = 10;

/// A prompt that takes over the search box until answered or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// `:reset` is waiting for `y` or `n`.
    ConfirmReset,
    /// `:import` is collecting a file path; holds the text typed so far.
    ImportPath(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Message shown above the footer until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Progress of the initial data load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet; waiting for permissions.
    #[default]
    Pending,
    /// A load request is in flight.
    Requested,
    /// Data arrived at least once.
    Ready,
}

/// Files and directories the session hands to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    /// Seed document used when storage is incomplete.
    pub seed_file: PathBuf,
    /// Directory export files are written to, and the import prompt's prefill.
    pub export_dir: PathBuf,
}

impl Default for SessionPaths {
    fn default() -> Self {
        Self {
            seed_file: default_seed_file(),
            export_dir: get_data_dir(),
        }
    }
}

/// Central start page state.
#[derive(Debug, Clone)]
pub struct Session {
    /// Every bookmark, in display order.
    pub bookmarks: Vec<Bookmark>,

    pub settings: Settings,

    /// Search box text exactly as typed.
    pub raw_query: String,

    /// Result of the last mode resolution. Recomputed on every query change.
    pub mode: Mode,

    /// Selected index into `mode`'s matches.
    pub cursor: Cursor,

    /// Set by `:list`; an empty query shows every bookmark while it holds.
    pub sticky_list_all: bool,

    pub help_visible: bool,

    pub pending: Option<Pending>,

    pub notice: Option<Notice>,

    pub load_state: LoadState,

    /// Theme as configured, before the stored colour settings apply.
    pub base_theme: Theme,

    /// Theme used for rendering.
    pub theme: Theme,

    pub paths: SessionPaths,
}

impl Session {
    /// Creates an empty session waiting for its first load.
    ///
    /// # Parameters
    ///
    /// * `theme` - Configured color scheme
    /// * `paths` - Seed file and export directory for worker requests
    #[must_use]
    pub fn new(theme: Theme, paths: SessionPaths) -> Self {
        let settings = Settings::default();
        Self {
            bookmarks: vec![],
            theme: theme.with_settings(&settings),
            settings,
            raw_query: String::new(),
            mode: Mode::Empty,
            cursor: Cursor::new(),
            sticky_list_all: false,
            help_visible: false,
            pending: None,
            notice: None,
            load_state: LoadState::Pending,
            base_theme: theme,
            paths,
        }
    }

    /// Replaces the query and re-resolves the mode.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.raw_query = query.into();
        self.refresh_mode();
    }

    /// Clears the query and the sticky list, leaving the session in `Empty` mode.
    pub fn clear_query(&mut self) {
        self.sticky_list_all = false;
        self.set_query(String::new());
    }

    /// Re-runs the mode resolver and resets the cursor.
    pub fn refresh_mode(&mut self) {
        let resolved = resolve_mode(&self.raw_query, self.sticky_list_all, &self.bookmarks);
        self.mode = resolved.mode;
        self.sticky_list_all = resolved.sticky_list_all;
        self.cursor = Cursor::new();

        tracing::trace!(
            mode = self.mode.label(),
            matches = self.mode.len(),
            sticky = self.sticky_list_all,
            "mode resolved"
        );
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor = self.cursor.moved(direction, self.mode.len());
    }

    /// Decides what Enter would do right now, without doing it.
    #[must_use]
    pub fn commit(&self) -> Resolution {
        resolve_commit(
            &self.mode,
            self.cursor,
            &self.raw_query,
            self.settings.search_engine_base(),
        )
    }

    /// Installs freshly loaded data and re-resolves the current query against it.
    pub fn apply_data(&mut self, data: StartpageData) {
        let _span = tracing::debug_span!(
            "apply_data",
            bookmarks = data.bookmarks.len(),
            source = ?data.source
        )
        .entered();

        self.bookmarks = data.bookmarks;
        self.settings = data.settings;
        self.theme = self.base_theme.with_settings(&self.settings);
        self.load_state = LoadState::Ready;
        self.refresh_mode();
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height in character cells
    /// * `cols` - Pane width in character cells
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Subtract the chrome rows from the pane height
    /// 2. Center the window around the cursor
    /// 3. Pull the window back when it would run past the end of the list
    /// 4. Report the selection relative to the window
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let help = self.help_visible.then(Self::compute_help);

        let (display_items, selected_index) = if help.is_some() || self.pending.is_some() {
            (vec![], 0)
        } else {
            self.compute_window(rows, cols)
        };

        let empty_state = if help.is_none() && display_items.is_empty() {
            Some(self.compute_empty_state())
        } else {
            None
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            display_items,
            selected_index,
            empty_state,
            help,
            notice: self.notice.as_ref().map(|notice| NoticeLine {
                text: notice.text.clone(),
                is_error: notice.kind == NoticeKind::Error,
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_window(&self, rows: usize, cols: usize) -> (Vec<DisplayItem>, usize) {
        let total = self.mode.len();
        if total == 0 {
            return (vec![], 0);
        }

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let selected = self.cursor.index();

        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total);
        if visible_end - visible_start < available_rows && total >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let items = (visible_start..visible_end)
            .filter_map(|index| self.compute_display_item(index, cols))
            .collect();

        (items, selected - visible_start)
    }

    fn compute_display_item(&self, index: usize, cols: usize) -> Option<DisplayItem> {
        let is_selected = index == self.cursor.index();
        let detail_width = cols.saturating_sub(TITLE_COLUMN_WIDTH + 1);

        if let Some(command) = self.mode.commands().and_then(|c| c.get(index)) {
            return Some(Self::command_item(command, &self.raw_query, is_selected, detail_width));
        }

        let bookmark = self.mode.bookmarks()?.get(index)?;
        let highlight_ranges = match self.mode {
            Mode::Filter(_) => highlight_range(&bookmark.name, &self.raw_query)
                .into_iter()
                .collect(),
            _ => vec![],
        };

        let tags = bookmark.tag_line();
        let url_width = detail_width.saturating_sub(tags.chars().count() + 2);

        Some(DisplayItem {
            kind: ItemKind::Bookmark,
            title: truncate(&bookmark.name, TITLE_COLUMN_WIDTH - 2),
            detail: truncate(&bookmark.url, url_width),
            tags,
            is_selected,
            highlight_ranges,
        })
    }

    fn command_item(command: &Command, query: &str, is_selected: bool, width: usize) -> DisplayItem {
        DisplayItem {
            kind: ItemKind::Command,
            title: command.name.to_string(),
            detail: truncate(command.description, width),
            tags: String::new(),
            is_selected,
            highlight_ranges: highlight_range(command.name, query).into_iter().collect(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = if self.help_visible {
            " Startpage: help ".to_string()
        } else if self.mode == Mode::Empty {
            " Startpage ".to_string()
        } else {
            format!(" Startpage: {} ({}) ", self.mode.label(), self.mode.len())
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        match &self.pending {
            Some(Pending::ImportPath(path)) => SearchBarInfo {
                label: "Import from".to_string(),
                query: path.clone(),
                placeholder: "path to an export file".to_string(),
            },
            Some(Pending::ConfirmReset) => SearchBarInfo {
                label: "Reset everything? (y/n)".to_string(),
                query: String::new(),
                placeholder: String::new(),
            },
            None => SearchBarInfo {
                label: "Search".to_string(),
                query: self.raw_query.clone(),
                placeholder: "bookmarks, URLs, or : for commands".to_string(),
            },
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        match &self.pending {
            Some(Pending::ConfirmReset) => {
                return EmptyState {
                    message: "Reset all settings and bookmarks?".to_string(),
                    subtitle: "Stored data is removed and the seed file is loaded again".to_string(),
                };
            }
            Some(Pending::ImportPath(_)) => {
                return EmptyState {
                    message: "Import settings and bookmarks".to_string(),
                    subtitle: "Enter the path of a file written by :export".to_string(),
                };
            }
            None => {}
        }

        if self.load_state != LoadState::Ready {
            return EmptyState {
                message: "Loading bookmarks...".to_string(),
                subtitle: String::new(),
            };
        }

        match &self.mode {
            Mode::Empty if self.bookmarks.is_empty() => EmptyState {
                message: "No bookmarks yet".to_string(),
                subtitle: "Run :bookmark to add some, or type to search the web".to_string(),
            },
            Mode::Empty => EmptyState {
                message: format!("{} bookmarks", self.bookmarks.len()),
                subtitle: "Type to filter, :list to show them all, :help for commands".to_string(),
            },
            Mode::ListAll(_) => EmptyState {
                message: "No bookmarks".to_string(),
                subtitle: "Run :bookmark to add some".to_string(),
            },
            Mode::CommandSuggest(_) => EmptyState {
                message: "No matching commands".to_string(),
                subtitle: self.enter_hint(),
            },
            Mode::Filter(_) => EmptyState {
                message: "No matching bookmarks".to_string(),
                subtitle: self.enter_hint(),
            },
        }
    }

    /// Describes what Enter does when the list is empty.
    fn enter_hint(&self) -> String {
        match self.commit() {
            Resolution::Navigate(url) => format!("Enter: open {url}"),
            Resolution::Search(_) => format!("Enter: search the web for \"{}\"", self.raw_query.trim()),
            Resolution::RunCommand(command) => format!("Enter: run {}", command.name),
            Resolution::OpenBookmark(bookmark) => format!("Enter: open {}", bookmark.name),
            Resolution::NoOp => "Esc: clear".to_string(),
        }
    }

    fn compute_help() -> HelpOverlay {
        let mut entries: Vec<(String, String)> = COMMANDS
            .iter()
            .map(|command| (command.name.to_string(), command.description.to_string()))
            .collect();
        entries.extend(
            [
                ("Up/Down", "Move the selection"),
                ("Enter", "Open the selection, a URL, or a web search"),
                ("Esc", "Close help, cancel a prompt, or clear the query"),
                ("Ctrl+c", "Close the start page"),
            ]
            .map(|(key, description)| (key.to_string(), description.to_string())),
        );
        HelpOverlay { entries }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.help_visible {
            "Esc: close help"
        } else {
            match self.pending {
                Some(Pending::ConfirmReset) => "y: reset everything  n/Esc: cancel",
                Some(Pending::ImportPath(_)) => "Enter: import  Esc: cancel",
                None => "Up/Down: select  Enter: open  :: commands  Esc: clear  Ctrl+c: close",
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DataSource;

    fn ready_session(count: usize) -> Session {
        let mut session = Session::new(Theme::default(), SessionPaths::default());
        session.apply_data(StartpageData {
            settings: Settings::default(),
            bookmarks: (0..count)
                .map(|i| Bookmark::new(format!("Site {i}"), format!("https://site{i}.com"), ["web"]))
                .collect(),
            source: DataSource::Storage,
        });
        session
    }

    #[test]
    fn new_session_is_loading() {
        let session = Session::new(Theme::default(), SessionPaths::default());
        let vm = session.compute_viewmodel(24, 80);
        assert_eq!(session.mode, Mode::Empty);
        assert_eq!(
            vm.empty_state.map(|e| e.message),
            Some("Loading bookmarks...".to_string())
        );
    }

    #[test]
    fn window_follows_cursor() {
        let mut session = ready_session(50);
        session.set_query("site");
        for _ in 0..30 {
            session.move_cursor(Direction::Down);
        }

        let vm = session.compute_viewmodel(24, 80);
        assert_eq!(vm.display_items.len(), 24 - CHROME_ROWS);
        let selected = &vm.display_items[vm.selected_index];
        assert!(selected.is_selected);
        assert_eq!(selected.title, "Site 30");
    }

    #[test]
    fn window_sticks_to_list_end() {
        let mut session = ready_session(20);
        session.set_query("site");
        for _ in 0..25 {
            session.move_cursor(Direction::Down);
        }

        let vm = session.compute_viewmodel(24, 80);
        assert_eq!(session.cursor.index(), 19);
        assert_eq!(vm.display_items.last().map(|i| i.title.as_str()), Some("Site 19"));
        assert_eq!(vm.selected_index, vm.display_items.len() - 1);
    }

    #[test]
    fn filter_rows_highlight_name_matches() {
        let mut session = ready_session(3);
        session.set_query("te 1");

        let vm = session.compute_viewmodel(24, 80);
        assert_eq!(vm.display_items.len(), 1);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(2, 6)]);
        assert_eq!(vm.display_items[0].tags, "#web");
    }

    #[test]
    fn empty_filter_previews_enter() {
        let mut session = ready_session(2);

        session.set_query("example.com");
        let hint = session.compute_viewmodel(24, 80).empty_state.map(|e| e.subtitle);
        assert_eq!(hint.as_deref(), Some("Enter: open https://example.com"));

        session.set_query("how to code");
        let hint = session.compute_viewmodel(24, 80).empty_state.map(|e| e.subtitle);
        assert_eq!(hint.as_deref(), Some("Enter: search the web for \"how to code\""));
    }

    #[test]
    fn command_rows_show_descriptions() {
        let mut session = ready_session(0);
        session.set_query(":");

        let vm = session.compute_viewmodel(24, 80);
        assert_eq!(vm.display_items.len(), COMMANDS.len());
        assert!(vm.display_items.iter().all(|i| i.kind == ItemKind::Command));
        assert_eq!(vm.header.title, " Startpage: commands (7) ");
    }

    #[test]
    fn prompts_replace_the_search_box() {
        let mut session = ready_session(2);
        session.set_query("site");
        session.pending = Some(Pending::ImportPath("~/exports/".to_string()));

        let vm = session.compute_viewmodel(24, 80);
        assert!(vm.display_items.is_empty());
        assert_eq!(vm.search_bar.label, "Import from");
        assert_eq!(vm.search_bar.query, "~/exports/");
        assert_eq!(vm.footer.keybindings, "Enter: import  Esc: cancel");
    }

    #[test]
    fn help_overlay_lists_every_command() {
        let mut session = ready_session(1);
        session.help_visible = true;

        let vm = session.compute_viewmodel(24, 80);
        let help = vm.help.expect("help overlay");
        assert!(COMMANDS
            .iter()
            .all(|c| help.entries.iter().any(|(name, _)| name == c.name)));
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn stored_accent_recolors_theme() {
        let mut session = ready_session(0);
        let mut settings = Settings::default();
        settings.accent_color = "#a6e3a1".to_string();
        session.apply_data(StartpageData {
            settings,
            bookmarks: vec![],
            source: DataSource::Storage,
        });

        assert_eq!(session.theme.colors.selection_bg, "#a6e3a1");
        assert_ne!(session.base_theme.colors.selection_bg, "#a6e3a1");
    }
}
