//! View model types representing renderable UI state.
//!
//! View models are computed from the session by
//! [`Session::compute_viewmodel`](crate::app::Session::compute_viewmodel) and
//! consumed by the renderer. They contain no logic, only display-ready data:
//! the visible window of results, highlight ranges, and the strings for every
//! chrome line.
//!
//! # Example
//!
//! ```rust
//! use startpage::ui::viewmodel::{DisplayItem, ItemKind};
//!
//! let item = DisplayItem {
//!     kind: ItemKind::Bookmark,
//!     title: "GitHub".to_string(),
//!     detail: "https://github.com".to_string(),
//!     tags: "#dev".to_string(),
//!     is_selected: true,
//!     highlight_ranges: vec![(0, 3)],
//! };
//! assert!(item.is_selected);
//! ```

/// Width of the title column in result rows and help entries, gap included.
pub const TITLE_COLUMN_WIDTH: usize = 28;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,

    /// Rows of the visible window, top to bottom.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Shown instead of the list when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Shown instead of the list while the help overlay is open.
    pub help: Option<HelpOverlay>,

    pub notice: Option<NoticeLine>,
    pub footer: FooterInfo,
}

/// What a result row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Bookmark,
    Command,
}

/// One row of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub kind: ItemKind,

    /// Bookmark name or command name.
    pub title: String,

    /// Bookmark URL or command description.
    pub detail: String,

    /// Rendered tags (`#dev #rust`); empty for commands.
    pub tags: String,

    pub is_selected: bool,

    /// Character ranges of `title` that match the query.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Centered message shown in place of an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No matching bookmarks").
    pub message: String,

    /// Secondary text, usually what Enter would do.
    pub subtitle: String,
}

/// The search box line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Prompt before the text ("Search", "Import from", ...).
    pub label: String,

    /// Text the user has typed.
    pub query: String,

    /// Grey text shown while `query` is empty.
    pub placeholder: String,
}

/// Help overlay contents as `(key or command, description)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpOverlay {
    pub entries: Vec<(String, String)>,
}

/// Last user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeLine {
    pub text: String,
    pub is_error: bool,
}
