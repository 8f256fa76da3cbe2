//! Composable UI component renderers.
//!
//! Each component draws one part of the pane at a given row and returns the
//! next free row.
//!
//! # Components
//!
//! - `header`: Title bar
//! - `search`: Search box with prompt label
//! - `table`: Result list (bookmarks or commands)
//! - `empty`: Centered message in place of an empty list
//! - `help`: Help overlay entries
//! - `notice`: Last user-facing message
//! - `footer`: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Column Headers]
//! [Rows | Empty State | Help]
//! [Blank padding to fill screen]
//! [Notice]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod help;
mod notice;
mod search;
mod table;

pub use empty::render_empty_state;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use header::render_header;
use help::render_help;
use notice::render_notice;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full pane layout.
///
/// Exactly one of rows, help, or empty state fills the body. The bottom three
/// lines (notice, border, footer) are anchored to the last rows of the pane.
///
/// # Parameters
///
/// * `vm` - View model with display items and metadata
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
/// * `rows` - Pane height in rows
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    let footer_row = rows.max(current_row + 3);
    let border_row = footer_row - 1;
    let notice_row = footer_row - 2;

    if let Some(help) = &vm.help {
        render_help(current_row, notice_row.saturating_sub(1), help, theme, cols);
    } else if let Some(first) = vm.display_items.first() {
        current_row = render_table_headers(current_row, first.kind, theme, cols);
        render_table_rows(current_row, &vm.display_items, theme, cols);
    } else if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    }

    render_notice(notice_row, vm.notice.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
