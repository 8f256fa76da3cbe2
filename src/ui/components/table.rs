//! Table component renderer.
//!
//! Renders the result list: bookmarks as NAME / URL / TAGS, commands as
//! COMMAND / DESCRIPTION. Supports selection and match highlighting.

use crate::ui::helpers::{self, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, ItemKind, TITLE_COLUMN_WIDTH};

/// Renders the column headers for the given row kind.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, kind: ItemKind, theme: &Theme, cols: usize) -> usize {
    let headers = match kind {
        ItemKind::Bookmark => format!(" {:<width$}{}", "NAME", "URL", width = TITLE_COLUMN_WIDTH - 1),
        ItemKind::Command => format!(" {:<width$}{}", "COMMAND", "DESCRIPTION", width = TITLE_COLUMN_WIDTH - 1),
    };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{headers}");
    print!("{}", " ".repeat(cols.saturating_sub(display_width(&headers))));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at the specified row.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single result row.
///
/// # Layout
///
/// ```text
///  TITLE (padded to the title column)  DETAIL  #tag #tag  [padding to fill line]
/// ```
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Match highlights (unless selected)
/// 3. Normal text color, dimmed detail, tag color
///
/// The row is padded to the full width so the selection background spans it.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let (base_fg, detail_fg, tag_fg) = if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        let fg = theme.colors.selection_fg.as_str();
        (fg, fg, fg)
    } else {
        (
            theme.colors.text_normal.as_str(),
            theme.colors.text_dim.as_str(),
            theme.colors.tag_fg.as_str(),
        )
    };

    print!("{}", Theme::fg(base_fg));
    print!(" ");
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);

    let title_len = 1 + display_width(&item.title);
    print!("{}", " ".repeat(TITLE_COLUMN_WIDTH.saturating_sub(title_len)));

    print!("{}", Theme::fg(detail_fg));
    print!("{}", item.detail);
    let mut line_len = TITLE_COLUMN_WIDTH.max(title_len) + display_width(&item.detail);

    if !item.tags.is_empty() {
        print!("  {}", Theme::fg(tag_fg));
        print!("{}", item.tags);
        line_len += 2 + display_width(&item.tags);
    }

    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
    row + 1
}
