//! Help overlay renderer.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HelpOverlay, TITLE_COLUMN_WIDTH};

/// Renders the help entries as a two-column list, stopping at `last_row`.
///
/// # Returns
///
/// The next available row position.
pub fn render_help(row: usize, last_row: usize, help: &HelpOverlay, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    for (key, description) in &help.entries {
        if current_row > last_row {
            break;
        }

        position_cursor(current_row, 1);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!(" {key:<width$}", width = TITLE_COLUMN_WIDTH - 1);
        print!("{}", Theme::reset());

        let description = truncate(description, cols.saturating_sub(TITLE_COLUMN_WIDTH));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{description}");
        let used = TITLE_COLUMN_WIDTH.max(display_width(key) + 1) + display_width(&description);
        print!("{}", " ".repeat(cols.saturating_sub(used)));
        print!("{}", Theme::reset());

        current_row += 1;
    }

    current_row
}
