//! Notice line renderer.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NoticeLine;

/// Renders the last notice, or a blank line when there is none.
///
/// Errors use the theme's `error_fg`, everything else `notice_fg`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_notice(row: usize, notice: Option<&NoticeLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(notice) = notice else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = if notice.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.notice_fg
    };
    let text = truncate(&format!(" {}", notice.text), cols);

    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(display_width(&text))));
    print!("{}", Theme::reset());
    row + 1
}
