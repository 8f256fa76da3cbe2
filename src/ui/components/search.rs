//! Search bar component renderer.
//!
//! This module renders the search input box with a bordered frame, a prompt
//! label, and either the typed text or a dimmed placeholder.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search input box at the specified row.
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Search: github█  │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
///
/// The box width is `cols - (2 * SEARCH_BOX_MARGIN)`. When the text does not
/// fit, its start is cut so the end of the input stays visible.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let label = format!(" {}: ", search.label);
    let label_len = display_width(&label);
    let text_room = inner_width.saturating_sub(label_len + 1);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{label}");

    let used = if search.query.is_empty() {
        let placeholder = truncate(&search.placeholder, text_room);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("█");
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{placeholder}");
        1 + display_width(&placeholder)
    } else {
        let visible = tail(&search.query, text_room);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{visible}█");
        display_width(&visible) + 1
    };

    print!("{}", " ".repeat(inner_width.saturating_sub(label_len + used)));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Last `max` characters of `text`.
fn tail(text: &str, max: usize) -> String {
    let skip = display_width(text).saturating_sub(max);
    text.chars().skip(skip).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_the_end() {
        assert_eq!(tail("~/exports/startpage.json", 14), "startpage.json");
        assert_eq!(tail("git", 10), "git");
    }
}
