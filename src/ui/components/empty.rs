//! Empty state component renderer.
//!
//! Shown in place of the result list while loading, when nothing matches, and
//! while a prompt owns the search box.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message.
///
/// # Layout
///
/// ```text
/// [blank line]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// Both lines are horizontally centered. The message uses the `empty_state_fg`
/// theme color, and the subtitle uses `text_dim` with dim styling.
///
/// # Example
///
/// ```rust
/// use startpage::ui::components::render_empty_state;
/// use startpage::ui::viewmodel::EmptyState;
/// use startpage::ui::Theme;
///
/// let empty = EmptyState {
///     message: "No matching bookmarks".to_string(),
///     subtitle: "Enter: open https://example.com".to_string(),
/// };
/// render_empty_state(8, &empty, &Theme::default(), 80);
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let message = truncate(&empty.message, cols);
    let msg_len = display_width(&message);
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = display_width(&subtitle);
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(row + 2, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}
