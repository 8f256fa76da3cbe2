//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used by several components: cursor positioning, width-aware
//! truncation, and match highlighting with proper ANSI escape management.
//! Everything operates on character indices, never byte indices.
//!
//! # Example
//!
//! ```rust
//! use startpage::ui::helpers::{render_highlighted_text, truncate};
//! use startpage::ui::Theme;
//!
//! let theme = Theme::default();
//! render_highlighted_text("GitHub", &[(0, 3)], &theme, false);
//! assert_eq!(truncate("a very long bookmark name", 10), "a very ...");
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters `text` occupies, assuming one cell per character.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
///
/// # Examples
///
/// ```
/// use startpage::ui::helpers::truncate;
///
/// assert_eq!(truncate("GitHub", 10), "GitHub");
/// assert_eq!(truncate("Café au lait", 7), "Café...");
/// assert_eq!(truncate("GitHub", 2), "Gi");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }

    let mut shortened: String = text.chars().take(max - 3).collect();
    shortened.push_str("...");
    shortened
}

/// Renders text with highlighted character ranges for query matches.
///
/// # Parameters
///
/// * `text` - The text to render
/// * `ranges` - Character index ranges to highlight `(start, end)` (inclusive start, exclusive end)
/// * `theme` - Active color theme for highlight colors
/// * `is_selected` - Whether the row is selected (disables match highlighting)
///
/// # Selection Behavior
///
/// When `is_selected` is `true`, match highlighting is disabled to avoid
/// conflicting with selection background colors.
///
/// Ranges past the end of `text` are clipped.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("ñandú.example", 8), "ñandú...");
        assert_eq!(display_width("ñandú"), 5);
    }

    #[test]
    fn truncate_to_zero() {
        assert_eq!(truncate("GitHub", 0), "");
    }
}
