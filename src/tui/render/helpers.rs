use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Spaces needed to fill `width` after `used` cells
pub(super) fn padding(width: usize, used: usize) -> String {
    " ".repeat(width.saturating_sub(used))
}
