//! Grapheme-aware helpers for single-line text entry and row truncation.
//! Byte offsets passed in must lie on grapheme boundaries.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width of `s` in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` down to `max_cells`, ending with `…` when anything was dropped.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Offset of the grapheme after the one at `offset`, or None at the end
pub fn next_boundary(s: &str, offset: usize) -> Option<usize> {
    let rest = s.get(offset..)?;
    let g = rest.graphemes(true).next()?;
    Some(offset + g.len())
}

/// Offset of the grapheme before `offset`, or None at the start
pub fn prev_boundary(s: &str, offset: usize) -> Option<usize> {
    let head = s.get(..offset)?;
    let g = head.graphemes(true).next_back()?;
    Some(offset - g.len())
}

/// Cell column at which byte `offset` is drawn
pub fn display_col(s: &str, offset: usize) -> usize {
    display_width(&s[..offset.min(s.len())])
}

/// Start of the word that ends at `offset` (skipping whitespace first)
pub fn word_start_before(s: &str, offset: usize) -> usize {
    let head = &s[..offset.min(s.len())];
    let trimmed = head.trim_end();
    match trimmed.rfind(char::is_whitespace) {
        Some(i) => i + trimmed[i..].chars().next().map_or(1, char::len_utf8),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_wide_chars_twice() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_only_when_needed() {
        assert_eq!(truncate_to_width("hello", 5), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
    }

    #[test]
    fn truncate_never_splits_wide_chars() {
        // budget of 2 cells before the ellipsis fits one CJK char
        assert_eq!(truncate_to_width("日本語", 3), "日\u{2026}");
        assert_eq!(truncate_to_width("日本語", 4), "日\u{2026}");
    }

    #[test]
    fn boundaries_step_over_graphemes() {
        let s = "ae\u{301}b"; // e + combining acute is one grapheme
        assert_eq!(next_boundary(s, 0), Some(1));
        assert_eq!(next_boundary(s, 1), Some(4));
        assert_eq!(next_boundary(s, 5), None);
        assert_eq!(prev_boundary(s, 4), Some(1));
        assert_eq!(prev_boundary(s, 0), None);
    }

    #[test]
    fn display_col_of_offsets() {
        assert_eq!(display_col("日本", 3), 2);
        assert_eq!(display_col("abc", 99), 3);
    }

    #[test]
    fn word_start() {
        assert_eq!(word_start_before("git commit -m", 13), 11);
        assert_eq!(word_start_before("git commit  ", 12), 4);
        assert_eq!(word_start_before("single", 6), 0);
        assert_eq!(word_start_before("", 0), 0);
    }
}
