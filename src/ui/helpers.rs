//! Shared rendering utilities.
//!
//! Components draw into a frame buffer (`String`) with absolute cursor
//! positioning; the renderer prints the finished frame once. Widths are
//! counted in chars, which is right for the catalog's text (Latin names,
//! `•` separators, star markers).

use crate::ui::theme::Theme;
use std::fmt::Write as _;

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Display width of `text` in columns.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` columns, marking the cut with `…`.
#[must_use]
pub fn fit(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Writes `text` centered in a line of `cols`, padding both sides.
pub fn write_centered(out: &mut String, text: &str, cols: usize) {
    let text = fit(text, cols);
    let len = width(&text);
    let left = cols.saturating_sub(len) / 2;
    out.push_str(&" ".repeat(left));
    out.push_str(&text);
    out.push_str(&" ".repeat(cols.saturating_sub(left + len)));
}

/// Greedy word wrap to `max` columns. Words longer than a line are cut.
#[must_use]
pub fn wrap(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word = fit(word, max);
        if line.is_empty() {
            line = word;
        } else if width(&line) + 1 + width(&word) <= max {
            line.push(' ');
            line.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut line, word));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Writes `text` with the char ranges in `ranges` highlighted.
///
/// Selected rows skip match highlighting so the selection colors stay
/// readable.
pub fn write_highlighted(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }
        out.extend(&chars[pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        pos = end;
    }

    out.extend(&chars[pos..]);
}
