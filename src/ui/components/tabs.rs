//! Tab bar and area chips.

use crate::ui::helpers::{position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ChipInfo, TabInfo};

/// Renders the tab bar at `row`. Returns the next free row.
pub fn render_tabs(out: &mut String, row: usize, tabs: &[TabInfo], theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    let mut used = 0;

    for tab in tabs {
        let label = format!("  {}  ", tab.title);
        let len = width(&label);
        if used + len > cols {
            break;
        }
        if tab.is_active {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&theme.colors.accent));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        out.push_str(&label);
        out.push_str(Theme::reset());
        out.push(' ');
        used += len + 1;
    }

    out.push_str(&" ".repeat(cols.saturating_sub(used)));
    row + 1
}

/// Renders the area chips at `row`, scrolled so the selected chip is visible.
pub fn render_chips(out: &mut String, row: usize, chips: &[ChipInfo], theme: &Theme, cols: usize) -> usize {
    let labels: Vec<String> = chips
        .iter()
        .map(|chip| format!(" {} ({}) ", chip.label, chip.count))
        .collect();

    let selected = chips.iter().position(|c| c.is_selected).unwrap_or(0);
    let mut first = 0;
    while first < selected && span_width(&labels[first..=selected]) > cols {
        first += 1;
    }

    position_cursor(out, row, 1);
    let mut used = 0;
    for (chip, label) in chips.iter().zip(&labels).skip(first) {
        let len = width(label);
        if used + len > cols {
            break;
        }
        if chip.is_selected {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&theme.colors.accent));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        }
        out.push_str(label);
        out.push_str(Theme::reset());
        out.push(' ');
        used += len + 1;
    }

    out.push_str(&" ".repeat(cols.saturating_sub(used)));
    row + 1
}

fn span_width(labels: &[String]) -> usize {
    labels.iter().map(|l| width(l) + 1).sum()
}
