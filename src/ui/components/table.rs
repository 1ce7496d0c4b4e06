//! Mandal list table.
//!
//! Four columns: favorite marker, NAME, LOCATION and CROWD. The crowd label
//! is tinted by level and the selected row is drawn across the full width.

use crate::ui::helpers::{self, fit, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const MARKER_WIDTH: usize = 2;
const NAME_WIDTH: usize = 36;
const CROWD_WIDTH: usize = 10;

fn location_width(cols: usize) -> usize {
    cols.saturating_sub(MARKER_WIDTH + NAME_WIDTH + CROWD_WIDTH + 1)
}

/// Renders the column headers at `row`. Returns the next free row.
pub fn render_table_headers(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    let line = format!(
        "{:MARKER_WIDTH$}{:<NAME_WIDTH$}{:<loc$} {:>CROWD_WIDTH$}",
        "",
        "NAME",
        "LOCATION",
        "CROWD",
        loc = location_width(cols)
    );
    out.push_str(&fit(&line, cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders every item from `row` down. Returns the next free row.
pub fn render_table_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    items
        .iter()
        .fold(row, |current, item| render_table_row(out, current, item, theme, cols))
}

fn render_table_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(out, row, 1);
    out.push_str(&base);

    if item.is_favorite {
        if !item.is_selected {
            out.push_str(&Theme::fg(&theme.colors.favorite_fg));
        }
        out.push_str("★ ");
        out.push_str(&base);
    } else {
        out.push_str("  ");
    }

    let name = fit(&item.name, NAME_WIDTH - 2);
    helpers::write_highlighted(out, &name, &item.highlight_ranges, theme, item.is_selected);
    if item.is_selected {
        out.push_str(&base);
    }
    out.push_str(&" ".repeat(NAME_WIDTH - width(&name)));

    let loc_width = location_width(cols);
    let location = fit(&item.location, loc_width);
    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }
    out.push_str(&location);
    out.push_str(&" ".repeat(loc_width - width(&location) + 1));

    if !item.is_selected {
        out.push_str(&Theme::fg(theme.colors.crowd_label(&item.crowd)));
    }
    out.push_str(&format!("{:>CROWD_WIDTH$}", fit(&item.crowd, CROWD_WIDTH)));

    let used = MARKER_WIDTH + NAME_WIDTH + loc_width + 1 + CROWD_WIDTH;
    out.push_str(&" ".repeat(cols.saturating_sub(used)));
    out.push_str(Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, is_favorite: bool, is_selected: bool) -> DisplayItem {
        DisplayItem {
            name: name.to_string(),
            location: "Lalbaug • 2.5 km".to_string(),
            crowd: "Very High".to_string(),
            is_selected,
            is_favorite,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn favorite_rows_show_star() {
        let mut out = String::new();
        let next = render_table_rows(
            &mut out,
            7,
            &[item("Lalbaugcha Raja", true, false), item("Tejukaya Ganesh", false, true)],
            &Theme::default(),
            100,
        );
        assert_eq!(next, 9);
        assert_eq!(out.matches('★').count(), 1);
        assert!(out.contains("Lalbaug • 2.5 km"));
        assert!(out.contains("Very High"));
    }

    #[test]
    fn narrow_panes_do_not_panic() {
        let mut out = String::new();
        render_table_headers(&mut out, 1, &Theme::default(), 20);
        render_table_rows(&mut out, 2, &[item("Lalbaugcha Raja", true, true)], &Theme::default(), 20);
        assert!(out.contains("Lalbaugcha Raja"));
    }
}
