//! Composable UI component renderers.
//!
//! Each component draws one part of the screen into the frame buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: title and subtitle
//! - [`tabs`]: tab bar and area chips
//! - [`search`]: search input box
//! - [`table`]: mandal list (marker, NAME, LOCATION, CROWD)
//! - [`empty`]: empty list message
//! - [`detail`]: single mandal screen
//! - [`alert`]: modal alert / confirmation
//! - [`footer`]: key hints or status
//!
//! # Layout
//!
//! ```text
//! [blank]
//! [Title]
//! [Subtitle]
//! [Tabs]
//! [Border]
//! [Area chips]          areas tab only
//! [Search box, 3 rows]  when shown
//! [Table header]        list screens
//! [Rows | empty state | detail]
//! ...
//! [Border]
//! [Footer]
//! ```

mod alert;
mod detail;
mod empty;
mod footer;
mod header;
mod search;
mod table;
mod tabs;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// First row of the detail body: blank, title, subtitle, tabs, border, gap.
const DETAIL_FIRST_ROW: usize = 7;

pub use detail::line_count as detail_line_count;

/// Rows the detail body gets in a pane `rows` tall.
#[must_use]
pub const fn detail_body_rows(rows: usize) -> usize {
    footer_border_row(rows).saturating_sub(DETAIL_FIRST_ROW)
}

const fn footer_border_row(rows: usize) -> usize {
    if rows < 2 {
        1
    } else {
        rows - 1
    }
}

/// Draws a horizontal rule at `row`. Returns the next free row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders a complete frame for `vm`.
pub fn render_screen(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let footer_row = rows.max(2);
    let footer_border_row = footer_border_row(rows);

    let mut row = header::render_header(out, 2, &vm.header, theme, cols);
    row = tabs::render_tabs(out, row, &vm.tabs, theme, cols);
    row = render_border(out, row, &theme.colors.border, cols);

    if let Some(detail) = &vm.detail {
        debug_assert_eq!(row + 1, DETAIL_FIRST_ROW);
        detail::render_detail(out, row + 1, footer_border_row, vm.detail_scroll, detail, theme, cols);
    } else {
        if let Some(chips) = &vm.area_chips {
            row = tabs::render_chips(out, row, chips, theme, cols);
        }
        if let Some(search) = &vm.search_bar {
            row = search::render_search_bar(out, row, search, theme, cols);
        }
        match &vm.empty_state {
            Some(empty) => {
                empty::render_empty_state(out, row, empty, theme, cols);
            }
            None => {
                row = table::render_table_headers(out, row, theme, cols);
                table::render_table_rows(out, row, &vm.display_items, theme, cols);
            }
        }
    }

    render_border(out, footer_border_row, &theme.colors.border, cols);
    footer::render_footer(out, footer_row, &vm.footer, theme, cols);

    if let Some(alert) = &vm.alert {
        alert::render_alert(out, alert, theme, rows, cols);
    }
}
