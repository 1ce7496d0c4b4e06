//! Footer help line.

use crate::ui::helpers::{position_cursor, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer at `row`.
///
/// A status message, when present, takes the line instead of the key hints.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    match &footer.status {
        Some(status) => {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.accent));
            write_centered(out, status, cols);
        }
        None => {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            write_centered(out, &footer.keybindings, cols);
        }
    }
    out.push_str(Theme::reset());
    row + 1
}
