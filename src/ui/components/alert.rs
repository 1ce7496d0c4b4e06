//! Modal alert and confirmation box.

use crate::ui::helpers::{position_cursor, width, wrap, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::AlertInfo;

const MAX_BOX_WIDTH: usize = 60;

/// Draws the alert centered over whatever is already on screen.
pub fn render_alert(out: &mut String, alert: &AlertInfo, theme: &Theme, rows: usize, cols: usize) {
    let box_width = cols.saturating_sub(4).min(MAX_BOX_WIDTH);
    if box_width < 10 {
        return;
    }
    let inner = box_width - 2;

    let mut body = wrap(&alert.message, inner.saturating_sub(2));
    body.push(String::new());
    let height = body.len() + 3;

    let top = rows.saturating_sub(height) / 2 + 1;
    let left = (cols - box_width) / 2 + 1;
    let border = Theme::fg(&theme.colors.alert_border);

    let title = format!(" {} ", alert.title);
    let title_len = width(&title).min(inner);
    position_cursor(out, top, left);
    out.push_str(&border);
    out.push('┌');
    out.push_str(Theme::bold());
    out.push_str(&title.chars().take(title_len).collect::<String>());
    out.push_str(Theme::reset());
    out.push_str(&border);
    out.push_str(&"─".repeat(inner - title_len));
    out.push('┐');

    for (i, line) in body.iter().chain(std::iter::once(&alert.buttons)).enumerate() {
        position_cursor(out, top + 1 + i, left);
        out.push_str(&border);
        out.push('│');
        if i == body.len() {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        }
        write_centered(out, line, inner);
        out.push_str(&border);
        out.push('│');
    }

    position_cursor(out, top + height - 1, left);
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner)));
    out.push_str(Theme::reset());
}
