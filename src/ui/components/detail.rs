//! Mandal detail screen.

use crate::ui::helpers::{fit, position_cursor, wrap, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, MandalDetail};

const LEFT_MARGIN: usize = 2;

/// Number of body lines the detail view takes at width `cols`.
#[must_use]
pub fn line_count(detail: &DetailView, cols: usize) -> usize {
    match detail {
        DetailView::Found(mandal) => build_lines(mandal, text_width(cols)).len(),
        DetailView::NotFound { .. } => 4,
    }
}

/// Renders the detail view from `row`, skipping the first `scroll` lines and
/// never writing at or past `last_row`.
pub fn render_detail(
    out: &mut String,
    row: usize,
    last_row: usize,
    scroll: usize,
    detail: &DetailView,
    theme: &Theme,
    cols: usize,
) {
    match detail {
        DetailView::Found(mandal) => render_found(out, row, last_row, scroll, mandal, theme, cols),
        DetailView::NotFound { mandal_id } => {
            if row + 2 >= last_row {
                return;
            }
            position_cursor(out, row + 2, 1);
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
            write_centered(out, &format!("Mandal \"{mandal_id}\" not found"), cols);
            out.push_str(Theme::reset());

            if row + 3 >= last_row {
                return;
            }
            position_cursor(out, row + 3, 1);
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            write_centered(out, "Press Esc to go back", cols);
            out.push_str(Theme::reset());
        }
    }
}

const fn text_width(cols: usize) -> usize {
    cols.saturating_sub(LEFT_MARGIN * 2)
}

/// One styled line of the detail body.
enum Line {
    Title(String),
    Text(String),
    Dim(String),
    Heading(&'static str),
    Favorite(bool),
    Crowd(String),
    Blank,
}

fn build_lines(mandal: &MandalDetail, text_width: usize) -> Vec<Line> {
    let mut lines = vec![
        Line::Title(mandal.name.clone()),
        Line::Dim(mandal.location.clone()),
        Line::Favorite(mandal.is_favorite),
        Line::Blank,
        Line::Text(mandal.established.clone()),
        Line::Crowd(mandal.crowd.clone()),
        Line::Text(format!("Visiting Hours: {}", mandal.visiting_hours)),
        Line::Blank,
        Line::Heading("Address"),
    ];
    lines.extend(wrap(&mandal.address, text_width).into_iter().map(Line::Text));

    if let Some(phone) = &mandal.phone {
        lines.push(Line::Blank);
        lines.push(Line::Heading("Contact"));
        lines.push(Line::Text(phone.clone()));
    }

    if !mandal.special_features.is_empty() {
        lines.push(Line::Blank);
        lines.push(Line::Heading("Special Features"));
        lines.extend(
            mandal
                .special_features
                .iter()
                .map(|feature| Line::Text(format!("• {feature}"))),
        );
    }

    lines.push(Line::Blank);
    lines.push(Line::Heading("About"));
    lines.extend(wrap(&mandal.about, text_width).into_iter().map(Line::Dim));

    lines
}

fn render_found(
    out: &mut String,
    row: usize,
    last_row: usize,
    scroll: usize,
    mandal: &MandalDetail,
    theme: &Theme,
    cols: usize,
) {
    let text_width = text_width(cols);
    let lines = build_lines(mandal, text_width);
    let visible = last_row.saturating_sub(row);
    let skip = scroll.min(lines.len().saturating_sub(visible));

    let margin = " ".repeat(LEFT_MARGIN);
    for (offset, line) in lines.iter().skip(skip).enumerate() {
        let current = row + offset;
        if current >= last_row {
            break;
        }
        position_cursor(out, current, 1);
        out.push_str(&margin);
        match line {
            Line::Title(text) => {
                out.push_str(Theme::bold());
                out.push_str(&Theme::fg(&theme.colors.header_fg));
                out.push_str(&fit(text, text_width));
            }
            Line::Text(text) => {
                out.push_str(&Theme::fg(&theme.colors.text_normal));
                out.push_str(&fit(text, text_width));
            }
            Line::Dim(text) => {
                out.push_str(&Theme::fg(&theme.colors.text_dim));
                out.push_str(&fit(text, text_width));
            }
            Line::Heading(text) => {
                out.push_str(Theme::bold());
                out.push_str(&Theme::fg(&theme.colors.accent));
                out.push_str(text);
            }
            Line::Favorite(true) => {
                out.push_str(&Theme::fg(&theme.colors.favorite_fg));
                out.push_str("★ In your favorites");
            }
            Line::Favorite(false) => {
                out.push_str(&Theme::fg(&theme.colors.text_dim));
                out.push_str("☆ Press f to add to favorites");
            }
            Line::Crowd(text) => {
                let level = text.trim_end_matches(" Crowd");
                out.push_str(&Theme::fg(theme.colors.crowd_label(level)));
                out.push_str(text);
            }
            Line::Blank => {}
        }
        out.push_str(Theme::reset());
    }
}
