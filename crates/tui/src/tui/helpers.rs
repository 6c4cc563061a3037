use std::cmp::min;

use chrono::{DateTime, Local, Utc};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::{total_column_width, COLUMNS};
use crate::week::{parse_arrival, WeekWindow};

pub const BG_BASE: Color = Color::Rgb(14, 17, 23);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 34);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);

/// Lit cells of a 3x3 grid spinner, one entry per frame, walking the ring clockwise.
const SPINNER_RING: [(usize, usize); 8] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 2),
    (2, 2),
    (2, 1),
    (2, 0),
    (1, 0),
];

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}

/// Table widths proportional to the dashboard's pixel width hints.
pub fn column_constraints() -> Vec<Constraint> {
    let total = total_column_width();
    COLUMNS
        .iter()
        .map(|column| Constraint::Ratio(u32::from(column.width), total))
        .collect()
}

/// Show an arrival in local time when it parses, the raw text otherwise.
pub fn format_arrival(raw: &str) -> String {
    parse_arrival(raw, &Local)
        .map(|instant| format_local(&instant, "%a %Y-%m-%d %H:%M"))
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_window(window: &WeekWindow) -> String {
    format!(
        "{} – {}",
        format_local(&window.start(), "%a %d %b"),
        format_local(&window.end(), "%a %d %b %Y")
    )
}

fn format_local(value: &DateTime<Utc>, pattern: &str) -> String {
    let local: DateTime<Local> = (*value).into();
    local.format(pattern).to_string()
}

pub fn spinner_lines(frame: usize) -> Vec<Line<'static>> {
    let lit = SPINNER_RING[frame % SPINNER_RING.len()];
    let trail = SPINNER_RING[(frame + SPINNER_RING.len() - 1) % SPINNER_RING.len()];
    (0..3)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..3)
                .map(|col| {
                    let style = if (row, col) == lit {
                        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD)
                    } else if (row, col) == trail {
                        Style::default().fg(FG_ACCENT)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    Span::styled(" ● ", style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
