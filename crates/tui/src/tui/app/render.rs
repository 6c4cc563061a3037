use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use ratatui::Frame;

use crate::model::{ColumnField, COLUMNS};
use crate::page::{PageView, TablePage, HEADING};
use crate::tui::constants::{APP_VERSION, ERROR_TEXT, HELP_LOADING, HELP_NORMAL};
use crate::tui::helpers::{
    accent_title, centered_rect, column_constraints, format_arrival, format_window,
    spinner_lines, BG_BASE, BG_PANEL,
};

use super::App;

impl App {
    pub(crate) fn draw(&self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        match self.page.view() {
            PageView::Loading => self.draw_loading(f, chunks[1]),
            PageView::Error => draw_error(f, chunks[1]),
            PageView::Table(table) => self.draw_arrivals(f, chunks[1], &table),
        }
        self.draw_footer(f, chunks[2]);
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let mut left_spans = vec![
            Span::styled(
                format!(" arrivals v{} 📦 ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.config.source().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ];

        if let Some(window) = self.page.window() {
            left_spans.push(Span::raw("  "));
            left_spans.push(Span::styled(
                format!("🗓 {}", format_window(window)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        f.render_widget(
            Paragraph::new(Line::from(left_spans)).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let options = self.page.options();
        let right_line = Line::from(vec![Span::styled(
            format!(
                "weeks start {} • {} bounds ",
                options.week_start,
                options.boundary.as_str()
            ),
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(
            Paragraph::new(right_line)
                .alignment(Alignment::Right)
                .style(Style::default().bg(BG_BASE)),
            cols[1],
        );
    }

    fn draw_loading(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = spinner_lines(self.frame);
        let spinner_area = centered_rect(9, lines.len() as u16, area);
        f.render_widget(
            Paragraph::new(lines).style(Style::default().bg(BG_BASE)),
            spinner_area,
        );
    }

    fn draw_arrivals(&self, f: &mut Frame<'_>, area: Rect, table: &TablePage<'_>) {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(Line::from(vec![Span::styled(
                format!(" {}", HEADING),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )])),
            parts[0],
        );

        let header = Row::new(COLUMNS.iter().map(|column| Cell::from(column.header)))
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = table
            .rows
            .iter()
            .map(|shipment| {
                Row::new(COLUMNS.iter().map(|column| {
                    let value = shipment.field(column.field);
                    match column.field {
                        ColumnField::EstimatedArrival => Cell::from(format_arrival(value)),
                        _ => Cell::from(value.to_string()),
                    }
                }))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Shipments"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(parts[1]);
        let grid = Table::new(rows, column_constraints())
            .header(header)
            .column_spacing(1)
            .block(block);
        f.render_widget(grid, parts[1]);

        if table.rows.is_empty() && inner.height > 1 {
            let below_header = Rect {
                y: inner.y + 1,
                height: inner.height - 1,
                ..inner
            };
            let message = centered_rect(below_header.width, 1, below_header);
            f.render_widget(
                Paragraph::new("No rows")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray).bg(BG_PANEL)),
                message,
            );
        }

        let pager = Line::from(vec![
            Span::styled(
                format!("Rows per page: {}", self.page.page_size()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("   "),
            Span::raw(table.range_label()),
            Span::raw("   "),
            Span::styled(
                format!("◀ page {}/{} ▶ ", table.page + 1, table.page_count),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(Paragraph::new(pager).alignment(Alignment::Right), parts[2]);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.page.view() {
            PageView::Table(_) => HELP_NORMAL,
            PageView::Loading | PageView::Error => HELP_LOADING,
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }
}

fn draw_error(f: &mut Frame<'_>, area: Rect) {
    let line = Line::from(vec![Span::styled(
        ERROR_TEXT,
        Style::default().fg(Color::Red),
    )]);
    let top = Rect { height: 1, ..area };
    f.render_widget(Paragraph::new(line), top);
}
