use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use rstest::rstest;
use tempfile::TempDir;

use super::input::NormalAction;
use super::{App, StatusKind};
use crate::config::AppConfig;
use crate::core::{FetchFailure, PageView, PendingFetch, WeekFilterOptions};
use crate::model::ShipmentRecord;
use crate::source::SourceLocation;
use crate::tui::constants::{RESIZE_QUIET, TABLE_CHROME_ROWS};
use crate::tui::helpers::{centered_rect, column_constraints, format_arrival, spinner_lines};

fn app() -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::new(
        dir.path().to_path_buf(),
        SourceLocation::File(dir.path().join("shipments.json")),
        WeekFilterOptions::default(),
    );
    (App::new(config), dir)
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

fn shipment(id: &str, arrival: &str) -> ShipmentRecord {
    ShipmentRecord {
        id: id.to_string(),
        house_bill_number: format!("HB-{id}"),
        client: "Acme Freight".to_string(),
        origin: "Shanghai".to_string(),
        destination: "Rotterdam".to_string(),
        status: "In transit".to_string(),
        mode: "Sea".to_string(),
        estimated_arrival: arrival.to_string(),
        estimated_departure: String::new(),
    }
}

fn next_week(count: usize) -> Vec<ShipmentRecord> {
    (0..count)
        .map(|i| shipment(&format!("s{i}"), &format!("2024-01-09T{:02}:00:00Z", i)))
        .collect()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn screen(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer.get(x, y).symbol());
        }
        text.push('\n');
    }
    text
}

#[rstest]
#[case(key(KeyCode::Char('q')), Some(NormalAction::Quit))]
#[case(key(KeyCode::Esc), Some(NormalAction::Quit))]
#[case(
    KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    Some(NormalAction::Quit)
)]
#[case(key(KeyCode::Char('n')), Some(NormalAction::NextPage))]
#[case(key(KeyCode::PageDown), Some(NormalAction::NextPage))]
#[case(key(KeyCode::Left), Some(NormalAction::PrevPage))]
#[case(key(KeyCode::Home), Some(NormalAction::FirstPage))]
#[case(key(KeyCode::Char('G')), Some(NormalAction::LastPage))]
#[case(key(KeyCode::Char('c')), None)]
#[case(key(KeyCode::Enter), None)]
fn normal_action_maps_keys(#[case] event: KeyEvent, #[case] expected: Option<NormalAction>) {
    assert_eq!(NormalAction::from_event(&event), expected);
}

#[test]
fn new_app_starts_loading_without_status() {
    let (app, _dir) = app();
    assert_eq!(app.page.view(), PageView::Loading);
    assert!(app.status.is_none());
    assert!(!app.should_quit());
}

#[test]
fn resolve_success_reports_arrival_count() {
    let (mut app, _dir) = app();
    let mut records = next_week(1);
    records.push(shipment("late", "2024-01-20T09:00:00Z"));

    app.resolve(Ok(records), &now());

    assert_eq!(app.page.arrivals().len(), 1);
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Info);
    assert!(status.text.ends_with("1 shipment arriving next week"));
}

#[test]
fn resolve_warns_about_unreadable_arrivals() {
    let (mut app, _dir) = app();
    let mut records = next_week(2);
    records.push(shipment("bad-1", "next tuesday"));
    records.push(shipment("bad-2", ""));

    app.resolve(Ok(records), &now());

    assert_eq!(app.page.arrivals().len(), 2);
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Warning);
    assert!(status.text.ends_with("2 shipments skipped: unreadable arrival"));
}

#[test]
fn resolve_failure_points_at_log_file() {
    let (mut app, _dir) = app();

    app.resolve(Err(FetchFailure::Status(503)), &now());

    assert_eq!(app.page.view(), PageView::Error);
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("arrivals.log"));
}

#[test]
fn later_results_do_not_replace_the_first() {
    let (mut app, _dir) = app();
    app.resolve(Err(FetchFailure::Reported), &now());
    app.resolve(Ok(next_week(3)), &now());

    assert_eq!(app.page.view(), PageView::Error);
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
}

#[test]
fn fetch_runs_in_background_until_polled() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .unwrap();
    let (mut app, dir) = app();
    assert!(!app.fetch_in_flight());

    let source = SourceLocation::File(dir.path().join("missing.json"))
        .open()
        .unwrap();
    app.start_fetch(PendingFetch::spawn(runtime.handle(), source));
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Info);

    let deadline = Instant::now() + Duration::from_secs(5);
    while app.fetch_in_flight() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(!app.fetch_in_flight());

    app.poll_fetch();
    assert_eq!(app.page.view(), PageView::Error);
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
}

#[test]
fn keys_move_between_pages() {
    let (mut app, _dir) = app();
    app.measure(TABLE_CHROME_ROWS as u16 + 2);
    app.resolve(Ok(next_week(5)), &now());
    assert_eq!(app.page.page_count(), 3);

    app.on_key(key(KeyCode::Char('n')));
    assert_eq!(app.page.current_page(), 1);
    app.on_key(key(KeyCode::End));
    assert_eq!(app.page.current_page(), 2);
    app.on_key(key(KeyCode::Right));
    assert_eq!(app.page.current_page(), 2);
    app.on_key(key(KeyCode::Char('g')));
    assert_eq!(app.page.current_page(), 0);
    app.on_key(key(KeyCode::Char('p')));
    assert_eq!(app.page.current_page(), 0);

    app.on_key(key(KeyCode::Char('q')));
    assert!(app.should_quit());
}

#[test]
fn resize_applies_after_quiet_period() {
    let (mut app, _dir) = app();
    app.measure(TABLE_CHROME_ROWS as u16 + 10);
    assert_eq!(app.page.page_size(), 10);

    let start = Instant::now();
    app.on_resize(TABLE_CHROME_ROWS as u16 + 4, start);
    app.on_resize(TABLE_CHROME_ROWS as u16 + 3, start + Duration::from_millis(40));

    app.settle_resize(start + Duration::from_millis(80));
    assert_eq!(app.page.page_size(), 10);

    app.settle_resize(start + Duration::from_millis(40) + RESIZE_QUIET);
    assert_eq!(app.page.page_size(), 3);
}

#[test]
fn tick_advances_spinner_only_while_loading() {
    let (mut app, _dir) = app();
    app.on_tick();
    app.on_tick();
    assert_eq!(app.frame, 2);

    app.resolve(Ok(Vec::new()), &now());
    app.on_tick();
    assert_eq!(app.frame, 2);
}

#[test]
fn renders_heading_and_rows() {
    let (mut app, _dir) = app();
    app.measure(24);
    app.resolve(Ok(next_week(2)), &now());

    let text = screen(&app, 160, 24);
    assert!(text.contains("Next week's arrivals"));
    assert!(text.contains("House Bill"));
    assert!(text.contains("HB-s0"));
    assert!(text.contains("HB-s1"));
    assert!(text.contains("1–2 of 2"));
}

#[test]
fn renders_empty_table_message() {
    let (mut app, _dir) = app();
    app.measure(24);
    app.resolve(Ok(Vec::new()), &now());

    let text = screen(&app, 160, 24);
    assert!(text.contains("No rows"));
    assert!(text.contains("0–0 of 0"));
}

#[test]
fn renders_error_text_on_failure() {
    let (mut app, _dir) = app();
    app.measure(24);
    app.resolve(Err(FetchFailure::Status(500)), &now());

    let text = screen(&app, 160, 24);
    assert!(text.contains("Error"));
    assert!(!text.contains("Next week's arrivals"));
}

#[test]
fn centered_rect_keeps_within_bounds() {
    let area = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };
    let rect = centered_rect(40, 10, area);
    assert_eq!(rect, Rect::new(20, 7, 40, 10));

    let clipped = centered_rect(120, 40, area);
    assert_eq!(clipped, area);
}

#[test]
fn column_constraints_cover_every_column() {
    assert_eq!(column_constraints().len(), 6);
}

#[test]
fn unreadable_arrival_is_shown_verbatim() {
    assert_eq!(format_arrival("soon"), "soon");
}

#[test]
fn spinner_is_three_rows_of_three() {
    let lines = spinner_lines(5);
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.spans.len() == 3));
}
