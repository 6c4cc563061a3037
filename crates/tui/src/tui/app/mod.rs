use std::time::Instant;

use chrono::{DateTime, Local, TimeZone};
use ratatui::style::{Color, Style};
use tracing::error;

use super::constants::*;
use crate::config::AppConfig;
use crate::core::fetch::FetchResult;
use crate::core::{DashboardPage, FetchOutcome, PageSizing, PendingFetch, ResizeDebouncer};

mod input;
mod render;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Warning,
    Error,
}

pub(crate) struct App {
    config: AppConfig,
    page: DashboardPage,
    pending: Option<PendingFetch>,
    resize: ResizeDebouncer,
    frame: usize,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig) -> Self {
        let page = DashboardPage::new(*config.week(), PageSizing::cells(TABLE_CHROME_ROWS));
        Self {
            config,
            page,
            pending: None,
            resize: ResizeDebouncer::new(RESIZE_QUIET),
            frame: 0,
            status: None,
            should_quit: false,
        }
    }

    pub(crate) fn start_fetch(&mut self, pending: PendingFetch) {
        self.pending = Some(pending);
        self.set_status_info(format!("{} from {}", STATUS_FETCHING, self.config.source()));
    }

    /// Pick up the fetch result once it arrives; filtering uses the clock at that moment.
    pub(crate) fn poll_fetch(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if let Some(result) = pending.poll() {
            self.pending = None;
            self.resolve(result, &Local::now());
        }
    }

    pub(crate) fn fetch_in_flight(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }

    pub(crate) fn resolve<Tz: TimeZone>(&mut self, result: FetchResult, now: &DateTime<Tz>) {
        if let Err(err) = &result {
            error!(source = %self.config.source(), error = %err, "shipments unavailable");
        }
        if !self.page.resolve(result, now) {
            return;
        }

        if matches!(self.page.outcome(), FetchOutcome::Error(_)) {
            self.set_status_error(format!(
                "{} • details in {}",
                STATUS_FETCH_FAILED,
                self.config.log_path().display()
            ));
            return;
        }

        let skipped = self.page.skipped().len();
        if skipped > 0 {
            self.set_status_warning(format!(
                "{} shipment{} skipped: unreadable arrival",
                skipped,
                if skipped == 1 { "" } else { "s" }
            ));
        } else {
            let count = self.page.arrivals().len();
            self.set_status_info(format!(
                "{} shipment{} arriving next week",
                count,
                if count == 1 { "" } else { "s" }
            ));
        }
    }

    /// First measurement of the viewport, applied without debouncing.
    pub(crate) fn measure(&mut self, rows: u16) {
        self.page.resize(rows.into());
    }

    pub(crate) fn on_resize(&mut self, rows: u16, at: Instant) {
        self.resize.observe(rows.into(), at);
    }

    pub(crate) fn settle_resize(&mut self, now: Instant) {
        if let Some(rows) = self.resize.settle(now) {
            self.page.resize(rows);
        }
    }

    pub(crate) fn on_tick(&mut self) {
        if self.page.outcome().is_loading() {
            self.frame = self.frame.wrapping_add(1);
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    fn set_status_warning<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Warning));
    }

    fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⛔ ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}
