//! State of the "next week's arrivals" dashboard, independent of how it is drawn.

use chrono::{DateTime, TimeZone};
use tracing::{debug, info, warn};

use crate::error::RecordParseFailure;
use crate::fetch::FetchResult;
use crate::model::{FetchOutcome, ShipmentRecord};
use crate::viewport::PageSizing;
use crate::week::{select_upcoming_week, WeekFilterOptions, WeekWindow};

pub const HEADING: &str = "Next week's arrivals";

#[derive(Debug)]
pub struct DashboardPage {
    options: WeekFilterOptions,
    sizing: PageSizing,
    outcome: FetchOutcome,
    arrivals: Vec<ShipmentRecord>,
    skipped: Vec<RecordParseFailure>,
    window: Option<WeekWindow>,
    page_size: usize,
    page: usize,
}

/// What the page should show right now.
#[derive(Debug, PartialEq, Eq)]
pub enum PageView<'a> {
    Loading,
    Error,
    Table(TablePage<'a>),
}

/// One page of the arrivals grid.
#[derive(Debug, PartialEq, Eq)]
pub struct TablePage<'a> {
    pub rows: &'a [ShipmentRecord],
    /// 1-based index of the first row shown, 0 when there are no rows.
    pub first: usize,
    pub last: usize,
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
}

impl TablePage<'_> {
    pub fn range_label(&self) -> String {
        format!("{}–{} of {}", self.first, self.last, self.total)
    }
}

impl DashboardPage {
    pub fn new(options: WeekFilterOptions, sizing: PageSizing) -> Self {
        Self {
            options,
            sizing,
            outcome: FetchOutcome::Loading,
            arrivals: Vec::new(),
            skipped: Vec::new(),
            window: None,
            page_size: 1,
            page: 0,
        }
    }

    /// Store the fetch result and, on success, select next week's arrivals
    /// relative to `now`. A page resolves once; later results are ignored.
    pub fn resolve<Tz: TimeZone>(&mut self, result: FetchResult, now: &DateTime<Tz>) -> bool {
        if !self.outcome.is_loading() {
            debug!("ignoring shipment result for an already resolved page");
            return false;
        }

        self.outcome = FetchOutcome::from(result);
        if let FetchOutcome::Success(records) = &self.outcome {
            match select_upcoming_week(records, now, &self.options) {
                Ok(selection) => {
                    info!(
                        fetched = records.len(),
                        selected = selection.shipments.len(),
                        skipped = selection.skipped.len(),
                        "selected next week's arrivals"
                    );
                    self.arrivals = selection.shipments;
                    self.skipped = selection.skipped;
                    self.window = Some(selection.window);
                    self.page = 0;
                }
                Err(err) => {
                    warn!(error = %err, "cannot select next week's arrivals");
                    self.outcome = FetchOutcome::Error(err.into());
                }
            }
        }
        true
    }

    /// Recompute rows per page from a measured viewport height.
    pub fn resize(&mut self, viewport_height: u32) {
        let page_size = self.sizing.rows_for(viewport_height);
        if page_size != self.page_size {
            debug!(viewport_height, page_size, "page size changed");
        }
        self.page_size = page_size;
        self.clamp_page();
    }

    pub fn outcome(&self) -> &FetchOutcome {
        &self.outcome
    }

    pub fn arrivals(&self) -> &[ShipmentRecord] {
        &self.arrivals
    }

    pub fn skipped(&self) -> &[RecordParseFailure] {
        &self.skipped
    }

    pub fn window(&self) -> Option<&WeekWindow> {
        self.window.as_ref()
    }

    pub fn options(&self) -> &WeekFilterOptions {
        &self.options
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.arrivals.len().div_ceil(self.page_size).max(1)
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn last_page(&mut self) {
        self.page = self.page_count() - 1;
    }

    pub fn view(&self) -> PageView<'_> {
        match &self.outcome {
            FetchOutcome::Loading => PageView::Loading,
            FetchOutcome::Error(_) => PageView::Error,
            FetchOutcome::Success(_) => {
                let total = self.arrivals.len();
                let start = (self.page * self.page_size).min(total);
                let end = (start + self.page_size).min(total);
                PageView::Table(TablePage {
                    rows: &self.arrivals[start..end],
                    first: if start == end { 0 } else { start + 1 },
                    last: end,
                    total,
                    page: self.page,
                    page_count: self.page_count(),
                })
            }
        }
    }

    fn clamp_page(&mut self) {
        let max = self.page_count() - 1;
        if self.page > max {
            self.page = max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchFailure;
    use crate::fetch::tests::shipment;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn page() -> DashboardPage {
        DashboardPage::new(WeekFilterOptions::default(), PageSizing::cells(0))
    }

    fn week_of_arrivals(count: usize) -> Vec<ShipmentRecord> {
        (0..count)
            .map(|i| shipment(&format!("s{i}"), &format!("2024-01-10T{:02}:00:00Z", i)))
            .collect()
    }

    #[test]
    fn starts_loading() {
        let page = page();
        assert_eq!(page.view(), PageView::Loading);
        assert!(page.window().is_none());
    }

    #[test]
    fn success_selects_next_week_only() {
        let mut page = page();
        page.resize(10);
        let records = vec![
            shipment("late", "2024-01-12"),
            shipment("far", "2024-03-01"),
            shipment("soon", "2024-01-08"),
            shipment("broken", "tbd"),
        ];
        assert!(page.resolve(Ok(records), &now()));

        let ids: Vec<&str> = page.arrivals().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["soon", "late"]);
        assert_eq!(page.skipped().len(), 1);
        match page.outcome() {
            FetchOutcome::Success(all) => assert_eq!(all.len(), 4),
            other => panic!("unexpected outcome {}", other.as_str()),
        }
    }

    #[test]
    fn failure_shows_error_and_is_terminal() {
        let mut page = page();
        assert!(page.resolve(Err(FetchFailure::Status(500)), &now()));
        assert_eq!(page.view(), PageView::Error);

        assert!(!page.resolve(Ok(week_of_arrivals(2)), &now()));
        assert_eq!(page.view(), PageView::Error);
        assert!(page.arrivals().is_empty());
    }

    #[test]
    fn paginates_by_page_size() {
        let mut page = page();
        page.resize(4);
        page.resolve(Ok(week_of_arrivals(10)), &now());
        assert_eq!(page.page_count(), 3);

        page.next_page();
        page.next_page();
        page.next_page();
        match page.view() {
            PageView::Table(table) => {
                assert_eq!(table.page, 2);
                assert_eq!(table.rows.len(), 2);
                assert_eq!(table.range_label(), "9–10 of 10");
            }
            other => panic!("unexpected view {other:?}"),
        }

        page.prev_page();
        match page.view() {
            PageView::Table(table) => assert_eq!(table.range_label(), "5–8 of 10"),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn growing_the_viewport_clamps_current_page() {
        let mut page = page();
        page.resize(3);
        page.resolve(Ok(week_of_arrivals(9)), &now());
        page.last_page();
        assert_eq!(page.current_page(), 2);

        page.resize(20);
        assert_eq!(page.page_size(), 20);
        assert_eq!(page.current_page(), 0);
    }

    #[test]
    fn empty_week_renders_empty_table() {
        let mut page = page();
        page.resolve(Ok(Vec::new()), &now());
        match page.view() {
            PageView::Table(table) => {
                assert!(table.rows.is_empty());
                assert_eq!(table.range_label(), "0–0 of 0");
                assert_eq!(table.page_count, 1);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn unrepresentable_next_week_resolves_to_error() {
        let mut page = page();
        assert!(page.resolve(Ok(week_of_arrivals(1)), &DateTime::<Utc>::MAX_UTC));
        assert_eq!(page.view(), PageView::Error);
        assert!(matches!(page.outcome(), FetchOutcome::Error(FetchFailure::Window(_))));
        assert!(page.window().is_none());
    }
}
