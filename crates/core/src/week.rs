//! Selection of the shipments arriving during next calendar week.

use chrono::prelude::*;
use chrono::{Days, Duration};
use tracing::{debug, warn};

use crate::error::{RecordParseFailure, WeekOutOfRange};
use crate::model::{BoundaryMode, ShipmentRecord, WeekStart};

const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekFilterOptions {
    pub week_start: WeekStart,
    pub boundary: BoundaryMode,
}

/// Calendar week running from local midnight of its first day to the last
/// millisecond of its seventh day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl WeekWindow {
    /// The week that contains `instant`, with days taken in `instant`'s time zone.
    /// `None` when the week runs past the last representable date.
    pub fn containing<Tz: TimeZone>(
        instant: &DateTime<Tz>,
        week_start: WeekStart,
    ) -> Option<Self> {
        let tz = instant.timezone();
        let date = instant.date_naive();
        let first_day =
            date.checked_sub_days(Days::new(week_start.days_into_week(date.weekday()).into()))?;
        let next_first_day = first_day.checked_add_days(Days::new(7))?;
        let end =
            local_midnight(&tz, next_first_day).checked_sub_signed(Duration::milliseconds(1))?;

        Some(Self {
            start: local_midnight(&tz, first_day),
            end,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, instant: &DateTime<Utc>, boundary: BoundaryMode) -> bool {
        match boundary {
            BoundaryMode::Exclusive => self.start < *instant && *instant < self.end,
            BoundaryMode::Inclusive => self.start <= *instant && *instant <= self.end,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeekSelection {
    pub window: WeekWindow,
    /// Matching shipments, ascending by arrival, ties in input order.
    pub shipments: Vec<ShipmentRecord>,
    pub skipped: Vec<RecordParseFailure>,
}

/// The calendar week containing `reference_now + 7 days`.
pub fn upcoming_window<Tz: TimeZone>(
    reference_now: &DateTime<Tz>,
    week_start: WeekStart,
) -> Result<WeekWindow, WeekOutOfRange> {
    reference_now
        .clone()
        .checked_add_days(Days::new(7))
        .and_then(|target| WeekWindow::containing(&target, week_start))
        .ok_or_else(|| WeekOutOfRange {
            reference: reference_now.with_timezone(&Utc).to_rfc3339(),
        })
}

/// Shipments whose estimated arrival falls in the calendar week containing
/// `reference_now + 7 days`.
pub fn select_upcoming_week<Tz: TimeZone>(
    records: &[ShipmentRecord],
    reference_now: &DateTime<Tz>,
    options: &WeekFilterOptions,
) -> Result<WeekSelection, WeekOutOfRange> {
    let window = upcoming_window(reference_now, options.week_start)?;
    debug!(
        start = %window.start(),
        end = %window.end(),
        boundary = options.boundary.as_str(),
        week_start = options.week_start.as_str(),
        "computed arrival window"
    );

    let tz = reference_now.timezone();
    let mut matched: Vec<(DateTime<Utc>, &ShipmentRecord)> = Vec::new();
    let mut skipped = Vec::new();

    for record in records {
        match parse_arrival(&record.estimated_arrival, &tz) {
            Some(arrival) if window.contains(&arrival, options.boundary) => {
                matched.push((arrival, record))
            }
            Some(_) => {}
            None => {
                warn!(
                    shipment = record.id.as_str(),
                    raw = record.estimated_arrival.as_str(),
                    "skipping shipment with unreadable arrival"
                );
                skipped.push(RecordParseFailure {
                    id: record.id.clone(),
                    raw: record.estimated_arrival.clone(),
                });
            }
        }
    }

    // sort_by_key is stable, equal arrivals keep their input order.
    matched.sort_by_key(|(arrival, _)| *arrival);

    Ok(WeekSelection {
        window,
        shipments: matched.into_iter().map(|(_, record)| record.clone()).collect(),
        skipped,
    })
}

/// Parse an arrival timestamp. Strings without an offset are read as local
/// time in `tz`; a bare date means local midnight.
pub fn parse_arrival<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(resolve_local(tz, naive));
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|date| local_midnight(tz, date))
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    if let Some(resolved) = tz.from_local_datetime(&naive).earliest() {
        return resolved.with_timezone(&Utc);
    }
    // Local time skipped by a DST jump; move past the gap.
    naive
        .checked_add_signed(Duration::hours(1))
        .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
        .map(|resolved| resolved.with_timezone(&Utc))
        .unwrap_or_else(|| tz.from_utc_datetime(&naive).with_timezone(&Utc))
}
