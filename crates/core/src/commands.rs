use chrono::{DateTime, TimeZone};
use tokio::runtime::Handle;

use crate::config::AppConfig;
use crate::error::FetchFailure;
use crate::fetch::PendingFetch;
use crate::week::{select_upcoming_week, WeekSelection};

/// Fetch every shipment from the configured source and select next week's arrivals.
/// Must run inside a tokio runtime.
pub async fn fetch_upcoming<Tz: TimeZone>(
    config: &AppConfig,
    now: &DateTime<Tz>,
) -> Result<WeekSelection, FetchFailure> {
    let source = config.source().open()?;
    let records = PendingFetch::spawn(&Handle::current(), source).wait().await?;
    Ok(select_upcoming_week(&records, now, config.week())?)
}
