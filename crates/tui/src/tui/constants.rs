use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(120);
pub(crate) const RESIZE_QUIET: Duration = Duration::from_millis(150);

/// Terminal rows taken by everything except table rows: app header, heading,
/// table borders and header row, pager, and the two footer lines.
pub(crate) const TABLE_CHROME_ROWS: u32 = 8;

pub(crate) const STATUS_FETCHING: &str = "Fetching shipments";
pub(crate) const STATUS_FETCH_FAILED: &str = "Could not load shipments";
pub(crate) const ERROR_TEXT: &str = "Error";

pub(crate) const HELP_NORMAL: &str =
    "pages: n/→/PgDn next | p/←/PgUp previous | Home/End first/last | q quit";
pub(crate) const HELP_LOADING: &str = "q quit";
