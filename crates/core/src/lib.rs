pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod page;
pub mod source;
pub mod viewport;
pub mod week;

pub use commands::fetch_upcoming;
pub use config::{AppConfig, ConfigOverrides};
pub use error::{FetchFailure, RecordParseFailure, WeekOutOfRange};
pub use fetch::PendingFetch;
pub use model::*;
pub use page::{DashboardPage, PageView, TablePage};
pub use source::{ShipmentSource, SourceLocation};
pub use viewport::{PageSizing, ResizeDebouncer};
pub use week::{
    select_upcoming_week, upcoming_window, WeekFilterOptions, WeekSelection, WeekWindow,
};
