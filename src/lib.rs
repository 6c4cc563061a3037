pub use arrivals_tui::cli;
pub use arrivals_tui::commands;
pub use arrivals_tui::config;
pub use arrivals_tui::logging;
pub use arrivals_tui::tui;
pub use arrivals_tui::AppConfig;

pub use arrivals_core as core;
pub use arrivals_core::model;
pub use arrivals_core::page;
pub use arrivals_core::source;
pub use arrivals_core::week;
