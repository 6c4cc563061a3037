pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use arrivals_core as core;
pub use arrivals_core::model;
pub use arrivals_core::page;
pub use arrivals_core::source;
pub use arrivals_core::week;

pub use arrivals_core::AppConfig;
