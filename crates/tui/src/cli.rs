use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::model::WeekStart;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "arrivals",
    version,
    about = "Dashboard of the shipments arriving next week.",
    after_help = "Examples:\n  arrivals                                 Launch the dashboard (same as `arrivals tui`)\n  arrivals --source https://ops.example.com/shipments\n  arrivals list --now 2024-01-01 --week-start monday\n  arrivals list --json"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Shipment source: a JSON file path or an http(s) URL (defaults to <data dir>/shipments.json)
    #[arg(long, value_name = "PATH|URL", global = true)]
    pub source: Option<String>,

    /// First day of the calendar week
    #[arg(long = "week-start", value_enum, global = true)]
    pub week_start: Option<WeekStart>,

    /// Count arrivals landing exactly on the week's first or last instant
    #[arg(long = "inclusive-bounds", global = true)]
    pub inclusive_bounds: bool,

    /// Override the tracing filter (e.g. "info", "debug", or full directives)
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self.data_dir.clone(),
            source: self.source.clone(),
            week_start: self.week_start,
            inclusive_bounds: self.inclusive_bounds,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the terminal dashboard (default command)
    Tui,
    /// Print next week's arrivals once and exit
    List(ListArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Reference instant instead of the current time (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub now: Option<String>,

    /// Emit one JSON object with the selected shipments and the skipped records
    #[arg(long)]
    pub json: bool,
}
