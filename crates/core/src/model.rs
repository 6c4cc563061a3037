use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::Weekday;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FetchFailure;

/// One tracked freight movement as delivered by the shipment source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRecord {
    pub id: String,
    #[serde(default)]
    pub house_bill_number: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub mode: String,
    pub estimated_arrival: String,
    #[serde(default)]
    pub estimated_departure: String,
}

impl ShipmentRecord {
    /// Display value for one of the dashboard columns.
    pub fn field(&self, field: ColumnField) -> &str {
        match field {
            ColumnField::HouseBillNumber => &self.house_bill_number,
            ColumnField::Client => &self.client,
            ColumnField::Origin => &self.origin,
            ColumnField::Destination => &self.destination,
            ColumnField::EstimatedArrival => &self.estimated_arrival,
            ColumnField::Status => &self.status,
        }
    }
}

/// First day of the calendar week used to build the arrival window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        }
    }

    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Number of days `day` lies after the start of its week.
    pub fn days_into_week(&self, day: Weekday) -> u32 {
        match self {
            WeekStart::Sunday => day.num_days_from_sunday(),
            WeekStart::Monday => day.num_days_from_monday(),
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WeekStart {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sun" | "sunday" => Ok(WeekStart::Sunday),
            "mon" | "monday" => Ok(WeekStart::Monday),
            other => Err(anyhow!(
                "Unknown week start '{}': expected sunday|monday",
                other
            )),
        }
    }
}

/// Whether arrivals landing exactly on the window edges count as inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryMode {
    #[default]
    Exclusive,
    Inclusive,
}

impl BoundaryMode {
    pub fn from_inclusive(inclusive: bool) -> Self {
        if inclusive {
            BoundaryMode::Inclusive
        } else {
            BoundaryMode::Exclusive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryMode::Exclusive => "exclusive",
            BoundaryMode::Inclusive => "inclusive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnField {
    HouseBillNumber,
    Client,
    Origin,
    Destination,
    EstimatedArrival,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: ColumnField,
    pub header: &'static str,
    /// Width hint in pixels; terminal renderers scale these proportionally.
    pub width: u16,
}

pub const COLUMNS: [Column; 6] = [
    Column {
        field: ColumnField::HouseBillNumber,
        header: "House Bill",
        width: 150,
    },
    Column {
        field: ColumnField::Client,
        header: "Shipper",
        width: 200,
    },
    Column {
        field: ColumnField::Origin,
        header: "Origin",
        width: 400,
    },
    Column {
        field: ColumnField::Destination,
        header: "Destination",
        width: 400,
    },
    Column {
        field: ColumnField::EstimatedArrival,
        header: "Estimated Arrival",
        width: 200,
    },
    Column {
        field: ColumnField::Status,
        header: "Status",
        width: 200,
    },
];

pub fn total_column_width() -> u32 {
    COLUMNS.iter().map(|column| u32::from(column.width)).sum()
}

/// State of the one shipment fetch a dashboard page performs.
#[derive(Debug)]
pub enum FetchOutcome {
    Loading,
    Success(Vec<ShipmentRecord>),
    Error(FetchFailure),
}

impl FetchOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchOutcome::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FetchOutcome::Loading => "loading",
            FetchOutcome::Success(_) => "success",
            FetchOutcome::Error(_) => "error",
        }
    }
}

impl From<Result<Vec<ShipmentRecord>, FetchFailure>> for FetchOutcome {
    fn from(result: Result<Vec<ShipmentRecord>, FetchFailure>) -> Self {
        match result {
            Ok(records) => FetchOutcome::Success(records),
            Err(err) => FetchOutcome::Error(err),
        }
    }
}
