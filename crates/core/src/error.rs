use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Why the dashboard could not produce a list of arrivals.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("failed to read shipments from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("shipment request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("shipment source answered with HTTP {0}")]
    Status(u16),

    #[error("shipment payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("shipment source reported an error")]
    Reported,

    #[error("shipment fetch was abandoned before it resolved")]
    Abandoned,

    #[error(transparent)]
    Window(#[from] WeekOutOfRange),
}

/// The reference instant is so close to the end of the calendar that next
/// week cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no calendar week follows {reference}")]
pub struct WeekOutOfRange {
    pub reference: String,
}

/// A record left out of the weekly view because its arrival could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("shipment {id} has an unreadable estimated arrival '{raw}'")]
pub struct RecordParseFailure {
    pub id: String,
    pub raw: String,
}
