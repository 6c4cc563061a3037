//! Shipment sources: where the dashboard's records come from.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::FetchFailure;
use crate::model::ShipmentRecord;

#[async_trait]
pub trait ShipmentSource: Send + Sync {
    /// Human readable origin of the records, used in logs and the header.
    fn describe(&self) -> String;

    /// Resolve once with every shipment the source knows about.
    async fn fetch(&self) -> Result<Vec<ShipmentRecord>, FetchFailure>;
}

/// Where shipments are loaded from, as given on the command line or in the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Http(String),
}

impl SourceLocation {
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceLocation::Http(trimmed.to_string())
        } else {
            SourceLocation::File(PathBuf::from(trimmed))
        }
    }

    pub fn open(&self) -> Result<Arc<dyn ShipmentSource>, FetchFailure> {
        match self {
            SourceLocation::File(path) => Ok(Arc::new(FileSource::new(path.clone()))),
            SourceLocation::Http(url) => Ok(Arc::new(HttpSource::new(url.clone())?)),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Http(url) => write!(f, "{}", url),
        }
    }
}

/// Reads a JSON document of shipments from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ShipmentSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<ShipmentRecord>, FetchFailure> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchFailure::Io {
                path: self.path.clone(),
                source,
            })?;
        info!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "read shipments file"
        );
        decode_payload(&bytes)
    }
}

/// Fetches shipments from an HTTP endpoint answering with JSON.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: String) -> Result<Self, FetchFailure> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(format!("arrivals/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl ShipmentSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<ShipmentRecord>, FetchFailure> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                url = self.url.as_str(),
                status = status.as_u16(),
                "shipment endpoint returned non-success status"
            );
            return Err(FetchFailure::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        info!(
            url = self.url.as_str(),
            status = status.as_u16(),
            bytes = body.len(),
            "fetched shipments"
        );
        decode_payload(&body)
    }
}

#[derive(Deserialize)]
struct Envelope {
    shipments: Vec<ShipmentRecord>,
}

/// Decode either a bare array of shipments or a `{ "status", "shipments" }` envelope.
pub fn decode_payload(bytes: &[u8]) -> Result<Vec<ShipmentRecord>, FetchFailure> {
    let value: Value = serde_json::from_slice(bytes)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(ref map) => {
            let reported_error = map
                .get("status")
                .and_then(Value::as_str)
                .is_some_and(|status| status.eq_ignore_ascii_case("error"));
            if reported_error {
                return Err(FetchFailure::Reported);
            }
            let envelope: Envelope = serde_json::from_value(value)?;
            Ok(envelope.shipments)
        }
        _ => Err(FetchFailure::Decode(serde_json::Error::custom(
            "expected an array of shipments or an object with a `shipments` field",
        ))),
    }
}
