use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

use crate::model::{BoundaryMode, WeekStart};
use crate::source::SourceLocation;
use crate::week::WeekFilterOptions;

static DEFAULT_SOURCE_NAME: &str = "shipments.json";
pub const LOG_FILE_NAME: &str = "arrivals.log";
static ENV_DATA_DIR: &str = "ARRIVALS_DATA_DIR";
static ENV_SOURCE: &str = "ARRIVALS_SOURCE";
static ENV_WEEK_START: &str = "ARRIVALS_WEEK_START";
static ENV_INCLUSIVE_BOUNDS: &str = "ARRIVALS_INCLUSIVE_BOUNDS";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "arrivals", "arrivals"));

/// Values given on the command line; unset fields fall back to the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub source: Option<String>,
    pub week_start: Option<WeekStart>,
    pub inclusive_bounds: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    source: SourceLocation,
    week: WeekFilterOptions,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving each setting from the provided overrides,
    /// environment variables, and platform defaults.
    pub fn discover(overrides: ConfigOverrides) -> Result<Self> {
        let data_dir = resolve_data_dir(overrides.data_dir)?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }

        let source = match overrides.source.or_else(|| env::var(ENV_SOURCE).ok()) {
            Some(location) if !location.trim().is_empty() => SourceLocation::parse(&location),
            _ => SourceLocation::File(data_dir.join(DEFAULT_SOURCE_NAME)),
        };

        let week_start = match overrides.week_start {
            Some(week_start) => week_start,
            None => match env::var(ENV_WEEK_START) {
                Ok(value) => value
                    .parse()
                    .with_context(|| format!("Invalid {} value", ENV_WEEK_START))?,
                Err(_) => WeekStart::default(),
            },
        };

        let inclusive = overrides.inclusive_bounds
            || env::var(ENV_INCLUSIVE_BOUNDS)
                .map(|value| is_truthy(&value))
                .unwrap_or(false);

        Ok(Self {
            data_dir,
            source,
            week: WeekFilterOptions {
                week_start,
                boundary: BoundaryMode::from_inclusive(inclusive),
            },
        })
    }

    /// Construct [`AppConfig`] directly from resolved parts.
    pub fn new(data_dir: PathBuf, source: SourceLocation, week: WeekFilterOptions) -> Self {
        Self {
            data_dir,
            source,
            week,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn source(&self) -> &SourceLocation {
        &self.source
    }

    pub fn week(&self) -> &WeekFilterOptions {
        &self.week
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(env_dir));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir.join("..").join("tmp").join("dev-arrivals");
        return Ok(dev_dir);
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".arrivals"));
    }

    Ok(env::current_dir()?.join(".arrivals"))
}
