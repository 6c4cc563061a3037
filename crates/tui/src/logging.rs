use std::fs::OpenOptions;
use std::sync::OnceLock;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Log to `<data dir>/arrivals.log` so the dashboard's alternate screen stays clean.
pub fn init_file(config: &AppConfig, filter: Option<String>) -> Result<()> {
    let env_filter = build_filter(filter)?;
    let log_path = config.log_path();
    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .try_init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(err) => {
            // Writing to the terminal would corrupt the dashboard; run without logs.
            eprintln!(
                "arrivals: could not open log file {}: {}",
                log_path.display(),
                err
            );
        }
    }
    Ok(())
}

/// Log to stderr, for one-shot commands whose stdout is the result.
pub fn init_stderr(filter: Option<String>) -> Result<()> {
    let env_filter = build_filter(filter)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
    Ok(())
}

fn build_filter(filter: Option<String>) -> Result<EnvFilter> {
    let filter = filter.unwrap_or_else(|| "info".to_string());
    let directive: Directive = filter.parse()?;
    Ok(EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy())
}
