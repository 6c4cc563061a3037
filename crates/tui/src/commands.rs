use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use serde_json::json;

use crate::cli::{CliCommand, ListArgs};
use crate::config::AppConfig;
use crate::core::commands as core_commands;
use crate::model::{ShipmentRecord, COLUMNS};
use crate::week::{parse_arrival, upcoming_window, WeekSelection, WeekWindow};

const COLUMN_GAP: &str = "  ";

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::List(args) => handle_list(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_list<W: Write>(config: &AppConfig, args: &ListArgs, mut writer: W) -> Result<()> {
    let now = reference_now(args.now.as_deref(), config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let selection = runtime
        .block_on(core_commands::fetch_upcoming(config, &now))
        .with_context(|| format!("failed to load shipments from {}", config.source()))?;

    if args.json {
        let report = json!({
            "shipments": selection.shipments,
            "skipped": selection.skipped,
        });
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writeln!(writer)?;
        return Ok(());
    }

    write_table(&selection.shipments, &mut writer)?;
    writeln!(writer, "{}", ListSummary::from_selection(&selection))?;
    for skipped in &selection.skipped {
        writeln!(writer, "Skipped {}: unreadable arrival '{}'", skipped.id, skipped.raw)?;
    }
    Ok(())
}

fn reference_now(value: Option<&str>, config: &AppConfig) -> Result<DateTime<Local>> {
    let Some(raw) = value else {
        return Ok(Local::now());
    };
    let now = parse_arrival(raw, &Local)
        .map(|instant| instant.with_timezone(&Local))
        .ok_or_else(|| anyhow!("Unrecognized --now value '{}'. Try YYYY-MM-DD", raw))?;
    upcoming_window(&now, config.week().week_start)
        .with_context(|| format!("--now value '{}' is out of range", raw))?;
    Ok(now)
}

fn write_table<W: Write>(shipments: &[ShipmentRecord], mut writer: W) -> Result<()> {
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.header.chars().count()).collect();
    for shipment in shipments {
        for (width, column) in widths.iter_mut().zip(COLUMNS.iter()) {
            *width = (*width).max(shipment.field(column.field).chars().count());
        }
    }

    let header: Vec<&str> = COLUMNS.iter().map(|c| c.header).collect();
    writeln!(writer, "{}", pad_row(&header, &widths))?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    writeln!(writer, "{}", pad_row(&rule, &widths))?;

    for shipment in shipments {
        let cells: Vec<&str> = COLUMNS.iter().map(|c| shipment.field(c.field)).collect();
        writeln!(writer, "{}", pad_row(&cells, &widths))?;
    }
    Ok(())
}

fn pad_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

struct ListSummary {
    count: usize,
    window: WeekWindow,
}

impl ListSummary {
    fn from_selection(selection: &WeekSelection) -> Self {
        Self {
            count: selection.shipments.len(),
            window: selection.window,
        }
    }
}

impl fmt::Display for ListSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.window.start().with_timezone(&Local);
        let end = self.window.end().with_timezone(&Local);
        let range = format!("{} to {}", start.format("%a %Y-%m-%d"), end.format("%a %Y-%m-%d"));
        match self.count {
            0 => write!(f, "No shipments arriving {}", range),
            1 => write!(f, "1 shipment arriving {}", range),
            count => write!(f, "{} shipments arriving {}", count, range),
        }
    }
}
