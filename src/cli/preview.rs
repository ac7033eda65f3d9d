//! Preview command implementation

use super::{OutputFormat, PreviewArgs};
use crate::config::{load_config, ScheduleConfig};
use crate::error::{Error, Result};
use crate::hyperparams::ParamGroups;
use crate::train::{format_row, format_value};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Hyperparameters of every group after one schedule step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub step: usize,
    pub lr: Vec<f64>,
    pub momentum: Vec<f64>,
    pub wd: Vec<f64>,
}

impl PreviewRow {
    fn capture(step: usize, groups: &ParamGroups) -> Self {
        Self { step, lr: groups.lrs(), momentum: groups.momentums(), wd: groups.wds() }
    }
}

pub(super) fn run_preview<W: Write>(args: &PreviewArgs, out: &mut W) -> Result<()> {
    let config = load_config(&args.config)?;
    info!(
        "previewing {} schedule over {} steps, {} group(s)",
        config.schedule.name(),
        config.steps,
        config.optimizer.groups
    );
    let rows = preview_rows(&config, args.every)?;
    match args.format {
        OutputFormat::Table => render_table(&rows, out),
        OutputFormat::Json => render_json(&rows, out),
    }
}

/// Run the plan from `init_training` to its last step
///
/// Keeps step 0, every `every`-th step and the final step.
pub fn preview_rows(config: &ScheduleConfig, every: usize) -> Result<Vec<PreviewRow>> {
    let every = every.max(1);
    let (mut groups, mut schedule) = config.build()?;
    schedule.init_training(&mut groups)?;

    let mut rows = vec![PreviewRow::capture(0, &groups)];
    for step in 1..=config.steps {
        schedule.step(&mut groups)?;
        if step % every == 0 || step == config.steps {
            rows.push(PreviewRow::capture(step, &groups));
        }
    }
    Ok(rows)
}

/// Fixed-width table with one column per group and hyperparameter
pub fn render_table<W: Write>(rows: &[PreviewRow], out: &mut W) -> Result<()> {
    let n_groups = rows.first().map_or(0, |row| row.lr.len());
    let mut header = vec!["step".to_string()];
    for name in ["lr", "momentum", "wd"] {
        if n_groups == 1 {
            header.push(name.to_string());
        } else {
            header.extend((0..n_groups).map(|g| format!("{name}[{g}]")));
        }
    }
    writeln!(out, "{}", format_row(&header, false))?;

    for row in rows {
        let mut cells = vec![row.step.to_string()];
        for values in [&row.lr, &row.momentum, &row.wd] {
            cells.extend(values.iter().map(|&v| format_value(v)));
        }
        writeln!(out, "{}", format_row(&cells, true))?;
    }
    Ok(())
}

pub fn render_json<W: Write>(rows: &[PreviewRow], out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, rows)
        .map_err(|e| Error::ConfigError(format!("Failed to write JSON: {e}")))?;
    writeln!(out)?;
    Ok(())
}
