//! Per-epoch results and where they are written

use crate::error::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::Write;

/// Decimals kept when printing losses and metrics
const DECIMALS: i32 = 6;

/// Column width of the epoch table
const WIDTH: usize = 10;

/// Batch-size-weighted averages over one epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    pub loss: f64,
    /// One value per metric, in manager order
    pub metrics: Vec<f64>,
}

/// Receives the epoch table produced by [`fit`](super::fit)
pub trait EpochReporter {
    /// Called once, before the first row
    fn header(&mut self, metric_names: &[&str]) -> Result<()>;

    /// Called after each epoch with the training and validation averages
    fn epoch(&mut self, epoch: usize, train: &EpochReport, val: &EpochReport) -> Result<()>;
}

/// Fixed-width table: `epoch trn_loss val_loss <metrics...>`
#[derive(Debug)]
pub struct TableReporter<W> {
    out: W,
}

impl<W: Write> TableReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EpochReporter for TableReporter<W> {
    fn header(&mut self, metric_names: &[&str]) -> Result<()> {
        let mut cells = vec!["epoch", "trn_loss", "val_loss"];
        cells.extend_from_slice(metric_names);
        writeln!(self.out, "{}", format_row(&cells, false))?;
        Ok(())
    }

    fn epoch(&mut self, epoch: usize, train: &EpochReport, val: &EpochReport) -> Result<()> {
        let mut cells = vec![epoch.to_string(), format_value(train.loss), format_value(val.loss)];
        cells.extend(val.metrics.iter().map(|&m| format_value(m)));
        writeln!(self.out, "{}", format_row(&cells, true))?;
        Ok(())
    }
}

/// Writes each epoch through the `log` facade at info level
#[derive(Debug, Default)]
pub struct LogReporter {
    names: Vec<String>,
}

impl EpochReporter for LogReporter {
    fn header(&mut self, metric_names: &[&str]) -> Result<()> {
        self.names = metric_names.iter().map(|n| n.to_string()).collect();
        Ok(())
    }

    fn epoch(&mut self, epoch: usize, train: &EpochReport, val: &EpochReport) -> Result<()> {
        let metrics: Vec<String> = self
            .names
            .iter()
            .zip(&val.metrics)
            .map(|(name, value)| format!(" {name}={}", format_value(*value)))
            .collect();
        info!(
            "epoch {epoch}: trn_loss={} val_loss={}{}",
            format_value(train.loss),
            format_value(val.loss),
            metrics.concat()
        );
        Ok(())
    }
}

/// Lay out cells in 10-character columns separated by a space
///
/// The first cell is centered when `center_first` is set and left-aligned
/// otherwise; the rest are left-aligned. Longer cells are not truncated.
pub fn format_row<T: Display>(cells: &[T], center_first: bool) -> String {
    let mut row = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i == 0 {
            if center_first {
                row.push_str(&format!("{cell:^WIDTH$}"));
            } else {
                row.push_str(&format!("{cell:<WIDTH$}"));
            }
        } else {
            row.push_str(&format!(" {cell:<WIDTH$}"));
        }
    }
    row
}

/// Round to six decimals, keeping a trailing `.0` on whole numbers
pub fn format_value(value: f64) -> String {
    let scale = 10f64.powi(DECIMALS);
    let rounded = (value * scale).round() / scale;
    format!("{rounded:?}")
}
