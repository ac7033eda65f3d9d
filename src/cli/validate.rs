//! Validate command implementation

use super::ValidateArgs;
use crate::config::{load_config, ScheduleConfig};
use crate::error::Result;
use crate::hyperparams::GroupValues;
use std::io::Write;

/// Human-readable summary of a plan
pub fn format_summary(config: &ScheduleConfig) -> String {
    let optimizer = &config.optimizer;
    let mut lines = vec![
        format!("  Steps: {}", config.steps),
        format!("  Optimizer: {:?}, {} group(s)", optimizer.kind, optimizer.groups),
        format!("  Learning rate: {}", format_values(&optimizer.lr)),
        format!("  Momentum: {}", optimizer.momentum),
    ];
    if let Some(wd) = &optimizer.wd {
        lines.push(format!(
            "  Weight decay: {} ({:?})",
            format_values(wd),
            optimizer.weight_decay
        ));
    }
    lines.push(format!("  Schedule: {}", config.schedule.name()));
    lines.join("\n")
}

fn format_values(values: &GroupValues) -> String {
    match values {
        GroupValues::Broadcast(v) => v.to_string(),
        GroupValues::PerGroup(vs) => format!("{vs:?}"),
    }
}

pub(super) fn run_validate<W: Write>(args: &ValidateArgs, quiet: bool, out: &mut W) -> Result<()> {
    let config = load_config(&args.config)?;
    if !quiet {
        writeln!(out, "✓ Config is valid: {}", args.config.display())?;
        writeln!(out, "{}", format_summary(&config))?;
    }
    Ok(())
}
