//! Plan validation logic

use super::error::ValidationError;
use crate::config::schema::{OptimizerConfig, ScheduleConfig, SchedulePlan};
use crate::hyperparams::GroupValues;
use crate::sched::ParamSpec;

/// Validate a plan
///
/// Checks:
/// - At least one group, and per-group lists sized to match
/// - Learning rates, momentum and weight decay in range
/// - Schedule factors and shares in range
pub fn validate_config(config: &ScheduleConfig) -> Result<(), ValidationError> {
    validate_optimizer(&config.optimizer)?;
    validate_schedule(&config.schedule)
}

fn validate_optimizer(optimizer: &OptimizerConfig) -> Result<(), ValidationError> {
    if optimizer.groups == 0 {
        return Err(ValidationError::ZeroGroups);
    }

    for lr in group_values("lr", &optimizer.lr, optimizer.groups)? {
        if !is_magnitude(lr) {
            return Err(ValidationError::InvalidLearningRate(lr));
        }
    }

    if !(0.0..=1.0).contains(&optimizer.momentum) {
        return Err(ValidationError::InvalidMomentum(optimizer.momentum));
    }

    if let Some(wd) = &optimizer.wd {
        for value in group_values("wd", wd, optimizer.groups)? {
            if !is_magnitude(value) {
                return Err(ValidationError::InvalidWeightDecay(value));
            }
        }
    }

    Ok(())
}

fn validate_schedule(plan: &SchedulePlan) -> Result<(), ValidationError> {
    match plan {
        SchedulePlan::Nop => Ok(()),
        SchedulePlan::Clr(options) | SchedulePlan::BurnIn(options) => {
            lr_factor(options.lr_factor)?;
            curve("momentums", options.momentums)?;
            curve("wds", options.wds)
        }
        SchedulePlan::Stlr(options) => {
            lr_factor(options.lr_factor)?;
            share("up_share", options.up_share)?;
            curve("momentums", options.momentums)?;
            curve("wds", options.wds)
        }
        SchedulePlan::OneCycle(options) => {
            lr_factor(options.lr_factor)?;
            share("anneal_share", options.anneal_share)?;
            if !(options.anneal_factor >= 1.0) || options.anneal_factor.is_infinite() {
                return Err(ValidationError::InvalidAnnealFactor(options.anneal_factor));
            }
            curve("momentums", options.momentums.map(ParamSpec::from))?;
            curve("wds", options.wds)
        }
    }
}

fn group_values(
    param: &'static str,
    values: &GroupValues,
    groups: usize,
) -> Result<Vec<f64>, ValidationError> {
    values.expand(param, groups).map_err(|_| ValidationError::GroupCount {
        param,
        got: match values {
            GroupValues::PerGroup(v) => v.len(),
            GroupValues::Broadcast(_) => 1,
        },
        groups,
    })
}

fn lr_factor(value: f64) -> Result<(), ValidationError> {
    if !(value > 0.0) || value.is_infinite() {
        return Err(ValidationError::InvalidLrFactor(value));
    }
    Ok(())
}

fn share(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(value > 0.0 && value < 1.0) {
        return Err(ValidationError::InvalidShare { name, value });
    }
    Ok(())
}

fn curve(name: &'static str, spec: Option<ParamSpec>) -> Result<(), ValidationError> {
    let values = match spec {
        None => return Ok(()),
        Some(ParamSpec::Constant(y)) => vec![y],
        Some(ParamSpec::Triangle(y0, y1)) => vec![y0, y1],
    };
    match values.into_iter().find(|v| !is_magnitude(*v)) {
        Some(value) => Err(ValidationError::InvalidCurveValue { name, value }),
        None => Ok(()),
    }
}

fn is_magnitude(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
