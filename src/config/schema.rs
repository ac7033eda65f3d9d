//! YAML schema for schedule plans

use crate::error::Result;
use crate::hyperparams::{GroupValues, HyperparamSink, OptimizerKind, ParamGroups};
use crate::sched::{CurveOptions, OneCycleOptions, Schedule, SlantedOptions};
use serde::{Deserialize, Serialize};

/// A complete plan: optimizer groups plus the schedule driving them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Total number of schedule steps (optimizer steps)
    pub steps: usize,

    pub optimizer: OptimizerConfig,

    #[serde(default)]
    pub schedule: SchedulePlan,
}

/// How the `wd` values are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightDecayMode {
    /// Directly on the weights (AdamW style)
    #[default]
    Decoupled,
    /// Folded into the loss gradient
    LossCoupled,
}

/// Optimizer parameter groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub kind: OptimizerKind,

    #[serde(default = "default_groups")]
    pub groups: usize,

    /// Scalar or per-group learning rates
    pub lr: GroupValues,

    /// Momentum, or `beta1` for Adam
    #[serde(default)]
    pub momentum: f64,

    #[serde(default)]
    pub wd: Option<GroupValues>,

    #[serde(default)]
    pub weight_decay: WeightDecayMode,
}

fn default_groups() -> usize {
    1
}

/// Which schedule to run, with its options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulePlan {
    #[default]
    Nop,
    Clr(CurveOptions),
    Stlr(SlantedOptions),
    BurnIn(CurveOptions),
    OneCycle(OneCycleOptions),
}

impl SchedulePlan {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nop => "nop",
            Self::Clr(_) => "clr",
            Self::Stlr(_) => "stlr",
            Self::BurnIn(_) => "burn_in",
            Self::OneCycle(_) => "one_cycle",
        }
    }

    /// Build the schedule over `nb` steps, capturing the lrs in `sink`
    pub fn build<S>(&self, sink: &S, nb: usize) -> Result<Schedule>
    where
        S: HyperparamSink + ?Sized,
    {
        match *self {
            Self::Nop => Ok(Schedule::nop()),
            Self::Clr(options) => Schedule::clr(sink, nb, options),
            Self::Stlr(options) => Schedule::stlr(sink, nb, options),
            Self::BurnIn(options) => Schedule::burn_in(sink, nb, options),
            Self::OneCycle(options) => Schedule::one_cycle(sink, nb, options),
        }
    }
}

impl OptimizerConfig {
    /// Parameter groups holding the configured starting values
    pub fn build(&self) -> Result<ParamGroups> {
        let mut groups = ParamGroups::new(self.groups, self.kind.momentum_term(self.momentum));
        groups.set_lrs(self.lr.clone())?;
        if let Some(wd) = &self.wd {
            match self.weight_decay {
                WeightDecayMode::Decoupled => groups.apply_decoupled_weight_decay(wd.clone())?,
                WeightDecayMode::LossCoupled => groups.apply_loss_coupled_weight_decay(wd.clone())?,
            }
        }
        Ok(groups)
    }
}

impl ScheduleConfig {
    /// The parameter groups and a schedule over them
    ///
    /// The schedule is not started; call `init_training` on it first.
    pub fn build(&self) -> Result<(ParamGroups, Schedule)> {
        let groups = self.optimizer.build()?;
        let schedule = self.schedule.build(&groups, self.steps)?;
        Ok((groups, schedule))
    }
}
