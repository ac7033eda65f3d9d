//! In-memory parameter groups

use super::{GroupValues, Hyperparam, HyperparamSink};
use crate::error::{Error, Result};
use ndarray::{ArrayView1, ArrayViewMut1};
use serde::{Deserialize, Serialize};

/// Optimizer family, which decides where momentum lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    /// Plain momentum
    #[default]
    Sgd,
    /// First/second moment coefficients (`betas`)
    Adam,
    /// Momentum plus a squared-gradient smoothing constant (`alpha`)
    Rmsprop,
}

impl OptimizerKind {
    /// Momentum term for this family, starting at `momentum`
    ///
    /// Second coefficients start at the usual defaults (0.999 for Adam,
    /// 0.99 for RMSProp).
    pub fn momentum_term(&self, momentum: f64) -> MomentumTerm {
        match self {
            Self::Sgd => MomentumTerm::Classic { momentum },
            Self::Adam => MomentumTerm::Betas { beta1: momentum, beta2: 0.999 },
            Self::Rmsprop => MomentumTerm::Smoothed { momentum, alpha: 0.99 },
        }
    }
}

/// Where a group keeps its momentum-like coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MomentumTerm {
    Classic { momentum: f64 },
    Betas { beta1: f64, beta2: f64 },
    Smoothed { momentum: f64, alpha: f64 },
}

impl MomentumTerm {
    /// The momentum, or `beta1` for Adam-style optimizers
    pub fn momentum(&self) -> f64 {
        match self {
            Self::Classic { momentum } | Self::Smoothed { momentum, .. } => *momentum,
            Self::Betas { beta1, .. } => *beta1,
        }
    }

    /// The second coefficient: `beta2` or `alpha`
    pub fn beta(&self) -> Option<f64> {
        match self {
            Self::Classic { .. } => None,
            Self::Betas { beta2, .. } => Some(*beta2),
            Self::Smoothed { alpha, .. } => Some(*alpha),
        }
    }

    fn set_momentum(&mut self, value: f64) {
        match self {
            Self::Classic { momentum } | Self::Smoothed { momentum, .. } => *momentum = value,
            Self::Betas { beta1, .. } => *beta1 = value,
        }
    }

    fn set_beta(&mut self, value: f64) {
        match self {
            Self::Classic { .. } => {}
            Self::Betas { beta2, .. } => *beta2 = value,
            Self::Smoothed { alpha, .. } => *alpha = value,
        }
    }
}

/// Hyperparameters of one parameter group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamGroup {
    pub lr: f64,
    pub momentum: MomentumTerm,
    /// Decoupled weight decay, applied to the weights at each step
    pub wd: f64,
    /// Weight decay folded into the loss, i.e. added to the gradients
    pub loss_wd: f64,
}

impl ParamGroup {
    /// A group with no weight decay
    pub fn new(lr: f64, momentum: MomentumTerm) -> Self {
        Self { lr, momentum, wd: 0.0, loss_wd: 0.0 }
    }
}

/// Programmable hyperparameters for a set of parameter groups
///
/// Scalars broadcast to every group; lists must match the group count.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamGroups {
    groups: Vec<ParamGroup>,
}

impl ParamGroups {
    /// `n_groups` groups with zero learning rate and the given momentum term
    pub fn new(n_groups: usize, momentum: MomentumTerm) -> Self {
        Self { groups: vec![ParamGroup::new(0.0, momentum); n_groups] }
    }

    /// Wrap existing groups
    pub fn from_groups(groups: Vec<ParamGroup>) -> Self {
        Self { groups }
    }

    /// `n_groups` groups with per-group learning rates and decoupled weight decay
    pub fn make(
        n_groups: usize,
        momentum: MomentumTerm,
        lrs: impl Into<GroupValues>,
        wds: impl Into<GroupValues>,
    ) -> Result<Self> {
        let mut groups = Self::new(n_groups, momentum);
        groups.set_lrs(lrs)?;
        groups.apply_decoupled_weight_decay(wds)?;
        Ok(groups)
    }

    /// The groups, in optimizer order
    pub fn groups(&self) -> &[ParamGroup] {
        &self.groups
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Learning rate of each group
    pub fn lrs(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.lr).collect()
    }

    /// Momentum (or `beta1`) of each group
    pub fn momentums(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.momentum.momentum()).collect()
    }

    /// Decoupled weight decay of each group
    pub fn wds(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.wd).collect()
    }

    /// Loss-coupled weight decay of each group
    pub fn loss_wds(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.loss_wd).collect()
    }

    /// Second momentum coefficients (`beta2` or `alpha`)
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedParameter`] if any group uses classic momentum.
    pub fn betas(&self) -> Result<Vec<f64>> {
        self.groups
            .iter()
            .map(|g| g.momentum.beta().ok_or_else(no_betas))
            .collect()
    }

    /// Set the learning rates from a scalar or one value per group
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`] if a list has the wrong length.
    pub fn set_lrs(&mut self, lrs: impl Into<GroupValues>) -> Result<()> {
        let values = self.expand("lr", lrs.into())?;
        for (group, value) in self.groups.iter_mut().zip(values) {
            group.lr = value;
        }
        Ok(())
    }

    /// Set momentum, or `beta1` for Adam-style groups
    pub fn set_momentums(&mut self, momentums: impl Into<GroupValues>) -> Result<()> {
        let values = self.expand("momentum", momentums.into())?;
        for (group, value) in self.groups.iter_mut().zip(values) {
            group.momentum.set_momentum(value);
        }
        Ok(())
    }

    /// Set `beta2` for Adam-style groups or `alpha` for RMSProp-style groups
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedParameter`] if any group uses classic momentum; no
    /// group is modified in that case.
    pub fn set_betas(&mut self, betas: impl Into<GroupValues>) -> Result<()> {
        let values = self.expand("betas", betas.into())?;
        if self.groups.iter().any(|g| g.momentum.beta().is_none()) {
            return Err(no_betas());
        }
        for (group, value) in self.groups.iter_mut().zip(values) {
            group.momentum.set_beta(value);
        }
        Ok(())
    }

    /// Weight decay acting directly on the weights (AdamW style)
    ///
    /// Clears any loss-coupled decay.
    pub fn apply_decoupled_weight_decay(&mut self, wds: impl Into<GroupValues>) -> Result<()> {
        let values = self.expand("wd", wds.into())?;
        for (group, value) in self.groups.iter_mut().zip(values) {
            group.loss_wd = 0.0;
            group.wd = value;
        }
        Ok(())
    }

    /// Weight decay folded into the loss
    ///
    /// This interacts badly with adaptive methods such as Adam. Clears any
    /// decoupled decay.
    pub fn apply_loss_coupled_weight_decay(&mut self, wds: impl Into<GroupValues>) -> Result<()> {
        let values = self.expand("wd", wds.into())?;
        for (group, value) in self.groups.iter_mut().zip(values) {
            group.wd = 0.0;
            group.loss_wd = value;
        }
        Ok(())
    }

    /// Apply decoupled decay to a group's weights: `w ← w · (1 − lr · wd)`
    pub fn decay_weights(&self, group: usize, mut weights: ArrayViewMut1<'_, f64>) -> Result<()> {
        let g = self.group(group)?;
        let decay = g.lr * g.wd;
        if decay == 0.0 {
            return Ok(());
        }
        let factor = 1.0 - decay;
        weights.mapv_inplace(|w| w * factor);
        Ok(())
    }

    /// Add the loss-coupled decay term to a group's gradients: `g ← g + loss_wd · w`
    pub fn couple_decay_into_grads(
        &self,
        group: usize,
        weights: ArrayView1<'_, f64>,
        mut grads: ArrayViewMut1<'_, f64>,
    ) -> Result<()> {
        let g = self.group(group)?;
        if weights.len() != grads.len() {
            return Err(Error::SizeMismatch {
                param: "grads".to_string(),
                got: grads.len(),
                expected: weights.len(),
            });
        }
        if g.loss_wd != 0.0 {
            grads.scaled_add(g.loss_wd, &weights);
        }
        Ok(())
    }

    fn group(&self, index: usize) -> Result<&ParamGroup> {
        self.groups
            .get(index)
            .ok_or(Error::UnknownGroup { index, groups: self.groups.len() })
    }

    fn expand(&self, param: &str, values: GroupValues) -> Result<Vec<f64>> {
        values.expand(param, self.groups.len())
    }
}

fn no_betas() -> Error {
    Error::UnsupportedParameter { name: "betas".to_string() }
}

impl HyperparamSink for ParamGroups {
    fn num_groups(&self) -> usize {
        self.len()
    }

    fn get(&self, param: Hyperparam) -> Result<Vec<f64>> {
        Ok(match param {
            Hyperparam::Lr => self.lrs(),
            Hyperparam::Momentum => self.momentums(),
            Hyperparam::Wd => self.wds(),
        })
    }

    fn set(&mut self, param: Hyperparam, values: GroupValues) -> Result<()> {
        match param {
            Hyperparam::Lr => self.set_lrs(values),
            Hyperparam::Momentum => self.set_momentums(values),
            Hyperparam::Wd => self.apply_decoupled_weight_decay(values),
        }
    }
}
