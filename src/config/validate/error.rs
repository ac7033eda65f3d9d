//! Validation error types

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid group count: 0 (must be > 0)")]
    ZeroGroups,

    #[error("Invalid learning rate: {0} (must be finite and >= 0.0)")]
    InvalidLearningRate(f64),

    #[error("Invalid {param} list: {got} values for {groups} groups")]
    GroupCount { param: &'static str, got: usize, groups: usize },

    #[error("Invalid momentum: {0} (must be in [0.0, 1.0])")]
    InvalidMomentum(f64),

    #[error("Invalid weight decay: {0} (must be finite and >= 0.0)")]
    InvalidWeightDecay(f64),

    #[error("Invalid lr factor: {0} (must be > 0.0)")]
    InvalidLrFactor(f64),

    #[error("Invalid {name}: {value} (must be in (0.0, 1.0))")]
    InvalidShare { name: &'static str, value: f64 },

    #[error("Invalid anneal factor: {0} (must be >= 1.0)")]
    InvalidAnnealFactor(f64),

    #[error("Invalid {name} curve value: {value} (must be finite and >= 0.0)")]
    InvalidCurveValue { name: &'static str, value: f64 },
}
