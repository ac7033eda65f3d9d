//! Error types for shapes, schedules, averages and configuration
//!
//! Every variant carries the offending value so a misconfigured training
//! loop can be diagnosed from the message alone. Nothing in the crate catches
//! or retries these: they are contract violations that abort the call.

use thiserror::Error;

/// Result type alias for kerosene operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller misconfiguration detected while building something
    Construction,
    /// A value outside the domain an operation accepts
    Domain,
    /// An operation called in the wrong lifecycle state
    State,
    /// Per-group values that do not line up with the parameter groups
    SizeMismatch,
    /// Configuration files and I/O
    Config,
}

/// Errors raised by kerosene
#[derive(Debug, Error)]
pub enum Error {
    #[error("x must be in [0, 1], was {x}")]
    Domain { x: f64 },

    #[error("{name} {reason}, was {value}")]
    InvalidArgument { name: &'static str, value: f64, reason: &'static str },

    #[error("window must be a whole number of at least 1, was {window}")]
    InvalidWindow { window: f64 },

    #[error("weight must not be negative, was {weight}")]
    InvalidWeight { weight: f64 },

    #[error("already iterated past {nb} (iter={iter})")]
    OutOfRange { iter: usize, nb: usize },

    #[error("schedule over {nb} steps was stepped before init_training")]
    NotStarted { nb: usize },

    #[error("unsupported param: {name}")]
    UnsupportedParameter { name: String },

    #[error("{param} values and parameter groups should be the same size, was {got} and {expected}")]
    SizeMismatch { param: String, got: usize, expected: usize },

    #[error("parameter group {index} does not exist, there are {groups} groups")]
    UnknownGroup { index: usize, groups: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Which part of the taxonomy this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. }
            | Self::InvalidWindow { .. }
            | Self::UnsupportedParameter { .. } => ErrorKind::Construction,
            Self::Domain { .. } | Self::InvalidWeight { .. } => ErrorKind::Domain,
            Self::OutOfRange { .. } | Self::NotStarted { .. } => ErrorKind::State,
            Self::SizeMismatch { .. } | Self::UnknownGroup { .. } => ErrorKind::SizeMismatch,
            Self::ConfigError(_) | Self::Io(_) => ErrorKind::Config,
        }
    }

    /// Stable error code for structured output
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "E001",
            Self::InvalidWindow { .. } => "E002",
            Self::UnsupportedParameter { .. } => "E003",
            Self::Domain { .. } => "E010",
            Self::InvalidWeight { .. } => "E011",
            Self::OutOfRange { .. } => "E020",
            Self::NotStarted { .. } => "E021",
            Self::SizeMismatch { .. } => "E030",
            Self::UnknownGroup { .. } => "E031",
            Self::ConfigError(_) => "E040",
            Self::Io(_) => "E050",
        }
    }
}
