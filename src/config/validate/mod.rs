//! Plan validation
//!
//! Catches bad values before any shape or schedule is built.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_config;
