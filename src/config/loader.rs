//! Reading plans from disk

use super::schema::ScheduleConfig;
use super::validate::validate_config;
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Read, parse and validate a YAML plan
///
/// # Example
///
/// ```no_run
/// use kerosene::config::load_config;
///
/// let config = load_config("plan.yaml")?;
/// let (mut groups, mut schedule) = config.build()?;
/// schedule.init_training(&mut groups)?;
/// # Ok::<(), kerosene::Error>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ScheduleConfig> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    debug!("loaded plan from {}", path.display());
    parse_config(&yaml)
}

/// Parse and validate a YAML plan
pub fn parse_config(yaml: &str) -> Result<ScheduleConfig> {
    let config: ScheduleConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?;
    validate_config(&config).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;
    Ok(config)
}
