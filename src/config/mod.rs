//! Declarative schedule plans
//!
//! A plan is a YAML document naming the optimizer groups and the schedule to
//! run over them:
//!
//! ```yaml
//! steps: 100
//! optimizer:
//!   kind: adam
//!   groups: 2
//!   lr: [0.001, 0.01]
//!   momentum: 0.9
//! schedule:
//!   kind: one_cycle
//!   lr_factor: 10
//!   momentums: [0.95, 0.85]
//! ```

mod loader;
mod schema;
mod validate;


pub use loader::{load_config, parse_config};
pub use schema::{OptimizerConfig, ScheduleConfig, SchedulePlan, WeightDecayMode};
pub use validate::{validate_config, ValidationError};
