//! Property-based tests for plan validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use crate::hyperparams::{GroupValues, OptimizerKind};
use crate::sched::OneCycleOptions;
use proptest::prelude::*;

fn arb_valid_config() -> impl Strategy<Value = ScheduleConfig> {
    (
        1usize..8,      // groups
        1e-6f64..1.0,   // lr
        0.0f64..=1.0,   // momentum
        1.5f64..100.0,  // lr_factor
        0.01f64..0.99,  // anneal_share
        1.0f64..1000.0, // anneal_factor
    )
        .prop_map(|(groups, lr, momentum, lr_factor, anneal_share, anneal_factor)| {
            ScheduleConfig {
                steps: 100,
                optimizer: OptimizerConfig {
                    kind: OptimizerKind::Adam,
                    groups,
                    lr: GroupValues::Broadcast(lr),
                    momentum,
                    wd: None,
                    weight_decay: WeightDecayMode::Decoupled,
                },
                schedule: SchedulePlan::OneCycle(OneCycleOptions {
                    lr_factor,
                    anneal_share,
                    anneal_factor,
                    ..Default::default()
                }),
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_valid_config_builds(config in arb_valid_config()) {
        let (mut groups, mut schedule) = config.build().unwrap();
        schedule.init_training(&mut groups).unwrap();
        for _ in 0..config.steps {
            schedule.step(&mut groups).unwrap();
        }
        for lr in groups.lrs() {
            prop_assert!(lr.is_finite() && lr >= 0.0);
        }
    }

    #[test]
    fn prop_zero_groups_fails(config in arb_valid_config()) {
        let mut config = config;
        config.optimizer.groups = 0;
        prop_assert_eq!(validate_config(&config), Err(ValidationError::ZeroGroups));
    }

    #[test]
    fn prop_negative_lr_fails(config in arb_valid_config(), lr in -10.0f64..-1e-9) {
        let mut config = config;
        config.optimizer.lr = GroupValues::Broadcast(lr);
        prop_assert_eq!(validate_config(&config), Err(ValidationError::InvalidLearningRate(lr)));
    }

    #[test]
    fn prop_share_outside_unit_interval_fails(config in arb_valid_config(), share in 1.0f64..10.0) {
        let mut config = config;
        config.schedule = SchedulePlan::OneCycle(OneCycleOptions {
            anneal_share: share,
            ..Default::default()
        });
        let is_share_error = matches!(
            validate_config(&config),
            Err(ValidationError::InvalidShare { name: "anneal_share", .. })
        );
        prop_assert!(is_share_error);
    }
}
