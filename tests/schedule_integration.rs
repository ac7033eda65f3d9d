//! Integration tests: schedules driving parameter groups end to end

use approx::assert_abs_diff_eq;
use kerosene::hyperparams::{MomentumTerm, OptimizerKind, ParamGroups};
use kerosene::sched::{CurveOptions, OneCycleOptions, Schedule, ScheduleState, SlantedOptions};
use kerosene::shape;
use kerosene::{Error, Hyperparam, HyperparamSink};

fn adam_groups(lrs: [f64; 3]) -> ParamGroups {
    ParamGroups::make(3, OptimizerKind::Adam.momentum_term(0.9), lrs, 0.0).unwrap()
}

#[test]
fn test_one_cycle_full_run_on_adam() {
    let mut groups = adam_groups([1e-3, 1e-2, 1e-1]);
    let nb = 1000;
    let mut schedule = Schedule::one_cycle(&groups, nb, OneCycleOptions::default()).unwrap();
    schedule.init_training(&mut groups).unwrap();

    let mut peak = [0.0f64; 3];
    for _ in 0..nb {
        schedule.step(&mut groups).unwrap();
        for (p, lr) in peak.iter_mut().zip(groups.lrs()) {
            *p = p.max(lr);
        }
        // beta1 follows momentum, beta2 untouched
        assert_eq!(groups.betas().unwrap(), vec![0.999; 3]);
    }
    assert_eq!(schedule.state(), ScheduleState::Exhausted);

    for (i, base) in [1e-3, 1e-2, 1e-1].into_iter().enumerate() {
        assert_abs_diff_eq!(peak[i], base, epsilon = base * 1e-9);
        assert_abs_diff_eq!(groups.lrs()[i], base / 1000.0, epsilon = base * 1e-9);
    }
    assert_abs_diff_eq!(groups.momentums()[0], 0.95, epsilon = 1e-12);
}

#[test]
fn test_stlr_peaks_at_up_share() {
    let mut groups = adam_groups([1.0, 1.0, 1.0]);
    let options = SlantedOptions { up_share: 0.1, ..Default::default() };
    let mut schedule = Schedule::stlr(&groups, 100, options).unwrap();
    schedule.init_training(&mut groups).unwrap();

    let mut lrs = vec![groups.lrs()[0]];
    for _ in 0..100 {
        schedule.step(&mut groups).unwrap();
        lrs.push(groups.lrs()[0]);
    }
    let argmax = lrs
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |best, (i, &lr)| if lr > best.1 { (i, lr) } else { best })
        .0;
    assert_eq!(argmax, 10);
}

#[test]
fn test_schedule_through_trait_object() {
    let mut groups = adam_groups([1.0, 2.0, 3.0]);
    let sink: &mut dyn HyperparamSink = &mut groups;
    let curves = [(Hyperparam::Lr, shape::line(1.0, 0.0).unwrap())];
    let mut schedule = Schedule::new(&*sink, 2, curves).unwrap();
    schedule.init_training(&mut *sink).unwrap();
    schedule.step(&mut *sink).unwrap();
    assert_eq!(sink.get(Hyperparam::Lr).unwrap(), vec![0.5, 1.0, 1.5]);
    schedule.step(&mut *sink).unwrap();
    assert_eq!(sink.get(Hyperparam::Lr).unwrap(), vec![0.0, 0.0, 0.0]);
    assert!(matches!(schedule.step(&mut *sink), Err(Error::OutOfRange { iter: 2, nb: 2 })));
}

#[test]
fn test_shapes_are_reusable_across_schedules() {
    let curve = shape::triangle(0.9, 0.8).unwrap();
    let mut a = ParamGroups::new(1, MomentumTerm::Classic { momentum: 0.0 });
    let mut b = ParamGroups::new(2, MomentumTerm::Classic { momentum: 0.0 });
    let mut sa = Schedule::new(&a, 2, [(Hyperparam::Momentum, curve.clone())]).unwrap();
    let mut sb = Schedule::new(&b, 4, [(Hyperparam::Momentum, curve)]).unwrap();
    sa.init_training(&mut a).unwrap();
    sb.init_training(&mut b).unwrap();
    sa.step(&mut a).unwrap();
    sb.step(&mut b).unwrap();
    sb.step(&mut b).unwrap();
    assert_eq!(a.momentums(), vec![0.8]);
    assert_eq!(b.momentums(), vec![0.8, 0.8]);
}

#[test]
fn test_weight_decay_schedule_acts_on_weights() {
    let mut groups = ParamGroups::make(1, MomentumTerm::Classic { momentum: 0.0 }, 0.5, 0.0).unwrap();
    let options = CurveOptions::default().with_lr_factor(1.0).with_wds(0.2);
    let mut schedule = Schedule::burn_in(&groups, 1, options).unwrap();
    schedule.init_training(&mut groups).unwrap();

    let mut weights = ndarray::arr1(&[1.0, -2.0, 4.0]);
    groups.decay_weights(0, weights.view_mut()).unwrap();
    assert_eq!(weights, ndarray::arr1(&[0.9, -1.8, 3.6]));
}
