//! The epoch loop

use super::batch::Batch;
use super::report::{EpochReport, EpochReporter};
use super::runner::{BatchExecutor, Manager, TrackedRunner};
use crate::error::{Error, Result};
use crate::hyperparams::{GroupValues, Hyperparam};
use crate::sched::{CurveOptions, Schedule};
use log::{debug, info, trace};

/// Momentum triangle used by [`fit_and_finish`]
pub const FINISH_MOMENTUMS: (f64, f64) = (0.95, 0.85);

/// Train for `n_epochs`, evaluating on `val` after each epoch
///
/// Starts the manager's schedule, writes the table header before the first
/// row and one row per epoch, and returns the last validation report.
///
/// # Errors
///
/// Fails if `n_epochs` is zero, and propagates executor, schedule and
/// reporter errors.
pub fn fit<E, R>(
    manager: &mut Manager<E>,
    train: &[Batch],
    val: &[Batch],
    n_epochs: usize,
    reporter: &mut R,
) -> Result<EpochReport>
where
    E: BatchExecutor,
    R: EpochReporter + ?Sized,
{
    if n_epochs == 0 {
        return Err(no_epochs());
    }
    manager.init_training()?;
    info!("fitting {n_epochs} epoch(s), {} train / {} val batches", train.len(), val.len());

    let mut last = None;
    for epoch in 0..n_epochs {
        let train_report = run_epoch(&mut manager.train_runner(), train)?;
        let val_report = run_epoch(&mut manager.eval_runner(), val)?;

        if epoch == 0 {
            reporter.header(&manager.metric_names())?;
        }
        reporter.epoch(epoch, &train_report, &val_report)?;
        last = Some(val_report);
    }
    last.ok_or_else(no_epochs)
}

fn no_epochs() -> Error {
    Error::InvalidArgument { name: "n_epochs", value: 0.0, reason: "must be positive" }
}

/// Run every batch through `runner` and return its averages
pub fn run_epoch<E: BatchExecutor>(
    runner: &mut TrackedRunner<'_, E>,
    batches: &[Batch],
) -> Result<EpochReport> {
    let total = batches.len();
    let mut running = f64::NAN;
    for (i, batch) in batches.iter().enumerate() {
        running = runner.run(batch)?;
        trace!("batch {}/{total}: running loss {running:.6}", i + 1);
    }
    if runner.with_step() {
        debug!("epoch done, running loss {running:.6}");
    }
    Ok(runner.report())
}

/// Set `lrs`, install a cyclical schedule over every training batch and fit
///
/// The schedule is [`Schedule::clr`] with the default lr factor and a
/// momentum triangle of [`FINISH_MOMENTUMS`].
pub fn fit_and_finish<E, R>(
    manager: &mut Manager<E>,
    lrs: impl Into<GroupValues>,
    train: &[Batch],
    val: &[Batch],
    n_epochs: usize,
    reporter: &mut R,
) -> Result<EpochReport>
where
    E: BatchExecutor,
    R: EpochReporter + ?Sized,
{
    let sink = manager.executor_mut().hyperparams();
    sink.set(Hyperparam::Lr, lrs.into())?;
    let nb = n_epochs * train.len();
    let options = CurveOptions::default().with_momentums(FINISH_MOMENTUMS);
    let schedule = Schedule::clr(&*sink, nb, options)?;
    manager.set_schedule(schedule);
    fit(manager, train, val, n_epochs, reporter)
}
