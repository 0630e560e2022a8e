//! Epoch runners, one entry point per mode.
//!
//! Every epoch gets its own [`SimRng`] stream (`SimRng::for_stream(seed,
//! epoch)`), its own tape and a freshly provisioned registry, so epochs
//! share no mutable state.  Evaluation epochs therefore run in any order
//! (in parallel with the `parallel` feature); results are always returned
//! in epoch order.
//!
//! | Entry point               | Policy                | Epochs     |
//! |---------------------------|-----------------------|------------|
//! | [`run_nearest_warehouse`] | `NearestWarehouse`    | independent |
//! | [`test_policy`]           | trained, greedy       | independent |
//! | [`train_policy`]          | trained, sampling     | sequential |
//! | [`replay`]                | any                   | one, recorded tape |
//!
//! The observer passed to an evaluation runner sees the final epoch only.

use log::info;

use lm_core::{DispatchConfig, SimRng};
use lm_demand::{ArrivalTape, TapeParams};
use lm_fleet::Registry;
use lm_network::Instance;
use lm_policy::{DecisionPolicy, DecisionRecord, NearestWarehouse, TrainablePolicy};

use crate::{
    NoopObserver, RunSummary, SimBuilder, SimError, SimObserver, SimResult, discounted_costs,
};

/// Discount factors for [`discounted_costs`] during training.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Discount {
    pub temporal: f64,
    pub spatial: f64,
}

/// Everything one epoch leaves behind.
pub struct EpochOutcome {
    pub summary: RunSummary,
    pub registry: Registry,
    pub records: Vec<DecisionRecord>,
}

/// Averages over one report interval of training.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingPoint {
    /// Episodes completed when the window closed.
    pub epoch: u32,
    pub mean_objective: f64,
    pub mean_rejection_rate: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainingReport {
    pub points: Vec<TrainingPoint>,
    pub epochs: u32,
    pub last_loss: f64,
}

// ── Single epoch ──────────────────────────────────────────────────────────────

/// Draw a tape for `epoch` and run it to completion.
pub fn run_epoch<P: DecisionPolicy, O: SimObserver>(
    instance: &Instance,
    config:   &DispatchConfig,
    policy:   P,
    epoch:    u32,
    record:   bool,
    observer: &mut O,
) -> SimResult<EpochOutcome> {
    let mut rng = SimRng::for_stream(config.seed, u64::from(epoch));
    let params = TapeParams::from_config(config, instance.client_count());
    let tape = ArrivalTape::generate(&params, &mut rng)?;

    let mut sim = SimBuilder::from_instance(config.clone(), instance, policy, tape, rng)
        .epoch(epoch)
        .record_decisions(record)
        .build()?;
    let summary = sim.run(observer)?;
    let records = sim.take_records();
    Ok(EpochOutcome { summary, registry: sim.registry, records })
}

/// Run one epoch over a recorded tape instead of drawing one.
///
/// The policy samples from stream 0 of `config.seed`.
pub fn replay<P: DecisionPolicy, O: SimObserver>(
    instance: &Instance,
    config:   &DispatchConfig,
    policy:   P,
    tape:     ArrivalTape,
    observer: &mut O,
) -> SimResult<RunSummary> {
    info!("replaying {} arrivals with {}", tape.len(), policy.name());
    let rng = SimRng::for_stream(config.seed, 0);
    let mut sim = SimBuilder::from_instance(config.clone(), instance, policy, tape, rng).build()?;
    sim.run(observer)
}

// ── Evaluation ────────────────────────────────────────────────────────────────

/// Run `config.epochs` independent epochs of `policy`.
pub fn evaluate<P: DecisionPolicy, O: SimObserver>(
    instance: &Instance,
    config:   &DispatchConfig,
    policy:   &P,
    observer: &mut O,
) -> SimResult<Vec<RunSummary>> {
    config.validate()?;
    let last = config.epochs - 1;
    info!("evaluating {} for {} epochs", policy.name(), config.epochs);

    let mut summaries = run_many(instance, config, policy, 0..last)?;
    summaries.push(run_epoch(instance, config, policy, last, false, observer)?.summary);

    report_progress(config, &summaries);
    Ok(summaries)
}

/// Evaluate the nearest-warehouse heuristic.
pub fn run_nearest_warehouse<O: SimObserver>(
    instance: &Instance,
    config:   &DispatchConfig,
    observer: &mut O,
) -> SimResult<Vec<RunSummary>> {
    evaluate(instance, config, &NearestWarehouse, observer)
}

/// Evaluate a trained policy with greedy action selection.
pub fn test_policy<P: TrainablePolicy, O: SimObserver>(
    instance: &Instance,
    config:   &DispatchConfig,
    policy:   &mut P,
    observer: &mut O,
) -> SimResult<Vec<RunSummary>> {
    policy.set_training(false);
    evaluate(instance, config, &*policy, observer)
}

#[cfg(not(feature = "parallel"))]
fn run_many<P: DecisionPolicy>(
    instance: &Instance,
    config:   &DispatchConfig,
    policy:   &P,
    epochs:   std::ops::Range<u32>,
) -> SimResult<Vec<RunSummary>> {
    epochs
        .map(|e| run_epoch(instance, config, policy, e, false, &mut NoopObserver).map(|o| o.summary))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_many<P: DecisionPolicy>(
    instance: &Instance,
    config:   &DispatchConfig,
    policy:   &P,
    epochs:   std::ops::Range<u32>,
) -> SimResult<Vec<RunSummary>> {
    use rayon::prelude::*;

    let work = || {
        epochs
            .clone()
            .into_par_iter()
            .map(|e| run_epoch(instance, config, policy, e, false, &mut NoopObserver).map(|o| o.summary))
            .collect::<SimResult<Vec<_>>>()
    };
    match config.num_threads {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map_err(|e| SimError::Config(format!("thread pool: {e}")))?
            .install(work),
        None => work(),
    }
}

fn report_progress(config: &DispatchConfig, summaries: &[RunSummary]) {
    let interval = config.report_interval.max(1) as usize;
    for chunk in summaries.chunks(interval) {
        let n = chunk.len() as f64;
        let cost = chunk.iter().map(|s| s.objective as f64).sum::<f64>() / n;
        let rejected = chunk.iter().map(|s| s.rejection_rate).sum::<f64>() / n;
        info!(
            "[epochs {}..={}] average costs {cost:.1}, rejected {rejected:.4}",
            chunk[0].epoch,
            chunk[chunk.len() - 1].epoch
        );
    }
    if !summaries.is_empty() {
        let mean = summaries.iter().map(|s| s.objective as f64).sum::<f64>() / summaries.len() as f64;
        info!("iterations: {} average costs: {mean:.1}", summaries.len());
    }
}

// ── Training ──────────────────────────────────────────────────────────────────

/// Train `policy` for `config.epochs` sequential episodes.
///
/// Each episode samples actions, then hands every decision and its
/// discounted cost to [`TrainablePolicy::update`].  Averages are reported
/// after every `config.report_interval` completed episodes and reset
/// afterwards; a shorter final window is reported on its own.
pub fn train_policy<P: TrainablePolicy>(
    instance: &Instance,
    config:   &DispatchConfig,
    policy:   &mut P,
    discount: Discount,
) -> SimResult<TrainingReport> {
    config.validate()?;
    info!(
        "training {} for {} epochs (lambda temporal {}, lambda spatial {})",
        policy.name(),
        config.epochs,
        discount.temporal,
        discount.spatial
    );
    policy.set_training(true);

    let interval = config.report_interval.max(1);
    let mut report = TrainingReport { epochs: config.epochs, ..TrainingReport::default() };
    let (mut cost_sum, mut reject_sum, mut count) = (0.0, 0.0, 0u32);

    for epoch in 0..config.epochs {
        let outcome = run_epoch(instance, config, &*policy, epoch, true, &mut NoopObserver)?;
        let costs = discounted_costs(
            &outcome.registry,
            config.penalty_secs,
            discount.temporal,
            discount.spatial,
        )?;
        let aligned = outcome
            .records
            .iter()
            .map(|r| {
                costs.get(r.order.index()).copied().ok_or(SimError::DimensionMismatch {
                    what:     "discounted costs",
                    expected: r.order.index() + 1,
                    got:      costs.len(),
                })
            })
            .collect::<SimResult<Vec<f64>>>()?;
        report.last_loss = policy.update(&outcome.records, &aligned)?;

        cost_sum += outcome.summary.objective as f64;
        reject_sum += outcome.summary.rejection_rate;
        count += 1;

        let done = epoch + 1;
        if done % interval == 0 {
            report.points.push(training_point(done, cost_sum, reject_sum, count));
            (cost_sum, reject_sum, count) = (0.0, 0.0, 0);
        }
    }
    if count > 0 {
        report.points.push(training_point(config.epochs, cost_sum, reject_sum, count));
    }
    info!("training finished after {} epochs", config.epochs);
    Ok(report)
}

fn training_point(done: u32, cost_sum: f64, reject_sum: f64, count: u32) -> TrainingPoint {
    let point = TrainingPoint {
        epoch:               done,
        mean_objective:      cost_sum / f64::from(count),
        mean_rejection_rate: reject_sum / f64::from(count),
    };
    info!(
        "[Iteration: {done}] Average costs: {:.1} Rejected requests: {:.4}",
        point.mean_objective, point.mean_rejection_rate
    );
    point
}
