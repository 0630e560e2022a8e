//! dispatch — command surface for the last-mile dispatch simulator.
//!
//! Loads an instance, builds a run configuration from the positional
//! arguments and runs one of three modes:
//!
//! | Mode               | Runs                                   | Writes                              |
//! |--------------------|----------------------------------------|-------------------------------------|
//! | `nearestWarehouse` | 1000 epochs of the heuristic           | stats file, last epoch's logs       |
//! | `trainPolicy`      | 8000 sequential training episodes      | averaged-costs file, policy weights |
//! | `testPolicy`       | 1000 greedy epochs of trained weights  | stats file, last epoch's logs       |
//!
//! With `--tape <PATH>` the evaluation modes replay that one tape instead
//! of drawing a tape per epoch.
//!
//! Output failures are logged and do not abort the run.

mod cli;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{error, info, warn};

use lm_core::{DispatchConfig, SimRng, SimTime};
use lm_demand::{ArrivalTape, load_tape_csv};
use lm_fleet::Registry;
use lm_network::{Instance, load_instance_json};
use lm_output::{
    CostsRow, OutputObserver, StatsRow, TextWriter, costs_file_name, stats_file_name, write_costs,
    write_stats,
};
use lm_policy::{NearestWarehouse, SoftmaxPolicy, TrainablePolicy};
use lm_policy::softmax::DEFAULT_LEARNING_RATE;
use lm_sim::{
    Discount, RunState, RunSummary, SimEvent, SimObserver, replay, run_nearest_warehouse,
    test_policy, train_policy,
};

use cli::{CliArgs, MODES, Mode};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64  = 42;
const OUTPUT_DIR:      &str = "output";
const TRAINING_DIR:    &str = "trainingData";
const TEST_DIR:        &str = "testData";
const ANIMATION_DIR:   &str = "animationData";
const POLICY_FILE:     &str = "softmax_policy.json";
const NEAREST_LABEL:   &str = "NearestWarehousePolicy";

// ── Animation output ──────────────────────────────────────────────────────────

/// Route and order logs of the final epoch, or nothing when the output
/// directory could not be opened.
struct AnimationOutput(Option<OutputObserver<TextWriter>>);

impl AnimationOutput {
    fn open(dir: &Path, config: &DispatchConfig) -> Self {
        match ensure_dir(dir).and_then(|()| Ok(TextWriter::in_dir(dir)?)) {
            Ok(writer) => Self(Some(OutputObserver::new(writer, config))),
            Err(e) => {
                warn!("animation output disabled: {e:#}");
                Self(None)
            }
        }
    }

    fn report(&mut self) {
        if let Some(e) = self.0.as_mut().and_then(|o| o.take_error()) {
            eprintln!("Output error: {e}");
        }
    }
}

impl SimObserver for AnimationOutput {
    fn on_event(&mut self, event: &SimEvent, registry: &Registry, state: &RunState) {
        if let Some(o) = self.0.as_mut() {
            o.on_event(event, registry, state);
        }
    }

    fn on_run_end(&mut self, registry: &Registry, summary: &RunSummary) {
        if let Some(o) = self.0.as_mut() {
            o.on_run_end(registry, summary);
        }
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let cli = CliArgs::from_matches(&cli::cli().get_matches())?;

    // 1. Resolve the mode before doing any work.
    let Some(mode) = Mode::parse(&cli.mode) else {
        error!("unknown mode {:?}, expected one of {MODES}", cli.mode);
        eprintln!("Method: {} not found.", cli.mode);
        return Ok(());
    };

    // 2. Load the instance.
    let instance = load_instance_json(&cli.instance)
        .with_context(|| format!("loading instance {}", cli.instance.display()))?;
    println!(
        "Instance: {} warehouses, {} clients",
        instance.warehouse_count(),
        instance.client_count()
    );

    // 3. Configure the experiment.
    let config = DispatchConfig {
        horizon:                 SimTime::from_hours(cli.hours),
        seed:                    SEED,
        penalty_secs:            cli.penalty_secs,
        mean_inter_arrival_secs: cli.mean_inter_arrival_secs,
        epochs:                  mode.default_epochs(),
        ..DispatchConfig::default()
    };
    config.validate()?;

    // 4. Run.
    let out = PathBuf::from(OUTPUT_DIR);
    let t0 = Instant::now();
    match mode {
        Mode::NearestWarehouse => {
            let mut obs = AnimationOutput::open(&out.join(ANIMATION_DIR), &config);
            let summaries = match &cli.tape {
                Some(tape) => vec![replay(&instance, &config, NearestWarehouse, load_tape(tape)?, &mut obs)?],
                None => run_nearest_warehouse(&instance, &config, &mut obs)?,
            };
            obs.report();
            print_summary(&summaries);
            let name = stats_file_name(config.penalty_secs, config.mean_inter_arrival_secs, NEAREST_LABEL);
            save_stats(&out.join(TEST_DIR), &name, &summaries);
        }
        Mode::TrainPolicy => train(&instance, &config, &cli, &out)?,
        Mode::TestPolicy => {
            let path = out.join(POLICY_FILE);
            let mut policy = SoftmaxPolicy::load_json(&path)
                .with_context(|| format!("loading policy weights {}", path.display()))?;
            let mut obs = AnimationOutput::open(&out.join(ANIMATION_DIR), &config);
            let summaries = match &cli.tape {
                Some(tape) => {
                    policy.set_training(false);
                    vec![replay(&instance, &config, &policy, load_tape(tape)?, &mut obs)?]
                }
                None => test_policy(&instance, &config, &mut policy, &mut obs)?,
            };
            obs.report();
            print_summary(&summaries);
            let label = format!("{:.6}_{:.6}", cli.lambda_t, cli.lambda_s);
            let name = stats_file_name(config.penalty_secs, config.mean_inter_arrival_secs, &label);
            save_stats(&out.join(TEST_DIR), &name, &summaries);
        }
    }
    println!("Finished in {:.2?}", t0.elapsed());
    Ok(())
}

// ── Modes ─────────────────────────────────────────────────────────────────────

fn train(instance: &Instance, config: &DispatchConfig, cli: &CliArgs, out: &Path) -> Result<()> {
    if cli.tape.is_some() {
        warn!("--tape is ignored while training; every episode draws its own tape");
    }
    let mut rng = SimRng::new(config.seed);
    let mut policy = SoftmaxPolicy::new(instance.warehouse_count(), DEFAULT_LEARNING_RATE, &mut rng);
    let discount = Discount { temporal: cli.lambda_t, spatial: cli.lambda_s };

    let report = train_policy(instance, config, &mut policy, discount)?;
    println!("Trained {} epochs, final loss {:.4}", report.epochs, report.last_loss);
    if let Some(p) = report.points.last() {
        println!(
            "Last interval: average costs {:.1}, rejected {:.4}",
            p.mean_objective, p.mean_rejection_rate
        );
    }

    let dir = out.join(TRAINING_DIR);
    let name = costs_file_name(config.penalty_secs, config.mean_inter_arrival_secs, cli.lambda_t, cli.lambda_s);
    let rows: Vec<CostsRow> = report.points.iter().map(CostsRow::from).collect();
    if let Err(e) = ensure_dir(&dir).and_then(|()| Ok(write_costs(&dir.join(&name), &rows)?)) {
        warn!("could not write {name}: {e:#}");
    }

    ensure_dir(out)?;
    let path = out.join(POLICY_FILE);
    policy
        .save_json(&path)
        .with_context(|| format!("saving policy weights {}", path.display()))?;
    info!("policy weights saved to {}", path.display());
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_tape(path: &Path) -> Result<ArrivalTape> {
    let tape = load_tape_csv(path).with_context(|| format!("loading arrival tape {}", path.display()))?;
    println!("Replaying {} arrivals from {}", tape.len(), path.display());
    Ok(tape)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}

fn save_stats(dir: &Path, name: &str, summaries: &[RunSummary]) {
    let rows: Vec<StatsRow> = summaries.iter().map(StatsRow::from).collect();
    if let Err(e) = ensure_dir(dir).and_then(|()| Ok(write_stats(&dir.join(name), &rows)?)) {
        warn!("could not write {name}: {e:#}");
    }
}

fn print_summary(summaries: &[RunSummary]) {
    if summaries.is_empty() {
        return;
    }
    let n = summaries.len() as f64;
    let cost = summaries.iter().map(|s| s.objective as f64).sum::<f64>() / n;
    let rejected = summaries.iter().map(|s| s.rejection_rate).sum::<f64>() / n;
    let max_wait = summaries.iter().map(|s| s.max_waiting_secs).max().unwrap_or(0);
    println!("Epochs:           {}", summaries.len());
    println!("Average costs:    {cost:.1}");
    println!("Rejection rate:   {rejected:.4}");
    println!("Max waiting time: {max_wait} s");
}
