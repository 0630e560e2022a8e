//! Run configuration.
//!
//! `DispatchConfig` is assembled by the command surface (or a test) and
//! passed by reference to every epoch.  It is never mutated during a run;
//! in particular the four-hour rate override only changes the rate used
//! while generating one tape.

use crate::{CoreError, CoreResult, SimTime};

/// Forced change of the inter-arrival mean once the tape passes `after`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateOverride {
    /// Cumulative arrival time after which the override takes effect.
    pub after: SimTime,
    /// Mean inter-arrival gap (seconds) used from then on.
    pub mean_inter_arrival_secs: f64,
}

impl Default for RateOverride {
    /// After 4 simulated hours the mean gap drops to 15 s.
    fn default() -> Self {
        Self {
            after:                   SimTime::from_hours(4),
            mean_inter_arrival_secs: 15.0,
        }
    }
}

/// Top-level parameters of an experiment.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchConfig {
    /// Arrivals at or after this instant are not generated.
    pub horizon: SimTime,

    /// Master seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Cost charged for every rejected or undelivered order, in seconds.
    pub penalty_secs: u64,

    /// Mean gap between consecutive order arrivals, in seconds.
    pub mean_inter_arrival_secs: f64,

    /// `None` disables the mid-tape rate change.
    pub rate_override: Option<RateOverride>,

    /// Mean picker commission time per order.
    pub mean_commission_secs: f64,

    /// Mean time a courier spends at the client's door.
    pub mean_service_secs: f64,

    /// Number of independent runs per experiment.
    pub epochs: u32,

    /// Training reports average over this many epochs.
    pub report_interval: u32,

    /// Rayon worker count for parallel epochs.  `None` uses all cores.
    pub num_threads: Option<usize>,

    /// Rejected orders are drawn in the orders file as lasting this long.
    pub rejected_display_secs: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            horizon:                 SimTime::from_hours(8),
            seed:                    42,
            penalty_secs:            1_800,
            mean_inter_arrival_secs: 25.0,
            rate_override:           Some(RateOverride::default()),
            mean_commission_secs:    300.0,
            mean_service_secs:       60.0,
            epochs:                  1_000,
            report_interval:         100,
            num_threads:             None,
            rejected_display_secs:   180,
        }
    }
}

impl DispatchConfig {
    /// Reject parameter combinations that cannot produce a meaningful run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.horizon == SimTime::ZERO {
            return Err(CoreError::Config("horizon must be positive".into()));
        }
        if self.epochs == 0 {
            return Err(CoreError::Config("epochs must be at least 1".into()));
        }
        if !(self.mean_inter_arrival_secs > 0.0) {
            return Err(CoreError::Config(format!(
                "mean inter-arrival time must be positive, got {}",
                self.mean_inter_arrival_secs
            )));
        }
        if let Some(o) = &self.rate_override {
            if !(o.mean_inter_arrival_secs > 0.0) {
                return Err(CoreError::Config(format!(
                    "override inter-arrival time must be positive, got {}",
                    o.mean_inter_arrival_secs
                )));
            }
        }
        if self.mean_commission_secs < 0.0 || self.mean_service_secs < 0.0 {
            return Err(CoreError::Config("mean durations must not be negative".into()));
        }
        Ok(())
    }
}
