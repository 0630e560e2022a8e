//! Arrival tape generation.
//!
//! # Draw order
//!
//! For every arrival the RNG is consumed in exactly this order:
//!
//! ```text
//! gap ~ Exp(mean_gap)        → cumulative time += gap
//! (rate override check)
//! client ~ U{0 .. client_count}
//! commission ~ Exp(mean_commission)
//! service ~ Exp(mean_service)
//! ```
//!
//! Generation stops once the cumulative time reaches the horizon.  The
//! record that crosses it is drawn (keeping the stream aligned with the
//! loop condition) but not kept.
//!
//! # Rate override
//!
//! Once the cumulative time exceeds `rate_override.after`, every later gap
//! uses `rate_override.mean_inter_arrival_secs`.  The switch is local to
//! the tape being generated.

use lm_core::{ClientId, DispatchConfig, RateOverride, SimRng, SimTime};

use crate::{DemandError, DemandResult};

/// One scheduled order arrival.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArrivalRecord {
    pub at: SimTime,
    pub client: ClientId,
    pub commission_secs: u64,
    pub service_secs: u64,
}

impl ArrivalRecord {
    pub fn new(at: SimTime, client: ClientId, commission_secs: u64, service_secs: u64) -> Self {
        Self { at, client, commission_secs, service_secs }
    }
}

/// Parameters for [`ArrivalTape::generate`].
#[derive(Clone, Debug)]
pub struct TapeParams {
    pub horizon: SimTime,
    pub client_count: usize,
    pub mean_inter_arrival_secs: f64,
    pub rate_override: Option<RateOverride>,
    pub mean_commission_secs: f64,
    pub mean_service_secs: f64,
}

impl TapeParams {
    pub fn from_config(config: &DispatchConfig, client_count: usize) -> Self {
        Self {
            horizon:                 config.horizon,
            client_count,
            mean_inter_arrival_secs: config.mean_inter_arrival_secs,
            rate_override:           config.rate_override,
            mean_commission_secs:    config.mean_commission_secs,
            mean_service_secs:       config.mean_service_secs,
        }
    }
}

/// Time-ordered list of arrivals for one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrivalTape {
    records: Vec<ArrivalRecord>,
}

impl ArrivalTape {
    /// Draw a tape from `rng`.
    pub fn generate(params: &TapeParams, rng: &mut SimRng) -> DemandResult<Self> {
        if params.client_count == 0 {
            return Err(DemandError::Params("cannot draw clients from an empty instance".into()));
        }
        if !(params.mean_inter_arrival_secs > 0.0) {
            return Err(DemandError::Params(format!(
                "mean inter-arrival time must be positive, got {}",
                params.mean_inter_arrival_secs
            )));
        }

        let mut records = Vec::new();
        let mut now = SimTime::ZERO;
        let mut mean_gap = params.mean_inter_arrival_secs;

        while now < params.horizon {
            now += rng.exponential_secs(mean_gap);
            if let Some(o) = &params.rate_override {
                if now > o.after {
                    mean_gap = o.mean_inter_arrival_secs;
                }
            }
            let client = ClientId(rng.index(params.client_count) as u32);
            let commission_secs = rng.exponential_secs(params.mean_commission_secs);
            let service_secs = rng.exponential_secs(params.mean_service_secs);

            if now < params.horizon {
                records.push(ArrivalRecord { at: now, client, commission_secs, service_secs });
            }
        }
        Ok(Self { records })
    }

    /// Wrap explicit records.  They must be sorted by arrival time.
    pub fn from_records(records: Vec<ArrivalRecord>) -> DemandResult<Self> {
        for (i, pair) in records.windows(2).enumerate() {
            if pair[1].at < pair[0].at {
                return Err(DemandError::Unsorted {
                    index: i + 1,
                    at:    pair[1].at.0,
                    prev:  pair[0].at.0,
                });
            }
        }
        Ok(Self { records })
    }

    /// Drop arrivals after `horizon`.  Returns how many were removed.
    pub fn truncate_after(&mut self, horizon: SimTime) -> usize {
        let keep = self.records.partition_point(|r| r.at <= horizon);
        let removed = self.records.len() - keep;
        self.records.truncate(keep);
        removed
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&ArrivalRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[ArrivalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Largest client id referenced, for validation against an instance.
    pub fn max_client(&self) -> Option<ClientId> {
        self.records.iter().map(|r| r.client).max()
    }
}
