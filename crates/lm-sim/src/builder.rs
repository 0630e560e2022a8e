//! Fluent builder for constructing a [`Sim`].

use log::debug;

use lm_core::{DispatchConfig, GeoPoint, SimRng};
use lm_demand::ArrivalTape;
use lm_fleet::Registry;
use lm_network::{Instance, TravelModel, TravelTable, WarehouseSite};
use lm_policy::DecisionPolicy;

use crate::{AssignmentEngine, RunState, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P, T>`].
///
/// # Required inputs
///
/// - [`DispatchConfig`] — horizon, penalty, …
/// - warehouse sites and client locations (or an [`Instance`])
/// - `T: TravelModel` — travel-time lookup
/// - `P: DecisionPolicy` — the routing strategy
/// - the [`ArrivalTape`] and the run's [`SimRng`]
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default |
/// |-------------------------|---------|
/// | `.epoch(n)`             | `0`     |
/// | `.record_decisions(b)`  | `false` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::from_instance(config, &instance, NearestWarehouse, tape, rng)
///     .epoch(3)
///     .build()?;
/// let summary = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<'a, P: DecisionPolicy, T: TravelModel> {
    config:  DispatchConfig,
    sites:   &'a [WarehouseSite],
    clients: &'a [GeoPoint],
    travel:  T,
    policy:  P,
    tape:    ArrivalTape,
    rng:     SimRng,
    epoch:   u32,
    record:  bool,
}

impl<'a, P: DecisionPolicy> SimBuilder<'a, P, &'a TravelTable> {
    /// Builder over a loaded instance and its travel table.
    pub fn from_instance(
        config:   DispatchConfig,
        instance: &'a Instance,
        policy:   P,
        tape:     ArrivalTape,
        rng:      SimRng,
    ) -> Self {
        SimBuilder::new(config, &instance.warehouses, &instance.clients, &instance.travel, policy, tape, rng)
    }
}

impl<'a, P: DecisionPolicy, T: TravelModel> SimBuilder<'a, P, T> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:  DispatchConfig,
        sites:   &'a [WarehouseSite],
        clients: &'a [GeoPoint],
        travel:  T,
        policy:  P,
        tape:    ArrivalTape,
        rng:     SimRng,
    ) -> Self {
        Self { config, sites, clients, travel, policy, tape, rng, epoch: 0, record: false }
    }

    /// Epoch number carried into the run summary.
    pub fn epoch(mut self, epoch: u32) -> Self {
        self.epoch = epoch;
        self
    }

    /// Store a `DecisionRecord` for every order the policy is consulted on.
    pub fn record_decisions(mut self, record: bool) -> Self {
        self.record = record;
        self
    }

    /// Validate inputs, provision the registry and return a ready-to-run
    /// [`Sim`].
    ///
    /// Tape records after the horizon are dropped.
    pub fn build(self) -> SimResult<Sim<'a, P, T>> {
        self.config.validate()?;

        if self.travel.warehouse_count() != self.sites.len() {
            return Err(SimError::DimensionMismatch {
                what:     "travel model warehouses",
                expected: self.sites.len(),
                got:      self.travel.warehouse_count(),
            });
        }
        if self.travel.client_count() != self.clients.len() {
            return Err(SimError::DimensionMismatch {
                what:     "travel model clients",
                expected: self.clients.len(),
                got:      self.travel.client_count(),
            });
        }
        if let Some(max) = self.tape.max_client() {
            if max.index() >= self.clients.len() {
                return Err(SimError::DimensionMismatch {
                    what:     "client id in tape",
                    expected: self.clients.len(),
                    got:      max.index(),
                });
            }
        }

        let mut tape = self.tape;
        let dropped = tape.truncate_after(self.config.horizon);
        if dropped > 0 {
            debug!("dropped {dropped} arrivals after horizon {}", self.config.horizon);
        }

        let records = self.record.then(|| Vec::with_capacity(tape.len()));
        Ok(Sim {
            registry: Registry::provision(self.sites),
            state:    RunState::new(),
            engine:   AssignmentEngine::new(self.travel),
            config:   self.config,
            epoch:    self.epoch,
            tape,
            policy:   self.policy,
            rng:      self.rng,
            clients:  self.clients,
            records,
        })
    }
}
