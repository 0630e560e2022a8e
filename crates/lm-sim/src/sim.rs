//! The `Sim` struct and its event loop.

use log::{debug, warn};

use lm_core::{DispatchConfig, GeoPoint, OrderId, SimRng, SimTime};
use lm_demand::ArrivalTape;
use lm_fleet::{OrderStatus, Registry};
use lm_network::TravelModel;
use lm_policy::{Decision, DecisionPolicy, DecisionRecord, PolicyContext};

use crate::{AssignmentEngine, RunState, RunSummary, SimError, SimEvent, SimObserver, SimResult};

/// One simulation run.
///
/// `Sim` owns the registry, the run state and the tape, and drives the
/// two-event loop described in the crate docs.  Create it with
/// [`SimBuilder`][crate::SimBuilder]; a `Sim` is single-use.
pub struct Sim<'a, P: DecisionPolicy, T: TravelModel> {
    pub config: DispatchConfig,
    pub epoch: u32,
    pub registry: Registry,
    pub state: RunState,
    pub tape: ArrivalTape,
    pub engine: AssignmentEngine<T>,
    pub policy: P,
    pub rng: SimRng,
    pub(crate) clients: &'a [GeoPoint],
    /// `Some` when decision recording is on.
    pub(crate) records: Option<Vec<DecisionRecord>>,
}

impl<'a, P: DecisionPolicy, T: TravelModel> Sim<'a, P, T> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the tape is exhausted and nothing is in flight.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        while let Some(event) = self.step()? {
            observer.on_event(&event, &self.registry, &self.state);
        }
        let summary = self.summary();
        debug!(
            "epoch {} drained at {}: {} orders, {} served, {} rejected, objective {}",
            self.epoch, summary.end_time, summary.orders, summary.served, summary.rejected, summary.objective
        );
        observer.on_run_end(&self.registry, &summary);
        Ok(summary)
    }

    /// Process exactly one event.  Returns `None` once the run has drained.
    pub fn step(&mut self) -> SimResult<Option<SimEvent>> {
        let next_arrival = self.tape.get(self.state.cursor).map(|r| r.at);
        let event = match (next_arrival, self.state.next_completion) {
            (Some(a), Some(c)) if c <= a => self.process_completion()?,
            (Some(_), _) => self.process_arrival()?,
            (None, Some(_)) => self.process_completion()?,
            (None, None) => return Ok(None),
        };
        self.state.events += 1;
        Ok(Some(event))
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::collect(self.epoch, &self.registry, &self.state, self.config.penalty_secs)
    }

    /// Decisions recorded so far (empty unless recording is on).
    pub fn records(&self) -> &[DecisionRecord] {
        self.records.as_deref().unwrap_or_default()
    }

    /// Take the recorded decisions, leaving an empty list behind.
    pub fn take_records(&mut self) -> Vec<DecisionRecord> {
        self.records.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// `true` once the tape is consumed and no courier is out.
    pub fn is_drained(&self) -> bool {
        self.state.cursor >= self.tape.len() && self.state.in_flight.is_empty()
    }

    // ── Event handlers ────────────────────────────────────────────────────

    fn advance_clock(&mut self, to: SimTime) -> SimResult<()> {
        if to < self.state.now {
            return Err(SimError::ClockRegression { now: self.state.now, to });
        }
        self.state.now = to;
        Ok(())
    }

    fn process_arrival(&mut self) -> SimResult<SimEvent> {
        let rec = *self
            .tape
            .get(self.state.cursor)
            .ok_or_else(|| SimError::Invariant("arrival past the end of the tape".into()))?;
        self.state.cursor += 1;
        self.advance_clock(rec.at)?;
        let now = self.state.now;

        let location = *self.clients.get(rec.client.index()).ok_or(SimError::DimensionMismatch {
            what:     "client id in tape",
            expected: self.clients.len(),
            got:      rec.client.index(),
        })?;
        let order = self.registry.create_order(
            rec.client,
            location,
            rec.at,
            rec.commission_secs,
            rec.service_secs,
        );

        let decision = self.consult_policy(order, now)?;
        let decision = self.vet(order, decision);
        match decision {
            Decision::Reject => {
                self.registry.order_mut(order)?.status = OrderStatus::Rejected;
                self.state.rejected += 1;
                debug!("{order} rejected at {now}");
            }
            Decision::Warehouse(w) => {
                self.engine.accept(&mut self.registry, &mut self.state, order, w, now)?;
            }
        }
        Ok(SimEvent::OrderArrival { order, at: now, decision })
    }

    fn process_completion(&mut self) -> SimResult<SimEvent> {
        let (at, order) = self
            .state
            .in_flight
            .head()
            .ok_or_else(|| SimError::Invariant("completion with nothing in flight".into()))?;
        self.advance_clock(at)?;
        self.engine.complete(&mut self.registry, &mut self.state, order, at)?;
        Ok(SimEvent::CourierCompletion { order, at })
    }

    fn consult_policy(&mut self, order: OrderId, now: SimTime) -> SimResult<Decision> {
        let o = self.registry.order(order)?;
        let row = self.engine.travel().travel_row(o.client);
        let ctx = PolicyContext::new(now, o, &self.registry, row);
        let decision = self.policy.choose(&ctx, &mut self.rng)?;

        if let Some(records) = self.records.as_mut() {
            records.push(DecisionRecord {
                order,
                features: ctx.features()?.to_vec(),
                action:   decision.action(self.registry.warehouses.len()),
            });
        }
        Ok(decision)
    }

    /// Turn a routing to a warehouse that can never serve into a rejection.
    fn vet(&self, order: OrderId, decision: Decision) -> Decision {
        let Decision::Warehouse(w) = decision else {
            return decision;
        };
        match self.registry.warehouses.get(w.index()) {
            None => {
                warn!("{order}: policy chose unknown {w}; rejecting");
                Decision::Reject
            }
            Some(wh) if !wh.is_staffed() => {
                warn!(
                    "{order}: policy chose {w} with {} couriers and {} pickers provisioned; rejecting",
                    wh.initial_couriers,
                    wh.pickers.len()
                );
                Decision::Reject
            }
            Some(_) => decision,
        }
    }
}
