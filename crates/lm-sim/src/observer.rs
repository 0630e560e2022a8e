//! Simulation observer trait for progress reporting and data collection.

use lm_core::{OrderId, SimTime};
use lm_fleet::Registry;
use lm_policy::Decision;

use crate::{RunState, RunSummary};

/// One processed event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// A new order arrived.  `decision` is the decision after vetting, so a
    /// routing the scheduler refused shows up as `Reject`.
    OrderArrival { order: OrderId, at: SimTime, decision: Decision },
    /// A courier reached the client of `order`.
    CourierCompletion { order: OrderId, at: SimTime },
}

impl SimEvent {
    #[inline]
    pub fn at(&self) -> SimTime {
        match *self {
            SimEvent::OrderArrival { at, .. } | SimEvent::CourierCompletion { at, .. } => at,
        }
    }
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only
/// need to override what they care about.
///
/// # Example: event counter
///
/// ```rust,ignore
/// struct Count(usize);
///
/// impl SimObserver for Count {
///     fn on_event(&mut self, _e: &SimEvent, _reg: &Registry, _state: &RunState) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after every processed event, with the state it left behind.
    fn on_event(&mut self, _event: &SimEvent, _registry: &Registry, _state: &RunState) {}

    /// Called once when the run has drained.
    fn on_run_end(&mut self, _registry: &Registry, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_event(&mut self, event: &SimEvent, registry: &Registry, state: &RunState) {
        (**self).on_event(event, registry, state);
    }

    fn on_run_end(&mut self, registry: &Registry, summary: &RunSummary) {
        (**self).on_run_end(registry, summary);
    }
}
