//! `RunState` — everything the scheduler tracks besides the entities.

use lm_core::SimTime;
use lm_demand::InFlightQueue;

/// Clock, watermarks and running totals of one run.
///
/// Owned by [`Sim`][crate::Sim] and created fresh for every run; nothing
/// here outlives the run.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Time of the last processed event.
    pub now: SimTime,
    /// Index of the next unconsumed tape record.
    pub cursor: usize,
    /// Arrival time at the head of `in_flight`; `None` when nothing is out.
    pub next_completion: Option<SimTime>,
    /// Dispatched orders, ascending by courier arrival time.
    pub in_flight: InFlightQueue,

    pub served: u64,
    pub rejected: u64,
    pub total_waiting_secs: u64,
    pub max_waiting_secs: u64,
    /// Largest delivery arrival or courier return time seen so far.
    pub latest_arrival: SimTime,
    /// Events processed.
    pub events: u64,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncated mean waiting time of served orders; 0 if none.
    pub fn mean_waiting_secs(&self) -> u64 {
        if self.served == 0 { 0 } else { self.total_waiting_secs / self.served }
    }

    /// Refresh `next_completion` from the queue head.
    #[inline]
    pub(crate) fn sync_next_completion(&mut self) {
        self.next_completion = self.in_flight.next_time();
    }

    #[inline]
    pub(crate) fn raise_latest_arrival(&mut self, t: SimTime) {
        self.latest_arrival = self.latest_arrival.max(t);
    }
}
