//! `InFlightQueue` — dispatched orders ordered by courier arrival time.
//!
//! The scheduler reads the next courier-completion time from the head in
//! O(1).  Insertion scans from the tail, which is cheap because new
//! dispatches usually arrive later than everything already in flight.
//!
//! # Tie order
//!
//! The tail scan stops at the first entry strictly earlier than the new
//! one, so a newly inserted order lands *before* existing orders with the
//! same arrival time.

use lm_core::{OrderId, SimTime};

/// Orders with a courier on the way, sorted ascending by arrival time.
#[derive(Debug, Clone, Default)]
pub struct InFlightQueue {
    entries: Vec<(SimTime, OrderId)>,
}

impl InFlightQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `order`, arriving at `at`, at its sorted position.
    pub fn insert(&mut self, at: SimTime, order: OrderId) {
        let pos = self
            .entries
            .iter()
            .rposition(|&(t, _)| t < at)
            .map_or(0, |i| i + 1);
        self.entries.insert(pos, (at, order));
    }

    /// Earliest pending arrival, if any.
    #[inline]
    pub fn head(&self) -> Option<(SimTime, OrderId)> {
        self.entries.first().copied()
    }

    /// Arrival time of the head: the next courier-completion watermark.
    #[inline]
    pub fn next_time(&self) -> Option<SimTime> {
        self.entries.first().map(|&(t, _)| t)
    }

    /// Remove `order` wherever it is.  Returns `false` if it was absent.
    pub fn remove(&mut self, order: OrderId) -> bool {
        match self.entries.iter().position(|&(_, o)| o == order) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SimTime, OrderId)> {
        self.entries.iter()
    }

    /// `true` if arrival times are non-decreasing from head to tail.
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].0 <= w[1].0)
    }
}
