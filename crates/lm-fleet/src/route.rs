//! Route legs.

use lm_core::{GeoPoint, SimTime};

/// One directed physical movement, logged for visualisation.
///
/// Every delivered order produces two legs: warehouse → client on
/// dispatch, client → warehouse on the courier's return.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Route {
    pub start: SimTime,
    pub arrival: SimTime,
    pub from: GeoPoint,
    pub to: GeoPoint,
}

impl Route {
    pub fn new(start: SimTime, arrival: SimTime, from: GeoPoint, to: GeoPoint) -> Self {
        Self { start, arrival, from, to }
    }

    #[inline]
    pub fn duration_secs(&self) -> u64 {
        self.arrival.saturating_since(self.start)
    }
}
