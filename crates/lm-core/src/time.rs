//! Simulation time model.
//!
//! Time is a whole number of simulated seconds since the start of the run.
//! Every duration in the system (travel, commission, service, waiting) is
//! an integer number of seconds, so all metric arithmetic is exact.
//!
//! "No event pending" is expressed as `Option<SimTime>::None` rather than a
//! sentinel value.

use std::fmt;

/// Seconds in one simulated hour.
pub const SECS_PER_HOUR: u64 = 3_600;

/// An absolute simulated instant, in seconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// The instant `hours` simulated hours after the start.
    #[inline]
    pub fn from_hours(hours: u64) -> SimTime {
        SimTime(hours * SECS_PER_HOUR)
    }

    /// Seconds elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn saturating_since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    #[inline]
    pub fn secs(self) -> u64 {
        self.0
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::AddAssign<u64> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

/// Elapsed seconds.
///
/// # Panics
/// Panics in debug mode if `rhs > self`.
impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
