//! The policy traits: the extension point between an arriving order and
//! the assignment engine.

use lm_core::SimRng;

use crate::{Decision, DecisionRecord, PolicyContext, PolicyResult};

/// Pluggable routing strategy.
///
/// Called once per arriving order with a read-only [`PolicyContext`] and
/// the run's RNG.  Implementations must not assume the returned warehouse
/// is used as-is: the scheduler turns decisions that point at a warehouse
/// without couriers or pickers into rejections.
///
/// `Send + Sync` so a single policy can be shared by epochs running on
/// different Rayon workers.
pub trait DecisionPolicy: Send + Sync {
    /// Short name for logs and output file names.
    fn name(&self) -> &str;

    fn choose(&self, ctx: &PolicyContext<'_>, rng: &mut SimRng) -> PolicyResult<Decision>;
}

/// A policy that learns from finished episodes.
pub trait TrainablePolicy: DecisionPolicy {
    /// Switch between exploratory sampling (`true`) and greedy choice.
    fn set_training(&mut self, training: bool);

    /// One gradient step from an episode.
    ///
    /// `costs[i]` is the (discounted) cost attributed to `records[i]`.
    /// Returns the episode loss.
    fn update(&mut self, records: &[DecisionRecord], costs: &[f64]) -> PolicyResult<f64>;
}

impl<P: DecisionPolicy + ?Sized> DecisionPolicy for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose(&self, ctx: &PolicyContext<'_>, rng: &mut SimRng) -> PolicyResult<Decision> {
        (**self).choose(ctx, rng)
    }
}
