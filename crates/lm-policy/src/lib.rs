//! `lm-policy` — the decision boundary between an arriving order and the
//! assignment engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`decision`] | `Decision` (`Warehouse(id)` / `Reject`) and action indexing  |
//! | [`context`]  | `PolicyContext<'a>` — read-only view handed to a policy      |
//! | [`model`]    | `DecisionPolicy`, `TrainablePolicy` traits                   |
//! | [`nearest`]  | `NearestWarehouse` — capacity-checked nearest heuristic      |
//! | [`softmax`]  | `SoftmaxPolicy` — linear softmax trained with REINFORCE      |
//! | [`record`]   | `DecisionRecord` — one (features, action) pair per order     |
//! | [`error`]    | `PolicyError`, `PolicyResult<T>`                             |
//!
//! # Action space
//!
//! With `W` warehouses a policy picks one of `W + 1` actions: index `w < W`
//! routes the order to warehouse `w`, index `W` rejects it.  The feature
//! vector has `5 × W` entries (see [`PolicyContext::features`]).
//!
//! The scheduler treats every policy the same way once a [`Decision`] is
//! returned; nothing in `lm-sim` branches on the policy type.

pub mod context;
pub mod decision;
pub mod error;
pub mod model;
pub mod nearest;
pub mod record;
pub mod softmax;

#[cfg(test)]
mod tests;

pub use context::{PolicyContext, feature_len};
pub use decision::Decision;
pub use error::{PolicyError, PolicyResult};
pub use model::{DecisionPolicy, TrainablePolicy};
pub use nearest::NearestWarehouse;
pub use record::DecisionRecord;
pub use softmax::{Sampling, SoftmaxPolicy};
