//! `lm-sim` — discrete-event scheduler and assignment engine for the
//! last-mile dispatch simulator.
//!
//! # Event loop
//!
//! ```text
//! loop:
//!   a = time of the next tape arrival (if any)
//!   c = head of the in-flight queue  (if any)
//!   if a exists and (c is none or a < c):        ← ties go to completion
//!     ① OrderArrival     create order, consult the policy, vet the decision,
//!                        assign picker, dispatch courier or backlog
//!   else if c exists:
//!     ② CourierCompletion deliver, return courier home, update metrics,
//!                        dispatch the head of that warehouse's backlog
//!   else:
//!     stop               tape exhausted and nothing in flight
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`state`]    | `RunState` — clock, watermarks, counters, in-flight queue  |
//! | [`assign`]   | `AssignmentEngine` — picker/courier selection, completion  |
//! | [`sim`]      | `Sim` — the event loop                                     |
//! | [`builder`]  | `SimBuilder` — validation and wiring                       |
//! | [`observer`] | `SimObserver`, `NoopObserver`, `SimEvent`                  |
//! | [`metrics`]  | `RunSummary`, `objective`, `discounted_costs`              |
//! | [`runner`]   | one entry point per mode, `TrainingReport`                 |
//! | [`error`]    | `SimError`, `SimResult<T>`                                 |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Evaluation epochs run on Rayon's thread pool.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lm_sim::{NoopObserver, run_nearest_warehouse};
//!
//! let instance = lm_network::load_instance_json(path)?;
//! let summaries = run_nearest_warehouse(&instance, &config, &mut NoopObserver)?;
//! ```

pub mod assign;
pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod runner;
pub mod sim;
pub mod state;


pub use assign::AssignmentEngine;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{RunSummary, discounted_costs, objective};
pub use observer::{NoopObserver, SimEvent, SimObserver};
pub use runner::{
    Discount, EpochOutcome, TrainingPoint, TrainingReport, evaluate, replay, run_epoch,
    run_nearest_warehouse, test_policy, train_policy,
};
pub use sim::Sim;
pub use state::RunState;
