//! `lm-demand` — where orders come from and when deliveries complete.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`tape`]      | `ArrivalRecord`, `ArrivalTape`, `TapeParams`              |
//! | [`in_flight`] | `InFlightQueue` — dispatched orders sorted by arrival time |
//! | [`loader`]    | `load_tape_csv`, `load_tape_reader`                       |
//! | [`error`]     | `DemandError`, `DemandResult<T>`                          |
//!
//! # Tape model
//!
//! A run is fully determined by its arrival tape: every inter-arrival gap,
//! client and duration is drawn once, before the simulation starts.  The
//! event loop then only reads the tape, so two runs over the same tape with
//! the same policy decisions are identical.

pub mod error;
pub mod in_flight;
pub mod loader;
pub mod tape;

#[cfg(test)]
mod tests;

pub use error::{DemandError, DemandResult};
pub use in_flight::InFlightQueue;
pub use loader::{load_tape_csv, load_tape_reader};
pub use tape::{ArrivalRecord, ArrivalTape, TapeParams};
