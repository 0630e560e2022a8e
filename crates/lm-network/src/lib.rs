//! `lm-network` — travel times between clients and warehouses.
//!
//! The simulator never routes over a road graph: a trip's duration is an
//! opaque lookup keyed by `(client, warehouse)`.  This crate owns that
//! lookup and the instance description it is loaded with.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`travel`]   | `TravelModel` trait, `TravelTable`, `ConstantTravel`      |
//! | [`instance`] | `Instance`, `WarehouseSite`                               |
//! | [`loader`]   | `load_instance_json`, `load_instance_reader`, `load_travel_csv_reader` |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                        |

pub mod error;
pub mod instance;
pub mod loader;
pub mod travel;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use instance::{Instance, WarehouseSite};
pub use loader::{load_instance_json, load_instance_reader, load_travel_csv, load_travel_csv_reader};
pub use travel::{ConstantTravel, TravelModel, TravelTable};
