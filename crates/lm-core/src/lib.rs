//! `lm-core` — foundational types for the last-mile dispatch simulator.
//!
//! Every other `lm-*` crate depends on this one.  It has no `lm-*`
//! dependencies and only a handful of external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`ids`]    | `WarehouseId`, `CourierId`, `PickerId`, `OrderId`, `ClientId` |
//! | [`geo`]    | `GeoPoint`, planar and haversine distances                   |
//! | [`time`]   | `SimTime` (whole simulated seconds)                          |
//! | [`rng`]    | `SimRng` — seeded draws for tapes and policy sampling        |
//! | [`config`] | `DispatchConfig`, `RateOverride`                             |
//! | [`error`]  | `CoreError`, `CoreResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.    |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DispatchConfig, RateOverride};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{ClientId, CourierId, OrderId, PickerId, WarehouseId};
pub use rng::SimRng;
pub use time::{SECS_PER_HOUR, SimTime};
