//! `lm-fleet` — the entity registry for one simulation run.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`entity`]   | `Warehouse`, `Courier`, `Picker`                      |
//! | [`order`]    | `Order`, `OrderStatus`                                |
//! | [`route`]    | `Route` — one logged physical leg                     |
//! | [`registry`] | `Registry` — arena owner, provisioning, pool queries  |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                        |
//!
//! # Ownership model
//!
//! The [`Registry`] owns every entity of a run in plain `Vec` arenas.
//! Relationships (order → warehouse, courier → order, …) are typed ids
//! from `lm-core`, never references, so a run can be discarded and
//! re-provisioned without any dangling links.
//!
//! # Courier location invariant
//!
//! A courier is either listed in its home warehouse's `couriers` (present)
//! or has `order = Some(..)` (in flight), never both and never neither.
//! Only [`Registry::detach_courier`] and [`Registry::attach_courier`] move
//! couriers between the two states.

pub mod entity;
pub mod error;
pub mod order;
pub mod registry;
pub mod route;


pub use entity::{Courier, Picker, Warehouse};
pub use error::{FleetError, FleetResult};
pub use order::{Order, OrderStatus};
pub use registry::Registry;
pub use route::Route;
