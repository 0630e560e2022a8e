//! Resource entities: warehouses, couriers, pickers.

use std::collections::VecDeque;

use lm_core::{CourierId, GeoPoint, OrderId, PickerId, SimTime, WarehouseId};

/// A depot holding pickers (fixed) and couriers (coming and going).
#[derive(Debug, Clone)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub location: GeoPoint,

    /// Pickers employed here.  Fixed at provisioning; never changes.
    pub pickers: Vec<PickerId>,

    /// Couriers physically present.  Shrinks on dispatch, grows on return.
    pub couriers: Vec<CourierId>,

    /// Accepted orders waiting for a courier, oldest first.
    pub backlog: VecDeque<OrderId>,

    /// Couriers stationed here at the start of the run.
    pub initial_couriers: usize,
}

impl Warehouse {
    /// `true` if the warehouse could ever dispatch an order: it was
    /// provisioned with at least one courier and one picker.
    #[inline]
    pub fn is_staffed(&self) -> bool {
        self.initial_couriers > 0 && !self.pickers.is_empty()
    }
}

/// A delivery rider.  Always returns to its home warehouse.
#[derive(Debug, Clone)]
pub struct Courier {
    pub id: CourierId,
    pub home: WarehouseId,
    /// Earliest time the courier can leave on a new delivery.
    pub available_at: SimTime,
    /// The order currently being delivered, if in flight.
    pub order: Option<OrderId>,
}

impl Courier {
    #[inline]
    pub fn in_flight(&self) -> bool {
        self.order.is_some()
    }
}

/// An order commissioner.  Never leaves its warehouse; "busy" simply means
/// `available_at > now`.
#[derive(Debug, Clone)]
pub struct Picker {
    pub id: PickerId,
    pub home: WarehouseId,
    pub available_at: SimTime,
}

impl Picker {
    #[inline]
    pub fn is_free(&self, now: SimTime) -> bool {
        self.available_at <= now
    }
}
