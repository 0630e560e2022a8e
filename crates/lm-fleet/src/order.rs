//! Orders and their lifecycle.

use lm_core::{ClientId, CourierId, GeoPoint, OrderId, PickerId, SimTime, WarehouseId};

/// Where an order is in its lifecycle.
///
/// ```text
/// Created ─┬─► Rejected
///          └─► Assigned ─┬─► InFlight ─► Delivered
///                        └─► Backlogged ─► InFlight ─► Delivered
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Arrived; no routing decision yet.
    #[default]
    Created,
    /// Turned away by the policy (or by routing validation).  Terminal.
    Rejected,
    /// Warehouse and picker chosen; courier not yet decided.
    Assigned,
    /// Waiting in the warehouse backlog for a courier.
    Backlogged,
    /// A courier is on the way; `arrival_at` is known.
    InFlight,
    /// Handed over at the client's door.  Terminal.
    Delivered,
}

/// One client request.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub client: ClientId,
    /// Client location, copied from the instance at creation.
    pub location: GeoPoint,
    pub ordered_at: SimTime,
    pub commission_secs: u64,
    pub service_secs: u64,
    pub status: OrderStatus,

    pub warehouse: Option<WarehouseId>,
    pub picker: Option<PickerId>,
    pub courier: Option<CourierId>,

    /// Time the courier reaches the client.  Set when a courier is
    /// dispatched; `None` means "not dispatched (yet)".
    pub arrival_at: Option<SimTime>,
}

impl Order {
    /// `true` once the policy has routed the order to a warehouse.
    #[inline]
    pub fn accepted(&self) -> bool {
        !matches!(self.status, OrderStatus::Created | OrderStatus::Rejected)
    }

    #[inline]
    pub fn is_rejected(&self) -> bool {
        self.status == OrderStatus::Rejected
    }

    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }

    /// Seconds from ordering to delivery, for delivered orders.
    pub fn waiting_secs(&self) -> Option<u64> {
        match (self.status, self.arrival_at) {
            (OrderStatus::Delivered, Some(at)) => Some(at - self.ordered_at),
            _ => None,
        }
    }
}
