//! Routing decisions and their action-index encoding.

use std::fmt;

use lm_core::WarehouseId;

/// What to do with a newly arrived order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Route the order to this warehouse.
    Warehouse(WarehouseId),
    /// Turn the order away.
    Reject,
}

impl Decision {
    /// Action index in a space of `warehouses + 1` actions.
    #[inline]
    pub fn action(self, warehouses: usize) -> usize {
        match self {
            Decision::Warehouse(w) => w.index(),
            Decision::Reject => warehouses,
        }
    }

    /// Inverse of [`action`](Self::action).  Any index `>= warehouses`
    /// means reject.
    #[inline]
    pub fn from_action(action: usize, warehouses: usize) -> Decision {
        if action < warehouses {
            Decision::Warehouse(WarehouseId(action as u32))
        } else {
            Decision::Reject
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Warehouse(w) => write!(f, "route to {w}"),
            Decision::Reject => f.write_str("reject"),
        }
    }
}
