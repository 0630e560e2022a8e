use thiserror::Error;

use lm_core::{CourierId, OrderId, PickerId, WarehouseId};

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("{0} not found")]
    WarehouseNotFound(WarehouseId),

    #[error("{0} not found")]
    CourierNotFound(CourierId),

    #[error("{0} not found")]
    PickerNotFound(PickerId),

    #[error("{0} not found")]
    OrderNotFound(OrderId),

    #[error("{courier} is not present at {warehouse}")]
    CourierNotPresent { courier: CourierId, warehouse: WarehouseId },

    #[error("{0} is already present at its warehouse")]
    CourierAlreadyPresent(CourierId),
}

pub type FleetResult<T> = Result<T, FleetError>;
