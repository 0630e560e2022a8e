use lm_core::{CoreError, OrderId, SimTime, WarehouseId};
use lm_demand::DemandError;
use lm_fleet::FleetError;
use lm_policy::PolicyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what}: expected {expected}, got {got}")]
    DimensionMismatch {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("{warehouse} has no {pool} to assign")]
    EmptyPool {
        pool:      &'static str,
        warehouse: WarehouseId,
    },

    #[error("{order} has no {what}")]
    Unassigned {
        order: OrderId,
        what:  &'static str,
    },

    #[error("clock would move backwards from {now} to {to}")]
    ClockRegression { now: SimTime, to: SimTime },

    #[error("run state inconsistent: {0}")]
    Invariant(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Demand(#[from] DemandError),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

pub type SimResult<T> = Result<T, SimError>;
