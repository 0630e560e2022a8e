//! Run-level metrics.
//!
//! # Objective
//!
//! ```text
//! objective = Σ delivered (arrival − ordered_at)
//!           + penalty × (rejected + accepted-but-undelivered)
//! ```
//!
//! # Discounted costs
//!
//! Per-order credit used to train learned policies.  For order `i`:
//!
//! ```text
//! rejected or undelivered:  penalty
//! delivered:                wait_i + Σ_{j > i} cost_j · λt^(t_j − t_i) · λs^d(i, j)
//! ```
//!
//! where `cost_j` is `wait_j` if `j` was delivered and `penalty` otherwise,
//! and `d(i, j)` is the planar distance from `i`'s warehouse to `j`'s
//! warehouse (delivered) or to `j`'s client (otherwise).

use lm_core::{GeoPoint, SimTime};
use lm_fleet::{Order, Registry};

use crate::{RunState, SimError, SimResult};

/// Aggregate outcome of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub epoch: u32,
    pub orders: usize,
    pub served: u64,
    pub rejected: u64,
    pub undelivered: u64,
    pub objective: u64,
    /// `rejected / orders`; 0 for an empty tape.
    pub rejection_rate: f64,
    pub mean_waiting_secs: u64,
    pub max_waiting_secs: u64,
    pub latest_arrival: SimTime,
    pub end_time: SimTime,
}

impl RunSummary {
    pub fn collect(epoch: u32, registry: &Registry, state: &RunState, penalty_secs: u64) -> Self {
        let orders = registry.orders.len();
        let undelivered = registry
            .orders
            .iter()
            .filter(|o| o.accepted() && !o.is_delivered())
            .count() as u64;
        let rejection_rate = if orders == 0 { 0.0 } else { state.rejected as f64 / orders as f64 };
        Self {
            epoch,
            orders,
            served:            state.served,
            rejected:          state.rejected,
            undelivered,
            objective:         objective(registry, penalty_secs),
            rejection_rate,
            mean_waiting_secs: state.mean_waiting_secs(),
            max_waiting_secs:  state.max_waiting_secs,
            latest_arrival:    state.latest_arrival,
            end_time:          state.now,
        }
    }
}

/// Sum of delivered waiting times plus `penalty_secs` per rejected or
/// undelivered order.
pub fn objective(registry: &Registry, penalty_secs: u64) -> u64 {
    registry
        .orders
        .iter()
        .map(|o| o.waiting_secs().unwrap_or(penalty_secs))
        .sum()
}

/// Discounted per-order costs, indexed by `OrderId`.
pub fn discounted_costs(
    registry:     &Registry,
    penalty_secs: u64,
    lambda_t:     f64,
    lambda_s:     f64,
) -> SimResult<Vec<f64>> {
    let penalty = penalty_secs as f64;
    let orders = &registry.orders;

    let warehouse_loc = |o: &Order| -> SimResult<GeoPoint> {
        let w = o.warehouse.ok_or(SimError::Unassigned { order: o.id, what: "warehouse" })?;
        Ok(registry.warehouse(w)?.location)
    };

    let mut costs = Vec::with_capacity(orders.len());
    for (i, order) in orders.iter().enumerate() {
        let Some(wait) = order.waiting_secs() else {
            costs.push(penalty);
            continue;
        };
        let origin = warehouse_loc(order)?;
        let mut cost = wait as f64;
        for later in &orders[i + 1..] {
            let dt = later.ordered_at.saturating_since(order.ordered_at) as f64;
            let (c, target) = match later.waiting_secs() {
                Some(w) => (w as f64, warehouse_loc(later)?),
                None => (penalty, later.location),
            };
            let d = origin.planar_distance(target);
            cost += c * lambda_t.powf(dt) * lambda_s.powf(d);
        }
        costs.push(cost);
    }
    Ok(costs)
}
