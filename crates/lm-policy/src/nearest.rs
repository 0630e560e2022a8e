//! Nearest-warehouse heuristic.

use log::debug;

use lm_core::{SimRng, WarehouseId};

use crate::{Decision, DecisionPolicy, PolicyContext, PolicyResult};

/// Route each order to the warehouse with the shortest travel time from
/// its client, if that warehouse can take it right now.
///
/// The chosen warehouse must have at least one courier present and at
/// least one picker free at the arrival instant.  Otherwise the order is
/// rejected; no second-nearest fallback is tried.  Travel-time ties go to
/// the lowest warehouse index.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestWarehouse;

impl DecisionPolicy for NearestWarehouse {
    fn name(&self) -> &str {
        "NearestWarehousePolicy"
    }

    fn choose(&self, ctx: &PolicyContext<'_>, _rng: &mut SimRng) -> PolicyResult<Decision> {
        let mut best: Option<(usize, u64)> = None;
        for (i, &secs) in ctx.travel_row.iter().enumerate() {
            if best.is_none_or(|(_, b)| secs < b) {
                best = Some((i, secs));
            }
        }
        let Some((w, _)) = best else {
            return Ok(Decision::Reject);
        };
        let wid = WarehouseId(w as u32);

        let couriers = ctx.registry.warehouse(wid)?.couriers.len();
        let free_pickers = ctx.registry.free_picker_count(wid, ctx.now)?;
        if couriers == 0 || free_pickers == 0 {
            debug!(
                "{}: nearest {wid} is saturated (couriers={couriers}, free pickers={free_pickers})",
                ctx.order.id
            );
            return Ok(Decision::Reject);
        }
        Ok(Decision::Warehouse(wid))
    }
}
