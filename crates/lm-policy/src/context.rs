//! Read-only state handed to a [`DecisionPolicy`][crate::DecisionPolicy].

use std::cell::OnceCell;

use lm_core::{SimTime, WarehouseId};
use lm_fleet::{Order, Registry};

use crate::PolicyResult;

/// Entries per warehouse in the feature vector.
const FEATURES_PER_WAREHOUSE: usize = 5;

/// Feature-vector length for an instance with `warehouses` warehouses.
#[inline]
pub fn feature_len(warehouses: usize) -> usize {
    warehouses * FEATURES_PER_WAREHOUSE
}

/// A snapshot of the run at the moment `order` arrives.
///
/// Built by the scheduler for every arrival and dropped right after the
/// decision.  The feature vector is computed at most once, on first use.
pub struct PolicyContext<'a> {
    pub now: SimTime,
    pub order: &'a Order,
    pub registry: &'a Registry,
    /// Travel seconds from the order's client to every warehouse.
    pub travel_row: Vec<u64>,
    features: OnceCell<Vec<f64>>,
}

impl<'a> PolicyContext<'a> {
    pub fn new(now: SimTime, order: &'a Order, registry: &'a Registry, travel_row: Vec<u64>) -> Self {
        Self { now, order, registry, travel_row, features: OnceCell::new() }
    }

    #[inline]
    pub fn warehouse_count(&self) -> usize {
        self.registry.warehouses.len()
    }

    /// The state vector fed to learned policies.
    ///
    /// ```text
    /// [ travel_0 .. travel_{W-1},
    ///   couriers_0, free_pickers_0, picker_slack_0, courier_slack_0,
    ///   ...
    ///   couriers_{W-1}, free_pickers_{W-1}, picker_slack_{W-1}, courier_slack_{W-1} ]
    /// ```
    ///
    /// `couriers_w` counts couriers present at `w`; pickers are free when
    /// their availability is at or before `now`.  Slack is
    /// `max(0, fastest availability − now)` and 0 for an empty pool.
    pub fn features(&self) -> PolicyResult<&[f64]> {
        if let Some(f) = self.features.get() {
            return Ok(f);
        }
        let computed = self.compute_features()?;
        Ok(self.features.get_or_init(|| computed))
    }

    fn compute_features(&self) -> PolicyResult<Vec<f64>> {
        let w_count = self.warehouse_count();
        let mut out = Vec::with_capacity(feature_len(w_count));
        out.extend(self.travel_row.iter().map(|&s| s as f64));
        // Pad or trim so a short travel row never shifts the pool block.
        out.resize(w_count, 0.0);

        for w in 0..w_count as u32 {
            let wid = WarehouseId(w);
            let wh = self.registry.warehouse(wid)?;
            out.push(wh.couriers.len() as f64);
            out.push(self.registry.free_picker_count(wid, self.now)? as f64);
            out.push(self.registry.picker_slack(wid, self.now)? as f64);
            out.push(self.registry.courier_slack(wid, self.now)? as f64);
        }
        Ok(out)
    }
}
