//! Problem instance: warehouse sites, client locations, travel times.

use lm_core::{ClientId, GeoPoint, WarehouseId};

use crate::{NetworkError, NetworkResult, TravelModel, TravelTable};

/// Static description of one warehouse, used to provision every run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarehouseSite {
    pub location: GeoPoint,
    /// Couriers stationed here at the start of each run.
    pub couriers: u32,
    /// Pickers employed here for the whole run.
    pub pickers: u32,
}

impl WarehouseSite {
    pub fn new(location: GeoPoint, couriers: u32, pickers: u32) -> Self {
        Self { location, couriers, pickers }
    }
}

/// Everything a run needs that does not change between runs.
#[derive(Clone, Debug)]
pub struct Instance {
    pub warehouses: Vec<WarehouseSite>,
    /// Client locations, indexed by `ClientId`.
    pub clients: Vec<GeoPoint>,
    pub travel: TravelTable,
}

impl Instance {
    /// Assemble an instance, checking the travel table matches both lists.
    pub fn new(warehouses: Vec<WarehouseSite>, clients: Vec<GeoPoint>, travel: TravelTable) -> NetworkResult<Self> {
        if travel.warehouse_count() != warehouses.len() {
            return Err(NetworkError::DimensionMismatch {
                what:     "warehouses",
                expected: warehouses.len(),
                got:      travel.warehouse_count(),
            });
        }
        if travel.client_count() != clients.len() {
            return Err(NetworkError::DimensionMismatch {
                what:     "clients",
                expected: clients.len(),
                got:      travel.client_count(),
            });
        }
        if clients.is_empty() {
            return Err(NetworkError::Instance("instance has no clients".into()));
        }
        Ok(Self { warehouses, clients, travel })
    }

    pub fn warehouse_count(&self) -> usize {
        self.warehouses.len()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn warehouse(&self, id: WarehouseId) -> Option<&WarehouseSite> {
        self.warehouses.get(id.index())
    }

    pub fn client(&self, id: ClientId) -> Option<GeoPoint> {
        self.clients.get(id.index()).copied()
    }
}
