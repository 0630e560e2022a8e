//! Travel-time trait and implementations.
//!
//! # Pluggability
//!
//! `lm-sim` reads travel times through the [`TravelModel`] trait, so an
//! application can back it with a precomputed matrix ([`TravelTable`]), a
//! closed-form model, or a constant ([`ConstantTravel`], handy in tests).
//!
//! # Units
//!
//! Whole seconds.  The same duration is used for the outbound leg
//! (warehouse → client) and the return leg (client → warehouse).

use lm_core::{ClientId, GeoPoint, WarehouseId};

use crate::{NetworkError, NetworkResult};

// ── TravelModel trait ─────────────────────────────────────────────────────────

/// Travel-time lookup between client locations and warehouses.
///
/// Implementations must be `Send + Sync` so one table can be shared by
/// epochs running on different Rayon workers.
pub trait TravelModel: Send + Sync {
    /// Number of warehouses (columns).
    fn warehouse_count(&self) -> usize;

    /// Number of client locations (rows).
    fn client_count(&self) -> usize;

    /// Travel time between `client` and `warehouse`.
    ///
    /// Callers guarantee both ids are in range.
    fn travel_secs(&self, client: ClientId, warehouse: WarehouseId) -> u64;

    /// Travel times from `client` to every warehouse, in warehouse order.
    fn travel_row(&self, client: ClientId) -> Vec<u64> {
        (0..self.warehouse_count() as u32)
            .map(|w| self.travel_secs(client, WarehouseId(w)))
            .collect()
    }

    /// The warehouse closest to `client`.  Ties go to the lowest index.
    ///
    /// Returns `None` when there are no warehouses.
    fn nearest_warehouse(&self, client: ClientId) -> Option<WarehouseId> {
        let row = self.travel_row(client);
        let mut best: Option<(usize, u64)> = None;
        for (i, &secs) in row.iter().enumerate() {
            if best.is_none_or(|(_, b)| secs < b) {
                best = Some((i, secs));
            }
        }
        best.map(|(i, _)| WarehouseId(i as u32))
    }
}

impl<T: TravelModel + ?Sized> TravelModel for &T {
    fn warehouse_count(&self) -> usize {
        (**self).warehouse_count()
    }

    fn client_count(&self) -> usize {
        (**self).client_count()
    }

    fn travel_secs(&self, client: ClientId, warehouse: WarehouseId) -> u64 {
        (**self).travel_secs(client, warehouse)
    }

    fn travel_row(&self, client: ClientId) -> Vec<u64> {
        (**self).travel_row(client)
    }
}

// ── TravelTable ───────────────────────────────────────────────────────────────

/// Dense client × warehouse matrix, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct TravelTable {
    warehouses: usize,
    secs:       Vec<u64>,
}

impl TravelTable {
    /// Build from one row per client.  Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> NetworkResult<Self> {
        let warehouses = rows.first().map_or(0, Vec::len);
        let mut secs = Vec::with_capacity(rows.len() * warehouses);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != warehouses {
                return Err(NetworkError::RaggedRow {
                    row:      i,
                    expected: warehouses,
                    got:      row.len(),
                });
            }
            secs.extend(row);
        }
        Ok(Self { warehouses, secs })
    }

    /// Derive travel times from great-circle distance at a fixed speed.
    ///
    /// Rounds to the nearest second.  Used when an instance ships
    /// coordinates but no measured matrix.
    pub fn from_distances(clients: &[GeoPoint], warehouses: &[GeoPoint], speed_mps: f64) -> NetworkResult<Self> {
        if !(speed_mps > 0.0) {
            return Err(NetworkError::Instance(format!("speed must be positive, got {speed_mps}")));
        }
        let secs = clients
            .iter()
            .flat_map(|c| warehouses.iter().map(move |w| (c.distance_m(*w) / speed_mps).round() as u64))
            .collect();
        Ok(Self { warehouses: warehouses.len(), secs })
    }

    /// Borrowed row for `client`.
    #[inline]
    pub fn row(&self, client: ClientId) -> &[u64] {
        let start = client.index() * self.warehouses;
        &self.secs[start..start + self.warehouses]
    }
}

impl TravelModel for TravelTable {
    fn warehouse_count(&self) -> usize {
        self.warehouses
    }

    fn client_count(&self) -> usize {
        if self.warehouses == 0 { 0 } else { self.secs.len() / self.warehouses }
    }

    #[inline]
    fn travel_secs(&self, client: ClientId, warehouse: WarehouseId) -> u64 {
        self.secs[client.index() * self.warehouses + warehouse.index()]
    }

    fn travel_row(&self, client: ClientId) -> Vec<u64> {
        self.row(client).to_vec()
    }
}

// ── ConstantTravel ────────────────────────────────────────────────────────────

/// Every trip takes the same time.
#[derive(Clone, Copy, Debug)]
pub struct ConstantTravel {
    pub secs:       u64,
    pub warehouses: usize,
    pub clients:    usize,
}

impl ConstantTravel {
    pub fn new(secs: u64, warehouses: usize, clients: usize) -> Self {
        Self { secs, warehouses, clients }
    }
}

impl TravelModel for ConstantTravel {
    fn warehouse_count(&self) -> usize {
        self.warehouses
    }

    fn client_count(&self) -> usize {
        self.clients
    }

    fn travel_secs(&self, _client: ClientId, _warehouse: WarehouseId) -> u64 {
        self.secs
    }
}
