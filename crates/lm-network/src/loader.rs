//! Instance and travel-table loaders.
//!
//! # JSON instance format
//!
//! ```json
//! {
//!   "warehouses": [ { "location": { "lat": 52.37, "lon": 4.89 }, "couriers": 3, "pickers": 2 } ],
//!   "clients":    [ { "lat": 52.36, "lon": 4.90 } ],
//!   "travel_secs": [ [ 412 ] ]
//! }
//! ```
//!
//! Exactly one travel source is used, in this order of preference:
//!
//! | Field         | Meaning                                                     |
//! |---------------|-------------------------------------------------------------|
//! | `travel_secs` | inline matrix, one row per client                           |
//! | `travel_csv`  | path (relative to the JSON file) of a travel CSV, see below |
//! | `speed_mps`   | derive from great-circle distance at this speed             |
//!
//! # Travel CSV format
//!
//! ```csv
//! client_id,warehouse_id,travel_secs
//! 0,0,412
//! 0,1,977
//! ```
//!
//! Every `(client, warehouse)` pair must appear.  Later duplicates win.

use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use lm_core::{ClientId, GeoPoint, WarehouseId};

use crate::{Instance, NetworkError, NetworkResult, TravelTable, WarehouseSite};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WarehouseRecord {
    location: GeoPoint,
    couriers: u32,
    pickers:  u32,
}

#[derive(Deserialize)]
struct InstanceRecord {
    warehouses:  Vec<WarehouseRecord>,
    clients:     Vec<GeoPoint>,
    #[serde(default)]
    travel_secs: Option<Vec<Vec<u64>>>,
    #[serde(default)]
    travel_csv:  Option<PathBuf>,
    #[serde(default)]
    speed_mps:   Option<f64>,
}

#[derive(Deserialize)]
struct TravelRecord {
    client_id:    u32,
    warehouse_id: u32,
    travel_secs:  u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an [`Instance`] from a JSON file.
///
/// A relative `travel_csv` path is resolved against the file's directory.
pub fn load_instance_json(path: &Path) -> NetworkResult<Instance> {
    let file = std::fs::File::open(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    load_instance_with_base(file, base)
}

/// Like [`load_instance_json`] but reads from any `Read` source.
///
/// Relative `travel_csv` paths resolve against the working directory.
pub fn load_instance_reader<R: Read>(reader: R) -> NetworkResult<Instance> {
    load_instance_with_base(reader, Path::new("."))
}

/// Load a travel CSV into a table of `clients` × `warehouses`.
pub fn load_travel_csv(path: &Path, clients: usize, warehouses: usize) -> NetworkResult<TravelTable> {
    let file = std::fs::File::open(path)?;
    load_travel_csv_reader(file, clients, warehouses)
}

/// Like [`load_travel_csv`] but accepts any `Read` source.
pub fn load_travel_csv_reader<R: Read>(reader: R, clients: usize, warehouses: usize) -> NetworkResult<TravelTable> {
    let mut grid: Vec<Vec<Option<u64>>> = vec![vec![None; warehouses]; clients];

    let mut csv_reader = csv::Reader::from_reader(reader);
    for result in csv_reader.deserialize::<TravelRecord>() {
        let rec = result?;
        let (c, w) = (rec.client_id as usize, rec.warehouse_id as usize);
        if c >= clients || w >= warehouses {
            return Err(NetworkError::Instance(format!(
                "travel entry ({c}, {w}) outside {clients} clients × {warehouses} warehouses"
            )));
        }
        grid[c][w] = Some(rec.travel_secs);
    }

    let mut rows = Vec::with_capacity(clients);
    for (c, row) in grid.into_iter().enumerate() {
        let mut out = Vec::with_capacity(warehouses);
        for (w, cell) in row.into_iter().enumerate() {
            match cell {
                Some(secs) => out.push(secs),
                None => {
                    return Err(NetworkError::MissingEntry {
                        client:    ClientId(c as u32),
                        warehouse: WarehouseId(w as u32),
                    });
                }
            }
        }
        rows.push(out);
    }
    TravelTable::from_rows(rows)
}

// ── Internals ─────────────────────────────────────────────────────────────────

fn load_instance_with_base<R: Read>(reader: R, base: &Path) -> NetworkResult<Instance> {
    let record: InstanceRecord = serde_json::from_reader(reader)?;

    let warehouses: Vec<WarehouseSite> = record
        .warehouses
        .iter()
        .map(|w| WarehouseSite::new(w.location, w.couriers, w.pickers))
        .collect();

    let travel = if let Some(rows) = record.travel_secs {
        TravelTable::from_rows(rows)?
    } else if let Some(csv_path) = record.travel_csv {
        let full = if csv_path.is_absolute() { csv_path } else { base.join(csv_path) };
        debug!("loading travel table from {}", full.display());
        load_travel_csv(&full, record.clients.len(), warehouses.len())?
    } else if let Some(speed) = record.speed_mps {
        let sites: Vec<GeoPoint> = warehouses.iter().map(|w| w.location).collect();
        TravelTable::from_distances(&record.clients, &sites, speed)?
    } else {
        return Err(NetworkError::Instance(
            "instance needs one of travel_secs, travel_csv or speed_mps".into(),
        ));
    };

    Instance::new(warehouses, record.clients, travel)
}
