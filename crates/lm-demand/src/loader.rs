//! CSV tape loader.
//!
//! Replays a recorded tape instead of drawing one.
//!
//! ```csv
//! order_time,client_id,commission_secs,service_secs
//! 0,3,120,45
//! 12,7,300,60
//! ```
//!
//! `order_time` is absolute simulated seconds; rows must be sorted by it.

use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use lm_core::{ClientId, SimTime};

use crate::{ArrivalRecord, ArrivalTape, DemandResult};

#[derive(Deserialize)]
struct TapeRecord {
    order_time:      u64,
    client_id:       u32,
    commission_secs: u64,
    service_secs:    u64,
}

/// Load a tape from a CSV file.
pub fn load_tape_csv(path: &Path) -> DemandResult<ArrivalTape> {
    let file = std::fs::File::open(path)?;
    load_tape_reader(file)
}

/// Like [`load_tape_csv`] but accepts any `Read` source.
pub fn load_tape_reader<R: Read>(reader: R) -> DemandResult<ArrivalTape> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in csv_reader.deserialize::<TapeRecord>() {
        let rec = result?;
        records.push(ArrivalRecord::new(
            SimTime(rec.order_time),
            ClientId(rec.client_id),
            rec.commission_secs,
            rec.service_secs,
        ));
    }
    debug!("loaded tape with {} arrivals", records.len());
    ArrivalTape::from_records(records)
}
