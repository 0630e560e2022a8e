//! Per-experiment statistics files.
//!
//! Both files start with a header line of column names, each followed by a
//! space (so the header ends in a trailing space), then one line per row.

use std::fs::File;
use std::path::Path;

use log::info;

use crate::text::space_separated;
use crate::{CostsRow, OutputResult, StatsRow, fmt_g};

const STATS_HEADER: [&str; 5] = ["TotalCosts", "RejectionRate", "MeanWaitingTime", "MaxWaitingTime", ""];
const COSTS_HEADER: [&str; 3] = ["TotalCosts", "RejectionRate", ""];

/// One line per evaluation epoch.
pub fn write_stats(path: &Path, rows: &[StatsRow]) -> OutputResult<()> {
    info!("writing {} stats rows to {}", rows.len(), path.display());
    let mut w = space_separated(File::create(path)?);
    w.write_record(STATS_HEADER)?;
    for row in rows {
        w.write_record(&[
            fmt_g(row.total_costs),
            fmt_g(row.rejection_rate),
            row.mean_waiting_secs.to_string(),
            row.max_waiting_secs.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// One line per training report interval.
pub fn write_costs(path: &Path, rows: &[CostsRow]) -> OutputResult<()> {
    info!("writing {} cost rows to {}", rows.len(), path.display());
    let mut w = space_separated(File::create(path)?);
    w.write_record(COSTS_HEADER)?;
    for row in rows {
        w.write_record(&[fmt_g(row.total_costs), fmt_g(row.rejection_rate)])?;
    }
    w.flush()?;
    Ok(())
}

/// `statsData_<penalty>_<interArrival>_<label>.txt`, reals with six decimals.
pub fn stats_file_name(penalty_secs: u64, mean_inter_arrival_secs: f64, label: &str) -> String {
    format!("statsData_{penalty_secs}_{mean_inter_arrival_secs:.6}_{label}.txt")
}

/// `averageCosts_<penalty>_<interArrival>_<lambdaT>_<lambdaS>.txt`
pub fn costs_file_name(penalty_secs: u64, mean_inter_arrival_secs: f64, lambda_t: f64, lambda_s: f64) -> String {
    format!("averageCosts_{penalty_secs}_{mean_inter_arrival_secs:.6}_{lambda_t:.6}_{lambda_s:.6}.txt")
}
