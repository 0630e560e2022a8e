//! `lm-output` — text output for the last-mile dispatch simulator.
//!
//! All files are space-separated, one record per line, `\n`-terminated.
//! Reals are printed with 6 significant digits ([`fmt_g`]).
//!
//! | File               | Writer                        | Line format                                         |
//! |--------------------|-------------------------------|-----------------------------------------------------|
//! | `routes.txt`       | [`TextWriter`]                | `start arrival fromLat fromLon toLat toLon`         |
//! | `orders.txt`       | [`TextWriter`]                | `orderTime shownUntil lat lon accepted`             |
//! | `statsData_*.txt`  | [`write_stats`]               | `TotalCosts RejectionRate MeanWaitingTime MaxWaitingTime` |
//! | `averageCosts_*.txt` | [`write_costs`]             | `TotalCosts RejectionRate`                          |
//!
//! Routes and orders are driven by [`OutputObserver`], which implements
//! `lm_sim::SimObserver` and writes once per run at `on_run_end`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lm_output::{OutputObserver, TextWriter};
//!
//! let writer = TextWriter::in_dir(Path::new("./animation"))?;
//! let mut obs = OutputObserver::new(writer, &config);
//! run_nearest_warehouse(&instance, &config, &mut obs)?;
//! obs.take_error().map(|e| warn!("output error: {e}"));
//! ```

pub mod error;
pub mod format;
pub mod observer;
pub mod row;
pub mod stats;
pub mod text;
pub mod writer;

#[cfg(test)]
mod tests;

pub use error::{OutputError, OutputResult};
pub use format::fmt_g;
pub use observer::OutputObserver;
pub use row::{CostsRow, OrderRow, RouteRow, StatsRow};
pub use stats::{costs_file_name, stats_file_name, write_costs, write_stats};
pub use text::TextWriter;
pub use writer::OutputWriter;
