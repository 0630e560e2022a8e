//! The `OutputWriter` trait implemented by run-level writers.

use crate::{OrderRow, OutputResult, RouteRow};

/// Sink for the per-run route and order logs.
///
/// Errors returned here are kept by the observer and retrieved with
/// [`OutputObserver::take_error`][crate::OutputObserver::take_error].
pub trait OutputWriter {
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()>;

    fn write_orders(&mut self, rows: &[OrderRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
