//! `OutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use log::warn;

use lm_core::DispatchConfig;
use lm_fleet::Registry;
use lm_sim::{RunSummary, SimObserver};

use crate::row::{OrderRow, RouteRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes the route and order logs of a run to any
/// [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After the run returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct OutputObserver<W: OutputWriter> {
    writer:                W,
    rejected_display_secs: u64,
    last_error:            Option<OutputError>,
}

impl<W: OutputWriter> OutputObserver<W> {
    pub fn new(writer: W, config: &DispatchConfig) -> Self {
        Self {
            writer,
            rejected_display_secs: config.rejected_display_secs,
            last_error:            None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!("output write failed: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for OutputObserver<W> {
    fn on_run_end(&mut self, registry: &Registry, summary: &RunSummary) {
        let routes: Vec<RouteRow> = registry.routes.iter().map(RouteRow::from).collect();
        let result = self.writer.write_routes(&routes);
        self.store_err(result);

        let orders: Vec<OrderRow> = registry
            .orders
            .iter()
            .map(|o| OrderRow::from_order(o, summary.latest_arrival, self.rejected_display_secs))
            .collect();
        let result = self.writer.write_orders(&orders);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
