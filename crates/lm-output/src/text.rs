//! Space-separated text backend.
//!
//! Creates two files:
//! - `routes.txt`
//! - `orders.txt`

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::writer::OutputWriter;
use crate::{OrderRow, OutputResult, RouteRow, fmt_g};

/// `csv` writer configured for the plain space-separated format: no
/// quoting, no header, `\n` line ends.
pub(crate) fn space_separated<W: Write>(inner: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b' ')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .flexible(true)
        .from_writer(inner)
}

/// Writes the route and order logs of one run.
pub struct TextWriter {
    routes:   Writer<File>,
    orders:   Writer<File>,
    finished: bool,
}

impl TextWriter {
    /// Create (truncating) the two files at the given paths.
    pub fn new(routes: &Path, orders: &Path) -> OutputResult<Self> {
        Ok(Self {
            routes:   space_separated(File::create(routes)?),
            orders:   space_separated(File::create(orders)?),
            finished: false,
        })
    }

    /// `routes.txt` and `orders.txt` inside `dir`.
    pub fn in_dir(dir: &Path) -> OutputResult<Self> {
        Self::new(&dir.join("routes.txt"), &dir.join("orders.txt"))
    }
}

impl OutputWriter for TextWriter {
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        for row in rows {
            self.routes.write_record(&[
                row.start.to_string(),
                row.arrival.to_string(),
                fmt_g(row.from_lat),
                fmt_g(row.from_lon),
                fmt_g(row.to_lat),
                fmt_g(row.to_lon),
            ])?;
        }
        Ok(())
    }

    fn write_orders(&mut self, rows: &[OrderRow]) -> OutputResult<()> {
        for row in rows {
            self.orders.write_record(&[
                row.ordered_at.to_string(),
                row.shown_until.to_string(),
                fmt_g(row.lat),
                fmt_g(row.lon),
                (row.accepted as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.routes.flush()?;
        self.orders.flush()?;
        Ok(())
    }
}
