//! A 'sink' is a consumer of the finished `Report`. The tabular writer and
//! the plot are independent; either, both or neither may be configured for a
//! run.

use metric::Report;
use std::io;

mod csv;
mod plot;

pub use self::csv::{write_report, Csv, CsvConfig};
pub use self::plot::{render, Plot, PlotConfig};

/// A consumer of a finished `Report`.
pub trait Sink {
    /// The sink's name, for diagnostics.
    fn name(&self) -> &str;
    /// Consume the report. An error here aborts the run.
    fn deliver(&mut self, report: &Report) -> io::Result<()>;
}
