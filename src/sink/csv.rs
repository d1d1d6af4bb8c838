use csv::Writer;
use metric::Report;
use sink::Sink;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Tabular sink
///
/// Writes the report as comma separated values: a header naming every metric
/// after the `Seconds Elapsed` column, then one row per retained snapshot.
pub struct Csv {
    path: PathBuf,
}

/// Configuration for the `Csv` sink.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CsvConfig {
    /// The file to write. It is created, or truncated, on delivery.
    pub path: PathBuf,
}

impl Csv {
    /// Create a new `Csv` sink
    pub fn new(config: CsvConfig) -> Csv {
        Csv { path: config.path }
    }
}

/// Write `report` to `out` in CSV form
///
/// The first column is the number of seconds elapsed since the first retained
/// snapshot; the remaining columns are the derived values of every metric in
/// configuration order.
///
/// # Examples
///
/// ```
/// use jmxplot::accumulator::Accumulator;
/// use jmxplot::metric::{parse_metric_specs, Samples};
/// use jmxplot::sink::write_report;
///
/// let specs = parse_metric_specs(&["Count:counter"]).unwrap();
/// let mut acc = Accumulator::new(specs);
/// for &(epoch, count) in &[(1000, 100.0), (1010, 150.0)] {
///     let mut samples = Samples::default();
///     samples.insert("Count".to_string(), count);
///     acc.fold(epoch, &samples);
/// }
/// let report = acc.finish().unwrap();
///
/// let mut out = Vec::new();
/// write_report(&mut out, &report).unwrap();
/// assert_eq!("Seconds Elapsed, Count\n0,0\n10,5\n", String::from_utf8(out).unwrap());
/// ```
pub fn write_report<W>(out: W, report: &Report) -> io::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(out);
    let mut header = vec!["Seconds Elapsed".to_string()];
    header.extend(report.names().iter().map(|name| format!(" {}", name)));
    writer.write_record(&header)?;
    for (idx, elapsed) in report.timeline.relative().iter().enumerate() {
        let mut row = vec![elapsed.to_string()];
        row.extend(
            report
                .series
                .iter()
                .map(|series| series.derived_values()[idx].to_string()),
        );
        writer.write_record(&row)?;
    }
    writer.flush()
}

impl Sink for Csv {
    fn name(&self) -> &str {
        "csv"
    }

    fn deliver(&mut self, report: &Report) -> io::Result<()> {
        write_report(fs::File::create(&self.path)?, report)?;
        info!(
            "Wrote {} rows to {}",
            report.timeline.len(),
            self.path.display()
        );
        Ok(())
    }
}
