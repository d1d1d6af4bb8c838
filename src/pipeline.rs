//! The pipeline drives a run from metric specs to sinks.
//!
//! Specs are parsed before any snapshot is read. Snapshots are then read and
//! folded one at a time, oldest first, and the finished `Report` is handed to
//! every sink in turn.

use accumulator::{Accumulator, Fold};
use metric::{parse_metric_specs, Report, SpecError};
use rate;
use sink::Sink;
use source;
use std::error;
use std::fmt;
use std::io;

/// Every way a run can fail.
#[derive(Debug)]
pub enum Error {
    /// A metric spec is malformed.
    Spec(SpecError),
    /// Snapshots could not be found or read.
    Source(source::Error),
    /// The input pattern matched no snapshot.
    NoSnapshots(String),
    /// Counter rates could not be derived.
    Rate(rate::Error),
    /// A sink failed to deliver.
    Sink(String, io::Error),
}

impl From<SpecError> for Error {
    fn from(e: SpecError) -> Error {
        Error::Spec(e)
    }
}

impl From<source::Error> for Error {
    fn from(e: source::Error) -> Error {
        Error::Source(e)
    }
}

impl From<rate::Error> for Error {
    fn from(e: rate::Error) -> Error {
        Error::Rate(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Spec(ref e) => write!(f, "{}", e),
            Error::Source(ref e) => write!(f, "{}", e),
            Error::NoSnapshots(ref pattern) => {
                write!(f, "no snapshot files match '{}'", pattern)
            }
            Error::Rate(ref e) => write!(f, "{}", e),
            Error::Sink(ref name, ref e) => write!(f, "{} sink failed: {}", name, e),
        }
    }
}

impl error::Error for Error {}

/// Run the pipeline
///
/// `pattern` globs the snapshot files and `specs` are the metric spec
/// strings. A snapshot lacking any raw key some spec needs is dropped with a
/// warning. Any other failure aborts the run before the sinks are reached.
pub fn run<S>(pattern: &str, specs: &[S], sinks: &mut [Box<dyn Sink>]) -> Result<Report, Error>
where
    S: AsRef<str>,
{
    let specs = parse_metric_specs(specs)?;
    let snapshots = source::discover(pattern)?;
    if snapshots.is_empty() {
        return Err(Error::NoSnapshots(pattern.to_string()));
    }

    let mut acc = Accumulator::new(specs);
    let mut dropped = 0;
    for snapshot in &snapshots {
        let extract = snapshot.read()?;
        for warning in &extract.warnings {
            trace!("{}: {}", snapshot.path.display(), warning);
        }
        debug!(
            "{}: {} samples, {} lines skipped",
            snapshot.path.display(),
            extract.samples.len(),
            extract.warnings.len()
        );
        if let Fold::Dropped(missing) = acc.fold(snapshot.epoch, &extract.samples) {
            dropped += 1;
            warn!(
                "Ignoring {}, missing metrics: {}",
                snapshot.path.display(),
                missing.join(", ")
            );
        }
    }
    info!(
        "Retained {} of {} snapshots",
        snapshots.len() - dropped,
        snapshots.len()
    );

    let report = acc.finish()?;
    for sink in sinks.iter_mut() {
        let name = sink.name().to_string();
        sink.deliver(&report).map_err(|e| Error::Sink(name, e))?;
    }
    Ok(report)
}
