//! Turn raw histories into reported values.
//!
//! Counters become per-second rates between consecutive snapshots. Rates are
//! reported as they are.

use metric::MetricKind;
use std::error;
use std::fmt;

/// Errors raised while deriving counter rates.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Two consecutive snapshots share an epoch; the rate over a zero-length
    /// interval is undefined.
    DegenerateInterval {
        /// Index of the second snapshot of the pair.
        index: usize,
        /// The shared epoch.
        epoch: i64,
    },
    /// A snapshot is older than the one before it.
    OutOfOrder {
        /// Index of the second snapshot of the pair.
        index: usize,
        /// Epoch of the earlier snapshot.
        previous: i64,
        /// Epoch of the later snapshot.
        epoch: i64,
    },
    /// The interval between two snapshots does not fit in an `i64`.
    IntervalOverflow {
        /// Index of the second snapshot of the pair.
        index: usize,
        /// Epoch of the earlier snapshot.
        previous: i64,
        /// Epoch of the later snapshot.
        epoch: i64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::DegenerateInterval { index, epoch } => write!(
                f,
                "snapshots {} and {} share epoch {}, rate is undefined",
                index - 1,
                index,
                epoch
            ),
            Error::OutOfOrder {
                index,
                previous,
                epoch,
            } => write!(
                f,
                "snapshot {} at epoch {} precedes snapshot {} at epoch {}",
                index, epoch, index - 1, previous
            ),
            Error::IntervalOverflow {
                index,
                previous,
                epoch,
            } => write!(
                f,
                "interval between snapshot {} at epoch {} and snapshot {} at epoch {} overflows",
                index - 1, previous, index, epoch
            ),
        }
    }
}

impl error::Error for Error {}

/// The per-second rate of a counter going from `previous` to `current` over
/// `seconds`. A counter that went down was reset or wrapped; that interval
/// reports zero rather than a negative rate.
#[inline]
fn counter_rate(previous: f64, current: f64, seconds: i64) -> f64 {
    let delta = current - previous;
    if delta > 0.0 {
        delta / (seconds as f64)
    } else {
        0.0
    }
}

/// Derive the reported values of one series
///
/// `epochs` and `raw` are parallel, one entry per retained snapshot. For
/// `MetricKind::Rate` the raw values are returned unchanged. For
/// `MetricKind::Counter` the first value is `0.0`, the rate before the first
/// snapshot being unknowable, and every later value is the clamped rate over
/// the preceding interval. Counters need strictly increasing epochs.
///
/// # Examples
///
/// ```
/// use jmxplot::metric::MetricKind;
/// use jmxplot::rate::derive;
///
/// let derived = derive(
///     MetricKind::Counter,
///     &[1000, 1010, 1020],
///     &[100.0, 150.0, 140.0],
/// ).unwrap();
/// assert_eq!(vec![0.0, 5.0, 0.0], derived);
/// ```
pub fn derive(kind: MetricKind, epochs: &[i64], raw: &[f64]) -> Result<Vec<f64>, Error> {
    debug_assert_eq!(epochs.len(), raw.len());
    match kind {
        MetricKind::Rate => Ok(raw.to_vec()),
        MetricKind::Counter => {
            let mut derived = Vec::with_capacity(raw.len());
            for idx in 0..raw.len() {
                if idx == 0 {
                    derived.push(0.0);
                    continue;
                }
                let (previous, epoch) = (epochs[idx - 1], epochs[idx]);
                if epoch == previous {
                    return Err(Error::DegenerateInterval {
                        index: idx,
                        epoch: epoch,
                    });
                } else if epoch < previous {
                    return Err(Error::OutOfOrder {
                        index: idx,
                        previous: previous,
                        epoch: epoch,
                    });
                }
                let seconds = match epoch.checked_sub(previous) {
                    Some(seconds) => seconds,
                    None => {
                        return Err(Error::IntervalOverflow {
                            index: idx,
                            previous: previous,
                            epoch: epoch,
                        })
                    }
                };
                derived.push(counter_rate(raw[idx - 1], raw[idx], seconds));
            }
            Ok(derived)
        }
    }
}
