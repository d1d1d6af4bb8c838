//! The accumulator folds snapshots into per-metric series.
//!
//! A snapshot either contributes a value to every configured metric or it
//! contributes nothing at all. This keeps the timeline and every series the
//! same length at all times.

use metric::{MetricSeries, MetricSpec, MetricSpecs, Report, Samples, Timeline};
use rate;

/// The outcome of folding one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Fold {
    /// One value per configured metric, in configuration order.
    Values(Vec<f64>),
    /// The raw keys the snapshot lacks. The snapshot contributed nothing.
    Dropped(Vec<String>),
}

/// The value of `spec` in `samples`, None if any component is missing.
fn value_of(spec: &MetricSpec, samples: &Samples) -> Option<f64> {
    let mut value = 0.0;
    for component in spec.components() {
        value += *samples.get(component)?;
    }
    Some(value)
}

/// Compute the value of every spec from one snapshot's samples
///
/// Compound specs sum their components. Every missing raw key is reported,
/// not only the first, each once.
///
/// # Examples
///
/// ```
/// use jmxplot::accumulator::{collect, Fold};
/// use jmxplot::metric::{parse_metric_specs, Samples};
///
/// let specs = parse_metric_specs(&["a+b:counter", "c:rate"]).unwrap();
/// let mut samples = Samples::default();
/// samples.insert("a".to_string(), 10.0);
/// samples.insert("b".to_string(), 20.0);
///
/// assert_eq!(Fold::Dropped(vec!["c".to_string()]), collect(&specs, &samples));
///
/// samples.insert("c".to_string(), 0.5);
/// assert_eq!(Fold::Values(vec![30.0, 0.5]), collect(&specs, &samples));
/// ```
pub fn collect(specs: &MetricSpecs, samples: &Samples) -> Fold {
    let mut values = Vec::with_capacity(specs.len());
    let mut missing: Vec<String> = Vec::new();
    for spec in specs {
        match value_of(spec, samples) {
            Some(value) => values.push(value),
            None => {
                for component in spec.components() {
                    if !samples.contains_key(component)
                        && !missing.iter().any(|m| m == component)
                    {
                        missing.push(component.to_string());
                    }
                }
            }
        }
    }
    if missing.is_empty() {
        Fold::Values(values)
    } else {
        Fold::Dropped(missing)
    }
}

/// Accumulates the raw history of every configured metric across snapshots.
#[derive(Debug, Clone)]
pub struct Accumulator {
    specs: MetricSpecs,
    series: Vec<MetricSeries>,
    timeline: Timeline,
}

impl Accumulator {
    /// Create an `Accumulator` with one empty series per spec.
    pub fn new(specs: MetricSpecs) -> Accumulator {
        let series = specs.iter().cloned().map(MetricSeries::new).collect();
        Accumulator {
            specs: specs,
            series: series,
            timeline: Timeline::default(),
        }
    }

    /// Fold one snapshot taken at `epoch`
    ///
    /// On `Fold::Values` every series gains one raw value and the timeline
    /// gains `epoch`. On `Fold::Dropped` nothing changes.
    pub fn fold(&mut self, epoch: i64, samples: &Samples) -> Fold {
        let fold = collect(&self.specs, samples);
        if let Fold::Values(ref values) = fold {
            for (series, value) in self.series.iter_mut().zip(values.iter()) {
                series.push_raw(*value);
                debug!("Saved metric value: {}={}", series.name(), value);
            }
            self.timeline.push(epoch);
        }
        fold
    }

    /// The configured specs.
    pub fn specs(&self) -> &MetricSpecs {
        &self.specs
    }

    /// The series accumulated so far, in configuration order.
    pub fn series(&self) -> &[MetricSeries] {
        &self.series
    }

    /// The epochs of the snapshots retained so far.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// End accumulation and derive the reported value of every series.
    pub fn finish(mut self) -> Result<Report, rate::Error> {
        for series in &mut self.series {
            let derived = rate::derive(
                series.spec().kind(),
                self.timeline.as_slice(),
                series.raw_values(),
            )?;
            for (idx, value) in derived.iter().enumerate() {
                trace!("Iter={}, Value of {}={}", idx + 1, series.name(), value);
            }
            series.set_derived(derived);
        }
        Ok(Report {
            timeline: self.timeline,
            series: self.series,
        })
    }
}
