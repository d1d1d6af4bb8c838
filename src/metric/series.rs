use metric::spec::MetricSpec;
use std::slice;

/// The epochs of every retained snapshot, in the order they were folded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    epochs: Vec<i64>,
}

impl Timeline {
    /// Append an epoch.
    pub fn push(&mut self, epoch: i64) {
        self.epochs.push(epoch);
    }

    /// Number of epochs.
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    /// True when no snapshot was retained.
    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// The epochs, in fold order.
    pub fn as_slice(&self) -> &[i64] {
        &self.epochs
    }

    /// Iterate the epochs.
    pub fn iter(&self) -> slice::Iter<i64> {
        self.epochs.iter()
    }

    /// Seconds elapsed since the first epoch, one per epoch. Differences
    /// beyond the range of `i64` saturate.
    ///
    /// # Examples
    ///
    /// ```
    /// use jmxplot::metric::Timeline;
    ///
    /// let timeline: Timeline = vec![1000, 1010, 1030].into();
    /// assert_eq!(vec![0, 10, 30], timeline.relative());
    /// ```
    pub fn relative(&self) -> Vec<i64> {
        match self.epochs.first() {
            Some(&first) => self.epochs.iter().map(|e| e.saturating_sub(first)).collect(),
            None => Vec::new(),
        }
    }
}

impl From<Vec<i64>> for Timeline {
    fn from(epochs: Vec<i64>) -> Timeline {
        Timeline { epochs: epochs }
    }
}

/// The history of one configured metric
///
/// `raw_values` holds one value per retained snapshot. `derived_values` is
/// empty until rates are derived, after which it is the same length as
/// `raw_values`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    spec: MetricSpec,
    raw_values: Vec<f64>,
    derived_values: Vec<f64>,
}

impl MetricSeries {
    /// Create an empty series for `spec`.
    pub fn new(spec: MetricSpec) -> MetricSeries {
        MetricSeries {
            spec: spec,
            raw_values: Vec::new(),
            derived_values: Vec::new(),
        }
    }

    /// The spec this series was accumulated for.
    pub fn spec(&self) -> &MetricSpec {
        &self.spec
    }

    /// The metric name, as configured.
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Append the raw value of one retained snapshot.
    pub fn push_raw(&mut self, value: f64) {
        self.raw_values.push(value);
    }

    /// The raw values, one per retained snapshot.
    pub fn raw_values(&self) -> &[f64] {
        &self.raw_values
    }

    /// The reported values. Empty until derived.
    pub fn derived_values(&self) -> &[f64] {
        &self.derived_values
    }

    /// Install the derived values. Callers hand over exactly one value per
    /// raw value.
    pub fn set_derived(&mut self, derived: Vec<f64>) {
        debug_assert_eq!(derived.len(), self.raw_values.len());
        self.derived_values = derived;
    }
}

/// The finished product of a run: the retained timeline and the derived
/// series, in configuration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Epochs of the retained snapshots.
    pub timeline: Timeline,
    /// One series per configured metric.
    pub series: Vec<MetricSeries>,
}

impl Report {
    /// The metric names, in column order.
    pub fn names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name()).collect()
    }
}
