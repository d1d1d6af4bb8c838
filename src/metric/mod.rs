//! `metric` holds the configured metric specs and the series accumulated for
//! them.

mod series;
mod spec;

pub use self::series::{MetricSeries, Report, Timeline};
pub use self::spec::{parse_metric_specs, Components, MetricKind, MetricSpec,
                     MetricSpecs, SpecError};

use seahash::SeaHasher;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;

/// `HashMap` keyed with seahash, used for the raw samples of a snapshot.
pub type HashMapSea<K, V> = HashMap<K, V, BuildHasherDefault<SeaHasher>>;

/// The raw values extracted from one snapshot, keyed by raw metric name.
pub type Samples = HashMapSea<String, f64>;
