use std::error;
use std::fmt;
use std::slice;
use std::str::FromStr;

/// How the raw values of a metric are turned into plotted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// A cumulative value. Reported as the per-second rate between
    /// consecutive snapshots.
    Counter,
    /// An already-instantaneous value. Reported unchanged.
    Rate,
}

impl FromStr for MetricKind {
    type Err = ();

    fn from_str(s: &str) -> Result<MetricKind, ()> {
        match s.to_lowercase().as_str() {
            "counter" => Ok(MetricKind::Counter),
            "rate" => Ok(MetricKind::Rate),
            _ => Err(()),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MetricKind::Counter => write!(f, "counter"),
            MetricKind::Rate => write!(f, "rate"),
        }
    }
}

/// A configured metric
///
/// The name of a `MetricSpec` may name several raw metrics joined by `+`, in
/// which case the metric's value in a snapshot is the sum of those raw
/// values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSpec {
    name: String,
    kind: MetricKind,
    is_sum: bool,
}

impl MetricSpec {
    /// Make a `MetricSpec`
    ///
    /// # Examples
    ///
    /// ```
    /// use jmxplot::metric::{MetricKind, MetricSpec};
    ///
    /// let spec = MetricSpec::new("ReadCount+WriteCount", MetricKind::Counter);
    /// assert!(spec.is_sum());
    /// assert_eq!(
    ///     vec!["ReadCount", "WriteCount"],
    ///     spec.components().collect::<Vec<&str>>()
    /// );
    /// ```
    pub fn new<S>(name: S, kind: MetricKind) -> MetricSpec
    where
        S: Into<String>,
    {
        let name = name.into();
        let is_sum = name.contains('+');
        MetricSpec {
            name: name,
            kind: kind,
            is_sum: is_sum,
        }
    }

    /// The name as configured, `+` included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the metric is a counter or a rate.
    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// True when the metric is the sum of two or more raw metrics.
    pub fn is_sum(&self) -> bool {
        self.is_sum
    }

    /// The raw metric names this metric is computed from. A plain metric has
    /// exactly one component, its own name.
    pub fn components(&self) -> Components {
        Components {
            inner: self.name.split('+'),
        }
    }
}

/// Iterator over the raw names of a `MetricSpec`, see
/// `MetricSpec::components`.
pub struct Components<'a> {
    inner: ::std::str::Split<'a, char>,
}

impl<'a> Iterator for Components<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }
}

/// Errors raised while parsing a metric spec string.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecError {
    /// The spec has no `:` between name and kind.
    MissingSeparator(String),
    /// The kind is neither `counter` nor `rate`.
    UnknownKind {
        /// The full spec string.
        spec: String,
        /// The offending kind.
        kind: String,
    },
    /// Nothing precedes the `:`.
    EmptyName(String),
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SpecError::MissingSeparator(ref spec) => write!(
                f,
                "metric '{}' must be specified as 'name:type'",
                spec
            ),
            SpecError::UnknownKind { ref spec, ref kind } => write!(
                f,
                "metric '{}' has type '{}', expected 'counter' or 'rate'",
                spec, kind
            ),
            SpecError::EmptyName(ref spec) => {
                write!(f, "metric '{}' has an empty name", spec)
            }
        }
    }
}

impl error::Error for SpecError {}

impl FromStr for MetricSpec {
    type Err = SpecError;

    /// Parse `name:type`. The last `:` separates name from type so that JMX
    /// object names, which contain `:` themselves, are usable as names.
    fn from_str(spec: &str) -> Result<MetricSpec, SpecError> {
        let idx = match spec.rfind(':') {
            Some(idx) => idx,
            None => return Err(SpecError::MissingSeparator(spec.to_string())),
        };
        let (name, kind) = (&spec[..idx], &spec[idx + 1..]);
        if name.is_empty() {
            return Err(SpecError::EmptyName(spec.to_string()));
        }
        match kind.parse::<MetricKind>() {
            Ok(kind) => Ok(MetricSpec::new(name, kind)),
            Err(()) => Err(SpecError::UnknownKind {
                spec: spec.to_string(),
                kind: kind.to_string(),
            }),
        }
    }
}

/// The configured metrics, in configuration order
///
/// `MetricSpecs` is keyed by metric name. Output columns follow the order in
/// which names were first inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSpecs {
    specs: Vec<MetricSpec>,
}

impl MetricSpecs {
    /// Insert a spec. A spec whose name is already present replaces the
    /// existing one in its original position.
    pub fn insert(&mut self, spec: MetricSpec) {
        match self.specs.iter().position(|s| s.name == spec.name) {
            Some(idx) => self.specs[idx] = spec,
            None => self.specs.push(spec),
        }
    }

    /// Look up a spec by name.
    pub fn get(&self, name: &str) -> Option<&MetricSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Number of specs.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when no metric is configured.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Iterate the specs in configuration order.
    pub fn iter(&self) -> slice::Iter<MetricSpec> {
        self.specs.iter()
    }

    /// The spec names in configuration order.
    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.name()).collect()
    }
}

impl<'a> IntoIterator for &'a MetricSpecs {
    type Item = &'a MetricSpec;
    type IntoIter = slice::Iter<'a, MetricSpec>;

    fn into_iter(self) -> slice::Iter<'a, MetricSpec> {
        self.specs.iter()
    }
}

/// Parse metric spec strings
///
/// Each string is `name:type` where type is `counter` or `rate`, matched
/// without regard to case. The first malformed string aborts parsing. The
/// components of compound names are not checked here; a component that never
/// shows up in a snapshot causes that snapshot to be dropped later on.
///
/// The last `:` of a string separates name from type, so a name may itself
/// contain `:`. Dump lines, however, end their key at the first `:`, so such a
/// name never matches a sample and every snapshot would be dropped. A warning
/// is logged for each such component.
///
/// # Examples
///
/// ```
/// use jmxplot::metric::{parse_metric_specs, MetricKind};
///
/// let specs = parse_metric_specs(&["Count:counter", "a+b:RATE"]).unwrap();
/// assert_eq!(vec!["Count", "a+b"], specs.names());
/// assert_eq!(Some(MetricKind::Rate), specs.get("a+b").map(|s| s.kind()));
/// ```
pub fn parse_metric_specs<S>(specs: &[S]) -> Result<MetricSpecs, SpecError>
where
    S: AsRef<str>,
{
    let mut parsed = MetricSpecs::default();
    for spec in specs {
        let spec = spec.as_ref().parse::<MetricSpec>()?;
        for component in spec.components().filter(|c| c.contains(':')) {
            warn!(
                "Metric '{}' will never be found: '{}' contains ':', which ends a key in a JMX dump",
                spec.name(),
                component
            );
        }
        parsed.insert(spec);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use quickcheck::{QuickCheck, TestResult};
    use test_log;

    #[test]
    fn parse_counter_and_rate() {
        let specs = parse_metric_specs(&["fst:counter", "snd:rate"]).unwrap();

        assert_eq!(2, specs.len());
        assert_eq!(MetricKind::Counter, specs.get("fst").unwrap().kind());
        assert_eq!(MetricKind::Rate, specs.get("snd").unwrap().kind());
        assert!(!specs.get("fst").unwrap().is_sum());
    }

    #[test]
    fn parse_kind_ignores_case() {
        let specs = parse_metric_specs(&["fst:Counter", "snd:RATE"]).unwrap();

        assert_eq!(MetricKind::Counter, specs.get("fst").unwrap().kind());
        assert_eq!(MetricKind::Rate, specs.get("snd").unwrap().kind());
    }

    #[test]
    fn parse_compound() {
        let specs = parse_metric_specs(&["a+b+c:counter"]).unwrap();
        let spec = specs.get("a+b+c").unwrap();

        assert!(spec.is_sum());
        assert_eq!(vec!["a", "b", "c"], spec.components().collect::<Vec<_>>());
    }

    #[test]
    fn parse_name_containing_separator() {
        test_log::start();
        let specs =
            parse_metric_specs(&["java.lang:type=Threading:rate"]).unwrap();

        assert_eq!(vec!["java.lang:type=Threading"], specs.names());
        let warnings = test_log::messages(Level::Warn);
        assert_eq!(1, warnings.len());
        assert!(warnings[0].contains("'java.lang:type=Threading'"));
    }

    #[test]
    fn parse_plain_name_does_not_warn() {
        test_log::start();
        parse_metric_specs(&["fst:counter", "a+b:rate"]).unwrap();

        assert!(test_log::messages(Level::Warn).is_empty());
    }

    #[test]
    fn reject_missing_separator() {
        assert_eq!(
            Err(SpecError::MissingSeparator("fst".to_string())),
            parse_metric_specs(&["snd:rate", "fst"])
        );
    }

    #[test]
    fn reject_unknown_kind() {
        assert_eq!(
            Err(SpecError::UnknownKind {
                spec: "fst:gauge".to_string(),
                kind: "gauge".to_string(),
            }),
            parse_metric_specs(&["fst:gauge"])
        );
    }

    #[test]
    fn reject_empty_name() {
        assert_eq!(
            Err(SpecError::EmptyName(":rate".to_string())),
            parse_metric_specs(&[":rate"])
        );
    }

    #[test]
    fn duplicate_name_keeps_position() {
        let specs =
            parse_metric_specs(&["fst:counter", "snd:rate", "fst:rate"]).unwrap();

        assert_eq!(vec!["fst", "snd"], specs.names());
        assert_eq!(MetricKind::Rate, specs.get("fst").unwrap().kind());
    }

    #[test]
    fn parse_preserves_order() {
        fn inner(names: Vec<String>) -> TestResult {
            let mut unique: Vec<String> = Vec::new();
            for name in names {
                let name: String =
                    name.chars().filter(|c| c.is_alphanumeric()).collect();
                if name.is_empty() || unique.contains(&name) {
                    continue;
                }
                unique.push(name);
            }
            let specs: Vec<String> =
                unique.iter().map(|n| format!("{}:counter", n)).collect();
            let parsed = parse_metric_specs(&specs).unwrap();
            let names: Vec<String> =
                parsed.names().iter().map(|n| n.to_string()).collect();
            assert_eq!(unique, names);
            TestResult::passed()
        }
        QuickCheck::new()
            .tests(1000)
            .max_tests(10000)
            .quickcheck(inner as fn(Vec<String>) -> TestResult);
    }
}
