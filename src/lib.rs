//! jmxplot turns a directory of periodic JMX dumps into time series. Each dump
//! is a file named by the UNIX epoch it was taken at. Counter metrics are
//! reported as their per-second rate between dumps, rate metrics as they
//! are. The series can be written out as CSV and a single series can be
//! plotted on the terminal.
//!
//! A run goes:
//!
//!  * parse the metric specs, see `metric::parse_metric_specs`;
//!  * find the dumps and scan each one, see `source` and `protocols::jmx`;
//!  * fold every dump into the per-metric series, see `accumulator`;
//!  * derive rates, see `rate`;
//!  * hand the `Report` to the sinks, see `sink`.
//!
//! `pipeline::run` does all of the above.
#![allow(unknown_lints)]
#![deny(trivial_numeric_casts, missing_docs, unstable_features, unused_import_braces)]
extern crate clap;
extern crate csv;
extern crate glob;
#[macro_use]
extern crate log;
extern crate seahash;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate toml;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
extern crate tempdir;

pub mod accumulator;
pub mod config;
pub mod metric;
pub mod pipeline;
pub mod protocols;
pub mod rate;
pub mod sink;
pub mod source;

#[cfg(test)]
mod test_log;
