//! Provides the CLI option parser
//!
//! Used to parse the argv/config file into a struct that the pipeline can
//! consume and use as configuration data.

use clap;
use clap::{App, Arg, ArgMatches};
use sink::{CsvConfig, PlotConfig};
use std::error;
use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use toml;

const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

/// Long-form usage, printed with `--help` and after usage errors.
pub const USAGE: &str = "\
Plot one or more metrics over time from multiple JMX files.

It is assumed that each file is a single JMX dump and each file name is the
corresponding UNIX epoch.

Each metric must be specified as name:type, where type is either 'rate' or
'counter'. Counters are reported as their per-second rate between snapshots,
rates are reported as they are.

A metric can also be specified as 'name1+name2:type' in which case the values
are summed.";

fn default_version() -> String {
    VERSION.unwrap_or("unknown").to_string()
}

/// Configuration for a jmxplot run
///
/// This struct is what we construct from parsing the command line and, when
/// given, the configuration file. Please see documentation on `parse_args` in
/// this module for more details.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// Glob pattern naming the snapshot files.
    pub input: String,
    /// See `sink::Csv`. No CSV is written when absent.
    pub csv: Option<CsvConfig>,
    /// See `sink::Plot`.
    pub plot: PlotConfig,
    /// Metric specs, `name[+name...]:counter|rate`, in output order.
    pub metrics: Vec<String>,
    /// The verbosity setting of jmxplot. The higher the value the more chatty
    /// jmxplot gets.
    pub verbose: u64,
    /// jmxplot version string. This is set automatically.
    pub version: String,
}

/// Configuration as read from a file, before the command line is overlaid.
#[derive(Debug, Clone, PartialEq)]
pub struct FileConfig {
    /// `input`
    pub input: Option<String>,
    /// `output`
    pub output: Option<PathBuf>,
    /// `metrics`
    pub metrics: Vec<String>,
    /// `[plot]`
    pub plot: PlotConfig,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            input: None,
            output: None,
            metrics: Vec::new(),
            plot: PlotConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum Error {
    /// The command line is malformed.
    Usage(String),
    /// `--help` or `--version` was requested; the message is the text to
    /// print.
    Info(String),
    /// The configuration file could not be read.
    Io(PathBuf, io::Error),
    /// The configuration file is not valid TOML.
    Toml(toml::de::Error),
    /// A key of the configuration file has the wrong type.
    Invalid(&'static str, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Usage(ref msg) | Error::Info(ref msg) => write!(f, "{}", msg),
            Error::Io(ref path, ref e) => {
                write!(f, "could not read config {}: {}", path.display(), e)
            }
            Error::Toml(ref e) => write!(f, "could not parse config: {}", e),
            Error::Invalid(key, ref msg) => write!(f, "config key '{}' {}", key, msg),
        }
    }
}

impl error::Error for Error {}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Error {
        Error::Toml(e)
    }
}

impl From<clap::Error> for Error {
    fn from(e: clap::Error) -> Error {
        match e.kind {
            clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed => {
                Error::Info(e.message)
            }
            _ => Error::Usage(e.message),
        }
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("jmxplot")
        .version(VERSION.unwrap_or("unknown"))
        .about("Plot metrics over time from multiple JMX dumps")
        .after_help(USAGE)
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .value_name("input-files-pattern")
                .help("Glob matching the JMX dumps, one dump per file.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("output-file.csv")
                .help("Write the derived values to this CSV file.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config-file")
                .long("config")
                .short("C")
                .value_name("config")
                .help("A TOML config file to feed in.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("no-plot")
                .long("no-plot")
                .help("Do not draw the plot."),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Turn on verbose output."),
        )
        .arg(
            Arg::with_name("metrics")
                .value_name("metric:type")
                .help("Metrics to report, e.g. 'Count:counter' or 'a+b:rate'.")
                .multiple(true)
                .index(1),
        )
}

/// Parse the jmxplot configuration arguments
///
/// This function will read the environment arguments and construct an
/// `Args`. See `parse_args_from` for the error cases.
pub fn parse_args() -> Result<Args, Error> {
    parse_args_from(::std::env::args_os())
}

/// Parse the jmxplot configuration from the given arguments
///
/// The first argument is the program name. When `--config` names a file its
/// settings are read first and the command line overrides them: `-i`, `-o`
/// and `--no-plot` individually, the positional metrics as a whole when any
/// are given. An input pattern is required from one place or the other.
pub fn parse_args_from<I, T>(argv: I) -> Result<Args, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = app().get_matches_from_safe(argv)?;
    let verbose = matches.occurrences_of("verbose");

    let file = match matches.value_of("config-file") {
        Some(filename) => read_config_file(Path::new(filename))?,
        None => FileConfig::default(),
    };
    merge(&matches, file, verbose)
}

fn merge(matches: &ArgMatches, file: FileConfig, verbose: u64) -> Result<Args, Error> {
    let input = match matches.value_of("input").map(|s| s.to_string()).or(file.input) {
        Some(input) => input,
        None => {
            return Err(Error::Usage(
                "an input files pattern must be given with -i".to_string(),
            ))
        }
    };
    let output = matches.value_of("output").map(PathBuf::from).or(file.output);
    let metrics = match matches.values_of("metrics") {
        Some(vals) => vals.map(|s| s.to_string()).collect(),
        None => file.metrics,
    };
    let mut plot = file.plot;
    if matches.is_present("no-plot") {
        plot.enabled = false;
    }

    Ok(Args {
        input: input,
        csv: output.map(|path| CsvConfig { path: path }),
        plot: plot,
        metrics: metrics,
        verbose: verbose,
        version: default_version(),
    })
}

/// Read and parse a configuration file, see `parse_config_file`.
pub fn read_config_file(path: &Path) -> Result<FileConfig, Error> {
    let mut buffer = String::new();
    File::open(path)
        .and_then(|mut fp| fp.read_to_string(&mut buffer))
        .map_err(|e| Error::Io(path.to_path_buf(), e))?;
    parse_config_file(&buffer)
}

/// Parse the jmxplot configuration file
///
/// ```toml
/// input = "/var/tmp/jmx/*"
/// output = "/var/tmp/jmx.csv"
/// metrics = ["Count:counter", "a+b:rate"]
///
/// [plot]
/// enabled = true
/// width = 72
/// height = 20
/// ```
///
/// Every key is optional.
pub fn parse_config_file(buffer: &str) -> Result<FileConfig, Error> {
    let mut config = FileConfig::default();
    let value: toml::Value = toml::from_str(buffer)?;

    config.input = match value.get("input") {
        Some(s) => Some(
            s.as_str()
                .ok_or_else(|| Error::Invalid("input", "must be a string".to_string()))?
                .to_string(),
        ),
        None => None,
    };

    config.output = match value.get("output") {
        Some(s) => Some(PathBuf::from(
            s.as_str()
                .ok_or_else(|| Error::Invalid("output", "must be a string".to_string()))?,
        )),
        None => None,
    };

    if let Some(metrics) = value.get("metrics") {
        let metrics = metrics
            .as_array()
            .ok_or_else(|| Error::Invalid("metrics", "must be an array".to_string()))?;
        for metric in metrics {
            match metric.as_str() {
                Some(s) => config.metrics.push(s.to_string()),
                None => {
                    return Err(Error::Invalid(
                        "metrics",
                        "must hold only strings".to_string(),
                    ))
                }
            }
        }
    }

    if let Some(plot) = value.get("plot") {
        config.plot = plot
            .clone()
            .try_into()
            .map_err(|e: toml::de::Error| Error::Invalid("plot", e.to_string()))?;
    }

    Ok(config)
}
