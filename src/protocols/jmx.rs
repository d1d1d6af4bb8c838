//! Lenient scanner for JMX dumps.
//!
//! A JMX dump is scanned line by line for `key: value` pairs. This is not a
//! JSON parser. Any line that does not carry a numeric value is reported as a
//! `Warning` and skipped so that partial or odd dumps still yield whatever
//! they do contain.

use metric::Samples;
use std::fmt;
use std::str::FromStr;

/// A line the scanner skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The line holds no `:`.
    NoSeparator {
        /// 1-based line number.
        line: usize,
    },
    /// The right-hand side of the line is not a number.
    NotNumeric {
        /// 1-based line number.
        line: usize,
        /// The key on the left-hand side.
        key: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Warning::NoSeparator { line } => {
                write!(f, "line {}: no ':' separator", line)
            }
            Warning::NotNumeric { line, ref key } => {
                write!(f, "line {}: value of '{}' is not numeric", line, key)
            }
        }
    }
}

/// The outcome of scanning one dump.
#[derive(Debug, Default)]
pub struct Extract {
    /// Every key whose value parsed as a number.
    pub samples: Samples,
    /// Every non-blank line that was skipped, in order.
    pub warnings: Vec<Warning>,
    /// The number of lines scanned.
    pub lines: usize,
}

/// Parse a single `key: value` line
///
/// The line is split on its first `:`. The key is trimmed and stripped of
/// double quotes; the value is trimmed and stripped of commas, both the
/// thousands separators and the trailing comma of a JSON member.
///
/// # Examples
///
/// ```
/// use jmxplot::protocols::jmx::parse_line;
///
/// assert_eq!(
///     Ok(("CollectionCount".to_string(), 1234.0)),
///     parse_line("    \"CollectionCount\" : 1,234,")
/// );
/// ```
pub fn parse_line(line: &str) -> Result<(String, f64), LineError> {
    let idx = match line.find(':') {
        Some(idx) => idx,
        None => return Err(LineError::NoSeparator),
    };
    let key = line[..idx].trim().replace('"', "");
    let value = line[idx + 1..].trim().replace(',', "");
    match f64::from_str(&value) {
        Ok(f) => Ok((key, f)),
        Err(_) => Err(LineError::NotNumeric(key)),
    }
}

/// Why `parse_line` rejected a line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineError {
    /// No `:` in the line.
    NoSeparator,
    /// The value of the given key is not numeric.
    NotNumeric(String),
}

/// Scan a whole dump, see the module documentation.
pub fn parse_lines(source: &str) -> Extract {
    let mut extract = Extract::default();
    for (idx, line) in source.lines().enumerate() {
        extract.lines += 1;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok((key, value)) => {
                let _ = extract.samples.insert(key, value);
            }
            Err(LineError::NoSeparator) => {
                extract.warnings.push(Warning::NoSeparator { line: idx + 1 })
            }
            Err(LineError::NotNumeric(key)) => {
                extract.warnings.push(Warning::NotNumeric {
                    line: idx + 1,
                    key: key,
                })
            }
        }
    }
    extract
}
