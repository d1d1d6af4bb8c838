//! Sources of raw samples. Snapshots are JMX dumps on disk, one per file,
//! each named by the epoch it was taken at.

use glob;
use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

mod snapshot;

pub use self::snapshot::{discover, epoch_of, read_snapshot, Snapshot};

/// Errors raised while finding or reading snapshots. All of them are fatal
/// to a run.
#[derive(Debug)]
pub enum Error {
    /// The input pattern is not a valid glob.
    Pattern(glob::PatternError),
    /// A path matching the pattern could not be inspected.
    Glob(glob::GlobError),
    /// A snapshot could not be read.
    Io(PathBuf, io::Error),
    /// A snapshot's file name is not a UNIX epoch.
    InvalidTimestamp(PathBuf),
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::Pattern(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Pattern(ref e) => write!(f, "invalid input pattern: {}", e),
            Error::Glob(ref e) => write!(f, "could not inspect input: {}", e),
            Error::Io(ref path, ref e) => {
                write!(f, "could not read {}: {}", path.display(), e)
            }
            Error::InvalidTimestamp(ref path) => write!(
                f,
                "file name of {} is not a UNIX epoch",
                path.display()
            ),
        }
    }
}

impl error::Error for Error {}
