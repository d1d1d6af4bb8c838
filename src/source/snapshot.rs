use glob::glob;
use protocols::jmx::{parse_lines, Extract};
use source::Error;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// One JMX dump on disk
///
/// The file name of a snapshot is the UNIX epoch at which the dump was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Where the dump lives.
    pub path: PathBuf,
    /// When the dump was taken, from the file name.
    pub epoch: i64,
}

impl Snapshot {
    /// Make a `Snapshot` from its path, reading the epoch off the file name.
    pub fn new(path: PathBuf) -> Result<Snapshot, Error> {
        let epoch = epoch_of(&path)?;
        Ok(Snapshot {
            path: path,
            epoch: epoch,
        })
    }

    /// Read the snapshot, see `read_snapshot`.
    pub fn read(&self) -> Result<Extract, Error> {
        read_snapshot(&self.path)
    }
}

/// Interpret the base name of `path` as a base-10 UNIX epoch. Epochs before
/// 1970 are rejected.
pub fn epoch_of(path: &Path) -> Result<i64, Error> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.parse::<i64>().ok())
        .and_then(|epoch| if epoch >= 0 { Some(epoch) } else { None })
        .ok_or_else(|| Error::InvalidTimestamp(path.to_path_buf()))
}

/// Find the snapshots matching `pattern`
///
/// Directories that match the pattern are skipped. The result is ordered by
/// epoch, ties broken by path, no matter the order the glob walks the
/// filesystem in. A matching file whose name is not an epoch is an error.
pub fn discover(pattern: &str) -> Result<Vec<Snapshot>, Error> {
    let mut snapshots = Vec::new();
    for entry in glob(pattern)? {
        let path = entry?;
        if path.is_dir() {
            debug!("skipping directory {}", path.display());
            continue;
        }
        snapshots.push(Snapshot::new(path)?);
    }
    snapshots.sort_by(|a, b| a.epoch.cmp(&b.epoch).then_with(|| a.path.cmp(&b.path)));
    Ok(snapshots)
}

/// Read and scan one snapshot file
///
/// The whole file is read at once and handed to the JMX line scanner. Failing
/// to read the file is an error; lines the scanner cannot make sense of are
/// not, they come back as warnings in the `Extract`. Bytes that are not UTF-8
/// are replaced with U+FFFD before scanning.
pub fn read_snapshot(path: &Path) -> Result<Extract, Error> {
    let mut buffer = Vec::new();
    fs::File::open(path)
        .and_then(|mut fp| fp.read_to_end(&mut buffer))
        .map_err(|e| Error::Io(path.to_path_buf(), e))?;
    let extract = parse_lines(&String::from_utf8_lossy(&buffer));
    info!("Read {} lines from {}", extract.lines, path.display());
    Ok(extract)
}
