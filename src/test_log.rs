//! A `log` backend for unit tests. Records are kept per thread so that tests
//! running side by side only see their own.

use log::{self, Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

struct Capture;

static LOGGER: Capture = Capture;
static INIT: Once = Once::new();

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = format!("{}", record.args());
        RECORDS.with(|records| records.borrow_mut().push((record.level(), line)));
    }

    fn flush(&self) {}
}

/// Install the capturing logger, once per process, and forget whatever this
/// thread logged so far.
pub fn start() {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// The messages logged at `level` on this thread since `start`.
pub fn messages(level: Level) -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|&&(l, _)| l == level)
            .map(|&(_, ref msg)| msg.clone())
            .collect()
    })
}
