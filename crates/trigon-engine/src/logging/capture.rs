//! Test logger that records messages per thread.
//!
//! Tests run in parallel, so each test only sees what its own thread logged.
//! Call [`install`] before anything that could install another logger.

use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

static INSTALL: Once = Once::new();
static RECORDS: Mutex<Vec<(ThreadId, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let entry = (thread::current().id(), record.args().to_string());
        RECORDS.lock().unwrap().push(entry);
    }

    fn flush(&self) {}
}

pub(crate) fn install() {
    INSTALL.call_once(|| {
        log::set_logger(&CaptureLogger).expect("capture logger must be installed first");
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// Removes and returns the messages logged so far on the calling thread.
pub(crate) fn take() -> Vec<String> {
    let me = thread::current().id();
    let mut records = RECORDS.lock().unwrap();
    let (mine, rest): (Vec<_>, Vec<_>) = records.drain(..).partition(|(id, _)| *id == me);
    *records = rest;
    mine.into_iter().map(|(_, msg)| msg).collect()
}
