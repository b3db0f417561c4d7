//! Per-thread capture of `log` records.
//!
//! The test harness runs each test on its own thread and log calls run on
//! the caller's thread, so records stay isolated between parallel tests.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Once;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

thread_local! {
    static RECORDS: RefCell<Vec<CapturedRecord>> = const { RefCell::new(Vec::new()) };
}

struct ThreadLogger;

impl Log for ThreadLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let captured = CapturedRecord {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        RECORDS.with(|records| records.borrow_mut().push(captured));
    }

    fn flush(&self) {}
}

static LOGGER: ThreadLogger = ThreadLogger;
static INSTALL: Once = Once::new();

/// Install the capturing logger (once per process) and clear this thread's
/// records.
pub fn capture_logs() -> LogCapture {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    RECORDS.with(|records| records.borrow_mut().clear());
    LogCapture {
        _thread_bound: PhantomData,
    }
}

/// Handle to the current thread's captured records.
pub struct LogCapture {
    _thread_bound: PhantomData<*const ()>,
}

impl LogCapture {
    pub fn records(&self) -> Vec<CapturedRecord> {
        RECORDS.with(|records| records.borrow().clone())
    }

    /// Records at `level` or more severe.
    pub fn at_least(&self, level: Level) -> Vec<CapturedRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.level <= level)
            .collect()
    }

    /// Whether a record at exactly `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|record| record.level == level && record.message.contains(needle))
    }
}
