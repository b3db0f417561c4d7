//! Test helpers shared across envgate crates.

pub mod logs;
pub mod recorder;
pub mod sources;

pub use logs::{CapturedRecord, LogCapture, capture_logs};
pub use recorder::Recorder;
pub use sources::string_map;
