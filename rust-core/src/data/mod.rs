//! Capture logs and the signals extracted from them

pub mod loader;
pub mod record;
pub mod signal;

pub use loader::{load_log, load_log_with, read_log, LoaderOptions};
pub use record::{Column, LogRecord};
pub use signal::Signal;
