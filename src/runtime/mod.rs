//! Process-level support: logging setup and the startup trace

pub mod logging;
pub mod startup;

pub use logging::LoggingConfig;
pub use startup::{load_facilities, report_issues};
