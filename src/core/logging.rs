//! Logging abstraction
//!
//! Provides the `log_*!` macros used throughout the crate. They forward to
//! the [`log`] facade, so any `log::Log` implementation can receive them.
//! [`init`] installs the default stderr logger used by the binary.
//!
//! ```ignore
//! attitude_stream::core::logging::init(log::LevelFilter::Debug)?;
//! crate::log_info!("IMU initialized ({:#x})", id);
//! ```

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

#[doc(hidden)]
pub use log as __log;

/// Environment variable consulted when no level is given on the command line
pub const LOG_LEVEL_ENV: &str = "ATTITUDE_LOG";

/// Line-oriented logger writing to stderr
///
/// Output format: `<unix seconds>.<millis> [LEVEL] <target>: <message>`
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "{}.{:03} [{:<5}] {}: {}",
            now.as_secs(),
            now.subsec_millis(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the stderr logger as the global logger
///
/// # Errors
///
/// Fails if a logger has already been installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}

/// Resolve the log level from an explicit value, then `ATTITUDE_LOG`, then `info`
///
/// Unparseable values fall back to `info`.
pub fn resolve_level(explicit: Option<&str>) -> LevelFilter {
    let from_env = std::env::var(LOG_LEVEL_ENV).ok();
    explicit
        .or(from_env.as_deref())
        .and_then(|s| LevelFilter::from_str(s).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::core::logging::__log::info!($($arg)*)
    };
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::core::logging::__log::warn!($($arg)*)
    };
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::core::logging::__log::error!($($arg)*)
    };
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::core::logging::__log::debug!($($arg)*)
    };
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::core::logging::__log::trace!($($arg)*)
    };
}
