//! Logging utilities using the tracing framework

use std::fmt::Display;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
/// RUST_LOG wins when set, otherwise `--debug` picks "debug" and the default is "warn".
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log a debug message (wrapper around tracing::debug)
pub fn log_debug<T: Display>(msg: T) {
    tracing::debug!("{}", msg);
}

/// Log an informational message (wrapper around tracing::info)
pub fn log_info<T: Display>(msg: T) {
    tracing::info!("{}", msg);
}

/// Log a warning message (wrapper around tracing::warn)
pub fn log_warn<T: Display>(msg: T) {
    tracing::warn!("{}", msg);
}

/// Log an error message (wrapper around tracing::error)
pub fn log_error<T: Display>(msg: T) {
    tracing::error!("{}", msg);
}

/// Macro for convenient debug logging
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::utils::logger::log_debug(format!($($arg)*))
    };
}

/// Macro for convenient info logging
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::utils::logger::log_info(format!($($arg)*))
    };
}

/// Macro for convenient warning logging
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::utils::logger::log_warn(format!($($arg)*))
    };
}

/// Macro for convenient error logging
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::utils::logger::log_error(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_functions() {
        // These should not panic
        log_debug("Test debug message");
        log_info("Test info message");
        log_warn("Test warning message");
        log_error("Test error message");
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
        crate::log_debug!("after init {}", 2);
    }
}
