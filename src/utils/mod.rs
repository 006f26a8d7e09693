//! Utility modules for appviewer

pub mod errors;
pub mod logger;

// Re-export commonly used items
pub use errors::{AppViewerError, display_error_and_exit, enhance_error};
pub use logger::{log_debug, log_error, log_info, log_warn};
