//! formrule logging
//!
//! Leveled logging for the formrule crates, controlled by environment
//! variables and rendered as pretty, compact, or JSON lines on stderr.
//!
//! # Usage
//!
//! ```rust
//! use formrule_log::{debug, warn};
//!
//! debug!("building {} descriptors", 1);
//! warn!(target: "formrule::factory", "rules string {:?} is malformed", "maxLength:x");
//! ```
//!
//! # Environment Variables
//!
//! - `FORMRULE_DEBUG=1` - Enable debug logging
//! - `FORMRULE_LOG_LEVEL=trace|debug|info|warn|error|off` - Minimum level (default `warn`)
//! - `FORMRULE_LOG_FORMAT=pretty|compact|json` - Output format (default `json`)
//! - `FORMRULE_LOG_TIMESTAMPS=1|0` - Prefix lines with a timestamp
//! - `FORMRULE_LOG_TARGET=1|0` - Include the module path

mod config;
mod facade;
mod level;
mod output;

pub use config::{
    LogConfig, config, current_level, init, is_debug_enabled, is_level_enabled, set_debug,
    set_level,
};
pub use facade::{FacadeLogger, install_facade};
pub use level::{Format, Level};
#[doc(hidden)]
pub use output::log;
pub use output::render;

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log a debug message.
///
/// Enabled by `FORMRULE_DEBUG=1` or `FORMRULE_LOG_LEVEL=debug`.
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log a warning message.
#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, module_path!(), &format!($($arg)+));
        }
    };
}
