// Global logging configuration

use crate::{Format, Level};
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Checked by `debug!` before formatting.
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    config
});

/// Logging configuration read from `FORMRULE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `FORMRULE_DEBUG`
    pub debug: bool,
    /// `FORMRULE_LOG_LEVEL`
    pub level: Level,
    /// `FORMRULE_LOG_FORMAT`
    pub format: Format,
    /// `FORMRULE_LOG_TIMESTAMPS`
    pub timestamps: bool,
    /// `FORMRULE_LOG_TARGET`
    pub target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Json,
            timestamps: true,
            target: true,
        }
    }
}

impl LogConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or unparseable keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        let debug = flag("FORMRULE_DEBUG", defaults.debug);
        let level = lookup("FORMRULE_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { defaults.level });
        let format = lookup("FORMRULE_LOG_FORMAT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.format);

        Self {
            debug,
            level,
            format,
            timestamps: flag("FORMRULE_LOG_TIMESTAMPS", defaults.timestamps),
            target: flag("FORMRULE_LOG_TARGET", defaults.target),
        }
    }
}

/// Eagerly read the environment. Otherwise this happens on first use.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// The configuration read at initialisation.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

#[inline]
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Override the level at runtime.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
    log::set_max_level(level.to_level_filter());
}

/// Toggle debug mode at runtime; enabling it lowers the level to `Debug`.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}
