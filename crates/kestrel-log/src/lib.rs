//! Leveled logging for the Kestrel compiler frontend.
//!
//! Messages carry the module path of the call site as their target and are
//! written to stderr, colored by level. The minimum level is process-wide and
//! can be configured programmatically or from the environment.
//!
//! # Example
//!
//! ```
//! use kestrel_log::{debug, info, Level};
//!
//! kestrel_log::set_level(Level::Debug);
//!
//! let chunks = 3;
//! info!("arena holds {} chunks", chunks);
//! debug!("candidate order: {:?}", vec![1, 2, 3]);
//! ```

use std::fmt::{self, Arguments};
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable read by [`init_from_default_env`].
pub const DEFAULT_ENV_VAR: &str = "KESTREL_LOG";

/// Log levels, ordered from most severe (`Error`) to least severe (`Trace`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Failures that abort the current operation
    Error = 0,
    /// Suspicious input that was recovered from
    Warn = 1,
    /// High-level progress
    Info = 2,
    /// Construction decisions worth inspecting
    Debug = 3,
    /// Per-node detail
    Trace = 4,
}

impl Level {
    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Returns the upper-case name of this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Level`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid log level `{0}` (expected error, warn, info, debug or trace)")]
pub struct LevelParseError(pub String);

impl FromStr for Level {
    type Err = LevelParseError;

    /// Parses a level name, ignoring case.
    ///
    /// ```
    /// use kestrel_log::Level;
    ///
    /// assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
    /// assert!("loud".parse::<Level>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(LevelParseError(s.to_string())),
        }
    }
}

/// Process-wide logger holding the minimum enabled level.
pub struct Logger {
    level: AtomicU8,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
        }
    }

    /// Sets the minimum level; less severe messages are dropped.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the current minimum level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Returns `true` if a message at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, initialising it at `Level::Info`.
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Info))
}

/// Sets the minimum level of the global logger.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Parses `s` and sets the global level from it.
pub fn set_level_from_str(s: &str) -> Result<(), LevelParseError> {
    set_level(s.parse()?);
    Ok(())
}

/// Configures the global level from the environment variable `var`.
///
/// An unset or empty variable leaves the level untouched and returns
/// `Ok(None)`.
///
/// ```
/// // Nothing set: the level keeps its default.
/// assert_eq!(kestrel_log::init_from_env("KESTREL_LOG_DOCTEST_UNSET"), Ok(None));
/// ```
pub fn init_from_env(var: &str) -> Result<Option<Level>, LevelParseError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => {
            let level: Level = value.parse()?;
            set_level(level);
            Ok(Some(level))
        }
        _ => Ok(None),
    }
}

/// Configures the global level from [`DEFAULT_ENV_VAR`] (`KESTREL_LOG`).
pub fn init_from_default_env() -> Result<Option<Level>, LevelParseError> {
    init_from_env(DEFAULT_ENV_VAR)
}

#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments<'_>) {
    const RESET: &str = "\x1b[0m";

    if !get_logger().enabled(level) {
        return;
    }

    eprintln!("{}[{}]{RESET} {target}: {args}", level.color_code(), level);
}

/// Logs a message at an explicit level.
///
/// ```
/// use kestrel_log::{log, Level};
///
/// log!(level: Level::Info, "collapsed {} candidates", 3);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {
        {
            if $crate::get_logger().enabled($level) {
                $crate::__log_with_target(
                    $level,
                    module_path!(),
                    format_args!($($arg)*)
                );
            }
        }
    };
}

/// Logs a message at the Error level.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs a message at the Warn level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs a message at the Info level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs a message at the Debug level.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs a message at the Trace level.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}
