use std::ffi::c_int;

use log::LevelFilter;

/// Log levels exposed across the C boundary
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    /// Create a LogLevel from an integer; out-of-range values fall back to
    /// Info
    pub fn from_i32(level: i32) -> Self {
        match level {
            0 => LogLevel::Off,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    /// Get the integer representation for the C interface
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Initialize bridge diagnostics at the given level.
///
/// Installs the process-wide logger. Returns 0 on success, -1 if a logger
/// is already installed (the requested level is then ignored).
#[no_mangle]
pub extern "C" fn bridge_log_init(level: c_int) -> c_int {
    let filter = LogLevel::from_i32(level).to_filter();
    match env_logger::Builder::new().filter_level(filter).try_init() {
        Ok(()) => 0,
        Err(_) => -1,
    }
}
