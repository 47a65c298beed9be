//! Configuration for the engine and its driver loop.
//!
//! Defaults live in a private constants module; every field can be
//! overridden by deserializing from JSON, so a driver can ship a config
//! alongside a program.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Per-stage tracing is off unless asked for.
    pub const TRACE: bool = false;

    /// Cycle budget for a free-running `run` with no explicit count.
    pub const MAX_CYCLES: u64 = 10_000;

    /// Default tick rate for rate-limited running, in Hz.
    pub const RUN_HZ: u64 = 10;
}

/// Engine and driver configuration.
///
/// ```
/// use pipe16_core::Config;
/// let config: Config = serde_json::from_str(r#"{ "trace": true }"#).unwrap();
/// assert!(config.trace);
/// assert_eq!(config.run_hz, Config::default().run_hz);
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Emit per-stage trace lines on stderr.
    #[serde(default = "Config::default_trace")]
    pub trace: bool,

    /// Cycle budget used by drivers when no count is given.
    #[serde(default = "Config::default_max_cycles")]
    pub max_cycles: u64,

    /// Tick rate for rate-limited running, clamped to 1-100 Hz.
    #[serde(default = "Config::default_run_hz")]
    pub run_hz: u64,
}

impl Config {
    fn default_trace() -> bool {
        defaults::TRACE
    }

    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    fn default_run_hz() -> u64 {
        defaults::RUN_HZ
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace: defaults::TRACE,
            max_cycles: defaults::MAX_CYCLES,
            run_hz: defaults::RUN_HZ,
        }
    }
}
