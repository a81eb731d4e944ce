//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging backend
//! - Wall clock

use crate::engine::Clock;

/// Install the logger for this target.
///
/// Native builds log through `env_logger` (filtered by `RUST_LOG`); browser
/// builds log to the console and route panics there too.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init()
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
}

/// Milliseconds since the clock was created
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Milliseconds since the Unix epoch, from `Date.now()`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

#[cfg(target_arch = "wasm32")]
impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}
