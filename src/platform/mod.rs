//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging (console on web, env_logger on native)
//! - Round seeds from the wall clock
//! - The JS-facing game handle (web only)

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebGame;

/// Install the logger for this platform. Safe to call more than once.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::debug!("Logger already initialized");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()
            .is_err()
        {
            log::debug!("Logger already initialized");
        }
    }
}

/// Seed for a new round, from the current time in ms
pub fn clock_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
