//! Browser console logging.
//!
//! Session diagnostics go through the `log` facade. In the browser the facade
//! needs a logger installed once at hydration; elsewhere the host installs its
//! own and this is a no-op.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

/// Install `console_log` at `level` and the panic hook.
///
/// Safe to call more than once; later calls keep the first logger.
pub fn init(level: log::Level) {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            log::debug!("console logger already installed");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = level;
    }
}
