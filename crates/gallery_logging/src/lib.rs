#![deny(missing_docs)]
//! Log macros for the gallery crates.
//!
//! Engine and app code log through `gallery_*` macros so they only depend on
//! this crate, never on `log` directly. The binary installs the real logger;
//! tests call [`initialize_for_tests`].

use log::LevelFilter;

#[doc(hidden)]
pub use log as __log;

/// Logs at the given [`log::Level`] variant name, e.g. `gallery_log!(Warn, "..")`.
#[macro_export]
macro_rules! gallery_log {
    ($level:ident, $($arg:tt)*) => {{
        $crate::__log::log!($crate::__log::Level::$level, $($arg)*);
    }};
}

/// Per-chunk detail such as payload sizes.
#[macro_export]
macro_rules! gallery_trace {
    ($($arg:tt)*) => { $crate::gallery_log!(Trace, $($arg)*) };
}

/// Request-level detail.
#[macro_export]
macro_rules! gallery_debug {
    ($($arg:tt)*) => { $crate::gallery_log!(Debug, $($arg)*) };
}

/// Navigation, bulk select and session milestones.
#[macro_export]
macro_rules! gallery_info {
    ($($arg:tt)*) => { $crate::gallery_log!(Info, $($arg)*) };
}

/// Recoverable problems: failed fetches, skipped records, config fallbacks.
#[macro_export]
macro_rules! gallery_warn {
    ($($arg:tt)*) => { $crate::gallery_log!(Warn, $($arg)*) };
}

/// Failures the user cannot recover from in the current session.
#[macro_export]
macro_rules! gallery_error {
    ($($arg:tt)*) => { $crate::gallery_log!(Error, $($arg)*) };
}

/// Level used by [`initialize_for_tests`].
pub fn test_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs a terminal logger for tests. Later calls are no-ops.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    // Only the first call in a test binary can install a logger.
    let _ = TermLogger::init(
        test_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_macro_logs_through_the_installed_logger() {
        initialize_for_tests();
        initialize_for_tests();

        gallery_trace!("trace {}", 1);
        gallery_debug!("debug {}", 2);
        gallery_info!("info {}", 3);
        gallery_warn!("warn {}", 4);
        gallery_error!("error {}", 5);
        gallery_log!(Info, "explicit level");

        assert_eq!(log::max_level(), test_level());
    }
}
