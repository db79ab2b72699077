//! # Logging Initialization
//!
//! The library itself only emits `tracing` events. Binaries call [`init_logging`] once at
//! startup to install a subscriber:
//!
//! 1.  **Environment Filter (`EnvFilter`)**: verbosity comes from `RUST_LOG`. If unset,
//!     the given level applies to everything and `rawvol_core` logs at `debug`.
//!
//! 2.  **File Logging**: with `log_to_file = true`, logs go to a daily rolling file in the
//!     user cache directory (from the `directories` crate), without ANSI colors.
//!
//! 3.  **Stderr Logging**: with `log_to_file = false`, or when the cache directory cannot
//!     be determined or written, logs go to stderr with ANSI colors.
//!
//! Initialization runs at most once per process; later calls are no-ops.

use anyhow::Result;
use directories::ProjectDirs;
use std::{io::stderr, path::Path, sync::Once};
use tracing_subscriber::{EnvFilter, fmt::layer, prelude::*};

static INIT: Once = Once::new();

/// Initialize `trace`-level logging to stderr for tests.
pub fn init_test_logging() {
    let _ = init_logging("trace", false);
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for configurations that can fail.
pub fn init_logging(log_level: &str, log_to_file: bool) -> Result<()> {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},rawvol_core=debug")));

        if log_to_file
            && let Some(proj_dirs) = ProjectDirs::from("io", "Rawvol", "rawvol")
            && can_write(proj_dirs.cache_dir())
        {
            // tracing_appender panics on permission errors, hence the probe above.
            let file_appender = tracing_appender::rolling::daily(proj_dirs.cache_dir(), "rawvol.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer().with_writer(non_blocking).with_ansi(false))
                .init();
            // Leaked so buffered lines are flushed at exit.
            Box::leak(Box::new(guard));
            return;
        }

        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer().with_writer(stderr).with_ansi(true))
            .init();
    });

    Ok(())
}

/// Create `dir` if needed and check that a file can be written there.
fn can_write(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let probe = dir.join(".rawvol_log_test");
    match std::fs::write(&probe, "test") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}
