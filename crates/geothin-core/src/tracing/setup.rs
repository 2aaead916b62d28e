//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the geothin tracing/logging system.
///
/// Reads the `GEOTHIN_LOG` environment variable for per-module log levels.
/// Format: `GEOTHIN_LOG=geothin_engine=debug,geothin_core=warn`
///
/// Falls back to `default_level` applied to every geothin crate if
/// `GEOTHIN_LOG` is not set or is invalid. Output goes to stderr.
///
/// This function is idempotent: only the first call installs a subscriber.
pub fn init_tracing(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "geothin={lvl},geothin_core={lvl},geothin_engine={lvl},geothin_cli={lvl}",
                lvl = default_level
            ))
        });

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .init();
    });
}
