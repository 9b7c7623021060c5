//! Logging setup for Prax filtering.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the application. With the `tracing-subscriber` feature, [`init`] installs one
//! configured from the environment:
//!
//! - `PRAX_DEBUG=true|1|yes` - enable debug logging
//! - `PRAX_LOG_LEVEL=trace|debug|info|warn|error` - set a specific level
//! - `PRAX_LOG_FORMAT=json|pretty|compact` - output format (default: json)
//!
//! ```rust,no_run
//! use prax_filters::logging;
//!
//! // Once, at startup.
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Resolved logging settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    /// Whether logging was requested at all.
    pub enabled: bool,
    /// Level name.
    pub level: &'static str,
    /// Output format name.
    pub format: &'static str,
}

impl LogSettings {
    /// Read settings from `PRAX_DEBUG`, `PRAX_LOG_LEVEL` and `PRAX_LOG_FORMAT`.
    pub fn from_env() -> Self {
        Self::resolve(
            env::var("PRAX_DEBUG").ok().as_deref(),
            env::var("PRAX_LOG_LEVEL").ok().as_deref(),
            env::var("PRAX_LOG_FORMAT").ok().as_deref(),
        )
    }

    /// Resolve settings from raw variable values.
    ///
    /// An unrecognised level falls back to `debug` when debugging is on and
    /// `warn` otherwise; an unrecognised format falls back to `json`.
    pub fn resolve(debug: Option<&str>, level: Option<&str>, format: Option<&str>) -> Self {
        let debug = debug.is_some_and(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"));
        let fallback = if debug { "debug" } else { "warn" };
        let resolved_level = level
            .map(str::to_lowercase)
            .and_then(|l| LEVELS.iter().copied().find(|known| *known == l))
            .unwrap_or(fallback);
        let format = match format.map(str::to_lowercase).as_deref() {
            Some("pretty") => "pretty",
            Some("compact") => "compact",
            _ => "json",
        };

        Self {
            enabled: debug || level.is_some(),
            level: resolved_level,
            format,
        }
    }
}

/// Check if debug logging is enabled via `PRAX_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    LogSettings::resolve(env::var("PRAX_DEBUG").ok().as_deref(), None, None).enabled
}

/// Initialize logging from the environment.
///
/// Does nothing unless `PRAX_DEBUG` or `PRAX_LOG_LEVEL` is set. Subsequent
/// calls are no-ops.
pub fn init() {
    let settings = LogSettings::from_env();
    if settings.enabled {
        install(settings);
    }
}

/// Initialize logging at a specific level, regardless of the environment.
pub fn init_with_level(level: &str) {
    let from_env = LogSettings::from_env();
    let settings = LogSettings::resolve(Some("true"), Some(level), Some(from_env.format));
    install(settings);
}

fn install(settings: LogSettings) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = settings.level;
            let filter = EnvFilter::try_new(format!(
                "prax_filters={level},prax_catalog={level},prax_cli={level}"
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            // try_init: the host application may already own the global subscriber.
            let result = match settings.format {
                "json" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .try_init(),
                "compact" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact().with_writer(std::io::stderr))
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty().with_writer(std::io::stderr))
                    .try_init(),
            };

            if result.is_ok() {
                tracing::info!(
                    level = settings.level,
                    format = settings.format,
                    "Prax filtering logging initialized"
                );
            }
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            // No subscriber available; events go to whatever the host installs.
            let _ = settings;
        }
    });
}
