//! Logging setup
//!
//! Installs a global `tracing` subscriber configured from [`LoggingConfig`].
//! `RUST_LOG` takes precedence over the configured level so a single run can
//! be made noisier without editing the config.

use baralga_domain::LoggingConfig;
use baralga_domain::constants::DEFAULT_LOG_LEVEL;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing(config: &LoggingConfig) {
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => configured_filter(&config.level),
    };

    let (plain, json) = if config.json {
        (None, Some(tracing_subscriber::fmt::layer().json().with_target(false)))
    } else {
        (Some(tracing_subscriber::fmt::layer().with_target(false)), None)
    };

    let result = tracing_subscriber::registry().with(filter).with(plain).with(json).try_init();
    match result {
        Ok(()) => tracing::debug!(level = %config.level, json = config.json, "tracing.initialized"),
        Err(err) => tracing::debug!(error = %err, "tracing.already_initialized"),
    }

    if let Some(err) = rejected {
        tracing::warn!(
            level = %config.level,
            error = %err,
            fallback = DEFAULT_LOG_LEVEL,
            "tracing.invalid_level"
        );
    }
}

/// Filter for `level`, falling back to the default level if it does not parse.
pub fn build_filter(level: &str) -> EnvFilter {
    configured_filter(level).0
}

/// Filter for `level` plus the parse error when the default was used instead.
fn configured_filter(level: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_LOG_LEVEL), Some(err)),
    }
}
