//! Tracing initialization and subscriber setup.
//!
//! Configures the global tracing subscriber: an `EnvFilter` driven by
//! `RUST_LOG` (falling back to the configured level) in front of a fmt
//! layer writing to stderr, keeping stdout free for command output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Config;

/// Initializes the tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG`, if set
/// 2. `config.log_level`, if set
/// 3. Default: `"info"`
///
/// Idempotent: safe to call multiple times, only the first call takes
/// effect. Never panics; if a subscriber is already installed the call is a
/// no-op.
pub fn init_tracing(config: &Config) {
    let level = config
        .log_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
