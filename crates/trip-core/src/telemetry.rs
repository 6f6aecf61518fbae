//! Logging setup
//!
//! `RUST_LOG` wins over the configured `log_filter`. Installing twice is a
//! no-op, so embedders and tests can both call it.

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install a global `fmt` subscriber. Returns false if one was already set.
pub fn init_tracing(config: &Config) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        info!("Logging initialized with filter {:?}", config.log_filter);
    }
    installed
}
