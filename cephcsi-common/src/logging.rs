use crate::error::{ConfigError, Result};
use tracing_subscriber::EnvFilter;

/// Installs the process-wide fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` applies to the store crates.
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .try_init()
        .map_err(|e| ConfigError::Config(format!("failed to install log subscriber: {e}")))
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    format!("cephcsi_common={level},cephcsi_store={level}")
}
