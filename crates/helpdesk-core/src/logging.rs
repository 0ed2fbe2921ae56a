//! Tracing subscriber setup.

use tracing_subscriber::fmt;

use crate::{config::LoggingConfig, Result};

/// Install a global fmt subscriber for `config`, writing to stderr.
///
/// Returns `Ok(false)` when a subscriber was already installed, so calling
/// this more than once (e.g. from several tests) is harmless.
///
/// # Errors
///
/// Returns `Error::Config` for an unknown log level.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let level = config.level()?;

    let installed = fmt()
        .with_max_level(level)
        .with_target(config.with_target)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(%level, "Logging initialised");
    }
    Ok(installed)
}
