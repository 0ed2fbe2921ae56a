//! Configuration loading for the transition engine.
//!
//! # Configuration Hierarchy
//!
//! 1. Built-in defaults
//! 2. TOML file (`~/.config/helpdesk/config.toml` or an explicit path)
//! 3. Environment variables (`HELPDESK_*`)
//!
//! Later sources override earlier ones. Keys missing from the file keep
//! their defaults.
//!
//! ```toml
//! [post_effects]
//! timeout_ms = 2500
//!
//! [logging]
//! level = "debug"
//! with_target = true
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const ENV_POST_EFFECT_TIMEOUT_MS: &str = "HELPDESK_POST_EFFECT_TIMEOUT_MS";
pub const ENV_LOG_LEVEL: &str = "HELPDESK_LOG_LEVEL";

const DEFAULT_POST_EFFECT_TIMEOUT_MS: u64 = 5_000;
const MAX_POST_EFFECT_TIMEOUT_MS: u64 = 300_000;

// ═══════════════════════════════════════════════════════════════════════════
// CONFIG TYPES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub post_effects: PostEffectsConfig,
    pub logging: LoggingConfig,
}

/// Bounds on the best-effort post-workflow and notification pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostEffectsConfig {
    /// Per-effect limit; an effect still running after this is abandoned
    pub timeout_ms: u64,
}

impl Default for PostEffectsConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_POST_EFFECT_TIMEOUT_MS,
        }
    }
}

impl PostEffectsConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`
    pub level: String,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an unknown level name.
    pub fn level(&self) -> Result<tracing::Level> {
        self.level
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("Unknown log level '{}'", self.level)))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════

impl EngineConfig {
    /// Parse a TOML document, keeping defaults for absent keys.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the TOML is malformed or names unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration through every layer and validate it.
    ///
    /// With `path` set, that file must exist. Without it the default
    /// location is tried and skipped silently when absent.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - An explicit config file cannot be read
    /// - The TOML is malformed
    /// - An environment override does not parse
    /// - Values fail validation
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path).await?,
            None => match default_config_path() {
                Some(path) => match Self::load_file(&path).await {
                    Ok(config) => config,
                    Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                        Self::default()
                    }
                    Err(e) => return Err(e),
                },
                None => Self::default(),
            },
        };

        config.apply_env_vars()?;
        config.validate()?;

        tracing::debug!(
            timeout_ms = config.post_effects.timeout_ms,
            level = %config.logging.level,
            "Engine configuration loaded"
        );
        Ok(config)
    }

    async fn load_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Apply environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns error if environment variable values are invalid
    fn apply_env_vars(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(ENV_POST_EFFECT_TIMEOUT_MS) {
            self.post_effects.timeout_ms = value.trim().parse().map_err(|e| {
                Error::Config(format!("Invalid {ENV_POST_EFFECT_TIMEOUT_MS} value: {e}"))
            })?;
        }

        if let Ok(value) = std::env::var(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }

        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any values are out of range or invalid
    pub fn validate(&self) -> Result<()> {
        if self.post_effects.timeout_ms == 0
            || self.post_effects.timeout_ms > MAX_POST_EFFECT_TIMEOUT_MS
        {
            return Err(Error::Config(format!(
                "post_effects.timeout_ms must be between 1 and {}, got {}",
                MAX_POST_EFFECT_TIMEOUT_MS, self.post_effects.timeout_ms
            )));
        }

        self.logging.level().map(|_| ())
    }
}

/// `config.toml` under the platform config directory for `helpdesk`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "helpdesk")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
