//! Store configuration.
//!
//! Settings are read from `~/.config/blackwell/config.json` when present,
//! then overridden by `BLACKWELL_*` environment variables. A missing file
//! means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::provider::DEFAULT_SOCIAL_DELAY_MS;

/// Application name used for the config directory path
const APP_NAME: &str = "blackwell";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const ENV_SOCIAL_DELAY_MS: &str = "BLACKWELL_SOCIAL_DELAY_MS";
const ENV_DISCARD_SUPERSEDED: &str = "BLACKWELL_DISCARD_SUPERSEDED_SOCIAL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Latency of the simulated social sign-in popup.
    pub social_delay_ms: u64,
    /// Drop social sign-in results that arrive after the session changed.
    pub discard_superseded_social: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            social_delay_ms: DEFAULT_SOCIAL_DELAY_MS,
            discard_superseded_social: true,
        }
    }
}

impl StoreConfig {
    /// Load from the user config directory, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply `BLACKWELL_*` overrides looked up through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SOCIAL_DELAY_MS) {
            self.social_delay_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of milliseconds", ENV_SOCIAL_DELAY_MS))?;
        }
        if let Some(raw) = lookup(ENV_DISCARD_SUPERSEDED) {
            self.discard_superseded_social = parse_flag(&raw)
                .with_context(|| format!("{} must be true or false", ENV_DISCARD_SUPERSEDED))?;
        }
        Ok(self)
    }

    pub fn social_delay(&self) -> Duration {
        Duration::from_millis(self.social_delay_ms)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("invalid flag value: {}", other)),
    }
}
