// src/config/app.rs
use super::defaults::*;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keys: Keys,
    pub crypto: CryptoSettings,
    pub crisis: CrisisSettings,
    pub rate_limit: RateLimitSettings,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Keys {
    pub master_key: Option<String>,
    pub audit_key: Option<String>,
}

// Never print key material.
impl std::fmt::Debug for Keys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keys")
            .field("master_key", &self.master_key.as_ref().map(|_| "[REDACTED]"))
            .field("audit_key", &self.audit_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CryptoSettings {
    pub kdf_iterations: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrisisSettings {
    pub locale: String,
    pub history_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub requests_per_minute: u32,
    pub window_secs: u64,
}

impl Default for Keys {
    fn default() -> Self {
        default_keys()
    }
}

impl Default for CryptoSettings {
    fn default() -> Self {
        default_crypto()
    }
}

impl Default for CrisisSettings {
    fn default() -> Self {
        default_crisis()
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        default_rate_limit()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keys: default_keys(),
            crypto: default_crypto(),
            crisis: default_crisis(),
            rate_limit: default_rate_limit(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply environment overrides on top of file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    pub(crate) fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(MASTER_KEY_ENV).filter(|v| !v.is_empty()) {
            self.keys.master_key = Some(key);
        }
        if let Some(key) = lookup(AUDIT_KEY_ENV).filter(|v| !v.is_empty()) {
            self.keys.audit_key = Some(key);
        }
        if let Some(raw) = lookup(RATE_LIMIT_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(limit) => self.rate_limit.requests_per_minute = limit,
                Err(_) => tracing::warn!(
                    env = RATE_LIMIT_ENV,
                    value = %raw,
                    "ignoring non-numeric rate limit override"
                ),
            }
        }
        if let Some(locale) = lookup(LOCALE_ENV).filter(|v| !v.is_empty()) {
            self.crisis.locale = locale;
        }
        self
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config once per process, falling back to defaults if the file is missing or invalid
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let conf = if Path::new(&config_path).exists() {
            match Config::from_path(&config_path) {
                Ok(conf) => conf,
                Err(err) => {
                    tracing::warn!(path = %config_path, error = %err, "invalid config, using built-in defaults");
                    Config::default()
                }
            }
        } else {
            tracing::debug!(path = %config_path, "config file not found, using built-in defaults");
            Config::default()
        };

        conf.with_env_overrides()
    })
}
