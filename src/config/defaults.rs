// src/config/defaults.rs
use crate::config::app::{CrisisSettings, CryptoSettings, Keys, RateLimitSettings};
use crate::consts::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_KDF_ITERATIONS, DEFAULT_LOCALE, DEFAULT_RATE_WINDOW_SECS,
    DEFAULT_REQUESTS_PER_MINUTE,
};

pub const DEFAULT_CONFIG_PATH: &str = "mindful-guard.toml";

pub const CONFIG_PATH_ENV: &str = "MINDFUL_GUARD_CONFIG";
pub const MASTER_KEY_ENV: &str = "ENCRYPTION_MASTER_KEY";
pub const AUDIT_KEY_ENV: &str = "AUDIT_ENCRYPTION_KEY";
pub const RATE_LIMIT_ENV: &str = "RATE_LIMIT_REQUESTS_PER_MINUTE";
pub const LOCALE_ENV: &str = "CRISIS_LOCALE";

// No built-in keys: encryption must fail loudly without a configured secret.
pub fn default_keys() -> Keys {
    Keys {
        master_key: None,
        audit_key: None,
    }
}

pub fn default_crypto() -> CryptoSettings {
    CryptoSettings {
        kdf_iterations: DEFAULT_KDF_ITERATIONS,
    }
}

pub fn default_crisis() -> CrisisSettings {
    CrisisSettings {
        locale: DEFAULT_LOCALE.into(),
        history_capacity: DEFAULT_HISTORY_CAPACITY,
    }
}

pub fn default_rate_limit() -> RateLimitSettings {
    RateLimitSettings {
        requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
        window_secs: DEFAULT_RATE_WINDOW_SECS,
    }
}
