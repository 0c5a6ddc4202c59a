// src/config/mod.rs
//! Configuration system for mindful-guard
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, Config, CrisisSettings, CryptoSettings, Keys, RateLimitSettings};

mod app;
mod defaults;
