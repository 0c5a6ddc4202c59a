// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the #[derive(...)] enums that travel across module
//! boundaries: crisis tiers, contact categories, regions, KDF algorithms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse severity tier assigned to a message.
///
/// Ordered so that `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum CrisisLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl CrisisLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            CrisisLevel::Low => "LOW",
            CrisisLevel::Medium => "MEDIUM",
            CrisisLevel::High => "HIGH",
            CrisisLevel::Critical => "CRITICAL",
        }
    }

    /// HIGH and CRITICAL need a visible response from the caller.
    pub fn is_elevated(self) -> bool {
        self >= CrisisLevel::High
    }

    pub fn suggested_action(self) -> &'static str {
        match self {
            CrisisLevel::Critical => "Immediate crisis intervention required",
            CrisisLevel::High => "Suggest professional help resources",
            CrisisLevel::Medium => "Offer coping strategies and support",
            CrisisLevel::Low => "Continue monitoring",
        }
    }
}

impl fmt::Display for CrisisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of service an emergency contact provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactCategory {
    Hotline,
    Emergency,
    Support,
}

/// Region used to pick an emergency-contact table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Region {
    Brazil,
    UnitedStates,
    /// Unknown locale: both tables, Brazil first
    Both,
}

impl Region {
    pub fn from_locale(locale: &str) -> Self {
        if locale.contains("pt") {
            Region::Brazil
        } else if locale.contains("en-US") {
            Region::UnitedStates
        } else {
            Region::Both
        }
    }
}

/// Supported key-derivation functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum KdfAlgorithm {
    #[default]
    Pbkdf2HmacSha256,
}
