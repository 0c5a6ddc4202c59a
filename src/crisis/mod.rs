// src/crisis/mod.rs
//! Crisis detection for incoming and outgoing chat messages
//!
//! - `rules`: versioned keyword tiers and the pure evaluator
//! - `detector`: stateful wrapper with history and emergency mode
//! - `contacts`: emergency contacts and localized crisis messages

pub mod contacts;
pub mod detector;
pub mod history;
pub mod rules;

use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::enums::CrisisLevel;

pub use contacts::{crisis_message, emergency_contacts, EmergencyContact};
pub use detector::CrisisDetector;
pub use history::DetectionHistory;
pub use rules::{RuleSet, TierRule};

/// Result of classifying one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisAssessment {
    pub level: CrisisLevel,
    /// In `[0, 1]`
    pub confidence: f64,
    /// Matched keywords of the winning tier, in rule order
    pub triggers: Vec<String>,
    pub suggested_action: String,
}

static SHARED: OnceCell<Mutex<CrisisDetector>> = OnceCell::new();

/// Process-wide detector; `locale` only applies to the first call.
pub fn shared_detector(locale: &str) -> &'static Mutex<CrisisDetector> {
    SHARED.get_or_init(|| Mutex::new(CrisisDetector::new(locale)))
}

/// Lock the shared detector, recovering from a poisoned mutex.
pub fn lock_shared(locale: &str) -> MutexGuard<'static, CrisisDetector> {
    shared_detector(locale)
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
