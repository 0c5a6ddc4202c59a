// src/lib.rs
//! mindful-guard: safety and data-protection core for a wellness-assistant chat
//!
//! Features:
//! - Keyword-tier crisis detection with deterioration tracking
//! - Region-keyed emergency contacts and localized crisis messages
//! - PBKDF2 + AES-256-CBC + HMAC-SHA256 message envelopes
//! - Per-session encryption, hashed audit log, fixed-window rate limiting

pub mod aliases;
pub mod audit;
pub mod config;
pub mod consts;
pub mod crisis;
pub mod crypto;
pub mod enums;
pub mod error;
pub mod rate_limit;
pub mod safety;
pub mod transcript;

// Re-export everything users need at the crate root
pub use audit::{AuditEntry, SecureAuditLog};
pub use config::load as load_config;
pub use crisis::{CrisisAssessment, CrisisDetector, EmergencyContact, RuleSet};
pub use crypto::{DataEncryption, EncryptedPayload, SessionEncryption};
pub use enums::{ContactCategory, CrisisLevel, Region};
pub use error::{CoreError, Result};
pub use rate_limit::RateLimiter;
pub use safety::{ReplyVerdict, SafetyGate, UserVerdict};
pub use transcript::{decrypt_transcript, DecryptedMessage, StoredMessage};
