// src/audit.rs
//! Privacy-preserving access audit log
//!
//! User and resource identifiers are replaced with keyed hashes before they
//! reach any sink; entries go out as structured events on the `audit` target.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::consts::MASKED_IP;
use crate::crypto::DataEncryption;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub user_id_hash: String,
    pub action: String,
    pub resource_hash: String,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
}

#[derive(Debug, Clone)]
pub struct SecureAuditLog {
    encryption: DataEncryption,
}

impl SecureAuditLog {
    pub fn new(encryption: DataEncryption) -> Self {
        Self { encryption }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(DataEncryption::audit_from_config(config)?))
    }

    pub fn log_access(&self, user_id: &str, action: &str, resource: &str) -> AuditEntry {
        let entry = AuditEntry {
            user_id_hash: self.encryption.hash(user_id),
            action: action.to_string(),
            resource_hash: self.encryption.hash(resource),
            timestamp: Utc::now(),
            ip: MASKED_IP.to_string(),
        };

        tracing::info!(
            target: "audit",
            user = %entry.user_id_hash,
            action = %entry.action,
            resource = %entry.resource_hash,
            ip = %entry.ip,
            at = %entry.timestamp.to_rfc3339(),
            "access"
        );

        entry
    }

    /// True when `entry` was produced for this user by a log sharing our key.
    pub fn matches_user(&self, entry: &AuditEntry, user_id: &str) -> bool {
        self.encryption.verify_hash(user_id, &entry.user_id_hash)
    }
}
