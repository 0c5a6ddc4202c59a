// src/transcript.rs
//! Decrypting a stored conversation for display
//!
//! Each message is opened on its own; one bad envelope never hides the rest
//! of the conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::UNDECRYPTABLE_PLACEHOLDER;
use crate::crypto::{EncryptedPayload, SessionEncryption};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message as persisted: content only in encrypted form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub role: Role,
    pub payload: EncryptedPayload,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub flag_reason: Option<String>,
}

impl StoredMessage {
    pub fn seal(
        session: &SessionEncryption,
        id: impl Into<String>,
        role: Role,
        content: &str,
    ) -> crate::error::Result<Self> {
        Ok(Self {
            id: id.into(),
            role,
            payload: session.encrypt_message(content)?,
            timestamp: Utc::now(),
            flagged: false,
            flag_reason: None,
        })
    }

    pub fn flag(mut self, reason: &str) -> Self {
        self.flagged = true;
        self.flag_reason = Some(reason.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecryptedMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub flagged: bool,
    /// False when `content` is the placeholder
    pub decrypted: bool,
}

pub fn decrypt_transcript(
    session: &SessionEncryption,
    messages: &[StoredMessage],
) -> Vec<DecryptedMessage> {
    messages
        .iter()
        .map(|msg| {
            let (content, decrypted) = match session.decrypt_message(&msg.payload) {
                Ok(text) => (text, true),
                Err(err) => {
                    tracing::warn!(
                        message_id = %msg.id,
                        session_id = %session.session_id(),
                        kind = err.kind(),
                        "message could not be decrypted"
                    );
                    (UNDECRYPTABLE_PLACEHOLDER.to_string(), false)
                }
            };
            DecryptedMessage {
                id: msg.id.clone(),
                role: msg.role,
                content,
                timestamp: msg.timestamp,
                flagged: msg.flagged,
                decrypted,
            }
        })
        .collect()
}
