// src/crypto/session.rs
//! Per-session message encryption
//!
//! The session key is `hex(SHA-256(session_id || created_at_ms))` and is used as
//! the context key for every message in the session. A helper built with
//! [`SessionEncryption::new`] stamps the current wall-clock time, so only that
//! instance (or one rebuilt with [`SessionEncryption::at`] and the persisted
//! timestamp) can reopen its messages.

use std::fmt;

use chrono::Utc;
use sha2::{Digest, Sha256};

use super::{DataEncryption, EncryptedPayload};
use crate::aliases::ContextKey;
use crate::error::{CoreError, Result};

pub struct SessionEncryption {
    session_id: String,
    created_at_ms: i64,
    session_key: Option<ContextKey>,
    encryption: DataEncryption,
}

impl fmt::Debug for SessionEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEncryption")
            .field("session_id", &self.session_id)
            .field("created_at_ms", &self.created_at_ms)
            .field("destroyed", &self.session_key.is_none())
            .finish()
    }
}

fn session_key(session_id: &str, created_at_ms: i64) -> ContextKey {
    let digest = Sha256::new()
        .chain_update(session_id.as_bytes())
        .chain_update(created_at_ms.to_string().as_bytes())
        .finalize();
    ContextKey::new(hex::encode(digest))
}

impl SessionEncryption {
    /// Key bound to the construction time; persist [`Self::created_at_ms`] to reopen later.
    pub fn new(encryption: DataEncryption, session_id: &str) -> Self {
        Self::at(encryption, session_id, Utc::now().timestamp_millis())
    }

    /// Rebuild the helper for a session whose creation time was stored.
    pub fn at(encryption: DataEncryption, session_id: &str, created_at_ms: i64) -> Self {
        tracing::debug!(session_id, created_at_ms, "session encryption ready");
        Self {
            session_id: session_id.to_string(),
            created_at_ms,
            session_key: Some(session_key(session_id, created_at_ms)),
            encryption,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn created_at_ms(&self) -> i64 {
        self.created_at_ms
    }

    pub fn is_destroyed(&self) -> bool {
        self.session_key.is_none()
    }

    fn key(&self) -> Result<&str> {
        self.session_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .ok_or(CoreError::SessionDestroyed)
    }

    pub fn encrypt_message(&self, message: &str) -> Result<EncryptedPayload> {
        self.encryption.encrypt(message, Some(self.key()?))
    }

    pub fn decrypt_message(&self, payload: &EncryptedPayload) -> Result<String> {
        self.encryption.decrypt(payload, Some(self.key()?))
    }

    /// Drop (and zeroize) the session key. Later calls fail with `SessionDestroyed`.
    pub fn destroy_session(&mut self) {
        self.session_key = None;
        tracing::debug!(session_id = %self.session_id, "session key destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc() -> DataEncryption {
        DataEncryption::new("master").unwrap().with_iterations(64)
    }

    #[test]
    fn same_instance_roundtrips() {
        let s = SessionEncryption::new(enc(), "sess-1");
        let p = s.encrypt_message("estou bem hoje").unwrap();
        assert_eq!(s.decrypt_message(&p).unwrap(), "estou bem hoje");
    }

    #[test]
    fn persisted_timestamp_reopens_messages() {
        let writer = SessionEncryption::at(enc(), "sess-1", 1_700_000_000_123);
        let p = writer.encrypt_message("hello").unwrap();

        let reader = SessionEncryption::at(enc(), "sess-1", writer.created_at_ms());
        assert_eq!(reader.decrypt_message(&p).unwrap(), "hello");
    }

    #[test]
    fn different_timestamp_cannot_decrypt() {
        let writer = SessionEncryption::at(enc(), "sess-1", 1_000);
        let p = writer.encrypt_message("hello").unwrap();

        let reader = SessionEncryption::at(enc(), "sess-1", 2_000);
        assert!(reader.decrypt_message(&p).unwrap_err().is_integrity_failure());
    }

    #[test]
    fn different_session_cannot_decrypt() {
        let p = SessionEncryption::at(enc(), "sess-1", 1_000)
            .encrypt_message("hello")
            .unwrap();
        let other = SessionEncryption::at(enc(), "sess-2", 1_000);
        assert!(other.decrypt_message(&p).is_err());
    }

    #[test]
    fn destroyed_session_refuses_work() {
        let mut s = SessionEncryption::new(enc(), "sess-1");
        let p = s.encrypt_message("bye").unwrap();
        s.destroy_session();

        assert!(s.is_destroyed());
        assert!(matches!(
            s.encrypt_message("again"),
            Err(CoreError::SessionDestroyed)
        ));
        assert!(matches!(
            s.decrypt_message(&p),
            Err(CoreError::SessionDestroyed)
        ));
    }

    #[test]
    fn session_key_matches_documented_derivation() {
        let key = session_key("abc", 42);
        let expected = hex::encode(Sha256::digest(b"abc42"));
        assert_eq!(key.expose_secret(), &expected);
    }
}
