// src/crypto/mod.rs
//! Password-based envelope encryption for message content at rest
//!
//! Keys come from PBKDF2 over `master secret || context key`; content is
//! sealed with AES-256-CBC and authenticated with HMAC-SHA256.

mod decrypt;
mod encrypt;
pub mod envelope;
pub mod kdf;
pub mod session;

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::aliases::MasterSecret;
use crate::config::Config;
use crate::consts::{DEFAULT_KDF_ITERATIONS, MAX_KDF_ITERATIONS};
use crate::error::{CoreError, Result};

pub use envelope::{EncryptedPayload, KdfParams};
pub use session::SessionEncryption;

/// Encrypts strings and serializable objects under a master secret
#[derive(Clone)]
pub struct DataEncryption {
    master: MasterSecret,
    iterations: u32,
}

impl fmt::Debug for DataEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataEncryption")
            .field("master", &"[REDACTED]")
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl DataEncryption {
    pub fn new(master: impl Into<String>) -> Result<Self> {
        let master = master.into();
        if master.is_empty() {
            return Err(CoreError::MissingMasterKey);
        }
        Ok(Self {
            master: MasterSecret::new(master),
            iterations: DEFAULT_KDF_ITERATIONS,
        })
    }

    /// Message encryption keyed by `keys.master_key`
    pub fn from_config(config: &Config) -> Result<Self> {
        let key = config.keys.master_key.clone().unwrap_or_default();
        Ok(Self::new(key)?.with_iterations(config.crypto.kdf_iterations))
    }

    /// Audit hashing keyed by `keys.audit_key`
    pub fn audit_from_config(config: &Config) -> Result<Self> {
        let key = config.keys.audit_key.clone().unwrap_or_default();
        Ok(Self::new(key)?.with_iterations(config.crypto.kdf_iterations))
    }

    /// Iteration count for new envelopes, clamped to what `decrypt` accepts
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.clamp(1, MAX_KDF_ITERATIONS);
        self
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn encrypt(&self, plain_text: &str, context_key: Option<&str>) -> Result<EncryptedPayload> {
        let payload = encrypt::seal(
            &self.master,
            context_key,
            plain_text.as_bytes(),
            self.iterations,
        )
        .inspect_err(|err| tracing::error!(error = %err, "encryption failed"))?;
        tracing::trace!(bytes = plain_text.len(), "sealed envelope");
        Ok(payload)
    }

    pub fn decrypt(&self, payload: &EncryptedPayload, context_key: Option<&str>) -> Result<String> {
        let plain = decrypt::open(&self.master, context_key, payload)
            .inspect_err(|err| tracing::debug!(kind = err.kind(), "decryption failed"))?;
        Ok(String::from_utf8(plain)?)
    }

    pub fn encrypt_object<T: Serialize>(
        &self,
        obj: &T,
        context_key: Option<&str>,
    ) -> Result<EncryptedPayload> {
        let json = serde_json::to_string(obj)?;
        self.encrypt(&json, context_key)
    }

    pub fn decrypt_object<T: DeserializeOwned>(
        &self,
        payload: &EncryptedPayload,
        context_key: Option<&str>,
    ) -> Result<T> {
        let json = self.decrypt(payload, context_key)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn digest(&self, data: &str) -> [u8; 32] {
        Sha256::new()
            .chain_update(data.as_bytes())
            .chain_update(self.master.expose_secret().as_bytes())
            .finalize()
            .into()
    }

    /// Keyed digest for lookups without decrypting: hex SHA-256 of `data || master`
    pub fn hash(&self, data: &str) -> String {
        hex::encode(self.digest(data))
    }

    /// Constant-time check of a hex digest (either case) produced by [`Self::hash`].
    pub fn verify_hash(&self, plain_text: &str, hash: &str) -> bool {
        let Ok(given) = hex::decode(hash) else {
            return false;
        };
        self.digest(plain_text)[..].ct_eq(&given).into()
    }

    /// Envelope rendered as one string, for columns or key-value stores
    pub fn encrypt_for_storage(&self, data: &str) -> Result<String> {
        Ok(self.encrypt(data, None)?.to_compact())
    }

    pub fn decrypt_from_storage(&self, stored: &str) -> Result<String> {
        let payload = EncryptedPayload::from_compact(stored)?;
        self.decrypt(&payload, None)
    }

    /// Base64 of `length` bytes from the thread-local CSPRNG
    pub fn generate_secure_key(length: usize) -> String {
        let mut bytes = vec![0u8; length];
        rand::rng().fill_bytes(&mut bytes);
        STANDARD.encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    // Low iteration count keeps the suite fast; the format is identical.
    fn enc(master: &str) -> DataEncryption {
        DataEncryption::new(master).unwrap().with_iterations(64)
    }

    #[test]
    fn empty_master_key_is_rejected() {
        assert!(matches!(
            DataEncryption::new(""),
            Err(CoreError::MissingMasterKey)
        ));
    }

    #[test]
    fn roundtrip_with_and_without_context() {
        let e = enc("master");
        let p = e.encrypt("Olá, tudo bem?", None).unwrap();
        assert_eq!(e.decrypt(&p, None).unwrap(), "Olá, tudo bem?");

        let p = e.encrypt("with context", Some("session-key")).unwrap();
        assert_eq!(e.decrypt(&p, Some("session-key")).unwrap(), "with context");
    }

    #[test]
    fn empty_string_roundtrips() {
        let e = enc("master");
        let p = e.encrypt("", None).unwrap();
        assert_eq!(e.decrypt(&p, None).unwrap(), "");
    }

    #[test]
    fn salt_and_iv_are_fresh_per_call() {
        let e = enc("master");
        let a = e.encrypt("same", None).unwrap();
        let b = e.encrypt("same", None).unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.data, b.data);
    }

    #[test]
    fn wrong_master_or_context_fails_integrity() {
        let p = enc("master").encrypt("secret", Some("ctx")).unwrap();

        let wrong_master = enc("other").decrypt(&p, Some("ctx")).unwrap_err();
        assert!(wrong_master.is_integrity_failure());

        let wrong_ctx = enc("master").decrypt(&p, Some("nope")).unwrap_err();
        assert!(wrong_ctx.is_integrity_failure());

        let missing_ctx = enc("master").decrypt(&p, None).unwrap_err();
        assert!(missing_ctx.is_integrity_failure());
    }

    #[test]
    fn tampered_ciphertext_fails_integrity() {
        let e = enc("master");
        let mut p = e.encrypt("do not touch", None).unwrap();
        let mut raw = STANDARD.decode(&p.data).unwrap();
        raw[0] ^= 0x01;
        p.data = STANDARD.encode(raw);
        assert!(e.decrypt(&p, None).unwrap_err().is_integrity_failure());
    }

    #[test]
    fn iterations_travel_with_the_envelope() {
        let writer = enc("master").with_iterations(128);
        let p = writer.encrypt("portable", None).unwrap();
        assert_eq!(p.kdf.iterations, 128);

        // A reader configured differently still opens it.
        let reader = enc("master").with_iterations(5000);
        assert_eq!(reader.decrypt(&p, None).unwrap(), "portable");
    }

    #[test]
    fn tampered_iteration_count_fails_integrity() {
        let e = enc("master");
        let mut p = e.encrypt("x", None).unwrap();
        p.kdf.iterations += 1;
        assert!(e.decrypt(&p, None).unwrap_err().is_integrity_failure());
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        mood: u8,
        topics: Vec<String>,
    }

    #[test]
    fn objects_roundtrip_through_json() {
        let e = enc("master");
        let note = Note {
            mood: 4,
            topics: vec!["sleep".into(), "work".into()],
        };
        let p = e.encrypt_object(&note, Some("u1")).unwrap();
        let back: Note = e.decrypt_object(&p, Some("u1")).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn decrypt_object_reports_json_errors() {
        let e = enc("master");
        let p = e.encrypt("not json", None).unwrap();
        let err = e.decrypt_object::<Note>(&p, None).unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn hash_is_keyed_and_verifiable() {
        let a = enc("master-a");
        let b = enc("master-b");
        let h = a.hash("user-42");
        assert_eq!(h.len(), 64);
        assert_eq!(h, a.hash("user-42"));
        assert_ne!(h, b.hash("user-42"));
        assert!(a.verify_hash("user-42", &h));
        assert!(a.verify_hash("user-42", &h.to_uppercase()));
        assert!(!a.verify_hash("user-43", &h));
    }

    #[test]
    fn verify_hash_rejects_malformed_digests() {
        let e = enc("master");
        let h = e.hash("user-42");
        assert!(!e.verify_hash("user-42", "not hex at all"));
        assert!(!e.verify_hash("user-42", &h[..62]));
        assert!(!e.verify_hash("user-42", &format!("{h}00")));
        assert!(!e.verify_hash("user-42", ""));
    }

    #[test]
    fn storage_string_roundtrip() {
        let e = enc("master");
        let stored = e.encrypt_for_storage("preferences").unwrap();
        assert!(stored.starts_with("mg1$64$"));
        assert_eq!(e.decrypt_from_storage(&stored).unwrap(), "preferences");
        assert!(enc("other").decrypt_from_storage(&stored).is_err());
    }

    #[test]
    fn secure_keys_have_requested_entropy() {
        let k = DataEncryption::generate_secure_key(32);
        assert_eq!(STANDARD.decode(&k).unwrap().len(), 32);
        assert_ne!(k, DataEncryption::generate_secure_key(32));
    }

    #[test]
    fn debug_does_not_leak_master() {
        let rendered = format!("{:?}", enc("very-secret-master"));
        assert!(!rendered.contains("very-secret-master"));
    }

    #[test]
    fn from_config_requires_key() {
        let mut config = Config::default();
        assert!(DataEncryption::from_config(&config).is_err());
        config.keys.master_key = Some("k".into());
        config.crypto.kdf_iterations = 77;
        assert_eq!(DataEncryption::from_config(&config).unwrap().iterations(), 77);
    }
}
