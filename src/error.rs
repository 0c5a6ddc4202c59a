// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("encryption master key is required")]
    MissingMasterKey,

    /// Wrong key or tampered envelope; the MAC check cannot tell them apart.
    #[error("failed to decrypt: invalid key or corrupted data")]
    Integrity,

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("base64 decoding failed: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("decrypted data is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rule set: {0}")]
    InvalidRules(String),

    #[error("session key has been destroyed")]
    SessionDestroyed,

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// True when the envelope was well formed but the key did not open it.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, CoreError::Integrity)
    }

    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::MissingMasterKey => "missing_master_key",
            CoreError::Integrity => "integrity",
            CoreError::MalformedEnvelope(_) => "malformed_envelope",
            CoreError::Encoding(_) => "encoding",
            CoreError::Utf8(_) => "utf8",
            CoreError::Json(_) => "json",
            CoreError::InvalidRules(_) => "invalid_rules",
            CoreError::SessionDestroyed => "session_destroyed",
            CoreError::Config(_) => "config",
            CoreError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
