// src/crypto/envelope.rs
//! The encrypted envelope: ciphertext plus everything needed to reopen it
//!
//! An envelope carries its own KDF parameters, so any process holding the
//! master secret (and the context key, if one was used) can decrypt it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::aliases::MacKey32;
use crate::consts::{
    COMPACT_PREFIX, ENVELOPE_VERSION, IV_LEN, MAX_KDF_ITERATIONS, SALT_LEN, TAG_LEN,
};
use crate::enums::KdfAlgorithm;
use crate::error::{CoreError, Result};

pub(crate) type HmacSha256 = Hmac<Sha256>;

const AES_BLOCK_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub algorithm: KdfAlgorithm,
    pub iterations: u32,
}

/// Base64 envelope produced by [`crate::DataEncryption::encrypt`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    pub version: u8,
    pub kdf: KdfParams,
    /// AES-256-CBC ciphertext
    pub data: String,
    pub iv: String,
    pub salt: String,
    /// HMAC-SHA256 over version, iterations, salt, iv and ciphertext
    pub tag: String,
    /// Unix milliseconds at encryption time
    pub timestamp: i64,
}

/// Raw bytes of a validated envelope
pub(crate) struct DecodedEnvelope {
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
    pub tag: Vec<u8>,
    pub iterations: u32,
}

fn decode_fixed<const N: usize>(field: &str, value: &str) -> Result<[u8; N]> {
    let bytes = STANDARD.decode(value)?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        CoreError::MalformedEnvelope(format!("{field} must be {} bytes, got {}", N, b.len()))
    })
}

impl EncryptedPayload {
    pub(crate) fn decode(&self) -> Result<DecodedEnvelope> {
        if self.version != ENVELOPE_VERSION {
            return Err(CoreError::MalformedEnvelope(format!(
                "unsupported version {}",
                self.version
            )));
        }
        let iterations = self.kdf.iterations;
        if iterations == 0 || iterations > MAX_KDF_ITERATIONS {
            return Err(CoreError::MalformedEnvelope(format!(
                "iteration count {iterations} out of range"
            )));
        }

        let salt = decode_fixed::<SALT_LEN>("salt", &self.salt)?;
        let iv = decode_fixed::<IV_LEN>("iv", &self.iv)?;
        let ciphertext = STANDARD.decode(&self.data)?;
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_LEN != 0 {
            return Err(CoreError::MalformedEnvelope(format!(
                "ciphertext length {} is not a positive multiple of {AES_BLOCK_LEN}",
                ciphertext.len()
            )));
        }
        let tag = STANDARD.decode(&self.tag)?;
        if tag.len() != TAG_LEN {
            return Err(CoreError::MalformedEnvelope(format!(
                "tag must be {TAG_LEN} bytes, got {}",
                tag.len()
            )));
        }

        Ok(DecodedEnvelope {
            salt,
            iv,
            ciphertext,
            tag,
            iterations,
        })
    }

    /// Single-string form: `mg1$<iterations>$<timestamp>$<salt>$<iv>$<tag>$<data>`
    pub fn to_compact(&self) -> String {
        format!(
            "{COMPACT_PREFIX}${}${}${}${}${}${}",
            self.kdf.iterations, self.timestamp, self.salt, self.iv, self.tag, self.data
        )
    }

    pub fn from_compact(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('$').collect();
        let [prefix, iterations, timestamp, salt, iv, tag, data] = parts.as_slice() else {
            return Err(CoreError::MalformedEnvelope(format!(
                "compact form has {} fields, expected 7",
                parts.len()
            )));
        };
        if *prefix != COMPACT_PREFIX {
            return Err(CoreError::MalformedEnvelope(format!(
                "unknown compact prefix {prefix:?}"
            )));
        }
        let iterations = iterations
            .parse::<u32>()
            .map_err(|_| CoreError::MalformedEnvelope("iterations is not a number".into()))?;
        let timestamp = timestamp
            .parse::<i64>()
            .map_err(|_| CoreError::MalformedEnvelope("timestamp is not a number".into()))?;

        Ok(EncryptedPayload {
            version: ENVELOPE_VERSION,
            kdf: KdfParams {
                algorithm: KdfAlgorithm::Pbkdf2HmacSha256,
                iterations,
            },
            data: (*data).to_string(),
            iv: (*iv).to_string(),
            salt: (*salt).to_string(),
            tag: (*tag).to_string(),
            timestamp,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// HMAC state primed with every authenticated envelope field
pub(crate) fn tag_hasher(
    mac_key: &MacKey32,
    version: u8,
    iterations: u32,
    salt: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<HmacSha256> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(mac_key.expose_secret())
        .map_err(|_| CoreError::MalformedEnvelope("invalid MAC key length".into()))?;
    mac.update(&[version]);
    mac.update(&iterations.to_be_bytes());
    mac.update(salt);
    mac.update(iv);
    mac.update(ciphertext);
    Ok(mac)
}
