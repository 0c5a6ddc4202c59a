// src/crypto/encrypt.rs
use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::Mac;

use super::envelope::{tag_hasher, EncryptedPayload, KdfParams};
use super::kdf::derive_keys;
use crate::aliases::MasterSecret;
use crate::consts::{ENVELOPE_VERSION, IV_LEN, SALT_LEN};
use crate::enums::KdfAlgorithm;
use crate::error::{CoreError, Result};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

/// Encrypt plaintext → authenticated envelope (in-memory)
///
/// Salt and IV are drawn fresh for every call.
pub(crate) fn seal(
    master: &MasterSecret,
    context: Option<&str>,
    plaintext: &[u8],
    iterations: u32,
) -> Result<EncryptedPayload> {
    let salt: [u8; SALT_LEN] = rand::random();
    let iv: [u8; IV_LEN] = rand::random();

    let keys = derive_keys(master, context, &salt, iterations);

    let ciphertext = Aes256CbcEnc::new_from_slices(keys.cipher.expose_secret(), &iv)
        .map_err(|_| CoreError::MalformedEnvelope("invalid cipher key length".into()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let tag = tag_hasher(
        &keys.mac,
        ENVELOPE_VERSION,
        iterations,
        &salt,
        &iv,
        &ciphertext,
    )?
    .finalize()
    .into_bytes();

    Ok(EncryptedPayload {
        version: ENVELOPE_VERSION,
        kdf: KdfParams {
            algorithm: KdfAlgorithm::Pbkdf2HmacSha256,
            iterations,
        },
        data: STANDARD.encode(&ciphertext),
        iv: STANDARD.encode(iv),
        salt: STANDARD.encode(salt),
        tag: STANDARD.encode(tag),
        timestamp: Utc::now().timestamp_millis(),
    })
}
