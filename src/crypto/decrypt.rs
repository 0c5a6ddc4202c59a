// src/crypto/decrypt.rs
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use hmac::Mac;

use super::envelope::{tag_hasher, EncryptedPayload};
use super::kdf::derive_keys;
use crate::aliases::MasterSecret;
use crate::error::{CoreError, Result};

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Decrypt an envelope → plaintext bytes (in-memory)
///
/// The tag is checked before any decryption happens; a wrong key and a
/// tampered envelope both surface as [`CoreError::Integrity`].
pub(crate) fn open(
    master: &MasterSecret,
    context: Option<&str>,
    payload: &EncryptedPayload,
) -> Result<Vec<u8>> {
    let env = payload.decode()?;
    let keys = derive_keys(master, context, &env.salt, env.iterations);

    tag_hasher(
        &keys.mac,
        payload.version,
        env.iterations,
        &env.salt,
        &env.iv,
        &env.ciphertext,
    )?
    .verify_slice(&env.tag)
    .map_err(|_| CoreError::Integrity)?;

    Aes256CbcDec::new_from_slices(keys.cipher.expose_secret(), &env.iv)
        .map_err(|_| CoreError::MalformedEnvelope("invalid cipher key length".into()))?
        .decrypt_padded_vec_mut::<Pkcs7>(&env.ciphertext)
        .map_err(|_| CoreError::Integrity)
}
