// src/crypto/kdf.rs
//! PBKDF2 key derivation for envelope encryption

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::aliases::{CipherKey32, MacKey32, MasterSecret};
use crate::consts::{CIPHER_KEY_LEN, MAC_KEY_LEN};

/// Cipher and MAC keys derived from one PBKDF2 run
pub struct DerivedKeys {
    pub cipher: CipherKey32,
    pub mac: MacKey32,
}

/// Derive envelope keys from `master || context` and a salt.
///
/// The 64-byte PBKDF2-HMAC-SHA256 output is split in two halves: the first
/// keys AES-256, the second keys HMAC-SHA256. The same inputs always yield the
/// same keys, which is what lets a fresh process reopen an old envelope.
pub fn derive_keys(
    master: &MasterSecret,
    context: Option<&str>,
    salt: &[u8],
    iterations: u32,
) -> DerivedKeys {
    let mut password = Zeroizing::new(String::with_capacity(
        master.expose_secret().len() + context.map_or(0, str::len),
    ));
    password.push_str(master.expose_secret());
    password.push_str(context.unwrap_or(""));

    let mut okm = Zeroizing::new([0u8; CIPHER_KEY_LEN + MAC_KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut okm[..]);

    let mut cipher = [0u8; CIPHER_KEY_LEN];
    let mut mac = [0u8; MAC_KEY_LEN];
    cipher.copy_from_slice(&okm[..CIPHER_KEY_LEN]);
    mac.copy_from_slice(&okm[CIPHER_KEY_LEN..]);

    DerivedKeys {
        cipher: CipherKey32::new(cipher),
        mac: MacKey32::new(mac),
    }
}
