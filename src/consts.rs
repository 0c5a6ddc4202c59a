// src/consts.rs
//! Shared constants: security parameters and defaults

/// PBKDF2 iterations used for new envelopes
pub const DEFAULT_KDF_ITERATIONS: u32 = 10_000;

/// Upper bound accepted when reading an iteration count back from an envelope
pub const MAX_KDF_ITERATIONS: u32 = 10_000_000;

/// Random salt length in bytes (128 bits)
pub const SALT_LEN: usize = 16;

/// AES block / CBC IV length in bytes
pub const IV_LEN: usize = 16;

/// AES-256 key length in bytes
pub const CIPHER_KEY_LEN: usize = 32;

/// HMAC-SHA256 key length in bytes
pub const MAC_KEY_LEN: usize = 32;

/// HMAC-SHA256 tag length in bytes
pub const TAG_LEN: usize = 32;

/// Current envelope layout version
pub const ENVELOPE_VERSION: u8 = 1;

/// Prefix of the compact single-string storage form
pub const COMPACT_PREFIX: &str = "mg1";

/// Number of recent assessments inspected for deterioration
pub const DETERIORATION_WINDOW: usize = 5;

/// CRITICAL assessments within the window that flag deterioration
pub const DETERIORATION_CRITICAL_THRESHOLD: usize = 2;

/// HIGH assessments within the window that flag deterioration
pub const DETERIORATION_HIGH_THRESHOLD: usize = 3;

/// Default number of assessments kept by a detector
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Default locale for crisis messages and contacts
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// Default requests allowed per identifier and window
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 20;

/// Default rate-limit window length in seconds
pub const DEFAULT_RATE_WINDOW_SECS: u64 = 60;

/// Tracked identifiers that trigger an in-line sweep of expired rate-limit windows
pub const RATE_LIMIT_PURGE_THRESHOLD: usize = 1024;

/// Shown in place of a message whose envelope cannot be opened
pub const UNDECRYPTABLE_PLACEHOLDER: &str = "[Message could not be decrypted]";

/// Masked client address recorded in audit entries
pub const MASKED_IP: &str = "xxx.xxx.xxx.xxx";
