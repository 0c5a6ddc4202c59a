// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret types used throughout mindful-guard.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(CipherKey32, 32); // AES-256 key half of the PBKDF2 output
fixed_alias!(MacKey32, 32); // HMAC-SHA256 key half of the PBKDF2 output

// Dynamic secrets
dynamic_alias!(MasterSecret, String); // ENCRYPTION_MASTER_KEY / AUDIT_ENCRYPTION_KEY
dynamic_alias!(ContextKey, String); // Optional per-call or per-session key material
