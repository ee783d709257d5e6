//! # Secure-Gate Type Aliases
//!
//! Type aliases for secret buffers backed by [`secure-gate`](https://github.com/Slurp9187/secure-gate).
//! With the `zeroize` feature (on by default) every wrapper scrubs its
//! contents on drop, and reading requires an explicit `.expose_secret()`.
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacSha256`] - PRF for PBKDF2-HMAC-SHA256
//! - [`HmacSha512`] - PRF for PBKDF2-HMAC-SHA512
//!
//! ### Dynamic Secrets
//! - [`KeyMaterial`] - derived or raw cipher key; length fixed by the cipher
//! - [`PasswordBytes`] - password input to key derivation

use hmac::Hmac;
use secure_gate::dynamic_alias;
use sha2::{Sha256, Sha512};

// ─────────────────────────────────────────────────────────────────────────────
// HMAC primitives
// ─────────────────────────────────────────────────────────────────────────────
pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha512 = Hmac<Sha512>;

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
dynamic_alias!(KeyMaterial, Vec<u8>); // owned by exactly one engine
dynamic_alias!(PasswordBytes, Vec<u8>); // raw password bytes, any encoding
