// src/backend/mod.rs

//! Swappable providers of the cryptographic primitives.
//!
//! A [`Backend`] derives keys and builds engines. Callers pick one explicitly
//! and pass it to `build`; there is no process-wide default.
//!
//! - [`RustCryptoBackend`] - high-level RustCrypto crates (`pbkdf2`, `cbc`, `rsa` paddings)
//! - [`PrimitiveBackend`] - composes the same results from raw primitives
//!   (`hmac`, block ciphers, modular exponentiation)
//!
//! Both produce identical derived keys and CBC ciphertext for identical inputs;
//! RSA output is randomized but decrypts on either side.

pub mod primitive;
pub mod rustcrypto;

use crate::aliases::KeyMaterial;
use crate::crypto::kdf::DerivationParameters;
use crate::engine::{AsymmetricEngine, RsaKeyPair, RsaPadding, SymmetricCipher, SymmetricEngine};
use crate::error::PipecryptError;
use std::fmt;

pub use primitive::PrimitiveBackend;
pub use rustcrypto::RustCryptoBackend;

/// Factory for key derivation and cipher engines.
pub trait Backend: Send + Sync + fmt::Debug {
    /// Short identifier, as accepted by [`by_name`].
    fn name(&self) -> &'static str;

    /// PBKDF2 key derivation. Fails with [`PipecryptError::KeyDerivation`]
    /// on out-of-range parameters.
    fn derive_key(&self, params: &DerivationParameters) -> Result<KeyMaterial, PipecryptError>;

    /// Symmetric engine owning `key`; the key length must match `cipher`.
    fn symmetric_engine(
        &self,
        cipher: SymmetricCipher,
        key: KeyMaterial,
    ) -> Result<Box<dyn SymmetricEngine>, PipecryptError>;

    /// RSA engine over whichever halves `keys` holds.
    fn asymmetric_engine(
        &self,
        keys: &RsaKeyPair,
        padding: RsaPadding,
    ) -> Result<Box<dyn AsymmetricEngine>, PipecryptError>;
}

/// Resolves a backend by name (`"rustcrypto"` or `"primitive"`).
pub fn by_name(name: &str) -> Result<Box<dyn Backend>, PipecryptError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "rustcrypto" | "rust-crypto" => Ok(Box::new(RustCryptoBackend)),
        "primitive" | "primitives" => Ok(Box::new(PrimitiveBackend)),
        other => Err(PipecryptError::Configuration(format!(
            "unknown backend: {other}"
        ))),
    }
}

pub(crate) fn check_key_len(cipher: SymmetricCipher, key: &KeyMaterial) -> Result<(), PipecryptError> {
    let len = key.expose_secret().len();
    if len != cipher.key_len() {
        return Err(PipecryptError::Configuration(format!(
            "{cipher} needs a {}-byte key, got {len} bytes",
            cipher.key_len()
        )));
    }
    Ok(())
}

pub(crate) fn check_iv_len(cipher: SymmetricCipher, iv: &[u8]) -> Result<(), PipecryptError> {
    if iv.len() != cipher.block_size() {
        return Err(PipecryptError::Argument(format!(
            "IV is {} bytes, {cipher} needs {}",
            iv.len(),
            cipher.block_size()
        )));
    }
    Ok(())
}
