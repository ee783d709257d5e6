//! src/builders/pbkdf2_builder.rs
//! PBKDF2 parameter builder: salt, iteration count and PRF in one place.

use crate::aliases::{KeyMaterial, PasswordBytes};
use crate::backend::Backend;
use crate::consts::{DEFAULT_PBKDF2_ITERATIONS, DEFAULT_SALT, DEFAULT_SALT_SIZE};
use crate::crypto::kdf::{DerivationParameters, Prf};
use crate::crypto::rng::random_salt;
use crate::error::PipecryptError;
use tracing::warn;

/// PBKDF2 key derivation builder
///
/// Defaults: [`DEFAULT_PBKDF2_ITERATIONS`] iterations, HMAC-SHA512, and the
/// built-in [`DEFAULT_SALT`] until a salt is supplied. Deriving with the
/// built-in salt logs a warning.
///
/// # Thread Safety
///
/// This type is **thread-safe** (`Send + Sync`). It holds no secrets; the
/// password is handed over only when parameters are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbkdf2Builder {
    iterations: u32,
    salt: Option<Vec<u8>>,
    prf: Prf,
}

impl Pbkdf2Builder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
            salt: None,
            prf: Prf::default(),
        }
    }

    /// Set the iteration count. Out-of-range values fail at derivation time
    /// with [`PipecryptError::KeyDerivation`].
    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the salt. Accepts `Vec<u8>`, `&[u8]`, `&str`, ...
    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// Replace the salt with [`DEFAULT_SALT_SIZE`] fresh random bytes.
    pub fn with_random_salt(self) -> Result<Self, PipecryptError> {
        Ok(self.with_salt(random_salt(DEFAULT_SALT_SIZE)?))
    }

    #[must_use]
    pub fn with_prf(mut self, prf: Prf) -> Self {
        self.prf = prf;
        self
    }

    /// Salt in effect, falling back to [`DEFAULT_SALT`].
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        self.salt.as_deref().unwrap_or(DEFAULT_SALT)
    }

    /// `true` while no salt has been supplied.
    #[must_use]
    pub const fn uses_default_salt(&self) -> bool {
        self.salt.is_none()
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    #[must_use]
    pub const fn prf(&self) -> Prf {
        self.prf
    }

    /// Bundle `password` with the configured settings for a `key_size_bits` key.
    pub fn parameters(&self, password: PasswordBytes, key_size_bits: u32) -> DerivationParameters {
        if self.uses_default_salt() {
            warn!("deriving a key with the built-in default salt; supply a per-deployment salt");
        }
        DerivationParameters::new(password, self.salt(), self.iterations, key_size_bits)
            .with_prf(self.prf)
    }

    /// Convenience: derive a key through `backend`.
    pub fn derive(
        &self,
        backend: &dyn Backend,
        password: PasswordBytes,
        key_size_bits: u32,
    ) -> Result<KeyMaterial, PipecryptError> {
        backend.derive_key(&self.parameters(password, key_size_bits))
    }
}

impl Default for Pbkdf2Builder {
    fn default() -> Self {
        Self::new()
    }
}
