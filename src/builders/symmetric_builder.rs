//! src/builders/symmetric_builder.rs
//! Validated configuration for block-cipher algorithms.

use crate::algorithm::{SymmetricAlgorithm, TextCodec};
use crate::aliases::{KeyMaterial, PasswordBytes};
use crate::backend::Backend;
use crate::builders::Pbkdf2Builder;
use crate::charset::Charset;
use crate::crypto::kdf::Prf;
use crate::crypto::rng::{IvGenerator, RandomIvGenerator};
use crate::engine::SymmetricCipher;
use crate::error::PipecryptError;
use crate::representation::{ByteRepresentation, Representation};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Configuration for a [`SymmetricAlgorithm`].
///
/// Exactly one secret must be supplied: a password (stretched with PBKDF2)
/// or a raw key of the cipher's key length.
///
/// ```no_run
/// use pipecrypt::{EncryptionAlgorithm, RustCryptoBackend, SymmetricCipher, SymmetricConfig};
///
/// let algorithm = SymmetricConfig::new(SymmetricCipher::Aes256Cbc)
///     .with_password("correct horse")
///     .with_salt(b"per-deployment salt".to_vec())
///     .build(&RustCryptoBackend)?;
/// let ct = algorithm.encrypt_text("hello")?;
/// assert_eq!(algorithm.decrypt_text(&ct)?, "hello");
/// # Ok::<(), pipecrypt::PipecryptError>(())
/// ```
pub struct SymmetricConfig {
    cipher: SymmetricCipher,
    password: Option<PasswordBytes>,
    key: Option<KeyMaterial>,
    kdf: Pbkdf2Builder,
    iv_generator: Arc<dyn IvGenerator>,
    representation: Arc<dyn ByteRepresentation>,
    charset: Charset,
}

impl SymmetricConfig {
    #[must_use]
    pub fn new(cipher: SymmetricCipher) -> Self {
        Self {
            cipher,
            password: None,
            key: None,
            kdf: Pbkdf2Builder::new(),
            iv_generator: Arc::new(RandomIvGenerator),
            representation: Arc::new(Representation::default()),
            charset: Charset::default(),
        }
    }

    /// Password as text; its UTF-8 bytes feed the key derivation.
    #[must_use]
    pub fn with_password(self, password: impl AsRef<str>) -> Self {
        self.with_password_bytes(password.as_ref().as_bytes().to_vec())
    }

    #[must_use]
    pub fn with_password_bytes(mut self, password: impl Into<Vec<u8>>) -> Self {
        self.password = Some(PasswordBytes::new(password.into()));
        self
    }

    /// Raw key, used as-is. Skips key derivation.
    #[must_use]
    pub fn with_key(mut self, key: KeyMaterial) -> Self {
        self.key = Some(key);
        self
    }

    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.kdf = self.kdf.with_salt(salt);
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.kdf = self.kdf.with_iterations(iterations);
        self
    }

    #[must_use]
    pub fn with_prf(mut self, prf: Prf) -> Self {
        self.kdf = self.kdf.with_prf(prf);
        self
    }

    /// Replace the whole key-derivation setup.
    #[must_use]
    pub fn with_kdf(mut self, kdf: Pbkdf2Builder) -> Self {
        self.kdf = kdf;
        self
    }

    #[must_use]
    pub fn with_iv_generator(mut self, generator: impl IvGenerator + 'static) -> Self {
        self.iv_generator = Arc::new(generator);
        self
    }

    #[must_use]
    pub fn with_representation(mut self, representation: impl ByteRepresentation + 'static) -> Self {
        self.representation = Arc::new(representation);
        self
    }

    #[must_use]
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    #[must_use]
    pub const fn cipher(&self) -> SymmetricCipher {
        self.cipher
    }

    #[must_use]
    pub fn kdf(&self) -> &Pbkdf2Builder {
        &self.kdf
    }

    /// Validate, derive (or adopt) the key and assemble the algorithm.
    ///
    /// # Errors
    ///
    /// - [`PipecryptError::Configuration`] - no secret, both secrets, or a raw
    ///   key of the wrong length
    /// - [`PipecryptError::Argument`] - empty password
    /// - [`PipecryptError::KeyDerivation`] - iteration count out of range
    pub fn build(self, backend: &dyn Backend) -> Result<SymmetricAlgorithm, PipecryptError> {
        let key = match (self.password, self.key) {
            (Some(_), Some(_)) => {
                return Err(PipecryptError::Configuration(
                    "password and raw key are mutually exclusive".into(),
                ))
            }
            (None, None) => {
                return Err(PipecryptError::Configuration(
                    "no password or key configured".into(),
                ))
            }
            (Some(password), None) => {
                if password.expose_secret().is_empty() {
                    return Err(PipecryptError::Argument("password is empty".into()));
                }
                self.kdf
                    .derive(backend, password, self.cipher.key_size_bits())?
            }
            (None, Some(key)) => key,
        };

        let engine = backend.symmetric_engine(self.cipher, key)?;
        debug!(
            backend = backend.name(),
            cipher = %self.cipher,
            charset = %self.charset,
            "built symmetric algorithm"
        );
        Ok(SymmetricAlgorithm::with_parts(
            engine,
            self.iv_generator,
            TextCodec::new(self.representation, self.charset),
        ))
    }
}

impl fmt::Debug for SymmetricConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricConfig")
            .field("cipher", &self.cipher)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("kdf", &self.kdf)
            .field("iv_generator", &self.iv_generator)
            .field("representation", &self.representation)
            .field("charset", &self.charset)
            .finish()
    }
}
