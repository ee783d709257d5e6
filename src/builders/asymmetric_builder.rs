//! src/builders/asymmetric_builder.rs
//! Validated configuration for RSA algorithms.

use crate::algorithm::{AsymmetricAlgorithm, TextCodec};
use crate::backend::Backend;
use crate::charset::Charset;
use crate::consts::DEFAULT_RSA_KEY_BITS;
use crate::engine::{RsaKeyPair, RsaPadding};
use crate::error::PipecryptError;
use crate::representation::{ByteRepresentation, Representation};
use std::sync::Arc;
use tracing::debug;

/// Configuration for an [`AsymmetricAlgorithm`].
///
/// Without explicit keys, `build` generates a fresh pair of
/// [`DEFAULT_RSA_KEY_BITS`] (or [`with_key_bits`](Self::with_key_bits)) bits.
#[derive(Debug, Clone)]
pub struct AsymmetricConfig {
    keys: Option<RsaKeyPair>,
    key_bits: usize,
    padding: RsaPadding,
    representation: Arc<dyn ByteRepresentation>,
    charset: Charset,
}

impl AsymmetricConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: None,
            key_bits: DEFAULT_RSA_KEY_BITS,
            padding: RsaPadding::default(),
            representation: Arc::new(Representation::default()),
            charset: Charset::default(),
        }
    }

    /// Use existing keys; either half may be absent.
    #[must_use]
    pub fn with_keys(mut self, keys: RsaKeyPair) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Modulus size for generated keys. Ignored when keys are supplied.
    #[must_use]
    pub fn with_key_bits(mut self, bits: usize) -> Self {
        self.key_bits = bits;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: RsaPadding) -> Self {
        self.padding = padding;
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
    pub const fn padding(&self) -> RsaPadding {
        self.padding
    }

    /// # Errors
    ///
    /// [`PipecryptError::Configuration`] when key generation is requested with
    /// too small a modulus or the backend rejects the key.
    pub fn build(self, backend: &dyn Backend) -> Result<AsymmetricAlgorithm, PipecryptError> {
        let keys = match self.keys {
            Some(keys) => keys,
            None => RsaKeyPair::generate(self.key_bits)?,
        };
        let engine = backend.asymmetric_engine(&keys, self.padding)?;
        debug!(
            backend = backend.name(),
            padding = %self.padding,
            modulus_len = keys.modulus_len(),
            "built asymmetric algorithm"
        );
        Ok(AsymmetricAlgorithm::with_parts(
            engine,
            keys,
            TextCodec::new(self.representation, self.charset),
        ))
    }
}

impl Default for AsymmetricConfig {
    fn default() -> Self {
        Self::new()
    }
}
