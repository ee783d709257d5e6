//! src/algorithm/asymmetric.rs
//! RSA orchestrator. No IV and no framing: the ciphertext is the raw
//! modulus-sized RSA output.

use crate::algorithm::{EncryptionAlgorithm, TextCodec};
use crate::engine::{AsymmetricEngine, RsaKeyPair, RsaPadding};
use crate::error::PipecryptError;
use std::fmt;
use tracing::trace;

/// RSA encryption pipeline.
///
/// Built from a key pair that may hold only one half; the unsupported
/// direction fails with [`PipecryptError::Configuration`].
pub struct AsymmetricAlgorithm {
    engine: Box<dyn AsymmetricEngine>,
    keys: RsaKeyPair,
    codec: TextCodec,
}

impl AsymmetricAlgorithm {
    pub(crate) fn with_parts(
        engine: Box<dyn AsymmetricEngine>,
        keys: RsaKeyPair,
        codec: TextCodec,
    ) -> Self {
        Self {
            engine,
            keys,
            codec,
        }
    }

    pub fn padding(&self) -> RsaPadding {
        self.engine.padding()
    }

    /// The key pair this instance was built from.
    pub fn key_pair(&self) -> &RsaKeyPair {
        &self.keys
    }

    /// Largest plaintext `encrypt_bytes` accepts, or `None` without a public key.
    pub fn max_plaintext_len(&self) -> Option<usize> {
        self.engine.max_plaintext_len()
    }
}

impl EncryptionAlgorithm for AsymmetricAlgorithm {
    fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let ciphertext = self.engine.encrypt(plaintext)?;
        trace!(padding = %self.padding(), plaintext_len = plaintext.len(), "RSA encrypted");
        Ok(ciphertext)
    }

    fn decrypt_bytes(&self, ciphertext: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let plaintext = self.engine.decrypt(ciphertext)?;
        trace!(padding = %self.padding(), ciphertext_len = ciphertext.len(), "RSA decrypted");
        Ok(plaintext)
    }

    fn text_codec(&self) -> &TextCodec {
        &self.codec
    }
}

impl fmt::Debug for AsymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsymmetricAlgorithm")
            .field("padding", &self.padding())
            .field("modulus_len", &self.keys.modulus_len())
            .field("has_public", &self.keys.public().is_some())
            .field("has_private", &self.keys.private().is_some())
            .finish()
    }
}
