//! src/algorithm/symmetric.rs
//! Block-cipher orchestrator: fresh IV per message, IV-prefixed framing.

use crate::algorithm::{EncryptionAlgorithm, TextCodec};
use crate::crypto::rng::{IvGenerator, RandomIvGenerator};
use crate::engine::{SymmetricCipher, SymmetricEngine};
use crate::error::PipecryptError;
use crate::framer::Framer;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Symmetric encryption pipeline.
///
/// Framed ciphertext layout: `[IV: block_size bytes][ciphertext]`.
///
/// # Thread Safety
///
/// `Send + Sync`. The engine is keyed per call and the IV source is
/// thread-safe, so one instance can serve any number of threads.
pub struct SymmetricAlgorithm {
    engine: Box<dyn SymmetricEngine>,
    iv_generator: Arc<dyn IvGenerator>,
    framer: Framer,
    codec: TextCodec,
}

impl SymmetricAlgorithm {
    /// Wraps an engine with OS-random IVs and the default text codec.
    pub fn new(engine: Box<dyn SymmetricEngine>) -> Self {
        Self::with_parts(engine, Arc::new(RandomIvGenerator), TextCodec::default())
    }

    pub(crate) fn with_parts(
        engine: Box<dyn SymmetricEngine>,
        iv_generator: Arc<dyn IvGenerator>,
        codec: TextCodec,
    ) -> Self {
        let framer = Framer::new(engine.cipher().block_size());
        Self {
            engine,
            iv_generator,
            framer,
            codec,
        }
    }

    pub fn cipher(&self) -> SymmetricCipher {
        self.engine.cipher()
    }

    /// Framer splitting IV from ciphertext.
    pub fn framer(&self) -> Framer {
        self.framer
    }

    fn next_iv(&self) -> Result<Vec<u8>, PipecryptError> {
        let block_size = self.cipher().block_size();
        let iv = self.iv_generator.generate_iv(block_size)?;
        if iv.len() != block_size {
            return Err(PipecryptError::Configuration(format!(
                "IV generator returned {} bytes, {} needs {block_size}",
                iv.len(),
                self.cipher()
            )));
        }
        Ok(iv)
    }
}

impl EncryptionAlgorithm for SymmetricAlgorithm {
    fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let iv = self.next_iv()?;
        let ciphertext = self.engine.encrypt(plaintext, &iv)?;
        trace!(
            cipher = %self.cipher(),
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "encrypted"
        );
        self.framer.combine(&iv, &ciphertext)
    }

    fn decrypt_bytes(&self, ciphertext: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let (iv, body) = self.framer.split(ciphertext)?;
        let plaintext = self.engine.decrypt(body, iv)?;
        trace!(cipher = %self.cipher(), framed_len = ciphertext.len(), "decrypted");
        Ok(plaintext)
    }

    fn text_codec(&self) -> &TextCodec {
        &self.codec
    }
}

impl fmt::Debug for SymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricAlgorithm")
            .field("cipher", &self.cipher())
            .field("iv_generator", &self.iv_generator)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
