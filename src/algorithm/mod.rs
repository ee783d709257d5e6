// src/algorithm/mod.rs

//! Public encrypt/decrypt contract.
//!
//! An algorithm instance composes an engine with IV generation, framing and
//! text representation. It is immutable once built and safe to share across
//! threads: each call keys its own cipher context and draws its own IV.
//!
//! ```text
//! encrypt: plaintext → [IV] → engine.encrypt → combine(IV, ct) → [to_text]
//! decrypt: [from_text] → split → engine.decrypt → plaintext
//! ```

pub mod asymmetric;
pub mod symmetric;

use crate::charset::Charset;
use crate::error::PipecryptError;
use crate::representation::{ByteRepresentation, Representation};
use std::sync::Arc;

pub use asymmetric::AsymmetricAlgorithm;
pub use symmetric::SymmetricAlgorithm;

/// Text-mode settings: how plaintext strings become bytes and how
/// ciphertext bytes become text.
#[derive(Debug, Clone)]
pub struct TextCodec {
    representation: Arc<dyn ByteRepresentation>,
    charset: Charset,
}

impl TextCodec {
    pub fn new(representation: Arc<dyn ByteRepresentation>, charset: Charset) -> Self {
        Self {
            representation,
            charset,
        }
    }

    pub fn representation(&self) -> &dyn ByteRepresentation {
        self.representation.as_ref()
    }

    pub const fn charset(&self) -> Charset {
        self.charset
    }
}

impl Default for TextCodec {
    /// Lower-case hex, UTF-8.
    fn default() -> Self {
        Self::new(Arc::new(Representation::default()), Charset::default())
    }
}

/// Encrypt/decrypt contract shared by symmetric and RSA configurations.
pub trait EncryptionAlgorithm: Send + Sync {
    /// Encrypts `plaintext` into self-describing ciphertext.
    fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<Vec<u8>, PipecryptError>;

    /// Reverses [`encrypt_bytes`](Self::encrypt_bytes).
    fn decrypt_bytes(&self, ciphertext: &[u8]) -> Result<Vec<u8>, PipecryptError>;

    fn text_codec(&self) -> &TextCodec;

    /// Encodes `plaintext` with the configured charset, encrypts it and
    /// renders the ciphertext with the configured representation.
    fn encrypt_text(&self, plaintext: &str) -> Result<String, PipecryptError> {
        let codec = self.text_codec();
        let bytes = codec.charset().encode(plaintext)?;
        let ciphertext = self.encrypt_bytes(&bytes)?;
        Ok(codec.representation().to_text(&ciphertext))
    }

    /// Reverses [`encrypt_text`](Self::encrypt_text).
    fn decrypt_text(&self, ciphertext: &str) -> Result<String, PipecryptError> {
        let codec = self.text_codec();
        let bytes = codec.representation().from_text(ciphertext)?;
        let plaintext = self.decrypt_bytes(&bytes)?;
        codec.charset().decode(&plaintext)
    }
}
