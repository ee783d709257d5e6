//! src/backend/primitive.rs
//! Backend that composes everything from raw primitives.
//!
//! - PBKDF2: the block function computed over `hmac` ([`derive_iterated_hmac_key`])
//! - CBC: chained by hand over the `aes`/`des` block ciphers ([`cbc_encrypt`])
//! - RSA: `m^e mod n` / `c^d mod n` with padding from [`crate::crypto::rsa_padding`]
//!
//! Output is byte-identical to [`RustCryptoBackend`](crate::RustCryptoBackend)
//! for key derivation and CBC, and RSA ciphertext decrypts on either backend.

use crate::aliases::KeyMaterial;
use crate::backend::{check_key_len, Backend};
use crate::crypto::cbc::{cbc_decrypt, cbc_encrypt};
use crate::crypto::kdf::iterated::derive_iterated_hmac_key;
use crate::crypto::kdf::DerivationParameters;
use crate::crypto::rsa_padding::{
    message_too_long, oaep_sha256_pad, oaep_sha256_unpad, pkcs1v15_pad, pkcs1v15_unpad,
};
use crate::engine::{
    no_private_key, no_public_key, AsymmetricEngine, RsaKeyPair, RsaPadding,
    RsaPrivateComponents, RsaPublicComponents, SymmetricCipher, SymmetricEngine,
};
use crate::error::PipecryptError;
use crate::utils::left_pad;

use aes::{Aes128, Aes256};
use des::TdesEde3;
use rsa::BigUint;

/// Backend built from raw primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveBackend;

impl Backend for PrimitiveBackend {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn derive_key(&self, params: &DerivationParameters) -> Result<KeyMaterial, PipecryptError> {
        derive_iterated_hmac_key(params)
    }

    fn symmetric_engine(
        &self,
        cipher: SymmetricCipher,
        key: KeyMaterial,
    ) -> Result<Box<dyn SymmetricEngine>, PipecryptError> {
        check_key_len(cipher, &key)?;
        Ok(Box::new(ChainedBlockEngine { cipher, key }))
    }

    fn asymmetric_engine(
        &self,
        keys: &RsaKeyPair,
        padding: RsaPadding,
    ) -> Result<Box<dyn AsymmetricEngine>, PipecryptError> {
        let three = BigUint::from(3u32);
        let exponents = keys
            .public()
            .map(RsaPublicComponents::public_exponent)
            .into_iter()
            .chain(keys.private().map(RsaPrivateComponents::public_exponent));
        for e in exponents {
            if *e < three {
                return Err(PipecryptError::Configuration(
                    "RSA public exponent must be at least 3".into(),
                ));
            }
        }
        Ok(Box::new(RawRsaEngine {
            padding,
            public: keys.public().cloned(),
            private: keys.private().cloned(),
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Symmetric
// ─────────────────────────────────────────────────────────────────────────────

struct ChainedBlockEngine {
    cipher: SymmetricCipher,
    key: KeyMaterial,
}

impl SymmetricEngine for ChainedBlockEngine {
    fn cipher(&self) -> SymmetricCipher {
        self.cipher
    }

    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let key = self.key.expose_secret().as_slice();
        match self.cipher {
            SymmetricCipher::Aes128Cbc => cbc_encrypt::<Aes128>(key, iv, plaintext),
            SymmetricCipher::Aes256Cbc => cbc_encrypt::<Aes256>(key, iv, plaintext),
            SymmetricCipher::TripleDesCbc => cbc_encrypt::<TdesEde3>(key, iv, plaintext),
        }
    }

    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let key = self.key.expose_secret().as_slice();
        match self.cipher {
            SymmetricCipher::Aes128Cbc => cbc_decrypt::<Aes128>(key, iv, ciphertext),
            SymmetricCipher::Aes256Cbc => cbc_decrypt::<Aes256>(key, iv, ciphertext),
            SymmetricCipher::TripleDesCbc => cbc_decrypt::<TdesEde3>(key, iv, ciphertext),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Asymmetric
// ─────────────────────────────────────────────────────────────────────────────

struct RawRsaEngine {
    padding: RsaPadding,
    public: Option<RsaPublicComponents>,
    private: Option<RsaPrivateComponents>,
}

impl AsymmetricEngine for RawRsaEngine {
    fn padding(&self) -> RsaPadding {
        self.padding
    }

    fn max_plaintext_len(&self) -> Option<usize> {
        self.public
            .as_ref()
            .map(|k| self.padding.max_plaintext_len(k.modulus_len()))
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let key = self.public.as_ref().ok_or_else(no_public_key)?;
        let k = key.modulus_len();
        let max = self.padding.max_plaintext_len(k);
        if plaintext.len() > max {
            return Err(message_too_long(plaintext.len(), max));
        }

        let em = match self.padding {
            RsaPadding::Pkcs1v15 => pkcs1v15_pad(plaintext, k)?,
            RsaPadding::OaepSha256 => oaep_sha256_pad(plaintext, k)?,
        };
        let m = BigUint::from_bytes_be(&em);
        let c = m.modpow(key.public_exponent(), key.modulus());
        left_pad(&c.to_bytes_be(), k)
            .ok_or_else(|| PipecryptError::Cipher("RSA output exceeds modulus length".into()))
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let key = self.private.as_ref().ok_or_else(no_private_key)?;
        let k = key.modulus_len();
        if ciphertext.len() != k {
            return Err(PipecryptError::decryption_failed());
        }
        let c = BigUint::from_bytes_be(ciphertext);
        if &c >= key.modulus() {
            return Err(PipecryptError::decryption_failed());
        }
        let m = c.modpow(key.private_exponent(), key.modulus());
        let em = left_pad(&m.to_bytes_be(), k).ok_or_else(PipecryptError::decryption_failed)?;
        match self.padding {
            RsaPadding::Pkcs1v15 => pkcs1v15_unpad(&em),
            RsaPadding::OaepSha256 => oaep_sha256_unpad(&em),
        }
    }
}
