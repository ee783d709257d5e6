//! src/backend/rustcrypto.rs
//! Backend built on the high-level RustCrypto crates: `pbkdf2` for key
//! derivation, the `cbc` block-mode crate for CBC + PKCS#7 and the `rsa`
//! crate's padding schemes.

use crate::aliases::KeyMaterial;
use crate::backend::{check_iv_len, check_key_len, Backend};
use crate::crypto::kdf::pbkdf2::derive_pbkdf2_key;
use crate::crypto::kdf::DerivationParameters;
use crate::crypto::rsa_padding::message_too_long;
use crate::engine::{
    no_private_key, no_public_key, AsymmetricEngine, RsaKeyPair, RsaPadding, SymmetricCipher,
    SymmetricEngine,
};
use crate::error::PipecryptError;

use aes::{Aes128, Aes256};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use des::TdesEde3;
use rand_core::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

/// Backend delegating to `pbkdf2`, `cbc` and `rsa`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoBackend;

impl Backend for RustCryptoBackend {
    fn name(&self) -> &'static str {
        "rustcrypto"
    }

    fn derive_key(&self, params: &DerivationParameters) -> Result<KeyMaterial, PipecryptError> {
        derive_pbkdf2_key(params)
    }

    fn symmetric_engine(
        &self,
        cipher: SymmetricCipher,
        key: KeyMaterial,
    ) -> Result<Box<dyn SymmetricEngine>, PipecryptError> {
        check_key_len(cipher, &key)?;
        Ok(Box::new(BlockModeEngine { cipher, key }))
    }

    fn asymmetric_engine(
        &self,
        keys: &RsaKeyPair,
        padding: RsaPadding,
    ) -> Result<Box<dyn AsymmetricEngine>, PipecryptError> {
        Ok(Box::new(RsaCrateEngine::new(keys, padding)?))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Symmetric
// ─────────────────────────────────────────────────────────────────────────────

struct BlockModeEngine {
    cipher: SymmetricCipher,
    key: KeyMaterial,
}

impl SymmetricEngine for BlockModeEngine {
    fn cipher(&self) -> SymmetricCipher {
        self.cipher
    }

    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        check_iv_len(self.cipher, iv)?;
        let key = self.key.expose_secret().as_slice();
        match self.cipher {
            SymmetricCipher::Aes128Cbc => encrypt_padded::<Aes128>(key, iv, plaintext),
            SymmetricCipher::Aes256Cbc => encrypt_padded::<Aes256>(key, iv, plaintext),
            SymmetricCipher::TripleDesCbc => encrypt_padded::<TdesEde3>(key, iv, plaintext),
        }
    }

    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        check_iv_len(self.cipher, iv)?;
        if ciphertext.is_empty() || ciphertext.len() % self.cipher.block_size() != 0 {
            return Err(PipecryptError::decryption_failed());
        }
        let key = self.key.expose_secret().as_slice();
        match self.cipher {
            SymmetricCipher::Aes128Cbc => decrypt_padded::<Aes128>(key, iv, ciphertext),
            SymmetricCipher::Aes256Cbc => decrypt_padded::<Aes256>(key, iv, ciphertext),
            SymmetricCipher::TripleDesCbc => decrypt_padded::<TdesEde3>(key, iv, ciphertext),
        }
    }
}

fn encrypt_padded<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, PipecryptError>
where
    C: BlockCipher + BlockEncryptMut,
    cbc::Encryptor<C>: KeyIvInit + BlockEncryptMut,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| PipecryptError::Configuration("invalid key or IV length".into()))?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt_padded<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, PipecryptError>
where
    C: BlockCipher + BlockDecryptMut,
    cbc::Decryptor<C>: KeyIvInit + BlockDecryptMut,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| PipecryptError::Configuration("invalid key or IV length".into()))?;
    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| PipecryptError::decryption_failed())
}

// ─────────────────────────────────────────────────────────────────────────────
// Asymmetric
// ─────────────────────────────────────────────────────────────────────────────

struct RsaCrateEngine {
    padding: RsaPadding,
    public: Option<RsaPublicKey>,
    private: Option<RsaPrivateKey>,
}

impl RsaCrateEngine {
    fn new(keys: &RsaKeyPair, padding: RsaPadding) -> Result<Self, PipecryptError> {
        let public = keys
            .public()
            .map(|k| RsaPublicKey::new(k.modulus().clone(), k.public_exponent().clone()))
            .transpose()
            .map_err(|e| PipecryptError::Configuration(format!("invalid RSA public key: {e}")))?;
        let private = keys
            .private()
            .map(|k| {
                RsaPrivateKey::from_components(
                    k.modulus().clone(),
                    k.public_exponent().clone(),
                    k.private_exponent().clone(),
                    k.primes().to_vec(),
                )
            })
            .transpose()
            .map_err(|e| PipecryptError::Configuration(format!("invalid RSA private key: {e}")))?;
        Ok(Self {
            padding,
            public,
            private,
        })
    }
}

impl AsymmetricEngine for RsaCrateEngine {
    fn padding(&self) -> RsaPadding {
        self.padding
    }

    fn max_plaintext_len(&self) -> Option<usize> {
        self.public
            .as_ref()
            .map(|k| self.padding.max_plaintext_len(k.size()))
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let key = self.public.as_ref().ok_or_else(no_public_key)?;
        let max = self.padding.max_plaintext_len(key.size());
        if plaintext.len() > max {
            return Err(message_too_long(plaintext.len(), max));
        }
        match self.padding {
            RsaPadding::Pkcs1v15 => key.encrypt(&mut OsRng, Pkcs1v15Encrypt, plaintext),
            RsaPadding::OaepSha256 => key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext),
        }
        .map_err(|e| PipecryptError::Cipher(format!("RSA encryption failed: {e}")))
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let key = self.private.as_ref().ok_or_else(no_private_key)?;
        match self.padding {
            RsaPadding::Pkcs1v15 => key.decrypt(Pkcs1v15Encrypt, ciphertext),
            RsaPadding::OaepSha256 => key.decrypt(Oaep::new::<Sha256>(), ciphertext),
        }
        .map_err(|_| PipecryptError::decryption_failed())
    }
}
