// src/engine/mod.rs

//! Cipher engines.
//!
//! An engine wraps one concrete primitive and the key material it owns.
//! Engines are produced by a [`Backend`](crate::Backend); two backends must
//! yield engines that are interchangeable byte for byte.
//!
//! Engines hold no mutable state: every call keys a fresh cipher context,
//! so one engine can serve any number of threads.

pub mod keys;

use crate::consts::{AES_BLOCK_SIZE, OAEP_HASH_LEN, PKCS1V15_OVERHEAD, TDES_BLOCK_SIZE};
use crate::error::PipecryptError;
use std::fmt;
use std::str::FromStr;

pub use keys::{RsaKeyPair, RsaPrivateComponents, RsaPublicComponents};

// ─────────────────────────────────────────────────────────────────────────────
// Scheme names
// ─────────────────────────────────────────────────────────────────────────────

/// Supported symmetric schemes. All run in CBC mode with PKCS#7 padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymmetricCipher {
    Aes128Cbc,
    Aes256Cbc,
    /// Triple-DES EDE with three independent keys.
    TripleDesCbc,
}

impl SymmetricCipher {
    pub const ALL: [SymmetricCipher; 3] = [
        SymmetricCipher::Aes128Cbc,
        SymmetricCipher::Aes256Cbc,
        SymmetricCipher::TripleDesCbc,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            SymmetricCipher::Aes128Cbc => "AES-128-CBC",
            SymmetricCipher::Aes256Cbc => "AES-256-CBC",
            SymmetricCipher::TripleDesCbc => "DESede-CBC",
        }
    }

    /// Key size the cipher accepts, in bits.
    pub const fn key_size_bits(self) -> u32 {
        match self {
            SymmetricCipher::Aes128Cbc => 128,
            SymmetricCipher::Aes256Cbc => 256,
            SymmetricCipher::TripleDesCbc => 192,
        }
    }

    pub const fn key_len(self) -> usize {
        (self.key_size_bits() / 8) as usize
    }

    /// Block size in bytes; also the IV length.
    pub const fn block_size(self) -> usize {
        match self {
            SymmetricCipher::Aes128Cbc | SymmetricCipher::Aes256Cbc => AES_BLOCK_SIZE,
            SymmetricCipher::TripleDesCbc => TDES_BLOCK_SIZE,
        }
    }

    /// Ciphertext length (without IV) for a plaintext of `plaintext_len` bytes.
    pub const fn padded_len(self, plaintext_len: usize) -> usize {
        let block = self.block_size();
        (plaintext_len / block + 1) * block
    }
}

impl fmt::Display for SymmetricCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymmetricCipher {
    type Err = PipecryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', '_', '/'], "");
        match normalized.as_str() {
            "AES128CBC" | "AES128" | "AESCBC128" => Ok(SymmetricCipher::Aes128Cbc),
            "AES256CBC" | "AES256" | "AESCBC256" => Ok(SymmetricCipher::Aes256Cbc),
            "DESEDECBC" | "DESEDE" | "3DES" | "TRIPLEDES" | "DESEDE3CBC" | "TDES" => {
                Ok(SymmetricCipher::TripleDesCbc)
            }
            _ => Err(PipecryptError::Configuration(format!(
                "unsupported symmetric cipher: {s}"
            ))),
        }
    }
}

/// RSA encryption paddings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RsaPadding {
    /// PKCS#1 v1.5 (a 2048-bit key takes up to 245 bytes).
    #[default]
    Pkcs1v15,
    /// OAEP with SHA-256 and MGF1-SHA256 (a 2048-bit key takes up to 190 bytes).
    OaepSha256,
}

impl RsaPadding {
    /// Bytes of the modulus consumed by the padding.
    pub const fn overhead(self) -> usize {
        match self {
            RsaPadding::Pkcs1v15 => PKCS1V15_OVERHEAD,
            RsaPadding::OaepSha256 => 2 * OAEP_HASH_LEN + 2,
        }
    }

    /// Largest plaintext accepted for a modulus of `modulus_len` bytes.
    pub const fn max_plaintext_len(self, modulus_len: usize) -> usize {
        modulus_len.saturating_sub(self.overhead())
    }
}

impl fmt::Display for RsaPadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RsaPadding::Pkcs1v15 => "PKCS1",
            RsaPadding::OaepSha256 => "OAEP-SHA256",
        })
    }
}

impl FromStr for RsaPadding {
    type Err = PipecryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', '_', '#', ' '], "");
        match normalized.as_str() {
            "PKCS1" | "PKCS1V15" | "PKCS1PADDING" => Ok(RsaPadding::Pkcs1v15),
            "OAEP" | "OAEPSHA256" | "OAEPWITHSHA256ANDMGF1PADDING" => Ok(RsaPadding::OaepSha256),
            _ => Err(PipecryptError::Configuration(format!(
                "unsupported RSA padding: {s}"
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine contracts
// ─────────────────────────────────────────────────────────────────────────────

/// Block cipher in CBC mode with PKCS#7 padding, keyed at construction.
pub trait SymmetricEngine: Send + Sync {
    fn cipher(&self) -> SymmetricCipher;

    /// Encrypts `plaintext` under the owned key and `iv` (one block long).
    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>, PipecryptError>;

    /// Decrypts `ciphertext`; any padding or key mismatch is an opaque
    /// [`PipecryptError::Cipher`].
    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>, PipecryptError>;
}

/// RSA encryption with a fixed padding. No IV.
pub trait AsymmetricEngine: Send + Sync {
    fn padding(&self) -> RsaPadding;

    /// Largest accepted plaintext, or `None` without a public key.
    fn max_plaintext_len(&self) -> Option<usize>;

    /// Fails with [`PipecryptError::Configuration`] when no public key is held.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, PipecryptError>;

    /// Fails with [`PipecryptError::Configuration`] when no private key is held.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, PipecryptError>;
}

pub(crate) fn no_public_key() -> PipecryptError {
    PipecryptError::Configuration("no public key available".into())
}

pub(crate) fn no_private_key() -> PipecryptError {
    PipecryptError::Configuration("no private key available".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cipher_geometry() {
        assert_eq!(SymmetricCipher::Aes128Cbc.key_len(), 16);
        assert_eq!(SymmetricCipher::Aes256Cbc.key_len(), 32);
        assert_eq!(SymmetricCipher::TripleDesCbc.key_len(), 24);
        assert_eq!(SymmetricCipher::TripleDesCbc.block_size(), 8);
        assert_eq!(SymmetricCipher::Aes128Cbc.padded_len(0), 16);
        assert_eq!(SymmetricCipher::Aes128Cbc.padded_len(16), 32);
        assert_eq!(SymmetricCipher::TripleDesCbc.padded_len(7), 8);
    }

    #[test]
    fn cipher_names_parse() {
        for cipher in SymmetricCipher::ALL {
            assert_eq!(cipher.name().parse::<SymmetricCipher>().unwrap(), cipher);
        }
        assert_eq!(
            "3des".parse::<SymmetricCipher>().unwrap(),
            SymmetricCipher::TripleDesCbc
        );
        assert!(matches!(
            "RC4".parse::<SymmetricCipher>(),
            Err(PipecryptError::Configuration(_))
        ));
    }

    #[test]
    fn rsa_limits_for_2048_bits() {
        assert_eq!(RsaPadding::Pkcs1v15.max_plaintext_len(256), 245);
        assert_eq!(RsaPadding::OaepSha256.max_plaintext_len(256), 190);
        assert_eq!("OAEP".parse::<RsaPadding>().unwrap(), RsaPadding::OaepSha256);
    }
}
