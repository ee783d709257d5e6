// src/hashing.rs

//! Salted, iterated digests for storing and checking secrets.
//!
//! Output layout: `[salt: salt_len bytes][digest]`, framed with the same
//! [`Framer`] used for IV-prefixed ciphertext.
//!
//! Round 1 hashes `salt || input`; every further round hashes the previous
//! digest.

use crate::algorithm::TextCodec;
use crate::consts::{DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_SALT_SIZE};
use crate::crypto::rng::random_salt;
use crate::error::PipecryptError;
use crate::framer::Framer;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;

/// Digest function behind a [`SaltedHasher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    pub const fn output_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha512 => 64,
        }
    }

    fn iterate<D: Digest>(salt: &[u8], input: &[u8], iterations: u32) -> Vec<u8> {
        let mut digest = D::new().chain_update(salt).chain_update(input).finalize();
        for _ in 1..iterations {
            digest = D::digest(&digest);
        }
        digest.to_vec()
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha512 => "SHA-512",
        })
    }
}

impl FromStr for DigestAlgorithm {
    type Err = PipecryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "").as_str() {
            "SHA256" => Ok(DigestAlgorithm::Sha256),
            "SHA512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(PipecryptError::Configuration(format!(
                "unknown digest algorithm: {s}"
            ))),
        }
    }
}

/// Salted, iterated hasher.
///
/// Immutable and `Send + Sync`; every [`hash`](Self::hash) call draws a fresh salt.
#[derive(Debug, Clone)]
pub struct SaltedHasher {
    algorithm: DigestAlgorithm,
    iterations: u32,
    framer: Framer,
    codec: TextCodec,
}

impl SaltedHasher {
    /// SHA-256, [`DEFAULT_HASH_ITERATIONS`] rounds, [`DEFAULT_HASH_SALT_SIZE`]-byte salt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            algorithm: DigestAlgorithm::default(),
            iterations: DEFAULT_HASH_ITERATIONS,
            framer: Framer::new(DEFAULT_HASH_SALT_SIZE),
            codec: TextCodec::default(),
        }
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Number of rounds; zero is rejected when hashing.
    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_salt_len(mut self, salt_len: usize) -> Self {
        self.framer = Framer::new(salt_len);
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: TextCodec) -> Self {
        self.codec = codec;
        self
    }

    pub const fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn salt_len(&self) -> usize {
        self.framer.first_segment_len().unwrap_or(0)
    }

    /// Hashes `input` under a fresh random salt; returns `salt || digest`.
    pub fn hash(&self, input: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let salt = random_salt(self.salt_len())?;
        self.hash_with_salt(&salt, input)
    }

    /// Hashes `input` under `salt`; returns `salt || digest`.
    pub fn hash_with_salt(&self, salt: &[u8], input: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        let digest = self.digest(salt, input)?;
        self.framer.combine(salt, &digest)
    }

    /// Recomputes the digest for `input` with the salt stored in `hashed`.
    /// Digest comparison runs in constant time.
    pub fn matches(&self, input: &[u8], hashed: &[u8]) -> Result<bool, PipecryptError> {
        let (salt, stored) = self.framer.split(hashed)?;
        let computed = self.digest(salt, input)?;
        Ok(bool::from(computed.as_slice().ct_eq(stored)))
    }

    /// Text variant of [`hash`](Self::hash) using the configured codec.
    pub fn hash_text(&self, input: &str) -> Result<String, PipecryptError> {
        let bytes = self.codec.charset().encode(input)?;
        let hashed = self.hash(&bytes)?;
        Ok(self.codec.representation().to_text(&hashed))
    }

    /// Text variant of [`matches`](Self::matches).
    pub fn matches_text(&self, input: &str, hashed: &str) -> Result<bool, PipecryptError> {
        let bytes = self.codec.charset().encode(input)?;
        let hashed = self.codec.representation().from_text(hashed)?;
        self.matches(&bytes, &hashed)
    }

    fn digest(&self, salt: &[u8], input: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        if self.iterations == 0 {
            return Err(PipecryptError::Configuration(
                "hash iterations must be at least 1".into(),
            ));
        }
        Ok(match self.algorithm {
            DigestAlgorithm::Sha256 => DigestAlgorithm::iterate::<Sha256>(salt, input, self.iterations),
            DigestAlgorithm::Sha512 => DigestAlgorithm::iterate::<Sha512>(salt, input, self.iterations),
        })
    }
}

impl Default for SaltedHasher {
    fn default() -> Self {
        Self::new()
    }
}
