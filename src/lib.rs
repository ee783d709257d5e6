// src/lib.rs

//! Backend-agnostic symmetric (CBC) and RSA encryption, PBKDF2 key
//! derivation and salted hashing behind one configuration surface.
//!
//! ```no_run
//! use pipecrypt::{EncryptionAlgorithm, PrimitiveBackend, SymmetricCipher, SymmetricConfig};
//!
//! let algorithm = SymmetricConfig::new(SymmetricCipher::Aes128Cbc)
//!     .with_password("s3cret")
//!     .with_salt("per-deployment salt")
//!     .build(&PrimitiveBackend)?;
//! let framed = algorithm.encrypt_bytes(b"attack at dawn")?;
//! assert_eq!(algorithm.decrypt_bytes(&framed)?, b"attack at dawn");
//! # Ok::<(), pipecrypt::PipecryptError>(())
//! ```

pub mod algorithm;
pub mod aliases;
pub mod backend;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod charset;
pub mod consts;
pub mod crypto;
pub mod engine;
pub mod error;
pub mod framer;
pub mod hashing;
pub mod representation;
pub mod utils;

// High-level API
pub use algorithm::{AsymmetricAlgorithm, EncryptionAlgorithm, SymmetricAlgorithm, TextCodec};
pub use builders::{AsymmetricConfig, Pbkdf2Builder, SymmetricConfig};
pub use error::PipecryptError;

// Backends and engines
pub use backend::{Backend, PrimitiveBackend, RustCryptoBackend};
pub use engine::{
    AsymmetricEngine, RsaKeyPair, RsaPadding, RsaPrivateComponents, RsaPublicComponents,
    SymmetricCipher, SymmetricEngine,
};

// Building blocks
pub use aliases::{KeyMaterial, PasswordBytes};
pub use charset::Charset;
pub use crypto::kdf::{DerivationParameters, Prf};
pub use crypto::rng::{random_salt, IvGenerator, RandomIvGenerator};
pub use framer::Framer;
pub use hashing::{DigestAlgorithm, SaltedHasher};
pub use representation::{ByteRepresentation, Representation};

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};

// Re-exported so callers can build key pairs without naming the `rsa` crate.
pub use rsa::BigUint;
