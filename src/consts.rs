//! # Constants
//!
//! Defaults and limits used by the key derivation, cipher and hashing layers.

/// Minimum allowed PBKDF2 iteration count.
pub const PBKDF2_MIN_ITER: u32 = 1;

/// Maximum allowed PBKDF2 iteration count.
///
/// Set to `5_000_000` to prevent runaway computation times.
pub const PBKDF2_MAX_ITER: u32 = 5_000_000;

/// Default PBKDF2 iteration count when a configuration does not set one.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 1_000;

/// Largest derived key accepted by [`DerivationParameters`](crate::DerivationParameters), in bits.
pub const MAX_DERIVED_KEY_BITS: u32 = 4096;

/// Fallback salt used when a configuration does not supply one.
///
/// A fixed salt shared by every deployment defeats per-user salting.
/// Building with it logs a warning; override it with
/// [`SymmetricConfig::with_salt`](crate::SymmetricConfig::with_salt).
pub const DEFAULT_SALT: &[u8] = b"pipecrypt:default-salt:v1";

/// Default length for random salts (16 bytes).
pub const DEFAULT_SALT_SIZE: usize = 16;

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// Triple-DES block size in bytes.
pub const TDES_BLOCK_SIZE: usize = 8;

/// Default RSA modulus size for generated key pairs.
pub const DEFAULT_RSA_KEY_BITS: usize = 2048;

/// Smallest RSA modulus the key generator will produce.
pub const MIN_RSA_KEY_BITS: usize = 1024;

/// Largest RSA modulus accepted by either backend, generated or supplied.
pub const MAX_RSA_KEY_BITS: usize = 4096;

/// Fixed PKCS#1 v1.5 encryption overhead (`00 02 PS{8+} 00`).
pub const PKCS1V15_OVERHEAD: usize = 11;

/// Output length of SHA-256, the OAEP hash.
pub const OAEP_HASH_LEN: usize = 32;

/// Default iteration count for [`SaltedHasher`](crate::SaltedHasher).
pub const DEFAULT_HASH_ITERATIONS: u32 = 1_000;

/// Default salt length for [`SaltedHasher`](crate::SaltedHasher).
pub const DEFAULT_HASH_SALT_SIZE: usize = 8;
