// src/crypto/rng.rs
//! Secure randomness for IVs, salts and padding.
//!
//! Everything draws from `OsRng`, which is safe to call from any number of
//! threads at once. Each thread keeps its own handle, so no lock is taken.

use crate::error::PipecryptError;
use rand::{rngs::OsRng, TryRngCore};
use std::cell::RefCell;
use std::fmt;

thread_local! {
    static RNG: RefCell<OsRng> = const { RefCell::new(OsRng) };
}

/// Fills `dest` from the operating system RNG.
pub fn fill_random(dest: &mut [u8]) -> Result<(), PipecryptError> {
    RNG.with(|rng_cell| {
        rng_cell
            .borrow_mut()
            .try_fill_bytes(dest)
            .map_err(|e| PipecryptError::Configuration(format!("secure random source failed: {e}")))
    })
}

/// Returns `len` fresh random bytes.
pub fn random_bytes(len: usize) -> Result<Vec<u8>, PipecryptError> {
    let mut bytes = vec![0u8; len];
    fill_random(&mut bytes)?;
    Ok(bytes)
}

/// Returns `len` random bytes, none of which is zero (PKCS#1 v1.5 padding string).
pub fn random_nonzero_bytes(len: usize) -> Result<Vec<u8>, PipecryptError> {
    let mut bytes = random_bytes(len)?;
    let mut single = [0u8; 1];
    for byte in bytes.iter_mut() {
        while *byte == 0 {
            fill_random(&mut single)?;
            *byte = single[0];
        }
    }
    Ok(bytes)
}

/// Random salt of `len` bytes, for callers replacing the built-in default salt.
pub fn random_salt(len: usize) -> Result<Vec<u8>, PipecryptError> {
    random_bytes(len)
}

// ---------------------------------------------------------------------------
// IV sources
// ---------------------------------------------------------------------------

/// Source of per-message initialization vectors.
///
/// Implementations must be safe to call concurrently. The orchestrator checks
/// the returned length against the cipher block size.
pub trait IvGenerator: Send + Sync + fmt::Debug {
    /// Returns a fresh IV of `len` bytes.
    fn generate_iv(&self, len: usize) -> Result<Vec<u8>, PipecryptError>;
}

/// IVs straight from the operating system RNG. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIvGenerator;

impl IvGenerator for RandomIvGenerator {
    #[inline(always)]
    fn generate_iv(&self, len: usize) -> Result<Vec<u8>, PipecryptError> {
        random_bytes(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_are_fresh() {
        let a = random_bytes(32).unwrap();
        let b = random_bytes(32).unwrap();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn nonzero_bytes_contain_no_zero() {
        let bytes = random_nonzero_bytes(4096).unwrap();
        assert!(bytes.iter().all(|&b| b != 0));
    }

    #[test]
    fn iv_generator_honours_length() {
        assert_eq!(RandomIvGenerator.generate_iv(8).unwrap().len(), 8);
        assert!(RandomIvGenerator.generate_iv(0).unwrap().is_empty());
    }
}
