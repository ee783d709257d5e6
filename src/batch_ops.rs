// src/batch_ops.rs
//! Parallel batch helpers over one shared algorithm instance.
//!
//! Each message gets its own IV and cipher context, so the only shared
//! state is the immutable algorithm itself. The first failure is returned.

use crate::algorithm::EncryptionAlgorithm;
use crate::error::PipecryptError;
use rayon::prelude::*;

/// Encrypts every message in parallel; output order matches input order.
pub fn encrypt_batch<A, T>(algorithm: &A, plaintexts: &[T]) -> Result<Vec<Vec<u8>>, PipecryptError>
where
    A: EncryptionAlgorithm + ?Sized,
    T: AsRef<[u8]> + Sync,
{
    plaintexts
        .par_iter()
        .map(|p| algorithm.encrypt_bytes(p.as_ref()))
        .collect()
}

/// Decrypts every message in parallel; output order matches input order.
pub fn decrypt_batch<A, T>(algorithm: &A, ciphertexts: &[T]) -> Result<Vec<Vec<u8>>, PipecryptError>
where
    A: EncryptionAlgorithm + ?Sized,
    T: AsRef<[u8]> + Sync,
{
    ciphertexts
        .par_iter()
        .map(|c| algorithm.decrypt_bytes(c.as_ref()))
        .collect()
}
