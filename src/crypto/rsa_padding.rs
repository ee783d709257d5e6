//! src/crypto/rsa_padding.rs
//! RSA encryption paddings encoded by hand (RFC 8017).
//!
//! - PKCS#1 v1.5: `EM = 0x00 || 0x02 || PS || 0x00 || M`, `PS` ≥ 8 non-zero random bytes
//! - OAEP: SHA-256 with MGF1-SHA256 and an empty label
//!
//! `k` is always the modulus length in bytes. Decoding failures all collapse
//! to the same opaque cipher error.

use crate::consts::{OAEP_HASH_LEN, PKCS1V15_OVERHEAD};
use crate::crypto::rng::{random_bytes, random_nonzero_bytes};
use crate::error::PipecryptError;
use crate::utils::xor_in_place;
use sha2::{Digest, Sha256};

pub(crate) fn message_too_long(len: usize, max: usize) -> PipecryptError {
    PipecryptError::Cipher(format!(
        "plaintext of {len} bytes exceeds the {max}-byte limit for this key and padding"
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// PKCS#1 v1.5
// ─────────────────────────────────────────────────────────────────────────────

pub fn pkcs1v15_pad(message: &[u8], k: usize) -> Result<Vec<u8>, PipecryptError> {
    let max = k.saturating_sub(PKCS1V15_OVERHEAD);
    if k < PKCS1V15_OVERHEAD || message.len() > max {
        return Err(message_too_long(message.len(), max));
    }
    let ps = random_nonzero_bytes(k - message.len() - 3)?;

    let mut em = Vec::with_capacity(k);
    em.extend_from_slice(&[0x00, 0x02]);
    em.extend_from_slice(&ps);
    em.push(0x00);
    em.extend_from_slice(message);
    Ok(em)
}

pub fn pkcs1v15_unpad(em: &[u8]) -> Result<Vec<u8>, PipecryptError> {
    if em.len() < PKCS1V15_OVERHEAD || em[0] != 0x00 || em[1] != 0x02 {
        return Err(PipecryptError::decryption_failed());
    }
    let separator = em[2..]
        .iter()
        .position(|&b| b == 0x00)
        .ok_or_else(PipecryptError::decryption_failed)?;
    if separator < 8 {
        return Err(PipecryptError::decryption_failed());
    }
    Ok(em[2 + separator + 1..].to_vec())
}

// ─────────────────────────────────────────────────────────────────────────────
// OAEP (SHA-256, MGF1-SHA256, empty label)
// ─────────────────────────────────────────────────────────────────────────────

fn mgf1_sha256(seed: &[u8], len: usize) -> Vec<u8> {
    let mut mask = Vec::with_capacity(len + OAEP_HASH_LEN);
    let mut counter: u32 = 0;
    while mask.len() < len {
        let digest = Sha256::new()
            .chain_update(seed)
            .chain_update(counter.to_be_bytes())
            .finalize();
        mask.extend_from_slice(&digest);
        counter += 1;
    }
    mask.truncate(len);
    mask
}

pub fn oaep_sha256_pad(message: &[u8], k: usize) -> Result<Vec<u8>, PipecryptError> {
    let max = k.saturating_sub(2 * OAEP_HASH_LEN + 2);
    if k < 2 * OAEP_HASH_LEN + 2 || message.len() > max {
        return Err(message_too_long(message.len(), max));
    }
    let label_hash = Sha256::digest(b"");

    // DB = lHash || PS || 0x01 || M
    let db_len = k - OAEP_HASH_LEN - 1;
    let mut db = Vec::with_capacity(db_len);
    db.extend_from_slice(&label_hash);
    db.resize(db_len - message.len() - 1, 0x00);
    db.push(0x01);
    db.extend_from_slice(message);

    let mut seed = random_bytes(OAEP_HASH_LEN)?;
    xor_in_place(&mut db, &mgf1_sha256(&seed, db_len));
    xor_in_place(&mut seed, &mgf1_sha256(&db, OAEP_HASH_LEN));

    let mut em = Vec::with_capacity(k);
    em.push(0x00);
    em.extend_from_slice(&seed);
    em.extend_from_slice(&db);
    Ok(em)
}

pub fn oaep_sha256_unpad(em: &[u8]) -> Result<Vec<u8>, PipecryptError> {
    if em.len() < 2 * OAEP_HASH_LEN + 2 || em[0] != 0x00 {
        return Err(PipecryptError::decryption_failed());
    }
    let (masked_seed, masked_db) = em[1..].split_at(OAEP_HASH_LEN);

    let mut seed = masked_seed.to_vec();
    xor_in_place(&mut seed, &mgf1_sha256(masked_db, OAEP_HASH_LEN));
    let mut db = masked_db.to_vec();
    let db_mask = mgf1_sha256(&seed, db.len());
    xor_in_place(&mut db, &db_mask);

    let label_hash = Sha256::digest(b"");
    if db[..OAEP_HASH_LEN] != label_hash[..] {
        return Err(PipecryptError::decryption_failed());
    }
    let rest = &db[OAEP_HASH_LEN..];
    let marker = rest
        .iter()
        .position(|&b| b != 0x00)
        .ok_or_else(PipecryptError::decryption_failed)?;
    if rest[marker] != 0x01 {
        return Err(PipecryptError::decryption_failed());
    }
    Ok(rest[marker + 1..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pkcs1v15_layout_and_limit() {
        let em = pkcs1v15_pad(b"abc", 64).unwrap();
        assert_eq!(em.len(), 64);
        assert_eq!(&em[..2], &[0x00, 0x02]);
        assert!(em[2..60].iter().all(|&b| b != 0));
        assert_eq!(pkcs1v15_unpad(&em).unwrap(), b"abc");

        assert!(pkcs1v15_pad(&[0u8; 53], 64).is_ok());
        assert!(matches!(
            pkcs1v15_pad(&[0u8; 54], 64),
            Err(PipecryptError::Cipher(_))
        ));
    }

    #[test]
    fn oaep_roundtrip_and_limit() {
        let k = 256;
        for len in [0usize, 1, 100, 190] {
            let message = vec![0xA5u8; len];
            let em = oaep_sha256_pad(&message, k).unwrap();
            assert_eq!(em.len(), k);
            assert_eq!(oaep_sha256_unpad(&em).unwrap(), message);
        }
        assert!(oaep_sha256_pad(&[0u8; 191], k).is_err());
    }

    #[test]
    fn tampered_encodings_are_rejected() {
        let mut em = oaep_sha256_pad(b"secret", 128).unwrap();
        em[40] ^= 0x01;
        assert_eq!(
            oaep_sha256_unpad(&em),
            Err(PipecryptError::decryption_failed())
        );

        let mut em = pkcs1v15_pad(b"secret", 128).unwrap();
        em[1] = 0x01;
        assert!(pkcs1v15_unpad(&em).is_err());
    }

    #[test]
    fn mgf1_prefix_is_stable() {
        let long = mgf1_sha256(b"seed", 80);
        let short = mgf1_sha256(b"seed", 20);
        assert_eq!(&long[..20], &short[..]);
    }
}
