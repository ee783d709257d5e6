//! src/crypto/cbc.rs
//! CBC chaining with PKCS#7 padding, driven block by block over a raw
//! block-cipher primitive.
//!
//! A fresh cipher instance is keyed per call. Nothing is shared between
//! calls, so concurrent use needs no locking.

use crate::error::PipecryptError;
use crate::utils::{pkcs7_pad, pkcs7_unpad, xor_in_place};
use aes::cipher::{Block, BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit};

/// Encrypts `plaintext` in CBC mode under `key` and `iv`.
///
/// `iv` must be exactly one block long.
pub fn cbc_encrypt<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, PipecryptError>
where
    C: BlockEncrypt + KeyInit,
{
    let block_size = <C as BlockSizeUser>::block_size();
    check_iv(iv, block_size)?;
    let cipher = C::new_from_slice(key)
        .map_err(|_| PipecryptError::Configuration("invalid key length for cipher".into()))?;

    let padded = pkcs7_pad(plaintext, block_size);
    let mut output = Vec::with_capacity(padded.len());

    // previous ciphertext block, seeded with the IV
    let mut prev = iv.to_vec();

    for chunk in padded.chunks_exact(block_size) {
        let mut block = Block::<C>::clone_from_slice(chunk);
        xor_in_place(&mut block, &prev);
        cipher.encrypt_block(&mut block);
        output.extend_from_slice(&block);
        prev.copy_from_slice(&block);
    }
    Ok(output)
}

/// Decrypts CBC `ciphertext` and strips its PKCS#7 padding.
///
/// Length, padding and key mismatches all fail with the same opaque
/// [`PipecryptError::Cipher`].
pub fn cbc_decrypt<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, PipecryptError>
where
    C: BlockDecrypt + KeyInit,
{
    let block_size = <C as BlockSizeUser>::block_size();
    check_iv(iv, block_size)?;
    if ciphertext.is_empty() || ciphertext.len() % block_size != 0 {
        return Err(PipecryptError::decryption_failed());
    }
    let cipher = C::new_from_slice(key)
        .map_err(|_| PipecryptError::Configuration("invalid key length for cipher".into()))?;

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut prev = iv;

    for chunk in ciphertext.chunks_exact(block_size) {
        let mut block = Block::<C>::clone_from_slice(chunk);
        cipher.decrypt_block(&mut block);
        xor_in_place(&mut block, prev);
        plaintext.extend_from_slice(&block);
        prev = chunk;
    }

    let len = pkcs7_unpad(&plaintext, block_size)?.len();
    plaintext.truncate(len);
    Ok(plaintext)
}

fn check_iv(iv: &[u8], block_size: usize) -> Result<(), PipecryptError> {
    if iv.len() != block_size {
        return Err(PipecryptError::Argument(format!(
            "IV is {} bytes, cipher block is {block_size}",
            iv.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::Aes128;
    use des::TdesEde3;

    #[test]
    fn nist_cbc_aes128_first_block() {
        // SP 800-38A F.2.1
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let pt = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let ct = cbc_encrypt::<Aes128>(&key, &iv, &pt).unwrap();
        assert_eq!(ct.len(), 32);
        assert_eq!(hex::encode(&ct[..16]), "7649abac8119b246cee98e9b12e9197d");
        assert_eq!(cbc_decrypt::<Aes128>(&key, &iv, &ct).unwrap(), pt);
    }

    #[test]
    fn tdes_roundtrip_uses_8_byte_blocks() {
        let key = [0x5Au8; 24];
        let iv = [0x01u8; 8];
        let ct = cbc_encrypt::<TdesEde3>(&key, &iv, b"hello").unwrap();
        assert_eq!(ct.len(), 8);
        assert_eq!(cbc_decrypt::<TdesEde3>(&key, &iv, &ct).unwrap(), b"hello");
    }

    #[test]
    fn wrong_iv_length_is_an_argument_error() {
        assert!(matches!(
            cbc_encrypt::<Aes128>(&[0u8; 16], &[0u8; 8], b"x"),
            Err(PipecryptError::Argument(_))
        ));
    }

    #[test]
    fn truncated_ciphertext_is_opaque_failure() {
        let ct = cbc_encrypt::<Aes128>(&[7u8; 16], &[0u8; 16], b"payload").unwrap();
        assert_eq!(
            cbc_decrypt::<Aes128>(&[7u8; 16], &[0u8; 16], &ct[..15]),
            Err(PipecryptError::decryption_failed())
        );
    }
}
