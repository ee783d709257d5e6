// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions used across the library.

use crate::error::PipecryptError;

/// XORs `block` into `acc` in place.
///
/// Used by the CBC chaining loop, the hand-rolled PBKDF2 and the OAEP mask
/// application. Only the overlapping prefix is touched; callers always pass
/// slices of equal length.
#[inline(always)]
pub fn xor_in_place(acc: &mut [u8], block: &[u8]) {
    for (a, b) in acc.iter_mut().zip(block) {
        *a ^= b;
    }
}

/// Appends PKCS#7 padding for a cipher with `block_size`-byte blocks.
///
/// A full block of padding is appended when `data` is already aligned, so
/// the output is never empty and always a multiple of `block_size`.
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let pad = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + pad);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad, pad as u8);
    padded
}

/// Strips PKCS#7 padding, returning the unpadded prefix.
///
/// Every failure collapses to the same opaque cipher error.
pub fn pkcs7_unpad(data: &[u8], block_size: usize) -> Result<&[u8], PipecryptError> {
    if data.is_empty() || data.len() % block_size != 0 {
        return Err(PipecryptError::decryption_failed());
    }
    let pad = usize::from(data[data.len() - 1]);
    if pad == 0 || pad > block_size {
        return Err(PipecryptError::decryption_failed());
    }
    let (body, padding) = data.split_at(data.len() - pad);
    if padding.iter().any(|&b| usize::from(b) != pad) {
        return Err(PipecryptError::decryption_failed());
    }
    Ok(body)
}

/// Left-pads a big-endian integer encoding with zeros to exactly `len` bytes.
///
/// Returns `None` when `bytes` is already longer than `len`.
pub fn left_pad(bytes: &[u8], len: usize) -> Option<Vec<u8>> {
    if bytes.len() > len {
        return None;
    }
    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(bytes);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pkcs7_pads_aligned_input_with_full_block() {
        let padded = pkcs7_pad(&[0xAA; 16], 16);
        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|&b| b == 16));
    }

    #[test]
    fn pkcs7_roundtrip_for_every_length() {
        for block_size in [8usize, 16] {
            for len in 0..40 {
                let data: Vec<u8> = (0..len as u8).collect();
                let padded = pkcs7_pad(&data, block_size);
                assert_eq!(padded.len() % block_size, 0);
                assert_eq!(pkcs7_unpad(&padded, block_size).unwrap(), &data[..]);
            }
        }
    }

    #[test]
    fn pkcs7_unpad_rejects_bad_padding() {
        let cases: [&[u8]; 4] = [
            &[],
            &[1, 2, 3],
            &[0u8; 8],
            &[1, 1, 1, 1, 1, 1, 3, 2],
        ];
        for data in cases {
            assert_eq!(
                pkcs7_unpad(data, 8),
                Err(PipecryptError::decryption_failed())
            );
        }
    }

    #[test]
    fn left_pad_behaviour() {
        assert_eq!(left_pad(&[1, 2], 4), Some(vec![0, 0, 1, 2]));
        assert_eq!(left_pad(&[1, 2, 3], 2), None);
    }

    #[test]
    fn xor_in_place_matches_manual() {
        let mut acc = [0x0Fu8, 0xF0, 0xFF];
        xor_in_place(&mut acc, &[0xFF, 0xFF, 0x0F]);
        assert_eq!(acc, [0xF0, 0x0F, 0xF0]);
    }
}
