//! src/crypto/kdf/iterated.rs
//! PBKDF2 computed directly from the HMAC primitive.
//!
//! For each output block `i` (1-based):
//!
//! ```text
//! U1 = PRF(password, salt || INT_32_BE(i))
//! Uj = PRF(password, U{j-1})
//! Ti = U1 ^ U2 ^ ... ^ Uc
//! ```
//!
//! and the key is `T1 || T2 || ...` truncated to the requested length.

use crate::aliases::{HmacSha256, HmacSha512, KeyMaterial};
use crate::crypto::kdf::{DerivationParameters, Prf};
use crate::error::PipecryptError;
use crate::utils::xor_in_place;

use hmac::digest::{FixedOutput, KeyInit, Output, OutputSizeUser};
use hmac::Mac;
#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Derive a PBKDF2 key without going through the `pbkdf2` crate.
pub fn derive_iterated_hmac_key(
    params: &DerivationParameters,
) -> Result<KeyMaterial, PipecryptError> {
    params.validate()?;

    let mut out = vec![0u8; params.key_len()];
    match params.prf() {
        Prf::HmacSha256 => stretch::<HmacSha256>(params, &mut out)?,
        Prf::HmacSha512 => stretch::<HmacSha512>(params, &mut out)?,
    }
    Ok(KeyMaterial::new(out))
}

fn stretch<M>(params: &DerivationParameters, out: &mut [u8]) -> Result<(), PipecryptError>
where
    M: Mac + KeyInit + FixedOutput + Clone,
{
    let prf = <M as Mac>::new_from_slice(params.password())
        .map_err(|e| PipecryptError::KeyDerivation(format!("HMAC rejected password: {e}")))?;
    let block_len = <M as OutputSizeUser>::output_size();
    let mut u = Output::<M>::default();
    let mut t = Output::<M>::default();

    for (index, chunk) in out.chunks_mut(block_len).enumerate() {
        let block_index = u32::try_from(index + 1)
            .map_err(|_| PipecryptError::KeyDerivation("derived key too long".into()))?;

        let mut mac = prf.clone();
        Mac::update(&mut mac, params.salt());
        Mac::update(&mut mac, &block_index.to_be_bytes());
        mac.finalize_into(&mut u);
        t.copy_from_slice(&u);

        for _ in 1..params.iterations() {
            let mut mac = prf.clone();
            Mac::update(&mut mac, &u);
            mac.finalize_into(&mut u);
            xor_in_place(&mut t, &u);
        }

        chunk.copy_from_slice(&t[..chunk.len()]);
    }

    #[cfg(feature = "zeroize")]
    {
        u.as_mut_slice().zeroize();
        t.as_mut_slice().zeroize();
    }
    Ok(())
}
