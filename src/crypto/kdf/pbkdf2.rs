//! src/crypto/kdf/pbkdf2.rs

use crate::aliases::{HmacSha256, HmacSha512, KeyMaterial};
use crate::crypto::kdf::{DerivationParameters, Prf};
use crate::error::PipecryptError;

use pbkdf2::pbkdf2;

/// Derive PBKDF2-HMAC-SHA256/512 through the `pbkdf2` crate.
///
/// The output buffer moves straight into [`KeyMaterial`] and is scrubbed on
/// drop with the `zeroize` feature.
#[inline(always)]
pub fn derive_pbkdf2_key(params: &DerivationParameters) -> Result<KeyMaterial, PipecryptError> {
    params.validate()?;

    let mut out = vec![0u8; params.key_len()];
    match params.prf() {
        Prf::HmacSha256 => {
            pbkdf2::<HmacSha256>(params.password(), params.salt(), params.iterations(), &mut out)
        }
        Prf::HmacSha512 => {
            pbkdf2::<HmacSha512>(params.password(), params.salt(), params.iterations(), &mut out)
        }
    }
    .map_err(|e| PipecryptError::KeyDerivation(format!("PBKDF2 failed: {e}")))?;

    Ok(KeyMaterial::new(out))
}
