//! # Key Derivation Functions (KDF)
//!
//! Password-based key stretching (PBKDF2, RFC 8018) in two independent
//! implementations:
//!
//! - [`pbkdf2`] - delegates to the `pbkdf2` crate
//! - [`iterated`] - computes the PBKDF2 block function directly on top of `hmac`
//!
//! Both must produce byte-identical keys for identical [`DerivationParameters`];
//! `tests/backend_equivalence_tests.rs` checks this.

pub mod iterated;
pub mod pbkdf2;

use crate::aliases::PasswordBytes;
use crate::consts::{MAX_DERIVED_KEY_BITS, PBKDF2_MAX_ITER, PBKDF2_MIN_ITER};
use crate::error::PipecryptError;
use std::fmt;
use std::str::FromStr;

/// Pseudorandom function used inside PBKDF2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Prf {
    HmacSha256,
    #[default]
    HmacSha512,
}

impl Prf {
    /// PRF output length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            Prf::HmacSha256 => 32,
            Prf::HmacSha512 => 64,
        }
    }
}

impl fmt::Display for Prf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Prf::HmacSha256 => "PBKDF2WithHmacSHA256",
            Prf::HmacSha512 => "PBKDF2WithHmacSHA512",
        })
    }
}

impl FromStr for Prf {
    type Err = PipecryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "HMACSHA256" | "SHA256" | "PBKDF2WITHHMACSHA256" => Ok(Prf::HmacSha256),
            "HMACSHA512" | "SHA512" | "PBKDF2WITHHMACSHA512" => Ok(Prf::HmacSha512),
            _ => Err(PipecryptError::KeyDerivation(format!(
                "unsupported key derivation algorithm: {s}"
            ))),
        }
    }
}

/// Inputs to one key derivation.
///
/// Immutable once built. Range checks run when a key is derived, so an
/// out-of-range value surfaces as [`PipecryptError::KeyDerivation`].
pub struct DerivationParameters {
    password: PasswordBytes,
    salt: Vec<u8>,
    iterations: u32,
    key_size_bits: u32,
    prf: Prf,
}

impl DerivationParameters {
    /// Parameters using the default PRF ([`Prf::HmacSha512`]).
    pub fn new(
        password: PasswordBytes,
        salt: impl Into<Vec<u8>>,
        iterations: u32,
        key_size_bits: u32,
    ) -> Self {
        Self {
            password,
            salt: salt.into(),
            iterations,
            key_size_bits,
            prf: Prf::default(),
        }
    }

    #[must_use]
    pub fn with_prf(mut self, prf: Prf) -> Self {
        self.prf = prf;
        self
    }

    pub fn password(&self) -> &[u8] {
        self.password.expose_secret().as_slice()
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    pub const fn key_size_bits(&self) -> u32 {
        self.key_size_bits
    }

    /// Derived key length in bytes.
    pub const fn key_len(&self) -> usize {
        (self.key_size_bits / 8) as usize
    }

    pub const fn prf(&self) -> Prf {
        self.prf
    }

    /// Checks iteration count and key size.
    pub fn validate(&self) -> Result<(), PipecryptError> {
        if self.iterations < PBKDF2_MIN_ITER {
            return Err(PipecryptError::KeyDerivation(
                "PBKDF2 iterations must be ≥1".into(),
            ));
        }
        if self.iterations > PBKDF2_MAX_ITER {
            return Err(PipecryptError::KeyDerivation(format!(
                "PBKDF2 iterations must be ≤{PBKDF2_MAX_ITER}"
            )));
        }
        if self.key_size_bits == 0
            || self.key_size_bits % 8 != 0
            || self.key_size_bits > MAX_DERIVED_KEY_BITS
        {
            return Err(PipecryptError::KeyDerivation(format!(
                "unsupported key size: {} bits",
                self.key_size_bits
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for DerivationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationParameters")
            .field("password", &"[REDACTED]")
            .field("salt_len", &self.salt.len())
            .field("iterations", &self.iterations)
            .field("key_size_bits", &self.key_size_bits)
            .field("prf", &self.prf)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(iterations: u32, bits: u32) -> DerivationParameters {
        DerivationParameters::new(PasswordBytes::new(b"pw".to_vec()), b"salt".to_vec(), iterations, bits)
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        assert!(params(0, 128).validate().is_err());
        assert!(params(PBKDF2_MAX_ITER + 1, 128).validate().is_err());
        assert!(params(1, 0).validate().is_err());
        assert!(params(1, 130).validate().is_err());
        assert!(params(1, MAX_DERIVED_KEY_BITS + 8).validate().is_err());
        assert!(params(1, 192).validate().is_ok());
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", params(1, 128));
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("pw\""));
    }

    #[test]
    fn prf_names_parse() {
        assert_eq!("PBKDF2WithHmacSHA256".parse::<Prf>().unwrap(), Prf::HmacSha256);
        assert_eq!("hmac-sha512".parse::<Prf>().unwrap(), Prf::HmacSha512);
        assert!(matches!(
            "md5".parse::<Prf>(),
            Err(PipecryptError::KeyDerivation(_))
        ));
    }
}
