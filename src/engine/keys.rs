//! src/engine/keys.rs
//! RSA key material as raw numeric components.
//!
//! A key pair may hold only its public half (encrypt-only) or only its
//! private half (decrypt-only). Key pairs are immutable and shared read-only
//! by the engines built from them.

use crate::consts::{MAX_RSA_KEY_BITS, MIN_RSA_KEY_BITS};
use crate::error::PipecryptError;
use rand_core::OsRng;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey};
use std::fmt;
use tracing::debug;
#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Modulus and public exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicComponents {
    modulus: BigUint,
    public_exponent: BigUint,
}

impl RsaPublicComponents {
    pub fn new(modulus: BigUint, public_exponent: BigUint) -> Self {
        Self {
            modulus,
            public_exponent,
        }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn public_exponent(&self) -> &BigUint {
        &self.public_exponent
    }

    /// Modulus length in bytes.
    pub fn modulus_len(&self) -> usize {
        self.modulus.bits().div_ceil(8)
    }
}

/// Modulus, both exponents and (optionally) the prime factors.
///
/// The public exponent is kept alongside the private one, as in a PKCS#1
/// private key. With no primes supplied, backends that need them recover
/// them from `(n, e, d)`.
#[derive(Clone)]
pub struct RsaPrivateComponents {
    modulus: BigUint,
    public_exponent: BigUint,
    private_exponent: BigUint,
    primes: Vec<BigUint>,
}

impl RsaPrivateComponents {
    pub fn new(modulus: BigUint, public_exponent: BigUint, private_exponent: BigUint) -> Self {
        Self {
            modulus,
            public_exponent,
            private_exponent,
            primes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_primes(mut self, primes: Vec<BigUint>) -> Self {
        self.primes = primes;
        self
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn public_exponent(&self) -> &BigUint {
        &self.public_exponent
    }

    pub fn private_exponent(&self) -> &BigUint {
        &self.private_exponent
    }

    pub fn primes(&self) -> &[BigUint] {
        &self.primes
    }

    /// Modulus length in bytes.
    pub fn modulus_len(&self) -> usize {
        self.modulus.bits().div_ceil(8)
    }
}

#[cfg(feature = "zeroize")]
impl RsaPrivateComponents {
    fn wipe(&mut self) {
        self.private_exponent.zeroize();
        self.primes.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl Drop for RsaPrivateComponents {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl fmt::Debug for RsaPrivateComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateComponents")
            .field("modulus_bits", &self.modulus.bits())
            .field("private_exponent", &"[REDACTED]")
            .finish()
    }
}

/// Public and/or private RSA key halves.
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    public: Option<RsaPublicComponents>,
    private: Option<RsaPrivateComponents>,
}

impl RsaKeyPair {
    /// Pairs the given halves; at least one is required and the moduli must agree.
    pub fn new(
        public: Option<RsaPublicComponents>,
        private: Option<RsaPrivateComponents>,
    ) -> Result<Self, PipecryptError> {
        match (&public, &private) {
            (None, None) => {
                return Err(PipecryptError::Configuration(
                    "RSA key pair needs a public or a private key".into(),
                ))
            }
            (Some(pubk), Some(privk)) if pubk.modulus != privk.modulus => {
                return Err(PipecryptError::Configuration(
                    "public and private keys have different moduli".into(),
                ))
            }
            _ => {}
        }
        let modulus_bits = public
            .as_ref()
            .map(|k| k.modulus.bits())
            .or_else(|| private.as_ref().map(|k| k.modulus.bits()))
            .unwrap_or(0);
        if modulus_bits == 0 {
            return Err(PipecryptError::Configuration("RSA modulus is zero".into()));
        }
        if modulus_bits > MAX_RSA_KEY_BITS {
            return Err(PipecryptError::Configuration(format!(
                "RSA modulus is {modulus_bits} bits, at most {MAX_RSA_KEY_BITS} are supported"
            )));
        }
        Ok(Self { public, private })
    }

    /// Encrypt-only key pair.
    pub fn public_only(modulus: BigUint, public_exponent: BigUint) -> Result<Self, PipecryptError> {
        Self::new(
            Some(RsaPublicComponents::new(modulus, public_exponent)),
            None,
        )
    }

    /// Decrypt-only key pair.
    pub fn private_only(
        modulus: BigUint,
        public_exponent: BigUint,
        private_exponent: BigUint,
    ) -> Result<Self, PipecryptError> {
        Self::new(
            None,
            Some(RsaPrivateComponents::new(
                modulus,
                public_exponent,
                private_exponent,
            )),
        )
    }

    /// Generates a fresh key pair of `bits` modulus bits with the standard
    /// generator (public exponent 65537).
    pub fn generate(bits: usize) -> Result<Self, PipecryptError> {
        if !(MIN_RSA_KEY_BITS..=MAX_RSA_KEY_BITS).contains(&bits) {
            return Err(PipecryptError::Configuration(format!(
                "RSA key size must be {MIN_RSA_KEY_BITS}..={MAX_RSA_KEY_BITS} bits, got {bits}"
            )));
        }
        debug!(bits, "generating RSA key pair");
        let key = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|e| PipecryptError::Configuration(format!("RSA key generation failed: {e}")))?;
        Ok(Self::from(&key))
    }

    pub fn public(&self) -> Option<&RsaPublicComponents> {
        self.public.as_ref()
    }

    pub fn private(&self) -> Option<&RsaPrivateComponents> {
        self.private.as_ref()
    }

    /// Copy holding only the public half, for handing to an encrypting peer.
    pub fn public_half(&self) -> Result<Self, PipecryptError> {
        let public = self.public.clone().ok_or_else(crate::engine::no_public_key)?;
        Self::new(Some(public), None)
    }

    /// Modulus length in bytes.
    pub fn modulus_len(&self) -> usize {
        self.public
            .as_ref()
            .map(RsaPublicComponents::modulus_len)
            .or_else(|| self.private.as_ref().map(RsaPrivateComponents::modulus_len))
            .unwrap_or(0)
    }
}

impl From<&RsaPrivateKey> for RsaKeyPair {
    fn from(key: &RsaPrivateKey) -> Self {
        Self {
            public: Some(RsaPublicComponents::new(key.n().clone(), key.e().clone())),
            private: Some(
                RsaPrivateComponents::new(key.n().clone(), key.e().clone(), key.d().clone())
                    .with_primes(key.primes().to_vec()),
            ),
        }
    }
}
