// src/crypto/mod.rs

//! Low-level crypto building blocks shared by the backends.
//!
//! - [`kdf`] - password-based key derivation
//! - [`cbc`] - CBC chaining over raw block primitives
//! - [`rsa_padding`] - PKCS#1 v1.5 / OAEP encoding for raw RSA
//! - [`rng`] - secure randomness and IV sources
//!
//! HMAC types are defined in `aliases.rs`.

pub mod cbc;
pub mod kdf;
pub mod rng;
pub mod rsa_padding;
