//! # Builders
//!
//! Value builders that validate once and produce an immutable product.
//!
//! ## Modules
//!
//! - [`pbkdf2_builder`] - PBKDF2 salt, iterations and PRF
//! - [`symmetric_builder`] - [`SymmetricConfig`] → [`SymmetricAlgorithm`](crate::SymmetricAlgorithm)
//! - [`asymmetric_builder`] - [`AsymmetricConfig`] → [`AsymmetricAlgorithm`](crate::AsymmetricAlgorithm)
//!
//! ## Usage
//!
//! Set what differs from the defaults with `with_*` calls, then hand the
//! chosen backend to `build`. Nothing is validated until `build`.

pub mod asymmetric_builder;
pub mod pbkdf2_builder;
pub mod symmetric_builder;

pub use asymmetric_builder::AsymmetricConfig;
pub use pbkdf2_builder::Pbkdf2Builder;
pub use symmetric_builder::SymmetricConfig;
