//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All operations return [`Result<T, PipecryptError>`](PipecryptError).
//!
//! None of these errors are retried internally. A failed call leaves no
//! observable side effect because every core object is immutable or local
//! to the call.

use thiserror::Error;

/// The error type for all pipeline operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipecryptError {
    /// A required input was missing or malformed (caller bug).
    ///
    /// Raised for empty passwords, first segments of the wrong length handed
    /// to [`Framer::combine`](crate::Framer::combine) and IVs of the wrong
    /// length handed directly to an engine.
    #[error("Argument error: {0}")]
    Argument(String),

    /// The algorithm configuration is malformed or incomplete.
    ///
    /// Examples:
    /// - no password and no raw key configured
    /// - raw key of the wrong length for the cipher
    /// - an IV generator that returns the wrong number of bytes
    /// - missing public or private RSA half for the requested operation
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The password-based stretching function rejected its parameters.
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// The wrapped cipher primitive failed.
    ///
    /// Decrypt-side failures carry no detail beyond "decryption failed".
    #[error("Cipher error: {0}")]
    Cipher(String),

    /// The combine/split invariant was violated.
    #[error("Framing error: {0}")]
    Framing(String),

    /// Text representation or string encoding failed.
    #[error("Format error: {0}")]
    Format(String),
}

impl PipecryptError {
    /// The single, undistinguished decrypt failure.
    pub(crate) fn decryption_failed() -> Self {
        PipecryptError::Cipher("decryption failed".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_category() {
        let err = PipecryptError::Framing("too short".into());
        assert_eq!(err.to_string(), "Framing error: too short");
    }

    #[test]
    fn decryption_failure_is_opaque() {
        assert_eq!(
            PipecryptError::decryption_failed().to_string(),
            "Cipher error: decryption failed"
        );
    }
}
