//! src/representation.rs
//! Byte ↔ text representations for framed ciphertext.
//!
//! Both ends of a protocol must agree on the representation out of band;
//! nothing in the encoded text identifies which one was used.

use crate::error::PipecryptError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;
use std::str::FromStr;

/// Pluggable byte ↔ text codec.
///
/// `from_text(to_text(b)) == b` must hold for every byte sequence,
/// including the empty one.
pub trait ByteRepresentation: Send + Sync + fmt::Debug {
    /// Encodes raw bytes as text.
    fn to_text(&self, bytes: &[u8]) -> String;

    /// Decodes text produced by [`to_text`](Self::to_text).
    ///
    /// Fails with [`PipecryptError::Format`] on characters outside the alphabet.
    fn from_text(&self, text: &str) -> Result<Vec<u8>, PipecryptError>;
}

/// Built-in representations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Lower-case hexadecimal.
    #[default]
    HexLower,
    /// Upper-case hexadecimal.
    HexUpper,
    /// Standard base64 alphabet with `=` padding.
    Base64,
}

impl ByteRepresentation for Representation {
    fn to_text(&self, bytes: &[u8]) -> String {
        match self {
            Representation::HexLower => hex::encode(bytes),
            Representation::HexUpper => hex::encode_upper(bytes),
            Representation::Base64 => STANDARD.encode(bytes),
        }
    }

    // Hex decoding accepts either case; only the encoding side is configured.
    fn from_text(&self, text: &str) -> Result<Vec<u8>, PipecryptError> {
        match self {
            Representation::HexLower | Representation::HexUpper => {
                hex::decode(text).map_err(|e| PipecryptError::Format(format!("invalid hex: {e}")))
            }
            Representation::Base64 => STANDARD
                .decode(text)
                .map_err(|e| PipecryptError::Format(format!("invalid base64: {e}"))),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Representation::HexLower => "hex",
            Representation::HexUpper => "HEX",
            Representation::Base64 => "base64",
        })
    }
}

impl FromStr for Representation {
    type Err = PipecryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hex" => Ok(Representation::HexLower),
            "HEX" => Ok(Representation::HexUpper),
            other if other.eq_ignore_ascii_case("base64") => Ok(Representation::Base64),
            other => Err(PipecryptError::Configuration(format!(
                "unsupported representation: {other}"
            ))),
        }
    }
}
