//! src/charset.rs
//! String encodings used by the text-mode operations.
//!
//! Plaintext strings are turned into bytes with the configured [`Charset`]
//! before encryption and turned back after decryption. UTF-8 is the default.

use crate::error::PipecryptError;
use std::fmt;
use std::str::FromStr;

/// Converts text to and from bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    #[default]
    Utf8,
    /// UTF-16, little endian, no byte-order mark.
    Utf16Le,
    /// ISO-8859-1: one byte per code point, U+0000..=U+00FF only.
    Latin1,
}

impl Charset {
    /// Canonical name as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Latin1 => "ISO-8859-1",
        }
    }

    /// Encodes `text` into bytes.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, PipecryptError> {
        match self {
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
            Charset::Utf16Le => {
                let mut output = Vec::with_capacity(text.len() * 2);
                for code_unit in text.encode_utf16() {
                    output.extend_from_slice(&code_unit.to_le_bytes());
                }
                Ok(output)
            }
            Charset::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| {
                        PipecryptError::Format(format!(
                            "character U+{:04X} is not representable in ISO-8859-1",
                            u32::from(c)
                        ))
                    })
                })
                .collect(),
        }
    }

    /// Decodes `bytes` into a string, rejecting malformed input.
    pub fn decode(self, bytes: &[u8]) -> Result<String, PipecryptError> {
        match self {
            Charset::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|_| PipecryptError::Format("bytes are not valid UTF-8".into())),
            Charset::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(PipecryptError::Format(
                        "UTF-16LE input has an odd number of bytes".into(),
                    ));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units)
                    .map_err(|_| PipecryptError::Format("bytes are not valid UTF-16LE".into()))
            }
            Charset::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = PipecryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('_', "-").as_str() {
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            "UTF-16LE" | "UTF16LE" => Ok(Charset::Utf16Le),
            "ISO-8859-1" | "LATIN1" | "LATIN-1" => Ok(Charset::Latin1),
            other => Err(PipecryptError::Configuration(format!(
                "unsupported charset: {other}"
            ))),
        }
    }
}
