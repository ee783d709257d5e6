//! src/framer.rs
//! Positional combine/split of two byte segments.
//!
//! The framed layout is `[first: L bytes][second: remaining bytes]` with no
//! length prefix, delimiter or version tag. `L` is fixed when the framer is
//! built, so splitting is O(1).

use crate::error::PipecryptError;

/// Concatenates and re-splits two segments given a known first-segment length.
///
/// For every `first` of the configured length and every `second`,
/// `split(combine(first, second)) == (first, second)` for a non-empty `second`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Framer {
    first_segment_len: Option<usize>,
}

impl Framer {
    /// Framer with a fixed first-segment length (usually the IV length).
    #[must_use]
    pub const fn new(first_segment_len: usize) -> Self {
        Self {
            first_segment_len: Some(first_segment_len),
        }
    }

    /// Framer that can only combine; [`split`](Self::split) always fails.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self {
            first_segment_len: None,
        }
    }

    /// The configured first-segment length, if any.
    #[must_use]
    pub const fn first_segment_len(&self) -> Option<usize> {
        self.first_segment_len
    }

    /// Returns `first || second`.
    ///
    /// Fails with [`PipecryptError::Argument`] when a length was configured and
    /// `first` does not match it.
    pub fn combine(&self, first: &[u8], second: &[u8]) -> Result<Vec<u8>, PipecryptError> {
        if let Some(expected) = self.first_segment_len {
            if first.len() != expected {
                return Err(PipecryptError::Argument(format!(
                    "first segment is {} bytes, expected {expected}",
                    first.len()
                )));
            }
        }
        let mut combined = Vec::with_capacity(first.len() + second.len());
        combined.extend_from_slice(first);
        combined.extend_from_slice(second);
        Ok(combined)
    }

    /// Splits `combined` into `(first, second)`.
    ///
    /// Fails with [`PipecryptError::Framing`] when no length was configured or
    /// when `combined` is not strictly longer than the first segment.
    pub fn split<'a>(&self, combined: &'a [u8]) -> Result<(&'a [u8], &'a [u8]), PipecryptError> {
        let len = self.first_segment_len.ok_or_else(|| {
            PipecryptError::Framing("splitter has no configured first-segment length".into())
        })?;
        if combined.len() <= len {
            return Err(PipecryptError::Framing(format!(
                "message of {} bytes cannot hold a {len}-byte first segment and a payload",
                combined.len()
            )));
        }
        Ok(combined.split_at(len))
    }
}
