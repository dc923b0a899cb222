//! Codec errors

use thiserror::Error;

/// Errors raised while encoding or decoding a scene stream
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying stream failed; a truncated stream shows up as `UnexpectedEof`
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A string field did not hold valid UTF-8
    #[error("invalid UTF-8 in string field: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// An enumeration byte with no matching variant
    #[error("unknown {kind} value {value}")]
    UnknownEnumValue {
        /// Enumeration type name
        kind: &'static str,
        /// The byte read from the stream
        value: u8,
    },

    /// A sequence too long for its 32-bit length prefix
    #[error("sequence of {0} elements does not fit a 32-bit length")]
    LengthOverflow(usize),
}

impl CodecError {
    /// True if the stream ended in the middle of a value
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}
