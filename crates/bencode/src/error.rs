//! Error types for bencode decoding, encoding and validation.

use thiserror::Error;

/// Flat classification of every failure the codec can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unrecognized lookahead byte, or end of input where an entity was expected.
    SyntaxError,
    /// `ie` or `i-e`.
    EmptyInteger,
    /// Non-digit character, leading zero, or `-0`.
    InvalidInteger,
    /// No `e` before end of input.
    UnterminatedInteger,
    /// String length with a leading zero.
    InvalidLength,
    /// No `:` before end of input.
    UnterminatedString,
    /// Fewer payload bytes than the declared length.
    UnexpectedEof,
    UnterminatedList,
    UnterminatedDictionary,
    /// Dictionary key position does not hold a string.
    InvalidKey,
    DuplicateKey,
    /// Bytes remain after the top-level entity.
    TrailingData,
    /// Host value with no bencode counterpart.
    TypeError,
    /// Nesting deeper than the configured maximum.
    DepthExceeded,
    /// Strict mode: dictionary keys out of ascending order.
    UnsortedKeys,
    /// Non-finite float handed to the adaptation layer.
    NonFiniteNumber,
}

impl ErrorKind {
    /// Returns a stable name for this kind (e.g., "InvalidInteger").
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::EmptyInteger => "EmptyInteger",
            ErrorKind::InvalidInteger => "InvalidInteger",
            ErrorKind::UnterminatedInteger => "UnterminatedInteger",
            ErrorKind::InvalidLength => "InvalidLength",
            ErrorKind::UnterminatedString => "UnterminatedString",
            ErrorKind::UnexpectedEof => "UnexpectedEof",
            ErrorKind::UnterminatedList => "UnterminatedList",
            ErrorKind::UnterminatedDictionary => "UnterminatedDictionary",
            ErrorKind::InvalidKey => "InvalidKey",
            ErrorKind::DuplicateKey => "DuplicateKey",
            ErrorKind::TrailingData => "TrailingData",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::DepthExceeded => "DepthExceeded",
            ErrorKind::UnsortedKeys => "UnsortedKeys",
            ErrorKind::NonFiniteNumber => "NonFiniteNumber",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error during decoding.
///
/// Every variant carries the byte offset of the fault. For unterminated
/// entities that is the offset of the opening delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown entity {shown} at offset {offset}", shown = describe_byte(.found))]
    Syntax { offset: usize, found: Option<u8> },

    #[error("empty integer at offset {offset}")]
    EmptyInteger { offset: usize },

    #[error("invalid integer at offset {offset}: {reason}")]
    InvalidInteger { offset: usize, reason: &'static str },

    #[error("unterminated integer starting at offset {offset}")]
    UnterminatedInteger { offset: usize },

    #[error("invalid string length at offset {offset}: {reason}")]
    InvalidLength { offset: usize, reason: &'static str },

    #[error("unterminated string length starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("unexpected end of input at offset {offset}: need {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("unterminated list starting at offset {offset}")]
    UnterminatedList { offset: usize },

    #[error("unterminated dictionary starting at offset {offset}")]
    UnterminatedDictionary { offset: usize },

    #[error("invalid dictionary key {shown} at offset {offset}", shown = describe_key_byte(.found))]
    InvalidKey { offset: usize, found: u8 },

    #[error("duplicate dictionary key {shown:?} at offset {offset}", shown = String::from_utf8_lossy(.key))]
    DuplicateKey { offset: usize, key: Vec<u8> },

    #[error("trailing data at offset {offset}: {len} bytes after the top-level entity")]
    TrailingData { offset: usize, len: usize },

    #[error("nesting depth exceeds maximum {max} at offset {offset}")]
    DepthExceeded { offset: usize, max: usize },

    #[error("dictionary key {shown:?} at offset {offset} is not greater than the previous key", shown = String::from_utf8_lossy(.key))]
    UnsortedKeys { offset: usize, key: Vec<u8> },
}

impl DecodeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Syntax { .. } => ErrorKind::SyntaxError,
            DecodeError::EmptyInteger { .. } => ErrorKind::EmptyInteger,
            DecodeError::InvalidInteger { .. } => ErrorKind::InvalidInteger,
            DecodeError::UnterminatedInteger { .. } => ErrorKind::UnterminatedInteger,
            DecodeError::InvalidLength { .. } => ErrorKind::InvalidLength,
            DecodeError::UnterminatedString { .. } => ErrorKind::UnterminatedString,
            DecodeError::UnexpectedEof { .. } => ErrorKind::UnexpectedEof,
            DecodeError::UnterminatedList { .. } => ErrorKind::UnterminatedList,
            DecodeError::UnterminatedDictionary { .. } => ErrorKind::UnterminatedDictionary,
            DecodeError::InvalidKey { .. } => ErrorKind::InvalidKey,
            DecodeError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            DecodeError::TrailingData { .. } => ErrorKind::TrailingData,
            DecodeError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
            DecodeError::UnsortedKeys { .. } => ErrorKind::UnsortedKeys,
        }
    }

    /// Returns the byte offset of the fault.
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::Syntax { offset, .. }
            | DecodeError::EmptyInteger { offset }
            | DecodeError::InvalidInteger { offset, .. }
            | DecodeError::UnterminatedInteger { offset }
            | DecodeError::InvalidLength { offset, .. }
            | DecodeError::UnterminatedString { offset }
            | DecodeError::UnexpectedEof { offset, .. }
            | DecodeError::UnterminatedList { offset }
            | DecodeError::UnterminatedDictionary { offset }
            | DecodeError::InvalidKey { offset, .. }
            | DecodeError::DuplicateKey { offset, .. }
            | DecodeError::TrailingData { offset, .. }
            | DecodeError::DepthExceeded { offset, .. }
            | DecodeError::UnsortedKeys { offset, .. } => offset,
        }
    }
}

fn describe_byte(byte: &Option<u8>) -> String {
    match byte {
        None => "end of input".to_string(),
        Some(b) => describe_key_byte(b),
    }
}

fn describe_key_byte(byte: &u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", *byte as char)
    } else {
        format!("0x{:02x}", byte)
    }
}

/// Error while adapting a host value into a bencode value.
///
/// Encoding a [`Value`](crate::Value) itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{found} has no bencode representation")]
    TypeError { found: &'static str },

    #[error("number {value} is not finite")]
    NonFiniteNumber { value: f64 },
}

impl EncodeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::TypeError { .. } => ErrorKind::TypeError,
            EncodeError::NonFiniteNumber { .. } => ErrorKind::NonFiniteNumber,
        }
    }
}

/// Error during canonical-form validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("input is not canonical: first difference at offset {offset}")]
    NotCanonical { offset: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_offset() {
        let err = DecodeError::DuplicateKey {
            offset: 12,
            key: b"foo".to_vec(),
        };
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(err.offset(), 12);
        assert_eq!(err.kind().name(), "DuplicateKey");
    }

    #[test]
    fn test_display_messages() {
        let err = DecodeError::Syntax {
            offset: 0,
            found: Some(b'a'),
        };
        assert_eq!(err.to_string(), "unknown entity 'a' at offset 0");

        let err = DecodeError::Syntax {
            offset: 3,
            found: None,
        };
        assert_eq!(err.to_string(), "unknown entity end of input at offset 3");

        let err = DecodeError::InvalidKey {
            offset: 1,
            found: 0x01,
        };
        assert_eq!(err.to_string(), "invalid dictionary key 0x01 at offset 1");
    }

    #[test]
    fn test_encode_error_kind() {
        let err = EncodeError::TypeError { found: "null" };
        assert_eq!(err.kind(), ErrorKind::TypeError);
        assert_eq!(err.to_string(), "null has no bencode representation");
    }
}
