//! Canonical-form validation.
//!
//! Decoding checks grammar only: it accepts dictionaries in any key order.
//! These helpers additionally check that a document is already the exact
//! canonical encoding of its value, as required when the raw bytes are
//! hashed or signed.

use crate::codec::{DecodeOptions, decode_with_options, encode};
use crate::error::ValidationError;

/// Validates that `input` is well-formed and canonical.
///
/// Returns the offset of the first byte that differs from the canonical
/// encoding when the input decodes but is not canonical.
pub fn validate_canonical(input: &[u8], options: DecodeOptions) -> Result<(), ValidationError> {
    let value = decode_with_options(input, options)?;
    let canonical = encode(&value);
    if canonical == input {
        return Ok(());
    }
    let offset = input
        .iter()
        .zip(canonical.iter())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| input.len().min(canonical.len()));
    log::debug!("bencode input is not canonical: first difference at offset {}", offset);
    Err(ValidationError::NotCanonical { offset })
}

/// Returns true if `input` decodes with default options and is canonical.
pub fn is_canonical(input: &[u8]) -> bool {
    validate_canonical(input, DecodeOptions::default()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, ErrorKind};

    #[test]
    fn test_canonical_inputs() {
        assert!(is_canonical(b"i42e"));
        assert!(is_canonical(b"d3:cow3:moo4:spam4:eggse"));
        assert!(is_canonical(b"l3:foo3:bare"));
    }

    #[test]
    fn test_unsorted_keys_not_canonical() {
        assert_eq!(
            validate_canonical(b"d1:bi1e1:ai2ee", DecodeOptions::default()),
            Err(ValidationError::NotCanonical { offset: 3 })
        );
        assert!(!is_canonical(b"d1:bi1e1:ai2ee"));
    }

    #[test]
    fn test_malformed_input_reports_decode_error() {
        let err = validate_canonical(b"i042e", DecodeOptions::default()).unwrap_err();
        match err {
            ValidationError::Decode(e) => assert_eq!(e.kind(), ErrorKind::InvalidInteger),
            other => panic!("expected decode error, got {:?}", other),
        }
        assert_eq!(
            validate_canonical(b"3:foo3:bar", DecodeOptions::default()),
            Err(ValidationError::Decode(DecodeError::TrailingData {
                offset: 5,
                len: 5
            }))
        );
    }
}
