//! Strict, canonical bencode.
//!
//! This crate decodes untrusted bencode documents into a value tree under
//! strict grammar validation, and encodes value trees into the unique
//! canonical byte sequence for each value.
//!
//! # Quick Start
//!
//! ```rust
//! use bencode::{decode, encode, Dictionary, Value};
//!
//! // Decode a dictionary
//! let value = decode(b"d3:foo3:bare").unwrap();
//! assert_eq!(value.get(b"foo").and_then(Value::as_str), Some("bar"));
//!
//! // Build and encode one; keys come out sorted
//! let mut dict = Dictionary::new();
//! dict.insert(b"zebra".as_slice(), 1i64);
//! dict.insert(b"apple".as_slice(), 2i64);
//! assert_eq!(encode(&Value::Dict(dict)), b"d5:applei2e5:zebrai1ee");
//! ```
//!
//! # Modules
//!
//! - [`model`]: The value tree ([`Value`], [`Integer`], [`Dictionary`])
//! - [`codec`]: Decoder and canonical encoder
//! - [`validate`]: Canonical-form checks on raw input
//! - [`json`]: Conversion from and to JSON values (feature `json`)
//! - [`error`]: Error types
//! - [`limits`]: Decoding limits and wire constants
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Container nesting is bounded by [`DecodeOptions::max_depth`]
//! - Declared string lengths are checked against the remaining input before
//!   anything is read
//! - Every failure carries the byte offset of the fault
//!
//! # Canonical form
//!
//! Decoding is lenient about dictionary key order; encoding always sorts.
//! Use [`DecodeOptions::strict`] or [`validate::validate_canonical`] when
//! non-canonical input must be rejected.

pub mod codec;
pub mod error;
#[cfg(feature = "json")]
pub mod json;
pub mod limits;
pub mod model;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{DecodeOptions, decode, decode_with_options, encode, encode_into, encoded_len};
pub use error::{DecodeError, EncodeError, ErrorKind, ValidationError};
#[cfg(feature = "json")]
pub use json::{encode_json, from_json, to_json};
pub use model::{Dictionary, Integer, Value};
pub use validate::{is_canonical, validate_canonical};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
