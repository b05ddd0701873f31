//! Data model types for bencode.
//!
//! - Integers of any magnitude ([`Integer`])
//! - Order-preserving dictionaries with unique keys ([`Dictionary`])
//! - The value tree shared by decoder and encoder ([`Value`])

pub mod dict;
pub mod integer;
pub mod value;

pub use dict::Dictionary;
pub use integer::Integer;
pub use value::Value;
