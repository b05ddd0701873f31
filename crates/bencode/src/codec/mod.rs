//! Bencode encoding/decoding.
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` |
//! | Byte string | `<length>:<data>` | `4:spam` |
//! | List | `l<items>e` | `l4:spami42ee` |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` |

pub mod decode;
pub mod encode;
pub(crate) mod primitives;

pub use decode::{DecodeOptions, decode, decode_with_options};
pub use encode::{encode, encode_into, encoded_len};
