//! Decoding limits and wire constants.

/// Default maximum container nesting depth accepted by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Prefix of an integer entity.
pub const INTEGER_START: u8 = b'i';

/// Prefix of a list entity.
pub const LIST_START: u8 = b'l';

/// Prefix of a dictionary entity.
pub const DICT_START: u8 = b'd';

/// Terminator of integer, list and dictionary entities.
pub const END: u8 = b'e';

/// Separator between a string's length and its payload.
pub const LENGTH_SEPARATOR: u8 = b':';
