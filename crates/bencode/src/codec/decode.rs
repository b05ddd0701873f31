//! Bencode decoding.
//!
//! A single left-to-right scan; one byte of lookahead selects the entity, so
//! the decoder never backtracks. Byte strings borrow from the input.

use std::borrow::Cow;

use crate::codec::primitives::Reader;
use crate::error::DecodeError;
use crate::limits::{
    DEFAULT_MAX_DEPTH, DICT_START, END, INTEGER_START, LENGTH_SEPARATOR, LIST_START,
};
use crate::model::{Dictionary, Integer, Value};

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum container nesting depth.
    ///
    /// Integers and byte strings have depth 0; a list or dictionary is one
    /// deeper than its enclosing container. `0` accepts only scalar
    /// documents.
    pub max_depth: usize,

    /// Reject dictionaries whose keys are not in strictly ascending byte
    /// order.
    ///
    /// Off by default: any key order is accepted and the encoder restores
    /// canonical order.
    pub strict_key_order: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_key_order: false,
        }
    }
}

impl DecodeOptions {
    /// Creates default (lenient) decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that also require sorted dictionary keys.
    pub fn strict() -> Self {
        Self {
            strict_key_order: true,
            ..Self::default()
        }
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enables or disables the sorted-key requirement.
    pub fn with_strict_key_order(mut self, strict: bool) -> Self {
        self.strict_key_order = strict;
        self
    }
}

/// Decodes one bencode document with default options.
///
/// ```
/// use bencode::decode;
///
/// let value = decode(b"d3:foo3:bare").unwrap();
/// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
/// ```
pub fn decode(input: &[u8]) -> Result<Value<'_>, DecodeError> {
    decode_with_options(input, DecodeOptions::default())
}

/// Decodes one bencode document.
///
/// The input must hold exactly one top-level entity. Decoding stops at the
/// first fault; no partial value is returned.
pub fn decode_with_options(input: &[u8], options: DecodeOptions) -> Result<Value<'_>, DecodeError> {
    let mut decoder = Decoder {
        reader: Reader::new(input),
        options,
    };
    let result = decoder.decode_document();
    match &result {
        Ok(_) => log::trace!("decoded bencode document of {} bytes", input.len()),
        Err(e) => log::debug!(
            "bencode decode failed: {} (kind {}, offset {})",
            e,
            e.kind(),
            e.offset()
        ),
    }
    result
}

struct Decoder<'a> {
    reader: Reader<'a>,
    options: DecodeOptions,
}

impl<'a> Decoder<'a> {
    fn decode_document(&mut self) -> Result<Value<'a>, DecodeError> {
        let value = self.decode_entity(0)?;
        if !self.reader.is_empty() {
            return Err(DecodeError::TrailingData {
                offset: self.reader.position(),
                len: self.reader.remaining_len(),
            });
        }
        Ok(value)
    }

    /// Decodes the entity at the cursor. `depth` is the number of enclosing
    /// containers.
    fn decode_entity(&mut self, depth: usize) -> Result<Value<'a>, DecodeError> {
        match self.reader.peek() {
            Some(INTEGER_START) => self.decode_integer().map(Value::Integer),
            Some(LIST_START) => self.decode_list(depth),
            Some(DICT_START) => self.decode_dict(depth),
            Some(b'0'..=b'9') => self.decode_string().map(|b| Value::Bytes(Cow::Borrowed(b))),
            found => Err(DecodeError::Syntax {
                offset: self.reader.position(),
                found,
            }),
        }
    }

    fn enter_container(&self, depth: usize) -> Result<(), DecodeError> {
        if depth >= self.options.max_depth {
            return Err(DecodeError::DepthExceeded {
                offset: self.reader.position(),
                max: self.options.max_depth,
            });
        }
        Ok(())
    }

    fn decode_integer(&mut self) -> Result<Integer, DecodeError> {
        let start = self.reader.position();
        self.reader.advance(1);

        let end = self
            .reader
            .find(END)
            .ok_or(DecodeError::UnterminatedInteger { offset: start })?;
        let body_offset = self.reader.position();
        let body = self.reader.take_until(end);

        let (negative, digits) = match body.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, body),
        };
        let digits_offset = body_offset + usize::from(negative);

        if digits.is_empty() {
            return Err(DecodeError::EmptyInteger { offset: start });
        }
        if let Some(i) = digits.iter().position(|b| !b.is_ascii_digit()) {
            return Err(DecodeError::InvalidInteger {
                offset: digits_offset + i,
                reason: "non-digit character",
            });
        }
        if digits[0] == b'0' {
            if digits.len() > 1 {
                return Err(DecodeError::InvalidInteger {
                    offset: digits_offset,
                    reason: "leading zero",
                });
            }
            if negative {
                return Err(DecodeError::InvalidInteger {
                    offset: body_offset,
                    reason: "negative zero",
                });
            }
        }

        Integer::from_canonical(body).ok_or(DecodeError::InvalidInteger {
            offset: body_offset,
            reason: "non-digit character",
        })
    }

    fn decode_string(&mut self) -> Result<&'a [u8], DecodeError> {
        let start = self.reader.position();
        let colon = self
            .reader
            .find(LENGTH_SEPARATOR)
            .ok_or(DecodeError::UnterminatedString { offset: start })?;
        let digits = self.reader.take_until(colon);

        if let Some(i) = digits.iter().position(|b| !b.is_ascii_digit()) {
            return Err(DecodeError::InvalidLength {
                offset: start + i,
                reason: "non-digit character",
            });
        }
        if digits.len() > 1 && digits[0] == b'0' {
            return Err(DecodeError::InvalidLength {
                offset: start,
                reason: "leading zero",
            });
        }

        match parse_length(digits) {
            Some(len) => self.reader.read_bytes(len),
            // A length that overflows usize can never be satisfied.
            None => Err(DecodeError::UnexpectedEof {
                offset: self.reader.position(),
                needed: usize::MAX,
                available: self.reader.remaining_len(),
            }),
        }
    }

    fn decode_list(&mut self, depth: usize) -> Result<Value<'a>, DecodeError> {
        self.enter_container(depth)?;
        let start = self.reader.position();
        self.reader.advance(1);

        let mut list = Vec::new();
        loop {
            match self.reader.peek() {
                Some(END) => {
                    self.reader.advance(1);
                    return Ok(Value::List(list));
                }
                None => return Err(DecodeError::UnterminatedList { offset: start }),
                Some(_) => list.push(self.decode_entity(depth + 1)?),
            }
        }
    }

    fn decode_dict(&mut self, depth: usize) -> Result<Value<'a>, DecodeError> {
        self.enter_container(depth)?;
        let start = self.reader.position();
        self.reader.advance(1);

        let mut dict = Dictionary::new();
        let mut previous: Option<&'a [u8]> = None;

        loop {
            let key_offset = self.reader.position();
            match self.reader.peek() {
                Some(END) => {
                    self.reader.advance(1);
                    return Ok(Value::Dict(dict));
                }
                None => return Err(DecodeError::UnterminatedDictionary { offset: start }),
                Some(b) if !b.is_ascii_digit() => {
                    return Err(DecodeError::InvalidKey {
                        offset: key_offset,
                        found: b,
                    });
                }
                Some(_) => {}
            }

            let key = self.decode_string()?;
            if dict.contains_key(key) {
                return Err(DecodeError::DuplicateKey {
                    offset: key_offset,
                    key: key.to_vec(),
                });
            }
            if self.options.strict_key_order {
                if let Some(prev) = previous {
                    if key <= prev {
                        log::trace!("strict decode: key at offset {} out of order", key_offset);
                        return Err(DecodeError::UnsortedKeys {
                            offset: key_offset,
                            key: key.to_vec(),
                        });
                    }
                }
                previous = Some(key);
            }

            let value = self.decode_entity(depth + 1)?;
            dict.push_unique(Cow::Borrowed(key), value);
        }
    }
}

/// Parses an all-digit length field, returning `None` on overflow.
fn parse_length(digits: &[u8]) -> Option<usize> {
    digits.iter().try_fold(0usize, |acc, &d| {
        acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
    })
}
