//! Byte-level cursor and output buffer used by the codec.

use crate::error::DecodeError;

// =============================================================================
// DECODING
// =============================================================================

/// Cursor over an input buffer.
///
/// Wraps a byte slice and tracks the offset of the next unread byte.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Returns the next byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Skips `n` bytes. The caller must have checked they exist.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining_len());
        self.pos += n;
    }

    /// Returns the absolute offset of the next `byte` at or after the cursor.
    #[inline]
    pub fn find(&self, byte: u8) -> Option<usize> {
        self.remaining()
            .iter()
            .position(|&b| b == byte)
            .map(|i| self.pos + i)
    }

    /// Returns the bytes from the cursor up to (not including) `end`, and
    /// moves the cursor past `end`.
    #[inline]
    pub fn take_until(&mut self, end: usize) -> &'a [u8] {
        debug_assert!(end >= self.pos && end < self.data.len());
        let bytes = &self.data[self.pos..end];
        self.pos = end + 1;
        bytes
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining_len();
        if n > available {
            return Err(DecodeError::UnexpectedEof {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Output buffer for encoding.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Creates a writer that appends to an existing buffer.
    pub fn from_vec(buf: Vec<u8>) -> Self {
        Self { buf }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes the decimal digits of an unsigned value.
    #[inline]
    pub fn write_decimal(&mut self, mut value: u64) {
        let mut buf = [0u8; 20]; // u64::MAX has 20 digits
        let mut start = buf.len();
        loop {
            start -= 1;
            buf[start] = b'0' + (value % 10) as u8;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        self.buf.extend_from_slice(&buf[start..]);
    }

    /// Writes the decimal form of a signed value, with `-` when negative.
    pub fn write_signed_decimal(&mut self, value: i64) {
        if value < 0 {
            self.buf.push(b'-');
        }
        self.write_decimal(value.unsigned_abs());
    }
}

/// Number of decimal digits in `value`.
pub fn decimal_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 10 {
        value /= 10;
        len += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_output() {
        for v in [0u64, 7, 10, 99, 100, 12345, u64::MAX] {
            let mut writer = Writer::default();
            writer.write_decimal(v);
            assert_eq!(writer.into_bytes(), v.to_string().into_bytes());
            assert_eq!(decimal_len(v), v.to_string().len());
        }
    }

    #[test]
    fn test_signed_decimal_output() {
        for v in [0i64, -1, 1, -42, i64::MIN, i64::MAX] {
            let mut writer = Writer::default();
            writer.write_signed_decimal(v);
            assert_eq!(writer.into_bytes(), v.to_string().into_bytes(), "failed for {}", v);
        }
    }

    #[test]
    fn test_find_and_take_until() {
        let mut reader = Reader::new(b"12:abc");
        let colon = reader.find(b':').unwrap();
        assert_eq!(colon, 2);
        assert_eq!(reader.take_until(colon), b"12");
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.find(b':'), None);
    }

    #[test]
    fn test_peek_and_advance() {
        let mut reader = Reader::new(b"ie");
        assert_eq!(reader.peek(), Some(b'i'));
        reader.advance(2);
        assert_eq!(reader.peek(), None);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_unexpected_eof() {
        let data = [0u8; 5];
        let mut reader = Reader::new(&data);
        reader.advance(1);
        let result = reader.read_bytes(10);
        assert_eq!(
            result,
            Err(DecodeError::UnexpectedEof {
                offset: 1,
                needed: 10,
                available: 4
            })
        );
    }

    #[test]
    fn test_from_vec_appends() {
        let mut writer = Writer::from_vec(b"xy".to_vec());
        writer.write_byte(b'z');
        assert_eq!(writer.into_bytes(), b"xyz");
    }
}
