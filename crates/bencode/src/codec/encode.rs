//! Canonical bencode encoding.

use crate::codec::primitives::{Writer, decimal_len};
use crate::limits::{DICT_START, END, INTEGER_START, LENGTH_SEPARATOR, LIST_START};
use crate::model::{Dictionary, Integer, Value};

/// Encodes a value to its canonical byte form.
///
/// Dictionary entries are written in ascending byte order of key whatever
/// their insertion order, so equal values always encode identically.
///
/// ```
/// use bencode::{encode, Dictionary, Value};
///
/// let mut dict = Dictionary::new();
/// dict.insert(b"zebra".as_slice(), 1i64);
/// dict.insert(b"apple".as_slice(), 2i64);
/// assert_eq!(encode(&Value::Dict(dict)), b"d5:applei2e5:zebrai1ee");
/// ```
pub fn encode(value: &Value<'_>) -> Vec<u8> {
    let mut writer = Writer::with_capacity(encoded_len(value));
    encode_value(&mut writer, value);
    log::trace!("encoded {} value into {} bytes", value.kind(), writer.len());
    writer.into_bytes()
}

/// Appends the canonical encoding of `value` to `buf`.
pub fn encode_into(value: &Value<'_>, buf: &mut Vec<u8>) {
    buf.reserve(encoded_len(value));
    let mut writer = Writer::from_vec(std::mem::take(buf));
    encode_value(&mut writer, value);
    *buf = writer.into_bytes();
}

/// Returns the exact number of bytes [`encode`] produces for `value`.
pub fn encoded_len(value: &Value<'_>) -> usize {
    match value {
        Value::Integer(i) => 2 + integer_len(i),
        Value::Bytes(b) => string_len(b),
        Value::List(items) => 2 + items.iter().map(encoded_len).sum::<usize>(),
        Value::Dict(dict) => {
            2 + dict
                .iter()
                .map(|(k, v)| string_len(k) + encoded_len(v))
                .sum::<usize>()
        }
    }
}

fn integer_len(i: &Integer) -> usize {
    match i.as_i64() {
        Some(v) => usize::from(v < 0) + decimal_len(v.unsigned_abs()),
        None => i.to_string().len(),
    }
}

fn string_len(bytes: &[u8]) -> usize {
    decimal_len(bytes.len() as u64) + 1 + bytes.len()
}

fn encode_value(writer: &mut Writer, value: &Value<'_>) {
    match value {
        Value::Integer(i) => encode_integer(writer, i),
        Value::Bytes(b) => encode_string(writer, b),
        Value::List(items) => {
            writer.write_byte(LIST_START);
            for item in items {
                encode_value(writer, item);
            }
            writer.write_byte(END);
        }
        Value::Dict(dict) => encode_dict(writer, dict),
    }
}

fn encode_integer(writer: &mut Writer, i: &Integer) {
    writer.write_byte(INTEGER_START);
    match i.as_i64() {
        Some(v) => writer.write_signed_decimal(v),
        None => writer.write_bytes(i.to_string().as_bytes()),
    }
    writer.write_byte(END);
}

fn encode_string(writer: &mut Writer, bytes: &[u8]) {
    writer.write_decimal(bytes.len() as u64);
    writer.write_byte(LENGTH_SEPARATOR);
    writer.write_bytes(bytes);
}

fn encode_dict(writer: &mut Writer, dict: &Dictionary<'_>) {
    writer.write_byte(DICT_START);
    // Decoded dictionaries are usually sorted already.
    if dict.is_sorted() {
        for (key, value) in dict.iter() {
            encode_string(writer, key);
            encode_value(writer, value);
        }
    } else {
        for (key, value) in dict.sorted_entries() {
            encode_string(writer, key);
            encode_value(writer, value);
        }
    }
    writer.write_byte(END);
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    #[test]
    fn test_encode_integer() {
        assert_eq!(encode(&Value::from(42i64)), b"i42e");
        assert_eq!(encode(&Value::from(-42i64)), b"i-42e");
        assert_eq!(encode(&Value::from(0i64)), b"i0e");
        assert_eq!(encode(&Value::from(i64::MIN)), b"i-9223372036854775808e");
        assert_eq!(encode(&Value::from(u64::MAX)), b"i18446744073709551615e");
    }

    #[test]
    fn test_encode_big_integer() {
        let big: Integer = "-123456789012345678901234567890".parse().unwrap();
        let encoded = encode(&Value::Integer(big.clone()));
        assert_eq!(encoded, b"i-123456789012345678901234567890e");
        assert_eq!(crate::decode(&encoded).unwrap(), Value::Integer(big));
    }

    #[test]
    fn test_integers_encode_canonically_however_built() {
        // Small magnitudes built through BigInt or padded text still come
        // out minimal and decode back equal.
        for built in [
            Integer::from(num_bigint::BigInt::from(5)),
            "005".parse::<Integer>().unwrap(),
            "+5".parse::<Integer>().unwrap(),
        ] {
            let value = Value::Integer(built);
            let encoded = encode(&value);
            assert_eq!(encoded, b"i5e");
            assert_eq!(crate::decode(&encoded).unwrap(), value);
        }
        let zero = Value::Integer("-0".parse::<Integer>().unwrap());
        assert_eq!(encode(&zero), b"i0e");
    }

    #[test]
    fn test_encode_string() {
        assert_eq!(encode(&Value::string("string")), b"6:string");
        assert_eq!(encode(&Value::string("")), b"0:");
        assert_eq!(
            encode(&Value::Bytes(Cow::Owned(vec![0u8; 12]))),
            b"12:\0\0\0\0\0\0\0\0\0\0\0\0"
        );
    }

    #[test]
    fn test_encode_list() {
        let list = Value::List(vec![Value::string("foo"), Value::string("bar")]);
        assert_eq!(encode(&list), b"l3:foo3:bare");
        assert_eq!(encode(&Value::List(vec![])), b"le");

        let nested = Value::List(vec![
            Value::List(vec![Value::from(1i64)]),
            Value::Dict(Dictionary::new()),
        ]);
        assert_eq!(encode(&nested), b"lli1eedee");
    }

    #[test]
    fn test_encode_dict_sorts_keys() {
        let mut dict = Dictionary::new();
        dict.insert(b"zebra".as_slice(), 1i64);
        dict.insert(b"apple".as_slice(), 2i64);
        assert_eq!(encode(&Value::Dict(dict)), b"d5:applei2e5:zebrai1ee");

        let mut dict = Dictionary::new();
        dict.insert(b"foo".as_slice(), "bar");
        assert_eq!(encode(&Value::Dict(dict)), b"d3:foo3:bare");
    }

    #[test]
    fn test_encode_dict_bytewise_order() {
        // Byte order, not text collation: uppercase sorts before lowercase,
        // and a prefix sorts before its extensions.
        let dict: Dictionary = vec![
            (b"b".as_slice(), 1i64),
            (b"B".as_slice(), 2i64),
            (b"ba".as_slice(), 3i64),
            (b"\xff".as_slice(), 4i64),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            encode(&Value::Dict(dict)),
            b"d1:Bi2e1:bi1e2:bai3e1:\xffi4ee"
        );
    }

    #[test]
    fn test_encode_into_appends() {
        let mut buf = b"prefix".to_vec();
        encode_into(&Value::from(7i64), &mut buf);
        assert_eq!(buf, b"prefixi7e");
    }

    #[test]
    fn test_encoded_len_matches() {
        let dict: Dictionary = vec![
            (b"list".as_slice(), Value::List(vec![Value::from(-10i64), Value::string("x")])),
            (b"big".as_slice(), Value::from(u128::MAX)),
            (b"empty".as_slice(), Value::string("")),
        ]
        .into_iter()
        .collect();
        let value = Value::Dict(dict);
        assert_eq!(encoded_len(&value), encode(&value).len());
    }
}
