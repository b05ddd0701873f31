//! The bencode value tree.

use std::borrow::Cow;

use crate::model::{Dictionary, Integer};

/// A bencode value.
///
/// Decoded byte strings borrow from the input buffer; call
/// [`Value::into_owned`] to detach a tree from it.
///
/// ```
/// use bencode::{Dictionary, Value};
///
/// let int = Value::from(42i64);
/// let string = Value::string("hello");
/// let list = Value::List(vec![int.clone(), string.clone()]);
///
/// let mut dict = Dictionary::new();
/// dict.insert(b"items".as_slice(), list);
/// let value = Value::Dict(dict);
///
/// assert_eq!(int.as_integer(), Some(42));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert_eq!(value.get(b"items").and_then(Value::as_list).map(|l| l.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    /// A signed integer of any magnitude.
    Integer(Integer),
    /// A byte string; not assumed to be text.
    Bytes(Cow<'a, [u8]>),
    /// An ordered list of values.
    List(Vec<Value<'a>>),
    /// A dictionary with byte string keys.
    Dict(Dictionary<'a>),
}

impl<'a> Value<'a> {
    /// Creates a byte string value.
    pub fn bytes(bytes: impl Into<Cow<'a, [u8]>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// Creates a byte string value from the UTF-8 bytes of `s`.
    pub fn string(s: &'a str) -> Self {
        Value::Bytes(Cow::Borrowed(s.as_bytes()))
    }

    /// Returns the integer as i64, if this is an integer that fits.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => i.as_i64(),
            _ => None,
        }
    }

    /// Returns the integer of any magnitude, if this is an integer.
    pub fn as_big_integer(&self) -> Option<&Integer> {
        match self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the raw bytes, if this is a byte string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the byte string as `&str` if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Returns the elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the dictionary, if this is one.
    pub fn as_dict(&self) -> Option<&Dictionary<'a>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if this is one.
    pub fn into_dict(self) -> Option<Dictionary<'a>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` if this is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&Value<'a>> {
        self.as_dict()?.get(key)
    }

    /// Returns a human-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "byte string",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }

    /// Converts into a value that owns all of its data.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Integer(i) => Value::Integer(i),
            Value::Bytes(b) => Value::Bytes(Cow::Owned(b.into_owned())),
            Value::List(l) => Value::List(l.into_iter().map(Value::into_owned).collect()),
            Value::Dict(d) => Value::Dict(d.into_owned()),
        }
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value<'_> {
                fn from(v: $t) -> Self {
                    Value::Integer(Integer::from(v))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, i128, u128);

impl From<Integer> for Value<'_> {
    fn from(i: Integer) -> Self {
        Value::Integer(i)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Bytes(Cow::Owned(s.into_bytes()))
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(b: &'a [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(b))
    }
}

impl From<Vec<u8>> for Value<'_> {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Cow::Owned(b))
    }
}

impl<'a> From<Vec<Value<'a>>> for Value<'a> {
    fn from(l: Vec<Value<'a>>) -> Self {
        Value::List(l)
    }
}

impl<'a> From<Dictionary<'a>> for Value<'a> {
    fn from(d: Dictionary<'a>) -> Self {
        Value::Dict(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let value = Value::from(42i64);
        assert_eq!(value.as_integer(), Some(42));
        assert!(value.as_bytes().is_none());
        assert_eq!(value.kind(), "integer");

        let value = Value::string("test");
        assert_eq!(value.as_str(), Some("test"));
        assert!(value.as_integer().is_none());

        let value = Value::bytes(vec![0xffu8, 0xfe]);
        assert_eq!(value.as_bytes(), Some(b"\xff\xfe".as_slice()));
        assert_eq!(value.as_str(), None);

        let value = Value::List(vec![]);
        assert!(value.as_list().is_some());
        assert!(value.as_dict().is_none());
    }

    #[test]
    fn test_big_integer_accessors() {
        let value = Value::from(u64::MAX);
        assert_eq!(value.as_integer(), None);
        assert_eq!(value.as_big_integer(), Some(&Integer::from(u64::MAX)));
        assert_eq!(
            value.as_big_integer().map(|i| i.to_string()),
            Some("18446744073709551615".to_string())
        );
    }

    #[test]
    fn test_get_on_non_dict() {
        assert_eq!(Value::from(1i64).get(b"a"), None);
    }

    #[test]
    fn test_into_owned_detaches() {
        let buf = b"payload".to_vec();
        let owned: Value<'static> = {
            let borrowed = Value::List(vec![Value::bytes(buf.as_slice())]);
            borrowed.into_owned()
        };
        drop(buf);
        assert_eq!(
            owned.as_list().and_then(|l| l[0].as_str()),
            Some("payload")
        );
    }
}
