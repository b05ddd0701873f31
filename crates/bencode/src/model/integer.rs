//! Arbitrary-precision bencode integers.

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, ParseBigIntError, Sign};
use num_traits::FromPrimitive;

use crate::error::EncodeError;

/// A bencode integer of any magnitude.
///
/// Values in i64 range are always stored inline, so two integers compare
/// equal exactly when they are numerically equal, however they were built.
///
/// ```
/// use bencode::Integer;
///
/// let big: Integer = "18446744073709551616".parse().unwrap();
/// assert_eq!(big.as_i64(), None);
///
/// // Parsed text is normalized; the value, not the spelling, is kept.
/// let small: Integer = "+007".parse().unwrap();
/// assert_eq!(small, Integer::from(7i64));
/// assert_eq!(small.to_string(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Integer(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Small(i64),
    /// Never holds a value in i64 range.
    Big(BigInt),
}

impl Integer {
    /// Builds an integer from digit text already checked to be canonical.
    pub(crate) fn from_canonical(text: &[u8]) -> Option<Integer> {
        let small = std::str::from_utf8(text)
            .ok()
            .and_then(|s| s.parse::<i64>().ok());
        match small {
            Some(v) => Some(Integer(Repr::Small(v))),
            None => BigInt::parse_bytes(text, 10).map(Integer::from),
        }
    }

    /// Rounds a float to the nearest integer, halves away from zero.
    ///
    /// ```
    /// use bencode::Integer;
    ///
    /// assert_eq!(Integer::from_f64(2.5).unwrap(), Integer::from(3i64));
    /// assert_eq!(Integer::from_f64(-2.5).unwrap(), Integer::from(-3i64));
    /// assert!(Integer::from_f64(f64::NAN).is_err());
    /// ```
    pub fn from_f64(value: f64) -> Result<Integer, EncodeError> {
        BigInt::from_f64(value.round())
            .map(Integer::from)
            .ok_or(EncodeError::NonFiniteNumber { value })
    }

    /// Returns the value as i64, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match &self.0 {
            Repr::Small(v) => Some(*v),
            Repr::Big(_) => None,
        }
    }

    /// Returns the value as a `BigInt`.
    pub fn to_bigint(&self) -> BigInt {
        match &self.0 {
            Repr::Small(v) => BigInt::from(*v),
            Repr::Big(b) => b.clone(),
        }
    }

    /// Returns true if the value is below zero.
    pub fn is_negative(&self) -> bool {
        match &self.0 {
            Repr::Small(v) => *v < 0,
            Repr::Big(b) => b.sign() == Sign::Minus,
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Small(v) => write!(f, "{}", v),
            Repr::Big(b) => write!(f, "{}", b),
        }
    }
}

impl FromStr for Integer {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<BigInt>().map(Integer::from)
    }
}

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        match i64::try_from(&value) {
            Ok(v) => Integer(Repr::Small(v)),
            Err(_) => Integer(Repr::Big(value)),
        }
    }
}

impl From<Integer> for BigInt {
    fn from(value: Integer) -> Self {
        match value.0 {
            Repr::Small(v) => BigInt::from(v),
            Repr::Big(b) => b,
        }
    }
}

macro_rules! impl_from_small {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Integer {
                fn from(v: $t) -> Self {
                    Integer(Repr::Small(i64::from(v)))
                }
            }
        )*
    };
}

macro_rules! impl_from_wide {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Integer {
                fn from(v: $t) -> Self {
                    match i64::try_from(v) {
                        Ok(small) => Integer(Repr::Small(small)),
                        Err(_) => Integer(Repr::Big(BigInt::from(v))),
                    }
                }
            }
        )*
    };
}

impl_from_small!(i8, i16, i32, i64, u8, u16, u32);
impl_from_wide!(isize, usize, u64, i128, u128);

#[cfg(test)]
mod tests {
    use super::*;

    fn big(text: &str) -> Integer {
        text.parse().unwrap()
    }

    #[test]
    fn test_from_canonical() {
        assert_eq!(Integer::from_canonical(b"0"), Some(Integer::from(0i64)));
        assert_eq!(Integer::from_canonical(b"-42"), Some(Integer::from(-42i64)));
        assert_eq!(
            Integer::from_canonical(b"-9223372036854775808"),
            Some(Integer::from(i64::MIN))
        );
        let above = Integer::from_canonical(b"9223372036854775808").unwrap();
        assert_eq!(above.as_i64(), None);
        assert_eq!(above.to_string(), "9223372036854775808");
    }

    #[test]
    fn test_bigint_in_i64_range_is_small() {
        let from_big = Integer::from(BigInt::from(5));
        assert_eq!(from_big, Integer::from(5i64));
        assert_eq!(from_big.as_i64(), Some(5));
        assert_eq!(big("-9223372036854775808"), Integer::from(i64::MIN));
        assert_eq!(big("0007"), Integer::from(7i64));
        assert!("abc".parse::<Integer>().is_err());
    }

    #[test]
    fn test_wide_conversions() {
        assert_eq!(Integer::from(u64::MAX), big("18446744073709551615"));
        assert_eq!(Integer::from(7u64), Integer::from(7i64));
        assert_eq!(Integer::from(i128::MIN), big(&i128::MIN.to_string()));
        assert_eq!(Integer::from(-5i128).as_i64(), Some(-5));
        assert_eq!(
            BigInt::from(Integer::from(u128::MAX)),
            BigInt::from(u128::MAX)
        );
    }

    #[test]
    fn test_from_f64_rounding() {
        assert_eq!(Integer::from_f64(0.4).unwrap(), Integer::from(0i64));
        assert_eq!(Integer::from_f64(-0.4).unwrap(), Integer::from(0i64));
        assert_eq!(Integer::from_f64(0.5).unwrap(), Integer::from(1i64));
        assert_eq!(Integer::from_f64(-0.5).unwrap(), Integer::from(-1i64));
        assert_eq!(Integer::from_f64(41.6).unwrap(), Integer::from(42i64));
        assert_eq!(Integer::from_f64(1e20).unwrap(), big("100000000000000000000"));
        assert_eq!(
            Integer::from_f64(-9_223_372_036_854_775_808.0).unwrap(),
            Integer::from(i64::MIN)
        );
    }

    #[test]
    fn test_from_f64_non_finite() {
        assert!(matches!(
            Integer::from_f64(f64::INFINITY),
            Err(EncodeError::NonFiniteNumber { .. })
        ));
        assert!(Integer::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_display_and_sign() {
        assert_eq!(Integer::from(-3i64).to_string(), "-3");
        let negative = big("-123456789012345678901234567890");
        assert_eq!(negative.to_string(), "-123456789012345678901234567890");
        assert!(negative.is_negative());
        assert_eq!(negative.as_i64(), None);
        assert!(!Integer::from(0i64).is_negative());
        assert!(!big("123456789012345678901234567890").is_negative());
    }
}
