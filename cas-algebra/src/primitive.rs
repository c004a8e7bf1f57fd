//! Functions to construct [`Integer`]s, [`Float`]s, and [`Rational`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string slice. Returns [`None`] if the string is not a base 10
/// integer.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice. Returns [`None`] if the string is not a number.
pub fn float_from_str(s: &str) -> Option<Float> {
    Float::parse(s).ok().map(|parsed| Float::with_val(PRECISION, parsed))
}

/// Creates a [`Rational`] in lowest terms with a positive denominator. Returns [`None`] if the
/// denominator is zero.
pub fn rational(numerator: Integer, denominator: Integer) -> Option<Rational> {
    if denominator.is_zero() {
        None
    } else {
        Some(Rational::from((numerator, denominator)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numbers() {
        assert_eq!(int_from_str("-1072"), Some(int(-1072)));
        assert_eq!(int_from_str("10.5"), None);
        assert_eq!(float_from_str("0.25").map(|f| f.to_f64()), Some(0.25));
        assert!(float_from_str("abc").is_none());
    }

    #[test]
    fn rational_is_reduced() {
        let r = rational(int(6), int(-4)).unwrap();
        assert_eq!(r.numer(), &int(-3));
        assert_eq!(r.denom(), &int(2));
        assert!(rational(int(1), int(0)).is_none());
    }
}
