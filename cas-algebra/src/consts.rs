//! Built-in constants. This module consists of static constants that hold [`Float`]s with the
//! given value, computed once at [`PRECISION`](crate::primitive::PRECISION) bits.

use once_cell::sync::Lazy;
use rug::Float;
use super::primitive::float;

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use super::*;

    #[test]
    fn constant_values() {
        assert_float_absolute_eq!(PI.to_f64(), std::f64::consts::PI, 1e-15);
        assert_float_absolute_eq!(E.to_f64(), std::f64::consts::E, 1e-15);
    }
}
