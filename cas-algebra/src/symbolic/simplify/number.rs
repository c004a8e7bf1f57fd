//! Scratch numbers used to accumulate numeric coefficients while rewriting.
//!
//! A [`Number`] is local to the rule that builds it, and is turned into a fresh leaf with
//! [`Number::into_expr`] once the rule is done with it.

use crate::primitive::{float, rational};
use crate::symbolic::expr::{Expr, Primary};
use rug::{ops::Pow, Float, Integer, Rational};
use std::ops::{Add, Mul};

/// An exact or inexact number.
///
/// Arithmetic between two exact numbers stays exact. As soon as an inexact number is involved,
/// the result is inexact.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Number {
    Exact(Rational),
    Inexact(Float),
}

impl Number {
    pub fn zero() -> Self {
        Self::Exact(Rational::new())
    }

    pub fn one() -> Self {
        Self::Exact(Rational::from(1))
    }

    /// Reads a numeric leaf. Returns [`None`] for anything else, including rationals with a zero
    /// denominator.
    pub fn from_expr(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Primary(Primary::Integer(n)) => Some(Self::Exact(Rational::from(n))),
            Expr::Primary(Primary::Float(f)) => Some(Self::Inexact(f.clone())),
            Expr::Primary(Primary::Rational(num, den)) => {
                rational(num.clone(), den.clone()).map(Self::Exact)
            },
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Exact(r) => *r == 0,
            Self::Inexact(f) => f.is_zero(),
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Self::Exact(r) => *r == 1,
            Self::Inexact(f) => *f == 1,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Self::Exact(r) => *r < 0,
            Self::Inexact(f) => *f < 0,
        }
    }

    /// If the number is an exact integer, returns it.
    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Self::Exact(r) if *r.denom() == 1 => Some(r.numer().clone()),
            _ => None,
        }
    }

    /// Raises an exact number to an integer power. Returns [`None`] if the number is inexact, or
    /// if zero is raised to a negative power.
    pub fn checked_pow(&self, exp: i32) -> Option<Self> {
        match self {
            Self::Exact(r) if !(*r == 0 && exp < 0) => {
                Some(Self::Exact(r.clone().pow(exp)))
            },
            _ => None,
        }
    }

    /// Converts the number into an expression. Exact numbers with a denominator of 1 become
    /// integers.
    pub fn into_expr(self) -> Expr {
        match self {
            Self::Exact(r) => {
                let (num, den) = r.into_numer_denom();
                if den == 1 {
                    Expr::Primary(Primary::Integer(num))
                } else {
                    Expr::Primary(Primary::Rational(num, den))
                }
            },
            Self::Inexact(f) => Expr::Primary(Primary::Float(f)),
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Exact(lhs), Self::Exact(rhs)) => Self::Exact(lhs + rhs),
            (Self::Exact(exact), Self::Inexact(inexact))
                | (Self::Inexact(inexact), Self::Exact(exact)) => Self::Inexact(float(exact) + inexact),
            (Self::Inexact(lhs), Self::Inexact(rhs)) => Self::Inexact(lhs + rhs),
        }
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Exact(lhs), Self::Exact(rhs)) => Self::Exact(lhs * rhs),
            (Self::Exact(exact), Self::Inexact(inexact))
                | (Self::Inexact(inexact), Self::Exact(exact)) => Self::Inexact(float(exact) * inexact),
            (Self::Inexact(lhs), Self::Inexact(rhs)) => Self::Inexact(lhs * rhs),
        }
    }
}

impl From<Integer> for Number {
    fn from(n: Integer) -> Self {
        Self::Exact(Rational::from(n))
    }
}

impl std::iter::Sum for Number {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, n| acc + n)
    }
}

impl std::iter::Product for Number {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, n| acc * n)
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::int;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn exact_arithmetic() {
        let half = Number::from_expr(&Expr::rational(1, 2)).unwrap();
        let third = Number::from_expr(&Expr::rational(1, 3)).unwrap();
        assert_eq!((half.clone() + third.clone()).into_expr(), Expr::rational(5, 6));
        assert_eq!((half.clone() + half.clone()).into_expr(), Expr::int(1));
        assert_eq!((half * Number::from(int(4))).into_expr(), Expr::int(2));
        assert!(third.as_integer().is_none());
    }

    #[test]
    fn inexact_is_contagious() {
        let sum = Number::from(int(1)) + Number::from_expr(&Expr::float(0.5)).unwrap();
        assert_eq!(sum.into_expr(), Expr::float(1.5));
    }

    #[test]
    fn powers() {
        let two_thirds = Number::from_expr(&Expr::rational(2, 3)).unwrap();
        assert_eq!(two_thirds.checked_pow(-2).unwrap().into_expr(), Expr::rational(9, 4));
        assert!(Number::zero().checked_pow(-1).is_none());
        assert_eq!(Number::zero().checked_pow(0).unwrap().into_expr(), Expr::int(1));
    }

    #[test]
    fn zero_denominator_is_not_a_number() {
        assert!(Number::from_expr(&Expr::rational(1, 0)).is_none());
    }
}
