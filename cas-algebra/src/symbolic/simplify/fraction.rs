//! Tools to help build fractions.

use crate::symbolic::expr::Expr;

/// Create an [`Expr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`Expr::Mul`] whose last factor is the denominator raised to the power
/// of -1. If the numerator is already a product, the denominator is appended to its factors.
pub(crate) fn make_fraction(numerator: Expr, denominator: Expr) -> Expr {
    numerator * recip(denominator)
}

/// Returns `expr^-1`.
pub(crate) fn recip(expr: Expr) -> Expr {
    Expr::pow(expr, Expr::int(-1))
}
