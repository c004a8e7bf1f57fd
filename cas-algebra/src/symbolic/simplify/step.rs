//! Rewrite steps reported by the simplifier.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A step taken while rewriting an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Step {
    /// `a+(b+c) = a+b+c`
    FlattenAdd,

    /// `a*(b*c) = a*b*c`
    FlattenMul,

    /// `2+3 = 5`
    /// `2*3 = 6`
    FoldNumbers,

    /// `4/6 = 2/3`
    ReduceRational,

    /// `a+a = 2*a`
    /// `2*a+3*a = 5*a`
    /// `a-a = 0`
    CombineLikeTerms,

    /// `a*a = a^2`
    /// `a^2*a^3 = a^5`
    CombineLikeFactors,

    /// `0*a = 0`
    MultiplyZero,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `(a^b)^c = a^(b*c)`
    PowerOfPower,

    /// `2^3 = 8`
    /// `(1/2)^-2 = 4`
    EvaluatePower,

    /// `2*a+4*b = 2*(a+2*b)`
    FactorCommon,

    /// `a*(b+c) = a*b+a*c`
    Distribute,

    /// `(a+b)^2 = a^2+2*a*b+b^2`
    BinomialExpansion,

    /// `(a+b+c)^2 = (a+b+c)*(a+b+c)`, then distributed
    RepeatedMultiplication,

    /// `(a*b)^n = a^n*b^n`
    DistributePower,

    /// `ln(a*b) = ln(a)+ln(b)`
    /// `ln(a^b) = b*ln(a)`
    ExpandLog,

    /// `tan(x) = sin(x)*cos(x)^-1`
    ExpandTrig,

    /// `b+a = a+b`
    Reorder,
}
