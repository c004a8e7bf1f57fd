//! Combining like terms and like factors.
//!
//! Terms are "like" when they have the same base after their numeric coefficient is pulled out,
//! and factors are "like" when they have the same base once their exponent is pulled out. Bases
//! are compared by their **rendered text**, so `x*y` and `y*x` are different bases unless the
//! expression was [`normalize`](super::normalize)d first.

use log::trace;
use crate::symbolic::{expr::{Expr, Primary}, step_collector::StepCollector};
use super::{number::Number, step::Step};

/// The largest exponent for which a power of an exact number is folded into a single number.
const MAX_FOLDED_EXPONENT: i32 = 64;

/// Combines like terms, like factors, and numbers throughout the expression.
///
/// - `x+x+x = 3*x`
/// - `x*x^2 = x^3`
/// - `2*3*x = 6*x`
/// - `(x^2)^3 = x^6`
pub fn collect(expr: &Expr) -> Expr {
    collect_with(expr, &mut ())
}

/// Combines like terms, like factors, and numbers throughout the expression, reporting each
/// rewrite to the step collector.
pub fn collect_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    match expr {
        Expr::Primary(Primary::Rational(num, den)) => {
            match Number::from_expr(expr) {
                Some(number) => {
                    let reduced = number.into_expr();
                    if !matches!(&reduced, Expr::Primary(Primary::Rational(n, d)) if n == num && d == den) {
                        step_collector.push(Step::ReduceRational);
                    }
                    reduced
                },
                // zero denominator
                None => expr.clone(),
            }
        },
        Expr::Primary(Primary::Call(name, args)) => {
            let args = args.iter()
                .map(|arg| collect_with(arg, step_collector))
                .collect();
            Expr::Primary(Primary::Call(name.clone(), args))
        },
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => {
            let terms = terms.iter()
                .map(|term| collect_with(term, step_collector))
                .collect();
            collect_sum(terms, step_collector)
        },
        Expr::Mul(factors) => {
            let factors = factors.iter()
                .map(|factor| collect_with(factor, step_collector))
                .collect();
            collect_product(factors, step_collector)
        },
        Expr::Exp(base, exp) => {
            let base = collect_with(base, step_collector);
            let exp = collect_with(exp, step_collector);
            collect_power(base, exp, step_collector)
        },
        Expr::Relation(lhs, rhs, relation) => Expr::Relation(
            Box::new(collect_with(lhs, step_collector)),
            Box::new(collect_with(rhs, step_collector)),
            *relation,
        ),
    }
}

/// Moves the terms of nested sums into one list.
fn flatten_sum(terms: Vec<Expr>, step_collector: &mut dyn StepCollector<Step>) -> Vec<Expr> {
    let mut out = Vec::with_capacity(terms.len());
    let mut stack = terms;
    stack.reverse();
    let mut flattened = false;
    while let Some(term) = stack.pop() {
        match term {
            Expr::Add(inner) => {
                flattened = true;
                stack.extend(inner.into_iter().rev());
            },
            term => out.push(term),
        }
    }
    if flattened {
        step_collector.push(Step::FlattenAdd);
    }
    out
}

/// Moves the factors of nested products into one list.
fn flatten_product(factors: Vec<Expr>, step_collector: &mut dyn StepCollector<Step>) -> Vec<Expr> {
    let mut out = Vec::with_capacity(factors.len());
    let mut stack = factors;
    stack.reverse();
    let mut flattened = false;
    while let Some(factor) = stack.pop() {
        match factor {
            Expr::Mul(inner) => {
                flattened = true;
                stack.extend(inner.into_iter().rev());
            },
            factor => out.push(factor),
        }
    }
    if flattened {
        step_collector.push(Step::FlattenMul);
    }
    out
}

/// Splits a term into its numeric coefficient and the remaining symbolic factors.
///
/// - `5` -> `(5, [])`
/// - `3*a*b` -> `(3, [a, b])`
/// - `2*x*1/2` -> `(1, [x])`
/// - `sin(x)` -> `(1, [sin(x)])`
pub(crate) fn split_coefficient(term: Expr) -> (Number, Vec<Expr>) {
    if let Some(number) = Number::from_expr(&term) {
        return (number, Vec::new());
    }

    match term {
        Expr::Mul(factors) => {
            let mut coefficient = Number::one();
            let mut base = Vec::with_capacity(factors.len());
            for factor in factors {
                match Number::from_expr(&factor) {
                    Some(number) => coefficient = coefficient * number,
                    None => base.push(factor),
                }
            }
            (coefficient, base)
        },
        term => (Number::one(), vec![term]),
    }
}

/// Multiplies the symbolic factors by a coefficient, omitting a coefficient of 1.
pub(crate) fn with_coefficient(coefficient: Number, mut base: Vec<Expr>) -> Expr {
    if base.is_empty() {
        coefficient.into_expr()
    } else if coefficient.is_one() {
        Expr::Mul(base).downgrade()
    } else {
        base.insert(0, coefficient.into_expr());
        Expr::Mul(base)
    }
}

/// A group of like terms.
struct TermGroup {
    /// Rendering of the shared base, or [`None`] for plain numbers.
    key: Option<String>,
    base: Vec<Expr>,
    coefficient: Number,
    count: usize,
}

/// Combines like terms of a sum whose terms have already been collected.
pub(crate) fn collect_sum(terms: Vec<Expr>, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let terms = flatten_sum(terms, step_collector);
    let mut groups: Vec<TermGroup> = Vec::new();

    for term in terms {
        let (coefficient, base) = split_coefficient(term);
        let key = if base.is_empty() {
            None
        } else {
            Some(Expr::Mul(base.clone()).downgrade().to_string())
        };

        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => {
                let sum = std::mem::replace(&mut group.coefficient, Number::zero()) + coefficient;
                group.coefficient = sum;
                group.count += 1;
            },
            None => groups.push(TermGroup { key, base, coefficient, count: 1 }),
        }
    }

    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        if group.count > 1 {
            match &group.key {
                Some(key) => {
                    trace!("combined {} terms with base `{}`", group.count, key);
                    step_collector.push(Step::CombineLikeTerms);
                },
                None => step_collector.push(Step::FoldNumbers),
            }
        }

        if !group.coefficient.is_zero() {
            out.push(with_coefficient(group.coefficient, group.base));
        }
    }

    Expr::Add(out).downgrade()
}

/// Returns true if the factors are exactly `-1` and `0`, in either order.
///
/// This product is kept as `-1*0` instead of being collapsed to `0`.
fn is_negated_zero(factors: &[Expr]) -> bool {
    let is_neg_one = |expr: &Expr| expr.as_integer().is_some_and(|n| *n == -1);
    match factors {
        [a, b] => (is_neg_one(a) && b.is_zero()) || (a.is_zero() && is_neg_one(b)),
        _ => false,
    }
}

/// Combines numbers and like factors of a product whose factors have already been collected.
pub(crate) fn collect_product(factors: Vec<Expr>, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let factors = flatten_product(factors, step_collector);
    if is_negated_zero(&factors) {
        return Expr::Mul(factors);
    }

    let mut coefficient = Number::one();
    let mut numeric_count = 0;
    let mut symbolic = Vec::with_capacity(factors.len());
    for factor in factors {
        match Number::from_expr(&factor) {
            Some(number) => {
                coefficient = coefficient * number;
                numeric_count += 1;
            },
            None => symbolic.push(factor),
        }
    }

    if numeric_count > 1 {
        step_collector.push(Step::FoldNumbers);
    }

    if coefficient.is_zero() {
        step_collector.push(Step::MultiplyZero);
        return Expr::int(0);
    }

    // group factors by base, in the order the bases are first seen
    let mut groups: Vec<(String, Expr, Vec<Expr>)> = Vec::new();
    for factor in symbolic {
        let (base, exp) = match factor {
            Expr::Exp(base, exp) => (*base, *exp),
            other => (other, Expr::int(1)),
        };
        let key = base.to_string();
        match groups.iter_mut().find(|(k, ..)| *k == key) {
            Some((_, _, exps)) => exps.push(exp),
            None => groups.push((key, base, vec![exp])),
        }
    }

    let mut out = Vec::with_capacity(groups.len());
    for (key, base, mut exps) in groups {
        let combined = if exps.len() == 1 {
            let exp = exps.remove(0);
            if exp.is_one() {
                base
            } else {
                Expr::pow(base, exp)
            }
        } else {
            trace!("combined {} factors with base `{}`", exps.len(), key);
            step_collector.push(Step::CombineLikeFactors);
            let exp = collect_sum(exps, step_collector);
            collect_power(base, exp, step_collector)
        };

        // the combined factor may have turned into a number (`x^0 = 1`, `2^(1/2)*2^(1/2) = 2`) or
        // a product (`(2*x)^(1/2)*(2*x)^(1/2) = 2*x`)
        let pieces = match combined {
            Expr::Mul(inner) => inner,
            other => vec![other],
        };
        for piece in pieces {
            match Number::from_expr(&piece) {
                Some(number) => coefficient = coefficient * number,
                None => out.push(piece),
            }
        }
    }

    if coefficient.is_zero() {
        step_collector.push(Step::MultiplyZero);
        return Expr::int(0);
    }

    with_coefficient(coefficient, out)
}

/// Simplifies a power whose base and exponent have already been collected.
pub(crate) fn collect_power(base: Expr, exp: Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    if let Some(number) = Number::from_expr(&exp) {
        if number.is_zero() {
            step_collector.push(Step::PowerZero);
            return Expr::int(1);
        }
        if number.is_one() {
            step_collector.push(Step::PowerOne);
            return base;
        }
    }

    if let Expr::Exp(inner_base, inner_exp) = base {
        step_collector.push(Step::PowerOfPower);
        let exp = collect_product(vec![*inner_exp, exp], step_collector);
        return collect_power(*inner_base, exp, step_collector);
    }

    let folded = Number::from_expr(&base)
        .zip(exp.as_integer().and_then(|n| n.to_i32()))
        .filter(|(_, n)| n.abs() <= MAX_FOLDED_EXPONENT)
        .and_then(|(base, n)| base.checked_pow(n));
    if let Some(folded) = folded {
        step_collector.push(Step::EvaluatePower);
        return folded.into_expr();
    }

    Expr::pow(base, exp)
}
