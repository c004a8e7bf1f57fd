//! Extracting the greatest common divisor of the coefficients of a sum.

use log::trace;
use rug::Integer;
use crate::symbolic::{expr::{Expr, Primary}, step_collector::StepCollector};
use super::{
    collect::{split_coefficient, with_coefficient},
    number::Number,
    options::SimplifyOptions,
    step::Step,
};

/// Factors the greatest common divisor of the integer coefficients out of every sum in the
/// expression.
///
/// - `2*x+4*y = 2*(x+2*y)`
/// - `-2*x-4*y = -2*(x+2*y)`
///
/// Sums with a non-integer coefficient, or whose coefficients have no common divisor greater than
/// 1, are left unchanged.
pub fn factor(expr: &Expr, options: &SimplifyOptions) -> Expr {
    factor_with(expr, options, &mut ())
}

/// Factors every sum in the expression, reporting each rewrite to the step collector.
pub fn factor_with(
    expr: &Expr,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    match expr {
        Expr::Primary(Primary::Call(name, args)) => {
            let args = args.iter()
                .map(|arg| factor_with(arg, options, step_collector))
                .collect();
            Expr::Primary(Primary::Call(name.clone(), args))
        },
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => {
            let terms = terms.iter()
                .map(|term| factor_with(term, options, step_collector))
                .collect::<Vec<_>>();
            factor_sum(terms, options, step_collector)
        },
        Expr::Mul(factors) => Expr::Mul(
            factors.iter()
                .map(|factor| factor_with(factor, options, step_collector))
                .collect()
        ),
        Expr::Exp(base, exp) => Expr::pow(
            factor_with(base, options, step_collector),
            factor_with(exp, options, step_collector),
        ),
        Expr::Relation(lhs, rhs, relation) => Expr::eq(
            factor_with(lhs, options, step_collector),
            factor_with(rhs, options, step_collector),
            *relation,
        ),
    }
}

/// Factors the common divisor out of the given terms, whose own sub-expressions have already
/// been factored.
fn factor_sum(
    terms: Vec<Expr>,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    if terms.len() < 2 {
        return Expr::Add(terms);
    }

    let mut split = Vec::with_capacity(terms.len());
    for term in &terms {
        let (coefficient, base) = split_coefficient(term.clone());
        match coefficient.as_integer() {
            Some(n) => split.push((n, base)),
            None => return Expr::Add(terms),
        }
    }

    let mut gcd = split.iter()
        .fold(Integer::new(), |acc, (n, _)| acc.gcd(n));
    if gcd <= 1 {
        return Expr::Add(terms);
    }

    if !options.keep_negative_factoring && split.iter().all(|(n, _)| n.is_negative()) {
        gcd = -gcd;
    }

    trace!("factoring {} out of {} terms", gcd, split.len());
    step_collector.push(Step::FactorCommon);

    let reduced = split.into_iter()
        .map(|(n, base)| with_coefficient(Number::from(n / &gcd), base))
        .collect();
    Expr::Mul(vec![Expr::Primary(Primary::Integer(gcd)), Expr::Add(reduced)])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn y() -> Expr {
        Expr::var("y")
    }

    #[test]
    fn common_divisor() {
        // 2*x + 4*y
        let expr = Expr::add([
            Expr::mul([Expr::int(2), x()]),
            Expr::mul([Expr::int(4), y()]),
        ]);
        let factored = factor(&expr, &SimplifyOptions::default());
        assert_eq!(factored.to_string(), "2*(x+2*y)");
    }

    #[test]
    fn integer_terms() {
        // 6*x^2 + 9*x + 3
        let expr = Expr::add([
            Expr::mul([Expr::int(6), Expr::pow(x(), Expr::int(2))]),
            Expr::mul([Expr::int(9), x()]),
            Expr::int(3),
        ]);
        let factored = factor(&expr, &SimplifyOptions::default());
        assert_eq!(factored.to_string(), "3*(2*x^2+3*x+1)");
    }

    #[test]
    fn all_negative() {
        // -2*x - 4*y
        let expr = Expr::add([
            Expr::mul([Expr::int(-2), x()]),
            Expr::mul([Expr::int(-4), y()]),
        ]);

        let factored = factor(&expr, &SimplifyOptions::default());
        assert_eq!(factored.to_string(), "-2*(x+2*y)");

        let options = SimplifyOptions::default().keep_negative_factoring(true);
        let factored = factor(&expr, &options);
        assert_eq!(factored.to_string(), "2*(-1*x-2*y)");
    }

    #[test]
    fn nothing_to_factor() {
        // 2*x + 3*y
        let expr = Expr::add([
            Expr::mul([Expr::int(2), x()]),
            Expr::mul([Expr::int(3), y()]),
        ]);
        assert_eq!(factor(&expr, &SimplifyOptions::default()), expr);

        // x/2 + 2 has a non-integer coefficient
        let expr = Expr::add([Expr::mul([Expr::rational(1, 2), x()]), Expr::int(2)]);
        assert_eq!(factor(&expr, &SimplifyOptions::default()), expr);
    }

    #[test]
    fn nested_sums() {
        // sin(4*x + 8) + y
        let expr = Expr::add([
            Expr::func("sin", [Expr::add([Expr::mul([Expr::int(4), x()]), Expr::int(8)])]),
            y(),
        ]);
        let mut steps = Vec::new();
        let factored = factor_with(&expr, &SimplifyOptions::default(), &mut steps);
        assert_eq!(factored.to_string(), "sin(4*(x+2))+y");
        assert_eq!(steps, vec![Step::FactorCommon]);
    }
}
