//! Symbolic differentiation of expressions.
//!
//! [`derivative`] applies the sum, product, power, and chain rules recursively, then
//! [`collect`]s the result. The result is correct, but usually not in its simplest form;
//! [`simplify`](crate::symbolic::simplify::simplify) it for a tidier expression.

mod function;

use log::trace;
use crate::symbolic::{
    error::{Error, InvalidDerivativeOrder, UnsupportedDifferentiation},
    expr::{Expr, Primary},
    simplify::{collect, fraction::recip},
};

/// Returns `true` if the given [`Expr`] is "clearly" zero. This is intended to keep intermediate
/// results small and is not mathematically rigorous.
fn is_trivially_zero(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Float(f)) => f.is_zero(),
        Expr::Primary(Primary::Integer(i)) => i.is_zero(),
        Expr::Primary(Primary::Rational(num, den)) => num.is_zero() && !den.is_zero(),
        Expr::Add(sum) => sum.iter().all(is_trivially_zero),
        Expr::Mul(mul) => mul.iter().any(is_trivially_zero),
        Expr::Exp(base, exponent) => is_trivially_zero(base) && is_trivially_positive(exponent),
        _ => false,
    }
}

/// Returns `true` if the given [`Expr`] is a positive number.
fn is_trivially_positive(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Float(f)) => f.is_sign_positive() && !f.is_zero(),
        Expr::Primary(Primary::Integer(i)) => i.is_positive(),
        Expr::Primary(Primary::Rational(num, den)) => num.is_positive() && den.is_positive(),
        _ => false,
    }
}

/// Returns `true` if the given [`Expr`] is "clearly" one. This is intended to keep intermediate
/// results small and is not mathematically rigorous.
fn is_trivially_unity(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Float(f)) => *f == 1,
        Expr::Primary(Primary::Integer(i)) => *i == 1,
        Expr::Mul(exprs) => exprs.iter().all(is_trivially_unity),
        Expr::Exp(base, exponent) => is_trivially_unity(base) || exponent.is_zero(),
        Expr::Add(exprs) => exprs.len() == 1 && is_trivially_unity(&exprs[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<Expr>);

impl From<MultBuilder> for Expr {
    fn from(value: MultBuilder) -> Self {
        Expr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: Expr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![Expr::int(0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<Expr>);

impl From<SumBuilder> for Expr {
    fn from(value: SumBuilder) -> Self {
        Expr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: Expr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(exprs: &[Expr], with: &str) -> Result<Expr, Error> {
    let mut sum = SumBuilder::default();
    for elem in exprs {
        sum.add(differentiate(elem, with)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[Expr], with: &str) -> Result<Expr, Error> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            let term = if derivative_index == term_index {
                differentiate(term, with)?
            } else {
                term.clone()
            };
            inner_mult.mult(term);
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Differentiates `base^exp`.
///
/// - `(f^c)' = c * f^(c-1) * f'`
/// - `(c^g)' = c^g * ln(c) * g'`
/// - `(f^g)' = f^g * (g' * ln(f) + g * f' / f)`
fn power_rule(base: &Expr, exp: &Expr, with: &str) -> Result<Expr, Error> {
    let mut mult_group = MultBuilder::default();

    if !exp.contains_symbol(with) {
        mult_group.mult(exp.clone());
        mult_group.mult(Expr::pow(base.clone(), Expr::add([exp.clone(), Expr::int(-1)])));
        mult_group.mult(differentiate(base, with)?);
    } else if !base.contains_symbol(with) {
        mult_group.mult(Expr::pow(base.clone(), exp.clone()));
        if !matches!(base, Expr::Primary(Primary::Const(name, _)) if name == "e") {
            mult_group.mult(Expr::func("ln", [base.clone()]));
        }
        mult_group.mult(differentiate(exp, with)?);
    } else {
        let mut inner_sum = SumBuilder::default();

        let mut exp_term = MultBuilder::default();
        exp_term.mult(differentiate(exp, with)?);
        exp_term.mult(Expr::func("ln", [base.clone()]));
        inner_sum.add(exp_term.into());

        let mut base_term = MultBuilder::default();
        base_term.mult(exp.clone());
        base_term.mult(differentiate(base, with)?);
        base_term.mult(recip(base.clone()));
        inner_sum.add(base_term.into());

        mult_group.mult(Expr::pow(base.clone(), exp.clone()));
        mult_group.mult(inner_sum.into());
    }

    Ok(mult_group.into())
}

/// Computes the derivative of the given expression, without collecting the result.
fn differentiate(f: &Expr, with: &str) -> Result<Expr, Error> {
    if is_trivially_zero(f) {
        return Ok(Expr::int(0));
    }

    let expr = match f {
        Expr::Primary(Primary::Symbol(sym)) => {
            if sym == with {
                Expr::int(1)
            } else {
                Expr::int(0)
            }
        },
        Expr::Primary(Primary::Call(func, args)) => function::function_derivative(func, args, with)?,
        Expr::Primary(_) => Expr::int(0),
        Expr::Add(exprs) => sum_rule(exprs, with)?,
        Expr::Mul(exprs) => product_rule(exprs, with)?,
        Expr::Exp(base, exp) => power_rule(base, exp, with)?,
        Expr::Relation(..) => Err(UnsupportedDifferentiation {
            expr: f.to_string(),
            reason: String::from("equations and inequalities cannot be differentiated"),
        })?,
    };

    if is_trivially_zero(&expr) {
        Ok(Expr::int(0))
    } else {
        Ok(expr)
    }
}

/// Computes the derivative of the expression with respect to the given variable. Returns [`Err`]
/// if the derivative could not be symbolically computed.
///
/// Like terms and factors of the result are [`collect`]ed.
pub fn derivative(f: &Expr, with: &str) -> Result<Expr, Error> {
    let result = collect(&differentiate(f, with)?);
    trace!("d/d{} ({}) = {}", with, f, result);
    Ok(result)
}

/// Computes the `n`-th derivative of the expression with respect to the given variable, by
/// differentiating `n` times. The zeroth derivative is the expression itself.
///
/// Differentiation stops early once the result is `0`, since every further derivative is `0` too.
pub fn nth_derivative(f: &Expr, with: &str, n: i64) -> Result<Expr, Error> {
    if n < 0 {
        Err(InvalidDerivativeOrder { order: n })?
    }

    let mut result = f.clone();
    for _ in 0..n {
        if result.is_zero() {
            break;
        }
        result = derivative(&result, with)?;
    }
    Ok(result)
}

/// Computes the derivative of the expression with respect to each of the given variables, in the
/// same order. Fails if any of the derivatives fails.
pub fn gradient(f: &Expr, vars: &[&str]) -> Result<Vec<(String, Expr)>, Error> {
    vars.iter()
        .map(|var| Ok((var.to_string(), derivative(f, var)?)))
        .collect()
}

impl Expr {
    /// Computes the derivative with respect to the given variable. See [`derivative`].
    pub fn derivative(&self, with: &str) -> Result<Expr, Error> {
        derivative(self, with)
    }

    /// Computes the `n`-th derivative with respect to the given variable. See [`nth_derivative`].
    pub fn nth_derivative(&self, with: &str, n: i64) -> Result<Expr, Error> {
        nth_derivative(self, with, n)
    }

    /// Computes the derivative with respect to each of the given variables. See [`gradient`].
    pub fn gradient(&self, vars: &[&str]) -> Result<Vec<(String, Expr)>, Error> {
        gradient(self, vars)
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{eval::Bindings, expr::Relation};
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn y() -> Expr {
        Expr::var("y")
    }

    /// Boilerplate helper function for evaluating an expression and substituting in "x"
    fn eval_x(e: &Expr, x: f64) -> f64 {
        let bindings = Bindings::new().with_var("x", x);
        e.eval(&bindings).unwrap().to_f64()
    }

    /// Performs central finite difference to approximate the derivative of the provided expression
    fn finite_difference(e: &Expr, x: f64) -> f64 {
        const DX: f64 = 0.00001;
        (eval_x(e, x + DX) - eval_x(e, x - DX)) / (2.0 * DX)
    }

    fn test_for_function(function: &Expr, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 0.0001;

        let symbolic = derivative(function, "x")
            .unwrap_or_else(|err| panic!("derivative of `{}` failed: {}", function, err));

        for point in points.into_iter() {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(function, point);

            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL,
                "For \"{function}\" at x={point}, symbolically computed derivative `{symbolic}` \
                was {symbolically_computed} but numerically computed derivative was \
                {numerically_computed}, which was out of tolerance {TOL}",
            );
        }
    }

    #[test]
    fn power_rule_polynomial() {
        // x^2 + x + 1
        let f = Expr::add([Expr::pow(x(), Expr::int(2)), x(), Expr::int(1)]);
        test_for_function(&f, [0., 1., 2., 5., 8.]);
    }

    #[test]
    fn power_rule_collected() {
        let f = Expr::pow(x(), Expr::int(3));
        assert_eq!(derivative(&f, "x").unwrap().to_string(), "3*x^2");

        let f = Expr::pow(x(), Expr::rational(1, 2));
        assert_eq!(derivative(&f, "x").unwrap().to_string(), "1/2*x^(-1/2)");
        test_for_function(&f, [0.5, 1., 4.]);
    }

    #[test]
    fn constants_and_other_variables() {
        assert_eq!(derivative(&Expr::int(5), "x").unwrap(), Expr::int(0));
        assert_eq!(derivative(&Expr::pi(), "x").unwrap(), Expr::int(0));
        assert_eq!(derivative(&y(), "x").unwrap(), Expr::int(0));
        assert_eq!(derivative(&x(), "x").unwrap(), Expr::int(1));

        // 3*y*x
        let f = Expr::mul([Expr::int(3), y(), x()]);
        assert_eq!(derivative(&f, "x").unwrap().to_string(), "3*y");
    }

    #[test]
    fn product_rule_binary() {
        // x^2 * sin(x)
        let f = Expr::mul([Expr::pow(x(), Expr::int(2)), Expr::func("sin", [x()])]);
        test_for_function(&f, [-2., 0.3, 1., 3.]);
    }

    #[test]
    fn product_rule_n_ary() {
        // x * exp(x) * cos(x) * ln(x)
        let f = Expr::mul([
            x(),
            Expr::func("exp", [x()]),
            Expr::func("cos", [x()]),
            Expr::func("ln", [x()]),
        ]);
        test_for_function(&f, [0.5, 1., 2.5]);
    }

    #[test]
    fn exponential_rule() {
        // 2^x
        let f = Expr::pow(Expr::int(2), x());
        test_for_function(&f, [-1., 0., 1.5]);

        // e^(3*x)
        let f = Expr::pow(Expr::e(), Expr::mul([Expr::int(3), x()]));
        assert_eq!(derivative(&f, "x").unwrap().to_string(), "3*e^(3*x)");
        test_for_function(&f, [-1., 0., 0.5]);
    }

    #[test]
    fn general_power_rule() {
        // x^x
        let f = Expr::pow(x(), x());
        test_for_function(&f, [0.5, 1., 2.]);

        // (x^2 + 1)^sin(x)
        let f = Expr::pow(
            Expr::add([Expr::pow(x(), Expr::int(2)), Expr::int(1)]),
            Expr::func("sin", [x()]),
        );
        test_for_function(&f, [-1., 0., 2.]);
    }

    #[test]
    fn chain_rule() {
        // sin(x^2)
        let f = Expr::func("sin", [Expr::pow(x(), Expr::int(2))]);
        let df = derivative(&f, "x").unwrap();
        assert_eq!(df.to_string(), "2*cos(x^2)*x");
        test_for_function(&f, [-1., 0.5, 2.]);
    }

    #[test]
    fn function_table() {
        let inner = || Expr::add([Expr::mul([Expr::rational(1, 3), x()]), Expr::rational(1, 5)]);
        let points = [-1.2, 0.1, 0.7];
        for name in [
            "sin", "cos", "tan", "sec", "csc", "cot", "arcsin", "asin", "arccos", "acos",
            "arctan", "atan", "sinh", "cosh", "tanh", "exp", "abs",
        ] {
            test_for_function(&Expr::func(name, [inner()]), points);
        }

        // positive arguments only
        let inner = || Expr::add([x(), Expr::int(2)]);
        for name in ["ln", "log", "sqrt"] {
            test_for_function(&Expr::func(name, [inner()]), points);
        }
    }

    #[test]
    fn unsupported() {
        let f = Expr::func("unsupported_fn", [x()]);
        assert!(matches!(derivative(&f, "x"), Err(Error::UnsupportedDifferentiation(_))));

        let f = Expr::func("log", [x(), Expr::int(2)]);
        assert!(matches!(derivative(&f, "x"), Err(Error::UnsupportedDifferentiation(_))));

        let f = Expr::eq(x(), Expr::int(1), Relation::Equal);
        assert!(matches!(derivative(&f, "x"), Err(Error::UnsupportedDifferentiation(_))));

        // errors deep inside the expression still surface
        let f = Expr::add([x(), Expr::mul([Expr::int(2), Expr::func("gamma", [x()])])]);
        match derivative(&f, "x") {
            Err(Error::UnsupportedDifferentiation(err)) => assert_eq!(err.expr, "gamma(x)"),
            other => panic!("expected unsupported differentiation, got {:?}", other),
        }
    }

    #[test]
    fn unsupported_function_of_constant() {
        // the argument does not depend on x, but the derivative of `gamma` is still unknown
        let f = Expr::func("gamma", [y()]);
        assert!(derivative(&f, "x").is_err());
    }

    #[test]
    fn nth() {
        let f = Expr::pow(x(), Expr::int(4));
        assert_eq!(nth_derivative(&f, "x", 0).unwrap(), f);
        assert_eq!(nth_derivative(&f, "x", 2).unwrap().to_string(), "12*x^2");
        assert_eq!(nth_derivative(&f, "x", 5).unwrap(), Expr::int(0));

        // stops as soon as the derivative vanishes
        assert_eq!(nth_derivative(&f, "x", i64::MAX).unwrap(), Expr::int(0));
        assert_eq!(
            nth_derivative(&f, "x", -1),
            Err(Error::from(InvalidDerivativeOrder { order: -1 })),
        );
    }

    #[test]
    fn gradient_of_two_variables() {
        // x^2*y + y
        let f = Expr::add([Expr::mul([Expr::pow(x(), Expr::int(2)), y()]), y()]);
        let grad = f.gradient(&["x", "y"]).unwrap();
        let rendered = grad.iter()
            .map(|(var, d)| (var.as_str(), d.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(rendered, vec![("x", String::from("2*x*y")), ("y", String::from("x^2+1"))]);

        let f = Expr::add([x(), Expr::func("gamma", [y()])]);
        assert!(f.gradient(&["x", "y"]).is_err());
    }
}
