//! Symbolic derivatives of the builtin elementary functions.

use crate::symbolic::{error::{Error, UnsupportedDifferentiation}, expr::Expr, simplify::fraction::recip};
use super::{differentiate, MultBuilder};

/// `-1*expr`
fn negate(expr: Expr) -> Expr {
    Expr::mul([Expr::int(-1), expr])
}

/// `1 + sign*u^2`
fn one_plus_square(u: &Expr, sign: i32) -> Expr {
    let square = Expr::pow(u.clone(), Expr::int(2));
    if sign < 0 {
        Expr::add([Expr::int(1), negate(square)])
    } else {
        Expr::add([Expr::int(1), square])
    }
}

/// Returns the derivative of the function with the given name, evaluated at `u`, or [`None`] if
/// the derivative of the function is not known.
fn outer_derivative(name: &str, u: &Expr) -> Option<Expr> {
    let call = |name: &str| Expr::func(name, [u.clone()]);
    let derivative = match name {
        "sin" => call("cos"),
        "cos" => negate(call("sin")),
        "tan" => Expr::pow(call("sec"), Expr::int(2)),
        "sec" => Expr::mul([call("sec"), call("tan")]),
        "csc" => Expr::mul([Expr::int(-1), call("csc"), call("cot")]),
        "cot" => negate(Expr::pow(call("csc"), Expr::int(2))),
        "arcsin" | "asin" => Expr::pow(one_plus_square(u, -1), Expr::rational(-1, 2)),
        "arccos" | "acos" => negate(Expr::pow(one_plus_square(u, -1), Expr::rational(-1, 2))),
        "arctan" | "atan" => recip(one_plus_square(u, 1)),
        "sinh" => call("cosh"),
        "cosh" => call("sinh"),
        "tanh" => Expr::pow(call("cosh"), Expr::int(-2)),
        "ln" => recip(u.clone()),
        "log" => recip(Expr::mul([u.clone(), Expr::func("ln", [Expr::int(10)])])),
        "exp" => call("exp"),
        "sqrt" => Expr::mul([Expr::rational(1, 2), Expr::pow(u.clone(), Expr::rational(-1, 2))]),
        "abs" => Expr::mul([u.clone(), recip(call("abs"))]),
        _ => return None,
    };
    Some(derivative)
}

/// Computes the derivative of a call to a function of one argument, using the chain rule.
///
/// `f(u)' = f'(u) * u'`
pub(super) fn function_derivative(func: &str, args: &[Expr], with: &str) -> Result<Expr, Error> {
    let unsupported = |reason: String| -> Error {
        UnsupportedDifferentiation {
            expr: Expr::func(func, args.iter().cloned()).to_string(),
            reason,
        }.into()
    };

    let [arg] = args else {
        return Err(unsupported(format!(
            "only functions of one argument can be differentiated, but `{}` has {}",
            func,
            args.len(),
        )));
    };

    let outer = outer_derivative(func, arg)
        .ok_or_else(|| unsupported(format!("the derivative of `{}` is not known", func)))?;

    let mut mult_group = MultBuilder::default();
    mult_group.mult(outer);
    mult_group.mult(differentiate(arg, with)?);
    Ok(mult_group.into())
}
