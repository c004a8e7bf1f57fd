//! Numerical evaluation of expressions.
//!
//! Expressions are evaluated to a [`Float`] with [`PRECISION`](crate::primitive::PRECISION) bits
//! of precision, given a value for each of their variables in a [`Bindings`]. Evaluation fails
//! with an [`Error`] instead of producing an infinite or NaN result.

mod func;

use crate::primitive::float;
use crate::symbolic::{
    error::{ArityError, DomainError, Error, UndefinedVariable, UnknownFunction},
    expr::{Expr, Primary},
};
use rug::{ops::Pow, Assign, Float};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Values of the variables to use when evaluating an expression.
///
/// Only bound names have values. The constants `pi` and `e` are [`Primary::Const`] leaves, so a
/// variable named `e` must be bound like any other.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bindings {
    vars: HashMap<String, Float>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a value to a variable, replacing any previous value.
    pub fn add_var<T>(&mut self, name: &str, value: T)
    where
        Float: Assign<T>,
    {
        self.vars.insert(name.to_string(), float(value));
    }

    /// Binds a value to a variable, returning the updated bindings.
    pub fn with_var<T>(mut self, name: &str, value: T) -> Self
    where
        Float: Assign<T>,
    {
        self.add_var(name, value);
        self
    }

    /// Get the value of a variable.
    pub fn get_var(&self, name: &str) -> Option<&Float> {
        self.vars.get(name)
    }

    /// Returns the bound variables.
    pub fn get_vars(&self) -> &HashMap<String, Float> {
        &self.vars
    }
}

impl<S, T> FromIterator<(S, T)> for Bindings
where
    S: Into<String>,
    Float: Assign<T>,
{
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter()
                .map(|(name, value)| (name.into(), float(value)))
                .collect(),
        }
    }
}

/// Formats a number for an error message.
fn display(value: &Float) -> String {
    value.to_f64().to_string()
}

impl Expr {
    /// Evaluates the expression with the given variable bindings.
    ///
    /// An equation or inequality evaluates to `1` if it holds, and `0` if it does not.
    pub fn eval(&self, bindings: &Bindings) -> Result<Float, Error> {
        match self {
            Self::Primary(primary) => primary.eval(bindings),
            Self::Add(terms) => terms.iter()
                .try_fold(float(0), |acc, term| Ok(acc + term.eval(bindings)?)),
            Self::Mul(factors) => factors.iter()
                .try_fold(float(1), |acc, factor| Ok(acc * factor.eval(bindings)?)),
            Self::Exp(base, exp) => eval_pow(base, exp, bindings),
            Self::Relation(lhs, rhs, relation) => {
                let lhs = lhs.eval(bindings)?;
                let rhs = rhs.eval(bindings)?;
                Ok(float(u8::from(relation.holds(&lhs, &rhs))))
            },
        }
    }

    /// Evaluates the expression with no variables bound.
    pub fn eval_default(&self) -> Result<Float, Error> {
        self.eval(&Bindings::default())
    }
}

impl Primary {
    /// Evaluates the leaf with the given variable bindings.
    pub fn eval(&self, bindings: &Bindings) -> Result<Float, Error> {
        match self {
            Self::Integer(n) => Ok(float(n)),
            Self::Float(f) => Ok(f.clone()),
            Self::Rational(num, den) => {
                if den.is_zero() {
                    Err(DomainError {
                        function: String::from("/"),
                        argument: format!("{}/{}", num, den),
                    })?
                }
                Ok(float(num) / float(den))
            },
            Self::Symbol(name) => bindings.get_var(name)
                .cloned()
                .ok_or_else(|| UndefinedVariable { name: name.clone() }.into()),
            Self::Const(_, value) => Ok(value.clone()),
            Self::Call(name, args) => eval_call(name, args, bindings),
        }
    }
}

/// Evaluates `base^exp`.
///
/// Integer exponents are always allowed, except for `0` raised to a negative power. Other
/// exponents require a positive base, a zero base with a positive exponent, or a negative base
/// with an exponent written as a rational with an odd denominator, such as `(-8)^(1/3) = -2`.
fn eval_pow(base: &Expr, exp: &Expr, bindings: &Bindings) -> Result<Float, Error> {
    let base_value = base.eval(bindings)?;
    let exp_value = exp.eval(bindings)?;
    let domain_error = |base_value: &Float, exp_value: &Float| -> Error {
        DomainError {
            function: String::from("^"),
            argument: format!("{}^{}", display(base_value), display(exp_value)),
        }.into()
    };

    let result = if exp_value.is_integer() {
        if base_value.is_zero() && exp_value < 0 {
            return Err(domain_error(&base_value, &exp_value));
        }
        match exp_value.to_integer() {
            Some(n) => base_value.clone().pow(&n),
            None => return Err(domain_error(&base_value, &exp_value)),
        }
    } else if base_value > 0 {
        base_value.clone().pow(&exp_value)
    } else if base_value.is_zero() {
        if exp_value > 0 {
            float(0)
        } else {
            return Err(domain_error(&base_value, &exp_value));
        }
    } else {
        // odd roots of negative numbers are real
        match &**exp {
            Expr::Primary(Primary::Rational(num, den)) if den.is_odd() => {
                let magnitude = (-base_value.clone()).pow(&exp_value);
                if num.is_odd() {
                    -magnitude
                } else {
                    magnitude
                }
            },
            _ => return Err(domain_error(&base_value, &exp_value)),
        }
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(domain_error(&base_value, &exp_value))
    }
}

/// Evaluates a call to a builtin function.
fn eval_call(name: &str, args: &[Expr], bindings: &Bindings) -> Result<Float, Error> {
    let builtin = func::lookup(name).ok_or_else(|| UnknownFunction {
        name: name.to_string(),
        suggestions: func::similar(name),
    })?;

    if args.len() < builtin.min_args || args.len() > builtin.max_args {
        let expected = if args.len() < builtin.min_args {
            builtin.min_args
        } else {
            builtin.max_args
        };
        Err(ArityError { function: name.to_string(), expected, given: args.len() })?
    }

    let values = args.iter()
        .map(|arg| arg.eval(bindings))
        .collect::<Result<Vec<_>, _>>()?;

    builtin.eval(&values)
        .filter(Float::is_finite)
        .ok_or_else(|| DomainError {
            function: name.to_string(),
            argument: values.iter().map(display).collect::<Vec<_>>().join(", "),
        }.into())
}
