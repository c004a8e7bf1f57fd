//! A representation of mathematical expressions that is convenient for algebraic manipulation.
//!
//! An [`Expr`] is a tree. Sums and products are **n-ary**: the expression `x + (y + z)` is
//! usually represented as a single [`Expr::Add`] node with _three_ children, `x`, `y`, and `z`,
//! which makes it easy to find and combine "like terms". Nothing forces an [`Expr`] to be flat,
//! though; [`collect`](crate::symbolic::simplify::collect) flattens nested sums and products
//! when it meets them.
//!
//! Leaves of the tree are [`Primary`] values: exact integers and rationals, arbitrary-precision
//! floats, variables, named constants, and function calls.
//!
//! # Structural equality
//!
//! Two expressions are **structurally equal** if they are the same kind of node, and their
//! children are structurally equal **in the same order**. This is what the [`PartialEq`]
//! implementation for [`Expr`] checks, and what [`Expr::structural_equal`] returns.
//!
//! Structural equality is weak on purpose: `x + y` and `y + x` are not structurally equal, even
//! though they are semantically equal. Sums and products should be put in a canonical order
//! with [`normalize`](crate::symbolic::simplify::normalize) first, or compared with
//! [`semantically_equal`](crate::symbolic::simplify::semantically_equal), when the order of the
//! children should not matter.
//!
//! # Immutability
//!
//! Every operation in this crate takes expressions by reference and returns new trees. Each node
//! exclusively owns its children, so [`Clone`] is a deep copy.

mod fmt;
mod iter;

pub use fmt::Latex;
pub use iter::ExprIter;

use crate::consts::{E, PI};
use crate::primitive::{float, int};
use rug::{Assign, Float, Integer};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};
use super::simplify::fraction::make_fraction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A fraction of two integers, such as `1/2`, stored as `(numerator, denominator)`.
    ///
    /// Rationals built with [`Expr::rational`] are in lowest terms with a positive denominator.
    /// Rationals built with [`Expr::rational_unreduced`] are kept exactly as given.
    Rational(Integer, Integer),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A named constant with a known value, such as `pi` or `e`.
    Const(String, Float),

    /// A function call, such as `sin(x)` or `log(x, 2)`.
    Call(String, Vec<Expr>),
}

/// The kind of comparison made by an [`Expr::Relation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[repr(u8)]
pub enum Relation {
    /// `a = b`
    Equal,

    /// `a < b`
    Less,

    /// `a > b`
    Greater,

    /// `a <= b`
    LessEq,

    /// `a >= b`
    GreaterEq,

    /// `a <> b`
    NotEq,
}

impl Relation {
    /// Returns the textual symbol for the relation.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEq => "<=",
            Self::GreaterEq => ">=",
            Self::NotEq => "<>",
        }
    }

    /// Returns the LaTeX symbol for the relation.
    pub fn latex(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEq => "\\le",
            Self::GreaterEq => "\\ge",
            Self::NotEq => "\\ne",
        }
    }

    /// Returns true if the relation holds between the two values.
    pub fn holds(self, lhs: &Float, rhs: &Float) -> bool {
        match self {
            Self::Equal => lhs == rhs,
            Self::Less => lhs < rhs,
            Self::Greater => lhs > rhs,
            Self::LessEq => lhs <= rhs,
            Self::GreaterEq => lhs >= rhs,
            Self::NotEq => lhs != rhs,
        }
    }
}

/// The variant of an [`Expr`], without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Int,
    Float,
    Rational,
    Var,
    Const,
    Add,
    Mul,
    Pow,
    Func,
    Eq,
}

/// A mathematical expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),

    /// An equation or inequality between two expressions.
    Relation(Box<Expr>, Box<Expr>, Relation),
}

impl Expr {
    /// Creates an integer.
    pub fn int<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Primary(Primary::Integer(int(n)))
    }

    /// Creates a float.
    pub fn float<T>(n: T) -> Self
    where
        Float: Assign<T>,
    {
        Self::Primary(Primary::Float(float(n)))
    }

    /// Creates a rational number in lowest terms, with a positive denominator.
    ///
    /// A zero denominator is stored as given; evaluating such a rational is a domain error.
    pub fn rational(numerator: impl Into<Integer>, denominator: impl Into<Integer>) -> Self {
        let (mut numerator, mut denominator) = (numerator.into(), denominator.into());
        if !denominator.is_zero() {
            let gcd = Integer::from(numerator.gcd_ref(&denominator));
            numerator /= &gcd;
            denominator /= &gcd;
            if denominator.is_negative() {
                numerator = -numerator;
                denominator = -denominator;
            }
        }
        Self::Primary(Primary::Rational(numerator, denominator))
    }

    /// Creates a rational number **without** reducing it, keeping the numerator and denominator
    /// exactly as given (so `2/4` renders as `2/4`).
    ///
    /// Prefer [`Expr::rational`]. [`collect`](crate::symbolic::simplify::collect) reduces these.
    pub fn rational_unreduced(numerator: impl Into<Integer>, denominator: impl Into<Integer>) -> Self {
        Self::Primary(Primary::Rational(numerator.into(), denominator.into()))
    }

    /// Creates a variable.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a named constant with the given value.
    pub fn constant(name: impl Into<String>, value: Float) -> Self {
        Self::Primary(Primary::Const(name.into(), value))
    }

    /// The constant `pi`.
    pub fn pi() -> Self {
        Self::constant("pi", PI.clone())
    }

    /// The constant `e`.
    pub fn e() -> Self {
        Self::constant("e", E.clone())
    }

    /// Creates a sum of the given terms. No flattening or simplification is done.
    pub fn add(terms: impl IntoIterator<Item = Expr>) -> Self {
        Self::Add(terms.into_iter().collect())
    }

    /// Creates a product of the given factors. No flattening or simplification is done.
    pub fn mul(factors: impl IntoIterator<Item = Expr>) -> Self {
        Self::Mul(factors.into_iter().collect())
    }

    /// Creates `base^exp`.
    pub fn pow(base: Expr, exp: Expr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Creates a call to the function with the given name. The number of arguments is checked
    /// when the call is evaluated.
    pub fn func(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args.into_iter().collect()))
    }

    /// Creates the equation or inequality `lhs <relation> rhs`.
    pub fn eq(lhs: Expr, rhs: Expr, relation: Relation) -> Self {
        Self::Relation(Box::new(lhs), Box::new(rhs), relation)
    }

    /// Returns the kind of the expression.
    pub fn kind(&self) -> ExprKind {
        match self {
            Self::Primary(Primary::Integer(_)) => ExprKind::Int,
            Self::Primary(Primary::Float(_)) => ExprKind::Float,
            Self::Primary(Primary::Rational(..)) => ExprKind::Rational,
            Self::Primary(Primary::Symbol(_)) => ExprKind::Var,
            Self::Primary(Primary::Const(..)) => ExprKind::Const,
            Self::Primary(Primary::Call(..)) => ExprKind::Func,
            Self::Add(_) => ExprKind::Add,
            Self::Mul(_) => ExprKind::Mul,
            Self::Exp(..) => ExprKind::Pow,
            Self::Relation(..) => ExprKind::Eq,
        }
    }

    /// Returns true if the two expressions are structurally equal: the same kind of node, with
    /// structurally equal children in the same order.
    pub fn structural_equal(&self, other: &Self) -> bool {
        self == other
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is the integer `0`.
    pub fn is_zero(&self) -> bool {
        self.as_integer().is_some_and(|n| n.is_zero())
    }

    /// Returns true if the expression is the integer `1`.
    pub fn is_one(&self) -> bool {
        self.as_integer().is_some_and(|n| *n == 1)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns the immediate children of the expression, in order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Primary(Primary::Call(_, args)) => args.iter().collect(),
            Self::Primary(_) => Vec::new(),
            Self::Add(exprs) | Self::Mul(exprs) => exprs.iter().collect(),
            Self::Exp(lhs, rhs) | Self::Relation(lhs, rhs, _) => vec![&**lhs, &**rhs],
        }
    }

    /// Returns the names of the variables in the expression, without duplicates, in the order
    /// they are first seen when reading the expression left to right.
    pub fn free_variables(&self) -> Vec<String> {
        let mut vars: Vec<String> = Vec::new();
        for sym in self.pre_order_symbols() {
            if !vars.iter().any(|var| var == sym) {
                vars.push(sym.to_string());
            }
        }
        vars
    }

    /// Returns the variable names in the expression in left-to-right pre-order.
    fn pre_order_symbols(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            if let Some(sym) = expr.as_symbol() {
                out.push(sym);
            }
            stack.extend(expr.children().into_iter().rev());
        }
        out
    }

    /// Returns true if the variable with the given name appears anywhere in the expression.
    pub fn contains_symbol(&self, var: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(var))
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or an [`Expr::Primary`] containing the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::int(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::int(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// For an equation `lhs = rhs`, returns `lhs + -1*rhs`, an expression that is zero exactly
    /// where the equation holds. Any other expression is returned unchanged.
    pub fn relation_as_difference(&self) -> Self {
        match self {
            Self::Relation(lhs, rhs, Relation::Equal) => (**lhs).clone() - (**rhs).clone(),
            _ => self.clone(),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns a value that renders this expression as LaTeX with [`std::fmt::Display`].
    pub fn latex(&self) -> Latex<'_> {
        Latex(self)
    }

    /// Renders this expression as LaTeX.
    pub fn to_latex(&self) -> String {
        self.latex().to_string()
    }
}

/// Adds two [`Expr`]s together. Two integers are added numerically, and sums are flattened into
/// one list of terms. No other simplification is done.
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(Primary::Integer(lhs)), Self::Primary(Primary::Integer(rhs))) => {
                Self::Primary(Primary::Integer(lhs + rhs))
            },
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Subtracts two [`Expr`]s, as `lhs + -1*rhs`.
impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs.neg()
    }
}

/// Multiplies two [`Expr`]s together. Two integers are multiplied numerically, and products are
/// flattened into one list of factors. No other simplification is done.
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(Primary::Integer(lhs)), Self::Primary(Primary::Integer(rhs))) => {
                Self::Primary(Primary::Integer(lhs * rhs))
            },
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Divides two [`Expr`]s, as `lhs * rhs^-1`.
impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        make_fraction(self, rhs)
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a numeric [`Primary`], in which case the number is negated.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            Self::Primary(Primary::Rational(num, den)) => Self::Primary(Primary::Rational(-num, den)),
            expr => Self::int(-1) * expr,
        }
    }
}
