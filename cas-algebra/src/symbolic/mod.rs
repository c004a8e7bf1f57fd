//! Symbolic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions are represented as a tree of [`Expr`] nodes. Sums and products are n-ary, so the
//! expression `x + (y + z)` can be held as a single [`Expr::Add`] node with _three_ children, `x`,
//! `y`, and `z`. This makes it easy to combine "like terms", that is, terms that share the same
//! factors (e.g. `x + x = 2*x`), since the terms in question all sit at the same level of the
//! tree.
//!
//! ```
//! use cas_algebra::symbolic::Expr;
//!
//! // x + (y + z)
//! let expr = Expr::add([
//!     Expr::var("x"),
//!     Expr::add([Expr::var("y"), Expr::var("z")]),
//! ]);
//! assert_eq!(expr.collect().to_string(), "x+y+z");
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] reduces an expression to a simpler, semantically equivalent form. It repeatedly
//! factors and collects the expression, expanding it when it gets stuck, until nothing changes.
//!
//! ```
//! use cas_algebra::symbolic::Expr;
//!
//! // x + x + x = 3*x
//! let expr = Expr::add([Expr::var("x"), Expr::var("x"), Expr::var("x")]);
//! assert_eq!(expr.simplify().to_string(), "3*x");
//! ```
//!
//! The individual passes are also available on their own. See the [`mod@simplify`] module.
//!
//! # Differentiation
//!
//! [`derivative()`] computes the derivative of an expression with respect to a variable, using the
//! sum, product, power and chain rules.
//!
//! ```
//! use cas_algebra::symbolic::Expr;
//!
//! // d/dx x^3 = 3*x^2
//! let expr = Expr::pow(Expr::var("x"), Expr::int(3));
//! assert_eq!(expr.derivative("x").unwrap().to_string(), "3*x^2");
//! ```

pub mod derivative;
pub mod error;
pub mod eval;
pub mod expr;
pub mod simplify;
pub mod step_collector;

pub use derivative::{derivative, gradient, nth_derivative};
pub use error::Error;
pub use eval::Bindings;
pub use expr::{Expr, ExprKind, Primary, Relation};
pub use simplify::{semantically_equal, simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
