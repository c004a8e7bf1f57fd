//! Exact symbolic expressions, with tools to simplify, evaluate, and differentiate them.
//!
//! Numbers are held exactly where possible: integers and fractions are arbitrary precision
//! [`rug`] values, and only floating-point literals and evaluation results are inexact.
//!
//! See the [`symbolic`] module for an overview.

pub mod consts;
pub mod primitive;
pub mod symbolic;

pub use symbolic::{Bindings, Error, Expr};
