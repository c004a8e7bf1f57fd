#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options to use when simplifying or factoring an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SimplifyOptions {
    /// Whether to stop after one round of factoring and collecting.
    ///
    /// The default value is `false`.
    pub single_pass: bool,

    /// Whether to keep the sign of the coefficients when factoring a sum whose coefficients are
    /// all negative. When `false`, `-2*x-4*y` factors as `-2*(x+2*y)`; when `true`, it factors
    /// as `2*(-1*x-2*y)`.
    ///
    /// The default value is `false`.
    pub keep_negative_factoring: bool,

    /// The maximum number of rounds to run before giving up on reaching a fixed point.
    ///
    /// The default value is `10`.
    pub max_iterations: usize,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            single_pass: false,
            keep_negative_factoring: false,
            max_iterations: 10,
        }
    }
}

impl SimplifyOptions {
    /// Set whether to stop after one round. Returns an updated [`SimplifyOptions`] for chaining.
    pub fn single_pass(mut self, single_pass: bool) -> Self {
        self.single_pass = single_pass;
        self
    }

    /// Set whether to keep the sign of all-negative coefficients when factoring. Returns an
    /// updated [`SimplifyOptions`] for chaining.
    pub fn keep_negative_factoring(mut self, keep_negative_factoring: bool) -> Self {
        self.keep_negative_factoring = keep_negative_factoring;
        self
    }

    /// Set the maximum number of rounds. Returns an updated [`SimplifyOptions`] for chaining.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Options to use when expanding an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ExpandOptions {
    /// The largest integer power of a sum that will be expanded. `(x+1)^n` with a larger `n` is
    /// left as is.
    ///
    /// The default value is `10`.
    pub max_degree: u32,

    /// Whether to expand logarithms of products and powers, as in `ln(a*b) = ln(a)+ln(b)` and
    /// `ln(a^b) = b*ln(a)`.
    ///
    /// The default value is `false`.
    pub expand_logs: bool,

    /// Whether to rewrite `tan`, `sec`, `csc`, and `cot` in terms of `sin` and `cos`.
    ///
    /// The default value is `false`.
    pub expand_trig: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_degree: 10,
            expand_logs: false,
            expand_trig: false,
        }
    }
}

impl ExpandOptions {
    /// Set the largest power of a sum to expand. Returns an updated [`ExpandOptions`] for
    /// chaining.
    pub fn max_degree(mut self, max_degree: u32) -> Self {
        self.max_degree = max_degree;
        self
    }

    /// Set whether to expand logarithms. Returns an updated [`ExpandOptions`] for chaining.
    pub fn expand_logs(mut self, expand_logs: bool) -> Self {
        self.expand_logs = expand_logs;
        self
    }

    /// Set whether to rewrite trigonometric functions in terms of `sin` and `cos`. Returns an
    /// updated [`ExpandOptions`] for chaining.
    pub fn expand_trig(mut self, expand_trig: bool) -> Self {
        self.expand_trig = expand_trig;
        self
    }
}
