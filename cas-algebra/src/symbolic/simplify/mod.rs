//! Algebraic simplification of expressions.
//!
//! The simplifier is made of four rewriting passes:
//!
//! - [`collect`] combines like terms, like factors, and numbers.
//! - [`factor`] pulls the greatest common divisor of the integer coefficients out of sums.
//! - [`expand`] distributes products over sums and expands small integer powers of sums.
//! - [`normalize`] sorts the terms of sums and factors of products into a canonical order.
//!
//! [`simplify`] runs [`factor`] then [`collect`] repeatedly until the expression stops changing.
//! When a round changes nothing, the expression is [`expand`]ed and collected once more to get it
//! off the plateau.
//!
//! Every pass only applies rewrites that preserve the value of the expression, and none of them
//! can fail. A pass that finds nothing to do returns the expression unchanged.
//!
//! # Termination
//!
//! [`simplify`] does not try to prove that it converges. Factoring and expanding can undo each
//! other, so the loop instead stops when a round produces an expression it has already seen, or
//! after [`SimplifyOptions::max_iterations`] rounds, whichever comes first.

mod collect;
mod expand;
mod factor;
pub(crate) mod fraction;
mod normalize;
mod number;
pub mod options;
pub mod step;

pub use collect::{collect, collect_with};
pub use expand::{expand, expand_fully, expand_with};
pub use factor::{factor, factor_with};
pub use normalize::{normalize, normalize_with};
pub use options::{ExpandOptions, SimplifyOptions};
pub use step::Step;

use log::debug;
use super::{expr::Expr, step_collector::StepCollector};

/// Simplifies the expression until it stops changing.
pub fn simplify(expr: &Expr, options: &SimplifyOptions) -> Expr {
    simplify_with(expr, options, &mut ())
}

/// Simplifies the expression, returning the result along with the steps taken.
pub fn simplify_with_steps(expr: &Expr, options: &SimplifyOptions) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, options, &mut steps);
    (simplified, steps)
}

/// Simplifies the expression, reporting each rewrite to the step collector.
pub fn simplify_with(
    expr: &Expr,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let mut current = expr.clone();
    let mut rendered = current.to_string();

    // every expression seen so far, with its rendering
    let mut history: Vec<(String, Expr)> = Vec::new();

    for round in 0..options.max_iterations {
        let factored = factor_with(&current, options, step_collector);
        let mut next = collect_with(&factored, step_collector);
        let mut next_rendered = next.to_string();

        if next_rendered == rendered {
            let expanded = expand_with(&next, &ExpandOptions::default(), step_collector);
            next = collect_with(&expanded, step_collector);
            next_rendered = next.to_string();
        }

        debug!("simplify round {}: `{}` -> `{}`", round, rendered, next_rendered);

        if next_rendered == rendered || options.single_pass {
            return next;
        }

        history.push((rendered, current));
        if let Some(start) = history.iter().position(|(seen, _)| *seen == next_rendered) {
            // the rounds are going in circles; settle on the smallest expression of the cycle
            debug!("simplify found a cycle of {} expressions", history.len() - start);
            return history.drain(start..)
                .min_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
                .map(|(_, expr)| expr)
                .unwrap_or(next);
        }

        current = next;
        rendered = next_rendered;
    }

    debug!("simplify stopped after {} rounds", options.max_iterations);
    current
}

/// Returns true if the two expressions simplify to the same canonical form. Unlike
/// [`Expr::structural_equal`], this does not depend on the order of terms and factors.
///
/// A `false` result does not prove that the expressions differ in value; the simplifier does not
/// produce a unique normal form for every expression.
pub fn semantically_equal(a: &Expr, b: &Expr) -> bool {
    let canonical = |expr: &Expr| {
        let simplified = simplify(&normalize(expr), &SimplifyOptions::default());
        normalize(&simplified).to_string()
    };
    canonical(a) == canonical(b)
}

impl Expr {
    /// Simplifies the expression with the default options. See [`simplify`].
    pub fn simplify(&self) -> Expr {
        simplify(self, &SimplifyOptions::default())
    }

    /// Simplifies the expression with the given options. See [`simplify`].
    pub fn simplify_with(&self, options: &SimplifyOptions) -> Expr {
        simplify(self, options)
    }

    /// Combines like terms and factors. See [`collect`].
    pub fn collect(&self) -> Expr {
        collect(self)
    }

    /// Factors common divisors out of sums with the default options. See [`factor`].
    pub fn factor(&self) -> Expr {
        factor(self, &SimplifyOptions::default())
    }

    /// Factors common divisors out of sums with the given options. See [`factor`].
    pub fn factor_with(&self, options: &SimplifyOptions) -> Expr {
        factor(self, options)
    }

    /// Expands the expression once with the default options. See [`expand`].
    pub fn expand(&self) -> Expr {
        expand(self, &ExpandOptions::default())
    }

    /// Expands the expression once with the given options. See [`expand`].
    pub fn expand_with(&self, options: &ExpandOptions) -> Expr {
        expand(self, options)
    }

    /// Sorts sums and products into a canonical order. See [`normalize`].
    pub fn normalize(&self) -> Expr {
        normalize(self)
    }

    /// Returns true if the expressions simplify to the same canonical form. See
    /// [`semantically_equal`].
    pub fn semantically_equal(&self, other: &Expr) -> bool {
        semantically_equal(self, other)
    }
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
    fn fold_numbers() {
        let expr = Expr::add([Expr::int(3), Expr::int(-10)]);
        assert_eq!(expr.simplify().to_string(), "-7");
    }

    #[test]
    fn combine_and_cancel() {
        // 2*x + 3 + x - 3 + y*0
        let expr = Expr::add([
            Expr::mul([Expr::int(2), x()]),
            Expr::int(3),
            x(),
            Expr::int(-3),
            Expr::mul([y(), Expr::int(0)]),
        ]);
        assert_eq!(expr.simplify().to_string(), "3*x");
    }

    #[test]
    fn plateau_expands() {
        // (x+1)^2 - x^2 - 2*x
        let expr = Expr::add([
            Expr::pow(Expr::add([x(), Expr::int(1)]), Expr::int(2)),
            Expr::mul([Expr::int(-1), Expr::pow(x(), Expr::int(2))]),
            Expr::mul([Expr::int(-2), x()]),
        ]);
        let (simplified, steps) = simplify_with_steps(&expr, &SimplifyOptions::default());
        assert_eq!(simplified, Expr::int(1));
        assert!(steps.contains(&Step::BinomialExpansion));
        assert!(steps.contains(&Step::CombineLikeTerms));
    }

    #[test]
    fn idempotent_after_cycle() {
        // 2*x + 4*y factors to 2*(x+2*y), which expands back
        let expr = Expr::add([
            Expr::mul([Expr::int(2), x()]),
            Expr::mul([Expr::int(4), y()]),
        ]);
        let once = expr.simplify();
        let twice = once.simplify();
        assert_eq!(once.to_string(), twice.to_string());
        assert_eq!(once.to_string(), "2*x+4*y");
    }

    #[test]
    fn single_pass() {
        // (x + x) + (x + x)
        let expr = Expr::add([Expr::add([x(), x()]), Expr::add([x(), x()])]);
        let options = SimplifyOptions::default().single_pass(true);
        assert_eq!(expr.simplify_with(&options).to_string(), "4*x");
    }

    #[test]
    fn zero_iterations() {
        let expr = Expr::add([x(), x()]);
        let options = SimplifyOptions { max_iterations: 0, ..Default::default() };
        assert_eq!(expr.simplify_with(&options), expr);
    }

    #[test]
    fn semantic_equality() {
        let a = Expr::add([Expr::mul([x(), y()]), Expr::int(1)]);
        let b = Expr::add([Expr::int(1), Expr::mul([y(), x()])]);
        assert!(!a.structural_equal(&b));
        assert!(a.semantically_equal(&b));

        let c = Expr::add([Expr::mul([x(), y()]), Expr::int(2)]);
        assert!(!a.semantically_equal(&c));
    }
}
