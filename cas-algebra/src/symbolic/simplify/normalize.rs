//! Putting the terms of sums and factors of products into a canonical order.

use crate::symbolic::{expr::{Expr, Primary}, step_collector::StepCollector};
use super::step::Step;

/// Sorts the terms of every sum and the factors of every product by their rendering, so that sums
/// and products built in different orders render identically.
///
/// `y*x+b+a = a+b+x*y`
pub fn normalize(expr: &Expr) -> Expr {
    normalize_with(expr, &mut ())
}

/// Normalizes the expression, reporting each reordering to the step collector.
pub fn normalize_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    match expr {
        Expr::Primary(Primary::Call(name, args)) => Expr::Primary(Primary::Call(
            name.clone(),
            args.iter().map(|arg| normalize_with(arg, step_collector)).collect(),
        )),
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => Expr::Add(sorted(terms, step_collector)),
        Expr::Mul(factors) => Expr::Mul(sorted(factors, step_collector)),
        Expr::Exp(base, exp) => Expr::pow(
            normalize_with(base, step_collector),
            normalize_with(exp, step_collector),
        ),
        Expr::Relation(lhs, rhs, relation) => Expr::eq(
            normalize_with(lhs, step_collector),
            normalize_with(rhs, step_collector),
            *relation,
        ),
    }
}

/// Normalizes each child, then sorts them by rendering.
fn sorted(children: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Vec<Expr> {
    let mut children = children.iter()
        .map(|child| normalize_with(child, step_collector))
        .map(|child| (child.to_string(), child))
        .collect::<Vec<_>>();

    if children.windows(2).any(|pair| pair[0].0 > pair[1].0) {
        step_collector.push(Step::Reorder);
        children.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    children.into_iter().map(|(_, child)| child).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn sorts_terms_and_factors() {
        let expr = Expr::add([
            Expr::mul([Expr::var("y"), Expr::var("x")]),
            Expr::var("b"),
            Expr::var("a"),
        ]);
        let mut steps = Vec::new();
        assert_eq!(normalize_with(&expr, &mut steps).to_string(), "a+b+x*y");
        assert_eq!(steps, vec![Step::Reorder, Step::Reorder]);
    }

    #[test]
    fn different_orders_agree() {
        let a = Expr::add([
            Expr::func("sin", [Expr::add([Expr::var("x"), Expr::int(1)])]),
            Expr::pow(Expr::mul([Expr::var("z"), Expr::var("w")]), Expr::int(2)),
        ]);
        let b = Expr::add([
            Expr::pow(Expr::mul([Expr::var("w"), Expr::var("z")]), Expr::int(2)),
            Expr::func("sin", [Expr::add([Expr::int(1), Expr::var("x")])]),
        ]);
        assert_ne!(a, b);
        assert_eq!(normalize(&a), normalize(&b));
    }

    #[test]
    fn sorted_input_is_untouched() {
        let expr = Expr::add([Expr::var("a"), Expr::var("b")]);
        let mut steps = Vec::new();
        assert_eq!(normalize_with(&expr, &mut steps), expr);
        assert!(steps.is_empty());
    }
}
