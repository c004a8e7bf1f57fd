//! Distributing products over sums and expanding integer powers.
//!
//! Expansion only ever increases the number of terms in an expression. The result is usually
//! full of like terms, so it should be [`collect`](super::collect)ed afterwards.

use log::trace;
use rug::Integer;
use crate::symbolic::{expr::{Expr, Primary}, step_collector::StepCollector};
use super::{fraction::recip, options::ExpandOptions, step::Step};

/// The maximum number of rounds [`expand_fully`] runs.
const MAX_EXPAND_ROUNDS: usize = 5;

/// Expands the expression once, bottom-up.
///
/// - `a*(b+c) = a*b+a*c`
/// - `(a+b)^2 = a^2+2*a*b+b^2`
/// - `(a+b+c)^2 = (a+b+c)*(a+b+c)`, distributed
/// - `(a*b)^n = a^n*b^n`
///
/// Powers of sums are expanded only for non-negative integer exponents up to
/// [`ExpandOptions::max_degree`]. Logarithms and trigonometric functions are rewritten if the
/// corresponding options are set.
pub fn expand(expr: &Expr, options: &ExpandOptions) -> Expr {
    expand_with(expr, options, &mut ())
}

/// Expands the expression once, reporting each rewrite to the step collector.
pub fn expand_with(
    expr: &Expr,
    options: &ExpandOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    match expr {
        Expr::Primary(Primary::Call(name, args)) => {
            let args = args.iter()
                .map(|arg| expand_with(arg, options, step_collector))
                .collect();
            expand_call(name, args, options, step_collector)
        },
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => {
            let mut out = Vec::with_capacity(terms.len());
            for term in terms {
                match expand_with(term, options, step_collector) {
                    Expr::Add(inner) => out.extend(inner),
                    term => out.push(term),
                }
            }
            Expr::Add(out)
        },
        Expr::Mul(factors) => {
            let factors = factors.iter()
                .map(|factor| expand_with(factor, options, step_collector))
                .collect();
            distribute(factors, step_collector)
        },
        Expr::Exp(base, exp) => {
            let base = expand_with(base, options, step_collector);
            let exp = expand_with(exp, options, step_collector);
            expand_power(base, exp, options, step_collector)
        },
        Expr::Relation(lhs, rhs, relation) => Expr::eq(
            expand_with(lhs, options, step_collector),
            expand_with(rhs, options, step_collector),
            *relation,
        ),
    }
}

/// Expands the expression repeatedly, until its rendering stops changing or a fixed number of
/// rounds have run.
pub fn expand_fully(expr: &Expr, options: &ExpandOptions) -> Expr {
    let mut current = expr.clone();
    let mut rendered = current.to_string();
    for _ in 0..MAX_EXPAND_ROUNDS {
        let next = expand(&current, options);
        let next_rendered = next.to_string();
        if next_rendered == rendered {
            break;
        }
        current = next;
        rendered = next_rendered;
    }
    current
}

/// Multiplies out every sum among the factors of a product.
///
/// `(a+b)*c*(d+e) = a*c*d+a*c*e+b*c*d+b*c*e`
fn distribute(factors: Vec<Expr>, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    if !factors.iter().any(|factor| matches!(factor, Expr::Add(_))) {
        return Expr::Mul(factors);
    }

    step_collector.push(Step::Distribute);

    // each entry is the list of factors of one term of the result
    let mut products: Vec<Vec<Expr>> = vec![Vec::new()];
    for factor in factors {
        match factor {
            Expr::Add(terms) => {
                let mut next = Vec::with_capacity(products.len() * terms.len());
                for product in &products {
                    for term in &terms {
                        let mut product = product.clone();
                        match term {
                            Expr::Mul(inner) => product.extend(inner.iter().cloned()),
                            term => product.push(term.clone()),
                        }
                        next.push(product);
                    }
                }
                products = next;
            },
            factor => {
                for product in &mut products {
                    product.push(factor.clone());
                }
            },
        }
    }

    trace!("distributed into {} terms", products.len());
    Expr::Add(products.into_iter().map(|product| Expr::Mul(product).downgrade()).collect())
}

/// Expands `base^exp`, where the base and exponent have already been expanded.
fn expand_power(
    base: Expr,
    exp: Expr,
    options: &ExpandOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let Some(n) = exp.as_integer() else {
        return Expr::pow(base, exp);
    };

    match base {
        Expr::Add(terms) => match n.to_u32().filter(|n| *n <= options.max_degree) {
            Some(0) => Expr::int(1),
            Some(1) => Expr::Add(terms),
            Some(n) if terms.len() == 2 => {
                step_collector.push(Step::BinomialExpansion);
                let expanded = binomial(&terms[0], &terms[1], n);
                expand_with(&expanded, options, step_collector)
            },
            Some(n) => {
                step_collector.push(Step::RepeatedMultiplication);
                let base = Expr::Add(terms);
                let factors = (0..n).map(|_| base.clone()).collect();
                distribute(factors, step_collector)
            },
            None => Expr::pow(Expr::Add(terms), exp),
        },
        Expr::Mul(factors) => {
            step_collector.push(Step::DistributePower);
            Expr::Mul(
                factors.into_iter()
                    .map(|factor| expand_power(factor, exp.clone(), options, step_collector))
                    .collect()
            )
        },
        base => Expr::pow(base, exp),
    }
}

/// Returns `a^k*b^0`, ..., `a^0*b^k` for the given `k`, as in the binomial theorem.
///
/// Trivial powers are left out: `a^1` is written as `a`, and `a^0` is not written at all.
fn binomial(a: &Expr, b: &Expr, n: u32) -> Expr {
    let power = |base: &Expr, exp: u32| match exp {
        0 => None,
        1 => Some(base.clone()),
        exp => Some(Expr::pow(base.clone(), Expr::int(exp))),
    };

    let mut coefficient = Integer::from(1);
    let mut terms = Vec::with_capacity(n as usize + 1);
    for k in 0..=n {
        let mut factors = Vec::with_capacity(3);
        if coefficient != 1 {
            factors.push(Expr::Primary(Primary::Integer(coefficient.clone())));
        }
        factors.extend(power(a, n - k));
        factors.extend(power(b, k));
        terms.push(Expr::Mul(factors).downgrade());

        // C(n, k + 1) = C(n, k) * (n - k) / (k + 1)
        coefficient *= n - k;
        coefficient /= k + 1;
    }
    Expr::Add(terms)
}

/// Rewrites a function call whose arguments have already been expanded.
fn expand_call(
    name: &str,
    mut args: Vec<Expr>,
    options: &ExpandOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    if args.len() != 1 {
        return Expr::func(name, args);
    }

    if options.expand_logs && matches!(name, "ln" | "log") {
        match args.remove(0) {
            Expr::Mul(factors) => {
                step_collector.push(Step::ExpandLog);
                return Expr::Add(
                    factors.into_iter()
                        .map(|factor| expand_call(name, vec![factor], options, step_collector))
                        .collect()
                );
            },
            Expr::Exp(base, exp) => {
                step_collector.push(Step::ExpandLog);
                return Expr::mul([*exp, expand_call(name, vec![*base], options, step_collector)]);
            },
            arg => args.push(arg),
        }
    }

    if options.expand_trig {
        let arg = &args[0];
        let sin = || Expr::func("sin", [arg.clone()]);
        let cos = || Expr::func("cos", [arg.clone()]);
        let rewritten = match name {
            "tan" => Some(Expr::mul([sin(), recip(cos())])),
            "sec" => Some(recip(cos())),
            "csc" => Some(recip(sin())),
            "cot" => Some(Expr::mul([cos(), recip(sin())])),
            _ => None,
        };
        if let Some(rewritten) = rewritten {
            step_collector.push(Step::ExpandTrig);
            return rewritten;
        }
    }

    Expr::func(name, args)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::simplify::{collect, normalize};
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn y() -> Expr {
        Expr::var("y")
    }

    fn expand_default(expr: &Expr) -> Expr {
        expand(expr, &ExpandOptions::default())
    }

    #[test]
    fn distribute_binomials() {
        // (x+1)*(x+2)
        let expr = Expr::mul([
            Expr::add([x(), Expr::int(1)]),
            Expr::add([x(), Expr::int(2)]),
        ]);
        let expanded = expand_default(&expr);
        assert_eq!(expanded.to_string(), "x*x+x*2+1*x+1*2");
        assert_eq!(collect(&expanded).to_string(), "x^2+3*x+2");
    }

    #[test]
    fn distribute_over_three_terms() {
        // 2*(x+y+1)
        let expr = Expr::mul([Expr::int(2), Expr::add([x(), y(), Expr::int(1)])]);
        assert_eq!(expand_default(&expr).to_string(), "2*x+2*y+2*1");
    }

    #[test]
    fn binomial_theorem() {
        // (x+1)^2
        let expr = Expr::pow(Expr::add([x(), Expr::int(1)]), Expr::int(2));
        let mut steps = Vec::new();
        let expanded = expand_with(&expr, &ExpandOptions::default(), &mut steps);
        assert_eq!(expanded.to_string(), "x^2+2*x*1+1^2");
        assert_eq!(collect(&expanded).to_string(), "x^2+2*x+1");
        assert_eq!(steps, vec![Step::BinomialExpansion]);

        // (x+y)^3
        let expr = Expr::pow(Expr::add([x(), y()]), Expr::int(3));
        assert_eq!(
            collect(&expand_default(&expr)).to_string(),
            "x^3+3*x^2*y+3*x*y^2+y^3",
        );
    }

    #[test]
    fn repeated_multiplication() {
        // (x+y+1)^2
        let expr = Expr::pow(Expr::add([x(), y(), Expr::int(1)]), Expr::int(2));
        let expanded = collect(&expand_default(&expr));

        // `x*y` and `y*x` are only grouped after normalizing
        assert_eq!(expanded.to_string(), "x^2+x*y+2*x+y*x+y^2+2*y+1");
        assert_eq!(collect(&normalize(&expanded)).to_string(), "1+2*x+2*y+2*x*y+x^2+y^2");
    }

    #[test]
    fn power_bounds() {
        let sum = Expr::add([x(), Expr::int(1)]);

        let expr = Expr::pow(sum.clone(), Expr::int(11));
        assert_eq!(expand_default(&expr), expr);

        let expr = Expr::pow(sum.clone(), Expr::int(-2));
        assert_eq!(expand_default(&expr), expr);

        let expr = Expr::pow(sum.clone(), Expr::rational(1, 2));
        assert_eq!(expand_default(&expr), expr);

        let options = ExpandOptions { max_degree: 2, ..Default::default() };
        let expr = Expr::pow(sum.clone(), Expr::int(3));
        assert_eq!(expand(&expr, &options), expr);

        assert_eq!(expand_default(&Expr::pow(sum.clone(), Expr::int(0))), Expr::int(1));
        assert_eq!(expand_default(&Expr::pow(sum.clone(), Expr::int(1))), sum);
    }

    #[test]
    fn distribute_power() {
        // (2*x)^3
        let expr = Expr::pow(Expr::mul([Expr::int(2), x()]), Expr::int(3));
        let expanded = expand_default(&expr);
        assert_eq!(expanded.to_string(), "2^3*x^3");
        assert_eq!(collect(&expanded).to_string(), "8*x^3");
    }

    #[test]
    fn logs() {
        // ln(x*y^2)
        let expr = Expr::func("ln", [Expr::mul([x(), Expr::pow(y(), Expr::int(2))])]);
        assert_eq!(expand_default(&expr), expr);

        let options = ExpandOptions::default().expand_logs(true);
        assert_eq!(expand(&expr, &options).to_string(), "ln(x)+2*ln(y)");
    }

    #[test]
    fn trig() {
        let options = ExpandOptions::default().expand_trig(true);
        let expr = Expr::func("tan", [x()]);
        assert_eq!(expand(&expr, &options).to_string(), "sin(x)*cos(x)^-1");
        let expr = Expr::func("csc", [x()]);
        assert_eq!(expand(&expr, &options).to_string(), "sin(x)^-1");
        let expr = Expr::func("sin", [x()]);
        assert_eq!(expand(&expr, &options), expr);
    }

    #[test]
    fn fully() {
        // ((x+1)^2)*(x+1)
        let sum = Expr::add([x(), Expr::int(1)]);
        let expr = Expr::mul([Expr::pow(sum.clone(), Expr::int(2)), sum]);
        let expanded = collect(&expand_fully(&expr, &ExpandOptions::default()));
        assert_eq!(expanded.to_string(), "x^3+3*x^2+3*x+1");
    }
}
