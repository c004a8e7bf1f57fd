//! Plain-text and LaTeX rendering of expressions.
//!
//! The plain-text rendering doubles as the key used to find like terms and factors, so it must be
//! deterministic: the same tree always renders to the same string.

use crate::primitive::float;
use rug::Float;
use std::fmt::{self, Display, Formatter, Write};
use super::{Expr, Primary};

/// Writes a float in its shortest form if that form is exact, or with every significant digit
/// otherwise, so that distinct floats never render the same.
fn fmt_float(num: &Float, f: &mut Formatter<'_>) -> fmt::Result {
    let short = num.to_f64();
    if short.is_finite() && float(short) == *num {
        write!(f, "{}", short)
    } else {
        write!(f, "{}", num.to_string_radix(10, None))
    }
}

/// Returns true if the rendered text starts with a minus sign.
fn is_negative_text(s: &str) -> bool {
    s.starts_with('-')
}

/// Returns true if the expression must be parenthesized when used as a factor of a product.
fn needs_parens_as_factor(expr: &Expr, rendered: &str, first: bool) -> bool {
    matches!(expr, Expr::Add(_) | Expr::Relation(..))
        || (!first && is_negative_text(rendered))
}

/// Returns true if the expression must be parenthesized when used as the base of a power.
fn needs_parens_as_base(expr: &Expr, rendered: &str) -> bool {
    matches!(
        expr,
        Expr::Add(_) | Expr::Mul(_) | Expr::Exp(..) | Expr::Relation(..)
            | Expr::Primary(Primary::Rational(..))
    ) || is_negative_text(rendered)
}

/// Returns true if the expression must be parenthesized when used as an exponent.
fn needs_parens_as_exponent(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Add(_) | Expr::Mul(_) | Expr::Relation(..) | Expr::Primary(Primary::Rational(..))
    )
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => fmt_float(num, f),
            Self::Rational(num, den) => write!(f, "{}/{}", num, den),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Const(name, _) => write!(f, "{}", name),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                let Some(first) = iter.next() else {
                    return write!(f, "0");
                };
                write!(f, "{}", first)?;
                for term in iter {
                    let rendered = term.to_string();
                    if matches!(term, Self::Relation(..)) {
                        write!(f, "+({})", rendered)?;
                    } else if is_negative_text(&rendered) {
                        write!(f, "{}", rendered)?;
                    } else {
                        write!(f, "+{}", rendered)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                if factors.is_empty() {
                    return write!(f, "1");
                }
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    let rendered = factor.to_string();
                    if needs_parens_as_factor(factor, &rendered, i == 0) {
                        write!(f, "({})", rendered)?;
                    } else {
                        write!(f, "{}", rendered)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                let base_str = base.to_string();
                if needs_parens_as_base(base, &base_str) {
                    write!(f, "({})", base_str)?;
                } else {
                    write!(f, "{}", base_str)?;
                }
                write!(f, "^")?;
                if needs_parens_as_exponent(exp) {
                    write!(f, "({})", exp)
                } else {
                    write!(f, "{}", exp)
                }
            },
            Self::Relation(lhs, rhs, relation) => {
                write!(f, "{} {} {}", lhs, relation.symbol(), rhs)
            },
        }
    }
}

/// Renders an [`Expr`] as LaTeX through its [`Display`] implementation.
///
/// This is created by [`Expr::latex`].
#[derive(Debug, Clone, Copy)]
pub struct Latex<'a>(pub &'a Expr);

/// Functions with a dedicated LaTeX command, such as `\sin`.
const LATEX_FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "sec", "csc", "cot",
    "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh",
    "exp", "ln", "log",
];

impl Latex<'_> {
    /// Renders the given expression, in parentheses if requested.
    fn render(expr: &Expr, parens: bool) -> String {
        if parens {
            format!("\\left({}\\right)", Latex(expr))
        } else {
            Latex(expr).to_string()
        }
    }

    /// Renders a comma-separated argument list.
    fn args(args: &[Expr]) -> String {
        args.iter()
            .map(|arg| Latex(arg).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn fmt_primary(primary: &Primary, f: &mut Formatter<'_>) -> fmt::Result {
        match primary {
            Primary::Integer(_) | Primary::Float(_) | Primary::Symbol(_) => {
                write!(f, "{}", primary)
            },
            Primary::Rational(num, den) => {
                if *den == 1 {
                    write!(f, "{}", num)
                } else if num.is_negative() {
                    write!(f, "-\\frac{{{}}}{{{}}}", num.clone().abs(), den)
                } else {
                    write!(f, "\\frac{{{}}}{{{}}}", num, den)
                }
            },
            Primary::Const(name, _) => match name.as_str() {
                "pi" => write!(f, "\\pi"),
                name => write!(f, "{}", name),
            },
            Primary::Call(name, args) => match (name.as_str(), args.as_slice()) {
                ("sqrt", [arg]) => write!(f, "\\sqrt{{{}}}", Latex(arg)),
                ("abs", [arg]) => write!(f, "\\left|{}\\right|", Latex(arg)),
                ("log", [arg, base]) => {
                    write!(f, "\\log_{{{}}}\\left({}\\right)", Latex(base), Latex(arg))
                },
                (name, args) if LATEX_FUNCTIONS.contains(&name) => {
                    write!(f, "\\{}\\left({}\\right)", name, Self::args(args))
                },
                (name, args) => {
                    write!(f, "\\mathrm{{{}}}\\left({}\\right)", name, Self::args(args))
                },
            },
        }
    }
}

impl Display for Latex<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Primary(primary) => Self::fmt_primary(primary, f),
            Expr::Add(terms) => {
                let mut iter = terms.iter();
                let Some(first) = iter.next() else {
                    return write!(f, "0");
                };
                write!(f, "{}", Latex(first))?;
                for term in iter {
                    let rendered = Self::render(term, matches!(term, Expr::Relation(..)));
                    match rendered.strip_prefix('-') {
                        Some(rest) => write!(f, " - {}", rest)?,
                        None => write!(f, " + {}", rendered)?,
                    }
                }
                Ok(())
            },
            Expr::Mul(factors) => {
                if factors.is_empty() {
                    return write!(f, "1");
                }
                let mut out = String::new();
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" \\cdot ");
                    }
                    let plain = factor.to_string();
                    let parens = needs_parens_as_factor(factor, &plain, i == 0);
                    out.push_str(&Self::render(factor, parens));
                }
                f.write_str(&out)
            },
            Expr::Exp(base, exp) => {
                let parens = needs_parens_as_base(base, &base.to_string());
                let mut out = Self::render(base, parens);
                write!(out, "^{{{}}}", Latex(exp))?;
                f.write_str(&out)
            },
            Expr::Relation(lhs, rhs, relation) => {
                write!(f, "{} {} {}", Latex(lhs), relation.latex(), Latex(rhs))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::{assert_eq, assert_ne};
    use rug::ops::Pow;
    use super::*;
    use super::super::Relation;

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn sum_signs() {
        // x + -1*y + 2 + -3
        let expr = Expr::add([
            x(),
            Expr::mul([Expr::int(-1), Expr::var("y")]),
            Expr::int(2),
            Expr::int(-3),
        ]);
        assert_eq!(expr.to_string(), "x-1*y+2-3");
    }

    #[test]
    fn products_and_powers() {
        // 2*(x+1)^2
        let expr = Expr::mul([
            Expr::int(2),
            Expr::pow(Expr::add([x(), Expr::int(1)]), Expr::int(2)),
        ]);
        assert_eq!(expr.to_string(), "2*(x+1)^2");

        // 3*(x+2*y)
        let expr = Expr::mul([
            Expr::int(3),
            Expr::add([x(), Expr::mul([Expr::int(2), Expr::var("y")])]),
        ]);
        assert_eq!(expr.to_string(), "3*(x+2*y)");

        // x*-2 keeps the sign visible
        let expr = Expr::mul([x(), Expr::int(-2)]);
        assert_eq!(expr.to_string(), "x*(-2)");

        // x^-1, (x*y)^(1/2), (-2)^x
        assert_eq!(Expr::pow(x(), Expr::int(-1)).to_string(), "x^-1");
        assert_eq!(
            Expr::pow(Expr::mul([x(), Expr::var("y")]), Expr::rational(1, 2)).to_string(),
            "(x*y)^(1/2)",
        );
        assert_eq!(Expr::pow(Expr::int(-2), x()).to_string(), "(-2)^x");
        assert_eq!(
            Expr::pow(Expr::pow(x(), Expr::int(2)), Expr::int(3)).to_string(),
            "(x^2)^3",
        );
    }

    #[test]
    fn precise_floats() {
        let third = float(1) / 3;
        let nudged = third.clone() + float(2).pow(-200);
        assert_ne!(Expr::float(third.clone()).to_string(), Expr::float(nudged).to_string());
        assert_ne!(Expr::float(third).to_string(), Expr::float(1.0 / 3.0).to_string());

        assert_eq!(Expr::float(0.1).to_string(), "0.1");
        assert_eq!(Expr::float(-4).to_string(), "-4");
    }

    #[test]
    fn leaves() {
        assert_eq!(Expr::float(2.5).to_string(), "2.5");
        assert_eq!(Expr::rational_unreduced(2, 4).to_string(), "2/4");
        assert_eq!(Expr::pi().to_string(), "pi");
        assert_eq!(
            Expr::func("log", [x(), Expr::int(2)]).to_string(),
            "log(x, 2)",
        );
        assert_eq!(Expr::add([]).to_string(), "0");
        assert_eq!(Expr::mul([]).to_string(), "1");
    }

    #[test]
    fn relations() {
        let expr = Expr::eq(x(), Expr::int(2), Relation::NotEq);
        assert_eq!(expr.to_string(), "x <> 2");
        assert_eq!(expr.to_latex(), "x \\ne 2");

        let expr = Expr::eq(x(), Expr::int(2), Relation::LessEq);
        assert_eq!(expr.to_string(), "x <= 2");
        assert_eq!(expr.to_latex(), "x \\le 2");
    }

    #[test]
    fn latex() {
        let expr = Expr::add([
            Expr::mul([Expr::rational(1, 2), Expr::pow(x(), Expr::int(2))]),
            Expr::mul([Expr::int(-1), Expr::func("sin", [Expr::pi()])]),
            Expr::func("sqrt", [x()]),
        ]);
        assert_eq!(
            expr.to_latex(),
            "\\frac{1}{2} \\cdot x^{2} - 1 \\cdot \\sin\\left(\\pi\\right) + \\sqrt{x}",
        );

        assert_eq!(Expr::rational(-3, 4).to_latex(), "-\\frac{3}{4}");
        assert_eq!(Expr::rational_unreduced(5, 1).to_latex(), "5");
        assert_eq!(
            Expr::func("foo", [x(), Expr::int(1)]).to_latex(),
            "\\mathrm{foo}\\left(x, 1\\right)",
        );
        assert_eq!(
            Expr::func("log", [x(), Expr::int(2)]).to_latex(),
            "\\log_{2}\\left(x\\right)",
        );
        assert_eq!(Expr::func("abs", [x()]).to_latex(), "\\left|x\\right|");
    }
}
