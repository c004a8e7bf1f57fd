//! Prints the derivatives of `x^2 + 5*x + 6` and evaluates them at a point.
//!
//! Usage: `derivative [x] [order]`, where `x` defaults to `2` and `order` to `1`.

use ariadne::Source;
use cas_algebra::primitive::{float, float_from_str, int_from_str};
use cas_algebra::symbolic::{Bindings, Error, Expr};
use std::process::ExitCode;

/// Prints the error as a report pointing into `src`.
fn report(err: Error, src: &str) {
    let spanned = err.into_spanned(src);
    if let Err(io_err) = spanned.build_report("input").eprint(("input", Source::from(src))) {
        eprintln!("{}: {}", spanned, io_err);
    }
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let x = match args.next() {
        Some(arg) => match float_from_str(&arg) {
            Some(x) => x,
            None => {
                eprintln!("not a number: `{}`", arg);
                return ExitCode::FAILURE;
            },
        },
        None => float(2),
    };
    let order = match args.next() {
        Some(arg) => match int_from_str(&arg).and_then(|n| n.to_i64()) {
            Some(n) => n,
            None => {
                eprintln!("not an integer: `{}`", arg);
                return ExitCode::FAILURE;
            },
        },
        None => 1,
    };

    // x^2 + 5*x + 6
    let expr = Expr::add([
        Expr::pow(Expr::var("x"), Expr::int(2)),
        Expr::mul([Expr::int(5), Expr::var("x")]),
        Expr::int(6),
    ]);
    let src = expr.to_string();

    let deriv = match expr.nth_derivative("x", order) {
        Ok(deriv) => deriv.simplify(),
        Err(err) => {
            report(err, &src);
            return ExitCode::FAILURE;
        },
    };
    println!("f(x) = {}", expr);
    println!("f'(x) = {}", deriv);
    println!("latex: {}", deriv.to_latex());

    let bindings = Bindings::new().with_var("x", x.clone());
    let deriv_src = deriv.to_string();
    match deriv.eval(&bindings) {
        Ok(value) => println!("f'({}) = {}", x.to_f64(), value.to_f64()),
        Err(err) => {
            report(err, &deriv_src);
            return ExitCode::FAILURE;
        },
    }

    ExitCode::SUCCESS
}
