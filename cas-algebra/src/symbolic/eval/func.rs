//! The elementary functions that [`Expr::eval`](crate::symbolic::expr::Expr::eval) knows about.
//!
//! Each function takes its already-evaluated arguments and returns [`None`] if they are outside
//! of its domain.

use levenshtein::levenshtein;
use rug::Float;

/// A builtin elementary function.
pub(crate) struct Builtin {
    /// The name of the function.
    pub name: &'static str,

    /// The fewest arguments the function accepts.
    pub min_args: usize,

    /// The most arguments the function accepts.
    pub max_args: usize,

    eval: fn(&[Float]) -> Option<Float>,
}

impl Builtin {
    /// Evaluates the function. The caller must have checked the number of arguments.
    pub fn eval(&self, args: &[Float]) -> Option<Float> {
        (self.eval)(args)
    }
}

/// Builds a one-argument function that is defined everywhere, whose `rug` implementation has the
/// same name.
macro_rules! total {
    ($($name:ident),* $(,)?) => {
        $(
            fn $name(args: &[Float]) -> Option<Float> {
                Some(args.first()?.clone().$name())
            }
        )*
    };
}

total!(abs, exp, sin, cos, tan, atan, sinh, cosh, tanh);

fn sqrt(args: &[Float]) -> Option<Float> {
    let x = args.first()?;
    (*x >= 0).then(|| x.clone().sqrt())
}

fn ln(args: &[Float]) -> Option<Float> {
    let x = args.first()?;
    (*x > 0).then(|| x.clone().ln())
}

/// `log(x)` is the base 10 logarithm, and `log(x, b)` is the base `b` logarithm.
fn log(args: &[Float]) -> Option<Float> {
    let x = args.first()?;
    if *x <= 0 {
        return None;
    }

    match args.get(1) {
        Some(base) if *base <= 0 || *base == 1 => None,
        Some(base) => Some(x.clone().ln() / base.clone().ln()),
        None => Some(x.clone().log10()),
    }
}

fn sec(args: &[Float]) -> Option<Float> {
    Some(args.first()?.clone().sec())
}

fn csc(args: &[Float]) -> Option<Float> {
    Some(args.first()?.clone().csc())
}

fn cot(args: &[Float]) -> Option<Float> {
    Some(args.first()?.clone().cot())
}

fn asin(args: &[Float]) -> Option<Float> {
    let x = args.first()?;
    (*x >= -1 && *x <= 1).then(|| x.clone().asin())
}

fn acos(args: &[Float]) -> Option<Float> {
    let x = args.first()?;
    (*x >= -1 && *x <= 1).then(|| x.clone().acos())
}

macro_rules! builtins {
    ($($name:literal => $func:ident ($min:literal..=$max:literal)),* $(,)?) => {
        &[
            $(
                Builtin { name: $name, min_args: $min, max_args: $max, eval: $func },
            )*
        ]
    };
}

/// Every builtin function.
static BUILTINS: &[Builtin] = builtins! {
    "sqrt" => sqrt (1..=1),
    "abs" => abs (1..=1),
    "ln" => ln (1..=1),
    "log" => log (1..=2),
    "exp" => exp (1..=1),
    "sin" => sin (1..=1),
    "cos" => cos (1..=1),
    "tan" => tan (1..=1),
    "sec" => sec (1..=1),
    "csc" => csc (1..=1),
    "cot" => cot (1..=1),
    "arcsin" => asin (1..=1),
    "asin" => asin (1..=1),
    "arccos" => acos (1..=1),
    "acos" => acos (1..=1),
    "arctan" => atan (1..=1),
    "atan" => atan (1..=1),
    "sinh" => sinh (1..=1),
    "cosh" => cosh (1..=1),
    "tanh" => tanh (1..=1),
};

/// Returns the builtin function with the given name.
pub(crate) fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

/// Returns the names of the builtin functions with a name similar to the given name.
pub(crate) fn similar(name: &str) -> Vec<String> {
    BUILTINS.iter()
        .filter(|builtin| levenshtein(builtin.name, name) < 2)
        .map(|builtin| builtin.name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use crate::primitive::float;
    use pretty_assertions::assert_eq;
    use super::*;

    fn call(name: &str, args: &[f64]) -> Option<f64> {
        let args = args.iter().map(|&arg| float(arg)).collect::<Vec<_>>();
        lookup(name)?.eval(&args).map(|value| value.to_f64())
    }

    #[test]
    fn domains() {
        assert_eq!(call("ln", &[-1.0]), None);
        assert_eq!(call("ln", &[0.0]), None);
        assert_eq!(call("ln", &[1.0]), Some(0.0));
        assert_eq!(call("sqrt", &[-4.0]), None);
        assert_eq!(call("sqrt", &[16.0]), Some(4.0));
        assert_eq!(call("arcsin", &[1.5]), None);
        assert_eq!(call("acos", &[-1.01]), None);
        assert_eq!(call("log", &[100.0, 1.0]), None);
    }

    #[test]
    fn logarithms() {
        assert_float_absolute_eq!(call("log", &[1000.0]).unwrap(), 3.0, 1e-12);
        assert_float_absolute_eq!(call("log", &[8.0, 2.0]).unwrap(), 3.0, 1e-12);
        assert_float_absolute_eq!(lookup("log").unwrap().eval(&[float(10)]).unwrap().to_f64(), 1.0, 1e-12);
    }

    #[test]
    fn trig() {
        assert_float_absolute_eq!(call("sec", &[0.0]).unwrap(), 1.0, 1e-12);
        assert_float_absolute_eq!(call("cot", &[1.0]).unwrap(), 1.0 / 1f64.tan(), 1e-12);
        assert_float_absolute_eq!(call("arctan", &[1.0]).unwrap(), std::f64::consts::FRAC_PI_4, 1e-12);
    }

    #[test]
    fn similar_names() {
        assert_eq!(similar("sinn"), vec!["sin", "sinh"]);
        assert!(similar("foo").is_empty());
    }
}
