//! LaTeX rendering of expressions and equations.

use num_traits::One;

use crate::expr::{Constant, Equation, Expr, Func};
use crate::rational::Rational;

/// Renders an expression to LaTeX.
#[must_use]
pub fn render(expr: &Expr) -> String {
    match expr {
        Expr::Number(r) => render_number(r),
        Expr::Symbol(name) => name.clone(),
        Expr::Constant(Constant::Pi) => r"\pi".to_string(),
        Expr::Constant(Constant::I) => "i".to_string(),
        Expr::Add(terms) => render_sum(terms),
        Expr::Mul(factors) => render_product(factors),
        Expr::Neg(inner) => {
            if matches!(**inner, Expr::Add(_)) {
                return format!(r"-\left({}\right)", render(inner));
            }
            let (inner_negative, body) = signed_term(inner);
            if inner_negative {
                body
            } else {
                format!("-{body}")
            }
        }
        Expr::Div { num, den } => {
            format!(r"\frac{{{}}}{{{}}}", render(num), render(den))
        }
        Expr::Pow { base, exp } => {
            format!("{}^{{{}}}", render_power_base(base), render(exp))
        }
        Expr::Function { func, arg } => render_function(*func, arg),
    }
}

/// Renders an equation as `lhs = rhs`.
#[must_use]
pub fn render_equation(equation: &Equation) -> String {
    format!("{} = {}", render(&equation.lhs), render(&equation.rhs))
}

fn render_number(r: &Rational) -> String {
    if r.is_integer() {
        return r.numerator().to_string();
    }
    let sign = if r.is_negative() { "-" } else { "" };
    let abs = r.abs();
    format!(
        r"{sign}\frac{{{}}}{{{}}}",
        abs.numerator(),
        abs.denominator()
    )
}

fn render_sum(terms: &[Expr]) -> String {
    let mut flat: Vec<&Expr> = Vec::new();
    collect_terms(terms, &mut flat);

    let mut out = String::new();
    for (i, term) in flat.iter().enumerate() {
        let (negative, body) = signed_term(term);
        if i == 0 {
            if negative {
                out.push('-');
            }
        } else if negative {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        out.push_str(&body);
    }
    out
}

fn collect_terms<'a>(terms: &'a [Expr], out: &mut Vec<&'a Expr>) {
    for term in terms {
        match term {
            Expr::Add(inner) => collect_terms(inner, out),
            other => out.push(other),
        }
    }
}

/// Splits a summand into its sign and the rendering of its absolute part,
/// so sums read `a - b` rather than `a + -b`.
fn signed_term(term: &Expr) -> (bool, String) {
    match term {
        Expr::Neg(inner) => {
            let body = if matches!(**inner, Expr::Add(_)) {
                format!(r"\left({}\right)", render(inner))
            } else {
                let (nested_negative, nested) = signed_term(inner);
                if nested_negative {
                    // --x reads as x.
                    return (false, nested);
                }
                nested
            };
            (true, body)
        }
        Expr::Number(r) if r.is_negative() => (true, render_number(&r.abs())),
        Expr::Mul(factors) => match factors.split_first() {
            Some((Expr::Number(r), rest)) if r.is_negative() => {
                let abs = r.abs();
                let factors = if abs.is_one() {
                    rest.to_vec()
                } else {
                    let mut v = Vec::with_capacity(factors.len());
                    v.push(Expr::Number(abs));
                    v.extend(rest.iter().cloned());
                    v
                };
                (true, render(&Expr::mul(factors)))
            }
            _ => (false, render(term)),
        },
        other => (false, render(other)),
    }
}

fn render_product(factors: &[Expr]) -> String {
    let mut flat: Vec<&Expr> = Vec::new();
    collect_factors(factors, &mut flat);

    let mut out = String::new();
    for (i, factor) in flat.iter().enumerate() {
        let body = render_factor(factor);
        if i > 0 {
            // Adjacent digits (or a leading fraction) would read as one
            // number without an explicit dot.
            if body.starts_with(|c: char| c.is_ascii_digit())
                || body.starts_with(r"\frac")
            {
                out.push_str(r" \cdot ");
            } else {
                out.push(' ');
            }
        }
        out.push_str(&body);
    }
    out
}

fn collect_factors<'a>(factors: &'a [Expr], out: &mut Vec<&'a Expr>) {
    for factor in factors {
        match factor {
            Expr::Mul(inner) => collect_factors(inner, out),
            other => out.push(other),
        }
    }
}

fn render_factor(factor: &Expr) -> String {
    match factor {
        Expr::Add(_) | Expr::Neg(_) => {
            format!(r"\left({}\right)", render(factor))
        }
        other => render(other),
    }
}

fn render_power_base(base: &Expr) -> String {
    let atomic = match base {
        Expr::Symbol(_) | Expr::Constant(_) => true,
        Expr::Number(r) => r.is_integer() && !r.is_negative(),
        _ => false,
    };
    if atomic {
        render(base)
    } else {
        format!(r"\left({}\right)", render(base))
    }
}

fn render_function(func: Func, arg: &Expr) -> String {
    let arg_str = render(arg);
    match func {
        Func::Sqrt => format!(r"\sqrt{{{arg_str}}}"),
        Func::Abs => format!(r"\left|{arg_str}\right|"),
        Func::Exp => format!("e^{{{arg_str}}}"),
        Func::Sin => format!(r"\sin\left({arg_str}\right)"),
        Func::Cos => format!(r"\cos\left({arg_str}\right)"),
        Func::Tan => format!(r"\tan\left({arg_str}\right)"),
        Func::Ln => format!(r"\ln\left({arg_str}\right)"),
        Func::Log => format!(r"\log\left({arg_str}\right)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;
    use crate::simplify::simplify;

    fn canonical(src: &str) -> String {
        render(&simplify(&parse_expr(src, "x").unwrap(), "x"))
    }

    #[test]
    fn test_polynomial_rendering() {
        assert_eq!(canonical("2x**2+3x-5"), r"2 x^{2} + 3 x - 5");
    }

    #[test]
    fn test_equation_rendering() {
        let equation = Equation::new(
            parse_expr("2x**2+3x-5", "x").unwrap(),
            Expr::int(0),
        );
        assert_eq!(render_equation(&equation), r"2 x^{2} + 3 x - 5 = 0");
    }

    #[test]
    fn test_rational_number_rendering() {
        assert_eq!(
            render(&Expr::Number(Rational::from_i64(-5, 2))),
            r"-\frac{5}{2}"
        );
        assert_eq!(
            render(&Expr::Number(Rational::from_i64(5, 2))),
            r"\frac{5}{2}"
        );
    }

    #[test]
    fn test_negative_leading_term() {
        assert_eq!(canonical("-x**2+1"), r"-x^{2} + 1");
    }

    #[test]
    fn test_fraction_coefficient_uses_cdot() {
        // x * (1/2) keeps an explicit dot so the digits do not merge.
        let expr = Expr::Mul(vec![
            Expr::symbol("x"),
            Expr::Number(Rational::from_i64(1, 2)),
        ]);
        assert_eq!(render(&expr), r"x \cdot \frac{1}{2}");
    }

    #[test]
    fn test_division_rendering() {
        let expr = Expr::div(Expr::int(1), Expr::symbol("x"));
        assert_eq!(render(&expr), r"\frac{1}{x}");
    }

    #[test]
    fn test_power_of_compound_base() {
        let expr = Expr::pow(
            Expr::Add(vec![Expr::symbol("x"), Expr::int(1)]),
            Expr::int(2),
        );
        assert_eq!(render(&expr), r"\left(x + 1\right)^{2}");
    }

    #[test]
    fn test_sqrt_and_functions() {
        assert_eq!(canonical("sqrt(8)"), r"2 \sqrt{2}");
        assert_eq!(canonical("sin(x)"), r"\sin\left(x\right)");
    }

    #[test]
    fn test_pi_rendering() {
        assert_eq!(canonical("2pi"), r"2 \pi");
    }
}
