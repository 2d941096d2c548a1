//! Shunting-yard parser building [`Expr`] trees.
//!
//! The grammar is the usual infix arithmetic with `**` as the
//! (right-associative) power operator, unary minus binding between `*`
//! and `**`, and implicit multiplication by juxtaposition (`2x`,
//! `2(x+1)`, `(x+1)(x-1)`). Exactly one variable is bound; any other
//! identifier that is not a known function name or `pi` is an unknown
//! symbol.

use crate::error::{Result, SymbolicError};
use crate::expr::{Constant, Expr, Func};
use crate::token::{tokenize, Token};

/// Returns true for a valid ASCII identifier.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses a source string into an expression with `variable` bound.
pub fn parse_expr(src: &str, variable: &str) -> Result<Expr> {
    if !is_identifier(variable) {
        return Err(SymbolicError::parse(format!(
            "invalid variable name '{variable}'"
        )));
    }

    let tokens = with_implicit_mul(tokenize(src)?, variable);
    if tokens.is_empty() {
        return Err(SymbolicError::parse("empty expression"));
    }

    Parser::new(variable).run(tokens)
}

/// Inserts `*` wherever one operand ends and the next begins, except
/// between a function name and its argument list.
fn with_implicit_mul(tokens: Vec<Token>, variable: &str) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(prev) = out.last() {
            let application = matches!(
                (prev, &token),
                (Token::Ident(name), Token::LParen)
                    if name != variable && Func::from_name(name).is_some()
            );
            if prev.ends_operand() && token.starts_operand() && !application {
                out.push(Token::Star);
            }
        }
        out.push(token);
    }
    out
}

/// Pending operator on the shunting-yard stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    UnaryMinus,
    UnaryPlus,
    Apply(Func),
    LParen,
}

impl Op {
    fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
            Op::UnaryMinus | Op::UnaryPlus => 3,
            Op::Pow => 4,
            Op::Apply(_) | Op::LParen => 0,
        }
    }

    fn right_associative(self) -> bool {
        matches!(self, Op::Pow | Op::UnaryMinus | Op::UnaryPlus)
    }
}

struct Parser<'a> {
    variable: &'a str,
    operands: Vec<Expr>,
    ops: Vec<Op>,
}

impl<'a> Parser<'a> {
    fn new(variable: &'a str) -> Self {
        Self {
            variable,
            operands: Vec::new(),
            ops: Vec::new(),
        }
    }

    fn run(mut self, tokens: Vec<Token>) -> Result<Expr> {
        // Tracks whether the previous token completed an operand, which
        // decides whether +/- are binary or unary.
        let mut prev_operand = false;

        let mut iter = tokens.iter().peekable();
        while let Some(token) = iter.next() {
            match token {
                Token::Number(r) => {
                    self.operands.push(Expr::Number(r.clone()));
                    prev_operand = true;
                }
                Token::Ident(name) => {
                    if name == self.variable {
                        self.operands.push(Expr::symbol(name.clone()));
                        prev_operand = true;
                    } else if name == "pi" {
                        self.operands.push(Expr::Constant(Constant::Pi));
                        prev_operand = true;
                    } else if let Some(func) = Func::from_name(name) {
                        if !matches!(iter.peek(), Some(Token::LParen)) {
                            return Err(SymbolicError::parse(format!(
                                "expected '(' after function '{name}'"
                            )));
                        }
                        self.ops.push(Op::Apply(func));
                        prev_operand = false;
                    } else {
                        return Err(SymbolicError::UnknownSymbol(name.clone()));
                    }
                }
                Token::Plus => {
                    if prev_operand {
                        self.push_op(Op::Add)?;
                    } else {
                        self.ops.push(Op::UnaryPlus);
                    }
                    prev_operand = false;
                }
                Token::Minus => {
                    if prev_operand {
                        self.push_op(Op::Sub)?;
                    } else {
                        self.ops.push(Op::UnaryMinus);
                    }
                    prev_operand = false;
                }
                Token::Star => {
                    self.push_op(Op::Mul)?;
                    prev_operand = false;
                }
                Token::Slash => {
                    self.push_op(Op::Div)?;
                    prev_operand = false;
                }
                Token::DoubleStar => {
                    self.push_op(Op::Pow)?;
                    prev_operand = false;
                }
                Token::LParen => {
                    self.ops.push(Op::LParen);
                    prev_operand = false;
                }
                Token::RParen => {
                    loop {
                        match self.ops.pop() {
                            Some(Op::LParen) => break,
                            Some(op) => self.apply(op)?,
                            None => {
                                return Err(SymbolicError::parse(
                                    "mismatched closing parenthesis",
                                ));
                            }
                        }
                    }
                    if let Some(Op::Apply(func)) = self.ops.last().copied() {
                        self.ops.pop();
                        let arg = self.pop_operand()?;
                        self.operands.push(Expr::func(func, arg));
                    }
                    prev_operand = true;
                }
            }
        }

        while let Some(op) = self.ops.pop() {
            if op == Op::LParen {
                return Err(SymbolicError::parse("unclosed parenthesis"));
            }
            self.apply(op)?;
        }

        match self.operands.len() {
            1 => Ok(self.operands.pop().unwrap()),
            _ => Err(SymbolicError::parse("malformed expression")),
        }
    }

    fn push_op(&mut self, op: Op) -> Result<()> {
        while let Some(&top) = self.ops.last() {
            if top == Op::LParen || matches!(top, Op::Apply(_)) {
                break;
            }
            let tighter = top.precedence() > op.precedence()
                || (top.precedence() == op.precedence() && !op.right_associative());
            if tighter {
                self.ops.pop();
                self.apply(top)?;
            } else {
                break;
            }
        }
        self.ops.push(op);
        Ok(())
    }

    fn apply(&mut self, op: Op) -> Result<()> {
        match op {
            Op::UnaryMinus => {
                let a = self.pop_operand()?;
                self.operands.push(Expr::neg(a));
            }
            Op::UnaryPlus => {}
            Op::Apply(func) => {
                let a = self.pop_operand()?;
                self.operands.push(Expr::func(func, a));
            }
            Op::LParen => {}
            binary => {
                let b = self.pop_operand()?;
                let a = self.pop_operand()?;
                let expr = match binary {
                    Op::Add => Expr::Add(vec![a, b]),
                    Op::Sub => Expr::Add(vec![a, Expr::neg(b)]),
                    Op::Mul => Expr::Mul(vec![a, b]),
                    Op::Div => Expr::div(a, b),
                    Op::Pow => Expr::pow(a, b),
                    _ => unreachable!(),
                };
                self.operands.push(expr);
            }
        }
        Ok(())
    }

    fn pop_operand(&mut self) -> Result<Expr> {
        self.operands
            .pop()
            .ok_or_else(|| SymbolicError::parse("missing operand"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_simple_sum() {
        let expr = parse_expr("x+1", "x").unwrap();
        assert_eq!(expr, Expr::Add(vec![x(), Expr::int(1)]));
    }

    #[test]
    fn test_power_and_implicit_mul() {
        let expr = parse_expr("2x**2", "x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(vec![Expr::int(2), Expr::pow(x(), Expr::int(2))])
        );
    }

    #[test]
    fn test_power_right_associative() {
        let expr = parse_expr("x**2**3", "x").unwrap();
        assert_eq!(
            expr,
            Expr::pow(x(), Expr::pow(Expr::int(2), Expr::int(3)))
        );
    }

    #[test]
    fn test_unary_minus_binds_below_power() {
        let expr = parse_expr("-x**2", "x").unwrap();
        assert_eq!(expr, Expr::neg(Expr::pow(x(), Expr::int(2))));
    }

    #[test]
    fn test_juxtaposed_parens() {
        let expr = parse_expr("(x+1)(x-1)", "x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(vec![
                Expr::Add(vec![x(), Expr::int(1)]),
                Expr::Add(vec![x(), Expr::neg(Expr::int(1))]),
            ])
        );
    }

    #[test]
    fn test_function_application() {
        let expr = parse_expr("2sin(x)", "x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(vec![
                Expr::int(2),
                Expr::func(Func::Sin, x()),
            ])
        );
    }

    #[test]
    fn test_function_requires_parens() {
        let err = parse_expr("sin x", "x").unwrap_err();
        assert!(matches!(err, SymbolicError::Parse(_)));
    }

    #[test]
    fn test_unknown_symbol() {
        let err = parse_expr("x+y", "x").unwrap_err();
        assert_eq!(err, SymbolicError::UnknownSymbol("y".to_string()));
    }

    #[test]
    fn test_decimal_coefficient() {
        let expr = parse_expr("0.5x", "x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(vec![Expr::Number(Rational::from_i64(1, 2)), x()])
        );
    }

    #[test]
    fn test_unclosed_paren() {
        assert!(parse_expr("(x+1", "x").is_err());
        assert!(parse_expr("x+1)", "x").is_err());
    }

    #[test]
    fn test_alternate_variable() {
        let expr = parse_expr("t**2", "t").unwrap();
        assert_eq!(expr, Expr::pow(Expr::symbol("t"), Expr::int(2)));
        assert!(parse_expr("x", "t").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_expr("", "x").is_err());
        assert!(parse_expr("   ", "x").is_err());
    }
}
