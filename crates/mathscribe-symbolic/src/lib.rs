//! # Mathscribe Symbolic
//!
//! A small exact-arithmetic symbolic engine: parsing, polynomial
//! equation solving, simplification, factorization, differentiation, and
//! LaTeX rendering.
//!
//! The engine is deliberately univariate: expressions bind exactly one
//! variable, supplied at parse time, and the solver handles polynomial
//! equations (closed form through degree two, rational-root reduction
//! above that). All arithmetic is exact; decimal literals become
//! rationals and quadratic roots are kept as radicals.
//!
//! ## Example
//!
//! ```
//! use mathscribe_symbolic::{latex, parse_expr, solve, Equation, Expr};
//!
//! let lhs = parse_expr("2*x**2 + 3*x - 5", "x").unwrap();
//! let equation = Equation::new(lhs, Expr::int(0));
//! let roots = solve(&equation, "x").unwrap();
//! let rendered: Vec<String> = roots.iter().map(latex::render).collect();
//! assert_eq!(rendered, vec![r"-\frac{5}{2}", "1"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calculus;
pub mod error;
pub mod expr;
pub mod factor;
pub mod latex;
pub mod parser;
pub mod polynomial;
pub mod rational;
pub mod simplify;
pub mod solve;
pub mod token;

pub use calculus::differentiate;
pub use error::{Result, SymbolicError};
pub use expr::{Constant, Equation, Expr, Func};
pub use factor::factor;
pub use parser::{is_identifier, parse_expr};
pub use polynomial::Polynomial;
pub use rational::Rational;
pub use simplify::simplify;
pub use solve::solve;
