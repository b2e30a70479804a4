#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// error type shared by the parser, the evaluator and the tree transformations
pub mod errors;
/// the operator set `+ - * / ^ ln sin cos o` with arity, priority and numeric application
pub mod operators;
/// named variables addressed by index
pub mod variables;
///________________________________________________________________________________________________________________________________
/// # Expression tree
/// binary tree of numbers, variable references and operators; unary operators keep their
/// operand in the left child
pub mod expression_tree;
/// numeric helpers: tolerance, factorial, linspace, finite differences
pub mod utils;
///________________________________________________________________________________________________________________________________
/// recursive descent parser turning a `$`-terminated string into an [`symbolic_engine::Expression`]
///
///# Example
/// ```
/// use RustedDerivator::symbolic::symbolic_engine::Expression;
/// let mut expr = Expression::parse_expression("x^2+sin(x)$").unwrap();
/// expr.set_diff_variable_value(0.0).unwrap();
/// assert_eq!(expr.evaluate().unwrap(), 0.0);
/// ```
pub mod parse_expr;
pub mod symbolic_evaluate;
pub mod symbolic_simplify;
pub mod symbolic_derivatives;
///________________________________________________________________________________________________________________________________
/// # Symbolic engine
/// an expression with its variables, the designated differentiation variable and the
/// cache of successive derivatives
///# Example
/// ```
/// use RustedDerivator::symbolic::symbolic_engine::Expression;
/// let mut expr = Expression::parse_expression("x^3$").unwrap();
/// expr.derive_nth(2).unwrap();
/// // 6x at x = 2
/// assert_eq!(expr.evaluate_derivative_at(2, 2.0).unwrap(), 12.0);
/// let taylor = expr.taylor_series(3).unwrap();
/// println!("{}", taylor);
/// ```
pub mod symbolic_engine;
pub mod taylor_series;
///________________________________________________________________________________________________________________________________
/// fully parenthesized infix text, the indented tree notation and LaTeX
pub mod latex;
pub mod serialize;
pub mod tree_io;
