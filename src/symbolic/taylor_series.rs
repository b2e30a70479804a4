//! TAYLOR SERIES EXPANSION
//!
//! f(x) = f(x0) + sum_{i=1..n} f^(i)(x0)/i! (x - x0)^i + o((x - x0)^n)
//! around the current value x0 of the differentiation variable.
use crate::symbolic::errors::Result;
use crate::symbolic::expression_tree::Node;
use crate::symbolic::operators::Operator;
use crate::symbolic::symbolic_engine::Expression;
use crate::symbolic::utils::factorial;
use log::{debug, info};

impl Expression {
    /// Taylor expansion of order `order` around the current value of the differentiation
    /// variable.
    ///
    /// # Arguments
    /// * `order` - highest power of `(x - x0)` kept in the polynomial
    ///
    /// # Returns
    /// A new, simplified expression with a copy of the variable table. Its last summand
    /// is the little-o remainder, so it must go through `without_remainder()` before
    /// numeric evaluation.
    pub fn taylor_series(&mut self, order: usize) -> Result<Expression> {
        let var = self.diff_variable();
        let x0 = self.diff_variable_value()?;
        self.derive_nth(order)?;

        let shift = || Node::binary(Operator::Minus, Node::variable(var), Node::number(x0));

        let mut series = Node::number(self.evaluate_derivative_at(0, x0)?);
        for i in 1..=order {
            let coefficient = self.evaluate_derivative_at(i, x0)? / factorial(i);
            debug!("Taylor coefficient {} at x0 = {}: {}", i, x0, coefficient);
            let term = Node::binary(
                Operator::Multiply,
                Node::number(coefficient),
                Node::binary(Operator::Pow, shift(), Node::number(i as f64)),
            );
            series = Node::binary(Operator::Plus, series, term);
        }
        let remainder = Node::unary(
            Operator::SmallO,
            Node::binary(Operator::Pow, shift(), Node::number(order as f64)),
        );
        let tree = Node::binary(Operator::Plus, series, remainder).simplify()?;
        info!("Taylor series of order {} built around {}", order, x0);
        Ok(Expression::from_tree(tree, self.variables().clone(), var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::errors::ExpressionError;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial_is_reproduced() {
        let mut expr = Expression::parse_expression("x^3-2*x+1$").unwrap();
        expr.set_diff_variable_value(1.0).unwrap();
        let taylor = expr.taylor_series(3).unwrap();
        assert!(taylor.root().unwrap().contains_remainder());
        let mut poly = taylor.without_remainder().unwrap();
        for x in [-1.0_f64, 0.5, 2.0] {
            let exact = x.powi(3) - 2.0 * x + 1.0;
            let tree = poly.root().unwrap().clone();
            assert_relative_eq!(poly.evaluate_at(&tree, x).unwrap(), exact, epsilon = 1e-9);
        }
        assert_eq!(taylor.evaluate(), Err(ExpressionError::RemainderEvaluation));
    }

    #[test]
    fn test_exponential_like_series_around_zero() {
        // derivatives of 1/(1-x) at 0 are i!, so every coefficient is 1
        let mut expr = Expression::parse_expression("1/(1-x)$").unwrap();
        let taylor = expr.taylor_series(4).unwrap();
        let mut poly = taylor.without_remainder().unwrap();
        let tree = poly.root().unwrap().clone();
        let x = 0.1_f64;
        let expected = 1.0 + x + x * x + x.powi(3) + x.powi(4);
        assert_relative_eq!(poly.evaluate_at(&tree, x).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_order_zero() {
        let mut expr = Expression::parse_expression("cos(x)$").unwrap();
        let taylor = expr.taylor_series(0).unwrap();
        let poly = taylor.without_remainder().unwrap();
        assert_eq!(poly.root().unwrap(), &Node::number(1.0));
    }

    #[test]
    fn test_reuses_cached_derivatives() {
        let mut expr = Expression::parse_expression("sin(x)$").unwrap();
        expr.derive_nth(5).unwrap();
        let _ = expr.taylor_series(3).unwrap();
        assert_eq!(expr.derivation_steps(), 5);
    }

    #[test]
    fn test_singular_point_fails() {
        let mut expr = Expression::parse_expression("ln(x)$").unwrap();
        assert_eq!(expr.taylor_series(2), Err(ExpressionError::DivisionByZero));
    }
}
