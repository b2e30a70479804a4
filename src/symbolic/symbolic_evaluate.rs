//! Numeric evaluation of an expression tree against a variable table.
use crate::symbolic::errors::{ExpressionError, Result};
use crate::symbolic::expression_tree::{Node, Value};
use crate::symbolic::operators::Arity;
use crate::symbolic::variables::VariableTable;

impl Node {
    /// Evaluates the subtree with the current values of `variables`.
    ///
    /// Division by a divisor within `DEPS` of zero, an out-of-range variable index and
    /// the little-o marker are errors. `pow` and `ln` outside their real domain give NaN.
    pub fn evaluate(&self, variables: &VariableTable) -> Result<f64> {
        match self.value {
            Value::Number(x) => Ok(x),
            Value::Variable(index) => variables.value(index),
            Value::Operator(op) => {
                if !op.is_evaluable() {
                    return Err(ExpressionError::RemainderEvaluation);
                }
                match op.arity() {
                    Arity::Binary => {
                        let (l, r) = self.binary_operands()?;
                        let left = l.evaluate(variables)?;
                        let right = r.evaluate(variables)?;
                        op.apply_binary(left, right)
                    }
                    Arity::Unary => {
                        let arg = self.unary_operand()?.evaluate(variables)?;
                        op.apply_unary(arg)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::operators::Operator;
    use approx::assert_relative_eq;

    fn table(x: f64) -> VariableTable {
        let mut t = VariableTable::new();
        let i = t.register("x");
        t.set_value(i, x).unwrap();
        t
    }

    #[test]
    fn test_evaluate_polynomial() {
        // x^2 + 3*x
        let tree = Node::binary(
            Operator::Plus,
            Node::binary(Operator::Pow, Node::variable(0), Node::number(2.0)),
            Node::binary(Operator::Multiply, Node::number(3.0), Node::variable(0)),
        );
        assert_relative_eq!(tree.evaluate(&table(2.0)).unwrap(), 10.0);
        assert_relative_eq!(tree.evaluate(&table(-1.0)).unwrap(), -2.0);
    }

    #[test]
    fn test_evaluate_functions() {
        let tree = Node::binary(
            Operator::Multiply,
            Node::unary(Operator::Sin, Node::variable(0)),
            Node::unary(Operator::Ln, Node::variable(0)),
        );
        let x = 2.5_f64;
        assert_relative_eq!(tree.evaluate(&table(x)).unwrap(), x.sin() * x.ln());
    }

    #[test]
    fn test_evaluate_failures() {
        let div = Node::binary(Operator::Divide, Node::number(1.0), Node::variable(0));
        assert_eq!(div.evaluate(&table(0.0)), Err(ExpressionError::DivisionByZero));

        let remainder = Node::unary(Operator::SmallO, Node::variable(0));
        assert_eq!(
            remainder.evaluate(&table(1.0)),
            Err(ExpressionError::RemainderEvaluation)
        );

        let dangling = Node::variable(4);
        assert_eq!(
            dangling.evaluate(&table(1.0)),
            Err(ExpressionError::VariableOutOfRange { index: 4, len: 1 })
        );

        let broken = Node::operator(Operator::Cos, None, None);
        assert_eq!(
            broken.evaluate(&table(1.0)),
            Err(ExpressionError::OperatorWithoutChildren)
        );
    }
}
