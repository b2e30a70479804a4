//! # Analytical Differentiation
//!
//! Structural recursion computing the derivative of an expression tree with respect
//! to one variable slot. One exhaustive `match` over the operator table holds every rule:
//!
//! | operator  | derivative                                   |
//! |-----------|----------------------------------------------|
//! | `u + v`   | `u' + v'`                                    |
//! | `u - v`   | `u' - v'`                                    |
//! | `u * v`   | `u v' + v u'`                                |
//! | `u / v`   | `(v u' - u v') / v^2`                        |
//! | `u ^ c`   | `c u^(c - 1) u'` when the exponent is constant |
//! | `u ^ v`   | `u^v (v ln(u))'` otherwise                   |
//! | `ln(u)`   | `u' / u`                                     |
//! | `sin(u)`  | `cos(u) u'`                                  |
//! | `cos(u)`  | `(-1 sin(u)) u'`                             |
//! | `o(u)`    | `o(u)`                                       |
//!
//! The input is never modified: operands that appear in the result are cloned. Each
//! intermediate derivative is simplified before it is combined into the parent, which
//! keeps repeated derivatives from growing without bound.
use crate::symbolic::errors::Result;
use crate::symbolic::expression_tree::{Node, Value};
use crate::symbolic::operators::Operator;

impl Node {
    /// Simplified derivative of the subtree with respect to the variable in slot `var`.
    /// Any other variable is treated as a constant.
    pub fn derive(&self, var: usize) -> Result<Node> {
        match self.value {
            Value::Number(_) => Ok(Node::number(0.0)),
            Value::Variable(index) if index == var => Ok(Node::number(1.0)),
            Value::Variable(_) => Ok(Node::number(0.0)),
            Value::Operator(op) => derive_operator(self, op, var)?.simplify(),
        }
    }
}

fn derive_operator(node: &Node, op: Operator, var: usize) -> Result<Node> {
    use Operator::*;
    let tree = match op {
        Plus | Minus => {
            let (u, v) = node.binary_operands()?;
            Node::binary(op, u.derive(var)?, v.derive(var)?)
        }
        Multiply => {
            let (u, v) = node.binary_operands()?;
            Node::binary(
                Plus,
                Node::binary(Multiply, u.clone(), v.derive(var)?),
                Node::binary(Multiply, v.clone(), u.derive(var)?),
            )
        }
        Divide => {
            let (u, v) = node.binary_operands()?;
            Node::binary(
                Divide,
                Node::binary(
                    Minus,
                    Node::binary(Multiply, v.clone(), u.derive(var)?),
                    Node::binary(Multiply, u.clone(), v.derive(var)?),
                ),
                Node::binary(Pow, v.clone(), Node::number(2.0)),
            )
        }
        Pow => {
            let (u, v) = node.binary_operands()?;
            if v.is_constant() {
                let reduced = Node::binary(Minus, v.clone(), Node::number(1.0));
                Node::binary(
                    Multiply,
                    Node::binary(Multiply, v.clone(), Node::binary(Pow, u.clone(), reduced)),
                    u.derive(var)?,
                )
            } else {
                // logarithmic differentiation
                let exponent_log = Node::binary(Multiply, v.clone(), Node::unary(Ln, u.clone()));
                Node::binary(Multiply, node.clone(), exponent_log.derive(var)?)
            }
        }
        Ln => {
            let u = node.unary_operand()?;
            Node::binary(Divide, u.derive(var)?, u.clone())
        }
        Sin => {
            let u = node.unary_operand()?;
            Node::binary(Multiply, Node::unary(Cos, u.clone()), u.derive(var)?)
        }
        Cos => {
            let u = node.unary_operand()?;
            Node::binary(
                Multiply,
                Node::binary(Multiply, Node::number(-1.0), Node::unary(Sin, u.clone())),
                u.derive(var)?,
            )
        }
        SmallO => {
            node.unary_operand()?;
            node.clone()
        }
    };
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::variables::VariableTable;
    use approx::assert_relative_eq;

    fn x() -> Node {
        Node::variable(0)
    }

    fn num(v: f64) -> Node {
        Node::number(v)
    }

    fn at(node: &Node, value: f64) -> f64 {
        let mut table = VariableTable::new();
        table.register("x");
        table.register("y");
        table.set_value(0, value).unwrap();
        table.set_value(1, 0.3).unwrap();
        node.evaluate(&table).unwrap()
    }

    #[test]
    fn test_leaves() {
        assert_eq!(num(5.0).derive(0).unwrap(), num(0.0));
        assert_eq!(x().derive(0).unwrap(), num(1.0));
        assert_eq!(Node::variable(1).derive(0).unwrap(), num(0.0));
    }

    #[test]
    fn test_linear_and_product() {
        // 3 * x -> 3
        let tree = Node::binary(Operator::Multiply, num(3.0), x());
        assert_eq!(tree.derive(0).unwrap(), num(3.0));
        // x * x -> x + x
        let tree = Node::binary(Operator::Multiply, x(), x());
        assert_eq!(
            tree.derive(0).unwrap(),
            Node::binary(Operator::Plus, x(), x())
        );
    }

    #[test]
    fn test_constant_power_rule() {
        // x ^ 3 -> 3 * x ^ 2
        let tree = Node::binary(Operator::Pow, x(), num(3.0));
        let d = tree.derive(0).unwrap();
        assert_eq!(
            d,
            Node::binary(
                Operator::Multiply,
                num(3.0),
                Node::binary(Operator::Pow, x(), num(2.0))
            )
        );
        assert_relative_eq!(at(&d, 2.0), 12.0);
    }

    #[test]
    fn test_quotient_rule() {
        // x / (x + 1) -> 1 / (x + 1)^2
        let tree = Node::binary(
            Operator::Divide,
            x(),
            Node::binary(Operator::Plus, x(), num(1.0)),
        );
        let d = tree.derive(0).unwrap();
        for v in [0.0, 1.0, 2.5] {
            assert_relative_eq!(at(&d, v), 1.0 / ((v + 1.0) * (v + 1.0)), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_general_power_rule() {
        // x ^ x -> x^x (ln(x) + 1)
        let tree = Node::binary(Operator::Pow, x(), x());
        let d = tree.derive(0).unwrap();
        for v in [0.5_f64, 1.0, 2.0] {
            assert_relative_eq!(at(&d, v), v.powf(v) * (v.ln() + 1.0), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_functions() {
        let sin = Node::unary(Operator::Sin, x());
        let cos = Node::unary(Operator::Cos, x());
        let ln = Node::unary(Operator::Ln, x());
        for v in [0.3_f64, 1.2, 2.0] {
            assert_relative_eq!(at(&sin.derive(0).unwrap(), v), v.cos(), epsilon = 1e-12);
            assert_relative_eq!(at(&cos.derive(0).unwrap(), v), -v.sin(), epsilon = 1e-12);
            assert_relative_eq!(at(&ln.derive(0).unwrap(), v), 1.0 / v, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_other_variable_is_constant() {
        // x * y -> y
        let tree = Node::binary(Operator::Multiply, x(), Node::variable(1));
        assert_eq!(tree.derive(0).unwrap(), Node::variable(1));
    }

    #[test]
    fn test_remainder_derives_to_itself() {
        let tree = Node::unary(Operator::SmallO, Node::binary(Operator::Pow, x(), num(4.0)));
        assert_eq!(tree.derive(0).unwrap(), tree);
    }

    #[test]
    fn test_input_untouched() {
        let tree = Node::binary(Operator::Multiply, Node::unary(Operator::Sin, x()), x());
        let before = tree.clone();
        let _ = tree.derive(0).unwrap();
        assert_eq!(tree, before);
    }
}
