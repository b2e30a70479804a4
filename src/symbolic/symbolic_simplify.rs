//! # Expression Simplification
//!
//! Bottom-up rewrite of an expression tree producing an independent simplified copy.
//!
//! ## Simplification Strategy
//!
//! 1. **Constant Folding**: a subtree flagged constant is evaluated and replaced by one number
//! 2. **Algebraic Identities**: after simplifying the children the identities of the
//!    current operator are applied:
//!    - `0 * x = x * 0 = 0`, `1 * x = x * 1 = x`
//!    - `c1 * (c2 * x) = (c1 c2) * x` (one level deep only)
//!    - `0 / x = 0`
//!    - `0 + x = x + 0 = x`, `x - 0 = x`
//!    - `x ^ 0 = 1`, `x ^ 1 = x`
//! 3. **Refolding**: a rebuilt node whose children both collapsed to numbers is folded again
//!
//! Every "is zero/one" test uses the `DEPS` tolerance.
//!
//! Division by zero inside a constant subtree does not fail here: the quotient is
//! folded to 0 and a warning is logged. `evaluate` reports the same division as
//! `DivisionByZero`.
use crate::symbolic::errors::{ExpressionError, Result};
use crate::symbolic::expression_tree::{Node, Value};
use crate::symbolic::operators::{Arity, Operator};
use crate::symbolic::variables::VariableTable;
use log::warn;

impl Node {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplified copy of the subtree; `self` is left untouched.
    pub fn simplify(&self) -> Result<Node> {
        if self.constant {
            return fold_constant(self);
        }
        match self.value {
            Value::Number(_) | Value::Variable(_) => Ok(self.clone()),
            Value::Operator(op) => match op.arity() {
                Arity::Binary => {
                    let (l, r) = self.binary_operands()?;
                    let left = l.simplify()?;
                    let right = r.simplify()?;
                    simplify_binary(op, left, right)
                }
                Arity::Unary => {
                    let arg = self.unary_operand()?.simplify()?;
                    rebuild(Node::unary(op, arg))
                }
            },
        }
    }
}

/// Evaluates a constant subtree into a number node.
fn fold_constant(node: &Node) -> Result<Node> {
    Ok(Node::number(fold_value(node)?))
}

/// Value of a constant subtree. A quotient with a divisor within `DEPS` of zero is
/// taken as 0, the operators around it are applied as usual.
fn fold_value(node: &Node) -> Result<f64> {
    match node.value {
        Value::Number(x) => Ok(x),
        Value::Variable(_) => node.evaluate(&VariableTable::new()),
        Value::Operator(op) => match op.arity() {
            Arity::Binary => {
                let (l, r) = node.binary_operands()?;
                let left = fold_value(l)?;
                let right = fold_value(r)?;
                match op.apply_binary(left, right) {
                    Err(ExpressionError::DivisionByZero) => {
                        warn!(
                            "division of {} by zero in a constant subtree, quotient folded to 0",
                            left
                        );
                        Ok(0.0)
                    }
                    other => other,
                }
            }
            Arity::Unary => op.apply_unary(fold_value(node.unary_operand()?)?),
        },
    }
}

fn rebuild(node: Node) -> Result<Node> {
    if node.constant {
        fold_constant(&node)
    } else {
        Ok(node)
    }
}

/// Identities of a binary operator applied to already simplified operands.
fn simplify_binary(op: Operator, left: Node, right: Node) -> Result<Node> {
    match op {
        Operator::Multiply => simplify_multiply(left, right),
        Operator::Divide if left.is_zero_number() => Ok(Node::number(0.0)),
        Operator::Plus if left.is_zero_number() => Ok(right),
        Operator::Plus if right.is_zero_number() => Ok(left),
        Operator::Minus if right.is_zero_number() => Ok(left),
        Operator::Pow if right.is_zero_number() => Ok(Node::number(1.0)),
        Operator::Pow if right.is_one_number() => Ok(left),
        _ => rebuild(Node::binary(op, left, right)),
    }
}

fn simplify_multiply(left: Node, right: Node) -> Result<Node> {
    if left.is_zero_number() || right.is_zero_number() {
        return Ok(Node::number(0.0));
    }
    let (left, right) = coalesce_factors(left, right);
    if left.is_zero_number() {
        return Ok(Node::number(0.0));
    }
    if left.is_one_number() {
        return Ok(right);
    }
    if right.is_one_number() {
        return Ok(left);
    }
    rebuild(Node::binary(Operator::Multiply, left, right))
}

/// `c1 * (c2 * rest)` becomes `(c1 c2) * rest`; anything else is returned as is.
fn coalesce_factors(left: Node, right: Node) -> (Node, Node) {
    let (Some(c1), Some(Operator::Multiply)) = (left.as_number(), right.as_operator()) else {
        return (left, right);
    };
    let Node {
        left: inner_left,
        right: inner_right,
        ..
    } = right;
    match (inner_left, inner_right) {
        (Some(inner_left), Some(rest)) => match inner_left.as_number() {
            Some(c2) => (Node::number(c1 * c2), *rest),
            None => (
                left,
                Node::binary(Operator::Multiply, *inner_left, *rest),
            ),
        },
        (inner_left, inner_right) => (
            left,
            Node::operator(
                Operator::Multiply,
                inner_left.map(|n| *n),
                inner_right.map(|n| *n),
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Node {
        Node::variable(0)
    }

    fn num(v: f64) -> Node {
        Node::number(v)
    }

    fn bin(op: Operator, l: Node, r: Node) -> Node {
        Node::binary(op, l, r)
    }

    #[test]
    fn test_multiply_identities() {
        assert_eq!(bin(Operator::Multiply, x(), num(1.0)).simplify().unwrap(), x());
        assert_eq!(bin(Operator::Multiply, num(1.0), x()).simplify().unwrap(), x());
        assert_eq!(
            bin(Operator::Multiply, x(), num(0.0)).simplify().unwrap(),
            num(0.0)
        );
        assert_eq!(
            bin(Operator::Multiply, num(0.0), x()).simplify().unwrap(),
            num(0.0)
        );
    }

    #[test]
    fn test_additive_and_power_identities() {
        assert_eq!(bin(Operator::Plus, x(), num(0.0)).simplify().unwrap(), x());
        assert_eq!(bin(Operator::Plus, num(0.0), x()).simplify().unwrap(), x());
        assert_eq!(bin(Operator::Minus, x(), num(0.0)).simplify().unwrap(), x());
        assert_eq!(bin(Operator::Pow, x(), num(0.0)).simplify().unwrap(), num(1.0));
        assert_eq!(bin(Operator::Pow, x(), num(1.0)).simplify().unwrap(), x());
        assert_eq!(
            bin(Operator::Divide, num(0.0), x()).simplify().unwrap(),
            num(0.0)
        );
        // 0 - x is not an identity
        let neg = bin(Operator::Minus, num(0.0), x());
        assert_eq!(neg.simplify().unwrap(), neg);
    }

    #[test]
    fn test_tolerance_applies() {
        assert_eq!(bin(Operator::Multiply, x(), num(1e-12)).simplify().unwrap(), num(0.0));
        assert_eq!(bin(Operator::Multiply, x(), num(1.0 + 1e-12)).simplify().unwrap(), x());
    }

    #[test]
    fn test_constant_folding() {
        let tree = bin(
            Operator::Plus,
            bin(Operator::Multiply, num(2.0), num(3.0)),
            Node::unary(Operator::Cos, num(0.0)),
        );
        assert_eq!(tree.simplify().unwrap(), num(7.0));
    }

    #[test]
    fn test_refold_after_children_collapse() {
        // sin(x * 0) -> sin(0) -> 0
        let tree = Node::unary(Operator::Sin, bin(Operator::Multiply, x(), num(0.0)));
        assert_eq!(tree.simplify().unwrap(), num(0.0));
        // (x ^ 0) + 2 -> 1 + 2 -> 3
        let tree = bin(Operator::Plus, bin(Operator::Pow, x(), num(0.0)), num(2.0));
        assert_eq!(tree.simplify().unwrap(), num(3.0));
    }

    #[test]
    fn test_coalesce_one_level() {
        // 2 * (3 * x) -> 6 * x
        let tree = bin(Operator::Multiply, num(2.0), bin(Operator::Multiply, num(3.0), x()));
        assert_eq!(
            tree.simplify().unwrap(),
            bin(Operator::Multiply, num(6.0), x())
        );
        // 0.5 * (2 * x) -> x
        let tree = bin(Operator::Multiply, num(0.5), bin(Operator::Multiply, num(2.0), x()));
        assert_eq!(tree.simplify().unwrap(), x());
        // (x * 3) * 2 is left alone
        let tree = bin(Operator::Multiply, bin(Operator::Multiply, x(), num(3.0)), num(2.0));
        assert_eq!(tree.simplify().unwrap(), tree);
        // 2 * (x * 3) is left alone
        let tree = bin(Operator::Multiply, num(2.0), bin(Operator::Multiply, x(), num(3.0)));
        assert_eq!(tree.simplify().unwrap(), tree);
    }

    #[test]
    fn test_constant_division_by_zero_folds_to_zero() {
        let tree = bin(Operator::Divide, num(1.0), num(0.0));
        assert_eq!(tree.simplify().unwrap(), num(0.0));
        assert_eq!(
            tree.evaluate(&VariableTable::new()),
            Err(ExpressionError::DivisionByZero)
        );
        // only the quotient is zeroed, the operators around it still apply
        let tree = Node::unary(Operator::Cos, bin(Operator::Divide, num(1.0), num(0.0)));
        assert_eq!(tree.simplify().unwrap(), num(1.0));
        let tree = bin(
            Operator::Plus,
            bin(Operator::Multiply, num(3.0), bin(Operator::Divide, num(1.0), num(0.0))),
            num(5.0),
        );
        assert_eq!(tree.simplify().unwrap(), num(5.0));
        // non-constant divisor that is literally zero is not folded
        let tree = bin(Operator::Divide, x(), num(0.0));
        assert_eq!(tree.simplify().unwrap(), tree);
    }

    #[test]
    fn test_input_untouched_and_remainder_kept() {
        let tree = bin(
            Operator::Plus,
            bin(Operator::Multiply, num(1.0), x()),
            Node::unary(Operator::SmallO, bin(Operator::Pow, x(), num(1.0))),
        );
        let before = tree.clone();
        let simplified = tree.simplify().unwrap();
        assert_eq!(tree, before);
        assert_eq!(
            simplified,
            bin(Operator::Plus, x(), Node::unary(Operator::SmallO, x()))
        );
    }

    #[test]
    fn test_malformed_tree_fails() {
        let tree = bin(Operator::Plus, Node::operator(Operator::Sin, Some(x()), Some(x())), x());
        assert_eq!(tree.simplify(), Err(ExpressionError::UnaryWithRightChild));
    }
}
