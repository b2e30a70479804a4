//! # Expression Tree
//!
//! Binary tree of tagged values shared by the parser, the differentiator, the
//! simplifier and the evaluator.
//!
//! ## Main Structures and Methods
//!
//! ### `Value`
//! Payload of a node: a numeric literal, a reference to a slot of the variable
//! table, or an operator of the closed operator table.
//!
//! ### `Node`
//! Owns its value and up to two children (`Option<Box<Node>>`). Binary operators use
//! both children, unary operators the left one only, leaves none. Every node also
//! caches the `constant` flag: the subtree contains no variable reference and no
//! remainder marker, so it can be collapsed to one number right away.
//!
//! Nodes are never shared. Transforms take `&Node` and build a fresh tree, reusing
//! parts of the input through `clone()` (a deep copy of the boxed children).
//!
//! ### Key Methods
//! - `number()`, `variable()`, `operator()`, `binary()`, `unary()` - constructors computing the flag
//! - `binary_operands()`, `unary_operand()` - checked access used by every recursive transform
//! - `validate()`, `validate_against()` - structural invariants and variable index ranges
//! - `without_remainder()` - the Taylor polynomial with its little-o term dropped
use crate::symbolic::errors::{ExpressionError, Result};
use crate::symbolic::operators::{Arity, Operator};
use crate::symbolic::utils::{is_one, is_zero};
use crate::symbolic::variables::VariableTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    /// index into the owning expression's variable table
    Variable(usize),
    Operator(Operator),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) value: Value,
    pub(crate) constant: bool,
    pub(crate) left: Option<Box<Node>>,
    pub(crate) right: Option<Box<Node>>,
}

impl Node {
    pub fn number(value: f64) -> Node {
        Node {
            value: Value::Number(value),
            constant: true,
            left: None,
            right: None,
        }
    }

    pub fn variable(index: usize) -> Node {
        Node {
            value: Value::Variable(index),
            constant: false,
            left: None,
            right: None,
        }
    }

    /// Operator node over the given children. The node is constant iff it has at
    /// least one child, every present child is constant and the operator can be
    /// evaluated. No arity check here, see `validate`.
    pub fn operator(op: Operator, left: Option<Node>, right: Option<Node>) -> Node {
        let has_children = left.is_some() || right.is_some();
        let children_constant = left.as_ref().is_none_or(|n| n.constant)
            && right.as_ref().is_none_or(|n| n.constant);
        Node {
            value: Value::Operator(op),
            constant: op.is_evaluable() && has_children && children_constant,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn binary(op: Operator, left: Node, right: Node) -> Node {
        Node::operator(op, Some(left), Some(right))
    }

    pub fn unary(op: Operator, arg: Node) -> Node {
        Node::operator(op, Some(arg), None)
    }

    /// Rebuilds a node from a value and children, recomputing the constant flag.
    /// Leaves with children are rejected.
    pub fn from_parts(value: Value, left: Option<Node>, right: Option<Node>) -> Result<Node> {
        match value {
            Value::Number(x) if left.is_none() && right.is_none() => Ok(Node::number(x)),
            Value::Variable(i) if left.is_none() && right.is_none() => Ok(Node::variable(i)),
            Value::Number(_) | Value::Variable(_) => Err(ExpressionError::LeafWithChildren),
            Value::Operator(op) => Ok(Node::operator(op, left, right)),
        }
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn is_constant(&self) -> bool {
        self.constant
    }

    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            Value::Number(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<usize> {
        match self.value {
            Value::Variable(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self.value {
            Value::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// number node within `DEPS` of zero
    pub fn is_zero_number(&self) -> bool {
        self.as_number().is_some_and(is_zero)
    }

    /// number node within `DEPS` of one
    pub fn is_one_number(&self) -> bool {
        self.as_number().is_some_and(is_one)
    }

    /// Both operands of a binary operator node.
    pub fn binary_operands(&self) -> Result<(&Node, &Node)> {
        match (self.left(), self.right()) {
            (Some(l), Some(r)) => Ok((l, r)),
            (None, None) => Err(ExpressionError::OperatorWithoutChildren),
            _ => Err(self.missing_operand()),
        }
    }

    /// Single operand of a unary operator node.
    pub fn unary_operand(&self) -> Result<&Node> {
        match (self.left(), self.right()) {
            (Some(arg), None) => Ok(arg),
            (None, None) => Err(ExpressionError::OperatorWithoutChildren),
            (_, Some(_)) => Err(ExpressionError::UnaryWithRightChild),
        }
    }

    fn missing_operand(&self) -> ExpressionError {
        match self.as_operator() {
            Some(op) => ExpressionError::MissingOperand(op),
            None => ExpressionError::LeafWithChildren,
        }
    }

    /// Checks the structural invariants of the whole subtree.
    pub fn validate(&self) -> Result<()> {
        match self.value {
            Value::Number(_) | Value::Variable(_) => {
                if self.left.is_some() || self.right.is_some() {
                    return Err(ExpressionError::LeafWithChildren);
                }
                Ok(())
            }
            Value::Operator(op) => match op.arity() {
                Arity::Binary => {
                    let (l, r) = self.binary_operands()?;
                    l.validate()?;
                    r.validate()
                }
                Arity::Unary => self.unary_operand()?.validate(),
            },
        }
    }

    /// Structural invariants plus every variable index in range of `variables`.
    pub fn validate_against(&self, variables: &VariableTable) -> Result<()> {
        self.validate()?;
        self.check_variables(variables)
    }

    fn check_variables(&self, variables: &VariableTable) -> Result<()> {
        if let Value::Variable(index) = self.value {
            variables.get(index)?;
        }
        if let Some(l) = self.left() {
            l.check_variables(variables)?;
        }
        if let Some(r) = self.right() {
            r.check_variables(variables)?;
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        1 + self.left().map_or(0, Node::node_count) + self.right().map_or(0, Node::node_count)
    }

    pub fn depth(&self) -> usize {
        1 + self
            .left()
            .map_or(0, Node::depth)
            .max(self.right().map_or(0, Node::depth))
    }

    /// true if a little-o marker occurs anywhere in the subtree
    pub fn contains_remainder(&self) -> bool {
        self.as_operator() == Some(Operator::SmallO)
            || self.left().is_some_and(Node::contains_remainder)
            || self.right().is_some_and(Node::contains_remainder)
    }

    /// Copy of the tree with every little-o term replaced by 0, then simplified, so
    /// the remainder summand of a Taylor series disappears.
    pub fn without_remainder(&self) -> Result<Node> {
        self.zero_remainder().simplify()
    }

    fn zero_remainder(&self) -> Node {
        match self.value {
            Value::Operator(Operator::SmallO) => Node::number(0.0),
            Value::Operator(op) => Node::operator(
                op,
                self.left().map(Node::zero_remainder),
                self.right().map(Node::zero_remainder),
            ),
            _ => self.clone(),
        }
    }
}
