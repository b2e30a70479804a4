//! # Symbolic Engine Module
//!
//! The `Expression` aggregate: an expression tree, the variable table its variable
//! nodes point into, the designated differentiation variable and the cache of
//! successive derivatives.
//!
//! ## Purpose
//!
//! The engine allows users to:
//! - Parse an infix expression (`Expression::parse_expression`, `Expression::from_file`)
//! - Differentiate it any number of times, reusing derivatives already computed
//! - Simplify it and evaluate it numerically
//! - Expand it into a Taylor series around the current value of the differentiation variable
//!
//! ## Main Structures and Methods
//!
//! ### `Expression` Struct
//! - `derive_nth(n)` - incremental n-th derivative, derivatives `1..=k` already known are reused
//! - `derivative(n)` - borrowed access to the n-th derivative (0 is the expression itself)
//! - `evaluate()` / `evaluate_at()` - numeric value with the table as is, or at a given point
//! - `simplify()` - new simplified expression sharing a copy of the variable table
//! - `taylor_series(order)` - see `taylor_series.rs`
//!
//! ## Interesting Code Features
//!
//! 1. **Owned trees**: every transform builds a new tree, operands are deep-cloned, so
//!    expressions never alias each other's nodes
//! 2. **Split borrows**: `evaluate_derivative_at` reads a cached tree while temporarily
//!    overwriting a slot of the variable table of the same expression
use crate::symbolic::errors::{ExpressionError, Result};
use crate::symbolic::expression_tree::Node;
use crate::symbolic::variables::VariableTable;
use log::{debug, info};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expression {
    tree: Option<Node>,
    variables: VariableTable,
    /// slot of the variable used by differentiation, Taylor expansion and plotting
    diff_variable: usize,
    /// `derivatives[i]` is the derivative of order `i + 1`
    derivatives: Vec<Node>,
    /// number of single differentiation steps performed so far
    derivation_steps: usize,
}

impl Expression {
    /// Empty expression, without a tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expression over an existing tree; the tree is validated against the table.
    pub fn from_parts(tree: Node, variables: VariableTable) -> Result<Self> {
        tree.validate_against(&variables)?;
        Ok(Self::from_tree(tree, variables, 0))
    }

    pub(crate) fn from_tree(tree: Node, variables: VariableTable, diff_variable: usize) -> Self {
        Expression {
            tree: Some(tree),
            variables,
            diff_variable,
            derivatives: Vec::new(),
            derivation_steps: 0,
        }
    }

    /// Reads the whole file and parses its content.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ExpressionError::Io(format!("{}: {}", path.display(), e)))?;
        info!("expression loaded from {}", path.display());
        Self::parse_expression(&text)
    }

    pub fn tree(&self) -> Option<&Node> {
        self.tree.as_ref()
    }

    /// Root of the tree, `EmptyExpression` if there is none.
    pub fn root(&self) -> Result<&Node> {
        self.tree.as_ref().ok_or(ExpressionError::EmptyExpression)
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn diff_variable(&self) -> usize {
        self.diff_variable
    }

    pub fn diff_variable_name(&self) -> Result<&str> {
        self.variables.name(self.diff_variable)
    }

    /// Designates the differentiation variable by name. Choosing another variable
    /// drops the cached derivatives.
    pub fn set_diff_variable(&mut self, name: &str) -> Result<()> {
        let index = self
            .variables
            .index_of(name)
            .ok_or_else(|| ExpressionError::UnknownVariable(name.to_string()))?;
        if index != self.diff_variable {
            self.diff_variable = index;
            self.derivatives.clear();
        }
        Ok(())
    }

    pub fn set_variable_value(&mut self, name: &str, value: f64) -> Result<()> {
        let index = self
            .variables
            .index_of(name)
            .ok_or_else(|| ExpressionError::UnknownVariable(name.to_string()))?;
        self.variables.set_value(index, value)
    }

    pub fn diff_variable_value(&self) -> Result<f64> {
        self.variables.value(self.diff_variable)
    }

    pub fn set_diff_variable_value(&mut self, value: f64) -> Result<()> {
        self.variables.set_value(self.diff_variable, value)
    }

    /// Structural invariants of the tree and of every cached derivative, plus
    /// variable indices in range.
    pub fn validate(&self) -> Result<()> {
        self.root()?.validate_against(&self.variables)?;
        for derivative in &self.derivatives {
            derivative.validate_against(&self.variables)?;
        }
        Ok(())
    }

    /// Value of the expression with the current variable values.
    pub fn evaluate(&self) -> Result<f64> {
        self.root()?.evaluate(&self.variables)
    }

    /// Evaluates `node` (built over this expression's variable table) with the
    /// differentiation variable set to `x`. The previous value is restored.
    pub fn evaluate_at(&mut self, node: &Node, x: f64) -> Result<f64> {
        self.variables
            .with_value(self.diff_variable, x, |table| node.evaluate(table))
    }

    /// Evaluates the derivative of order `n` (0 is the expression itself) at `x`.
    pub fn evaluate_derivative_at(&mut self, n: usize, x: f64) -> Result<f64> {
        let node = select_derivative(&self.tree, &self.derivatives, n)?;
        self.variables
            .with_value(self.diff_variable, x, |table| node.evaluate(table))
    }

    /// New expression holding the simplified tree.
    pub fn simplify(&self) -> Result<Expression> {
        let tree = self.root()?.simplify()?;
        Ok(Self::from_tree(tree, self.variables.clone(), self.diff_variable))
    }

    /// New expression holding the first derivative, without touching the cache.
    pub fn derive(&self) -> Result<Expression> {
        let tree = self.root()?.derive(self.diff_variable)?;
        Ok(Self::from_tree(tree, self.variables.clone(), self.diff_variable))
    }

    /// Makes sure derivatives `1..=n` are cached.
    ///
    /// # Arguments
    /// * `n` - highest order required
    ///
    /// Only the missing orders are computed, each one from the previous one. Asking
    /// again for an order already reached does nothing.
    pub fn derive_nth(&mut self, n: usize) -> Result<()> {
        let already = self.derivatives.len();
        if n <= already {
            return Ok(());
        }
        for order in already + 1..=n {
            let previous = match self.derivatives.last() {
                Some(last) => last,
                None => self.root()?,
            };
            let next = previous.derive(self.diff_variable)?;
            debug!(
                "derivative of order {}: {} nodes",
                order,
                next.node_count()
            );
            self.derivatives.push(next);
            self.derivation_steps += 1;
        }
        info!("derivatives up to order {} computed", n);
        Ok(())
    }

    /// Derivative of order `n`; order 0 is the expression itself.
    pub fn derivative(&self, n: usize) -> Result<&Node> {
        select_derivative(&self.tree, &self.derivatives, n)
    }

    /// Derivative of order `n` as a standalone expression.
    pub fn derivative_expression(&self, n: usize) -> Result<Expression> {
        let tree = self.derivative(n)?.clone();
        Ok(Self::from_tree(tree, self.variables.clone(), self.diff_variable))
    }

    /// cached derivatives, first order first
    pub fn derivatives(&self) -> &[Node] {
        &self.derivatives
    }

    pub fn derivation_steps(&self) -> usize {
        self.derivation_steps
    }

    /// Copy without little-o terms, evaluable as a plain polynomial.
    pub fn without_remainder(&self) -> Result<Expression> {
        let tree = self.root()?.without_remainder()?;
        Ok(Self::from_tree(tree, self.variables.clone(), self.diff_variable))
    }
}

fn select_derivative<'a>(
    tree: &'a Option<Node>,
    derivatives: &'a [Node],
    n: usize,
) -> Result<&'a Node> {
    if n == 0 {
        return tree.as_ref().ok_or(ExpressionError::EmptyExpression);
    }
    derivatives
        .get(n - 1)
        .ok_or(ExpressionError::DerivativeOutOfRange {
            requested: n,
            available: derivatives.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_expression() {
        let mut expr = Expression::new();
        assert_eq!(expr.evaluate(), Err(ExpressionError::EmptyExpression));
        assert_eq!(expr.derive_nth(2), Err(ExpressionError::EmptyExpression));
        assert!(expr.simplify().is_err());
    }

    #[test]
    fn test_derive_nth_caches() {
        let mut expr = Expression::parse_expression("x^4$").unwrap();
        expr.derive_nth(2).unwrap();
        assert_eq!(expr.derivation_steps(), 2);
        expr.derive_nth(1).unwrap();
        expr.derive_nth(2).unwrap();
        assert_eq!(expr.derivation_steps(), 2);
        assert_relative_eq!(expr.evaluate_derivative_at(2, 1.0).unwrap(), 12.0);
        assert_eq!(
            expr.derivative(3),
            Err(ExpressionError::DerivativeOutOfRange {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_evaluate_at_restores_value() {
        let mut expr = Expression::parse_expression("x*x+1").unwrap();
        expr.set_variable_value("x", 3.0).unwrap();
        let tree = expr.root().unwrap().clone();
        assert_relative_eq!(expr.evaluate_at(&tree, 2.0).unwrap(), 5.0);
        assert_relative_eq!(expr.evaluate().unwrap(), 10.0);
    }

    #[test]
    fn test_diff_variable_selection() {
        let mut expr = Expression::parse_expression("x*y$").unwrap();
        expr.derive_nth(1).unwrap();
        expr.set_diff_variable("y").unwrap();
        assert!(expr.derivatives().is_empty());
        expr.derive_nth(1).unwrap();
        assert_eq!(expr.derivative(1).unwrap(), &Node::variable(0));
        assert_eq!(
            expr.set_diff_variable("z"),
            Err(ExpressionError::UnknownVariable("z".to_string()))
        );
    }

    #[test]
    fn test_from_parts_validates() {
        let mut table = VariableTable::new();
        table.register("x");
        assert!(Expression::from_parts(Node::variable(0), table.clone()).is_ok());
        assert_eq!(
            Expression::from_parts(Node::variable(2), table),
            Err(ExpressionError::VariableOutOfRange { index: 2, len: 1 })
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        writeln!(file, "sin(x)+2").unwrap();
        let expr = Expression::from_file(file.path()).unwrap();
        assert_relative_eq!(expr.evaluate().unwrap(), 2.0);
        assert!(matches!(
            Expression::from_file("/definitely/not/here.txt"),
            Err(ExpressionError::Io(_))
        ));
    }
}
