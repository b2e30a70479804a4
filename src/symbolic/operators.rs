//! # Operator Table
//!
//! The closed set of operators an expression tree may contain: the five binary
//! arithmetic operators, the three unary functions and the little-o remainder
//! marker produced by Taylor expansion.
//!
//! ## Main Structures and Methods
//! - `Operator` - the operator enum, iterable through `strum::IntoEnumIterator`
//! - `name()` / `from_name()` - registered spelling used by the parser and by the persisted notation
//! - `latex_name()` - name of the LaTeX macro the report renders the operator with
//! - `priority()` - binding strength, only used to decide about parentheses in LaTeX
//! - `apply_binary()` / `apply_unary()` - numeric rules used by the evaluator
//!
//! Derivation rules live in `symbolic_derivatives.rs` as one exhaustive `match`.
use crate::symbolic::errors::{ExpressionError, Result};
use crate::symbolic::utils::DEPS;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Operator {
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "*")]
    Multiply,
    #[strum(to_string = "/")]
    Divide,
    #[strum(to_string = "^")]
    Pow,
    #[strum(to_string = "ln")]
    Ln,
    #[strum(to_string = "sin")]
    Sin,
    #[strum(to_string = "cos")]
    Cos,
    /// little-o remainder of a Taylor series, symbolic only
    #[strum(to_string = "o")]
    SmallO,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Operator {
    /// registered spelling, the same string `Display` prints
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Pow => "^",
            Operator::Ln => "ln",
            Operator::Sin => "sin",
            Operator::Cos => "cos",
            Operator::SmallO => "o",
        }
    }

    /// operator registered under `name`, if any
    pub fn from_name(name: &str) -> Option<Operator> {
        Operator::iter().find(|op| op.name() == name)
    }

    pub fn latex_name(&self) -> &'static str {
        match self {
            Operator::Plus => "edplus",
            Operator::Minus => "edminus",
            Operator::Multiply => "edmultiply",
            Operator::Divide => "eddivide",
            Operator::Pow => "edpower",
            Operator::Ln => "edln",
            Operator::Sin => "edsin",
            Operator::Cos => "edcos",
            Operator::SmallO => "edsmallo",
        }
    }

    /// Lower value binds tighter. Function calls carry their own brackets and get 0.
    pub fn priority(&self) -> u8 {
        match self {
            Operator::Plus | Operator::Minus => 3,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Pow => 1,
            Operator::Ln | Operator::Sin | Operator::Cos | Operator::SmallO => 0,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operator::Plus
            | Operator::Minus
            | Operator::Multiply
            | Operator::Divide
            | Operator::Pow => Arity::Binary,
            Operator::Ln | Operator::Sin | Operator::Cos | Operator::SmallO => Arity::Unary,
        }
    }

    pub fn is_unary(&self) -> bool {
        self.arity() == Arity::Unary
    }

    /// false only for the remainder marker
    pub fn is_evaluable(&self) -> bool {
        !matches!(self, Operator::SmallO)
    }

    /// numeric rule of a binary operator
    pub fn apply_binary(&self, left: f64, right: f64) -> Result<f64> {
        match self {
            Operator::Plus => Ok(left + right),
            Operator::Minus => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right.abs() < DEPS {
                    Err(ExpressionError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            Operator::Pow => Ok(left.powf(right)),
            Operator::Ln | Operator::Sin | Operator::Cos | Operator::SmallO => {
                Err(ExpressionError::UnaryWithRightChild)
            }
        }
    }

    /// numeric rule of a unary operator
    pub fn apply_unary(&self, arg: f64) -> Result<f64> {
        match self {
            Operator::Ln => Ok(arg.ln()),
            Operator::Sin => Ok(arg.sin()),
            Operator::Cos => Ok(arg.cos()),
            Operator::SmallO => Err(ExpressionError::RemainderEvaluation),
            binary => Err(ExpressionError::MissingOperand(*binary)),
        }
    }
}
