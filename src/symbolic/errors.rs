//! # Errors of the symbolic engine
//!
//! Every core operation (parse, derive, simplify, evaluate, Taylor expansion, load/store)
//! returns [`Result`]. The variants fall into four families:
//!
//! - **syntax**: the parser rejected the input; carries the byte offset and a
//!   printable window of the input with a caret under the failing character
//! - **domain**: a numeric evaluation cannot produce a value (division by a
//!   near-zero divisor, an out-of-range variable slot, the little-o remainder)
//! - **structure**: a malformed tree, typically coming from a hand-edited
//!   persisted file
//! - **i/o**: the text source or the persistence layer failed
//!
//! Allocation failure has no variant: partially built subtrees are owned `Box`es
//! which are dropped on every early `?` return.
use crate::symbolic::operators::Operator;
use std::fmt;

/// Error type shared by all the symbolic modules.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// grammar violation found by the parser
    Syntax {
        offset: usize,
        message: String,
        context: String,
    },
    /// divisor within `DEPS` of zero during evaluation
    DivisionByZero,
    /// a variable reference points outside of the variable table
    VariableOutOfRange { index: usize, len: usize },
    /// attempt to evaluate the little-o remainder of a Taylor series
    RemainderEvaluation,
    /// the expression holds no tree
    EmptyExpression,
    /// a derivative that was never computed was requested
    DerivativeOutOfRange { requested: usize, available: usize },
    /// no variable with this name in the variable table
    UnknownVariable(String),
    /// a numeric argument outside of the accepted range
    InvalidArgument(String),
    /// unary operator with a right child
    UnaryWithRightChild,
    /// number or variable node that has children
    LeafWithChildren,
    /// operator node with no children at all
    OperatorWithoutChildren,
    /// binary operator with only one operand
    MissingOperand(Operator),
    /// reading or writing a file failed
    Io(String),
    /// persisted tree notation could not be read back
    Load { line: usize, message: String },
}

impl ExpressionError {
    /// true for the structural invariant violations
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ExpressionError::UnaryWithRightChild
                | ExpressionError::LeafWithChildren
                | ExpressionError::OperatorWithoutChildren
                | ExpressionError::MissingOperand(_)
        )
    }

    /// true for the numeric domain failures
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            ExpressionError::DivisionByZero
                | ExpressionError::VariableOutOfRange { .. }
                | ExpressionError::RemainderEvaluation
                | ExpressionError::EmptyExpression
                | ExpressionError::DerivativeOutOfRange { .. }
                | ExpressionError::UnknownVariable(_)
        )
    }
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExpressionError::Syntax {
                offset,
                message,
                context,
            } => write!(
                f,
                "expression parsing failed in position {}: {}\n{}",
                offset, message, context
            ),
            ExpressionError::DivisionByZero => write!(f, "Division by zero"),
            ExpressionError::VariableOutOfRange { index, len } => write!(
                f,
                "variable index {} is out of range for a table of {} variables",
                index, len
            ),
            ExpressionError::RemainderEvaluation => {
                write!(f, "the little-o remainder cannot be evaluated numerically")
            }
            ExpressionError::EmptyExpression => write!(f, "expression has no tree"),
            ExpressionError::DerivativeOutOfRange {
                requested,
                available,
            } => write!(
                f,
                "derivative {} requested, only {} computed",
                requested, available
            ),
            ExpressionError::UnknownVariable(name) => write!(f, "unknown variable '{}'", name),
            ExpressionError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ExpressionError::UnaryWithRightChild => {
                write!(f, "malformed tree: unary operator with a right child")
            }
            ExpressionError::LeafWithChildren => {
                write!(f, "malformed tree: number or variable node with children")
            }
            ExpressionError::OperatorWithoutChildren => {
                write!(f, "malformed tree: operator node without children")
            }
            ExpressionError::MissingOperand(op) => {
                write!(f, "malformed tree: operator '{}' is missing an operand", op)
            }
            ExpressionError::Io(msg) => write!(f, "I/O error: {}", msg),
            ExpressionError::Load { line, message } => {
                write!(f, "cannot load tree (line {}): {}", line, message)
            }
        }
    }
}

impl std::error::Error for ExpressionError {}

impl From<std::io::Error> for ExpressionError {
    fn from(err: std::io::Error) -> Self {
        ExpressionError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExpressionError>;
