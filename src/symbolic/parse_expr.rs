//! # Expression Parser
//!
//! A module turns an infix string into an `Expression`: the tree plus the table of the
//! variables discovered while parsing.
//!
//! ```rust, ignore
//! use RustedDerivator::symbolic::symbolic_engine::Expression;
//! let expr = Expression::parse_expression("x^2.5*ln(x+y)$").unwrap();
//! println!("{}", expr);
//! ```
//!
//! Recursive descent, one function per grammar level:
//!
//! ```text
//! goal       := expression ('$' | '\n' | end of input)
//! expression := term (('+' | '-') term)*       left associative
//! term       := power (('*' | '/') power)*     left associative
//! power      := primary ('^' power)?           right associative
//! primary    := '(' expression ')' | atom
//! atom       := number | name '(' expression ')' | identifier
//! identifier := [A-Za-z][A-Za-z0-9]*
//! ```
//!
//! Spaces, tabs and carriage returns between tokens are skipped. A name directly
//! followed by `(` must be a registered unary operator (`ln`, `sin`, `cos`, `o`).
//! On a grammar violation the parser reports the byte offset of the failing
//! character together with a window of the surrounding text and a caret under it.
//! Trees deeper than `MAX_DEPTH` levels, and bracket or function nesting beyond it,
//! are rejected the same way, so no later recursive transform runs out of stack.
use crate::symbolic::errors::{ExpressionError, Result};
use crate::symbolic::expression_tree::Node;
use crate::symbolic::operators::Operator;
use crate::symbolic::symbolic_engine::Expression;
use crate::symbolic::variables::VariableTable;
use log::{debug, error};

/// characters shown on each side of the failing position
const DIAGNOSTIC_SIDE_LEN: usize = 10;
/// deepest tree (and deepest bracket nesting) the parser accepts
pub const MAX_DEPTH: usize = 256;

impl Expression {
    /// Parses `input` into a new expression. The first variable met becomes the
    /// differentiation variable.
    pub fn parse_expression(input: &str) -> Result<Expression> {
        let mut ctx = ParserContext::new(input);
        match ctx.goal() {
            Ok(tree) => {
                debug!(
                    "parsed expression: {} nodes, {} variables",
                    tree.node_count(),
                    ctx.variables.len()
                );
                Ok(Expression::from_tree(tree, ctx.variables, 0))
            }
            Err(e) => {
                error!("{}", e);
                Err(e)
            }
        }
    }
}

/// Cursor over the input plus the variable table filled while parsing. Handed over to
/// the resulting `Expression` on success and dropped on failure.
struct ParserContext<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// grammar levels entered through '(', '^' or a function call
    nesting: usize,
    variables: VariableTable,
}

/// a subtree together with its depth
type Parsed = (Node, usize);

impl<'a> ParserContext<'a> {
    fn new(input: &'a str) -> Self {
        ParserContext {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            nesting: 0,
            variables: VariableTable::new(),
        }
    }

    fn goal(&mut self) -> Result<Node> {
        let (tree, _) = self.expression()?;
        match self.peek() {
            None | Some(b'$') | Some(b'\n') => Ok(tree),
            Some(c) => Err(self.syntax_error(format!(
                "unexpected '{}', expected an operator or the end of the expression",
                c as char
            ))),
        }
    }

    fn expression(&mut self) -> Result<Parsed> {
        let mut left = self.term()?;
        while let Some(op) = self.binary_operator(&[Operator::Plus, Operator::Minus]) {
            let right = self.term()?;
            left = self.combine(op, left, right)?;
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Parsed> {
        let mut left = self.power()?;
        while let Some(op) = self.binary_operator(&[Operator::Multiply, Operator::Divide]) {
            let right = self.power()?;
            left = self.combine(op, left, right)?;
        }
        Ok(left)
    }

    fn power(&mut self) -> Result<Parsed> {
        let base = self.primary()?;
        if self.binary_operator(&[Operator::Pow]).is_some() {
            let exponent = self.nested(Self::power)?;
            return self.combine(Operator::Pow, base, exponent);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Parsed> {
        if self.peek() == Some(b'(') {
            self.pos += 1;
            let inner = self.nested(Self::expression)?;
            self.expect_closing()?;
            return Ok(inner);
        }
        self.atom()
    }

    /// Binary node over two parsed operands, rejected past `MAX_DEPTH`.
    fn combine(&self, op: Operator, left: Parsed, right: Parsed) -> Result<Parsed> {
        let depth = 1 + left.1.max(right.1);
        if depth > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok((Node::binary(op, left.0, right.0), depth))
    }

    /// Runs a grammar level one nesting step deeper.
    fn nested(&mut self, level: fn(&mut Self) -> Result<Parsed>) -> Result<Parsed> {
        if self.nesting >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        self.nesting += 1;
        let parsed = level(self);
        self.nesting -= 1;
        parsed
    }

    fn too_deep(&self) -> ExpressionError {
        self.syntax_error(format!("expression nested deeper than {} levels", MAX_DEPTH))
    }

    fn atom(&mut self) -> Result<Parsed> {
        if let Some(value) = self.number() {
            return Ok((Node::number(value), 1));
        }
        let start = self.pos;
        let Some(name) = self.identifier() else {
            return Err(match self.peek() {
                Some(c) => self.syntax_error(format!("unexpected '{}'", c as char)),
                None => self.syntax_error("unexpected end of expression".to_string()),
            });
        };
        if self.bytes.get(self.pos) == Some(&b'(') {
            return self.function_call(start, name);
        }
        Ok((Node::variable(self.variables.register(name)), 1))
    }

    fn function_call(&mut self, start: usize, name: &str) -> Result<Parsed> {
        let op = match Operator::from_name(name) {
            Some(op) if op.is_unary() => op,
            _ => {
                self.pos = start;
                return Err(self.syntax_error(format!("unknown function '{}'", name)));
            }
        };
        self.pos += 1;
        let (argument, depth) = self.nested(Self::expression)?;
        self.expect_closing()?;
        if depth >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok((Node::unary(op, argument), depth + 1))
    }

    fn expect_closing(&mut self) -> Result<()> {
        if self.peek() == Some(b')') {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.syntax_error("expected ')'".to_string()))
        }
    }

    /// Consumes one of `allowed` if it is the next token.
    fn binary_operator(&mut self, allowed: &[Operator]) -> Option<Operator> {
        let c = self.peek()?;
        let op = allowed
            .iter()
            .copied()
            .find(|op| op.name().as_bytes() == [c].as_slice())?;
        self.pos += 1;
        Some(op)
    }

    /// Floating literal: optional sign, digits with an optional fraction (at least one
    /// digit in total), optional exponent. The cursor only moves on success.
    fn number(&mut self) -> Option<f64> {
        self.skip_blanks();
        let bytes = self.bytes;
        let start = self.pos;
        let mut end = start;
        if matches!(bytes.get(end), Some(b'+') | Some(b'-')) {
            end += 1;
        }
        let digits_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        let mut digits = end - digits_start;
        if bytes.get(end) == Some(&b'.') {
            end += 1;
            let fraction_start = end;
            while bytes.get(end).is_some_and(u8::is_ascii_digit) {
                end += 1;
            }
            digits += end - fraction_start;
        }
        if digits == 0 {
            return None;
        }
        if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
                exp_end += 1;
            }
            let exp_digits_start = exp_end;
            while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
                exp_end += 1;
            }
            if exp_end > exp_digits_start {
                end = exp_end;
            }
        }
        let value = self.input[start..end].parse::<f64>().ok()?;
        self.pos = end;
        Some(value)
    }

    fn identifier(&mut self) -> Option<&'a str> {
        self.skip_blanks();
        let bytes = self.bytes;
        let start = self.pos;
        if !bytes.get(start).is_some_and(u8::is_ascii_alphabetic) {
            return None;
        }
        let mut end = start + 1;
        while bytes.get(end).is_some_and(u8::is_ascii_alphanumeric) {
            end += 1;
        }
        self.pos = end;
        Some(&self.input[start..end])
    }

    /// Next significant byte, blanks skipped.
    fn peek(&mut self) -> Option<u8> {
        self.skip_blanks();
        self.bytes.get(self.pos).copied()
    }

    fn skip_blanks(&mut self) {
        while matches!(self.bytes.get(self.pos), Some(b' ') | Some(b'\t') | Some(b'\r')) {
            self.pos += 1;
        }
    }

    fn syntax_error(&self, message: String) -> ExpressionError {
        ExpressionError::Syntax {
            offset: self.pos,
            message,
            context: diagnostic_window(self.input, self.pos, DIAGNOSTIC_SIDE_LEN),
        }
    }
}

/// Up to `side_len` bytes of `input` on each side of `offset`, then a line with a caret
/// under the byte at `offset`. Line breaks inside the window are shown as spaces.
pub fn diagnostic_window(input: &str, offset: usize, side_len: usize) -> String {
    let bytes = input.as_bytes();
    let offset = offset.min(bytes.len());
    let from = offset.saturating_sub(side_len);
    let to = (offset + side_len + 1).min(bytes.len());
    let excerpt: String = String::from_utf8_lossy(&bytes[from..to])
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    format!("{}\n{}^", excerpt, " ".repeat(offset - from))
}
