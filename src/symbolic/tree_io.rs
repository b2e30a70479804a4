//! # Tree persistence
//!
//! Stores an expression tree as nested braces, one node per line:
//!
//! ```text
//! { *
//!     { 2 }
//!     { sin
//!         { "x" }
//!     }
//! }
//! ```
//!
//! A number is written in its floating form, an operator as its registered name and a
//! variable as its quoted name. Loading rebuilds the variable table in order of first
//! appearance, recomputes the constant flags and validates the structure. Nesting
//! deeper than the parser's `MAX_DEPTH` is a load error.
use crate::symbolic::errors::{ExpressionError, Result};
use crate::symbolic::expression_tree::{Node, Value};
use crate::symbolic::operators::Operator;
use crate::symbolic::parse_expr::MAX_DEPTH;
use crate::symbolic::symbolic_engine::Expression;
use crate::symbolic::variables::VariableTable;
use log::info;
use std::fs;
use std::path::Path;

const INDENT: &str = "    ";

impl Expression {
    pub fn to_tree_notation(&self) -> Result<String> {
        let mut out = String::new();
        self.root()?.write_tree(self.variables(), 0, &mut out)?;
        Ok(out)
    }

    pub fn from_tree_notation(text: &str) -> Result<Expression> {
        let mut reader = TreeReader::new(text);
        let tree = reader.node()?;
        if let Some(token) = reader.next_token()? {
            return Err(ExpressionError::Load {
                line: token.line,
                message: "unexpected content after the root node".to_string(),
            });
        }
        Expression::from_parts(tree, reader.variables)
    }

    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_tree_notation()?)?;
        info!("expression tree stored to {}", path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Expression> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let expr = Self::from_tree_notation(&text)?;
        info!("expression tree loaded from {}", path.display());
        Ok(expr)
    }
}

impl Node {
    fn write_tree(&self, variables: &VariableTable, depth: usize, out: &mut String) -> Result<()> {
        let indent = INDENT.repeat(depth);
        out.push_str(&indent);
        out.push_str("{ ");
        match self.value {
            Value::Number(x) => out.push_str(&x.to_string()),
            Value::Variable(index) => {
                out.push('"');
                out.push_str(variables.name(index)?);
                out.push('"');
            }
            Value::Operator(op) => out.push_str(op.name()),
        }
        if self.left.is_none() && self.right.is_none() {
            out.push_str(" }\n");
            return Ok(());
        }
        out.push('\n');
        for child in [self.left(), self.right()].into_iter().flatten() {
            child.write_tree(variables, depth + 1, out)?;
        }
        out.push_str(&indent);
        out.push_str("}\n");
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum TokenKind<'a> {
    Open,
    Close,
    Quoted(&'a str),
    Word(&'a str),
}

#[derive(Debug)]
struct Token<'a> {
    kind: TokenKind<'a>,
    line: usize,
}

struct TreeReader<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    depth: usize,
    variables: VariableTable,
}

impl<'a> TreeReader<'a> {
    fn new(text: &'a str) -> Self {
        TreeReader {
            text,
            pos: 0,
            line: 1,
            depth: 0,
            variables: VariableTable::new(),
        }
    }

    fn error(&self, line: usize, message: impl Into<String>) -> ExpressionError {
        ExpressionError::Load {
            line,
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        let text = self.text;
        let bytes = text.as_bytes();
        while let Some(&c) = bytes.get(self.pos) {
            if c == b'\n' {
                self.line += 1;
            } else if !c.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        let Some(&c) = bytes.get(self.pos) else {
            return Ok(None);
        };
        let line = self.line;
        let start = self.pos;
        let kind = match c {
            b'{' => {
                self.pos += 1;
                TokenKind::Open
            }
            b'}' => {
                self.pos += 1;
                TokenKind::Close
            }
            b'"' => {
                let rest = &text[start + 1..];
                let len = rest
                    .find(|ch: char| ch == '"' || ch == '\n')
                    .filter(|&i| rest.as_bytes()[i] == b'"')
                    .ok_or_else(|| self.error(line, "unterminated variable name"))?;
                self.pos = start + 1 + len + 1;
                TokenKind::Quoted(&rest[..len])
            }
            _ => {
                let len = text[start..]
                    .find(|ch: char| ch.is_ascii_whitespace() || ch == '{' || ch == '}')
                    .unwrap_or(text.len() - start);
                self.pos = start + len;
                TokenKind::Word(&text[start..start + len])
            }
        };
        Ok(Some(Token { kind, line }))
    }

    fn expect_token(&mut self) -> Result<Token<'a>> {
        let line = self.line;
        self.next_token()?
            .ok_or_else(|| self.error(line, "unexpected end of input"))
    }

    /// `{ value child? child? }`
    fn node(&mut self) -> Result<Node> {
        let open = self.expect_token()?;
        if open.kind != TokenKind::Open {
            return Err(self.error(open.line, "expected '{'"));
        }
        let head = self.expect_token()?;
        let value = match head.kind {
            TokenKind::Quoted(name) if !name.is_empty() => {
                Value::Variable(self.variables.register(name))
            }
            TokenKind::Word(word) => match Operator::from_name(word) {
                Some(op) => Value::Operator(op),
                None => word
                    .parse::<f64>()
                    .map(Value::Number)
                    .map_err(|_| self.error(head.line, format!("unknown value '{}'", word)))?,
            },
            _ => return Err(self.error(head.line, "expected a node value")),
        };

        let mut children = Vec::new();
        loop {
            let saved = (self.pos, self.line);
            let token = self.expect_token()?;
            match token.kind {
                TokenKind::Close => break,
                TokenKind::Open => {
                    if children.len() == 2 {
                        return Err(self.error(token.line, "a node has at most two children"));
                    }
                    if self.depth + 1 >= MAX_DEPTH {
                        return Err(self.error(token.line, "tree nested too deeply"));
                    }
                    (self.pos, self.line) = saved;
                    self.depth += 1;
                    let child = self.node();
                    self.depth -= 1;
                    children.push(child?);
                }
                _ => return Err(self.error(token.line, "expected '{' or '}'")),
            }
        }
        let mut children = children.into_iter();
        let left = children.next();
        let right = children.next();
        Node::from_parts(value, left, right)
    }
}
