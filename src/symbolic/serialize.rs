//! Infix text of an expression tree, fully parenthesized, in the notation the parser
//! reads back: `(a + b)`, `(a ^ b)`, `sin(a)`, `o(a)`.
use crate::symbolic::expression_tree::{Node, Value};
use crate::symbolic::symbolic_engine::Expression;
use crate::symbolic::variables::VariableTable;
use std::fmt;

impl Node {
    /// Infix text; variables are named through `variables`, unknown slots print as `#index`.
    pub fn to_infix(&self, variables: &VariableTable) -> String {
        let mut out = String::new();
        self.write_infix(variables, &mut out);
        out
    }

    fn write_infix(&self, variables: &VariableTable, out: &mut String) {
        match self.value {
            Value::Number(x) => out.push_str(&x.to_string()),
            Value::Variable(index) => match variables.name(index) {
                Ok(name) => out.push_str(name),
                Err(_) => out.push_str(&format!("#{}", index)),
            },
            Value::Operator(op) if op.is_unary() => {
                out.push_str(op.name());
                out.push('(');
                if let Some(arg) = self.left() {
                    arg.write_infix(variables, out);
                }
                out.push(')');
            }
            Value::Operator(op) => {
                out.push('(');
                if let Some(l) = self.left() {
                    l.write_infix(variables, out);
                }
                out.push(' ');
                out.push_str(op.name());
                out.push(' ');
                if let Some(r) = self.right() {
                    r.write_infix(variables, out);
                }
                out.push(')');
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.tree() {
            Some(tree) => write!(f, "{}", tree.to_infix(self.variables())),
            None => write!(f, "<empty expression>"),
        }
    }
}
