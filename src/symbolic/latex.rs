//! # LaTeX rendering
//!
//! Every operator is rendered through its own macro (`\edplus{a}{b}`, `\eddivide{a}{b}`,
//! `\edsin{a}`, ...) defined in [`LATEX_COMMAND_HEADER`], so the look of the formulas can be
//! changed in one place of the report preamble. A child is put in parentheses only when
//! its operator binds weaker (has a higher priority value) than its parent's.
use crate::symbolic::errors::Result;
use crate::symbolic::expression_tree::{Node, Value};
use crate::symbolic::symbolic_engine::Expression;
use crate::symbolic::variables::VariableTable;

pub const LATEX_COMMAND_HEADER: &str = concat!(
    "\\newcommand{\\edplus}[2]{#1 \\mathbin{+} #2}\n",
    "\\newcommand{\\edminus}[2]{#1 \\mathbin{-} #2}\n",
    "\\newcommand{\\edmultiply}[2]{#1 \\cdot #2}\n",
    "\\newcommand{\\eddivide}[2]{\\frac{#1}{#2}}\n",
    "\\newcommand{\\edpower}[2]{{#1}^{#2}}\n",
    "\\newcommand{\\edln}[1]{\\mathop{\\mathrm{ln}} #1}\n",
    "\\newcommand{\\edcos}[1]{\\mathop{\\mathrm{cos}} #1}\n",
    "\\newcommand{\\edsin}[1]{\\mathop{\\mathrm{sin}} #1}\n",
    "\\newcommand{\\edsmallo}[1]{\\mathop{\\mathrm{o}} (#1)}\n",
);

/// Formula body of `node`, without any math environment around it.
pub fn node_to_latex(node: &Node, variables: &VariableTable) -> Result<String> {
    let mut out = String::new();
    write_latex(node, variables, &mut out)?;
    Ok(out)
}

fn write_latex(node: &Node, variables: &VariableTable, out: &mut String) -> Result<()> {
    match node.value() {
        Value::Number(x) => out.push_str(&format_number(x)),
        Value::Variable(index) => {
            out.push_str("\\textit{");
            out.push_str(variables.name(index)?);
            out.push('}');
        }
        Value::Operator(op) => {
            out.push('\\');
            out.push_str(op.latex_name());
            for child in [node.left(), node.right()].into_iter().flatten() {
                let brackets = child
                    .as_operator()
                    .is_some_and(|inner| inner.priority() > op.priority());
                out.push('{');
                if brackets {
                    out.push('(');
                }
                write_latex(child, variables, out)?;
                if brackets {
                    out.push(')');
                }
                out.push('}');
            }
        }
    }
    Ok(())
}

/// Six significant digits, trailing zeros dropped, exponent form for very small or
/// very large magnitudes.
pub fn format_number(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    let exponent = x.abs().log10().floor() as i32;
    if !(-4..6).contains(&exponent) {
        let text = format!("{:.5e}", x);
        return match text.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{}", trim_zeros(mantissa), exp),
            None => text,
        };
    }
    let decimals = (5 - exponent).max(0) as usize;
    trim_zeros(&format!("{:.*}", decimals, x)).to_string()
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// `\begin{equation}` block holding `node`.
pub fn equation(node: &Node, variables: &VariableTable) -> Result<String> {
    Ok(format!(
        "\\begin{{equation}}\n{}\n\\end{{equation}}\n\n",
        node_to_latex(node, variables)?
    ))
}

/// `f(x) = ...`, `f'(x) = ...` and so on for the cached derivative of order `n`;
/// primes up to the third order, `f^{(n)}` beyond.
pub fn function_equation(expr: &Expression, n: usize) -> Result<String> {
    let tree = expr.derivative(n)?;
    let name = expr.diff_variable_name().unwrap_or("x");
    let order = if n > 3 {
        format!("^{{({})}}", n)
    } else {
        "'".repeat(n)
    };
    Ok(format!(
        "\\begin{{equation}}\nf{}({}) = {}\n\\end{{equation}}\n\n",
        order,
        name,
        node_to_latex(tree, expr.variables())?
    ))
}

impl Expression {
    pub fn to_latex(&self) -> Result<String> {
        node_to_latex(self.root()?, self.variables())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets_only_for_weaker_children() {
        let expr = Expression::parse_expression("(x+1)*x^2$").unwrap();
        assert_eq!(
            expr.to_latex().unwrap(),
            "\\edmultiply{(\\edplus{\\textit{x}}{1})}{\\edpower{\\textit{x}}{2}}"
        );
        let expr = Expression::parse_expression("sin(x*2)+3$").unwrap();
        assert_eq!(
            expr.to_latex().unwrap(),
            "\\edplus{\\edsin{(\\edmultiply{\\textit{x}}{2})}}{3}"
        );
    }

    #[test]
    fn test_number_format() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(123456.0), "123456");
        assert_eq!(format_number(1234567.0), "1.23457e6");
        assert_eq!(format_number(0.00002), "2e-5");
    }

    #[test]
    fn test_function_equation_primes() {
        let mut expr = Expression::parse_expression("x^5$").unwrap();
        expr.derive_nth(4).unwrap();
        assert!(function_equation(&expr, 0).unwrap().contains("f(x) = "));
        assert!(function_equation(&expr, 2).unwrap().contains("f''(x) = "));
        assert!(function_equation(&expr, 4).unwrap().contains("f^{(4)}(x) = "));
        assert!(function_equation(&expr, 5).is_err());
    }

    #[test]
    fn test_header_defines_every_macro() {
        use crate::symbolic::operators::Operator;
        use strum::IntoEnumIterator;
        for op in Operator::iter() {
            assert!(LATEX_COMMAND_HEADER.contains(&format!("\\{}}}", op.latex_name())));
        }
    }
}
