//! LaTeX report document: preamble with the operator macros, sections with the
//! formulas of an expression, its derivatives and its Taylor series, figure includes.
//! The output is a `.tex` source, compiling it is left to the user.
use crate::symbolic::errors::Result;
use crate::symbolic::expression_tree::Node;
use crate::symbolic::latex::{LATEX_COMMAND_HEADER, equation, function_equation};
use crate::symbolic::symbolic_engine::Expression;
use crate::symbolic::variables::VariableTable;
use chrono::Local;
use std::io::Write;

pub struct LatexReport<W: Write> {
    out: W,
}

impl<W: Write> LatexReport<W> {
    pub fn new(out: W) -> Self {
        LatexReport { out }
    }

    /// Preamble, title page and table of contents.
    pub fn header(&mut self, title: &str) -> Result<()> {
        let date = Local::now().format("%Y-%m-%d");
        write!(
            self.out,
            "\\documentclass[12pt]{{article}}\n\
             \\usepackage[hidelinks]{{hyperref}}\n\
             \\usepackage{{float}}\n\
             \\usepackage{{graphicx}}\n\
             \\title{{{}}}\n\
             \\date{{{}}}\n",
            title, date
        )?;
        self.out.write_all(LATEX_COMMAND_HEADER.as_bytes())?;
        writeln!(self.out, "\\begin{{document}}\n\\maketitle\n\\tableofcontents")?;
        Ok(())
    }

    pub fn section(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "\\section{{{}}}", title)?;
        Ok(())
    }

    pub fn subsection(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "\\subsection{{{}}}", title)?;
        Ok(())
    }

    pub fn paragraph(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}\n", text)?;
        Ok(())
    }

    pub fn equation(&mut self, node: &Node, variables: &VariableTable) -> Result<()> {
        self.out.write_all(equation(node, variables)?.as_bytes())?;
        Ok(())
    }

    /// `f^{(n)}(x) = ...` for a cached derivative (order 0 is the function).
    pub fn function(&mut self, expr: &Expression, n: usize) -> Result<()> {
        self.out.write_all(function_equation(expr, n)?.as_bytes())?;
        Ok(())
    }

    /// One subsection per cached derivative up to order `n`.
    pub fn derivatives(&mut self, expr: &Expression, n: usize) -> Result<()> {
        for order in 1..=n {
            self.subsection(&format!("Derivative of order {}", order))?;
            self.function(expr, order)?;
        }
        Ok(())
    }

    pub fn figure(&mut self, image: &str) -> Result<()> {
        writeln!(
            self.out,
            "\\begin{{figure}}[H]\n\\centering\n\\includegraphics[width=0.8\\textwidth]{{{}}}\n\\end{{figure}}",
            image
        )?;
        Ok(())
    }

    pub fn footer(&mut self) -> Result<()> {
        writeln!(self.out, "\\end{{document}}")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
