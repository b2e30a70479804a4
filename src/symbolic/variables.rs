//! Variable table of an expression: ordered (name, current value) slots.
//!
//! Slots are appended by the parser on the first occurrence of a name and never
//! removed. Only the current value changes afterwards, and the evaluator reads it.
use crate::symbolic::errors::{ExpressionError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableTable {
    variables: Vec<Variable>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, registering a new slot with value 0 on first occurrence.
    pub fn register(&mut self, name: &str) -> usize {
        match self.index_of(name) {
            Some(index) => index,
            None => {
                self.variables.push(Variable {
                    name: name.to_string(),
                    value: 0.0,
                });
                self.variables.len() - 1
            }
        }
    }

    /// linear scan by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name == name)
    }

    pub fn get(&self, index: usize) -> Result<&Variable> {
        self.variables
            .get(index)
            .ok_or(ExpressionError::VariableOutOfRange {
                index,
                len: self.variables.len(),
            })
    }

    pub fn value(&self, index: usize) -> Result<f64> {
        Ok(self.get(index)?.value)
    }

    pub fn name(&self, index: usize) -> Result<&str> {
        Ok(self.get(index)?.name.as_str())
    }

    pub fn set_value(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.variables.len();
        let slot = self
            .variables
            .get_mut(index)
            .ok_or(ExpressionError::VariableOutOfRange { index, len })?;
        slot.value = value;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.variables.iter()
    }

    /// Runs `f` with slot `index` temporarily set to `value`, then restores the
    /// previous value whatever `f` returned.
    pub fn with_value<T, F>(&mut self, index: usize, value: f64, f: F) -> Result<T>
    where
        F: FnOnce(&VariableTable) -> Result<T>,
    {
        let saved = self.value(index)?;
        self.set_value(index, value)?;
        let result = f(self);
        self.set_value(index, saved)?;
        result
    }
}
