//! Environment for variable bindings
//!
//! Provides a flat map of variable bindings. Lambda calls clone the
//! caller's environment and extend the copy with the bound parameters,
//! so the callee sees whatever the caller could see at call time.

use crate::parser::ast::Value;
use std::collections::HashMap;

/// Flat environment for variable storage
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Create a new, empty environment
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
        }
    }

    /// Define a variable, replacing any previous binding with the same name
    pub fn define(&mut self, name: String, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Get a variable's value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Check if a variable is defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }
}
