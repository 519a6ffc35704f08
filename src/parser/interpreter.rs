//! Interpreter for executing rill programs
//!
//! Owns the persistent global environment and seeds it with the standard
//! library, which is written in the language itself.

use crate::parser::ast::Value;
use crate::parser::environment::Environment;
use crate::parser::evaluator::eval;
use crate::parser::parser::parse;
use anyhow::{Context, Result};

/// The standard library, bootstrapped one definition at a time when the
/// interpreter starts. Everything is built from recursion, `^`, `$` and
/// list concatenation.
const STDLIB: &[&str] = &[
    "let range = fn(a, b) => if (a == b - 1) then ([a]) else ([a] + range(a + 1, b))",
    "let fmap = fn(f, ls) => if (ls) then ([f(^ls)] + fmap(f, $ls)) else ([])",
    "let filter = fn(f, ls) => if (ls) then (if (f(^ls)) then ([^ls] + filter(f, $ls)) else (filter(f, $ls))) else ([])",
    "let fold = fn(f, acc, ls) => if (ls) then (fold(f, f(acc, ^ls), $ls)) else (acc)",
    "let sum = fn(ls) => fold(fn (a, b) => a + b, 0, ls)",
    "let product = fn(ls) => fold(fn (a, b) => a * b, 1, ls)",
    "let reverse = fn(ls) => if (ls) then (reverse($ls) + [^ls]) else ([])",
];

/// Interpreter with a persistent global environment
pub struct Interpreter {
    environment: Environment,
}

impl Interpreter {
    /// Create a new interpreter with the standard library loaded
    pub fn new() -> Result<Self> {
        let mut interpreter = Interpreter {
            environment: Environment::new(),
        };

        for definition in STDLIB {
            interpreter
                .eval(definition)
                .with_context(|| format!("failed to load '{}'", definition))?;
        }

        Ok(interpreter)
    }

    /// Parse and evaluate a single expression against the global environment
    pub fn eval(&mut self, input: &str) -> Result<Value> {
        let expr = parse(input)?;
        eval(&expr, &mut self.environment)
    }

    /// Evaluate an expression and print the result, unless it is unit
    pub fn execute(&mut self, input: &str) -> Result<()> {
        match self.eval(input)? {
            Value::Unit => {}
            value => println!("{}", value),
        }
        Ok(())
    }

    /// Access the global environment (for introspection)
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdlib_bootstrap() {
        let interpreter = Interpreter::new().unwrap();
        for name in ["range", "fmap", "filter", "fold", "sum", "product", "reverse"] {
            assert!(interpreter.environment().is_defined(name), "missing {}", name);
        }
    }

    #[test]
    fn test_definitions_persist_across_eval_calls() {
        let mut interpreter = Interpreter::new().unwrap();
        interpreter.eval("let x = 5").unwrap();
        assert_eq!(interpreter.eval("x * 2").unwrap(), Value::Int(10));
    }

    #[test]
    fn test_eval_returns_unit_for_let() {
        let mut interpreter = Interpreter::new().unwrap();
        assert_eq!(interpreter.eval("let x = 5").unwrap(), Value::Unit);
    }

    #[test]
    fn test_execute_reports_errors() {
        let mut interpreter = Interpreter::new().unwrap();
        assert!(interpreter.execute("1 +").is_err());
        assert!(interpreter.execute("nope").is_err());
        assert!(interpreter.execute("2 + 2").is_ok());
    }
}
