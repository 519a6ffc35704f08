//! # rill
//!
//! rill is an interpreter for a small, eager, expression-only functional
//! language. Programs are single expressions; `let` is itself an expression
//! that binds a name in the global environment and evaluates to unit.
//! Lists are the only compound data structure, strings are lists of
//! characters, and the standard library (`range`, `fmap`, `filter`, `fold`,
//! `sum`, `product`, `reverse`) is written in the language itself.
//!
//! ## Modules
//!
//! - `parser`: the lexer, Pratt parser, AST, and the tree-walking evaluator
//!   and interpreter for the rill language.
//! - `repl`: the Read-Eval-Print Loop for interactive use.
//! - `bench`: a small timing harness around a deeply recursive workload.

pub mod bench;
pub mod parser;
pub mod repl;

// Re-export commonly used types and functions for convenience
pub use crate::parser::{Expression, Interpreter, Value, eval, parse};
