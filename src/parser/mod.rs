// src/parser/mod.rs
pub mod ast;
pub mod environment;
pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod parser;

#[cfg(test)]
mod evaluator_tests;

pub use ast::{BinOp, Expression, PrefixOp, Value};
pub use environment::Environment;
pub use evaluator::eval;
pub use interpreter::Interpreter;
pub use lexer::{Lexer, Token};
pub use parser::{Parser, parse};
