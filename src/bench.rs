//! Interpreter benchmark
//!
//! Times an Ackermann evaluation, which is almost pure call overhead and so
//! tracks the cost of the environment cloning done on every call. Deep
//! recursion is expected; run a release build.

use crate::parser::Interpreter;
use anyhow::Result;
use colored::*;
use std::time::Instant;

const ACKERMANN: &str = "let ack = fn (m, n) => \
    if (m == 0) then (n + 1) \
    else (if (n == 0) then (ack(m - 1, 1)) \
    else (ack(m - 1, ack(m, n - 1))))";

/// Define the Ackermann function and time `ack(3, 8)`
pub fn run() -> Result<()> {
    let mut interpreter = Interpreter::new()?;
    interpreter.execute(ACKERMANN)?;

    println!("{}", "Benchmarking ack(3, 8)...".bright_cyan());

    let start = Instant::now();
    interpreter.execute("ack(3, 8)")?;
    let elapsed = start.elapsed();

    println!("{} {:?}", "Elapsed:".bright_green().bold(), elapsed);
    Ok(())
}
