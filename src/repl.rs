//! REPL (Read-Eval-Print Loop) for the rill language

use crate::parser::Interpreter;
use anyhow::Result;
use colored::*;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Interactive REPL for the rill language
pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter,
}

impl Repl {
    /// Create a new REPL instance with the standard library loaded
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;
        Ok(Repl {
            editor,
            interpreter: Interpreter::new()?,
        })
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!("{}", "rill".bright_cyan().bold());
        println!(
            "Type expressions like: {}, {}, {}",
            "5 + 12 * 3".cyan(),
            "[n * n for n in [1..10]]".cyan(),
            "fold(fn (a, b) => a + b, 0, [0..100])".cyan()
        );
        println!("{} to exit.\n", "Ctrl+C".bright_red());

        loop {
            let prompt = format!("{} ", "rill>".bright_magenta().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(line.to_owned())?;

                    if let Err(e) = self.interpreter.execute(line) {
                        println!("{} {}", "Error:".bright_red().bold(), e.to_string().red());
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    println!(
                        "{} {}",
                        "Error reading input:".bright_red().bold(),
                        err.to_string().red()
                    );
                }
            }
        }

        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start() -> Result<()> {
    let mut repl = Repl::new()?;
    repl.run()
}
