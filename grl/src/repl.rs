//! Interactive session for GRL.
//!
//! Each line is parsed and evaluated against one persistent interpreter, so
//! bindings survive across inputs. An error is reported at statement
//! granularity and the session continues; `EXIT` (or `:quit`) ends it with
//! status 0. Bare expressions are evaluated and echoed as a convenience.

use grl_interpreter::{Flow, Interpreter, RuntimeError};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io;
use thiserror::Error;

const PROMPT: &str = "grl> ";
const HISTORY_FILE: &str = ".grl_history";

/// Errors that can occur while starting or driving the session itself
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("Readline error: {source}")]
    Readline {
        #[from]
        source: ReadlineError,
    },
}

/// REPL session holding the editor and the persistent interpreter state
pub struct ReplSession {
    editor: DefaultEditor,
    interpreter: Interpreter<io::Stdout>,
}

impl ReplSession {
    pub fn new() -> Result<Self, ReplError> {
        let editor = DefaultEditor::new()?;

        let mut interpreter = Interpreter::new();
        interpreter.set_renderer(Box::new(crate::dot::DotRenderer));

        Ok(Self {
            editor,
            interpreter,
        })
    }

    /// Drive the session until EXIT, :quit, or end of input. Returns the
    /// process exit code.
    pub fn run(&mut self) -> i32 {
        println!("GRL {} interactive session", grl_parser::VERSION);
        println!("Type :help for commands, EXIT to leave.");
        self.editor.load_history(HISTORY_FILE).ok();

        let code = loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(line).ok();

                    if let Some(command) = line.strip_prefix(':') {
                        if self.handle_command(command) {
                            break 0;
                        }
                        continue;
                    }

                    if self.evaluate_line(line) == Flow::Exit {
                        break 0;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break 0,
                Err(error) => {
                    eprintln!("Readline error: {}", error);
                    break 1;
                }
            }
        };

        self.editor.save_history(HISTORY_FILE).ok();
        code
    }

    /// Handle a `:command`; returns true when the session should end.
    fn handle_command(&mut self, command: &str) -> bool {
        match command {
            "quit" | "q" => true,
            "help" | "h" => {
                println!(":help   show this help");
                println!(":vars   list current bindings");
                println!(":quit   leave the session");
                println!("EXIT    leave the session (GRL statement)");
                false
            }
            "vars" => {
                if self.interpreter.env().is_empty() {
                    println!("No bindings");
                } else {
                    for (name, value) in self.interpreter.env().iter() {
                        println!("{}: {} = {}", name, value.type_name(), value);
                    }
                }
                false
            }
            other => {
                println!("Unknown command :{} (try :help)", other);
                false
            }
        }
    }

    /// Evaluate one input line: a statement sequence, or — if that does not
    /// parse — a bare expression whose value gets echoed.
    fn evaluate_line(&mut self, line: &str) -> Flow {
        match self.interpreter.run_source(line) {
            Ok(flow) => flow,
            Err(RuntimeError::Parse(program_error)) => {
                match grl_parser::parse_expression(line) {
                    Ok(expression) => match self.interpreter.eval_expression(&expression) {
                        Ok(value) => {
                            println!("{}", value);
                            Flow::Continue
                        }
                        Err(error) => self.report(error),
                    },
                    // The statement-level diagnostic is the useful one
                    Err(_) => self.report(RuntimeError::Parse(program_error)),
                }
            }
            Err(error) => self.report(error),
        }
    }

    fn report(&self, error: RuntimeError) -> Flow {
        eprintln!("{:?}", miette::Report::new(error));
        Flow::Continue
    }
}
