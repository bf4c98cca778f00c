//! Acceptance tests for the GRL interpreter
//!
//! These tests drive whole program texts through the parser → evaluator
//! pipeline and assert on printed output, environment state, and errors.

use crate::{Flow, Interpreter, RuntimeError};

pub mod test_acceptance_algorithms;
pub mod test_acceptance_graphs;
pub mod test_acceptance_persistence;

/// Run a program and return its printed output and final flow signal.
pub fn eval(source: &str) -> (String, Flow) {
    let mut interpreter = Interpreter::with_output(Vec::new());
    let flow = interpreter
        .run_source(source)
        .unwrap_or_else(|error| panic!("program failed: {error}\nsource: {source}"));
    let output = String::from_utf8(interpreter.output().clone()).unwrap();
    (output, flow)
}

/// Run a program and return its printed output.
pub fn eval_output(source: &str) -> String {
    eval(source).0
}

/// Run a program that must fail and return its error.
pub fn eval_error(source: &str) -> RuntimeError {
    let mut interpreter = Interpreter::with_output(Vec::new());
    match interpreter.run_source(source) {
        Ok(_) => panic!("expected failure, program succeeded: {source}"),
        Err(error) => error,
    }
}
