//! Acceptance tests for RUN, EXPORT, and IMPORT: evaluating another program
//! file inline and round-tripping graphs through the persisted format.

use super::{eval, eval_error};
use crate::{Flow, Interpreter, RuntimeError, Value};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

/// A unique scratch path for this test process.
fn scratch(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("grl-test-{}-{}", std::process::id(), name));
    path
}

#[test]
fn test_run_evaluates_in_the_callers_environment() {
    let script = scratch("child.grl");
    fs::write(&script, "SET from_child x + 1\nPRINT from_child\n").unwrap();

    let mut interpreter = Interpreter::with_output(Vec::new());
    let source = format!("SET x 41\nRUN \"{}\"\nPRINT from_child", script.display());
    interpreter.run_source(&source).unwrap();

    let output = String::from_utf8(interpreter.output().clone()).unwrap();
    assert_eq!(output, "42\n42\n");
    fs::remove_file(&script).ok();
}

#[test]
fn test_exit_inside_run_terminates_the_caller() {
    let script = scratch("exit.grl");
    fs::write(&script, "PRINT 1\nEXIT\nPRINT 2\n").unwrap();

    let source = format!("RUN \"{}\"\nPRINT 3", script.display());
    let (output, flow) = eval(&source);
    assert_eq!(output, "1\n");
    assert_eq!(flow, Flow::Exit);
    fs::remove_file(&script).ok();
}

#[test]
fn test_parse_error_in_run_file_aborts_the_statement() {
    let script = scratch("broken.grl");
    fs::write(&script, "PRINT ???\n").unwrap();

    let source = format!("RUN \"{}\"", script.display());
    assert!(matches!(eval_error(&source), RuntimeError::Parse(_)));
    fs::remove_file(&script).ok();
}

#[test]
fn test_export_import_round_trip() {
    let base = scratch("round-trip");
    let source = format!(
        r#"ADD DIGRAPH g
ADD EDGE "a" "b" g
ADD EDGE "b" "c" g
SET WEIGHT OF EDGE "b" "c" 2.5 g
ADD NODE "island" g
EXPORT g "{base}"
IMPORT h "{base}"
PRINT IS DIGRAPH h
PRINT NODE COUNT h
PRINT EDGE COUNT h
PRINT GET WEIGHT OF EDGE "a" "b" h
PRINT GET WEIGHT OF EDGE "b" "c" h"#,
        base = base.display()
    );

    let (output, _) = eval(&source);
    assert_eq!(output, "TRUE\n4\n2\n1\n2.5\n");
    fs::remove_file(base.with_extension("grlg")).ok();
}

#[test]
fn test_import_into_existing_binding_fails() {
    let base = scratch("duplicate");
    let source = format!(
        "ADD GRAPH g\nEXPORT g \"{base}\"\nSET h 1\nIMPORT h \"{base}\"",
        base = base.display()
    );
    assert!(matches!(
        eval_error(&source),
        RuntimeError::DuplicateEntity { .. }
    ));
    fs::remove_file(base.with_extension("grlg")).ok();
}

#[test]
fn test_imported_graph_is_independent() {
    let base = scratch("independent");
    let mut interpreter = Interpreter::with_output(Vec::new());
    let source = format!(
        "ADD GRAPH g\nADD NODE \"a\" g\nEXPORT g \"{base}\"\nIMPORT h \"{base}\"\nADD NODE \"b\" h",
        base = base.display()
    );
    interpreter.run_source(&source).unwrap();

    let original = interpreter.env().lookup("g").unwrap();
    let imported = interpreter.env().lookup("h").unwrap();
    match (original, imported) {
        (Value::Graph(g), Value::Graph(h)) => {
            assert_eq!(g.borrow().node_count(), 1);
            assert_eq!(h.borrow().node_count(), 2);
        }
        _ => panic!("expected two graphs"),
    }
    fs::remove_file(base.with_extension("grlg")).ok();
}
