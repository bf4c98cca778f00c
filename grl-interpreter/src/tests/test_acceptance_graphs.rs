//! Acceptance tests for graph creation, mutation, and queries through the
//! language surface.

use super::{eval_error, eval_output};
use crate::{Interpreter, RuntimeError};
use pretty_assertions::assert_eq;

#[test]
fn test_add_graph_and_counts() {
    let source = r#"ADD GRAPH g
ADD NODE "a" g
ADD NODE "b" g
PRINT NODE COUNT g
PRINT EDGE COUNT g"#;
    assert_eq!(eval_output(source), "2\n0\n");
}

#[test]
fn test_add_node_is_idempotent() {
    let source = r#"ADD GRAPH g
ADD NODE "x" g
ADD NODE "x" g
PRINT NODE COUNT g"#;
    assert_eq!(eval_output(source), "1\n");
}

#[test]
fn test_add_edge_implicitly_creates_endpoints() {
    let source = r#"ADD DIGRAPH g
ADD EDGE "a" "b" g
PRINT NODE COUNT g
PRINT EDGE COUNT g"#;
    assert_eq!(eval_output(source), "2\n1\n");
}

#[test]
fn test_has_edge_toggles_with_mutation() {
    let source = r#"ADD GRAPH g
ADD NODE "a" g
ADD NODE "b" g
PRINT HAS EDGE "a" "b" g
ADD EDGE "a" "b" g
PRINT HAS EDGE "a" "b" g"#;
    assert_eq!(eval_output(source), "FALSE\nTRUE\n");
}

#[test]
fn test_set_and_get_weight() {
    let source = r#"ADD DIGRAPH g
ADD NODE "a" g
ADD NODE "b" g
ADD EDGE "a" "b" g
SET WEIGHT OF EDGE "a" "b" 5 g
PRINT GET WEIGHT OF EDGE "a" "b" g"#;
    assert_eq!(eval_output(source), "5\n");
}

#[test]
fn test_weight_defaults_to_one() {
    let source = r#"ADD DIGRAPH g
ADD EDGE "a" "b" g
PRINT GET WEIGHT OF EDGE "a" "b" g"#;
    assert_eq!(eval_output(source), "1\n");
}

#[test]
fn test_undirected_weight_ignores_orientation() {
    let source = r#"ADD GRAPH g
ADD EDGE "a" "b" g
SET WEIGHT OF EDGE "b" "a" 3 g
PRINT GET WEIGHT OF EDGE "a" "b" g"#;
    assert_eq!(eval_output(source), "3\n");
}

#[test]
fn test_remove_graph_removes_binding() {
    let source = r#"ADD GRAPH g
PRINT EXISTS g
RM GRAPH g
PRINT EXISTS g"#;
    assert_eq!(eval_output(source), "TRUE\nFALSE\n");

    let error = eval_error("ADD GRAPH g; RM GRAPH g; ADD NODE \"a\" g");
    assert!(matches!(error, RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn test_remove_node_and_edge() {
    let source = r#"ADD DIGRAPH g
ADD EDGE "a" "b" g
RM EDGE "a" "b" g
PRINT EDGE COUNT g
RM NODE "a" g
PRINT NODE COUNT g"#;
    assert_eq!(eval_output(source), "0\n1\n");
}

#[test]
fn test_duplicate_graph_binding_fails() {
    assert!(matches!(
        eval_error("ADD GRAPH g; ADD GRAPH g"),
        RuntimeError::DuplicateEntity { .. }
    ));
    assert!(matches!(
        eval_error("SET g 1; ADD DIGRAPH g"),
        RuntimeError::DuplicateEntity { .. }
    ));
}

#[test]
fn test_is_kind_queries() {
    let source = r#"ADD GRAPH u
ADD DIGRAPH d
SET n 5
PRINT IS GRAPH u
PRINT IS DIGRAPH u
PRINT IS DIGRAPH d
PRINT IS GRAPH n"#;
    assert_eq!(eval_output(source), "TRUE\nFALSE\nTRUE\nFALSE\n");
}

#[test]
fn test_has_node_accepts_variables() {
    let source = r#"ADD GRAPH g
SET label "a"
ADD NODE label g
PRINT HAS label g
PRINT HAS "b" g"#;
    assert_eq!(eval_output(source), "TRUE\nFALSE\n");
}

#[test]
fn test_graphs_alias_on_assignment() {
    let source = r#"ADD GRAPH g
SET alias g
ADD NODE "a" alias
PRINT NODE COUNT g"#;
    assert_eq!(eval_output(source), "1\n");
}

#[test]
fn test_print_graph_summary() {
    let source = r#"ADD DIGRAPH g
ADD EDGE "a" "b" g
PRINT g"#;
    assert_eq!(eval_output(source), "DIGRAPH with 2 nodes and 1 edges\n");
}

#[test]
fn test_failed_removal_leaves_graph_untouched() {
    let mut interpreter = Interpreter::with_output(Vec::new());
    interpreter
        .run_source("ADD DIGRAPH g; ADD EDGE \"a\" \"b\" g")
        .unwrap();
    assert!(interpreter
        .run_source("RM EDGE \"a\" \"zz\" g")
        .is_err());
    let graph = interpreter.env().lookup_graph("g").unwrap();
    assert_eq!(graph.borrow().edge_count(), 1);
    assert_eq!(graph.borrow().node_count(), 2);
}
