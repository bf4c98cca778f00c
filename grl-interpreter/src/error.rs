//! Runtime error types for the GRL interpreter.
//!
//! Every operation either fully succeeds or fails with one of these
//! variants; failures are never recovered locally. The interactive driver
//! reports them per statement, the batch driver treats them as fatal.

use grl_parser::ParseError;
use miette::Diagnostic;
use thiserror::Error;

/// Runtime errors that can occur during evaluation
#[derive(Error, Diagnostic, Debug)]
pub enum RuntimeError {
    #[error("Variable {name} doesn't exist")]
    #[diagnostic(
        code(grl::runtime::undefined_variable),
        help("Bind the variable before using it")
    )]
    UndefinedVariable { name: String },

    #[error("Variable {name} is not a {expected}, found {found}")]
    #[diagnostic(
        code(grl::runtime::type_mismatch),
        help("Check which value the variable is currently bound to")
    )]
    TypeMismatch {
        name: String,
        expected: String,
        found: String,
    },

    #[error("Entity {name} already exists")]
    #[diagnostic(
        code(grl::runtime::duplicate_entity),
        help("Remove the existing binding first, or pick another name")
    )]
    DuplicateEntity { name: String },

    #[error("Node {node} is not in the graph")]
    #[diagnostic(code(grl::runtime::node_not_found))]
    NodeNotFound { node: String },

    #[error("Edge ({from}, {target}) is not in the graph")]
    #[diagnostic(code(grl::runtime::edge_not_found))]
    EdgeNotFound { from: String, target: String },

    #[error("No path between {from} and {target}")]
    #[diagnostic(code(grl::runtime::no_path))]
    NoPath { from: String, target: String },

    #[error("Graph contains a cycle")]
    #[diagnostic(
        code(grl::runtime::cycle_detected),
        help("Topological sort is only defined for acyclic graphs")
    )]
    CycleDetected,

    #[error("Graph contains a negative cycle")]
    #[diagnostic(
        code(grl::runtime::negative_cycle),
        help("Shortest paths are undefined when a cycle has negative total weight")
    )]
    NegativeCycle,

    #[error("Topological sort requires a directed graph")]
    #[diagnostic(code(grl::runtime::not_directed))]
    NotDirected,

    #[error("Condition must be a boolean, found {found}")]
    #[diagnostic(code(grl::runtime::invalid_condition))]
    InvalidCondition { found: String },

    #[error("Operator {operator} cannot be applied to [{operand_types}]")]
    #[diagnostic(
        code(grl::runtime::invalid_operation),
        help("Check that the operation is supported for these types")
    )]
    InvalidOperation {
        operator: String,
        operand_types: String,
    },

    #[error("Division by zero")]
    #[diagnostic(code(grl::runtime::division_by_zero))]
    DivisionByZero,

    #[error("{target} cannot convert {value}")]
    #[diagnostic(code(grl::runtime::invalid_cast))]
    InvalidCast { target: String, value: String },

    #[error("Malformed graph file at line {line}: {message}")]
    #[diagnostic(code(grl::runtime::malformed_graph_file))]
    MalformedGraphFile { line: usize, message: String },

    #[error("I/O error on {path}")]
    #[diagnostic(code(grl::runtime::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

impl RuntimeError {
    pub fn undefined_variable(name: &str) -> Self {
        Self::UndefinedVariable {
            name: name.to_string(),
        }
    }

    pub fn type_mismatch(name: &str, expected: &str, found: &str) -> Self {
        Self::TypeMismatch {
            name: name.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn duplicate_entity(name: &str) -> Self {
        Self::DuplicateEntity {
            name: name.to_string(),
        }
    }

    pub fn node_not_found(node: &str) -> Self {
        Self::NodeNotFound {
            node: node.to_string(),
        }
    }

    pub fn edge_not_found(source: &str, target: &str) -> Self {
        Self::EdgeNotFound {
            from: source.to_string(),
            target: target.to_string(),
        }
    }

    pub fn no_path(source: &str, target: &str) -> Self {
        Self::NoPath {
            from: source.to_string(),
            target: target.to_string(),
        }
    }

    pub fn invalid_operation(operator: &str, operand_types: Vec<String>) -> Self {
        Self::InvalidOperation {
            operator: operator.to_string(),
            operand_types: operand_types.join(", "),
        }
    }

    pub fn invalid_cast(target: impl ToString, value: impl ToString) -> Self {
        Self::InvalidCast {
            target: target.to_string(),
            value: value.to_string(),
        }
    }

    pub fn malformed_graph_file(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedGraphFile {
            line,
            message: message.into(),
        }
    }

    pub fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }
}

/// Type alias for interpreter results
pub type Result<T> = std::result::Result<T, RuntimeError>;
