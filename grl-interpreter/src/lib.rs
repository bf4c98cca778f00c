//! GRL Interpreter
//!
//! Evaluation engine for the GRL graph scripting language: the dynamically
//! typed runtime values, the flat runtime environment, the evaluator that
//! walks the deferred tree produced by `grl-parser`, and the petgraph-backed
//! graph engine with its per-query algorithm selection.

pub mod environment;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod render;
pub mod storage;
pub mod value;

// Include tests directory with all test modules
#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;

// Re-export public API
pub use environment::Environment;
pub use error::{Result, RuntimeError};
pub use evaluator::{Flow, Interpreter};
pub use graph::Graph;
pub use render::{NullRenderer, RenderData, Renderer};
pub use value::Value;

/// Evaluate a program text against a fresh interpreter writing to stdout.
///
/// Convenience entry point for batch execution; callers that need a
/// persistent environment or captured output construct an [`Interpreter`]
/// directly.
pub fn run_source(source: &str) -> Result<Flow> {
    Interpreter::new().run_source(source)
}
