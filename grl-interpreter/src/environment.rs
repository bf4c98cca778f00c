//! The runtime environment for the GRL interpreter.
//!
//! One flat namespace mapping identifiers to dynamically typed values.
//! There are no nested scopes and no shadowing: rebinding an identifier
//! overwrites it wherever the rebinding occurs. Loop variables are bound by
//! the loop and removed again when it terminates.

use crate::error::{Result, RuntimeError};
use crate::graph::Graph;
use crate::value::Value;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Identifier bindings for one running program instance.
///
/// The environment is owned by its interpreter, so independent program
/// instances never interfere. Insertion order is preserved for listing.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: IndexMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Look up a binding, failing if the identifier is absent.
    pub fn lookup(&self, name: &str) -> Result<Value> {
        self.bindings
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::undefined_variable(name))
    }

    /// Look up a binding that must be a graph.
    pub fn lookup_graph(&self, name: &str) -> Result<Rc<RefCell<Graph>>> {
        match self.lookup(name)? {
            Value::Graph(graph) => Ok(graph),
            other => Err(RuntimeError::type_mismatch(
                name,
                "graph",
                other.type_name(),
            )),
        }
    }

    /// Insert or overwrite a binding unconditionally.
    pub fn bind(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Remove a binding; removing an absent binding is a no-op.
    pub fn unbind(&mut self, name: &str) {
        self.bindings.shift_remove(name);
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Iterate bindings in insertion order (used by the REPL's :vars).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
