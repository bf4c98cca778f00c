//! Rendering hand-off for the `DRAW` statement.
//!
//! The core only gathers what a renderer needs — node set, edge set, and
//! weight map — and hands it over; layout and pixel output belong to the
//! collaborator behind the [`Renderer`] trait.

use crate::error::Result;
use grl_parser::GraphKind;

/// Snapshot of a graph prepared for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderData {
    pub kind: GraphKind,
    pub nodes: Vec<String>,
    /// (source, target, weight) in stored orientation.
    pub edges: Vec<(String, String, f64)>,
    /// True when any edge carries a non-default weight; renderers use this
    /// to decide whether weight labels are worth drawing.
    pub show_weights: bool,
}

/// A `DRAW` collaborator. `name` is the identifier the graph is bound to.
pub trait Renderer {
    fn render(&mut self, name: &str, data: &RenderData) -> Result<()>;
}

/// Default renderer that discards every request.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _name: &str, _data: &RenderData) -> Result<()> {
        Ok(())
    }
}
