//! DOT renderer: the shipped `DRAW` collaborator.
//!
//! Writes `<id>.dot` next to the working directory; any Graphviz tool turns
//! that into a picture. Weight labels are only emitted when the graph
//! carries a non-default weight somewhere.

use grl_interpreter::{RenderData, Renderer, RuntimeError};
use grl_parser::GraphKind;
use std::fmt::Write as _;
use std::fs;

pub struct DotRenderer;

impl Renderer for DotRenderer {
    fn render(&mut self, name: &str, data: &RenderData) -> Result<(), RuntimeError> {
        let path = format!("{}.dot", name);
        fs::write(&path, to_dot(name, data)).map_err(|error| RuntimeError::io(&path, error))?;
        println!("Wrote {}", path);
        Ok(())
    }
}

fn to_dot(name: &str, data: &RenderData) -> String {
    let (keyword, arrow) = match data.kind {
        GraphKind::Digraph => ("digraph", "->"),
        GraphKind::Graph => ("graph", "--"),
    };

    let mut out = String::new();
    writeln!(out, "{} {} {{", keyword, name).unwrap();
    for node in &data.nodes {
        writeln!(out, "    {};", quote(node)).unwrap();
    }
    for (source, target, weight) in &data.edges {
        write!(out, "    {} {} {}", quote(source), arrow, quote(target)).unwrap();
        if data.show_weights {
            write!(out, " [label={}]", quote(&weight.to_string())).unwrap();
        }
        out.push_str(";\n");
    }
    out.push_str("}\n");
    out
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
