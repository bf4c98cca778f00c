//! Reader and writer for the persisted `.grlg` graph format.
//!
//! The format is a two-part text file. The first line is the graph kind tag
//! (`GRAPH` or `DIGRAPH`); every following line maps one node to its
//! ordered out-neighbor list:
//!
//! ```text
//! DIGRAPH
//! "a": "b" "c"(2.5)
//! "b":
//! "c": "a"(-1)
//! ```
//!
//! A bare neighbor implies the default weight of 1; a parenthesized number
//! records an explicit weight. Exporting and re-importing reconstructs the
//! same kind, node set, edge set, and every non-default weight.

use crate::error::{Result, RuntimeError};
use crate::graph::{DEFAULT_WEIGHT, Graph};
use grl_parser::GraphKind;
use std::fmt::Write;

/// Serialize a graph into the `.grlg` text form.
pub fn write_graph(graph: &Graph) -> String {
    let mut adjacency: Vec<(String, Vec<(String, f64)>)> = graph
        .nodes()
        .into_iter()
        .map(|node| (node, Vec::new()))
        .collect();

    for (source, target, weight) in graph.weighted_edges() {
        let entry = adjacency
            .iter_mut()
            .find(|(node, _)| *node == source)
            .expect("edge source is always a known node");
        entry.1.push((target, weight));
    }

    let mut out = String::new();
    writeln!(out, "{}", graph.kind()).unwrap();
    for (node, neighbors) in adjacency {
        write!(out, "{}:", quote(&node)).unwrap();
        for (target, weight) in neighbors {
            write!(out, " {}", quote(&target)).unwrap();
            if weight != DEFAULT_WEIGHT {
                write!(out, "({})", weight).unwrap();
            }
        }
        out.push('\n');
    }
    out
}

/// Reconstruct a graph from its `.grlg` text form.
pub fn read_graph(content: &str) -> Result<Graph> {
    let mut lines = content.lines().enumerate();

    let kind = loop {
        let (number, line) = lines
            .next()
            .ok_or_else(|| RuntimeError::malformed_graph_file(1, "missing graph kind tag"))?;
        match line.trim() {
            "" => continue,
            "GRAPH" => break GraphKind::Graph,
            "DIGRAPH" => break GraphKind::Digraph,
            other => {
                return Err(RuntimeError::malformed_graph_file(
                    number + 1,
                    format!("expected GRAPH or DIGRAPH, found {:?}", other),
                ));
            }
        }
    };

    let mut graph = Graph::new(kind);
    for (number, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let (node, neighbors) = parse_line(number + 1, line)?;
        graph.add_node(&node);
        for (target, weight) in neighbors {
            graph.add_edge(&node, &target);
            if let Some(weight) = weight {
                graph.set_weight(&node, &target, weight)?;
            }
        }
    }
    Ok(graph)
}

fn quote(label: &str) -> String {
    format!(
        "\"{}\"",
        label.replace('\\', "\\\\").replace('"', "\\\"")
    )
}

fn parse_line(number: usize, line: &str) -> Result<(String, Vec<(String, Option<f64>)>)> {
    let mut cursor = Cursor { line, number, rest: line };

    cursor.skip_spaces();
    let node = cursor.quoted()?;
    cursor.skip_spaces();
    cursor.expect(':')?;

    let mut neighbors = Vec::new();
    loop {
        cursor.skip_spaces();
        if cursor.rest.is_empty() {
            break;
        }
        let target = cursor.quoted()?;
        let weight = if cursor.eat('(') {
            let weight = cursor.number()?;
            cursor.expect(')')?;
            Some(weight)
        } else {
            None
        };
        neighbors.push((target, weight));
    }

    Ok((node, neighbors))
}

/// Minimal single-line scanner for the adjacency syntax.
struct Cursor<'a> {
    line: &'a str,
    number: usize,
    rest: &'a str,
}

impl Cursor<'_> {
    fn skip_spaces(&mut self) {
        self.rest = self.rest.trim_start_matches([' ', '\t']);
    }

    fn eat(&mut self, expected: char) -> bool {
        if let Some(rest) = self.rest.strip_prefix(expected) {
            self.rest = rest;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected {:?} in {:?}", expected, self.line)))
        }
    }

    fn quoted(&mut self) -> Result<String> {
        self.expect('"')?;
        let mut label = String::new();
        let mut chars = self.rest.char_indices();
        while let Some((index, ch)) = chars.next() {
            match ch {
                '"' => {
                    self.rest = &self.rest[index + 1..];
                    return Ok(label);
                }
                '\\' => match chars.next() {
                    Some((_, escaped @ ('"' | '\\'))) => label.push(escaped),
                    _ => return Err(self.error("invalid escape in label")),
                },
                other => label.push(other),
            }
        }
        Err(self.error("unterminated label"))
    }

    fn number(&mut self) -> Result<f64> {
        let end = self
            .rest
            .find(|c: char| !matches!(c, '0'..='9' | '.' | '-' | '+' | 'e' | 'E'))
            .unwrap_or(self.rest.len());
        let (text, rest) = self.rest.split_at(end);
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error(format!("invalid weight {:?}", text)))?;
        self.rest = rest;
        Ok(value)
    }

    fn error(&self, message: impl Into<String>) -> RuntimeError {
        RuntimeError::malformed_graph_file(self.number, message.into())
    }
}
