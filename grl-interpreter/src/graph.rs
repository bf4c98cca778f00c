//! The graph engine: GRL's graph value type and its algorithms.
//!
//! A graph is directed or undirected, chosen at creation time and fixed for
//! its lifetime. Nodes are string labels; edges carry an `f64` weight that
//! defaults to 1 until a `SET WEIGHT` statement overwrites it. Shortest-path
//! queries pick Bellman-Ford when any stored weight is negative and
//! Dijkstra otherwise; the classification runs fresh on every query, so
//! mutations between queries are always observed.

use crate::error::{Result, RuntimeError};
use crate::render::RenderData;
use grl_parser::GraphKind;
use petgraph::algo::{astar, bellman_ford, dijkstra, toposort};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences, NodeIndexable};
use petgraph::{Directed, EdgeType, Undirected};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Weight assumed for every edge that never had one set explicitly.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug)]
enum Inner {
    Directed(StableGraph<String, f64, Directed>),
    Undirected(StableGraph<String, f64, Undirected>),
}

/// A labeled, optionally weighted graph.
///
/// Node indices stay stable across removals; the label map gives O(1)
/// label-to-node resolution.
#[derive(Debug)]
pub struct Graph {
    kind: GraphKind,
    labels: HashMap<String, NodeIndex>,
    inner: Inner,
}

impl Graph {
    pub fn new(kind: GraphKind) -> Self {
        let inner = match kind {
            GraphKind::Graph => Inner::Undirected(StableGraph::default()),
            GraphKind::Digraph => Inner::Directed(StableGraph::default()),
        };
        Self {
            kind,
            labels: HashMap::new(),
            inner,
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Digraph
    }

    // Mutation

    /// Add a node; inserting an existing label is a no-op.
    pub fn add_node(&mut self, label: &str) {
        if self.labels.contains_key(label) {
            return;
        }
        let index = match &mut self.inner {
            Inner::Directed(g) => g.add_node(label.to_string()),
            Inner::Undirected(g) => g.add_node(label.to_string()),
        };
        self.labels.insert(label.to_string(), index);
    }

    /// Remove a node and its incident edges.
    pub fn remove_node(&mut self, label: &str) -> Result<()> {
        let index = self
            .labels
            .remove(label)
            .ok_or_else(|| RuntimeError::node_not_found(label))?;
        match &mut self.inner {
            Inner::Directed(g) => g.remove_node(index),
            Inner::Undirected(g) => g.remove_node(index),
        };
        Ok(())
    }

    /// Add an edge with the default weight, creating missing endpoints.
    /// Adding an edge that already exists is a no-op and leaves its weight
    /// untouched.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        self.add_node(source);
        self.add_node(target);
        let a = self.labels[source];
        let b = self.labels[target];
        match &mut self.inner {
            Inner::Directed(g) => {
                if g.find_edge(a, b).is_none() {
                    g.add_edge(a, b, DEFAULT_WEIGHT);
                }
            }
            Inner::Undirected(g) => {
                if g.find_edge(a, b).is_none() {
                    g.add_edge(a, b, DEFAULT_WEIGHT);
                }
            }
        }
    }

    pub fn remove_edge(&mut self, source: &str, target: &str) -> Result<()> {
        let (a, b) = self.edge_endpoints(source, target)?;
        match &mut self.inner {
            Inner::Directed(g) => {
                let edge = g
                    .find_edge(a, b)
                    .ok_or_else(|| RuntimeError::edge_not_found(source, target))?;
                g.remove_edge(edge);
            }
            Inner::Undirected(g) => {
                let edge = g
                    .find_edge(a, b)
                    .ok_or_else(|| RuntimeError::edge_not_found(source, target))?;
                g.remove_edge(edge);
            }
        }
        Ok(())
    }

    /// Set or overwrite an edge weight; the edge must already exist.
    pub fn set_weight(&mut self, source: &str, target: &str, weight: f64) -> Result<()> {
        let (a, b) = self.edge_endpoints(source, target)?;
        match &mut self.inner {
            Inner::Directed(g) => {
                let edge = g
                    .find_edge(a, b)
                    .ok_or_else(|| RuntimeError::edge_not_found(source, target))?;
                g[edge] = weight;
            }
            Inner::Undirected(g) => {
                let edge = g
                    .find_edge(a, b)
                    .ok_or_else(|| RuntimeError::edge_not_found(source, target))?;
                g[edge] = weight;
            }
        }
        Ok(())
    }

    // Queries

    pub fn weight(&self, source: &str, target: &str) -> Result<f64> {
        let (a, b) = self.edge_endpoints(source, target)?;
        match &self.inner {
            Inner::Directed(g) => g.find_edge(a, b).map(|edge| g[edge]),
            Inner::Undirected(g) => g.find_edge(a, b).map(|edge| g[edge]),
        }
        .ok_or_else(|| RuntimeError::edge_not_found(source, target))
    }

    pub fn has_node(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    /// Edge existence; for undirected graphs the stored orientation is
    /// irrelevant.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        match (self.labels.get(source), self.labels.get(target)) {
            (Some(&a), Some(&b)) => match &self.inner {
                Inner::Directed(g) => g.find_edge(a, b).is_some(),
                Inner::Undirected(g) => g.find_edge(a, b).is_some(),
            },
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        match &self.inner {
            Inner::Directed(g) => g.node_count(),
            Inner::Undirected(g) => g.node_count(),
        }
    }

    pub fn edge_count(&self) -> usize {
        match &self.inner {
            Inner::Directed(g) => g.edge_count(),
            Inner::Undirected(g) => g.edge_count(),
        }
    }

    /// Node labels in the graph's own iteration order.
    pub fn nodes(&self) -> Vec<String> {
        match &self.inner {
            Inner::Directed(g) => g.node_indices().map(|n| g[n].clone()).collect(),
            Inner::Undirected(g) => g.node_indices().map(|n| g[n].clone()).collect(),
        }
    }

    /// (source, target) label pairs in stored orientation.
    pub fn edges(&self) -> Vec<(String, String)> {
        self.weighted_edges()
            .into_iter()
            .map(|(source, target, _)| (source, target))
            .collect()
    }

    /// (source, target, weight) for every edge in stored orientation.
    pub fn weighted_edges(&self) -> Vec<(String, String, f64)> {
        match &self.inner {
            Inner::Directed(g) => g
                .edge_references()
                .map(|e| (g[e.source()].clone(), g[e.target()].clone(), *e.weight()))
                .collect(),
            Inner::Undirected(g) => g
                .edge_references()
                .map(|e| (g[e.source()].clone(), g[e.target()].clone(), *e.weight()))
                .collect(),
        }
    }

    /// Out-neighbor labels of a node in adjacency insertion order.
    pub fn neighbors(&self, label: &str) -> Result<Vec<String>> {
        let index = self.node_index(label)?;
        let labels = match &self.inner {
            Inner::Directed(g) => ordered_neighbors(g, index)
                .into_iter()
                .map(|n| g[n].clone())
                .collect(),
            Inner::Undirected(g) => ordered_neighbors(g, index)
                .into_iter()
                .map(|n| g[n].clone())
                .collect(),
        };
        Ok(labels)
    }

    /// A graph has negative weights iff any stored edge weight is negative.
    /// Classified fresh from the current edge set; never cached.
    pub fn has_negative_weights(&self) -> bool {
        match &self.inner {
            Inner::Directed(g) => g.edge_references().any(|e| *e.weight() < 0.0),
            Inner::Undirected(g) => g.edge_references().any(|e| *e.weight() < 0.0),
        }
    }

    // Algorithms

    /// Node labels along a shortest path between two endpoints.
    pub fn shortest_path(&self, source: &str, target: &str) -> Result<Vec<String>> {
        let from = self.node_index(source)?;
        let to = self.node_index(target)?;
        let negative = self.has_negative_weights();
        let path = match &self.inner {
            Inner::Directed(g) => path_between(g, from, to, negative)?,
            Inner::Undirected(g) => path_between(g, from, to, negative)?,
        };
        Ok(path.into_iter().map(|n| self.label_of(n)).collect())
    }

    /// Shortest-path length between two endpoints.
    pub fn distance(&self, source: &str, target: &str) -> Result<f64> {
        let from = self.node_index(source)?;
        let to = self.node_index(target)?;
        let negative = self.has_negative_weights();
        match &self.inner {
            Inner::Directed(g) => distance_between(g, from, to, negative),
            Inner::Undirected(g) => distance_between(g, from, to, negative),
        }
    }

    /// (target, distance) for every node reachable from the start, in the
    /// graph's node order.
    pub fn distances_from(&self, source: &str) -> Result<Vec<(String, f64)>> {
        let from = self.node_index(source)?;
        let negative = self.has_negative_weights();
        let distances = match &self.inner {
            Inner::Directed(g) => distances_from(g, from, negative)?,
            Inner::Undirected(g) => distances_from(g, from, negative)?,
        };
        Ok(distances
            .into_iter()
            .map(|(n, d)| (self.label_of(n), d))
            .collect())
    }

    /// (source, target, distance) for every ordered reachable pair. The
    /// algorithm choice is made once for the whole matrix.
    pub fn distance_matrix(&self) -> Result<Vec<(String, String, f64)>> {
        let negative = self.has_negative_weights();
        let mut matrix = Vec::new();
        match &self.inner {
            Inner::Directed(g) => {
                for from in g.node_indices() {
                    for (to, distance) in distances_from(g, from, negative)? {
                        matrix.push((g[from].clone(), g[to].clone(), distance));
                    }
                }
            }
            Inner::Undirected(g) => {
                for from in g.node_indices() {
                    for (to, distance) in distances_from(g, from, negative)? {
                        matrix.push((g[from].clone(), g[to].clone(), distance));
                    }
                }
            }
        }
        Ok(matrix)
    }

    /// Topological order over all nodes; defined for directed graphs only.
    pub fn topological_sort(&self) -> Result<Vec<String>> {
        match &self.inner {
            Inner::Directed(g) => {
                let order = toposort(g, None).map_err(|_| RuntimeError::CycleDetected)?;
                Ok(order.into_iter().map(|n| g[n].clone()).collect())
            }
            Inner::Undirected(_) => Err(RuntimeError::NotDirected),
        }
    }

    /// Depth-first traversal edges from a start node, in visitation order.
    pub fn dfs_edges(&self, start: &str) -> Result<Vec<(String, String)>> {
        self.traversal_edges(start, false)
    }

    /// Breadth-first traversal edges from a start node, in visitation order.
    pub fn bfs_edges(&self, start: &str) -> Result<Vec<(String, String)>> {
        self.traversal_edges(start, true)
    }

    fn traversal_edges(&self, start: &str, breadth_first: bool) -> Result<Vec<(String, String)>> {
        let from = self.node_index(start)?;
        let edges = match &self.inner {
            Inner::Directed(g) => traversal_edges(g, from, breadth_first),
            Inner::Undirected(g) => traversal_edges(g, from, breadth_first),
        };
        Ok(edges
            .into_iter()
            .map(|(parent, child)| (self.label_of(parent), self.label_of(child)))
            .collect())
    }

    /// Everything the rendering collaborator needs: node set, edge set, and
    /// the weight map.
    pub fn render_data(&self) -> RenderData {
        let edges = self.weighted_edges();
        let show_weights = edges.iter().any(|(_, _, weight)| *weight != DEFAULT_WEIGHT);
        RenderData {
            kind: self.kind,
            nodes: self.nodes(),
            edges,
            show_weights,
        }
    }

    // Index resolution

    fn node_index(&self, label: &str) -> Result<NodeIndex> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| RuntimeError::node_not_found(label))
    }

    /// Endpoints of an edge reference; absent endpoints mean the edge
    /// cannot exist.
    fn edge_endpoints(&self, source: &str, target: &str) -> Result<(NodeIndex, NodeIndex)> {
        match (self.labels.get(source), self.labels.get(target)) {
            (Some(&a), Some(&b)) => Ok((a, b)),
            _ => Err(RuntimeError::edge_not_found(source, target)),
        }
    }

    fn label_of(&self, index: NodeIndex) -> String {
        match &self.inner {
            Inner::Directed(g) => g[index].clone(),
            Inner::Undirected(g) => g[index].clone(),
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with {} nodes and {} edges",
            self.kind,
            self.node_count(),
            self.edge_count()
        )
    }
}

// Algorithm helpers, generic over edge direction.

fn path_between<Ty: EdgeType>(
    g: &StableGraph<String, f64, Ty>,
    from: NodeIndex,
    to: NodeIndex,
    negative: bool,
) -> Result<Vec<NodeIndex>> {
    if negative {
        bellman_ford_path(g, from, to)
    } else {
        dijkstra_path(g, from, to)
    }
}

fn dijkstra_path<Ty: EdgeType>(
    g: &StableGraph<String, f64, Ty>,
    from: NodeIndex,
    to: NodeIndex,
) -> Result<Vec<NodeIndex>> {
    astar(g, from, |n| n == to, |e| *e.weight(), |_| 0.0)
        .map(|(_, path)| path)
        .ok_or_else(|| RuntimeError::no_path(&g[from], &g[to]))
}

fn bellman_ford_path<Ty: EdgeType>(
    g: &StableGraph<String, f64, Ty>,
    from: NodeIndex,
    to: NodeIndex,
) -> Result<Vec<NodeIndex>> {
    let paths = bellman_ford(g, from).map_err(|_| RuntimeError::NegativeCycle)?;
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        current = paths.predecessors[g.to_index(current)]
            .ok_or_else(|| RuntimeError::no_path(&g[from], &g[to]))?;
        path.push(current);
    }
    path.reverse();
    Ok(path)
}

fn distance_between<Ty: EdgeType>(
    g: &StableGraph<String, f64, Ty>,
    from: NodeIndex,
    to: NodeIndex,
    negative: bool,
) -> Result<f64> {
    if negative {
        let paths = bellman_ford(g, from).map_err(|_| RuntimeError::NegativeCycle)?;
        let distance = paths.distances[g.to_index(to)];
        if distance.is_finite() {
            Ok(distance)
        } else {
            Err(RuntimeError::no_path(&g[from], &g[to]))
        }
    } else {
        let distances = dijkstra(g, from, Some(to), |e| *e.weight());
        distances
            .get(&to)
            .copied()
            .ok_or_else(|| RuntimeError::no_path(&g[from], &g[to]))
    }
}

fn distances_from<Ty: EdgeType>(
    g: &StableGraph<String, f64, Ty>,
    from: NodeIndex,
    negative: bool,
) -> Result<Vec<(NodeIndex, f64)>> {
    if negative {
        let paths = bellman_ford(g, from).map_err(|_| RuntimeError::NegativeCycle)?;
        Ok(g.node_indices()
            .filter_map(|n| {
                let distance = paths.distances[g.to_index(n)];
                distance.is_finite().then_some((n, distance))
            })
            .collect())
    } else {
        let distances = dijkstra(g, from, None, |e| *e.weight());
        Ok(g.node_indices()
            .filter_map(|n| distances.get(&n).map(|d| (n, *d)))
            .collect())
    }
}

/// Tree edges of a traversal from `start`; nodes unreachable from the start
/// never appear.
fn traversal_edges<Ty: EdgeType>(
    g: &StableGraph<String, f64, Ty>,
    start: NodeIndex,
    breadth_first: bool,
) -> Vec<(NodeIndex, NodeIndex)> {
    let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
    let mut result = Vec::new();

    if breadth_first {
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for next in ordered_neighbors(g, node) {
                if visited.insert(next) {
                    result.push((node, next));
                    queue.push_back(next);
                }
            }
        }
    } else {
        let mut stack: Vec<(NodeIndex, NodeIndex)> = ordered_neighbors(g, start)
            .into_iter()
            .rev()
            .map(|next| (start, next))
            .collect();
        while let Some((parent, node)) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            result.push((parent, node));
            for next in ordered_neighbors(g, node).into_iter().rev() {
                if !visited.contains(&next) {
                    stack.push((node, next));
                }
            }
        }
    }

    result
}

/// Adjacency lists iterate newest edge first; reverse to present neighbors
/// in insertion order.
fn ordered_neighbors<Ty: EdgeType>(
    g: &StableGraph<String, f64, Ty>,
    node: NodeIndex,
) -> Vec<NodeIndex> {
    let mut neighbors: Vec<NodeIndex> = g.neighbors(node).collect();
    neighbors.reverse();
    neighbors
}
