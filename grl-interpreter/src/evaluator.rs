//! Statement and expression evaluation for GRL programs.
//!
//! The parser hands over a tree of suspended computations; nothing in it
//! has run yet. Evaluation walks a node's children left to right and then
//! applies the node's own semantics, so the body of an `IF` branch or a
//! `FOR` iteration only executes when that branch or iteration is actually
//! reached. A loop body subtree is re-walked on every iteration and always
//! observes the latest variable bindings, never a parse-time snapshot.

use crate::environment::Environment;
use crate::error::{Result, RuntimeError};
use crate::graph::Graph;
use crate::render::{NullRenderer, Renderer};
use crate::storage;
use crate::value::Value;
use grl_parser::{
    BinaryOperator, EdgeRef, Entity, Expression, ExpressionKind, ForStatement, GraphQuery,
    IfStatement, IteratorExpr, IteratorKind, NodeRef, NodeRefKind, Program, QueryKind, Statement,
    StatementKind, UnaryOperator,
};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fs;
use std::io::{self, Write};
use std::rc::Rc;

/// Signal returned by statement evaluation: keep going, or unwind the whole
/// program because an `EXIT` statement ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One running GRL program instance.
///
/// Owns the environment and the output sink, so independent interpreters
/// never interfere. Output goes to stdout by default; tests capture it by
/// constructing the interpreter over a buffer.
pub struct Interpreter<W: Write> {
    env: Environment,
    out: W,
    renderer: Box<dyn Renderer>,
}

impl Interpreter<io::Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(out: W) -> Self {
        Self {
            env: Environment::new(),
            out,
            renderer: Box::new(NullRenderer),
        }
    }

    /// Install the `DRAW` collaborator.
    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = renderer;
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Parse and evaluate a program text. The text either parses as a whole
    /// or nothing runs at all.
    pub fn run_source(&mut self, source: &str) -> Result<Flow> {
        let program = grl_parser::parse_program(source)?;
        self.run_program(&program)
    }

    pub fn run_program(&mut self, program: &Program) -> Result<Flow> {
        self.run_statements(&program.statements)
    }

    fn run_statements(&mut self, statements: &[Statement]) -> Result<Flow> {
        for statement in statements {
            if self.eval_statement(statement)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn eval_statement(&mut self, statement: &Statement) -> Result<Flow> {
        match &statement.kind {
            StatementKind::If(if_statement) => self.eval_if(if_statement),
            StatementKind::For(for_statement) => self.eval_for(for_statement),
            StatementKind::Print(expression) => {
                let value = self.eval_expression(expression)?;
                writeln!(self.out, "{}", value)
                    .map_err(|error| RuntimeError::io("output", error))?;
                Ok(Flow::Continue)
            }
            StatementKind::Add(entity, graph) => {
                self.eval_add(entity, &graph.name)?;
                Ok(Flow::Continue)
            }
            StatementKind::Remove(entity, graph) => {
                self.eval_remove(entity, &graph.name)?;
                Ok(Flow::Continue)
            }
            StatementKind::SetWeight {
                edge,
                weight,
                graph,
            } => {
                let (source, target) = self.resolve_edge(edge)?;
                let weight = self.eval_number(weight, "SET WEIGHT")?;
                let graph = self.env.lookup_graph(&graph.name)?;
                graph.borrow_mut().set_weight(&source, &target, weight)?;
                Ok(Flow::Continue)
            }
            StatementKind::Set { name, value } => {
                let value = self.eval_expression(value)?;
                self.env.bind(&name.name, value);
                Ok(Flow::Continue)
            }
            StatementKind::Exit => Ok(Flow::Exit),
            StatementKind::Run(path) => self.eval_run(path),
            StatementKind::Draw(name) => {
                let graph = self.env.lookup_graph(&name.name)?;
                let data = graph.borrow().render_data();
                self.renderer.render(&name.name, &data)?;
                Ok(Flow::Continue)
            }
            StatementKind::Import { name, path } => {
                self.eval_import(&name.name, path)?;
                Ok(Flow::Continue)
            }
            StatementKind::Export { name, path } => {
                self.eval_export(&name.name, path)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Branches are tried in order and at most one block executes.
    fn eval_if(&mut self, statement: &IfStatement) -> Result<Flow> {
        if self.eval_condition(&statement.condition)? {
            return self.run_statements(&statement.then_block.statements);
        }
        for clause in &statement.elseif_clauses {
            if self.eval_condition(&clause.condition)? {
                return self.run_statements(&clause.block.statements);
            }
        }
        if let Some(block) = &statement.else_block {
            return self.run_statements(&block.statements);
        }
        Ok(Flow::Continue)
    }

    /// The iterator sequence is materialized before the first iteration, so
    /// the body may freely mutate the graph it came from. Loop variables
    /// are removed on every exit path: normal completion, `EXIT`, and a
    /// raised error.
    fn eval_for(&mut self, statement: &ForStatement) -> Result<Flow> {
        let rows = self.eval_iterator(&statement.iterator)?;

        let mut outcome = Ok(Flow::Continue);
        'rows: for row in rows {
            for (variable, value) in statement.variables.iter().zip(row) {
                self.env.bind(&variable.name, value);
            }
            match self.run_statements(&statement.body.statements) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    outcome = Ok(Flow::Exit);
                    break 'rows;
                }
                Err(error) => {
                    outcome = Err(error);
                    break 'rows;
                }
            }
        }

        for variable in &statement.variables {
            self.env.unbind(&variable.name);
        }
        outcome
    }

    fn eval_iterator(&mut self, iterator: &IteratorExpr) -> Result<Vec<Vec<Value>>> {
        match &iterator.kind {
            IteratorKind::Nodes(graph) => {
                let graph = self.env.lookup_graph(&graph.name)?;
                let nodes = graph.borrow().nodes();
                Ok(single(nodes))
            }
            IteratorKind::TopologicalSort(graph) => {
                let graph = self.env.lookup_graph(&graph.name)?;
                let order = graph.borrow().topological_sort()?;
                Ok(single(order))
            }
            IteratorKind::ShortestPath(edge, graph) => {
                let (source, target) = self.resolve_edge(edge)?;
                let graph = self.env.lookup_graph(&graph.name)?;
                let path = graph.borrow().shortest_path(&source, &target)?;
                Ok(single(path))
            }
            IteratorKind::Neighbors(node, graph) => {
                let label = self.resolve_node(node)?;
                let graph = self.env.lookup_graph(&graph.name)?;
                let neighbors = graph.borrow().neighbors(&label)?;
                Ok(single(neighbors))
            }
            IteratorKind::Edges(graph) => {
                let graph = self.env.lookup_graph(&graph.name)?;
                let edges = graph.borrow().edges();
                Ok(label_pairs(edges))
            }
            IteratorKind::DistanceFrom(node, graph) => {
                let label = self.resolve_node(node)?;
                let graph = self.env.lookup_graph(&graph.name)?;
                let distances = graph.borrow().distances_from(&label)?;
                Ok(distances
                    .into_iter()
                    .map(|(target, distance)| {
                        vec![Value::String(target), Value::Number(distance)]
                    })
                    .collect())
            }
            IteratorKind::Dfs(node, graph) => {
                let label = self.resolve_node(node)?;
                let graph = self.env.lookup_graph(&graph.name)?;
                let edges = graph.borrow().dfs_edges(&label)?;
                Ok(label_pairs(edges))
            }
            IteratorKind::Bfs(node, graph) => {
                let label = self.resolve_node(node)?;
                let graph = self.env.lookup_graph(&graph.name)?;
                let edges = graph.borrow().bfs_edges(&label)?;
                Ok(label_pairs(edges))
            }
            IteratorKind::DistanceMatrix(graph) => {
                let graph = self.env.lookup_graph(&graph.name)?;
                let matrix = graph.borrow().distance_matrix()?;
                Ok(matrix
                    .into_iter()
                    .map(|(source, target, distance)| {
                        vec![
                            Value::String(source),
                            Value::String(target),
                            Value::Number(distance),
                        ]
                    })
                    .collect())
            }
        }
    }

    fn eval_add(&mut self, entity: &Entity, name: &str) -> Result<()> {
        match entity {
            Entity::Graph(kind) => {
                if self.env.is_bound(name) {
                    return Err(RuntimeError::duplicate_entity(name));
                }
                let graph = Graph::new(*kind);
                self.env
                    .bind(name, Value::Graph(Rc::new(RefCell::new(graph))));
            }
            Entity::Node(node) => {
                let label = self.resolve_node(node)?;
                let graph = self.env.lookup_graph(name)?;
                graph.borrow_mut().add_node(&label);
            }
            Entity::Edge(edge) => {
                let (source, target) = self.resolve_edge(edge)?;
                let graph = self.env.lookup_graph(name)?;
                graph.borrow_mut().add_edge(&source, &target);
            }
        }
        Ok(())
    }

    fn eval_remove(&mut self, entity: &Entity, name: &str) -> Result<()> {
        // The binding must be a graph whichever entity is being removed.
        let graph = self.env.lookup_graph(name)?;
        match entity {
            Entity::Graph(_) => {
                drop(graph);
                self.env.unbind(name);
            }
            Entity::Node(node) => {
                let label = self.resolve_node(node)?;
                graph.borrow_mut().remove_node(&label)?;
            }
            Entity::Edge(edge) => {
                let (source, target) = self.resolve_edge(edge)?;
                graph.borrow_mut().remove_edge(&source, &target)?;
            }
        }
        Ok(())
    }

    /// `RUN <path>`: load another program text and evaluate it as if it
    /// were inlined here, against the same environment. An `EXIT` inside
    /// the loaded program terminates the caller too.
    fn eval_run(&mut self, path: &Expression) -> Result<Flow> {
        let path = self.eval_string(path, "RUN")?;
        let source =
            fs::read_to_string(&path).map_err(|error| RuntimeError::io(&path, error))?;
        let program = grl_parser::parse_program(&source)?;
        self.run_program(&program)
    }

    fn eval_import(&mut self, name: &str, path: &Expression) -> Result<()> {
        if self.env.is_bound(name) {
            return Err(RuntimeError::duplicate_entity(name));
        }
        let path = format!("{}.grlg", self.eval_string(path, "IMPORT")?);
        let content =
            fs::read_to_string(&path).map_err(|error| RuntimeError::io(&path, error))?;
        let graph = storage::read_graph(&content)?;
        self.env
            .bind(name, Value::Graph(Rc::new(RefCell::new(graph))));
        Ok(())
    }

    fn eval_export(&mut self, name: &str, path: &Expression) -> Result<()> {
        let graph = self.env.lookup_graph(name)?;
        let path = format!("{}.grlg", self.eval_string(path, "EXPORT")?);
        let content = storage::write_graph(&graph.borrow());
        fs::write(&path, content).map_err(|error| RuntimeError::io(&path, error))?;
        Ok(())
    }

    // Expressions

    /// Evaluate an expression subtree: children left to right, then the
    /// node's own operation.
    pub fn eval_expression(&mut self, expression: &Expression) -> Result<Value> {
        match &expression.kind {
            ExpressionKind::Boolean(value) => Ok(Value::Boolean(*value)),
            ExpressionKind::Number(value) => Ok(Value::Number(*value)),
            ExpressionKind::String(value) => Ok(Value::String(value.clone())),
            ExpressionKind::Identifier(name) => self.env.lookup(name),
            ExpressionKind::BinaryOp(operation) => {
                let left = self.eval_expression(&operation.left)?;
                let right = self.eval_expression(&operation.right)?;
                apply_binary(operation.operator, &left, &right)
            }
            ExpressionKind::UnaryOp(operation) => {
                let operand = self.eval_expression(&operation.operand)?;
                match operation.operator {
                    UnaryOperator::Not => operand.negate(),
                }
            }
            ExpressionKind::Cast(cast) => {
                let operand = self.eval_expression(&cast.operand)?;
                operand.cast(cast.target)
            }
            ExpressionKind::Query(query) => self.eval_query(query),
        }
    }

    fn eval_query(&mut self, query: &GraphQuery) -> Result<Value> {
        match &query.kind {
            QueryKind::Exists(name) => Ok(Value::Boolean(self.env.is_bound(&name.name))),
            QueryKind::IsKind(kind, name) => {
                let matches = match self.env.lookup(&name.name)? {
                    Value::Graph(graph) => graph.borrow().kind() == *kind,
                    _ => false,
                };
                Ok(Value::Boolean(matches))
            }
            QueryKind::HasNode(node, name) => {
                let label = self.resolve_node(node)?;
                let graph = self.env.lookup_graph(&name.name)?;
                let result = graph.borrow().has_node(&label);
                Ok(Value::Boolean(result))
            }
            QueryKind::HasEdge(edge, name) => {
                let (source, target) = self.resolve_edge(edge)?;
                let graph = self.env.lookup_graph(&name.name)?;
                let result = graph.borrow().has_edge(&source, &target);
                Ok(Value::Boolean(result))
            }
            QueryKind::NodeCount(name) => {
                let graph = self.env.lookup_graph(&name.name)?;
                let count = graph.borrow().node_count();
                Ok(Value::Number(count as f64))
            }
            QueryKind::EdgeCount(name) => {
                let graph = self.env.lookup_graph(&name.name)?;
                let count = graph.borrow().edge_count();
                Ok(Value::Number(count as f64))
            }
            QueryKind::Weight(edge, name) => {
                let (source, target) = self.resolve_edge(edge)?;
                let graph = self.env.lookup_graph(&name.name)?;
                let weight = graph.borrow().weight(&source, &target)?;
                Ok(Value::Number(weight))
            }
            QueryKind::Distance(edge, name) => {
                let (source, target) = self.resolve_edge(edge)?;
                let graph = self.env.lookup_graph(&name.name)?;
                let distance = graph.borrow().distance(&source, &target)?;
                Ok(Value::Number(distance))
            }
        }
    }

    fn eval_condition(&mut self, expression: &Expression) -> Result<bool> {
        match self.eval_expression(expression)? {
            Value::Boolean(value) => Ok(value),
            other => Err(RuntimeError::InvalidCondition {
                found: other.type_name().to_string(),
            }),
        }
    }

    fn eval_string(&mut self, expression: &Expression, context: &str) -> Result<String> {
        match self.eval_expression(expression)? {
            Value::String(value) => Ok(value),
            other => Err(RuntimeError::invalid_operation(
                context,
                vec![other.type_name().to_string()],
            )),
        }
    }

    fn eval_number(&mut self, expression: &Expression, context: &str) -> Result<f64> {
        match self.eval_expression(expression)? {
            Value::Number(value) => Ok(value),
            other => Err(RuntimeError::invalid_operation(
                context,
                vec![other.type_name().to_string()],
            )),
        }
    }

    /// Resolve a node reference to its label: a literal, or a variable that
    /// must hold a string.
    fn resolve_node(&self, node: &NodeRef) -> Result<String> {
        match &node.kind {
            NodeRefKind::Literal(label) => Ok(label.clone()),
            NodeRefKind::Variable(name) => match self.env.lookup(name)? {
                Value::String(label) => Ok(label),
                other => Err(RuntimeError::type_mismatch(
                    name,
                    "string",
                    other.type_name(),
                )),
            },
        }
    }

    fn resolve_edge(&self, edge: &EdgeRef) -> Result<(String, String)> {
        let source = self.resolve_node(&edge.source)?;
        let target = self.resolve_node(&edge.target)?;
        Ok((source, target))
    }
}

fn apply_binary(operator: BinaryOperator, left: &Value, right: &Value) -> Result<Value> {
    match operator {
        BinaryOperator::Implies => left.implies(right),
        BinaryOperator::Xor => left.xor(right),
        BinaryOperator::Or => left.or(right),
        BinaryOperator::And => left.and(right),
        BinaryOperator::Equal => Ok(Value::Boolean(left.equals(right))),
        BinaryOperator::NotEqual => Ok(Value::Boolean(!left.equals(right))),
        BinaryOperator::Less => {
            let ordering = left.compare(right)?;
            Ok(Value::Boolean(ordering == Ordering::Less))
        }
        BinaryOperator::LessEqual => {
            let ordering = left.compare(right)?;
            Ok(Value::Boolean(ordering != Ordering::Greater))
        }
        BinaryOperator::Greater => {
            let ordering = left.compare(right)?;
            Ok(Value::Boolean(ordering == Ordering::Greater))
        }
        BinaryOperator::GreaterEqual => {
            let ordering = left.compare(right)?;
            Ok(Value::Boolean(ordering != Ordering::Less))
        }
        BinaryOperator::Add => left.add(right),
        BinaryOperator::Subtract => left.subtract(right),
        BinaryOperator::Multiply => left.multiply(right),
        BinaryOperator::Divide => left.divide(right),
        BinaryOperator::Power => left.power(right),
    }
}

fn single(labels: Vec<String>) -> Vec<Vec<Value>> {
    labels
        .into_iter()
        .map(|label| vec![Value::String(label)])
        .collect()
}

fn label_pairs(pairs: Vec<(String, String)>) -> Vec<Vec<Value>> {
    pairs
        .into_iter()
        .map(|(first, second)| vec![Value::String(first), Value::String(second)])
        .collect()
}
