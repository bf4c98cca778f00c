// GRL AST Definitions
// The deferred evaluation tree produced by parsing

use std::fmt;

/// Source position information for AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Top-level program: a sequence of statements executed in order.
///
/// Parsing computes nothing; every node below is a suspended computation
/// that the interpreter walks on demand. A subtree may be evaluated zero,
/// one, or many times (loop bodies), and each evaluation re-reads the
/// runtime environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    If(IfStatement),
    For(ForStatement),
    Print(Expression),
    Add(Entity, Identifier),
    Remove(Entity, Identifier),
    SetWeight {
        edge: EdgeRef,
        weight: Expression,
        graph: Identifier,
    },
    Set {
        name: Identifier,
        value: Expression,
    },
    Exit,
    Run(Expression),
    Draw(Identifier),
    Import {
        name: Identifier,
        path: Expression,
    },
    Export {
        name: Identifier,
        path: Expression,
    },
}

/// `IF cond { ... } ELSEIF cond { ... } ELSE { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_block: Block,
    pub elseif_clauses: Vec<ElseIfClause>,
    pub else_block: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfClause {
    pub condition: Expression,
    pub block: Block,
    pub span: Span,
}

/// `FOR a, b OF <iterator> { ... }` with one to three loop variables.
///
/// The variable count always matches the iterator arity; the parser rejects
/// mismatches before an evaluation tree is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub variables: Vec<Identifier>,
    pub iterator: IteratorExpr,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// Whether a graph is undirected (`GRAPH`) or directed (`DIGRAPH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Graph,
    Digraph,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Graph => write!(f, "GRAPH"),
            GraphKind::Digraph => write!(f, "DIGRAPH"),
        }
    }
}

/// The target of an `ADD`/`RM` statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Graph(GraphKind),
    Node(NodeRef),
    Edge(EdgeRef),
}

/// A node label: either a string literal or an identifier holding one.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRef {
    pub kind: NodeRefKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeRefKind {
    Literal(String),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRef {
    pub source: NodeRef,
    pub target: NodeRef,
    pub span: Span,
}

/// A graph-derived sequence usable as the source of a `FOR` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct IteratorExpr {
    pub kind: IteratorKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IteratorKind {
    /// Every node label, in the graph's own node order.
    Nodes(Identifier),
    /// Node labels in topological order (directed graphs only).
    TopologicalSort(Identifier),
    /// Node labels along a shortest path between the two endpoints.
    ShortestPath(EdgeRef, Identifier),
    /// Out-neighbor labels of a node.
    Neighbors(NodeRef, Identifier),
    /// Every (source, target) pair.
    Edges(Identifier),
    /// (target, distance) for every node reachable from the start.
    DistanceFrom(NodeRef, Identifier),
    /// Depth-first traversal edges from a start node.
    Dfs(NodeRef, Identifier),
    /// Breadth-first traversal edges from a start node.
    Bfs(NodeRef, Identifier),
    /// (source, target, distance) for every ordered reachable pair.
    DistanceMatrix(Identifier),
}

impl IteratorKind {
    /// How many loop variables each produced tuple binds.
    pub fn arity(&self) -> usize {
        match self {
            IteratorKind::Nodes(_)
            | IteratorKind::TopologicalSort(_)
            | IteratorKind::ShortestPath(_, _)
            | IteratorKind::Neighbors(_, _) => 1,
            IteratorKind::Edges(_)
            | IteratorKind::DistanceFrom(_, _)
            | IteratorKind::Dfs(_, _)
            | IteratorKind::Bfs(_, _) => 2,
            IteratorKind::DistanceMatrix(_) => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Boolean(bool),
    Number(f64),
    String(String),
    Identifier(String),
    BinaryOp(BinaryOperation),
    UnaryOp(UnaryOperation),
    Cast(CastOperation),
    Query(GraphQuery),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Implies,
    Xor,
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    /// Comparators are non-associative: `a == b == c` is a grammar error.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Equal
                | BinaryOperator::NotEqual
                | BinaryOperator::Less
                | BinaryOperator::LessEqual
                | BinaryOperator::Greater
                | BinaryOperator::GreaterEqual
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::Implies => "IMPLIES",
            BinaryOperator::Xor => "XOR",
            BinaryOperator::Or => "OR",
            BinaryOperator::And => "AND",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "^",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
}

/// An explicit type cast: `TO NUMBER x`, `TO STRING x`, `TO BOOL x`.
#[derive(Debug, Clone, PartialEq)]
pub struct CastOperation {
    pub target: CastTarget,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastTarget {
    Number,
    String,
    Boolean,
}

impl fmt::Display for CastTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastTarget::Number => write!(f, "TO NUMBER"),
            CastTarget::String => write!(f, "TO STRING"),
            CastTarget::Boolean => write!(f, "TO BOOL"),
        }
    }
}

/// A read-only query against the environment or a bound graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQuery {
    pub kind: QueryKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryKind {
    /// `EXISTS id`: the identifier is bound, to a value of any type.
    Exists(Identifier),
    /// `IS GRAPH id` / `IS DIGRAPH id`
    IsKind(GraphKind, Identifier),
    /// `HAS <node> id`
    HasNode(NodeRef, Identifier),
    /// `HAS EDGE <edge> id`
    HasEdge(EdgeRef, Identifier),
    /// `NODE COUNT id`
    NodeCount(Identifier),
    /// `EDGE COUNT id`
    EdgeCount(Identifier),
    /// `GET WEIGHT OF EDGE <edge> id`
    Weight(EdgeRef, Identifier),
    /// `GET DISTANCE BETWEEN <edge> id`
    Distance(EdgeRef, Identifier),
}
