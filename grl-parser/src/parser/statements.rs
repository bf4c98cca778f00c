// Statement parsing functions for the GRL parser
// Handles control flow, graph mutation, binding, and I/O statements

use super::{GrlParser, Rule};
use crate::ast::*;
use crate::error::*;
use pest::iterators::Pair;

impl GrlParser {
    pub(super) fn parse_statement(src: &str, pair: Pair<Rule>) -> ParseResult<Statement> {
        let span = Self::span_of(&pair);
        let inner = pair.into_inner().next().unwrap();

        let kind = match inner.as_rule() {
            Rule::if_statement => StatementKind::If(Self::parse_if_statement(src, inner)?),
            Rule::for_statement => StatementKind::For(Self::parse_for_statement(src, inner)?),
            Rule::print_statement => {
                let expression = Self::expression_argument(src, inner)?;
                StatementKind::Print(expression)
            }
            Rule::add_statement => {
                let (entity, graph) = Self::parse_entity_statement(src, inner)?;
                StatementKind::Add(entity, graph)
            }
            Rule::rm_statement => {
                let (entity, graph) = Self::parse_entity_statement(src, inner)?;
                StatementKind::Remove(entity, graph)
            }
            Rule::set_weight_statement => Self::parse_set_weight_statement(src, inner)?,
            Rule::set_statement => Self::parse_set_statement(src, inner)?,
            Rule::exit_statement => StatementKind::Exit,
            Rule::run_statement => {
                let expression = Self::expression_argument(src, inner)?;
                StatementKind::Run(expression)
            }
            Rule::draw_statement => {
                let name = Self::identifier_argument(inner);
                StatementKind::Draw(name)
            }
            Rule::import_statement => {
                let (name, path) = Self::parse_file_statement(src, inner)?;
                StatementKind::Import { name, path }
            }
            Rule::export_statement => {
                let (name, path) = Self::parse_file_statement(src, inner)?;
                StatementKind::Export { name, path }
            }
            _ => unreachable!("Unexpected statement rule: {:?}", inner.as_rule()),
        };

        Ok(Statement { kind, span })
    }

    fn parse_if_statement(src: &str, pair: Pair<Rule>) -> ParseResult<IfStatement> {
        let span = Self::span_of(&pair);
        let mut condition = None;
        let mut then_block = None;
        let mut elseif_clauses = Vec::new();
        let mut else_block = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::kw_if => {}
                Rule::expression => {
                    condition = Some(Self::parse_expression_pair(src, inner)?);
                }
                Rule::block => {
                    then_block = Some(Self::parse_block(src, inner)?);
                }
                Rule::elseif_clause => {
                    elseif_clauses.push(Self::parse_elseif_clause(src, inner)?);
                }
                Rule::else_clause => {
                    else_block = Some(Self::parse_else_clause(src, inner)?);
                }
                _ => unreachable!("Unexpected rule in if statement: {:?}", inner.as_rule()),
            }
        }

        Ok(IfStatement {
            condition: condition.unwrap(),
            then_block: then_block.unwrap(),
            elseif_clauses,
            else_block,
            span,
        })
    }

    fn parse_elseif_clause(src: &str, pair: Pair<Rule>) -> ParseResult<ElseIfClause> {
        let span = Self::span_of(&pair);
        let mut inner = pair.into_inner();

        let _keyword = inner.next().unwrap();
        let condition = Self::parse_expression_pair(src, inner.next().unwrap())?;
        let block = Self::parse_block(src, inner.next().unwrap())?;

        Ok(ElseIfClause {
            condition,
            block,
            span,
        })
    }

    fn parse_else_clause(src: &str, pair: Pair<Rule>) -> ParseResult<Block> {
        let mut inner = pair.into_inner();
        let _keyword = inner.next().unwrap();
        Self::parse_block(src, inner.next().unwrap())
    }

    /// Parse a `FOR` loop, rejecting a variable count that does not match
    /// the iterator's tuple arity before any evaluation tree is built.
    fn parse_for_statement(src: &str, pair: Pair<Rule>) -> ParseResult<ForStatement> {
        let span = Self::span_of(&pair);
        let mut variables = Vec::new();
        let mut iterator = None;
        let mut body = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::kw_for | Rule::kw_of => {}
                Rule::identifier => variables.push(Self::parse_identifier(inner)),
                Rule::iterator => iterator = Some(Self::parse_iterator(src, inner)?),
                Rule::block => body = Some(Self::parse_block(src, inner)?),
                _ => unreachable!("Unexpected rule in for statement: {:?}", inner.as_rule()),
            }
        }

        let iterator = iterator.unwrap();
        let body = body.unwrap();

        if variables.len() != iterator.kind.arity() {
            return Err(ParseError::iterator_arity(
                src,
                span,
                variables.len(),
                iterator.kind.arity(),
            ));
        }

        Ok(ForStatement {
            variables,
            iterator,
            body,
            span,
        })
    }

    pub(super) fn parse_block(src: &str, pair: Pair<Rule>) -> ParseResult<Block> {
        let span = Self::span_of(&pair);
        let sequence = pair.into_inner().next().unwrap();
        let statements = Self::parse_statement_sequence(src, sequence)?;
        Ok(Block { statements, span })
    }

    /// `ADD <entity> id` / `RM <entity> id`
    fn parse_entity_statement(src: &str, pair: Pair<Rule>) -> ParseResult<(Entity, Identifier)> {
        let mut entity = None;
        let mut graph = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::kw_add | Rule::kw_rm => {}
                Rule::entity => entity = Some(Self::parse_entity(src, inner)?),
                Rule::identifier => graph = Some(Self::parse_identifier(inner)),
                _ => unreachable!("Unexpected rule in entity statement: {:?}", inner.as_rule()),
            }
        }

        Ok((entity.unwrap(), graph.unwrap()))
    }

    fn parse_set_weight_statement(src: &str, pair: Pair<Rule>) -> ParseResult<StatementKind> {
        let mut edge = None;
        let mut weight = None;
        let mut graph = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::kw_set | Rule::kw_weight | Rule::kw_of | Rule::kw_edge => {}
                Rule::edge_ref => edge = Some(Self::parse_edge_ref(src, inner)?),
                Rule::expression => weight = Some(Self::parse_expression_pair(src, inner)?),
                Rule::identifier => graph = Some(Self::parse_identifier(inner)),
                _ => unreachable!("Unexpected rule in set weight: {:?}", inner.as_rule()),
            }
        }

        Ok(StatementKind::SetWeight {
            edge: edge.unwrap(),
            weight: weight.unwrap(),
            graph: graph.unwrap(),
        })
    }

    fn parse_set_statement(src: &str, pair: Pair<Rule>) -> ParseResult<StatementKind> {
        let mut inner = pair.into_inner();
        let _keyword = inner.next().unwrap();
        let name = Self::parse_identifier(inner.next().unwrap());
        let value = Self::parse_expression_pair(src, inner.next().unwrap())?;
        Ok(StatementKind::Set { name, value })
    }

    /// `IMPORT id <path>` / `EXPORT id <path>`
    fn parse_file_statement(
        src: &str,
        pair: Pair<Rule>,
    ) -> ParseResult<(Identifier, Expression)> {
        let mut inner = pair.into_inner();
        let _keyword = inner.next().unwrap();
        let name = Self::parse_identifier(inner.next().unwrap());
        let path = Self::parse_expression_pair(src, inner.next().unwrap())?;
        Ok((name, path))
    }

    pub(super) fn parse_entity(src: &str, pair: Pair<Rule>) -> ParseResult<Entity> {
        let mut inner = pair.into_inner();
        let first = inner.next().unwrap();
        match first.as_rule() {
            Rule::graph_kind => Ok(Entity::Graph(Self::parse_graph_kind(first))),
            Rule::kw_node => {
                let node = Self::parse_node_ref(src, inner.next().unwrap())?;
                Ok(Entity::Node(node))
            }
            Rule::kw_edge => {
                let edge = Self::parse_edge_ref(src, inner.next().unwrap())?;
                Ok(Entity::Edge(edge))
            }
            _ => unreachable!("Unexpected entity rule: {:?}", first.as_rule()),
        }
    }

    pub(super) fn parse_graph_kind(pair: Pair<Rule>) -> GraphKind {
        let inner = pair.into_inner().next().unwrap();
        match inner.as_rule() {
            Rule::kw_graph => GraphKind::Graph,
            Rule::kw_digraph => GraphKind::Digraph,
            _ => unreachable!("Unexpected graph kind rule: {:?}", inner.as_rule()),
        }
    }

    pub(super) fn parse_node_ref(src: &str, pair: Pair<Rule>) -> ParseResult<NodeRef> {
        let span = Self::span_of(&pair);
        let inner = pair.into_inner().next().unwrap();
        let kind = match inner.as_rule() {
            Rule::string => NodeRefKind::Literal(Self::parse_string(src, inner)?),
            Rule::identifier => NodeRefKind::Variable(inner.as_str().to_string()),
            _ => unreachable!("Unexpected node ref rule: {:?}", inner.as_rule()),
        };
        Ok(NodeRef { kind, span })
    }

    pub(super) fn parse_edge_ref(src: &str, pair: Pair<Rule>) -> ParseResult<EdgeRef> {
        let span = Self::span_of(&pair);
        let mut inner = pair.into_inner();
        let source = Self::parse_node_ref(src, inner.next().unwrap())?;
        let target = Self::parse_node_ref(src, inner.next().unwrap())?;
        Ok(EdgeRef {
            source,
            target,
            span,
        })
    }

    /// Extract the single expression argument of a one-argument statement.
    fn expression_argument(src: &str, pair: Pair<Rule>) -> ParseResult<Expression> {
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::expression {
                return Self::parse_expression_pair(src, inner);
            }
        }
        unreachable!("Statement without expression argument")
    }

    /// Extract the single identifier argument of a one-argument statement.
    fn identifier_argument(pair: Pair<Rule>) -> Identifier {
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::identifier {
                return Self::parse_identifier(inner);
            }
        }
        unreachable!("Statement without identifier argument")
    }
}
