// Iterator parsing for the GRL parser
// Graph-derived sequences usable as the source of a FOR loop

use super::{GrlParser, Rule};
use crate::ast::*;
use crate::error::*;
use pest::iterators::Pair;

impl GrlParser {
    pub(super) fn parse_iterator(src: &str, pair: Pair<Rule>) -> ParseResult<IteratorExpr> {
        let span = Self::span_of(&pair);
        let inner = pair.into_inner().next().unwrap();

        let kind = match inner.as_rule() {
            Rule::single_iterator => Self::parse_single_iterator(src, inner)?,
            Rule::double_iterator => Self::parse_double_iterator(src, inner)?,
            Rule::triple_iterator => Self::parse_triple_iterator(inner),
            _ => unreachable!("Unexpected iterator rule: {:?}", inner.as_rule()),
        };

        Ok(IteratorExpr { kind, span })
    }

    fn parse_single_iterator(src: &str, pair: Pair<Rule>) -> ParseResult<IteratorKind> {
        let mut inner = pair.into_inner();
        let keyword = inner.next().unwrap();

        match keyword.as_rule() {
            Rule::kw_nodes => {
                let graph = Self::parse_identifier(inner.next().unwrap());
                Ok(IteratorKind::Nodes(graph))
            }
            Rule::kw_topological_sort => {
                let graph = Self::parse_identifier(inner.next().unwrap());
                Ok(IteratorKind::TopologicalSort(graph))
            }
            Rule::kw_shortest_path => {
                let edge = Self::parse_edge_ref(src, inner.next().unwrap())?;
                let graph = Self::parse_identifier(inner.next().unwrap());
                Ok(IteratorKind::ShortestPath(edge, graph))
            }
            Rule::kw_neighbors => {
                let node = Self::parse_node_ref(src, inner.next().unwrap())?;
                let graph = Self::parse_identifier(inner.next().unwrap());
                Ok(IteratorKind::Neighbors(node, graph))
            }
            _ => unreachable!("Unexpected single iterator: {:?}", keyword.as_rule()),
        }
    }

    fn parse_double_iterator(src: &str, pair: Pair<Rule>) -> ParseResult<IteratorKind> {
        let mut inner = pair.into_inner();
        let keyword = inner.next().unwrap();

        match keyword.as_rule() {
            Rule::kw_edges => {
                let graph = Self::parse_identifier(inner.next().unwrap());
                Ok(IteratorKind::Edges(graph))
            }
            Rule::kw_distance_from => {
                let node = Self::parse_node_ref(src, inner.next().unwrap())?;
                let graph = Self::parse_identifier(inner.next().unwrap());
                Ok(IteratorKind::DistanceFrom(node, graph))
            }
            Rule::kw_dfs => {
                let node = Self::parse_node_ref(src, inner.next().unwrap())?;
                let graph = Self::parse_identifier(inner.next().unwrap());
                Ok(IteratorKind::Dfs(node, graph))
            }
            Rule::kw_bfs => {
                let node = Self::parse_node_ref(src, inner.next().unwrap())?;
                let graph = Self::parse_identifier(inner.next().unwrap());
                Ok(IteratorKind::Bfs(node, graph))
            }
            _ => unreachable!("Unexpected double iterator: {:?}", keyword.as_rule()),
        }
    }

    fn parse_triple_iterator(pair: Pair<Rule>) -> IteratorKind {
        let mut inner = pair.into_inner();
        let _keyword = inner.next().unwrap();
        let graph = Self::parse_identifier(inner.next().unwrap());
        IteratorKind::DistanceMatrix(graph)
    }
}
