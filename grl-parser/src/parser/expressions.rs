// Expression parsing module
// Handles operator precedence, graph queries, and cast forms

use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};

use super::{GrlParser, Rule};
use crate::ast::*;
use crate::error::*;

impl GrlParser {
    /// Binary operator precedence parser.
    ///
    /// Levels from lowest to highest binding. `NOT` sits between `AND` and
    /// the comparators, so `NOT a == b` negates the whole comparison. The
    /// cast forms bind tighter than everything here and are handled by the
    /// `operand` rule itself.
    pub(super) fn pratt_parser() -> PrattParser<Rule> {
        PrattParser::new()
            // Level 1: logical implication (lowest precedence)
            .op(Op::infix(Rule::op_implies, Assoc::Left))
            // Level 2: logical XOR
            .op(Op::infix(Rule::op_xor, Assoc::Left))
            // Level 3: logical OR
            .op(Op::infix(Rule::op_or, Assoc::Left))
            // Level 4: logical AND
            .op(Op::infix(Rule::op_and, Assoc::Left))
            // Level 5: logical NOT (prefix)
            .op(Op::prefix(Rule::op_not))
            // Level 6: comparators (non-associative, enforced below)
            .op(Op::infix(Rule::op_eq, Assoc::Left)
                | Op::infix(Rule::op_neq, Assoc::Left)
                | Op::infix(Rule::op_leq, Assoc::Left)
                | Op::infix(Rule::op_geq, Assoc::Left)
                | Op::infix(Rule::op_lt, Assoc::Left)
                | Op::infix(Rule::op_gt, Assoc::Left))
            // Level 7: additive
            .op(Op::infix(Rule::op_add, Assoc::Left) | Op::infix(Rule::op_sub, Assoc::Left))
            // Level 8: multiplicative
            .op(Op::infix(Rule::op_mul, Assoc::Left) | Op::infix(Rule::op_div, Assoc::Left))
            // Level 9: power (right associative)
            .op(Op::infix(Rule::op_pow, Assoc::Right))
    }

    /// Parse an expression pair through the precedence parser.
    pub(super) fn parse_expression_pair(src: &str, pair: Pair<Rule>) -> ParseResult<Expression> {
        Self::parse_expression_pairs(src, pair.into_inner())
    }

    fn parse_expression_pairs(src: &str, pairs: Pairs<Rule>) -> ParseResult<Expression> {
        Self::pratt_parser()
            .map_primary(|primary| match primary.as_rule() {
                Rule::operand => Self::parse_operand(src, primary),
                _ => unreachable!("Unexpected primary rule: {:?}", primary.as_rule()),
            })
            .map_prefix(|op, operand| {
                let operand = operand?;
                let span = Span::new(Self::span_of(&op).start, operand.span.end);
                Ok(Expression {
                    kind: ExpressionKind::UnaryOp(UnaryOperation {
                        operator: UnaryOperator::Not,
                        operand: Box::new(operand),
                        span,
                    }),
                    span,
                })
            })
            .map_infix(|left, op, right| {
                let left = left?;
                let right = right?;

                let operator = match op.as_rule() {
                    Rule::op_implies => BinaryOperator::Implies,
                    Rule::op_xor => BinaryOperator::Xor,
                    Rule::op_or => BinaryOperator::Or,
                    Rule::op_and => BinaryOperator::And,
                    Rule::op_eq => BinaryOperator::Equal,
                    Rule::op_neq => BinaryOperator::NotEqual,
                    Rule::op_lt => BinaryOperator::Less,
                    Rule::op_leq => BinaryOperator::LessEqual,
                    Rule::op_gt => BinaryOperator::Greater,
                    Rule::op_geq => BinaryOperator::GreaterEqual,
                    Rule::op_add => BinaryOperator::Add,
                    Rule::op_sub => BinaryOperator::Subtract,
                    Rule::op_mul => BinaryOperator::Multiply,
                    Rule::op_div => BinaryOperator::Divide,
                    Rule::op_pow => BinaryOperator::Power,
                    _ => unreachable!("Unexpected binary operator: {:?}", op.as_rule()),
                };

                // Comparators are non-associative. Left association means a
                // chain like `a == b == c` always surfaces as a comparison
                // on the left-hand side; a parenthesized comparison on the
                // right is legal and never reaches this branch unbracketed.
                if operator.is_comparison() {
                    if let ExpressionKind::BinaryOp(inner) = &left.kind {
                        if inner.operator.is_comparison() {
                            return Err(ParseError::chained_comparison(src, Self::span_of(&op)));
                        }
                    }
                }

                let span = Span::new(left.span.start, right.span.end);
                Ok(Expression {
                    kind: ExpressionKind::BinaryOp(BinaryOperation {
                        left: Box::new(left),
                        operator,
                        right: Box::new(right),
                        span,
                    }),
                    span,
                })
            })
            .parse(pairs)
    }

    /// `operand = cast_op operand | primary` — cast forms are the
    /// tightest-binding prefixes and right-associate by recursion.
    fn parse_operand(src: &str, pair: Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_of(&pair);
        let mut inner = pair.into_inner();
        let first = inner.next().unwrap();

        match first.as_rule() {
            Rule::cast_op => {
                let target = match first.into_inner().next().unwrap().as_rule() {
                    Rule::cast_number => CastTarget::Number,
                    Rule::cast_string => CastTarget::String,
                    Rule::cast_bool => CastTarget::Boolean,
                    _ => unreachable!("Unexpected cast rule"),
                };
                let operand = Self::parse_operand(src, inner.next().unwrap())?;
                Ok(Expression {
                    kind: ExpressionKind::Cast(CastOperation {
                        target,
                        operand: Box::new(operand),
                        span,
                    }),
                    span,
                })
            }
            Rule::primary => Self::parse_primary(src, first),
            _ => unreachable!("Unexpected operand rule: {:?}", first.as_rule()),
        }
    }

    fn parse_primary(src: &str, pair: Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_of(&pair);
        let inner = pair.into_inner().next().unwrap();

        let kind = match inner.as_rule() {
            Rule::boolean => ExpressionKind::Boolean(Self::parse_boolean(inner)),
            Rule::number => ExpressionKind::Number(Self::parse_number(src, inner)?),
            Rule::string => ExpressionKind::String(Self::parse_string(src, inner)?),
            Rule::graph_query => ExpressionKind::Query(Self::parse_graph_query(src, inner)?),
            Rule::expression => return Self::parse_expression_pair(src, inner),
            Rule::identifier => ExpressionKind::Identifier(inner.as_str().to_string()),
            _ => unreachable!("Unexpected primary rule: {:?}", inner.as_rule()),
        };

        Ok(Expression { kind, span })
    }

    fn parse_graph_query(src: &str, pair: Pair<Rule>) -> ParseResult<GraphQuery> {
        let span = Self::span_of(&pair);
        let inner = pair.into_inner().next().unwrap();

        let kind = match inner.as_rule() {
            Rule::exists_query => {
                let name = Self::query_identifier(inner);
                QueryKind::Exists(name)
            }
            Rule::is_query => {
                let mut parts = inner.into_inner();
                let _keyword = parts.next().unwrap();
                let kind = Self::parse_graph_kind(parts.next().unwrap());
                let name = Self::parse_identifier(parts.next().unwrap());
                QueryKind::IsKind(kind, name)
            }
            Rule::has_query => Self::parse_has_query(src, inner)?,
            Rule::count_query => {
                let mut parts = inner.into_inner();
                let keyword = parts.next().unwrap();
                let name = Self::parse_identifier(parts.next().unwrap());
                match keyword.as_rule() {
                    Rule::kw_node_count => QueryKind::NodeCount(name),
                    Rule::kw_edge_count => QueryKind::EdgeCount(name),
                    _ => unreachable!("Unexpected count keyword"),
                }
            }
            Rule::weight_query => {
                let (edge, name) = Self::parse_edge_query(src, inner)?;
                QueryKind::Weight(edge, name)
            }
            Rule::distance_query => {
                let (edge, name) = Self::parse_edge_query(src, inner)?;
                QueryKind::Distance(edge, name)
            }
            _ => unreachable!("Unexpected query rule: {:?}", inner.as_rule()),
        };

        Ok(GraphQuery { kind, span })
    }

    /// `HAS <node> id` or `HAS EDGE <edge> id`
    fn parse_has_query(src: &str, pair: Pair<Rule>) -> ParseResult<QueryKind> {
        let mut edge = None;
        let mut node = None;
        let mut name = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::kw_has | Rule::kw_edge => {}
                Rule::edge_ref => edge = Some(Self::parse_edge_ref(src, inner)?),
                Rule::node_ref => node = Some(Self::parse_node_ref(src, inner)?),
                Rule::identifier => name = Some(Self::parse_identifier(inner)),
                _ => unreachable!("Unexpected rule in has query: {:?}", inner.as_rule()),
            }
        }

        let name = name.unwrap();
        match (edge, node) {
            (Some(edge), None) => Ok(QueryKind::HasEdge(edge, name)),
            (None, Some(node)) => Ok(QueryKind::HasNode(node, name)),
            _ => unreachable!("Has query with neither node nor edge"),
        }
    }

    /// The common `... <edge> id` tail of weight and distance queries.
    fn parse_edge_query(src: &str, pair: Pair<Rule>) -> ParseResult<(EdgeRef, Identifier)> {
        let mut edge = None;
        let mut name = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::edge_ref => edge = Some(Self::parse_edge_ref(src, inner)?),
                Rule::identifier => name = Some(Self::parse_identifier(inner)),
                _ => {}
            }
        }

        Ok((edge.unwrap(), name.unwrap()))
    }

    fn query_identifier(pair: Pair<Rule>) -> Identifier {
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::identifier {
                return Self::parse_identifier(inner);
            }
        }
        unreachable!("Query without identifier")
    }
}
