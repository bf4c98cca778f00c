// GRL Parser
// Converts the token stream produced by the grammar into the evaluation tree

mod expressions;
mod iterators;
mod literals;
mod statements;

use crate::ast::*;
use crate::error::*;
use pest::iterators::Pair;
use pest::Parser;

/// Pest parser generated from the GRL grammar
#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
pub struct GrlParser;

impl GrlParser {
    /// Parse a whole program into its evaluation tree.
    ///
    /// Nothing is computed here: every statement becomes a suspended node
    /// that the interpreter evaluates later, so a program either parses as
    /// a whole or yields no executable tree at all.
    pub fn parse_program(input: &str) -> ParseResult<Program> {
        let mut pairs = <GrlParser as Parser<Rule>>::parse(Rule::program, input)
            .map_err(|error| ParseError::from_pest_error(error, input.to_string()))?;
        let program_pair = pairs.next().unwrap();
        Self::parse_program_pair(input, program_pair)
    }

    /// Parse a single expression (used by the interactive session).
    pub fn parse_expression(input: &str) -> ParseResult<Expression> {
        let mut pairs = <GrlParser as Parser<Rule>>::parse(Rule::expression_input, input)
            .map_err(|error| ParseError::from_pest_error(error, input.to_string()))?;
        let root = pairs.next().unwrap();
        let expression_pair = root.into_inner().next().unwrap();
        Self::parse_expression_pair(input, expression_pair)
    }

    fn parse_program_pair(src: &str, pair: Pair<Rule>) -> ParseResult<Program> {
        let span = Self::span_of(&pair);
        let mut statements = Vec::new();

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::statement_sequence => {
                    statements = Self::parse_statement_sequence(src, inner)?;
                }
                Rule::EOI => {}
                _ => unreachable!("Unexpected rule in program: {:?}", inner.as_rule()),
            }
        }

        Ok(Program { statements, span })
    }

    /// Parse a statement sequence; empty statements between separators have
    /// already been dropped by the grammar.
    pub(super) fn parse_statement_sequence(
        src: &str,
        pair: Pair<Rule>,
    ) -> ParseResult<Vec<Statement>> {
        pair.into_inner()
            .map(|inner| Self::parse_statement(src, inner))
            .collect()
    }

    pub(super) fn parse_identifier(pair: Pair<Rule>) -> Identifier {
        Identifier {
            name: pair.as_str().to_string(),
            span: Self::span_of(&pair),
        }
    }

    pub(super) fn span_of(pair: &Pair<Rule>) -> Span {
        let span = pair.as_span();
        Span::new(span.start(), span.end())
    }
}
