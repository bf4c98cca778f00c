// Literal parsing functions for the GRL parser
// Handles boolean, number, and string literals

use super::{GrlParser, Rule};
use crate::error::*;
use pest::iterators::Pair;

impl GrlParser {
    pub(super) fn parse_boolean(pair: Pair<Rule>) -> bool {
        let inner = pair.into_inner().next().unwrap();
        match inner.as_rule() {
            Rule::boolean_true => true,
            Rule::boolean_false => false,
            _ => unreachable!("Invalid boolean rule"),
        }
    }

    /// Parse a number literal. A leading minus sign is part of the literal
    /// itself, so `-5` arrives here as one token.
    pub(super) fn parse_number(src: &str, pair: Pair<Rule>) -> ParseResult<f64> {
        let text = pair.as_str();
        text.parse::<f64>()
            .map_err(|_| ParseError::invalid_number(src, Self::span_of(&pair), text))
    }

    /// Parse a string literal, decoding its escape sequences.
    pub(super) fn parse_string(src: &str, pair: Pair<Rule>) -> ParseResult<String> {
        let content = pair.into_inner().next().unwrap();
        let span = Self::span_of(&content);
        let raw = content.as_str();

        let mut result = String::with_capacity(raw.len());
        let mut chars = raw.chars();

        while let Some(ch) = chars.next() {
            if ch != '\\' {
                result.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(other) => {
                    return Err(ParseError::invalid_escape(src, span, &other.to_string()));
                }
                None => {
                    return Err(ParseError::invalid_escape(src, span, ""));
                }
            }
        }

        Ok(result)
    }
}
