// GRL Parser Error Handling
// Parse diagnostics with miette integration

use crate::ast::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Parse error type with miette integration.
///
/// A failed parse yields no evaluation tree at all: either the whole
/// statement sequence parses or none of it executes.
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Unrecognized input: {found}")]
    #[diagnostic(
        code(grl::parse::unrecognized_input),
        help("This text does not form any GRL token")
    )]
    UnrecognizedInput {
        #[source_code]
        src: String,
        #[label("no token matches this")]
        span: SourceSpan,
        found: String,
    },

    #[error("Syntax error")]
    #[diagnostic(
        code(grl::parse::syntax),
        help("Check the statement form near the highlighted location")
    )]
    Syntax {
        #[source_code]
        src: String,
        #[label("no statement matches here")]
        span: SourceSpan,
        message: String,
    },

    #[error("Invalid number literal: {found}")]
    #[diagnostic(
        code(grl::parse::invalid_number),
        help("Number literals look like 42, -7 or 3.14")
    )]
    InvalidNumber {
        #[source_code]
        src: String,
        #[label("invalid number")]
        span: SourceSpan,
        found: String,
    },

    #[error("Invalid string escape sequence: \\{found}")]
    #[diagnostic(
        code(grl::parse::invalid_escape),
        help("Valid escape sequences: \\n, \\t, \\\\, \\\"")
    )]
    InvalidEscape {
        #[source_code]
        src: String,
        #[label("invalid escape sequence")]
        span: SourceSpan,
        found: String,
    },

    #[error("Chained comparison")]
    #[diagnostic(
        code(grl::parse::chained_comparison),
        help("Comparators are non-associative; parenthesize one side")
    )]
    ChainedComparison {
        #[source_code]
        src: String,
        #[label("second comparator in one chain")]
        span: SourceSpan,
    },

    #[error("Loop binds {variables} variables but the iterator yields {arity}-tuples")]
    #[diagnostic(
        code(grl::parse::iterator_arity),
        help("Use exactly as many loop variables as the iterator produces per tuple")
    )]
    IteratorArity {
        #[source_code]
        src: String,
        #[label("variable count does not match the iterator")]
        span: SourceSpan,
        variables: usize,
        arity: usize,
    },
}

/// Every word that may start a GRL token, used to tell lexical errors
/// (no token rule matches at all) apart from grammar errors.
const KEYWORD_WORDS: &[&str] = &[
    "ADD", "RM", "GET", "SET", "GRAPH", "DIGRAPH", "NODE", "EDGE", "WEIGHT", "OF", "IF", "ELSEIF",
    "ELSE", "FOR", "PRINT", "EXIT", "RUN", "DRAW", "IMPORT", "EXPORT", "EXISTS", "IS", "HAS",
    "COUNT", "NODES", "EDGES", "NEIGHBORS", "DFS", "BFS", "TOPOLOGICAL", "SORT", "SHORTEST",
    "PATH", "DISTANCE", "FROM", "BETWEEN", "MATRIX", "TO", "NUMBER", "STRING", "BOOL", "TRUE",
    "FALSE", "AND", "OR", "XOR", "NOT", "IMPLIES",
];

impl ParseError {
    /// Build a parse error from a Pest error, classifying failures at input
    /// no token rule could ever match as lexical errors.
    pub fn from_pest_error(error: pest::error::Error<crate::parser::Rule>, src: String) -> Self {
        let pos = match error.location {
            pest::error::InputLocation::Pos(pos) => pos,
            pest::error::InputLocation::Span((start, _)) => start,
        };

        if let Some(found) = unrecognized_text(&src, pos) {
            let span = SourceSpan::new(pos.into(), found.len());
            return ParseError::UnrecognizedInput { src, span, found };
        }

        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 1),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };
        let message = error.variant.message().to_string();
        ParseError::Syntax { src, span, message }
    }

    pub fn invalid_number(src: &str, span: Span, found: &str) -> Self {
        ParseError::InvalidNumber {
            src: src.to_string(),
            span: source_span(span),
            found: found.to_string(),
        }
    }

    pub fn invalid_escape(src: &str, span: Span, found: &str) -> Self {
        ParseError::InvalidEscape {
            src: src.to_string(),
            span: source_span(span),
            found: found.to_string(),
        }
    }

    pub fn chained_comparison(src: &str, span: Span) -> Self {
        ParseError::ChainedComparison {
            src: src.to_string(),
            span: source_span(span),
        }
    }

    pub fn iterator_arity(src: &str, span: Span, variables: usize, arity: usize) -> Self {
        ParseError::IteratorArity {
            src: src.to_string(),
            span: source_span(span),
            variables,
            arity,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convert an AST span to a miette source span.
pub(crate) fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.end - span.start)
}

/// Return the offending text when the input at `pos` cannot start any GRL
/// token: a character outside the lexical alphabet, or an uppercase word
/// that is not a keyword.
fn unrecognized_text(src: &str, pos: usize) -> Option<String> {
    let rest = &src[pos.min(src.len())..];
    let first = rest.chars().next()?;

    if first.is_ascii_uppercase() {
        let word: String = rest
            .chars()
            .take_while(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '_')
            .collect();
        if KEYWORD_WORDS.contains(&word.as_str()) {
            return None;
        }
        return Some(word);
    }

    let lexical_start = first.is_ascii_lowercase()
        || first.is_ascii_digit()
        || matches!(
            first,
            '_' | '"' | '(' | ')' | '{' | '}' | ',' | ';' | '+' | '-' | '*' | '/' | '^' | '=' | '!'
                | '<' | '>' | ' ' | '\t' | '\n' | '\r'
        );
    if lexical_start {
        return None;
    }

    let run: String = rest
        .chars()
        .take_while(|c| !c.is_ascii_whitespace())
        .collect();
    Some(run)
}
