// GRL Parser Library
// Pest-based parser for the GRL graph scripting language

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::{GrlParser, Rule};

/// Parse a whole GRL program into its evaluation tree.
pub fn parse_program(input: &str) -> Result<Program, ParseError> {
    parser::GrlParser::parse_program(input)
}

/// Parse a single GRL expression.
pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    parser::GrlParser::parse_expression(input)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
