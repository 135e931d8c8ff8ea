mod error;
mod grammar;

pub use error::ParseError;

use crate::types::Expr;

/// Parse rule text into an [`Expr`].
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid rule syntax.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    use winnow::Parser;
    grammar::rule
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
