//! # Schemascope Parser
//!
//! Parser for GraphQL Schema Definition Language. This crate provides the
//! pipeline from SDL source text to the type [`Catalog`] that the graph
//! projection consumes.
//!
//! ## Usage
//!
//! ```
//! # use schemascope_parser::{build_catalog, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         type Query { me: User }
//!         type User { id: ID! name: String }
//!     "#;
//!
//!     let catalog = build_catalog(source)?;
//!     assert_eq!(catalog.roots().query(), Some("Query"));
//!     Ok(())
//! }
//! ```

mod builtin_types;
mod elaborate;
pub mod error;
mod lexer;
mod parser;
mod parser_types;
mod span;
mod tokens;
mod validate;

pub use error::ParseError;
pub use span::Span;

use log::debug;

use schemascope_core::catalog::Catalog;

use elaborate::Builder;
use tokens::PositionedToken;

/// Parse SDL source text into a type catalog.
///
/// This is the main entry point of the crate. It orchestrates the complete
/// pipeline:
///
/// 1. **Tokenize** - Convert source text to tokens
/// 2. **Parse** - Build the document AST from significant tokens
/// 3. **Validate** - Check references and uniqueness across the document
/// 4. **Elaborate** - Merge extensions and append built-in types
///
/// # Arguments
///
/// * `source` - GraphQL SDL text
///
/// # Returns
///
/// Returns the [`Catalog`] on success, or a [`ParseError`] carrying every
/// diagnostic the failing phase produced. A source with no definitions at all
/// fails with error code `E102`.
///
/// # Example
///
/// ```
/// # use schemascope_parser::{build_catalog, error::ErrorCode};
///
/// let err = build_catalog("type Query {").unwrap_err();
/// assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E101));
/// ```
pub fn build_catalog(source: &str) -> Result<Catalog, ParseError> {
    // Step 1: Tokenize
    let tokens: Vec<PositionedToken<'_>> = lexer::tokenize(source)?
        .into_iter()
        .filter(|token| !token.is_trivia())
        .collect();
    debug!(tokens = tokens.len(); "Tokenized schema source");

    // Step 2: Parse
    let document = parser::build_document(&tokens)?;

    // Step 3: Validate
    validate::validate_document(&document)?;

    // Step 4: Elaborate
    let catalog = Builder::new().build(&document)?;
    Ok(catalog)
}
