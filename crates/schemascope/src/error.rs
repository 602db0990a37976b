//! Error types for Schemascope operations.
//!
//! This module provides the main error type [`SchemascopeError`] which wraps
//! every error condition that can occur between reading schema text and
//! producing a graph. Graph projection itself never fails.

use std::{io, path::PathBuf};

use thiserror::Error;

use schemascope_parser::ParseError;

/// The main error type for Schemascope operations.
///
/// # Diagnostic Variants
///
/// The `SchemaParse` variant keeps the source text next to the parser
/// diagnostics so their spans can be rendered as annotated snippets (see
/// [`error_adapter`](crate::error_adapter)).
#[derive(Debug, Error)]
pub enum SchemascopeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    SchemaParse { err: ParseError, src: String },

    #[error("Unsupported file `{}`: expected a .graphql or .gql file", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("Please provide a GraphQL schema")]
    EmptySource,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SchemascopeError {
    /// Create a new `SchemaParse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::SchemaParse {
            err,
            src: src.into(),
        }
    }
}
