//! Single-result visualization session
//!
//! A [`Session`] holds the graph of the most recently loaded schema. Every
//! load runs a fresh parse and projection and replaces the previous result;
//! a failed load leaves the session empty.

use std::path::Path;

use log::{debug, warn};

use schemascope_core::{catalog::Catalog, graph::SchemaGraph};

use crate::{Schemascope, SchemascopeError, intake};

/// The outcome of the last successful load.
#[derive(Debug, Clone)]
struct Loaded {
    catalog: Catalog,
    graph: SchemaGraph,
}

/// Holds at most one visualized schema.
///
/// # Examples
///
/// ```
/// use schemascope::session::Session;
///
/// let mut session = Session::default();
/// session.load_source("type Query { ping: String }").expect("valid schema");
/// assert_eq!(session.graph().map(|graph| graph.nodes().len()), Some(1));
///
/// assert!(session.load_source("type Query {").is_err());
/// assert!(session.graph().is_none());
/// ```
#[derive(Debug, Default)]
pub struct Session {
    scope: Schemascope,
    current: Option<Loaded>,
}

impl Session {
    pub fn new(scope: Schemascope) -> Self {
        Self {
            scope,
            current: None,
        }
    }

    /// Visualize pasted schema text, replacing the current result.
    ///
    /// # Errors
    ///
    /// Returns [`SchemascopeError::EmptySource`] for whitespace-only text and
    /// [`SchemascopeError::SchemaParse`] for invalid SDL. The session is empty
    /// afterwards in both cases.
    pub fn load_source(&mut self, source: &str) -> Result<&SchemaGraph, SchemascopeError> {
        self.current = None;

        let source = intake::validate_source(source).inspect_err(|err| {
            warn!(err:%; "Rejected schema source");
        })?;
        let catalog = self.scope.parse(source).inspect_err(|err| {
            warn!(err:%; "Failed to load schema");
        })?;
        let graph = self.scope.project(&catalog);

        let loaded = self.current.insert(Loaded { catalog, graph });
        Ok(&loaded.graph)
    }

    /// Visualize a `.graphql` or `.gql` file, replacing the current result.
    ///
    /// # Errors
    ///
    /// Fails like [`load_source`](Self::load_source), and additionally with
    /// [`SchemascopeError::UnsupportedFile`] or [`SchemascopeError::Io`] when
    /// the file cannot be used. The session is empty afterwards.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&SchemaGraph, SchemascopeError> {
        self.current = None;

        let source = intake::read_schema_file(path).inspect_err(|err| {
            warn!(err:%; "Failed to read schema file");
        })?;
        self.load_source(&source)
    }

    /// Return to the "no schema loaded" state.
    pub fn reset(&mut self) {
        debug!("Resetting session");
        self.current = None;
    }

    /// The graph of the current schema, if one is loaded.
    pub fn graph(&self) -> Option<&SchemaGraph> {
        self.current.as_ref().map(|loaded| &loaded.graph)
    }

    /// The catalog of the current schema, if one is loaded.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.current.as_ref().map(|loaded| &loaded.catalog)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }
}
