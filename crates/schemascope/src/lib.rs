//! Schemascope - GraphQL schema visualization core
//!
//! This library turns GraphQL schema definition language into a positioned
//! graph: one node per object or interface type, one edge per field that
//! points at an earlier composite type, and a deterministic grid placement.
//! Drawing the graph is left to whatever rendering surface consumes it.

pub mod config;
pub mod error_adapter;
pub mod intake;
pub mod layout;
pub mod projection;
pub mod session;

mod error;

pub use schemascope_core::{catalog, graph};

pub use error::SchemascopeError;

use log::{debug, info, trace};

use catalog::Catalog;
use config::AppConfig;
use graph::SchemaGraph;

/// Builder for parsing and projecting GraphQL schemas.
///
/// # Examples
///
/// ```
/// use schemascope::{Schemascope, config::AppConfig};
///
/// let source = r#"
///     type User { id: ID! }
///     type Query { me: User }
/// "#;
///
/// let scope = Schemascope::new(AppConfig::default());
/// let graph = scope.visualize(source).expect("Failed to visualize");
///
/// assert_eq!(graph.nodes().len(), 2);
/// assert_eq!(graph.edges().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schemascope {
    config: AppConfig,
}

impl Schemascope {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse SDL source into a type catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SchemascopeError::SchemaParse`] for empty, malformed or
    /// structurally invalid source. No partial catalog is produced.
    pub fn parse(&self, source: &str) -> Result<Catalog, SchemascopeError> {
        info!("Building type catalog");
        let catalog = schemascope_parser::build_catalog(source)
            .map_err(|err| SchemascopeError::new_parse_error(err, source))?;
        debug!(types = catalog.len(); "Catalog built successfully");
        trace!(catalog:?; "Type catalog");
        Ok(catalog)
    }

    /// Project a catalog into a positioned graph. This never fails.
    pub fn project(&self, catalog: &Catalog) -> SchemaGraph {
        projection::project(catalog, self.config.layout())
    }

    /// Parse `source` and project the resulting catalog.
    ///
    /// # Errors
    ///
    /// Fails exactly when [`parse`](Self::parse) fails; projection is not
    /// attempted in that case.
    pub fn visualize(&self, source: &str) -> Result<SchemaGraph, SchemascopeError> {
        let catalog = self.parse(source)?;
        let graph = self.project(&catalog);
        info!(
            types = graph.nodes().len(),
            relationships = graph.edges().len();
            "Visualized {} types with {} relationships",
            graph.nodes().len(),
            graph.edges().len()
        );
        Ok(graph)
    }
}
