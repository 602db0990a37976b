//! Schemascope Core Types and Definitions
//!
//! This crate provides the foundational types shared by every stage of the
//! Schemascope pipeline. It includes:
//!
//! - **Catalog**: The normalized type catalog built from GraphQL SDL
//!   ([`catalog::Catalog`], [`catalog::TypeDescriptor`], [`catalog::TypeRef`])
//! - **Graph**: The positioned node/edge graph handed to rendering surfaces
//!   ([`graph::SchemaGraph`], [`graph::GraphNode`], [`graph::GraphEdge`])
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ schemascope-parser
//! Catalog (this crate)
//!     ↓ schemascope projection + grid layout
//! SchemaGraph (this crate)
//!     ↓ external renderer
//! ```

pub mod catalog;
pub mod graph;

/// Prefix reserved by the GraphQL introspection system.
///
/// Types whose names start with this prefix never become graph nodes and are
/// never the target of a graph edge.
pub const RESERVED_PREFIX: &str = "__";

/// Returns `true` if `name` is reserved for introspection.
pub fn is_reserved_name(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved_name("__Schema"));
        assert!(is_reserved_name("__"));
        assert!(!is_reserved_name("_Private"));
        assert!(!is_reserved_name("Query"));
        assert!(!is_reserved_name(""));
    }
}
