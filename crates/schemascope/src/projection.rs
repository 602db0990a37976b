//! Graph projection
//!
//! Walks a [`Catalog`] in enumeration order and emits one node per object or
//! interface type and one edge per field that points at a type already
//! emitted earlier in the same run.
//!
//! Edge resolution only consults names that already have an id. A field that
//! refers to a composite type declared later therefore produces no edge; the
//! relation is only visible from the later type's side if it points back.

use indexmap::IndexMap;
use log::{debug, trace};

use schemascope_core::{
    catalog::{Catalog, TypeDescriptor},
    graph::{GraphEdge, GraphNode, NodeId, SchemaGraph},
    is_reserved_name,
};

use crate::layout::{GridConfig, GridPlacer};

/// Per-run projection state.
struct Projector<'c> {
    catalog: &'c Catalog,
    ids: IndexMap<&'c str, NodeId>,
    placer: GridPlacer,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl<'c> Projector<'c> {
    fn new(catalog: &'c Catalog, grid: GridConfig) -> Self {
        Self {
            catalog,
            ids: IndexMap::new(),
            placer: GridPlacer::new(grid),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn run(mut self) -> SchemaGraph {
        let catalog = self.catalog;
        for ty in catalog.iter() {
            self.visit(ty);
        }
        SchemaGraph::new(self.nodes, self.edges)
    }

    fn visit(&mut self, ty: &'c TypeDescriptor) {
        let name = ty.name();

        if is_reserved_name(name) {
            trace!(name = name; "Skipping reserved type");
            return;
        }
        if !ty.is_composite() {
            trace!(name = name, kind:% = ty.kind(); "Skipping non-composite type");
            return;
        }
        if self.ids.contains_key(name) {
            trace!(name = name; "Skipping already projected type");
            return;
        }

        let id = NodeId::new(self.ids.len());
        self.ids.insert(name, id);

        let summaries = ty.fields().iter().map(|field| field.summary()).collect();
        let position = self.placer.place();
        self.nodes.push(GraphNode::new(id, name, summaries, position));

        for field in ty.fields() {
            let target_name = field.target_type_name();
            if let Some(target) = self.resolve_target(name, target_name) {
                self.edges
                    .push(GraphEdge::new(id, target, field.name(), target_name));
            }
        }
    }

    /// The id of `target_name` if a field of `source_name` pointing at it
    /// yields an edge.
    fn resolve_target(&self, source_name: &str, target_name: &str) -> Option<NodeId> {
        if target_name == source_name || is_reserved_name(target_name) {
            return None;
        }
        let target = self.catalog.get(target_name)?;
        if !target.is_composite() {
            return None;
        }

        let id = self.ids.get(target_name).copied();
        if id.is_none() {
            trace!(
                source = source_name,
                target = target_name;
                "Dropping forward reference"
            );
        }
        id
    }
}

/// Project `catalog` into a positioned graph.
///
/// The result depends only on the catalog contents and `grid`: node `i` is
/// the `i`-th qualifying type in catalog order. Projection never fails; a
/// catalog with no object or interface types yields an empty graph.
///
/// # Example
///
/// ```
/// # use schemascope::{layout::GridConfig, projection::project};
/// # use schemascope::catalog::{Catalog, FieldDescriptor, TypeDescriptor, TypeKind, TypeRef};
/// let catalog: Catalog = [
///     TypeDescriptor::new("User", TypeKind::Object)
///         .with_fields(vec![FieldDescriptor::new("id", TypeRef::named("ID").non_null())]),
///     TypeDescriptor::new("Query", TypeKind::Object)
///         .with_fields(vec![FieldDescriptor::new("me", TypeRef::named("User"))]),
/// ]
/// .into_iter()
/// .collect();
///
/// let graph = project(&catalog, &GridConfig::default());
/// assert_eq!(graph.nodes().len(), 2);
/// assert_eq!(graph.edges()[0].to_string(), "edge-1-User");
/// ```
pub fn project(catalog: &Catalog, grid: &GridConfig) -> SchemaGraph {
    let graph = Projector::new(catalog, *grid).run();
    debug!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len();
        "Projected catalog"
    );
    graph
}
