//! Positioned schema graph.
//!
//! These are the types handed across the rendering boundary. Every node
//! carries its id, display name, field summaries, position and color class;
//! every edge carries its source and target node ids. Styling is left to the
//! rendering surface, which is why [`ColorClass`] is a plain tag rather than a
//! concrete color.
//!
//! All types implement [`serde::Serialize`] so a renderer can consume the graph
//! in any serde format.

use std::fmt;

use serde::Serialize;

/// Dense, 0-based identifier of a node within one projection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The numeric index of this node in [`SchemaGraph::nodes`].
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Integer grid coordinates of a node's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Styling tag for a node, derived from its type name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    /// The `Query` root type.
    Query,
    /// The `Mutation` root type.
    Mutation,
    #[default]
    Default,
}

impl ColorClass {
    /// Derive the color class from a type name.
    ///
    /// Only exact matches of the reserved root names count; the schema's
    /// actual root operation mapping is not consulted.
    pub fn for_type_name(name: &str) -> Self {
        match name {
            "Query" => ColorClass::Query,
            "Mutation" => ColorClass::Mutation,
            _ => ColorClass::Default,
        }
    }
}

/// A node for one object or interface type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    id: NodeId,
    display_name: String,
    field_summaries: Vec<String>,
    position: Position,
    color_class: ColorClass,
}

impl GraphNode {
    /// Create a node. The color class is derived from `display_name`.
    pub fn new(
        id: NodeId,
        display_name: impl Into<String>,
        field_summaries: Vec<String>,
        position: Position,
    ) -> Self {
        let display_name = display_name.into();
        let color_class = ColorClass::for_type_name(&display_name);
        Self {
            id,
            display_name,
            field_summaries,
            position,
            color_class,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The type name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// One `name: typeReference` entry per field, in declaration order.
    pub fn field_summaries(&self) -> &[String] {
        &self.field_summaries
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn color_class(&self) -> ColorClass {
        self.color_class
    }
}

/// A directed edge from a type to the type one of its fields references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    source: NodeId,
    target: NodeId,
    field: String,
    target_name: String,
}

impl GraphEdge {
    pub fn new(
        source: NodeId,
        target: NodeId,
        field: impl Into<String>,
        target_name: impl Into<String>,
    ) -> Self {
        Self {
            source,
            target,
            field: field.into(),
            target_name: target_name.into(),
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Name of the field that produced this edge.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Name of the target type.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }
}

impl fmt::Display for GraphEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge-{}-{}", self.source.index(), self.target_name)
    }
}

/// The output of one projection run: ordered nodes and edges.
///
/// Node `i` in [`nodes`](Self::nodes) always has id `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl SchemaGraph {
    /// Assemble a graph.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if node ids are not dense and ordered, or if an
    /// edge references a missing node.
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        debug_assert!(
            nodes
                .iter()
                .enumerate()
                .all(|(index, node)| node.id().index() == index),
            "node ids must be dense and ordered"
        );
        debug_assert!(
            edges
                .iter()
                .all(|edge| edge.source().index() < nodes.len()
                    && edge.target().index() < nodes.len()),
            "edges must reference existing nodes"
        );
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    pub fn node_by_name(&self, name: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.display_name() == name)
    }

    /// Edges leaving `id`, in emission order.
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |edge| edge.source() == id)
    }

    /// Edges arriving at `id`, in emission order.
    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |edge| edge.target() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
