//! Normalized type catalog.
//!
//! A [`Catalog`] is the output of the schema catalog builder: an ordered
//! mapping from type name to [`TypeDescriptor`]. Enumeration order is the
//! declaration order of the source document, followed by the built-in
//! scalars and the introspection types. The graph projection relies on
//! this order for stable, reproducible layout.
//!
//! Catalogs are immutable once built. Loading a new schema means building a
//! new catalog.

use std::fmt;

use indexmap::IndexMap;

/// The kind of a named GraphQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// An object type (`type Foo { ... }`).
    Object,
    /// An interface type (`interface Foo { ... }`).
    Interface,
    /// A union type (`union Foo = A | B`).
    Union,
    /// An enum type (`enum Foo { A B }`).
    Enum,
    /// An input object type (`input Foo { ... }`).
    InputObject,
    /// A scalar type, built-in or custom.
    Scalar,
}

impl TypeKind {
    /// Returns `true` for kinds that become graph nodes: objects and interfaces.
    pub fn is_composite(self) -> bool {
        matches!(self, TypeKind::Object | TypeKind::Interface)
    }

    /// The keyword that introduces this kind in SDL.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Object => "type",
            TypeKind::Interface => "interface",
            TypeKind::Union => "union",
            TypeKind::Enum => "enum",
            TypeKind::InputObject => "input",
            TypeKind::Scalar => "scalar",
        }
    }

    /// The kind introduced by an SDL keyword, if any.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "type" => Some(TypeKind::Object),
            "interface" => Some(TypeKind::Interface),
            "union" => Some(TypeKind::Union),
            "enum" => Some(TypeKind::Enum),
            "input" => Some(TypeKind::InputObject),
            "scalar" => Some(TypeKind::Scalar),
            _ => None,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::Scalar => "SCALAR",
        };
        write!(f, "{name}")
    }
}

/// A reference to a type, including list and non-null wrappers.
///
/// `[Node!]!` is represented as
/// `NonNull(List(NonNull(Named("Node"))))`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Create a reference to a named type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Wrap this reference in a list.
    pub fn list(self) -> Self {
        TypeRef::List(Box::new(self))
    }

    /// Wrap this reference in a non-null modifier.
    pub fn non_null(self) -> Self {
        TypeRef::NonNull(Box::new(self))
    }

    /// The innermost named type, with every list and non-null wrapper removed.
    pub fn named_type(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }

    /// Returns `true` if the outermost wrapper is non-null.
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// An argument of a field or directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    name: String,
    type_ref: TypeRef,
    default_value: Option<String>,
    description: Option<String>,
}

impl ArgumentDescriptor {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            default_value: None,
            description: None,
        }
    }

    /// Set the default value, rendered as SDL source text.
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A field of an object, interface or input object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    type_ref: TypeRef,
    arguments: Vec<ArgumentDescriptor>,
    description: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            arguments: Vec::new(),
            description: None,
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<ArgumentDescriptor>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type, including wrappers.
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// The declared type with list and non-null wrappers stripped.
    ///
    /// This may name a type that is not in the catalog's composite set
    /// (a scalar, an enum), in which case it never produces a graph edge.
    pub fn target_type_name(&self) -> &str {
        self.type_ref.named_type()
    }

    pub fn arguments(&self) -> &[ArgumentDescriptor] {
        &self.arguments
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Render the field as `name: typeReference`.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.name, self.type_ref)
    }
}

/// A named type declared in (or built into) the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    fields: Vec<FieldDescriptor>,
    interfaces: Vec<String>,
    possible_types: Vec<String>,
    enum_values: Vec<String>,
    description: Option<String>,
    is_builtin: bool,
}

impl TypeDescriptor {
    /// Create a descriptor with no members.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: Vec::new(),
            interfaces: Vec::new(),
            possible_types: Vec::new(),
            enum_values: Vec::new(),
            description: None,
            is_builtin: false,
        }
    }

    /// Set the fields, in declaration order.
    pub fn with_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_interfaces(mut self, interfaces: Vec<String>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn with_possible_types(mut self, possible_types: Vec<String>) -> Self {
        self.possible_types = possible_types;
        self
    }

    pub fn with_enum_values(mut self, enum_values: Vec<String>) -> Self {
        self.enum_values = enum_values;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark this type as provided by the schema system rather than the document.
    pub fn builtin(mut self) -> Self {
        self.is_builtin = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Fields in declaration order. Empty for scalars, enums and unions.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Interfaces implemented by an object or interface type.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Member types of a union.
    pub fn possible_types(&self) -> &[String] {
        &self.possible_types
    }

    pub fn enum_values(&self) -> &[String] {
        &self.enum_values
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_builtin(&self) -> bool {
        self.is_builtin
    }

    /// Returns `true` if this type becomes a graph node (object or interface).
    pub fn is_composite(&self) -> bool {
        self.kind.is_composite()
    }
}

/// Root operation types of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootOperations {
    query: Option<String>,
    mutation: Option<String>,
    subscription: Option<String>,
}

impl RootOperations {
    pub fn new(
        query: Option<String>,
        mutation: Option<String>,
        subscription: Option<String>,
    ) -> Self {
        Self {
            query,
            mutation,
            subscription,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn mutation(&self) -> Option<&str> {
        self.mutation.as_deref()
    }

    pub fn subscription(&self) -> Option<&str> {
        self.subscription.as_deref()
    }
}

/// A directive declared in the document or built into the schema system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveDescriptor {
    name: String,
    locations: Vec<String>,
    arguments: Vec<ArgumentDescriptor>,
    is_repeatable: bool,
    is_builtin: bool,
}

impl DirectiveDescriptor {
    pub fn new(name: impl Into<String>, locations: Vec<String>) -> Self {
        Self {
            name: name.into(),
            locations,
            arguments: Vec::new(),
            is_repeatable: false,
            is_builtin: false,
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<ArgumentDescriptor>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn repeatable(mut self, is_repeatable: bool) -> Self {
        self.is_repeatable = is_repeatable;
        self
    }

    pub fn builtin(mut self) -> Self {
        self.is_builtin = true;
        self
    }

    /// Directive name without the leading `@`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn arguments(&self) -> &[ArgumentDescriptor] {
        &self.arguments
    }

    pub fn is_repeatable(&self) -> bool {
        self.is_repeatable
    }

    pub fn is_builtin(&self) -> bool {
        self.is_builtin
    }
}

/// An ordered, immutable mapping from type name to [`TypeDescriptor`].
///
/// Type names are unique within a catalog. Enumeration order is insertion
/// order, which the catalog builder guarantees to be declaration order.
///
/// # Example
///
/// ```
/// # use schemascope_core::catalog::{Catalog, FieldDescriptor, TypeDescriptor, TypeKind, TypeRef};
/// let catalog: Catalog = [
///     TypeDescriptor::new("User", TypeKind::Object)
///         .with_fields(vec![FieldDescriptor::new("id", TypeRef::named("ID").non_null())]),
///     TypeDescriptor::new("ID", TypeKind::Scalar),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.names().collect::<Vec<_>>(), ["User", "ID"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    types: IndexMap<String, TypeDescriptor>,
    roots: RootOperations,
    directives: IndexMap<String, DirectiveDescriptor>,
}

impl Catalog {
    /// Assemble a catalog from already-validated parts.
    pub fn new(
        types: IndexMap<String, TypeDescriptor>,
        roots: RootOperations,
        directives: IndexMap<String, DirectiveDescriptor>,
    ) -> Self {
        Self {
            types,
            roots,
            directives,
        }
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Iterate over every type in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// Iterate over every type name in enumeration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Iterate over object and interface types in enumeration order.
    pub fn composite_types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.iter().filter(|ty| ty.is_composite())
    }

    /// Number of types, built-ins included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn roots(&self) -> &RootOperations {
        &self.roots
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDescriptor> {
        self.directives.get(name)
    }

    pub fn directives(&self) -> impl Iterator<Item = &DirectiveDescriptor> {
        self.directives.values()
    }
}

impl FromIterator<TypeDescriptor> for Catalog {
    /// Collect descriptors into a catalog with no root operations or directives.
    ///
    /// A repeated name replaces the earlier descriptor but keeps its position.
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let types = iter
            .into_iter()
            .map(|ty| (ty.name().to_string(), ty))
            .collect();
        Self {
            types,
            ..Self::default()
        }
    }
}
