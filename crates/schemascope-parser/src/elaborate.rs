//! Elaboration phase for validated SDL documents
//!
//! This module turns the parser AST into the [`Catalog`] consumed by graph
//! projection. Type definitions are gathered in declaration order, their
//! extensions are merged into them, and the built-in scalars, introspection
//! types and specified directives are appended after the user's own
//! declarations.

use indexmap::IndexMap;
use log::{debug, info, trace};

use schemascope_core::catalog::{
    ArgumentDescriptor, Catalog, DirectiveDescriptor, FieldDescriptor, RootOperations,
    TypeDescriptor, TypeKind,
};

use crate::{
    builtin_types,
    error::{Diagnostic, ErrorCode, Result},
    parser_types::{
        Definition, DirectiveDefinition, Document, FieldDefinition, InputValueDefinition,
        OperationKind, SchemaDefinition, TypeDefinition,
    },
    span::Spanned,
};

/// A type definition while its extensions are still being merged.
#[derive(Debug)]
struct PendingType {
    kind: TypeKind,
    description: Option<String>,
    fields: Vec<FieldDescriptor>,
    interfaces: Vec<String>,
    possible_types: Vec<String>,
    enum_values: Vec<String>,
}

impl PendingType {
    fn new(kind: TypeKind, description: Option<String>) -> Self {
        Self {
            kind,
            description,
            fields: Vec::new(),
            interfaces: Vec::new(),
            possible_types: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    fn merge(&mut self, ty: &TypeDefinition<'_>) {
        self.interfaces
            .extend(ty.interfaces.iter().map(|name| name.inner().to_string()));
        self.fields.extend(ty.fields.iter().map(build_field));
        self.fields.extend(ty.input_fields.iter().map(build_input_field));
        self.possible_types
            .extend(ty.members.iter().map(|name| name.inner().to_string()));
        self.enum_values
            .extend(ty.values.iter().map(|value| value.name.inner().to_string()));
    }

    fn into_descriptor(self, name: String) -> TypeDescriptor {
        let descriptor = TypeDescriptor::new(name, self.kind)
            .with_fields(self.fields)
            .with_interfaces(self.interfaces)
            .with_possible_types(self.possible_types)
            .with_enum_values(self.enum_values);

        match self.description {
            Some(description) => descriptor.with_description(description),
            None => descriptor,
        }
    }
}

fn description_text(description: &Option<Spanned<String>>) -> Option<String> {
    description.as_ref().map(|text| text.inner().clone())
}

fn build_argument(argument: &InputValueDefinition<'_>) -> ArgumentDescriptor {
    let mut descriptor =
        ArgumentDescriptor::new(*argument.name.inner(), argument.ty.type_ref.clone());
    if let Some(default_value) = &argument.default_value {
        descriptor = descriptor.with_default_value(default_value.inner().to_string());
    }
    if let Some(description) = description_text(&argument.description) {
        descriptor = descriptor.with_description(description);
    }
    descriptor
}

fn build_field(field: &FieldDefinition<'_>) -> FieldDescriptor {
    let descriptor = FieldDescriptor::new(*field.name.inner(), field.ty.type_ref.clone())
        .with_arguments(field.arguments.iter().map(build_argument).collect());

    match description_text(&field.description) {
        Some(description) => descriptor.with_description(description),
        None => descriptor,
    }
}

/// Input object fields are recorded as plain fields; their default values
/// are not part of the catalog.
fn build_input_field(input_field: &InputValueDefinition<'_>) -> FieldDescriptor {
    let descriptor =
        FieldDescriptor::new(*input_field.name.inner(), input_field.ty.type_ref.clone());

    match description_text(&input_field.description) {
        Some(description) => descriptor.with_description(description),
        None => descriptor,
    }
}

fn build_directive(directive: &DirectiveDefinition<'_>) -> DirectiveDescriptor {
    let locations = directive
        .locations
        .iter()
        .map(|location| location.inner().to_string())
        .collect();

    DirectiveDescriptor::new(*directive.name.inner(), locations)
        .with_arguments(directive.arguments.iter().map(build_argument).collect())
        .repeatable(directive.repeatable)
}

/// Builds a [`Catalog`] from a validated document.
pub struct Builder<'a> {
    types: IndexMap<&'a str, PendingType>,
    directives: IndexMap<String, DirectiveDescriptor>,
    /// Root operations named by schema definitions and extensions
    declared_roots: IndexMap<OperationKind, &'a str>,
    has_schema_definition: bool,
}

impl<'a> Builder<'a> {
    pub fn new() -> Self {
        let directives = builtin_types::directives()
            .into_iter()
            .map(|directive| (directive.name().to_string(), directive))
            .collect();

        Self {
            types: IndexMap::new(),
            directives,
            declared_roots: IndexMap::new(),
            has_schema_definition: false,
        }
    }

    // ============================================================================
    // Main Entry Methods
    // ============================================================================

    pub fn build(mut self, document: &Document<'a>) -> Result<Catalog> {
        debug!(
            definitions = document.definitions.len();
            "Building type catalog"
        );

        // Definitions first so extensions always find their target
        for definition in &document.definitions {
            match definition {
                Definition::Type(ty) if !ty.is_extension => self.add_type(ty),
                Definition::Directive(directive) => self.add_directive(directive),
                _ => {}
            }
        }

        for definition in &document.definitions {
            match definition {
                Definition::Type(ty) if ty.is_extension => self.extend_type(ty)?,
                Definition::Schema(schema) => self.add_schema(schema),
                _ => {}
            }
        }

        let roots = self.resolve_roots();
        let types = self.finish_types();
        trace!(types:? = types.keys().collect::<Vec<_>>(); "Catalog types");

        info!(
            types = types.len(),
            directives = self.directives.len();
            "Type catalog built successfully"
        );
        Ok(Catalog::new(types, roots, self.directives))
    }

    // ============================================================================
    // Definition Handlers
    // ============================================================================

    fn add_type(&mut self, ty: &TypeDefinition<'a>) {
        let name = *ty.name.inner();
        trace!(name = name, kind:% = ty.kind; "Adding type");

        let mut pending = PendingType::new(ty.kind, description_text(&ty.description));
        pending.merge(ty);
        self.types.insert(name, pending);
    }

    fn extend_type(&mut self, ty: &TypeDefinition<'a>) -> Result<()> {
        let name = *ty.name.inner();
        let Some(pending) = self.types.get_mut(name) else {
            return Err(Diagnostic::error(format!("cannot extend undefined type `{name}`"))
                .with_code(ErrorCode::E300)
                .with_label(ty.name.span(), "extension target missing"));
        };

        debug!(name = name, fields = ty.fields.len(); "Merging type extension");
        pending.merge(ty);
        Ok(())
    }

    fn add_directive(&mut self, directive: &DirectiveDefinition<'a>) {
        let descriptor = build_directive(directive);
        self.directives
            .insert(descriptor.name().to_string(), descriptor);
    }

    fn add_schema(&mut self, schema: &SchemaDefinition<'a>) {
        self.has_schema_definition = true;
        for operation in &schema.operations {
            self.declared_roots
                .insert(*operation.operation.inner(), *operation.type_name.inner());
        }
    }

    // ============================================================================
    // Finishing
    // ============================================================================

    /// Root operation type names.
    ///
    /// A schema definition names its roots explicitly. Without one, each root
    /// falls back to the object type named `Query`, `Mutation` or
    /// `Subscription` when the document declares it.
    fn resolve_roots(&self) -> RootOperations {
        let root = |kind: OperationKind| -> Option<String> {
            if self.has_schema_definition {
                return self.declared_roots.get(&kind).map(|name| name.to_string());
            }
            let name = kind.default_type_name();
            self.types
                .get(name)
                .filter(|pending| pending.kind == TypeKind::Object)
                .map(|_| name.to_string())
        };

        RootOperations::new(
            root(OperationKind::Query),
            root(OperationKind::Mutation),
            root(OperationKind::Subscription),
        )
    }

    /// User types in declaration order, then every built-in type the
    /// document did not redeclare.
    fn finish_types(&mut self) -> IndexMap<String, TypeDescriptor> {
        let mut types: IndexMap<String, TypeDescriptor> = self
            .types
            .drain(..)
            .map(|(name, pending)| (name.to_string(), pending.into_descriptor(name.to_string())))
            .collect();

        let builtins = builtin_types::scalar_types()
            .into_iter()
            .chain(builtin_types::introspection_types());
        for builtin in builtins {
            if !types.contains_key(builtin.name()) {
                types.insert(builtin.name().to_string(), builtin);
            }
        }

        types
    }
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use schemascope_core::catalog::TypeRef;

    use super::*;
    use crate::{lexer::tokenize, parser::build_document, tokens::PositionedToken};

    fn significant_tokens(input: &str) -> Vec<PositionedToken<'_>> {
        tokenize(input)
            .expect("Failed to tokenize input")
            .into_iter()
            .filter(|token| !token.is_trivia())
            .collect()
    }

    fn elaborate(input: &str) -> Catalog {
        let tokens = significant_tokens(input);
        let document = build_document(&tokens).expect("document should parse");
        Builder::new().build(&document).expect("document should elaborate")
    }

    #[test]
    fn test_declaration_order_then_builtins() {
        let catalog = elaborate("type Query { me: User }\ntype User { id: ID }\nenum Role { A }");
        let names: Vec<_> = catalog.names().collect();

        assert_eq!(&names[..3], ["Query", "User", "Role"]);
        assert_eq!(&names[3..8], builtin_types::SCALARS);
        assert_eq!(&names[8..], builtin_types::INTROSPECTION_TYPES);
        assert!(!catalog.get("Query").unwrap().is_builtin());
        assert!(catalog.get("ID").unwrap().is_builtin());
    }

    #[test]
    fn test_redeclared_scalar_keeps_declaration_position() {
        let catalog = elaborate("scalar String\ntype Query { name: String }");
        let names: Vec<_> = catalog.names().take(3).collect();

        assert_eq!(names, ["String", "Query", "Int"]);
        assert!(!catalog.get("String").unwrap().is_builtin());
        assert_eq!(catalog.names().filter(|name| *name == "String").count(), 1);
    }

    #[test]
    fn test_fields_and_arguments() {
        let catalog = elaborate(
            r#"
            type Query {
              "Find posts"
              posts(first: Int = 10, order: Order = ASC): [Post!]!
            }
            type Post { id: ID! }
            enum Order { ASC DESC }
            "#,
        );

        let posts = catalog.get("Query").unwrap().field("posts").unwrap();
        assert_eq!(posts.summary(), "posts: [Post!]!");
        assert_eq!(posts.description(), Some("Find posts"));
        assert_eq!(posts.target_type_name(), "Post");

        let arguments: Vec<_> = posts
            .arguments()
            .iter()
            .map(|argument| (argument.name(), argument.default_value()))
            .collect();
        assert_eq!(arguments, [("first", Some("10")), ("order", Some("ASC"))]);

        assert_eq!(
            catalog.get("Order").unwrap().enum_values(),
            ["ASC".to_string(), "DESC".to_string()]
        );
    }

    #[test]
    fn test_extensions_are_merged_in_order() {
        let catalog = elaborate(
            "extend type User implements Node { name: String }\n\
             type User { id: ID! }\n\
             interface Node { id: ID! }\n\
             extend type User { email: String }\n\
             union Search = User\n\
             extend union Search = Node",
        );

        let user = catalog.get("User").unwrap();
        let fields: Vec<_> = user.fields().iter().map(|f| f.name()).collect();
        assert_eq!(fields, ["id", "name", "email"]);
        assert_eq!(user.interfaces(), ["Node".to_string()]);
        assert_eq!(
            catalog.get("Search").unwrap().possible_types(),
            ["User".to_string(), "Node".to_string()]
        );
    }

    #[test]
    fn test_input_fields_become_fields() {
        let catalog = elaborate("input Filter { term: String = \"x\", limit: Int! }");
        let filter = catalog.get("Filter").unwrap();

        assert_eq!(filter.kind(), TypeKind::InputObject);
        assert_eq!(filter.field("limit").unwrap().type_ref(), &TypeRef::named("Int").non_null());
        assert!(!filter.is_composite());
    }

    #[test]
    fn test_default_roots() {
        let catalog = elaborate("type Query { a: Int }\ninterface Mutation { b: Int }");
        assert_eq!(catalog.roots().query(), Some("Query"));
        assert_eq!(catalog.roots().mutation(), None);
        assert_eq!(catalog.roots().subscription(), None);
    }

    #[test]
    fn test_schema_definition_roots() {
        let catalog = elaborate(
            "schema { query: Root }\nextend schema { mutation: Change }\n\
             type Root { a: Int }\ntype Change { b: Int }\ntype Query { c: Int }",
        );
        assert_eq!(catalog.roots().query(), Some("Root"));
        assert_eq!(catalog.roots().mutation(), Some("Change"));
        assert_eq!(catalog.roots().subscription(), None);
    }

    #[test]
    fn test_directives() {
        let catalog = elaborate(
            "directive @key(fields: String!) repeatable on OBJECT | INTERFACE\ntype Query { a: Int }",
        );

        let names: Vec<_> = catalog.directives().map(|d| d.name()).collect();
        assert_eq!(names, ["include", "skip", "deprecated", "specifiedBy", "oneOf", "key"]);

        let key = catalog.directive("key").unwrap();
        assert!(key.is_repeatable());
        assert!(!key.is_builtin());
        assert_eq!(key.locations(), ["OBJECT".to_string(), "INTERFACE".to_string()]);
        assert_eq!(key.arguments()[0].type_ref().to_string(), "String!");
    }

    #[test]
    fn test_descriptions() {
        let catalog = elaborate("\"\"\"\n  A registered user\n\"\"\"\ntype User { id: ID }");
        assert_eq!(catalog.get("User").unwrap().description(), Some("A registered user"));
    }

    #[test]
    fn test_extension_of_missing_type_is_internal_error() {
        let tokens = significant_tokens("extend type Ghost { id: ID }");
        let document = build_document(&tokens).unwrap();
        let err = Builder::new().build(&document).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E300));
    }
}
