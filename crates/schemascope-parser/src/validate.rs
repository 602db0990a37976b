//! Validation module for SDL documents using the visitor pattern
//!
//! This module implements a visitor-based (read-only) traversal of the parsed
//! document. It sits between the parser and elaboration so that elaboration
//! only ever sees structurally sound documents.
//!
//! ## Validations Performed
//!
//! - **Type references**: every field, argument, interface, union member and
//!   root operation names a defined type (`E200`)
//! - **Uniqueness**: type names, field names (across a type and all of its
//!   extensions), argument names, enum values and directive names (`E201` to
//!   `E206`)
//! - **Directives**: every applied directive is defined and allowed at the
//!   location it is applied (`E205`)
//! - **Schema definition**: at most one schema definition, each root operation
//!   named once, and root operation types are object types (`E207` to `E209`)
//! - **Extensions**: only defined types can be extended, with the matching
//!   keyword (`E210`, `E211`)
//!
//! All problems are collected and reported together.

use std::collections::HashMap;

use log::debug;

use schemascope_core::catalog::TypeKind;

use crate::{
    builtin_types,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser_types::{
        ArgumentUse, Definition, DirectiveDefinition, DirectiveUse, Document,
        EnumValueDefinition, FieldDefinition, InputValueDefinition, OperationKind,
        OperationTypeDefinition, SchemaDefinition, TypeAnnotation, TypeDefinition,
    },
    span::{Span, Spanned},
};

/// Visitor trait for traversing SDL documents.
///
/// Default implementations perform recursive traversal so implementors can
/// override only the methods they care about.
pub trait Visitor<'a> {
    /// Visit a complete document
    fn visit_document(&mut self, document: &Document<'a>) {
        for definition in &document.definitions {
            self.visit_definition(definition);
        }
    }

    fn visit_definition(&mut self, definition: &Definition<'a>) {
        match definition {
            Definition::Schema(schema) => self.visit_schema_definition(schema),
            Definition::Type(ty) => self.visit_type_definition(ty),
            Definition::Directive(directive) => self.visit_directive_definition(directive),
        }
    }

    /// Visit a schema definition or extension
    fn visit_schema_definition(&mut self, schema: &SchemaDefinition<'a>) {
        self.visit_directive_uses(&schema.directives, "SCHEMA");
        for operation in &schema.operations {
            self.visit_operation_type(operation);
        }
    }

    fn visit_operation_type(&mut self, operation: &OperationTypeDefinition<'a>) {
        self.visit_type_reference(&operation.type_name);
    }

    /// Visit a type definition or extension
    fn visit_type_definition(&mut self, ty: &TypeDefinition<'a>) {
        for interface in &ty.interfaces {
            self.visit_type_reference(interface);
        }
        self.visit_directive_uses(&ty.directives, directive_location(ty.kind));
        for field in &ty.fields {
            self.visit_field_definition(field);
        }
        for input_field in &ty.input_fields {
            self.visit_input_value(input_field, "INPUT_FIELD_DEFINITION");
        }
        for member in &ty.members {
            self.visit_type_reference(member);
        }
        for value in &ty.values {
            self.visit_enum_value(value);
        }
    }

    fn visit_field_definition(&mut self, field: &FieldDefinition<'a>) {
        for argument in &field.arguments {
            self.visit_input_value(argument, "ARGUMENT_DEFINITION");
        }
        self.visit_type_annotation(&field.ty);
        self.visit_directive_uses(&field.directives, "FIELD_DEFINITION");
    }

    /// Visit an argument definition or input field; `location` is the
    /// directive location of the value itself
    fn visit_input_value(&mut self, value: &InputValueDefinition<'a>, location: &'static str) {
        self.visit_type_annotation(&value.ty);
        self.visit_directive_uses(&value.directives, location);
    }

    fn visit_enum_value(&mut self, value: &EnumValueDefinition<'a>) {
        self.visit_directive_uses(&value.directives, "ENUM_VALUE");
    }

    fn visit_directive_definition(&mut self, directive: &DirectiveDefinition<'a>) {
        for argument in &directive.arguments {
            self.visit_input_value(argument, "ARGUMENT_DEFINITION");
        }
    }

    fn visit_directive_uses(&mut self, directives: &[DirectiveUse<'a>], location: &'static str) {
        for directive in directives {
            self.visit_directive_use(directive, location);
        }
    }

    /// Visit a directive application at `location`
    fn visit_directive_use(&mut self, _directive: &DirectiveUse<'a>, _location: &'static str) {}

    /// Visit a type annotation on a field, argument or input field
    fn visit_type_annotation(&mut self, _ty: &TypeAnnotation) {}

    /// Visit a bare type name: interface, union member or root operation
    fn visit_type_reference(&mut self, _name: &Spanned<&'a str>) {}
}

/// The directive location matching a type definition keyword.
fn directive_location(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Object => "OBJECT",
        TypeKind::Interface => "INTERFACE",
        TypeKind::Union => "UNION",
        TypeKind::Enum => "ENUM",
        TypeKind::InputObject => "INPUT_OBJECT",
        TypeKind::Scalar => "SCALAR",
    }
}

#[derive(Debug, Clone, Copy)]
struct DefinedType {
    kind: TypeKind,
    span: Span,
}

/// Emit `code` if `name` was already seen, otherwise remember it.
fn check_unique<'a>(
    seen: &mut HashMap<&'a str, Span>,
    name: &Spanned<&'a str>,
    what: &str,
    code: ErrorCode,
    diagnostics: &mut DiagnosticCollector,
) {
    match seen.get(name.inner()) {
        Some(first) => diagnostics.emit(
            Diagnostic::error(format!("{what} `{}` is defined multiple times", name.inner()))
                .with_code(code)
                .with_label(name.span(), "duplicate definition")
                .with_secondary_label(*first, "first defined here"),
        ),
        None => {
            seen.insert(*name.inner(), name.span());
        }
    }
}

/// Validator that checks every structural constraint of an SDL document
///
/// Runs in two steps: [`register`](Self::register) records every type and
/// directive definition so that forward references resolve, then the
/// visitor traversal checks references and uniqueness. The validator
/// collects all errors during traversal for reporting afterwards.
pub struct Validator<'a> {
    types: HashMap<&'a str, DefinedType>,
    directive_spans: HashMap<&'a str, Span>,
    directive_locations: HashMap<String, Vec<String>>,
    /// Member names per type, shared by a definition and its extensions
    members: HashMap<&'a str, HashMap<&'a str, Span>>,
    schema_span: Option<Span>,
    root_operations: HashMap<OperationKind, Span>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Validator<'a> {
    pub fn new() -> Self {
        let directive_locations = builtin_types::directives()
            .into_iter()
            .map(|directive| (directive.name().to_string(), directive.locations().to_vec()))
            .collect();

        Self {
            types: HashMap::new(),
            directive_spans: HashMap::new(),
            directive_locations,
            members: HashMap::new(),
            schema_span: None,
            root_operations: HashMap::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Record every type and directive definition in `document`.
    pub fn register(&mut self, document: &Document<'a>) {
        for definition in &document.definitions {
            match definition {
                Definition::Type(ty) if !ty.is_extension => self.register_type(ty),
                Definition::Directive(directive) => self.register_directive(directive),
                _ => {}
            }
        }
    }

    fn register_type(&mut self, ty: &TypeDefinition<'a>) {
        let name = *ty.name.inner();

        if let Some(existing) = self.types.get(name) {
            self.diagnostics.emit(
                Diagnostic::error(format!("type `{name}` is defined multiple times"))
                    .with_code(ErrorCode::E201)
                    .with_label(ty.name.span(), "duplicate definition")
                    .with_secondary_label(existing.span, "first defined here")
                    .with_help(format!(
                        "remove the duplicate or use `extend {} {name}`",
                        ty.kind.keyword()
                    )),
            );
            return;
        }

        let clashes_with_builtin = builtin_types::is_introspection_type(name)
            || (builtin_types::is_builtin_scalar(name) && ty.kind != TypeKind::Scalar);
        if clashes_with_builtin {
            self.diagnostics.emit(
                Diagnostic::error(format!("type `{name}` conflicts with a built-in type"))
                    .with_code(ErrorCode::E201)
                    .with_label(ty.name.span(), "redefines a built-in type")
                    .with_help("choose a different type name"),
            );
            return;
        }

        self.types.insert(
            name,
            DefinedType {
                kind: ty.kind,
                span: ty.name.span(),
            },
        );
    }

    fn register_directive(&mut self, directive: &DirectiveDefinition<'a>) {
        let name = *directive.name.inner();

        if let Some(first) = self.directive_spans.get(name) {
            self.diagnostics.emit(
                Diagnostic::error(format!("directive `@{name}` is defined multiple times"))
                    .with_code(ErrorCode::E206)
                    .with_label(directive.name.span(), "duplicate definition")
                    .with_secondary_label(*first, "first defined here"),
            );
            return;
        }
        if self.directive_locations.contains_key(name) {
            self.diagnostics.emit(
                Diagnostic::error(format!("directive `@{name}` is a built-in directive"))
                    .with_code(ErrorCode::E206)
                    .with_label(directive.name.span(), "redefines a built-in directive")
                    .with_help("choose a different directive name"),
            );
            return;
        }

        self.directive_spans.insert(name, directive.name.span());
        self.directive_locations.insert(
            name.to_string(),
            directive
                .locations
                .iter()
                .map(|location| location.inner().to_string())
                .collect(),
        );
    }

    fn is_known_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
            || builtin_types::is_builtin_scalar(name)
            || builtin_types::is_introspection_type(name)
    }

    fn is_registered(&self, ty: &TypeDefinition<'a>) -> bool {
        self.types
            .get(ty.name.inner())
            .is_some_and(|defined| defined.span == ty.name.span())
    }

    fn check_type_exists(&mut self, name: &str, span: Span) {
        if !self.is_known_type(name) {
            self.diagnostics.emit(
                Diagnostic::error(format!("unknown type `{name}`"))
                    .with_code(ErrorCode::E200)
                    .with_label(span, "not defined")
                    .with_help(format!("define `{name}` or check the spelling")),
            );
        }
    }

    fn check_unique_arguments(&mut self, arguments: &[InputValueDefinition<'a>]) {
        let mut seen = HashMap::new();
        for argument in arguments {
            check_unique(
                &mut seen,
                &argument.name,
                "argument",
                ErrorCode::E203,
                &mut self.diagnostics,
            );
        }
    }

    fn check_unique_argument_uses(&mut self, arguments: &[ArgumentUse<'a>]) {
        let mut seen = HashMap::new();
        for argument in arguments {
            check_unique(
                &mut seen,
                &argument.name,
                "argument",
                ErrorCode::E203,
                &mut self.diagnostics,
            );
        }
    }

    fn check_extension_target(&mut self, ty: &TypeDefinition<'a>) {
        let name = *ty.name.inner();
        match self.types.get(name) {
            None => self.diagnostics.emit(
                Diagnostic::error(format!("cannot extend type `{name}` because it is not defined"))
                    .with_code(ErrorCode::E210)
                    .with_label(ty.name.span(), "undefined type")
                    .with_help(format!("define `{} {name}` first", ty.kind.keyword())),
            ),
            Some(existing) if existing.kind != ty.kind => self.diagnostics.emit(
                Diagnostic::error(format!(
                    "cannot extend {} `{name}` with `extend {}`",
                    existing.kind.keyword(),
                    ty.kind.keyword()
                ))
                .with_code(ErrorCode::E211)
                .with_label(ty.name.span(), "wrong extension kind")
                .with_secondary_label(existing.span, "defined here")
                .with_help(format!("use `extend {} {name}`", existing.kind.keyword())),
            ),
            Some(_) => {}
        }
    }

    fn check_unique_members(&mut self, ty: &TypeDefinition<'a>) {
        let seen = self.members.entry(*ty.name.inner()).or_default();

        for field in &ty.fields {
            check_unique(seen, &field.name, "field", ErrorCode::E202, &mut self.diagnostics);
        }
        for input_field in &ty.input_fields {
            check_unique(
                seen,
                &input_field.name,
                "input field",
                ErrorCode::E202,
                &mut self.diagnostics,
            );
        }
        for value in &ty.values {
            check_unique(seen, &value.name, "enum value", ErrorCode::E204, &mut self.diagnostics);
        }
    }
}

impl Default for Validator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Visitor<'a> for Validator<'a> {
    fn visit_schema_definition(&mut self, schema: &SchemaDefinition<'a>) {
        if !schema.is_extension {
            match self.schema_span {
                Some(first) => self.diagnostics.emit(
                    Diagnostic::error("schema is defined multiple times")
                        .with_code(ErrorCode::E207)
                        .with_label(schema.span, "duplicate schema definition")
                        .with_secondary_label(first, "first defined here")
                        .with_help("use `extend schema` to add root operations"),
                ),
                None => self.schema_span = Some(schema.span),
            }
        }

        // Default traversal
        self.visit_directive_uses(&schema.directives, "SCHEMA");
        for operation in &schema.operations {
            self.visit_operation_type(operation);
        }
    }

    fn visit_operation_type(&mut self, operation: &OperationTypeDefinition<'a>) {
        let kind = *operation.operation.inner();
        match self.root_operations.get(&kind) {
            Some(first) => self.diagnostics.emit(
                Diagnostic::error(format!("root operation `{kind}` is defined multiple times"))
                    .with_code(ErrorCode::E208)
                    .with_label(operation.operation.span(), "duplicate root operation")
                    .with_secondary_label(*first, "first defined here"),
            ),
            None => {
                self.root_operations.insert(kind, operation.operation.span());
            }
        }

        let name = *operation.type_name.inner();
        let span = operation.type_name.span();
        match self.types.get(name) {
            Some(defined) if defined.kind == TypeKind::Object => {}
            Some(defined) => self.diagnostics.emit(
                Diagnostic::error(format!(
                    "root operation `{kind}` must be an object type, but `{name}` is {}",
                    defined.kind
                ))
                .with_code(ErrorCode::E209)
                .with_label(span, "not an object type")
                .with_secondary_label(defined.span, "defined here"),
            ),
            None if self.is_known_type(name) => self.diagnostics.emit(
                Diagnostic::error(format!(
                    "root operation `{kind}` must be an object type, but `{name}` is built in"
                ))
                .with_code(ErrorCode::E209)
                .with_label(span, "not an object type"),
            ),
            None => self.check_type_exists(name, span),
        }
    }

    fn visit_type_definition(&mut self, ty: &TypeDefinition<'a>) {
        if ty.is_extension {
            self.check_extension_target(ty);
            self.check_unique_members(ty);
        } else if self.is_registered(ty) {
            // Rejected duplicates are not merged into the first definition
            self.check_unique_members(ty);
        }

        // Default traversal
        for interface in &ty.interfaces {
            self.visit_type_reference(interface);
        }
        self.visit_directive_uses(&ty.directives, directive_location(ty.kind));
        for field in &ty.fields {
            self.visit_field_definition(field);
        }
        for input_field in &ty.input_fields {
            self.visit_input_value(input_field, "INPUT_FIELD_DEFINITION");
        }
        for member in &ty.members {
            self.visit_type_reference(member);
        }
        for value in &ty.values {
            self.visit_enum_value(value);
        }
    }

    fn visit_field_definition(&mut self, field: &FieldDefinition<'a>) {
        self.check_unique_arguments(&field.arguments);

        for argument in &field.arguments {
            self.visit_input_value(argument, "ARGUMENT_DEFINITION");
        }
        self.visit_type_annotation(&field.ty);
        self.visit_directive_uses(&field.directives, "FIELD_DEFINITION");
    }

    fn visit_directive_definition(&mut self, directive: &DirectiveDefinition<'a>) {
        self.check_unique_arguments(&directive.arguments);

        for argument in &directive.arguments {
            self.visit_input_value(argument, "ARGUMENT_DEFINITION");
        }
    }

    fn visit_directive_use(&mut self, directive: &DirectiveUse<'a>, location: &'static str) {
        let name = *directive.name.inner();

        match self.directive_locations.get(name) {
            None => self.diagnostics.emit(
                Diagnostic::error(format!("unknown directive `@{name}`"))
                    .with_code(ErrorCode::E205)
                    .with_label(directive.span, "not defined")
                    .with_help(format!("define it with `directive @{name} on {location}`")),
            ),
            Some(locations) if !locations.iter().any(|allowed| allowed == location) => {
                self.diagnostics.emit(
                    Diagnostic::error(format!("directive `@{name}` may not be used on {location}"))
                        .with_code(ErrorCode::E205)
                        .with_label(directive.span, "misplaced directive")
                        .with_help(format!("`@{name}` is allowed on {}", locations.join(", "))),
                )
            }
            Some(_) => {}
        }

        self.check_unique_argument_uses(&directive.arguments);
    }

    fn visit_type_annotation(&mut self, ty: &TypeAnnotation) {
        self.check_type_exists(ty.named_type(), ty.name_span);
    }

    fn visit_type_reference(&mut self, name: &Spanned<&'a str>) {
        self.check_type_exists(name.inner(), name.span());
    }
}

/// Run every validation over a parsed document.
///
/// Returns:
/// - Ok(()) when no validation issues are found
/// - Err(ParseError) with every collected diagnostic otherwise
pub fn validate_document(document: &Document<'_>) -> Result<(), ParseError> {
    let mut validator = Validator::new();
    validator.register(document);
    validator.visit_document(document);

    debug!(
        definitions = document.definitions.len(),
        types = validator.types.len();
        "Validated document"
    );

    validator.diagnostics.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::tokenize, parser::build_document, tokens::PositionedToken};

    fn significant_tokens(input: &str) -> Vec<PositionedToken<'_>> {
        tokenize(input)
            .expect("Failed to tokenize input")
            .into_iter()
            .filter(|token| !token.is_trivia())
            .collect()
    }

    fn validation_codes(input: &str) -> Vec<ErrorCode> {
        let tokens = significant_tokens(input);
        let document = build_document(&tokens).expect("document should parse");
        match validate_document(&document) {
            Ok(()) => Vec::new(),
            Err(err) => err
                .diagnostics()
                .iter()
                .filter_map(|diagnostic| diagnostic.code())
                .collect(),
        }
    }

    /// Test visitor that counts visited nodes
    #[derive(Default)]
    struct CountingVisitor {
        type_annotations: usize,
        type_references: usize,
        directive_uses: Vec<&'static str>,
    }

    impl<'a> Visitor<'a> for CountingVisitor {
        fn visit_directive_use(&mut self, _directive: &DirectiveUse<'a>, location: &'static str) {
            self.directive_uses.push(location);
        }

        fn visit_type_annotation(&mut self, _ty: &TypeAnnotation) {
            self.type_annotations += 1;
        }

        fn visit_type_reference(&mut self, _name: &Spanned<&'a str>) {
            self.type_references += 1;
        }
    }

    #[test]
    fn test_visitor_default_traversal() {
        let tokens = significant_tokens(
            "schema @a { query: Q }\n\
             type Q implements I @b { f(x: Int @c): String @d }\n\
             union U @e = Q\n\
             enum E { A @f }\n\
             input In { v: Int @g }",
        );
        let document = build_document(&tokens).unwrap();
        let mut visitor = CountingVisitor::default();
        visitor.visit_document(&document);

        // f, x, v
        assert_eq!(visitor.type_annotations, 3);
        // query root, interface I, union member Q
        assert_eq!(visitor.type_references, 3);
        assert_eq!(
            visitor.directive_uses,
            [
                "SCHEMA",
                "OBJECT",
                "ARGUMENT_DEFINITION",
                "FIELD_DEFINITION",
                "UNION",
                "ENUM_VALUE",
                "INPUT_FIELD_DEFINITION",
            ]
        );
    }

    #[test]
    fn test_valid_document() {
        let codes = validation_codes(
            r#"
            type Query { user(id: ID!): User, search(term: String = "x"): [Result!]! }
            type User implements Node @key(fields: "id") { id: ID! name: String @deprecated }
            interface Node { id: ID! }
            union Result = User
            enum Role { ADMIN USER }
            input Filter { role: Role = ADMIN }
            scalar DateTime @specifiedBy(url: "https://example.com")
            directive @key(fields: String!) repeatable on OBJECT | INTERFACE
            extend type User { joined: DateTime }
            "#,
        );
        assert!(codes.is_empty(), "unexpected diagnostics: {codes:?}");
    }

    #[test]
    fn test_forward_references_resolve() {
        assert!(validation_codes("type Query { me: User }\ntype User { id: ID }").is_empty());
    }

    #[test]
    fn test_unknown_types_are_all_reported() {
        let codes = validation_codes(
            "type Query { a: Missing, b(x: Nope): Int }\ntype T implements Ghost { id: ID }\nunion U = Phantom",
        );
        assert_eq!(codes, [ErrorCode::E200; 4]);
    }

    #[test]
    fn test_duplicate_type() {
        assert_eq!(
            validation_codes("type A { id: ID }\ntype A { name: String }"),
            [ErrorCode::E201]
        );
        assert_eq!(validation_codes("type String { id: ID }"), [ErrorCode::E201]);
        assert_eq!(validation_codes("type __Type { id: ID }"), [ErrorCode::E201]);
        // Redeclaring a built-in scalar as a scalar is allowed
        assert!(validation_codes("scalar String").is_empty());
    }

    #[test]
    fn test_reserved_names_may_be_declared() {
        assert!(validation_codes("type __Internal { id: ID }").is_empty());
    }

    #[test]
    fn test_duplicate_members() {
        assert_eq!(validation_codes("type A { id: ID id: Int }"), [ErrorCode::E202]);
        assert_eq!(
            validation_codes("type A { id: ID }\nextend type A { id: ID }"),
            [ErrorCode::E202]
        );
        assert_eq!(validation_codes("type A { f(x: Int, x: Int): ID }"), [ErrorCode::E203]);
        assert_eq!(validation_codes("enum E { A B A }"), [ErrorCode::E204]);
        assert_eq!(validation_codes("input I { a: Int a: Int }"), [ErrorCode::E202]);
    }

    #[test]
    fn test_directives() {
        assert_eq!(validation_codes("type A @nope { id: ID }"), [ErrorCode::E205]);
        assert_eq!(
            validation_codes("type A @deprecated { id: ID }"),
            [ErrorCode::E205]
        );
        assert_eq!(
            validation_codes("directive @a on OBJECT\ndirective @a on FIELD"),
            [ErrorCode::E206]
        );
        assert_eq!(validation_codes("directive @skip on OBJECT"), [ErrorCode::E206]);
        assert_eq!(
            validation_codes("type A { id: ID @deprecated(reason: \"a\", reason: \"b\") }"),
            [ErrorCode::E203]
        );
    }

    #[test]
    fn test_schema_definition() {
        assert_eq!(
            validation_codes("schema { query: Q }\nschema { query: Q }\ntype Q { id: ID }"),
            [ErrorCode::E207, ErrorCode::E208]
        );
        assert_eq!(
            validation_codes("schema { query: Q, query: Q }\ntype Q { id: ID }"),
            [ErrorCode::E208]
        );
        assert_eq!(
            validation_codes("schema { query: Q }\ninterface Q { id: ID }"),
            [ErrorCode::E209]
        );
        assert_eq!(validation_codes("schema { query: String }"), [ErrorCode::E209]);
        assert_eq!(validation_codes("schema { query: Missing }"), [ErrorCode::E200]);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(validation_codes("extend type Ghost { id: ID }"), [ErrorCode::E210]);
        assert_eq!(
            validation_codes("enum Color { RED }\nextend type Color { id: ID }"),
            [ErrorCode::E211]
        );
    }

    #[test]
    fn test_duplicate_diagnostic_points_at_both_definitions() {
        let tokens = significant_tokens("type A { id: ID }\ntype A { id: ID }");
        let document = build_document(&tokens).unwrap();
        let err = validate_document(&document).unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        let labels = err.diagnostics()[0].labels();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].span(), Span::new(23..24));
        assert_eq!(labels[1].span(), Span::new(5..6));
    }
}
