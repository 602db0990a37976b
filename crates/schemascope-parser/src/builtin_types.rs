//! Built-in types and directives
//!
//! Every GraphQL schema implicitly contains the specified scalars, the
//! introspection types and the specified directives. Elaboration appends
//! them to the catalog after the user's own declarations; a document may
//! redeclare a built-in scalar, in which case its own declaration wins.

use schemascope_core::catalog::{
    ArgumentDescriptor, DirectiveDescriptor, FieldDescriptor, TypeDescriptor, TypeKind, TypeRef,
};

/// Built-in scalar for signed 32-bit integers
pub const INT: &str = "Int";

/// Built-in scalar for double-precision floats
pub const FLOAT: &str = "Float";

/// Built-in scalar for UTF-8 text
pub const STRING: &str = "String";

/// Built-in scalar for `true` or `false`
pub const BOOLEAN: &str = "Boolean";

/// Built-in scalar for unique identifiers
pub const ID: &str = "ID";

/// The specified scalars in their conventional order.
pub const SCALARS: [&str; 5] = [INT, FLOAT, STRING, BOOLEAN, ID];

/// Names of the introspection types.
pub const INTROSPECTION_TYPES: [&str; 8] = [
    "__Schema",
    "__Type",
    "__Field",
    "__InputValue",
    "__EnumValue",
    "__Directive",
    "__TypeKind",
    "__DirectiveLocation",
];

/// Every location a directive definition may name.
pub const DIRECTIVE_LOCATIONS: [&str; 19] = [
    "QUERY",
    "MUTATION",
    "SUBSCRIPTION",
    "FIELD",
    "FRAGMENT_DEFINITION",
    "FRAGMENT_SPREAD",
    "INLINE_FRAGMENT",
    "VARIABLE_DEFINITION",
    "SCHEMA",
    "SCALAR",
    "OBJECT",
    "FIELD_DEFINITION",
    "ARGUMENT_DEFINITION",
    "INTERFACE",
    "UNION",
    "ENUM",
    "ENUM_VALUE",
    "INPUT_OBJECT",
    "INPUT_FIELD_DEFINITION",
];

pub fn is_builtin_scalar(name: &str) -> bool {
    SCALARS.contains(&name)
}

pub fn is_introspection_type(name: &str) -> bool {
    INTROSPECTION_TYPES.contains(&name)
}

fn ty(name: &str) -> TypeRef {
    TypeRef::named(name)
}

/// `[name!]`
fn list_of(name: &str) -> TypeRef {
    ty(name).non_null().list()
}

fn field(name: &str, type_ref: TypeRef) -> FieldDescriptor {
    FieldDescriptor::new(name, type_ref)
}

fn include_deprecated() -> ArgumentDescriptor {
    ArgumentDescriptor::new("includeDeprecated", ty(BOOLEAN)).with_default_value("false")
}

fn deprecation_fields() -> [FieldDescriptor; 2] {
    [
        field("isDeprecated", ty(BOOLEAN).non_null()),
        field("deprecationReason", ty(STRING)),
    ]
}

/// Descriptors for the five specified scalars.
pub fn scalar_types() -> Vec<TypeDescriptor> {
    [
        (INT, "The `Int` scalar type represents non-fractional signed whole numeric values."),
        (FLOAT, "The `Float` scalar type represents signed double-precision fractional values."),
        (STRING, "The `String` scalar type represents textual data as UTF-8 character sequences."),
        (BOOLEAN, "The `Boolean` scalar type represents `true` or `false`."),
        (ID, "The `ID` scalar type represents a unique identifier."),
    ]
    .into_iter()
    .map(|(name, description)| {
        TypeDescriptor::new(name, TypeKind::Scalar)
            .with_description(description)
            .builtin()
    })
    .collect()
}

/// Descriptors for the introspection types, all named with the reserved
/// `__` prefix.
pub fn introspection_types() -> Vec<TypeDescriptor> {
    let schema = TypeDescriptor::new("__Schema", TypeKind::Object).with_fields(vec![
        field("description", ty(STRING)),
        field("types", list_of("__Type").non_null()),
        field("queryType", ty("__Type").non_null()),
        field("mutationType", ty("__Type")),
        field("subscriptionType", ty("__Type")),
        field("directives", list_of("__Directive").non_null()),
    ]);

    let type_ = TypeDescriptor::new("__Type", TypeKind::Object).with_fields(vec![
        field("kind", ty("__TypeKind").non_null()),
        field("name", ty(STRING)),
        field("description", ty(STRING)),
        field("specifiedByURL", ty(STRING)),
        field("fields", list_of("__Field")).with_arguments(vec![include_deprecated()]),
        field("interfaces", list_of("__Type")),
        field("possibleTypes", list_of("__Type")),
        field("enumValues", list_of("__EnumValue")).with_arguments(vec![include_deprecated()]),
        field("inputFields", list_of("__InputValue"))
            .with_arguments(vec![include_deprecated()]),
        field("ofType", ty("__Type")),
        field("isOneOf", ty(BOOLEAN)),
    ]);

    let mut field_fields = vec![
        field("name", ty(STRING).non_null()),
        field("description", ty(STRING)),
        field("args", list_of("__InputValue").non_null())
            .with_arguments(vec![include_deprecated()]),
        field("type", ty("__Type").non_null()),
    ];
    field_fields.extend(deprecation_fields());
    let field_type = TypeDescriptor::new("__Field", TypeKind::Object).with_fields(field_fields);

    let mut input_value_fields = vec![
        field("name", ty(STRING).non_null()),
        field("description", ty(STRING)),
        field("type", ty("__Type").non_null()),
        field("defaultValue", ty(STRING)),
    ];
    input_value_fields.extend(deprecation_fields());
    let input_value =
        TypeDescriptor::new("__InputValue", TypeKind::Object).with_fields(input_value_fields);

    let mut enum_value_fields = vec![
        field("name", ty(STRING).non_null()),
        field("description", ty(STRING)),
    ];
    enum_value_fields.extend(deprecation_fields());
    let enum_value =
        TypeDescriptor::new("__EnumValue", TypeKind::Object).with_fields(enum_value_fields);

    let directive = TypeDescriptor::new("__Directive", TypeKind::Object).with_fields(vec![
        field("name", ty(STRING).non_null()),
        field("description", ty(STRING)),
        field("isRepeatable", ty(BOOLEAN).non_null()),
        field("locations", list_of("__DirectiveLocation").non_null()),
        field("args", list_of("__InputValue").non_null())
            .with_arguments(vec![include_deprecated()]),
    ]);

    let type_kind = TypeDescriptor::new("__TypeKind", TypeKind::Enum).with_enum_values(
        [
            "SCALAR",
            "OBJECT",
            "INTERFACE",
            "UNION",
            "ENUM",
            "INPUT_OBJECT",
            "LIST",
            "NON_NULL",
        ]
        .map(String::from)
        .to_vec(),
    );

    let directive_location = TypeDescriptor::new("__DirectiveLocation", TypeKind::Enum)
        .with_enum_values(DIRECTIVE_LOCATIONS.map(String::from).to_vec());

    [
        schema,
        type_,
        field_type,
        input_value,
        enum_value,
        directive,
        type_kind,
        directive_location,
    ]
    .into_iter()
    .map(TypeDescriptor::builtin)
    .collect()
}

/// Descriptors for the specified directives.
pub fn directives() -> Vec<DirectiveDescriptor> {
    let locations =
        |names: &[&str]| -> Vec<String> { names.iter().map(|name| name.to_string()).collect() };
    let executable = ["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"];

    vec![
        DirectiveDescriptor::new("include", locations(&executable))
            .with_arguments(vec![ArgumentDescriptor::new("if", ty(BOOLEAN).non_null())]),
        DirectiveDescriptor::new("skip", locations(&executable))
            .with_arguments(vec![ArgumentDescriptor::new("if", ty(BOOLEAN).non_null())]),
        DirectiveDescriptor::new(
            "deprecated",
            locations(&[
                "FIELD_DEFINITION",
                "ARGUMENT_DEFINITION",
                "INPUT_FIELD_DEFINITION",
                "ENUM_VALUE",
            ]),
        )
        .with_arguments(vec![
            ArgumentDescriptor::new("reason", ty(STRING))
                .with_default_value("\"No longer supported\""),
        ]),
        DirectiveDescriptor::new("specifiedBy", locations(&["SCALAR"]))
            .with_arguments(vec![ArgumentDescriptor::new("url", ty(STRING).non_null())]),
        DirectiveDescriptor::new("oneOf", locations(&["INPUT_OBJECT"])),
    ]
    .into_iter()
    .map(DirectiveDescriptor::builtin)
    .collect()
}
