//! Parser AST types
//!
//! This module defines the data structures representing a parsed SDL
//! document. These types form the output of the parser and the input of
//! validation and elaboration.
//!
//! ## Source Location Tracking
//!
//! Names and literal values are wrapped in [`Spanned<T>`] so later phases can
//! point diagnostics at the exact source range. Definitions carry the span of
//! the whole definition.

use std::fmt;

use schemascope_core::catalog::{TypeKind, TypeRef};

use crate::span::{Span, Spanned};

/// A parsed SDL document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'src> {
    pub definitions: Vec<Definition<'src>>,
}

/// A top-level definition or extension.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition<'src> {
    Schema(SchemaDefinition<'src>),
    Type(TypeDefinition<'src>),
    Directive(DirectiveDefinition<'src>),
}

impl Definition<'_> {
    pub fn span(&self) -> Span {
        match self {
            Definition::Schema(schema) => schema.span,
            Definition::Type(ty) => ty.span,
            Definition::Directive(directive) => directive.span,
        }
    }
}

/// `schema { ... }` or `extend schema ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition<'src> {
    pub is_extension: bool,
    pub description: Option<Spanned<String>>,
    pub directives: Vec<DirectiveUse<'src>>,
    pub operations: Vec<OperationTypeDefinition<'src>>,
    pub span: Span,
}

/// The three GraphQL root operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(OperationKind::Query),
            "mutation" => Some(OperationKind::Mutation),
            "subscription" => Some(OperationKind::Subscription),
            _ => None,
        }
    }

    /// The type name used when no schema definition names this root.
    pub fn default_type_name(self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        };
        write!(f, "{keyword}")
    }
}

/// `query: Query` inside a schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationTypeDefinition<'src> {
    pub operation: Spanned<OperationKind>,
    pub type_name: Spanned<&'src str>,
}

/// A named type definition or extension of any kind.
///
/// Only the member list matching `kind` is populated: `fields` for object
/// and interface types, `input_fields` for input objects, `members` for
/// unions and `values` for enums.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition<'src> {
    pub is_extension: bool,
    pub kind: TypeKind,
    pub name: Spanned<&'src str>,
    pub description: Option<Spanned<String>>,
    pub interfaces: Vec<Spanned<&'src str>>,
    pub directives: Vec<DirectiveUse<'src>>,
    pub fields: Vec<FieldDefinition<'src>>,
    pub input_fields: Vec<InputValueDefinition<'src>>,
    pub members: Vec<Spanned<&'src str>>,
    pub values: Vec<EnumValueDefinition<'src>>,
    pub span: Span,
}

impl<'src> TypeDefinition<'src> {
    /// An empty definition of `kind` named `name`.
    pub fn new(kind: TypeKind, name: Spanned<&'src str>, span: Span) -> Self {
        Self {
            is_extension: false,
            kind,
            name,
            description: None,
            interfaces: Vec::new(),
            directives: Vec::new(),
            fields: Vec::new(),
            input_fields: Vec::new(),
            members: Vec::new(),
            values: Vec::new(),
            span,
        }
    }
}

/// A type annotation such as `[Post!]!`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub type_ref: TypeRef,
    /// Span of the whole annotation, wrappers included.
    pub span: Span,
    /// Span of the innermost named type.
    pub name_span: Span,
}

impl TypeAnnotation {
    pub fn named_type(&self) -> &str {
        self.type_ref.named_type()
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.type_ref.fmt(f)
    }
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition<'src> {
    pub description: Option<Spanned<String>>,
    pub name: Spanned<&'src str>,
    pub arguments: Vec<InputValueDefinition<'src>>,
    pub ty: TypeAnnotation,
    pub directives: Vec<DirectiveUse<'src>>,
}

/// An argument definition or an input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition<'src> {
    pub description: Option<Spanned<String>>,
    pub name: Spanned<&'src str>,
    pub ty: TypeAnnotation,
    pub default_value: Option<Spanned<Value<'src>>>,
    pub directives: Vec<DirectiveUse<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition<'src> {
    pub description: Option<Spanned<String>>,
    pub name: Spanned<&'src str>,
    pub directives: Vec<DirectiveUse<'src>>,
}

/// A directive application: `@deprecated(reason: "use id")`.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveUse<'src> {
    pub name: Spanned<&'src str>,
    pub arguments: Vec<ArgumentUse<'src>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentUse<'src> {
    pub name: Spanned<&'src str>,
    pub value: Spanned<Value<'src>>,
}

/// `directive @name(args) repeatable on LOCATION | LOCATION`.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition<'src> {
    pub description: Option<Spanned<String>>,
    pub name: Spanned<&'src str>,
    pub arguments: Vec<InputValueDefinition<'src>>,
    pub repeatable: bool,
    pub locations: Vec<Spanned<&'src str>>,
    pub span: Span,
}

/// A constant input value. Variables are not allowed in SDL.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'src> {
    Int(&'src str),
    Float(&'src str),
    String(String),
    Boolean(bool),
    Null,
    Enum(&'src str),
    List(Vec<Value<'src>>),
    Object(Vec<(&'src str, Value<'src>)>),
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    write!(f, "\"")?;
    for ch in text.chars() {
        match ch {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}

/// Renders the value as SDL source text.
impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(text) | Value::Float(text) | Value::Enum(text) => write!(f, "{text}"),
            Value::String(text) => write_escaped(f, text),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Null => write!(f, "null"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(entries) => {
                write!(f, "{{")?;
                for (i, (name, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
