//! Parser for GraphQL SDL tokens.
//!
//! This module transforms the significant tokens produced by the
//! [`lexer`](super::lexer) into the AST defined in
//! [`parser_types`](super::parser_types). Trivia (whitespace, comments and
//! commas) must be filtered out before parsing. The public entry point is
//! [`build_document`].
//!
//! GraphQL keywords are contextual: `type` starts a definition at the top
//! level but is an ordinary field name inside a field block.

use winnow::{
    Parser as _,
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use schemascope_core::catalog::{TypeKind, TypeRef};

use crate::{
    builtin_types::DIRECTIVE_LOCATIONS,
    error::{Diagnostic, ErrorCode},
    parser_types as types,
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what was expected
    Label(&'static str),
    /// Remaining token count (`eof_offset()`) at error start position
    ///
    /// Used to calculate start_offset as: `tokens.len() - start_offset_value`
    StartOffset(usize),
    /// An operation or fragment was found where a type system definition
    /// was expected.
    Executable,
    /// List types, list values or input objects nested deeper than
    /// [`MAX_NESTING_DEPTH`].
    TooDeep,
}

/// Deepest nesting of `[` or `{` accepted in a type annotation or a value.
const MAX_NESTING_DEPTH: usize = 128;

type Input<'src> = SdlTokenSlice<'src>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;
/// Type alias for winnow TokenSlice with our positioned tokens
type SdlTokenSlice<'src> = TokenSlice<'src, PositionedToken<'src>>;

fn cut_err<'src, O, F>(input: &mut Input<'src>, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'src>) -> IResult<O>,
{
    let start_remaining = input.eof_offset();

    match f(input) {
        Ok(o) => Ok(o),
        Err(ErrMode::Backtrack(mut e)) | Err(ErrMode::Cut(mut e)) => {
            e.push(Context::StartOffset(start_remaining));
            Err(ErrMode::Cut(e))
        }
        Err(e) => Err(e),
    }
}

/// Backtrack error describing what was expected at the current position.
fn expected(label: &'static str) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Label(label));
    ErrMode::Backtrack(e)
}

/// Cut error describing what was expected, starting at the current position.
fn cut_error_with_label(input: &Input<'_>, label: &'static str) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Label(label));
    e.push(Context::StartOffset(input.eof_offset()));
    ErrMode::Cut(e)
}

fn executable_error(input: &Input<'_>) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Executable);
    e.push(Context::StartOffset(input.eof_offset()));
    ErrMode::Cut(e)
}

fn nesting_error(input: &Input<'_>) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::TooDeep);
    e.push(Context::StartOffset(input.eof_offset()));
    ErrMode::Cut(e)
}

/// Look at the next token without consuming it.
fn peek_token<'src>(input: &mut Input<'src>) -> Option<&'src PositionedToken<'src>> {
    let checkpoint = input.checkpoint();
    let token = any::<_, ErrMode<ContextError<Context>>>
        .parse_next(input)
        .ok();
    input.reset(&checkpoint);
    token
}

/// Consume the next token if it equals `expected`.
fn eat(input: &mut Input<'_>, expected: &Token<'_>) -> Option<Span> {
    let token = peek_token(input)?;
    if token.token == *expected {
        input.next_token();
        Some(token.span)
    } else {
        None
    }
}

/// Consume the next token if it is the name `keyword`.
fn eat_keyword(input: &mut Input<'_>, keyword: &str) -> Option<Span> {
    let token = peek_token(input)?;
    if token.is_name(keyword) {
        input.next_token();
        Some(token.span)
    } else {
        None
    }
}

fn expect(input: &mut Input<'_>, token: &Token<'_>, label: &'static str) -> IResult<Span> {
    eat(input, token).ok_or_else(|| expected(label))
}

fn expect_keyword(input: &mut Input<'_>, keyword: &str, label: &'static str) -> IResult<Span> {
    eat_keyword(input, keyword).ok_or_else(|| expected(label))
}

/// Parse a name with span preservation.
fn parse_name<'src>(input: &mut Input<'src>, label: &'static str) -> IResult<Spanned<&'src str>> {
    any.verify_map(|token: &PositionedToken<'src>| match &token.token {
        Token::Name(name) => Some(Spanned::new(*name, token.span)),
        _ => None,
    })
    .context(Context::Label(label))
    .parse_next(input)
}

/// Parse an optional description: a string or block string.
fn description(input: &mut Input<'_>) -> Option<Spanned<String>> {
    let token = peek_token(input)?;
    match &token.token {
        Token::StringValue(text) | Token::BlockString(text) => {
            input.next_token();
            Some(Spanned::new(text.clone(), token.span))
        }
        _ => None,
    }
}

/// Parse `open item+ close` if the next token is `open`.
///
/// Returns the items and the span from `open` to `close`.
fn delimited_items<'src, T>(
    input: &mut Input<'src>,
    open: &Token<'_>,
    close: &Token<'_>,
    mut item: impl FnMut(&mut Input<'src>) -> IResult<T>,
) -> IResult<Option<(Vec<T>, Span)>> {
    let Some(open_span) = eat(input, open) else {
        return Ok(None);
    };

    cut_err(input, |input| {
        let mut items = Vec::new();
        loop {
            items.push(item(input)?);
            if let Some(close_span) = eat(input, close) {
                return Ok(Some((items, open_span.union(close_span))));
            }
        }
    })
}

/// Parse a constant value: scalars, enum values, lists and input objects.
fn value<'src>(input: &mut Input<'src>) -> IResult<Spanned<types::Value<'src>>> {
    nested_value(input, 0)
}

fn nested_value<'src>(
    input: &mut Input<'src>,
    depth: usize,
) -> IResult<Spanned<types::Value<'src>>> {
    let opens_nesting = peek_token(input)
        .is_some_and(|token| matches!(token.token, Token::LeftBracket | Token::LeftBrace));
    if opens_nesting && depth >= MAX_NESTING_DEPTH {
        return Err(nesting_error(input));
    }

    if let Some(open) = eat(input, &Token::LeftBracket) {
        return cut_err(input, |input| {
            let mut items = Vec::new();
            loop {
                if let Some(close) = eat(input, &Token::RightBracket) {
                    return Ok(Spanned::new(types::Value::List(items), open.union(close)));
                }
                items.push(nested_value(input, depth + 1)?.into_inner());
            }
        });
    }

    if let Some(open) = eat(input, &Token::LeftBrace) {
        return cut_err(input, |input| {
            let mut entries = Vec::new();
            loop {
                if let Some(close) = eat(input, &Token::RightBrace) {
                    return Ok(Spanned::new(types::Value::Object(entries), open.union(close)));
                }
                let field = parse_name(input, "object field name")?;
                expect(input, &Token::Colon, "`:`")?;
                let field_value = nested_value(input, depth + 1)?;
                entries.push((*field.inner(), field_value.into_inner()));
            }
        });
    }

    any.verify_map(|token: &PositionedToken<'src>| {
        let value = match &token.token {
            Token::IntValue(text) => types::Value::Int(*text),
            Token::FloatValue(text) => types::Value::Float(*text),
            Token::StringValue(text) | Token::BlockString(text) => {
                types::Value::String(text.clone())
            }
            Token::Name("true") => types::Value::Boolean(true),
            Token::Name("false") => types::Value::Boolean(false),
            Token::Name("null") => types::Value::Null,
            Token::Name(name) => types::Value::Enum(*name),
            _ => return None,
        };
        Some(Spanned::new(value, token.span))
    })
    .context(Context::Label("value"))
    .parse_next(input)
}

/// Parse a type annotation: `Name`, `[Type]` and `Type!`.
fn type_annotation(input: &mut Input<'_>) -> IResult<types::TypeAnnotation> {
    nested_type_annotation(input, 0)
}

fn nested_type_annotation(input: &mut Input<'_>, depth: usize) -> IResult<types::TypeAnnotation> {
    let opens_list = peek_token(input).is_some_and(|token| token.token == Token::LeftBracket);
    if opens_list && depth >= MAX_NESTING_DEPTH {
        return Err(nesting_error(input));
    }

    let (mut type_ref, name_span, mut span) = if let Some(open) = eat(input, &Token::LeftBracket) {
        cut_err(input, |input| {
            let inner = nested_type_annotation(input, depth + 1)?;
            let close = expect(input, &Token::RightBracket, "`]`")?;
            Ok((inner.type_ref.list(), inner.name_span, open.union(close)))
        })?
    } else {
        let name = parse_name(input, "type")?;
        (TypeRef::named(*name.inner()), name.span(), name.span())
    };

    if let Some(bang) = eat(input, &Token::Bang) {
        type_ref = type_ref.non_null();
        span = span.union(bang);
    }

    Ok(types::TypeAnnotation {
        type_ref,
        span,
        name_span,
    })
}

/// Parse arguments of a directive application: `(name: value, ...)`.
fn argument_uses<'src>(
    input: &mut Input<'src>,
) -> IResult<(Vec<types::ArgumentUse<'src>>, Option<Span>)> {
    let arguments = delimited_items(input, &Token::LeftParen, &Token::RightParen, |input| {
        let name = parse_name(input, "argument name")?;
        expect(input, &Token::Colon, "`:`")?;
        let value = value(input)?;
        Ok(types::ArgumentUse { name, value })
    })?;

    Ok(match arguments {
        Some((arguments, span)) => (arguments, Some(span)),
        None => (Vec::new(), None),
    })
}

/// Parse zero or more directive applications.
fn directives<'src>(input: &mut Input<'src>) -> IResult<Vec<types::DirectiveUse<'src>>> {
    let mut directives = Vec::new();

    while let Some(at) = eat(input, &Token::At) {
        let directive = cut_err(input, |input| {
            let name = parse_name(input, "directive name")?;
            let (arguments, arguments_span) = argument_uses(input)?;
            let span = at.union(arguments_span.unwrap_or(name.span()));
            Ok(types::DirectiveUse {
                name,
                arguments,
                span,
            })
        })?;
        directives.push(directive);
    }

    Ok(directives)
}

/// Parse an argument definition or an input object field.
fn input_value_definition<'src>(
    input: &mut Input<'src>,
    label: &'static str,
) -> IResult<types::InputValueDefinition<'src>> {
    let description = description(input);
    let name = parse_name(input, label)?;

    cut_err(input, |input| {
        expect(input, &Token::Colon, "`:`")?;
        let ty = type_annotation(input)?;
        let default_value = match eat(input, &Token::Equals) {
            Some(_) => Some(value(input)?),
            None => None,
        };
        let directives = directives(input)?;

        Ok(types::InputValueDefinition {
            description,
            name,
            ty,
            default_value,
            directives,
        })
    })
}

fn arguments_definition<'src>(
    input: &mut Input<'src>,
) -> IResult<Vec<types::InputValueDefinition<'src>>> {
    let arguments = delimited_items(input, &Token::LeftParen, &Token::RightParen, |input| {
        input_value_definition(input, "argument name")
    })?;
    Ok(arguments.map(|(arguments, _)| arguments).unwrap_or_default())
}

fn field_definition<'src>(input: &mut Input<'src>) -> IResult<types::FieldDefinition<'src>> {
    let description = description(input);
    let name = parse_name(input, "field name")?;

    cut_err(input, |input| {
        let arguments = arguments_definition(input)?;
        expect(input, &Token::Colon, "`:`")?;
        let ty = type_annotation(input)?;
        let directives = directives(input)?;

        Ok(types::FieldDefinition {
            description,
            name,
            arguments,
            ty,
            directives,
        })
    })
}

fn enum_value_definition<'src>(
    input: &mut Input<'src>,
) -> IResult<types::EnumValueDefinition<'src>> {
    let description = description(input);
    let name = any
        .verify_map(|token: &PositionedToken<'src>| match &token.token {
            Token::Name(name) if !matches!(*name, "true" | "false" | "null") => {
                Some(Spanned::new(*name, token.span))
            }
            _ => None,
        })
        .context(Context::Label("enum value other than `true`, `false` or `null`"))
        .parse_next(input)?;
    let directives = cut_err(input, directives)?;

    Ok(types::EnumValueDefinition {
        description,
        name,
        directives,
    })
}

/// Parse `implements A & B`, with an optional leading `&`.
fn implements_interfaces<'src>(input: &mut Input<'src>) -> IResult<Vec<Spanned<&'src str>>> {
    if eat_keyword(input, "implements").is_none() {
        return Ok(Vec::new());
    }

    cut_err(input, |input| {
        eat(input, &Token::Amp);
        let mut interfaces = vec![parse_name(input, "interface name")?];
        while eat(input, &Token::Amp).is_some() {
            interfaces.push(parse_name(input, "interface name")?);
        }
        Ok(interfaces)
    })
}

/// Parse the members after `=` in a union, with an optional leading `|`.
fn union_members<'src>(input: &mut Input<'src>) -> IResult<Vec<Spanned<&'src str>>> {
    eat(input, &Token::Pipe);
    let mut members = vec![parse_name(input, "union member type")?];
    while eat(input, &Token::Pipe).is_some() {
        members.push(parse_name(input, "union member type")?);
    }
    Ok(members)
}

fn operation_type_definition<'src>(
    input: &mut Input<'src>,
) -> IResult<types::OperationTypeDefinition<'src>> {
    let operation = any
        .verify_map(|token: &PositionedToken<'src>| match &token.token {
            Token::Name(keyword) => types::OperationKind::from_keyword(keyword)
                .map(|kind| Spanned::new(kind, token.span)),
            _ => None,
        })
        .context(Context::Label("`query`, `mutation` or `subscription`"))
        .parse_next(input)?;

    let type_name = cut_err(input, |input| {
        expect(input, &Token::Colon, "`:`")?;
        parse_name(input, "type name")
    })?;

    Ok(types::OperationTypeDefinition {
        operation,
        type_name,
    })
}

fn directives_span(span: Span, directives: &[types::DirectiveUse<'_>]) -> Span {
    directives
        .iter()
        .fold(span, |acc, directive| acc.union(directive.span))
}

/// Parse `schema { ... }` or the body of `extend schema`.
fn schema_definition<'src>(
    input: &mut Input<'src>,
    description: Option<Spanned<String>>,
    is_extension: bool,
    start: Span,
) -> IResult<types::SchemaDefinition<'src>> {
    let keyword = expect_keyword(input, "schema", "`schema`")?;

    cut_err(input, |input| {
        let directives = directives(input)?;
        let mut span = directives_span(start.union(keyword), &directives);

        let operations = match delimited_items(
            input,
            &Token::LeftBrace,
            &Token::RightBrace,
            operation_type_definition,
        )? {
            Some((operations, block_span)) => {
                span = span.union(block_span);
                operations
            }
            None if is_extension && !directives.is_empty() => Vec::new(),
            None => return Err(expected("`{`")),
        };

        Ok(types::SchemaDefinition {
            is_extension,
            description,
            directives,
            operations,
            span,
        })
    })
}

/// Parse a named type definition or extension, starting at its keyword.
fn type_definition<'src>(
    input: &mut Input<'src>,
    kind: TypeKind,
    description: Option<Spanned<String>>,
    is_extension: bool,
    start: Span,
) -> IResult<types::TypeDefinition<'src>> {
    let keyword = expect_keyword(input, kind.keyword(), "type definition keyword")?;

    cut_err(input, |input| {
        let name = parse_name(input, "type name")?;
        let mut span = start.union(keyword).union(name.span());
        let mut definition = types::TypeDefinition::new(kind, name, span);
        definition.is_extension = is_extension;
        definition.description = description;

        let mut block_span = None;
        match kind {
            TypeKind::Object | TypeKind::Interface => {
                definition.interfaces = implements_interfaces(input)?;
                definition.directives = directives(input)?;
                if let Some((fields, fields_span)) =
                    delimited_items(input, &Token::LeftBrace, &Token::RightBrace, field_definition)?
                {
                    definition.fields = fields;
                    block_span = Some(fields_span);
                }
            }
            TypeKind::Union => {
                definition.directives = directives(input)?;
                if eat(input, &Token::Equals).is_some() {
                    definition.members = union_members(input)?;
                }
            }
            TypeKind::Enum => {
                definition.directives = directives(input)?;
                if let Some((values, values_span)) = delimited_items(
                    input,
                    &Token::LeftBrace,
                    &Token::RightBrace,
                    enum_value_definition,
                )? {
                    definition.values = values;
                    block_span = Some(values_span);
                }
            }
            TypeKind::InputObject => {
                definition.directives = directives(input)?;
                if let Some((fields, fields_span)) =
                    delimited_items(input, &Token::LeftBrace, &Token::RightBrace, |input| {
                        input_value_definition(input, "input field name")
                    })?
                {
                    definition.input_fields = fields;
                    block_span = Some(fields_span);
                }
            }
            TypeKind::Scalar => {
                definition.directives = directives(input)?;
            }
        }

        span = [
            definition.interfaces.last().map(Spanned::span),
            definition.members.last().map(Spanned::span),
            block_span,
        ]
        .into_iter()
        .flatten()
        .fold(directives_span(span, &definition.directives), |acc, s| {
            acc.union(s)
        });
        definition.span = span;

        let adds_nothing = definition.interfaces.is_empty()
            && definition.directives.is_empty()
            && definition.fields.is_empty()
            && definition.input_fields.is_empty()
            && definition.members.is_empty()
            && definition.values.is_empty();
        if is_extension && adds_nothing {
            return Err(expected("directives or members to add"));
        }

        Ok(definition)
    })
}

fn directive_location<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    any.verify_map(|token: &PositionedToken<'src>| match &token.token {
        Token::Name(name) if DIRECTIVE_LOCATIONS.iter().any(|location| location == name) => {
            Some(Spanned::new(*name, token.span))
        }
        _ => None,
    })
    .context(Context::Label("directive location"))
    .parse_next(input)
}

/// Parse `directive @name(args) repeatable on LOCATION | LOCATION`.
fn directive_definition<'src>(
    input: &mut Input<'src>,
    description: Option<Spanned<String>>,
    start: Span,
) -> IResult<types::DirectiveDefinition<'src>> {
    let keyword = expect_keyword(input, "directive", "`directive`")?;

    cut_err(input, |input| {
        expect(input, &Token::At, "`@`")?;
        let name = parse_name(input, "directive name")?;
        let arguments = arguments_definition(input)?;
        let repeatable = eat_keyword(input, "repeatable").is_some();
        expect_keyword(input, "on", "`on`")?;

        eat(input, &Token::Pipe);
        let mut locations = vec![directive_location(input)?];
        while eat(input, &Token::Pipe).is_some() {
            locations.push(directive_location(input)?);
        }

        let span = start
            .union(keyword)
            .union(locations.last().map_or(name.span(), Spanned::span));

        Ok(types::DirectiveDefinition {
            description,
            name,
            arguments,
            repeatable,
            locations,
            span,
        })
    })
}

/// Parse the body of an `extend` definition.
fn extension<'src>(input: &mut Input<'src>, start: Span) -> IResult<types::Definition<'src>> {
    expect_keyword(input, "extend", "`extend`")?;

    let Some(next) = peek_token(input) else {
        return Err(cut_error_with_label(input, "type system extension"));
    };

    match &next.token {
        Token::Name("schema") => {
            schema_definition(input, None, true, start).map(types::Definition::Schema)
        }
        Token::Name(keyword) => match TypeKind::from_keyword(keyword) {
            Some(kind) => {
                type_definition(input, kind, None, true, start).map(types::Definition::Type)
            }
            None => Err(cut_error_with_label(input, "type system extension")),
        },
        _ => Err(cut_error_with_label(input, "type system extension")),
    }
}

/// Parse one top-level definition.
fn definition<'src>(input: &mut Input<'src>) -> IResult<types::Definition<'src>> {
    let description = description(input);

    let Some(next) = peek_token(input) else {
        return Err(cut_error_with_label(input, "definition after description"));
    };
    let start = description.as_ref().map_or(next.span, Spanned::span);

    match &next.token {
        Token::Name("schema") => {
            schema_definition(input, description, false, start).map(types::Definition::Schema)
        }
        Token::Name("directive") => {
            directive_definition(input, description, start).map(types::Definition::Directive)
        }
        Token::Name("extend") if description.is_none() => extension(input, start),
        Token::Name("query" | "mutation" | "subscription" | "fragment") | Token::LeftBrace => {
            Err(executable_error(input))
        }
        Token::Name(keyword) => match TypeKind::from_keyword(keyword) {
            Some(kind) => type_definition(input, kind, description, false, start)
                .map(types::Definition::Type),
            None => Err(cut_error_with_label(input, "type system definition")),
        },
        _ => Err(cut_error_with_label(input, "type system definition")),
    }
}

fn document<'src>(input: &mut Input<'src>) -> IResult<types::Document<'src>> {
    let mut definitions = Vec::new();
    while input.eof_offset() > 0 {
        definitions.push(definition(input)?);
    }
    Ok(types::Document { definitions })
}

/// Utility function to convert winnow errors to our diagnostic format
///
/// Extracts position information from error context (StartOffset) and
/// calculates error spans using the token array.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken<'_>],
    current_remaining: usize,
) -> Diagnostic {
    let context_error = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    let start_remaining = context_error.context().find_map(|ctx| match ctx {
        Context::StartOffset(n) => Some(*n),
        _ => None,
    });
    let label = context_error.context().find_map(|ctx| match ctx {
        Context::Label(label) => Some(*label),
        _ => None,
    });
    let is_executable = context_error
        .context()
        .any(|ctx| matches!(ctx, Context::Executable));
    let is_too_deep = context_error
        .context()
        .any(|ctx| matches!(ctx, Context::TooDeep));

    // Offsets into `tokens` computed from remaining token counts
    let end_offset = tokens.len() - current_remaining;
    let start_offset = start_remaining
        .map(|r| tokens.len() - r)
        .unwrap_or(end_offset);

    if is_executable {
        let span = tokens
            .get(end_offset)
            .map(|token| token.span)
            .unwrap_or_default();
        return Diagnostic::error("executable definitions are not allowed in a schema document")
            .with_code(ErrorCode::E103)
            .with_label(span, "operation or fragment")
            .with_help("only type system definitions can be visualized");
    }

    if is_too_deep {
        let span = tokens
            .get(end_offset)
            .map(|token| token.span)
            .unwrap_or_default();
        return Diagnostic::error(format!(
            "nesting too deep: lists and input objects may be nested at most {MAX_NESTING_DEPTH} levels"
        ))
        .with_code(ErrorCode::E100)
        .with_label(span, "nesting limit exceeded here")
        .with_help("flatten the type or default value");
    }

    let Some(token) = tokens.get(end_offset) else {
        let span = tokens.last().map(|token| token.span).unwrap_or_default();
        let message = match label {
            Some(label) => format!("unexpected end of input: expected {label}"),
            None => "unexpected end of input".to_string(),
        };
        return Diagnostic::error(message)
            .with_code(ErrorCode::E101)
            .with_label(span, "input ends here")
            .with_help("check for a missing closing `}`, `)` or `]`");
    };

    let message = match label {
        Some(label) => format!("unexpected token `{token}`: expected {label}"),
        None => format!("unexpected token `{token}`"),
    };
    let mut diagnostic = Diagnostic::error(message)
        .with_code(ErrorCode::E100)
        .with_label(token.span, "unexpected token");

    if start_offset < end_offset {
        let context_span = tokens[start_offset].span.union(tokens[end_offset - 1].span);
        diagnostic = diagnostic.with_secondary_label(context_span, "while parsing this");
    }

    diagnostic
}

/// Parse significant tokens into a document.
///
/// `tokens` must not contain trivia. A token list with no definitions is an
/// empty document and is rejected with `E102`.
pub fn build_document<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<types::Document<'src>, Diagnostic> {
    if tokens.is_empty() {
        return Err(Diagnostic::error("schema document contains no definitions")
            .with_code(ErrorCode::E102)
            .with_help("provide at least one type definition, for example `type Query { ping: String }`"));
    }

    let mut token_slice = TokenSlice::new(tokens);

    match document.parse_next(&mut token_slice) {
        Ok(document) => Ok(document),
        Err(e) => {
            let current_remaining = token_slice.eof_offset();
            Err(convert_error(e, tokens, current_remaining))
        }
    }
}
