//! Lexical analyzer for GraphQL SDL source text.
//!
//! The lexer converts source text into a stream of [`Token`]s for parsing.
//! It handles whitespace, comments, commas, string and block string literals,
//! numbers, names, and punctuators.
//!
//! The public entry point is [`tokenize`], which performs error-recovering
//! lexical analysis and collects all diagnostics in a single pass.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, delimited, not, opt, peek, preceded, repeat, terminated},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, none_of, one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Diagnostic information attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

fn cut_with(input: &Input<'_>, diagnostic: LexerDiagnostic) -> ErrMode<ContextError<LexerDiagnostic>> {
    ErrMode::Cut(ContextError::new().add_context(input, &input.checkpoint(), diagnostic))
}

fn fixed_width_hex(input: &mut Input<'_>) -> IResult<u32> {
    take_while(4, |c: char| c.is_ascii_hexdigit())
        .verify_map(|hex: &str| u32::from_str_radix(hex, 16).ok())
        .parse_next(input)
}

/// Parse the `XXXX` of `\uXXXX`.
///
/// A leading surrogate must be followed by `\uXXXX` holding a trailing
/// surrogate; the pair decodes to a single char. Lone surrogates fail.
fn fixed_width_code_point(input: &mut Input<'_>) -> IResult<char> {
    let leading = fixed_width_hex(input)?;

    let code_point = if (0xD800..=0xDBFF).contains(&leading) {
        let trailing = preceded("\\u", fixed_width_hex)
            .verify(|trailing: &u32| (0xDC00..=0xDFFF).contains(trailing))
            .parse_next(input)?;
        0x10000 + ((leading - 0xD800) << 10) + (trailing - 0xDC00)
    } else {
        leading
    };

    char::from_u32(code_point).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

/// Parse a unicode escape after the backslash: `uXXXX` or `u{X..}`.
fn unicode_escape(input: &mut Input<'_>, escape_start: usize) -> IResult<char> {
    'u'.parse_next(input)?;

    let braced = delimited(
        '{',
        take_while(1..=6, |c: char| c.is_ascii_hexdigit()),
        '}',
    )
    .verify_map(|hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32));

    cut_err(alt((braced, fixed_width_code_point)).context(LexerDiagnostic {
        code: ErrorCode::E004,
        message: "invalid unicode escape",
        help: Some("use `\\uXXXX` with 4 hex digits or `\\u{...}` with 1-6 hex digits"),
        start: escape_start,
    }))
    .parse_next(input)
}

/// Parse a single-character escape after the backslash.
fn escape_char(input: &mut Input<'_>) -> IResult<char> {
    one_of(['"', '\\', '/', 'b', 'f', 'n', 'r', 't'])
        .map(|c| match c {
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            other => other,
        })
        .parse_next(input)
}

/// Parse an escape sequence in a string, starting with the backslash.
fn string_escape(input: &mut Input<'_>) -> IResult<char> {
    let escape_start = input.current_token_start();

    '\\'.parse_next(input)?;

    match unicode_escape(input, escape_start) {
        Ok(ch) => return Ok(ch),
        Err(ErrMode::Backtrack(_)) => {}
        Err(e) => return Err(e),
    }

    if let Ok(ch) = escape_char(input) {
        return Ok(ch);
    }

    Err(cut_with(
        input,
        LexerDiagnostic {
            code: ErrorCode::E003,
            message: "invalid escape sequence",
            help: Some(
                "valid escapes: `\\\"`, `\\\\`, `\\/`, `\\b`, `\\f`, `\\n`, `\\r`, `\\t`, `\\uXXXX`",
            ),
            start: escape_start,
        },
    ))
}

/// Parse a quoted string value: `"hello\nworld"`.
fn string_value<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    '"'.parse_next(input)?;

    let content = repeat(0.., alt((string_escape, none_of(['"', '\\', '\n', '\r']))))
        .fold(String::new, |mut acc, ch| {
            acc.push(ch);
            acc
        });

    cut_err(terminated(content, '"'))
        .context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add closing `\"`; use `\"\"\"` for multi-line text"),
            start,
        })
        .map(Token::StringValue)
        .parse_next(input)
}

/// Parse a block string: `"""..."""`. Only `\"""` is an escape inside.
fn block_string<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    "\"\"\"".parse_next(input)?;

    let mut raw = String::new();
    loop {
        let chunk = take_while(0.., |c: char| c != '"' && c != '\\').parse_next(input)?;
        raw.push_str(chunk);

        if input.is_empty() {
            return Err(cut_with(
                input,
                LexerDiagnostic {
                    code: ErrorCode::E005,
                    message: "unterminated block string",
                    help: Some("add closing `\"\"\"`"),
                    start,
                },
            ));
        }
        if opt("\"\"\"").parse_next(input)?.is_some() {
            break;
        }
        if opt("\\\"\"\"").parse_next(input)?.is_some() {
            raw.push_str("\"\"\"");
            continue;
        }

        let ch: char = any.parse_next(input)?;
        raw.push(ch);
    }

    Ok(Token::BlockString(block_string_value(&raw)))
}

fn is_blank(line: &str) -> bool {
    line.trim_matches([' ', '\t']).is_empty()
}

/// Apply the GraphQL block string rules to raw block string content.
///
/// The common indentation of every line but the first is removed, then
/// leading and trailing blank lines are dropped.
pub(crate) fn block_string_value(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .split("\r\n")
        .flat_map(|line| line.split(['\n', '\r']))
        .collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            (indent < line.len()).then_some(indent)
        })
        .min();

    let lines: Vec<&str> = lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| match common_indent {
            Some(indent) if index > 0 => line.get(indent..).unwrap_or(""),
            _ => line,
        })
        .collect();

    let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !is_blank(line))
        .unwrap_or(first);

    lines[first..=last].join("\n")
}

/// Parse an int or float value.
fn number<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    let integer_part = (
        opt('-'),
        alt((
            '0'.void(),
            (
                one_of('1'..='9'),
                take_while(0.., |c: char| c.is_ascii_digit()),
            )
                .void(),
        )),
    );
    let fractional_part = ('.', take_while(1.., |c: char| c.is_ascii_digit()));
    let exponent_part = (
        one_of(['e', 'E']),
        opt(one_of(['+', '-'])),
        take_while(1.., |c: char| c.is_ascii_digit()),
    );

    let ((_, fraction, exponent), text) = (integer_part, opt(fractional_part), opt(exponent_part))
        .with_taken()
        .parse_next(input)?;

    cut_err(peek(not(one_of(|c: char| {
        c.is_ascii_alphanumeric() || c == '_' || c == '.'
    }))))
    .context(LexerDiagnostic {
        code: ErrorCode::E002,
        message: "invalid number",
        help: Some("a number cannot be directly followed by a name or `.`"),
        start,
    })
    .parse_next(input)?;

    if fraction.is_some() || exponent.is_some() {
        Ok(Token::FloatValue(text))
    } else {
        Ok(Token::IntValue(text))
    }
}

/// Parse a name: `[_A-Za-z][_0-9A-Za-z]*`.
fn name<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .map(Token::Name)
        .parse_next(input)
}

/// Parse a `#` comment up to the end of the line.
fn comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded('#', take_while(0.., |c: char| c != '\n' && c != '\r'))
        .map(Token::Comment)
        .parse_next(input)
}

fn punctuator<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        "...".value(Token::Spread),
        '!'.value(Token::Bang),
        '$'.value(Token::Dollar),
        '&'.value(Token::Amp),
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        ':'.value(Token::Colon),
        '='.value(Token::Equals),
        '@'.value(Token::At),
        '['.value(Token::LeftBracket),
        ']'.value(Token::RightBracket),
        '{'.value(Token::LeftBrace),
        '|'.value(Token::Pipe),
        '}'.value(Token::RightBrace),
        ','.value(Token::Comma),
    ))
    .parse_next(input)
}

/// Parse spaces, tabs and the byte order mark.
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., [' ', '\t', '\u{FEFF}'])
        .value(Token::Whitespace)
        .parse_next(input)
}

fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt(("\r\n", "\n", "\r"))
        .value(Token::Newline)
        .parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        comment,
        block_string, // Must come before string_value
        string_value,
        number,
        name,
        punctuator,
        newline,
        whitespace,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();

    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Skip a quoted string that failed to lex.
///
/// Stops after the closing quote, or at the line break of an unterminated
/// string.
fn skip_string_literal(input: &mut Input<'_>) {
    input.next_token();
    while let Some(ch) = input.next_token() {
        match ch {
            '"' | '\n' | '\r' => break,
            '\\' if !input.starts_with(['\n', '\r']) => {
                input.next_token();
            }
            _ => {}
        }
    }
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            let token_start = input.checkpoint();
            let in_string = input.starts_with('"') && !input.starts_with("\"\"\"");

            match positioned_token(&mut input) {
                Ok(token) => self.tokens.push(token),
                Err(e) => {
                    let error_pos = input.current_token_start();
                    self.diagnostics.emit(Self::convert_err_mode(e, error_pos));

                    // Resume past the bad token so later problems are reported
                    // in the same pass.
                    if in_string {
                        input.reset(&token_start);
                        skip_string_literal(&mut input);
                    } else if !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Uses the first `LexerDiagnostic` context when present and falls back
    /// to E002 (unexpected character) otherwise.
    fn convert_err_mode(err: ErrMode<ContextError<LexerDiagnostic>>, error_pos: usize) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos.max(*start + 1));

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(span, ErrorCode::E002.description())
    }
}

/// Tokenize source text, collecting every lexical error.
///
/// # Returns
///
/// - `Ok(tokens)` - All tokens, trivia included
/// - `Err(ParseError)` - One or more errors occurred; contains all diagnostics
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(input));
    lexer.finish()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn name_strategy() -> impl Strategy<Value = String> {
        "[_A-Za-z][_0-9A-Za-z]{0,20}"
    }

    fn string_content_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,;:!?()-]{0,40}"
    }

    proptest! {
        #[test]
        fn names_tokenize_as_single_name(name in name_strategy()) {
            let tokens = tokenize(&name).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(&tokens[0].token, &Token::Name(&name));
        }

        #[test]
        fn plain_strings_round_trip(content in string_content_strategy()) {
            let source = format!("\"{content}\"");
            let tokens = tokenize(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(&tokens[0].token, &Token::StringValue(content.clone()));
        }

        #[test]
        fn field_definitions_tokenize(field in name_strategy(), ty in name_strategy()) {
            let source = format!("type T {{ {field}: [{ty}!]! }}");
            prop_assert!(tokenize(&source).is_ok());
        }
    }
}
