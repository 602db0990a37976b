//! Token definitions for GraphQL SDL.
//!
//! GraphQL keywords are contextual (`type` is a valid field name), so the
//! lexer emits every word as [`Token::Name`] and the parser decides what it
//! means in context.

use std::fmt;

use crate::span::Span;

/// Lexical tokens of GraphQL SDL.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    // Lexical values
    Name(&'src str),
    IntValue(&'src str),
    FloatValue(&'src str),
    /// A quoted string with escapes already resolved.
    StringValue(String),
    /// A `"""` block string with the common indentation removed.
    BlockString(String),

    // Punctuators
    Bang,         // !
    Dollar,       // $
    Amp,          // &
    LeftParen,    // (
    RightParen,   // )
    Spread,       // ...
    Colon,        // :
    Equals,       // =
    At,           // @
    LeftBracket,  // [
    RightBracket, // ]
    LeftBrace,    // {
    Pipe,         // |
    RightBrace,   // }

    // Ignored tokens
    Comment(&'src str), // # comment
    Comma,
    Whitespace,
    Newline,
}

impl Token<'_> {
    /// Returns `true` for tokens the grammar ignores: whitespace, line
    /// terminators, comments and commas.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Comment(_) | Token::Comma | Token::Whitespace | Token::Newline
        )
    }

    /// Returns `true` if this token is the name `keyword`.
    pub fn is_name(&self, keyword: &str) -> bool {
        matches!(self, Token::Name(name) if *name == keyword)
    }
}

/// A token with its position in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl fmt::Display for PositionedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name(name) => write!(f, "{name}"),
            Token::IntValue(value) | Token::FloatValue(value) => write!(f, "{value}"),
            Token::StringValue(s) => write!(f, "{s:?}"),
            Token::BlockString(_) => write!(f, "block string"),

            Token::Bang => write!(f, "!"),
            Token::Dollar => write!(f, "$"),
            Token::Amp => write!(f, "&"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Spread => write!(f, "..."),
            Token::Colon => write!(f, ":"),
            Token::Equals => write!(f, "="),
            Token::At => write!(f, "@"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::LeftBrace => write!(f, "{{"),
            Token::Pipe => write!(f, "|"),
            Token::RightBrace => write!(f, "}}"),

            Token::Comment(_) => write!(f, "comment"),
            Token::Comma => write!(f, ","),
            Token::Whitespace => write!(f, "whitespace"),
            Token::Newline => write!(f, "newline"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivia() {
        assert!(Token::Comma.is_trivia());
        assert!(Token::Comment(" note").is_trivia());
        assert!(Token::Newline.is_trivia());
        assert!(!Token::Name("type").is_trivia());
        assert!(!Token::LeftBrace.is_trivia());
    }

    #[test]
    fn test_is_name() {
        assert!(Token::Name("type").is_name("type"));
        assert!(!Token::Name("types").is_name("type"));
        assert!(!Token::StringValue("type".to_string()).is_name("type"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::LeftBrace.to_string(), "{");
        assert_eq!(Token::Spread.to_string(), "...");
        assert_eq!(Token::Name("User").to_string(), "User");
        assert_eq!(Token::StringValue("hi".into()).to_string(), "\"hi\"");
    }
}
