//! Error codes for the diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexer errors
//! - `E1xx` - Parser errors
//! - `E2xx` - Validation errors
//! - `E3xx` - Elaboration errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    E001,

    /// Unexpected character.
    ///
    /// A character that cannot start any GraphQL token, such as `%` or `?`.
    E002,

    /// Invalid escape sequence.
    ///
    /// Valid escapes are: `\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t`,
    /// `\uXXXX` and `\u{...}`.
    E003,

    /// Invalid unicode escape.
    ///
    /// The escape is malformed or names a codepoint outside the valid range.
    E004,

    /// Unterminated block string.
    ///
    /// A `"""` block string was opened but never closed.
    E005,

    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    E100,

    /// Incomplete input.
    ///
    /// The input ended before a complete definition was parsed, for example
    /// an unterminated `{` block.
    E101,

    /// Empty document.
    ///
    /// The source contains no definitions at all.
    E102,

    /// Executable definition in a schema document.
    ///
    /// Operations and fragments cannot appear in a type system document.
    E103,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Unknown type.
    E200,

    /// Duplicate type definition.
    E201,

    /// Duplicate field definition.
    E202,

    /// Duplicate argument definition.
    E203,

    /// Duplicate enum value.
    E204,

    /// Unknown directive.
    ///
    /// Also raised when a known directive is applied at a location its
    /// definition does not list.
    E205,

    /// Duplicate directive definition.
    E206,

    /// More than one schema definition.
    E207,

    /// Root operation type defined more than once.
    E208,

    /// Root operation type is not an object type.
    E209,

    /// Extension of an undefined type.
    E210,

    /// Extension kind does not match the extended type.
    ///
    /// For example `extend enum User` where `User` is an object type.
    E211,

    // =========================================================================
    // Elaboration Errors (E3xx)
    // =========================================================================
    /// Catalog elaboration failure.
    E300,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E207 => "E207",
            ErrorCode::E208 => "E208",
            ErrorCode::E209 => "E209",
            ErrorCode::E210 => "E210",
            ErrorCode::E211 => "E211",
            ErrorCode::E300 => "E300",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E003 => "invalid escape sequence",
            ErrorCode::E004 => "invalid unicode escape",
            ErrorCode::E005 => "unterminated block string",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E102 => "empty document",
            ErrorCode::E103 => "executable definition",
            ErrorCode::E200 => "unknown type",
            ErrorCode::E201 => "duplicate type definition",
            ErrorCode::E202 => "duplicate field",
            ErrorCode::E203 => "duplicate argument",
            ErrorCode::E204 => "duplicate enum value",
            ErrorCode::E205 => "unknown or misplaced directive",
            ErrorCode::E206 => "duplicate directive definition",
            ErrorCode::E207 => "multiple schema definitions",
            ErrorCode::E208 => "duplicate root operation",
            ErrorCode::E209 => "invalid root operation type",
            ErrorCode::E210 => "extension of undefined type",
            ErrorCode::E211 => "extension kind mismatch",
            ErrorCode::E300 => "elaboration failure",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E103.to_string(), "E103");
        assert_eq!(ErrorCode::E211.to_string(), "E211");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E005.description(), "unterminated block string");
        assert_eq!(ErrorCode::E200.description(), "unknown type");
        assert_eq!(ErrorCode::E201.description(), "duplicate type definition");
    }
}
