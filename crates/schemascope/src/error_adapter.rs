//! Error adapter for converting SchemascopeError to miette diagnostics.
//!
//! This module bridges the library's error types and miette's rich
//! diagnostic formatting, so a host can render parser diagnostics as
//! annotated source snippets.
//!
//! # Multi-Error Support
//!
//! When a [`schemascope_parser::ParseError`] contains multiple diagnostics,
//! each diagnostic is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use schemascope_parser::{Span, error::Diagnostic};

use crate::SchemascopeError;

/// Adapter for a single parser diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display + 'a>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`SchemascopeError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a SchemascopeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SchemascopeError::Io(_) => "schemascope::io",
            SchemascopeError::SchemaParse { .. } => return None,
            SchemascopeError::UnsupportedFile { .. } => "schemascope::unsupported_file",
            SchemascopeError::EmptySource => "schemascope::empty_source",
            SchemascopeError::Config(_) => "schemascope::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            SchemascopeError::UnsupportedFile { .. } => "choose a file ending in .graphql or .gql",
            SchemascopeError::EmptySource => "paste SDL such as `type Query { ping: String }`",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`SchemascopeError`] into a list of reportable errors.
///
/// [`SchemascopeError::SchemaParse`] yields one [`Reportable`] per parser
/// diagnostic; every other variant yields a single one.
pub fn to_reportables(err: &SchemascopeError) -> Vec<Reportable<'_>> {
    match err {
        SchemascopeError::SchemaParse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use schemascope_parser::{ParseError, error::ErrorCode};

    use super::*;

    #[test]
    fn test_diagnostics_from_real_parse() {
        let source = "type Query { a: Missing, b: AlsoMissing }";
        let err = crate::Schemascope::default().parse(source).unwrap_err();

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "unknown type `Missing`");
        assert_eq!(
            reportables[0].code().map(|code| code.to_string()),
            Some("E200".to_string())
        );

        let labels: Vec<_> = reportables[1].labels().unwrap().collect();
        assert_eq!(labels[0].offset(), 28);
        assert_eq!(labels[0].len(), "AlsoMissing".len());
        assert!(reportables[1].source_code().is_some());
    }

    #[test]
    fn test_labels_keep_primary_flag() {
        let diag = Diagnostic::error("type `A` is defined multiple times")
            .with_code(ErrorCode::E201)
            .with_label(Span::new(23..24), "duplicate definition")
            .with_secondary_label(Span::new(5..6), "first defined here");
        let err = SchemascopeError::new_parse_error(ParseError::from(diag), "type A {}\ntype A {}");

        let reportables = to_reportables(&err);
        let labels: Vec<_> = reportables[0].labels().unwrap().collect();

        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert_eq!(labels[0].label(), Some("duplicate definition"));
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_non_parse_errors() {
        let err = SchemascopeError::UnsupportedFile {
            path: PathBuf::from("schema.json"),
        };
        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(
                    e.to_string(),
                    "Unsupported file `schema.json`: expected a .graphql or .gql file"
                );
                assert_eq!(
                    e.code().map(|code| code.to_string()),
                    Some("schemascope::unsupported_file".to_string())
                );
                assert!(e.help().is_some());
                assert!(e.labels().is_none());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_empty_source_error() {
        let reportables = to_reportables(&SchemascopeError::EmptySource);
        assert_eq!(reportables[0].to_string(), "Please provide a GraphQL schema");
    }
}
