//! Collector for accumulating diagnostics during a processing phase.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so a phase can report every problem it finds
/// instead of stopping at the first one.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Finish collection, failing if anything was emitted.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors() {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_empty_finish_ok() {
        assert!(DiagnosticCollector::new().finish().is_ok());
    }

    #[test]
    fn test_collector_single_diagnostic_fails() {
        let mut collector = DiagnosticCollector::new();
        assert!(!collector.has_errors());

        collector.emit(Diagnostic::error("type `Legacy` is defined multiple times"));
        assert!(collector.has_errors());
        assert_eq!(collector.finish().unwrap_err().diagnostics().len(), 1);
    }

    #[test]
    fn test_collector_keeps_all_diagnostics() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(
            Diagnostic::error("unknown type `Usr`")
                .with_code(ErrorCode::E200)
                .with_label(Span::new(10..13), "not defined"),
        );
        collector.emit(Diagnostic::error("unknown directive `@cached`").with_code(ErrorCode::E205));
        collector.emit(Diagnostic::error("unknown type `Pst`").with_code(ErrorCode::E200));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
        assert_eq!(err.diagnostics()[0].message(), "unknown type `Usr`");
    }
}
