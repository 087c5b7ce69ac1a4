use crate::diagnostics::{Diagnostic, DiagnosticCategory, diagnostic_codes};
use crate::position::SourcePosition;

#[test]
fn test_error_diagnostic_display() {
    let diag = Diagnostic::error(
        "app.rb",
        Some(SourcePosition::new(3, 4)),
        "unknown node kind 'foo'",
        diagnostic_codes::UNKNOWN_NODE_KIND,
    );
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(
        diag.to_string(),
        "app.rb:3:4 - error G9001: unknown node kind 'foo'"
    );
}

#[test]
fn test_diagnostic_without_position() {
    let diag = Diagnostic::error("app.rb", None, "boom", diagnostic_codes::MALFORMED_NODE);
    assert_eq!(diag.to_string(), "app.rb - error G9002: boom");
}

#[test]
fn test_line_below_resets_column() {
    let pos = SourcePosition::new(10, 7);
    assert_eq!(pos.line_below(2), SourcePosition::new(12, 0));
    assert_eq!(pos.zero_based_line(), 9);
}
