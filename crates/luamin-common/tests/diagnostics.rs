use luamin_common::diagnostics::format_message;
use luamin_common::{Diagnostic, DiagnosticCategory, diagnostic_codes};

#[test]
fn test_error_constructor_sets_category() {
    let diag = Diagnostic::error("boom", diagnostic_codes::EMITTER_NOT_IMPLEMENTED);
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.code, 1001);
    assert_eq!(diag.message_text, "boom");
}

#[test]
fn test_display_includes_code_and_message() {
    let diag = Diagnostic::warning("odd comment", diagnostic_codes::MALFORMED_COMMENT);
    assert_eq!(diag.to_string(), "warning L1002: odd comment");
}

#[test]
fn test_format_message_replaces_placeholders() {
    assert_eq!(
        format_message("emitter not implemented for kind {0} ({1})", &["Goto2", "x"]),
        "emitter not implemented for kind Goto2 (x)"
    );
}

#[test]
fn test_diagnostic_serializes_to_json() {
    let diag = Diagnostic::error("bad", diagnostic_codes::KEY_NOTATION_MISMATCH);
    let value = serde_json::to_value(&diag).unwrap();
    assert_eq!(value["code"], 1003);
    assert_eq!(value["category"], "Error");
}

#[test]
fn test_categories_render_by_severity() {
    let warning = Diagnostic::warning("w", diagnostic_codes::MALFORMED_COMMENT);
    let error = Diagnostic::error("e", diagnostic_codes::EMITTER_NOT_IMPLEMENTED);
    assert_eq!(warning.category, DiagnosticCategory::Warning);
    assert!(warning.to_string().starts_with("warning "));
    assert!(error.to_string().starts_with("error "));
    assert_eq!(
        serde_json::to_value(&warning).unwrap()["category"],
        "Warning"
    );
}
