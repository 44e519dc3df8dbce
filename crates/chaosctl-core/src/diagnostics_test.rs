use super::{Diagnostic, DiagnosticSeverity};
use crate::FieldPath;

#[test]
fn diagnostics_sort_errors_first_then_by_path() {
    let mut diagnostics = vec![
        Diagnostic::warning("manifest.templates.empty", FieldPath::root(), "no templates"),
        Diagnostic::error(
            "manifest.kind",
            FieldPath::root().key("kind"),
            "unsupported kind",
        ),
        Diagnostic::error("manifest.name", FieldPath::root(), "name is required"),
    ];

    Diagnostic::sort_stable(&mut diagnostics);

    assert_eq!(diagnostics[0].code, "manifest.name");
    assert_eq!(diagnostics[1].code, "manifest.kind");
    assert_eq!(diagnostics[2].severity, DiagnosticSeverity::Warning);
}

#[test]
fn diagnostic_display_includes_code_and_path() {
    let diagnostic = Diagnostic::error(
        "json_schema.validation",
        FieldPath::root().key("spec").key("templates").index(0),
        "\"name\" is a required property",
    );
    assert!(diagnostic.is_error());
    assert_eq!(
        diagnostic.to_string(),
        "error[json_schema.validation] $.spec.templates[0]: \"name\" is a required property"
    );
}
