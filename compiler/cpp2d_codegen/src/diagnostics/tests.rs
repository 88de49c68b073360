use super::*;

#[test]
fn code_display() {
    assert_eq!(DiagnosticCode::T2001.to_string(), "T2001");
    assert_eq!(DiagnosticCode::T1001.as_str(), "T1001");
}

#[test]
fn unsupported_nodes_are_warnings() {
    assert_eq!(DiagnosticCode::T1001.severity(), Severity::Warning);
    assert_eq!(DiagnosticCode::T2005.severity(), Severity::Error);
}

#[test]
fn error_count_skips_warnings() {
    let mut diags = Diagnostics::new();
    diags.report(DiagnosticCode::T1001, "GotoStmt");
    diags.report(DiagnosticCode::T2001, "Foo: protected base are not D compatible");
    diags.report(DiagnosticCode::T2004, "Bar: virtual method in struct");
    assert_eq!(diags.len(), 3);
    assert_eq!(diags.error_count(), 2);
}

#[test]
fn diagnostic_display() {
    let diag = Diagnostic::new(DiagnosticCode::T2002, "class Foo is copy constructible");
    assert_eq!(
        diag.to_string(),
        "error [T2002]: class Foo is copy constructible"
    );
}
