//! Non-fatal findings reported while rendering.
//!
//! Every diagnostic is logged through `tracing` the moment it is raised and
//! collected so callers can inspect or count them afterwards.

use std::fmt;

#[cfg(test)]
mod tests;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Diagnostic codes.
///
/// - T1xxx: constructs with no target equivalent
/// - T2xxx: constructs that translate but change meaning
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticCode {
    /// Node kind with no rendering rule
    T1001,
    /// Protected or private base class
    T2001,
    /// Class-kind aggregate with an implicit copy constructor
    T2002,
    /// Pure virtual method on a value aggregate
    T2003,
    /// Virtual method on a value aggregate
    T2004,
    /// Explicit default constructor on a value aggregate
    T2005,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::T1001 => "T1001",
            DiagnosticCode::T2001 => "T2001",
            DiagnosticCode::T2002 => "T2002",
            DiagnosticCode::T2003 => "T2003",
            DiagnosticCode::T2004 => "T2004",
            DiagnosticCode::T2005 => "T2005",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::T1001 => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: code.severity(),
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)
    }
}

/// Collected diagnostics for one unit.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and record a diagnostic.
    pub fn report(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(code, message);
        match diagnostic.severity {
            Severity::Error => tracing::error!(code = %diagnostic.code, "{}", diagnostic.message),
            Severity::Warning => tracing::warn!(code = %diagnostic.code, "{}", diagnostic.message),
        }
        self.items.push(diagnostic);
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
