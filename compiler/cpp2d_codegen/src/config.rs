//! Printer configuration.

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Knobs controlling the emitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Carry `const` qualifiers over to the output. D's transitive `const`
    /// rarely matches C++ intent, so only builtin types keep it by default.
    pub port_const: bool,
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            port_const: false,
            indent_width: INDENT_WIDTH,
        }
    }
}

impl PrinterConfig {
    pub fn with_port_const(port_const: bool) -> Self {
        Self {
            port_const,
            ..Default::default()
        }
    }

    pub fn with_indent_width(indent_width: usize) -> Self {
        Self {
            indent_width,
            ..Default::default()
        }
    }
}
