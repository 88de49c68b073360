//! cpp2d code generation
//!
//! Renders a typed C++ [`TranslationUnit`] as the body of one D module.
//!
//! The translation is a single top-down walk ([`Printer`]) that consults a
//! few helpers along the way:
//! - [`semantic`]: value / reference / associative-array classification of types
//! - [`names`]: identifier mangling, library type remapping, imports
//! - [`operators`]: operator method names and synthesized `opCmp` / `opCast`
//! - [`templates`]: specialization parameter renaming and lookup
//! - [`comments`]: comment reattachment
//! - [`aggregate`]: bit-field packing and visibility labels
//! - [`overrides`]: per-node rendering overrides
//!
//! Problems in the C++ program that have no target counterpart are
//! reported as [`Diagnostic`]s and never stop the walk. A
//! [`TranslateError`] means the input tree itself is inconsistent and
//! aborts the run.

pub mod aggregate;
pub mod comments;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod names;
pub mod operators;
pub mod output;
pub mod overrides;
pub mod printer;
pub mod semantic;
pub mod templates;

pub use config::PrinterConfig;
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Severity};
pub use error::TranslateError;
pub use names::{ImportSet, IncludeSet};
pub use overrides::{MatchOverrides, NoOverrides, OverrideMap, OverrideTable};
pub use printer::Printer;

use cpp2d_ir::TranslationUnit;

/// The rendered module body with what it needs from elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    /// Module body; imports and the module header are added by the caller.
    pub code: String,
    pub imports: ImportSet,
    pub diagnostics: Vec<Diagnostic>,
}

impl Translation {
    /// `import m; //sym1 sym2 ` lines for every module the code uses.
    pub fn render_imports(&self) -> String {
        self.imports.render()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// Translate one unit.
///
/// `includes` lists the files the unit includes; declarations from those
/// files register an import of the matching module.
#[tracing::instrument(level = "debug", skip_all, fields(module = unit.module_name()))]
pub fn translate_unit(
    unit: &TranslationUnit,
    includes: &IncludeSet,
    overrides: &dyn OverrideTable,
    config: PrinterConfig,
) -> Result<Translation, TranslateError> {
    let mut printer = Printer::new(unit, includes, overrides, config);
    printer.print_decl(unit.root());
    let translation = printer.finish()?;
    tracing::debug!(
        bytes = translation.code.len(),
        imports = translation.imports.len(),
        diagnostics = translation.diagnostics.len(),
        "unit translated"
    );
    Ok(translation)
}
