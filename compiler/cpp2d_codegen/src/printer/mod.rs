//! Printer Core
//!
//! Walks a [`TranslationUnit`] top-down and writes D source. Every node
//! kind has one rendering rule; overrides registered in an
//! [`OverrideTable`] replace the rule for individual nodes.
//!
//! Output goes to an [`OutputStack`]: a rule that needs to inspect or drop
//! what a child produced pushes a capture buffer, renders the child, and
//! pops the text back. While inside a macro marker pair the output is
//! disabled, but the walk continues so imports and class facts are still
//! collected.
//!
//! # Modules
//!
//! - [`decl`]: Declarations other than records and functions
//! - [`record`]: Records, bit-field packing, synthesized comparisons
//! - [`function`]: Functions, methods, constructors, operators
//! - [`template_lists`]: Template parameter and argument lists
//! - [`stmt`]: Statements and compound bodies
//! - [`expr`]: Expressions and literals
//! - [`types`]: Type rendering

mod decl;
mod expr;
mod function;
mod record;
mod stmt;
mod template_lists;
mod types;

use cpp2d_ir::{
    Decl, DeclId, DeclKind, QualType, RecordTemplate, SourceLoc, StmtId, TemplateArgId,
    TranslationUnit, TypeId,
};
use rustc_hash::FxHashSet;

use crate::comments;
use crate::config::PrinterConfig;
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::error::TranslateError;
use crate::names::{anonymous_name, mangle_name, remap_type, ImportSet, IncludeSet};
use crate::operators::ClassInfoMap;
use crate::output::OutputStack;
use crate::overrides::OverrideTable;
use crate::templates::{RenameTable, TemplateScopes};
use crate::Translation;

/// Context flags that change how nested nodes render.
#[derive(Copy, Clone, Debug)]
struct RenderFlags {
    /// A reference type may be written as `ref T`.
    ref_accepted: bool,
    /// Rendering a function parameter list.
    in_func_args: bool,
    /// Rendering the loop variable of a range-based `for`.
    in_for_range_init: bool,
    /// Multi-declarations become separate statements.
    split_multi_decl: bool,
    /// Variable declarations include their type.
    print_type: bool,
    /// Parameter defaults are written (or commented out when false).
    print_default_value: bool,
}

impl Default for RenderFlags {
    fn default() -> Self {
        RenderFlags {
            ref_accepted: false,
            in_func_args: false,
            in_for_range_init: false,
            split_multi_decl: true,
            print_type: true,
            print_default_value: true,
        }
    }
}

/// Renders one translation unit as D source.
pub struct Printer<'a> {
    unit: &'a TranslationUnit,
    includes: &'a IncludeSet,
    overrides: &'a dyn OverrideTable,
    config: PrinterConfig,
    out: OutputStack,
    imports: ImportSet,
    class_info: ClassInfoMap,
    diagnostics: Diagnostics,
    renames: RenameTable,
    template_scopes: TemplateScopes,
    flags: RenderFlags,
    /// The function being rendered must be kept even if implicit.
    this_function_useful: bool,
    /// Callees whose function-to-pointer decay must not print `&`.
    dont_take_ptr: FxHashSet<StmtId>,
    macro_depth: u32,
    fatal: Option<TranslateError>,
}

impl<'a> Printer<'a> {
    pub fn new(
        unit: &'a TranslationUnit,
        includes: &'a IncludeSet,
        overrides: &'a dyn OverrideTable,
        config: PrinterConfig,
    ) -> Self {
        Printer {
            unit,
            includes,
            overrides,
            config,
            out: OutputStack::new(config.indent_width),
            imports: ImportSet::new(),
            class_info: ClassInfoMap::new(),
            diagnostics: Diagnostics::new(),
            renames: RenameTable::new(),
            template_scopes: TemplateScopes::new(),
            flags: RenderFlags::default(),
            this_function_useful: false,
            dont_take_ptr: FxHashSet::default(),
            macro_depth: 0,
            fatal: None,
        }
    }

    pub fn unit(&self) -> &'a TranslationUnit {
        self.unit
    }

    pub fn config(&self) -> PrinterConfig {
        self.config
    }

    pub fn write(&mut self, s: &str) {
        self.out.write(s);
    }

    pub fn newline(&mut self) {
        self.out.newline();
    }

    pub fn indent(&mut self) {
        self.out.indent();
    }

    pub fn dedent(&mut self) {
        self.out.dedent();
    }

    pub fn write_indent(&mut self) {
        self.out.write_indent();
    }

    pub fn indent_str(&self) -> String {
        self.out.indent_str()
    }

    /// Record that the output needs `symbol` from `module`.
    pub fn add_import(&mut self, module: &str, symbol: &str) {
        self.imports.add(module, symbol);
    }

    pub fn report(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        self.diagnostics.report(code, message);
    }

    /// Run `f` against a fresh capture buffer and return what it wrote.
    pub fn capture(&mut self, f: impl FnOnce(&mut Self)) -> String {
        self.out.push();
        f(self);
        self.out.pop()
    }

    pub fn print_decl(&mut self, id: DeclId) {
        if self.fatal.is_some() {
            return;
        }
        let overrides = self.overrides;
        if let Some(render) = overrides.decl(id) {
            render(self, id);
            return;
        }
        cpp2d_stack::ensure_sufficient_stack(|| self.render_decl(id));
    }

    pub fn print_stmt(&mut self, id: StmtId) {
        if self.fatal.is_some() {
            return;
        }
        let overrides = self.overrides;
        if let Some(render) = overrides.stmt(id) {
            render(self, id);
            return;
        }
        cpp2d_stack::ensure_sufficient_stack(|| self.render_stmt(id));
    }

    /// Render a type with its `const` qualifier.
    pub fn print_type(&mut self, qt: QualType) {
        if self.fatal.is_some() {
            return;
        }
        self.render_qual_type(qt);
    }

    /// Render a type node, ignoring qualifiers.
    pub fn print_type_node(&mut self, id: TypeId) {
        if self.fatal.is_some() {
            return;
        }
        let overrides = self.overrides;
        if let Some(render) = overrides.ty(id) {
            render(self, id);
            return;
        }
        cpp2d_stack::ensure_sufficient_stack(|| self.render_type(id));
    }

    pub fn print_template_arg(&mut self, id: TemplateArgId) {
        if self.fatal.is_some() {
            return;
        }
        let overrides = self.overrides;
        if let Some(render) = overrides.template_arg(id) {
            render(self, id);
            return;
        }
        self.render_template_arg(id);
    }

    /// Consume the printer, yielding the module body or the first fatal error.
    pub fn finish(self) -> Result<Translation, TranslateError> {
        if let Some(error) = self.fatal {
            return Err(error);
        }
        Ok(Translation {
            code: self.out.into_output(),
            imports: self.imports,
            diagnostics: self.diagnostics.into_vec(),
        })
    }

    /// Record a fatal error; the first one wins and stops all rendering.
    fn fail(&mut self, error: TranslateError) {
        tracing::error!(%error, "translation aborted");
        if self.fatal.is_none() {
            self.fatal = Some(error);
        }
    }

    /// Output is suppressed while inside a macro marker pair.
    fn sync_output(&mut self) {
        self.out.set_enabled(self.macro_depth == 0);
    }

    fn render_decl(&mut self, id: DeclId) {
        let unit = self.unit;
        let decl = unit.decl(id);
        match &decl.kind {
            DeclKind::TranslationUnit { decls } => self.print_unit_decls(decls),
            DeclKind::Namespace { decls } => self.print_namespace(decl, decls),
            DeclKind::Record(record) => match &record.template {
                RecordTemplate::Specialization { .. } => self.print_specialization(id),
                RecordTemplate::None | RecordTemplate::Pattern => {
                    self.print_record(id, record::RecordHeader::Plain);
                }
            },
            DeclKind::ClassTemplate { params, pattern } => {
                self.print_record(*pattern, record::RecordHeader::Params(params));
            }
            DeclKind::Function(_) => self.print_function(id, None),
            DeclKind::FunctionTemplate { pattern } => self.print_function(*pattern, None),
            _ => self.render_simple_decl(id, decl),
        }
    }

    /// Top-level declarations: only those written in the main file.
    fn print_unit_decls(&mut self, decls: &[DeclId]) {
        let unit = self.unit;
        for &child in decls {
            if !unit.is_in_main_file(child) {
                continue;
            }
            self.print_framed_decl(child);
        }
    }

    /// Namespaces flatten into the module, bracketed by marker comments.
    fn print_namespace(&mut self, decl: &Decl, decls: &[DeclId]) {
        let name = mangle_name(&decl.name);
        self.write("// -> module ");
        self.write(&name);
        self.write(";\n");
        for &child in decls {
            self.print_framed_decl(child);
        }
        self.write("// <- module ");
        self.write(&name);
        self.write(" end\n");
    }

    /// A top-level declaration with its comments, `;` and blank line.
    fn print_framed_decl(&mut self, id: DeclId) {
        let text = self.capture(|p| p.print_decl(id));
        if !text.is_empty() {
            self.print_comment_before(id);
            self.write(&text);
            if self.needs_semicolon(id) {
                self.write(";");
            }
            self.print_comment_after(id);
            self.write("\n\n");
        }
        self.sync_output();
    }

    fn print_comment_before(&mut self, id: DeclId) {
        let unit = self.unit;
        let leading = unit
            .decl(id)
            .comment
            .as_ref()
            .filter(|c| !c.trailing)
            .map(|c| c.text.as_str());
        let indent = self.indent_str();
        self.write(&comments::before_decl(leading, &indent));
    }

    fn print_comment_after(&mut self, id: DeclId) {
        let unit = self.unit;
        if let Some(comment) = unit.decl(id).comment.as_ref().filter(|c| c.trailing) {
            self.write(&comments::after_decl(&comment.text));
        }
    }

    /// Source text between two sibling nodes, reduced to its comments.
    ///
    /// `start` advances to `next` either way.
    fn print_stmt_comment(&mut self, start: &mut SourceLoc, end: SourceLoc, next: SourceLoc) {
        let unit = self.unit;
        match unit.text_between(*start, end) {
            Some(text) => {
                let indent = self.indent_str();
                self.write(&comments::between_nodes(text, &indent));
            }
            None => self.newline(),
        }
        *start = next;
    }

    /// Declarations that take a trailing `;` when printed as a statement or member.
    fn needs_semicolon(&self, id: DeclId) -> bool {
        match &self.unit.decl(id).kind {
            DeclKind::Record(record) => match record.template {
                RecordTemplate::Specialization { .. } => true,
                RecordTemplate::None | RecordTemplate::Pattern => !record.complete,
            },
            DeclKind::Function(_)
            | DeclKind::FunctionTemplate { .. }
            | DeclKind::Namespace { .. }
            | DeclKind::NamespaceAlias
            | DeclKind::UsingDirective
            | DeclKind::Empty
            | DeclKind::Friend(_)
            | DeclKind::Enum(_) => false,
            _ => true,
        }
    }

    /// Target name of a type declaration, registering the import it needs.
    fn mangle_type(&mut self, id: DeclId) -> String {
        let unit = self.unit;
        let canonical = unit.decl(unit.canonical_decl(id));
        let qualified = canonical.qualified();
        if let Some(remapped) = remap_type(qualified) {
            if let Some(module) = remapped.module {
                self.imports.add(module, qualified);
            }
            return remapped.symbol.to_owned();
        }
        if let Some(file) = canonical.file.as_deref() {
            self.include_file(file, qualified);
        }
        mangle_name(&unit.decl(id).name)
    }

    /// Target name of a variable or function, registering the import it needs.
    fn mangle_var(&mut self, id: DeclId) -> String {
        let unit = self.unit;
        let decl = unit.decl(id);
        let name = if decl.name.is_empty() {
            anonymous_name(id.raw())
        } else {
            decl.name.clone()
        };
        if let Some(file) = decl.file.as_deref() {
            self.include_file(file, &name);
        }
        mangle_name(&name)
    }

    /// Import the module of the include `file` belongs to, if any.
    fn include_file(&mut self, file: &str, symbol: &str) {
        if self.macro_depth > 0 {
            return;
        }
        if let Some(module) = self.includes.module_for(file) {
            self.imports.add(module, symbol);
        }
    }

    fn decl_name(&self, id: DeclId) -> String {
        let decl = self.unit.decl(id);
        if decl.name.is_empty() {
            anonymous_name(id.raw())
        } else {
            decl.name.clone()
        }
    }
}
