//! Declarations other than records and functions.

use cpp2d_ir::{
    Decl, DeclId, DeclKind, EnumDecl, FieldDecl, FriendTarget, Linkage, MacroArg, MacroMarker,
    ParamDecl, StmtKind, Storage, VarDecl,
};

use super::Printer;
use crate::diagnostics::DiagnosticCode;
use crate::names::mangle_name;
use crate::semantic::{classify, Semantic};

impl Printer<'_> {
    pub(super) fn render_simple_decl(&mut self, id: DeclId, decl: &Decl) {
        match &decl.kind {
            DeclKind::Typedef { underlying } | DeclKind::TypeAlias { underlying } => {
                self.write("alias ");
                self.write(&mangle_name(&decl.name));
                self.write(" = ");
                self.print_type(*underlying);
            }
            DeclKind::AliasTemplate { params, underlying } => {
                self.write("alias ");
                self.write(&mangle_name(&decl.name));
                self.print_template_params(params, "");
                self.write(" = ");
                self.print_type(*underlying);
            }
            DeclKind::Field(field) => self.print_field(decl, field),
            DeclKind::Var(var) => self.print_var(id, var),
            DeclKind::Param(param) => self.print_param(id, param),
            DeclKind::Enum(data) => self.print_enum(decl, data),
            DeclKind::Enumerator { init, .. } => {
                self.write(&mangle_name(&decl.name));
                if let Some(init) = init {
                    self.write(" = ");
                    self.print_stmt(*init);
                }
            }
            DeclKind::TemplateTypeParam { .. } => {
                let name = match self.renames.lookup(id) {
                    Some(renamed) => renamed.to_owned(),
                    None => decl.name.clone(),
                };
                self.write(&name);
            }
            DeclKind::NonTypeTemplateParam { ty, .. } => {
                self.print_type(*ty);
                self.write(" ");
                let name = match self.renames.lookup(id) {
                    Some(renamed) => renamed.to_owned(),
                    None => mangle_name(&decl.name),
                };
                self.write(&name);
            }
            DeclKind::TemplateTemplateParam { .. } => {
                self.write("alias ");
                self.write(&decl.name);
            }
            DeclKind::Using => {
                self.write("//using ");
                self.write(&decl.name);
            }
            DeclKind::NamespaceAlias
            | DeclKind::UsingDirective
            | DeclKind::Empty
            | DeclKind::AccessSpec => {}
            DeclKind::LinkageSpec {
                language,
                braces,
                decls,
            } => self.print_linkage(*language, *braces, decls),
            DeclKind::Friend(target) => {
                self.write("//friend ");
                match target {
                    FriendTarget::Type(qt) => self.print_type_node(qt.ty),
                    FriendTarget::Decl(friend) => self.print_decl(*friend),
                }
            }
            DeclKind::StaticAssert { cond, message } => {
                self.write("static assert(");
                self.print_stmt(*cond);
                if let Some(message) = message {
                    self.write(", ");
                    self.print_stmt(*message);
                }
                self.write(")");
            }
            DeclKind::MacroMarker(marker) => self.print_macro_marker(marker),
            DeclKind::Unsupported { kind } => {
                self.write("/*");
                self.write(kind);
                self.write(" Decl*/");
                self.report(
                    DiagnosticCode::T1001,
                    format!("no rendering for `{kind}` declaration"),
                );
            }
            // Routed through `render_decl`.
            DeclKind::TranslationUnit { .. }
            | DeclKind::Namespace { .. }
            | DeclKind::Record(_)
            | DeclKind::ClassTemplate { .. }
            | DeclKind::Function(_)
            | DeclKind::FunctionTemplate { .. } => {}
        }
    }

    fn print_field(&mut self, decl: &Decl, field: &FieldDecl) {
        if field.mutable {
            self.write("/*mutable*/");
        }
        if let Some(width) = field.bit_width {
            self.write("\t");
            self.print_type(field.ty);
            self.write(", \"");
            self.write(&mangle_name(&decl.name));
            self.write("\", ");
            self.print_stmt(width.expr);
            self.write(",");
            self.add_import("std.bitmanip", "bitfields");
            return;
        }
        self.print_type(field.ty);
        self.write(" ");
        self.write(&mangle_name(&decl.name));
        if let Some(init) = field.init {
            self.write(" = ");
            self.print_stmt(init);
        } else if classify(self.unit, field.ty) == Semantic::Reference {
            self.write(" = new ");
            self.print_type(field.ty);
        }
    }

    /// Variables. An in-class static member with an out-of-line definition
    /// is printed from the definition, which is itself skipped.
    fn print_var(&mut self, id: DeclId, var: &VarDecl) {
        if var.out_of_line {
            return;
        }
        let unit = self.unit;
        let (id, var) = match var.definition {
            Some(definition) => match &unit.decl(definition).kind {
                DeclKind::Var(data) => (definition, data),
                _ => (id, var),
            },
            None => (id, var),
        };
        if self.flags.print_type {
            if matches!(var.storage, Storage::StaticMember | Storage::StaticLocal) {
                self.write("static ");
            }
            if !var.out_of_line {
                if let Some(qualifier) = &var.qualifier {
                    self.print_qualifier(qualifier);
                }
            }
            self.print_type(var.ty);
            self.write(" ");
        }
        self.write(&mangle_name(&unit.decl(id).name));

        let Some(init) = var.init else {
            return;
        };
        if self.flags.in_for_range_init {
            return;
        }
        match &unit.stmt(init.expr).kind {
            StmtKind::Construct { args, .. } if init.direct => {
                if classify(unit, var.ty) == Semantic::Reference {
                    self.write(" = new ");
                    self.print_construct_params(init.expr);
                } else if !args.is_empty() {
                    self.write(" = ");
                    self.print_construct_params(init.expr);
                }
            }
            _ => {
                self.write(" = ");
                self.print_stmt(init.expr);
            }
        }
    }

    fn print_param(&mut self, id: DeclId, param: &ParamDecl) {
        self.print_type(param.ty);
        self.write(" ");
        let name = self.decl_name(id);
        self.write(&mangle_name(&name));
        if let Some(default) = param.default {
            if self.flags.print_default_value {
                self.write(" = ");
                self.print_stmt(default);
            } else {
                self.write("/* = ");
                self.print_stmt(default);
                self.write("*/");
            }
        }
    }

    fn print_enum(&mut self, decl: &Decl, data: &EnumDecl) {
        self.write("enum ");
        self.write(&mangle_name(&decl.name));
        if let Some(fixed) = data.fixed {
            self.write(" : ");
            self.print_type_node(fixed.ty);
        }
        self.newline();
        self.write_indent();
        self.write("{\n");
        self.indent();
        for &enumerator in &data.enumerators {
            self.write_indent();
            self.print_decl(enumerator);
            self.write(",\n");
        }
        if data.enumerators.is_empty() {
            self.write_indent();
            self.write("Default\n");
        }
        self.dedent();
        self.write_indent();
        self.write("}");
    }

    fn print_linkage(&mut self, language: Linkage, braces: bool, decls: &[DeclId]) {
        self.write(match language {
            Linkage::C => "extern (C) ",
            Linkage::Cxx => "extern (C++) ",
        });
        if !braces {
            if let Some(&first) = decls.first() {
                self.print_decl(first);
            }
            return;
        }
        self.newline();
        self.write_indent();
        self.write("{\n");
        self.indent();
        for &child in decls {
            self.write_indent();
            self.print_decl(child);
            if self.needs_semicolon(child) {
                self.write(";");
            }
            self.newline();
        }
        self.dedent();
        self.write_indent();
        self.write("}");
    }

    /// A macro begin marker prints the mixin call and mutes everything up
    /// to the matching end marker.
    fn print_macro_marker(&mut self, marker: &MacroMarker) {
        match marker {
            MacroMarker::Begin { name, args } => {
                self.write("mixin(");
                self.write(name);
                self.write("!(");
                self.print_macro_args(args);
                self.write("))");
                self.macro_depth += 1;
            }
            MacroMarker::End => {
                self.macro_depth = self.macro_depth.saturating_sub(1);
            }
        }
    }

    /// Macro arguments become token strings: `q{a}, q{b}`.
    pub(super) fn print_macro_args(&mut self, args: &[MacroArg]) {
        for (index, arg) in args.iter().enumerate() {
            if index != 0 {
                self.write(", ");
            }
            self.write("q{");
            match arg {
                MacroArg::Expr(expr) => self.print_stmt(*expr),
                MacroArg::Type(arg) => self.print_template_arg(*arg),
                MacroArg::Name(name) => self.write(name),
            }
            self.write("}");
        }
    }
}
