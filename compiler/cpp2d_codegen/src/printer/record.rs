//! Records: classes, structs and unions.
//!
//! Besides the member list this handles the three things a record body
//! accumulates that have no direct C++ counterpart: packed bit-field runs,
//! visibility labels written only on change, and the `opCmp` / `opCast`
//! members synthesized from the comparison operators seen in the body.

use cpp2d_ir::{
    Access, DeclId, DeclKind, RecordDecl, RecordTemplate, TagKind, TemplateArgId, TypeKind,
};

use super::Printer;
use crate::aggregate::{close_mixin, BitfieldRun, VisibilityTracker};
use crate::diagnostics::DiagnosticCode;
use crate::error::TranslateError;
use crate::names::mangle_name;
use crate::operators::{write_bool_cast, write_op_cmp, Operand};
use crate::semantic::{classify, Semantic};

/// What follows the record name.
#[derive(Copy, Clone, Debug)]
pub(super) enum RecordHeader<'h> {
    Plain,
    /// `class Foo(T, U)` for a class template.
    Params(&'h [DeclId]),
    /// `class Foo(T : int, U_)` for an explicit or partial specialization.
    Binding {
        template: DeclId,
        primary: &'h [DeclId],
        args: &'h [TemplateArgId],
        extra: Option<&'h [DeclId]>,
    },
}

impl Printer<'_> {
    pub(super) fn print_record(&mut self, id: DeclId, header: RecordHeader<'_>) {
        let unit = self.unit;
        let decl = unit.decl(id);
        let DeclKind::Record(record) = &decl.kind else {
            self.fail(TranslateError::UnexpectedDecl {
                context: "class template",
                expected: "record pattern",
                found: decl.kind.kind_name(),
            });
            return;
        };
        if record.tag == TagKind::Class && record.has_implicit_copy_ctor {
            self.report(
                DiagnosticCode::T2002,
                format!(
                    "class {} is implicitly copy constructible, which a class cannot be",
                    decl.name
                ),
            );
        }
        if decl.implicit {
            return;
        }
        if !record.complete && record.has_definition {
            return;
        }
        tracing::trace!(record = decl.qualified(), "rendering record");

        self.write(record.tag.keyword());
        self.write(" ");
        self.write(&mangle_name(&decl.name));
        match header {
            RecordHeader::Plain => {}
            RecordHeader::Params(params) => self.print_template_params(params, ""),
            RecordHeader::Binding {
                template,
                primary,
                args,
                extra,
            } => self.print_template_binding(template, primary, args, extra, None),
        }
        if !record.complete {
            return;
        }

        self.print_bases(&decl.name, record);
        self.newline();
        self.write_indent();
        self.write("{");
        self.indent();
        self.print_members(record);

        let canonical = unit.canonical_decl(id);
        let overrides = self.overrides;
        for &operator in overrides.free_operators(canonical) {
            self.write_indent();
            self.print_function(operator, Some(0));
            self.newline();
        }
        for &operator in overrides.free_operators_right(canonical) {
            self.write_indent();
            self.print_function(operator, Some(1));
            self.newline();
        }
        self.print_synthesized(canonical);

        self.dedent();
        self.write_indent();
        self.write("}");
    }

    /// Explicit and partial specializations; instantiations are never printed.
    pub(super) fn print_specialization(&mut self, id: DeclId) {
        let unit = self.unit;
        let decl = unit.decl(id);
        let DeclKind::Record(RecordDecl {
            template:
                RecordTemplate::Specialization {
                    template,
                    args,
                    kind,
                    partial,
                },
            ..
        }) = &decl.kind
        else {
            return;
        };
        if kind.is_instantiation() {
            tracing::trace!(record = decl.qualified(), "skipping instantiation");
            return;
        }
        let Some(primary) = unit.template_params(*template) else {
            self.fail(TranslateError::UnexpectedDecl {
                context: "class template specialization",
                expected: "class template",
                found: unit.decl(*template).kind.kind_name(),
            });
            return;
        };
        self.template_scopes.push(partial.clone().unwrap_or_default());
        self.renames.push_scope();
        self.print_record(
            id,
            RecordHeader::Binding {
                template: *template,
                primary,
                args,
                extra: partial.as_deref(),
            },
        );
        self.renames.pop_scope();
        self.template_scopes.pop();
    }

    fn print_bases(&mut self, name: &str, record: &RecordDecl) {
        if record.bases.is_empty() {
            return;
        }
        self.write(" : ");
        for (index, base) in record.bases.iter().enumerate() {
            if index != 0 {
                self.write(", ");
            }
            match base.access {
                Access::Public | Access::None => {}
                access @ (Access::Protected | Access::Private) => {
                    self.report(
                        DiagnosticCode::T2001,
                        format!(
                            "{name} has a {} base, only public inheritance is translated",
                            access.keyword()
                        ),
                    );
                    self.write("/*");
                    self.write(access.keyword());
                    self.write("*/ ");
                }
            }
            self.print_type(base.ty);
        }
    }

    fn print_members(&mut self, record: &RecordDecl) {
        let unit = self.unit;
        let mut run = BitfieldRun::new();
        let mut visibility = VisibilityTracker::new(record.tag);
        let mut in_bitfield = false;
        for &member in &record.members {
            let member_decl = unit.decl(member);
            let width = match &member_decl.kind {
                DeclKind::Field(field) => field.bit_width.map(|w| w.value),
                _ => None,
            };
            let is_bitfield = width.is_some();

            let text = self.capture(|p| p.print_decl(member));
            let label = if text.is_empty() || self.macro_depth != 0 {
                None
            } else {
                visibility.transition(member_decl.access)
            };

            // A label cannot sit inside the mixin, so the run ends first.
            if !is_bitfield || label.is_some() {
                if let Some(pad) = run.close() {
                    self.newline();
                    self.write_indent();
                    self.write(&close_mixin(pad));
                    in_bitfield = false;
                }
            }
            if let Some(width) = width {
                run.add(width);
            }

            if !text.is_empty() {
                if let Some(access) = label {
                    self.dedent();
                    self.newline();
                    self.write_indent();
                    self.write(access.keyword());
                    self.write(":");
                    self.indent();
                }
                self.print_comment_before(member);
                if !in_bitfield && is_bitfield && self.macro_depth == 0 {
                    self.write("mixin(bitfields!(\n");
                    self.write_indent();
                }
                self.write(&text);
                if !is_bitfield && self.needs_semicolon(member) {
                    self.write(";");
                }
                self.print_comment_after(member);
            }
            in_bitfield = is_bitfield;
            self.sync_output();
        }
        if in_bitfield {
            if let Some(pad) = run.close() {
                self.newline();
                self.write_indent();
                self.write(&close_mixin(pad));
            }
        }
        self.newline();
    }

    /// `opCmp` for every operand compared with both `<` and `==`, and
    /// `opCast!bool` for a `!` without a bool conversion.
    fn print_synthesized(&mut self, record: DeclId) {
        let Some(info) = self.class_info.take(record) else {
            return;
        };
        let port_const = self.config.port_const;
        for other in info.comparisons() {
            let other = self.capture(|p| p.print_operand_type(other));
            write_op_cmp(&mut self.out, &other, port_const);
        }
        if info.needs_bool_cast() {
            write_bool_cast(&mut self.out, port_const);
        }
    }

    fn print_operand_type(&mut self, operand: Operand) {
        let unit = self.unit;
        match operand {
            Operand::Type(qt) => self.print_type(unit.pointee(qt).unwrap_or(qt)),
            Operand::This(record) => match unit.record_type(record) {
                Some(ty) => self.print_type_node(ty),
                None => {
                    let name = self.mangle_type(record);
                    self.write(&name);
                }
            },
        }
    }

    /// Value or reference semantic of a record, falling back to its tag
    /// when the record's type was never interned.
    pub(super) fn record_semantic(&self, record: DeclId) -> Semantic {
        let unit = self.unit;
        if let Some(ty) = unit.record_type(record) {
            return classify(unit, ty.into());
        }
        match unit.record(record).map(|r| r.tag) {
            Some(TagKind::Class) => Semantic::Reference,
            _ => Semantic::Value,
        }
    }

    /// Record an operand type refers to, seeing through one reference.
    pub(super) fn operand_record(&self, qt: cpp2d_ir::QualType) -> Option<DeclId> {
        let unit = self.unit;
        let record = match unit.canonical_kind(qt) {
            TypeKind::LValueRef(pointee) => unit.record_of(*pointee),
            _ => unit.record_of(qt),
        };
        record.map(|r| unit.canonical_decl(r))
    }
}
