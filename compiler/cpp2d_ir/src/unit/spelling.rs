//! Canonical C++ spelling of types.
//!
//! The spelling is what name-based recognition of library types matches
//! against: `class std::vector<int, class std::allocator<int> >`.

use std::fmt::Write;

use super::TranslationUnit;
use crate::decl::{DeclKind, RecordTemplate};
use crate::template::TemplateArgKind;
use crate::ty::{QualType, TypeKind};
use crate::TemplateArgId;

impl TranslationUnit {
    /// Spelling of the canonical, unqualified type.
    pub fn canonical_spelling(&self, qt: QualType) -> String {
        let mut out = String::new();
        self.write_spelling(self.canonical_type(qt).unqualified(), &mut out);
        out
    }

    fn write_spelling(&self, qt: QualType, out: &mut String) {
        let qt = self.canonical_type(qt);
        if qt.is_const {
            out.push_str("const ");
        }
        match self.type_kind(qt.ty) {
            TypeKind::Builtin(kind) => out.push_str(kind.cpp_spelling()),
            TypeKind::Pointer(pointee) => {
                self.write_spelling(*pointee, out);
                out.push_str(" *");
            }
            TypeKind::MemberPointer(pointee) => {
                self.write_spelling(*pointee, out);
                out.push_str(" ::*");
            }
            TypeKind::LValueRef(pointee) => {
                self.write_spelling(*pointee, out);
                out.push_str(" &");
            }
            TypeKind::RValueRef(pointee) => {
                self.write_spelling(*pointee, out);
                out.push_str(" &&");
            }
            TypeKind::Record(decl) => {
                let record = self.decl(*decl);
                if let DeclKind::Record(data) = &record.kind {
                    out.push_str(data.tag.keyword());
                    out.push(' ');
                    out.push_str(record.qualified());
                    if let RecordTemplate::Specialization { args, .. } = &data.template {
                        self.write_arg_list(args, out);
                    }
                } else {
                    out.push_str(record.qualified());
                }
            }
            TypeKind::Enum(decl) => {
                out.push_str("enum ");
                out.push_str(self.decl(*decl).qualified());
            }
            TypeKind::TemplateSpecialization { template, args, .. } => {
                out.push_str(self.decl(*template).qualified());
                self.write_arg_list(args, out);
            }
            TypeKind::TemplateTypeParam { decl, depth, index } => match decl {
                Some(decl) if !self.decl(*decl).name.is_empty() => {
                    out.push_str(&self.decl(*decl).name);
                }
                _ => {
                    let _ = write!(out, "type-parameter-{depth}-{index}");
                }
            },
            TypeKind::Auto { .. } => out.push_str("auto"),
            TypeKind::Decltype(_) => out.push_str("decltype(...)"),
            TypeKind::ConstantArray { element, size } => {
                self.write_spelling(*element, out);
                let _ = write!(out, " [{size}]");
            }
            TypeKind::IncompleteArray(element) => {
                self.write_spelling(*element, out);
                out.push_str(" []");
            }
            TypeKind::FunctionProto {
                result,
                params,
                variadic,
            } => {
                self.write_spelling(*result, out);
                out.push_str(" (");
                for (i, param) in params.iter().enumerate() {
                    if i != 0 {
                        out.push_str(", ");
                    }
                    self.write_spelling(*param, out);
                }
                if *variadic {
                    out.push_str(if params.is_empty() { "..." } else { ", ..." });
                }
                out.push(')');
            }
            TypeKind::DependentName { name, .. } => {
                out.push_str("typename ");
                out.push_str(name);
            }
            TypeKind::Unsupported(kind) => out.push_str(kind),
            // Sugar never survives canonicalization.
            TypeKind::Typedef(_)
            | TypeKind::Elaborated { .. }
            | TypeKind::SubstTemplateTypeParam { .. }
            | TypeKind::Paren(_)
            | TypeKind::Attributed(_)
            | TypeKind::Decayed(_)
            | TypeKind::InjectedClassName(_) => out.push_str(self.type_kind(qt.ty).kind_name()),
        }
    }

    fn write_arg_list(&self, args: &[TemplateArgId], out: &mut String) {
        out.push('<');
        for (i, arg) in args.iter().enumerate() {
            if i != 0 {
                out.push_str(", ");
            }
            self.write_arg(*arg, out);
        }
        if out.ends_with('>') {
            out.push(' ');
        }
        out.push('>');
    }

    fn write_arg(&self, arg: TemplateArgId, out: &mut String) {
        match self.template_arg(arg) {
            TemplateArgKind::Null | TemplateArgKind::Expression(_) => {}
            TemplateArgKind::Declaration(decl) | TemplateArgKind::Template(decl) => {
                out.push_str(self.decl(*decl).qualified());
            }
            TemplateArgKind::Integral(value) => {
                let _ = write!(out, "{value}");
            }
            TemplateArgKind::NullPtr => out.push_str("nullptr"),
            TemplateArgKind::Type(qt) => self.write_spelling(*qt, out),
            TemplateArgKind::Pack(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        out.push_str(", ");
                    }
                    self.write_arg(*item, out);
                }
            }
        }
    }
}
