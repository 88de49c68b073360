//! Template parameter lists, specialization bindings and argument lists.

use cpp2d_ir::{DeclId, DeclKind, TemplateArgId, TemplateArgKind};

use super::Printer;
use crate::error::TranslateError;
use crate::names::mangle_name;
use crate::output::Separator;

impl Printer<'_> {
    /// `(prev, T, U = int, size_t N = 4)`.
    pub(super) fn print_template_params(&mut self, params: &[DeclId], prev: &str) {
        let unit = self.unit;
        self.write("(");
        let mut sep = Separator::new(", ");
        if !prev.is_empty() {
            sep.next(&mut self.out);
            self.write(prev);
        }
        for &param in params {
            sep.next(&mut self.out);
            self.print_decl(param);
            match &unit.decl(param).kind {
                DeclKind::TemplateTypeParam {
                    default: Some(default),
                } => {
                    self.write(" = ");
                    self.print_type(*default);
                }
                DeclKind::NonTypeTemplateParam {
                    default: Some(default),
                    ..
                } => {
                    self.write(" = ");
                    self.print_stmt(*default);
                }
                DeclKind::TemplateTemplateParam {
                    default: Some(default),
                } => {
                    self.write(" = ");
                    self.print_template_arg(*default);
                }
                _ => {}
            }
        }
        self.write(")");
    }

    /// Specialization header binding each primary parameter to its argument:
    /// `(prev, T : int, U : V_, V_)`.
    ///
    /// Own parameters of a partial specialization (`extra`) follow the
    /// bindings; those that reuse a primary parameter's name get a `_`.
    pub(super) fn print_template_binding(
        &mut self,
        template: DeclId,
        primary: &[DeclId],
        args: &[TemplateArgId],
        extra: Option<&[DeclId]>,
        prev: Option<&str>,
    ) {
        let unit = self.unit;
        if primary.len() != args.len() {
            self.fail(TranslateError::TemplateArityMismatch {
                template: unit.decl(template).qualified().to_owned(),
                params: primary.len(),
                args: args.len(),
            });
            return;
        }
        self.write("(");
        let mut sep = Separator::new(", ");
        if let Some(prev) = prev.filter(|p| !p.is_empty()) {
            sep.next(&mut self.out);
            self.write(prev);
        }
        if let Some(extra) = extra {
            self.renames
                .register_collisions(primary, extra, |param| unit.decl(param).name.as_str());
        }
        for (&param, &arg) in primary.iter().zip(args) {
            sep.next(&mut self.out);
            self.print_decl(param);
            self.write(" : ");
            self.print_template_arg(arg);
        }
        for &param in extra.unwrap_or_default() {
            sep.next(&mut self.out);
            self.print_decl(param);
        }
        self.write(")");
    }

    /// Arguments of a template use: `!(int, 4)`.
    pub(super) fn print_template_arg_list(&mut self, args: &[TemplateArgId]) {
        self.write("!(");
        for (index, &arg) in args.iter().enumerate() {
            if index != 0 {
                self.write(", ");
            }
            self.print_template_arg(arg);
        }
        self.write(")");
    }

    pub(super) fn render_template_arg(&mut self, id: TemplateArgId) {
        let unit = self.unit;
        match unit.template_arg(id) {
            TemplateArgKind::Null => {}
            TemplateArgKind::Declaration(decl) => {
                self.write(&mangle_name(&unit.decl(*decl).name));
            }
            TemplateArgKind::Integral(value) => self.write(&value.to_string()),
            TemplateArgKind::NullPtr => self.write("null"),
            TemplateArgKind::Type(qt) => self.print_type(*qt),
            TemplateArgKind::Pack(items) => {
                for (index, &item) in items.iter().enumerate() {
                    if index != 0 {
                        self.write(", ");
                    }
                    self.print_template_arg(item);
                }
            }
            TemplateArgKind::Expression(expr) => self.print_stmt(*expr),
            TemplateArgKind::Template(decl) => {
                let name = self.mangle_type(*decl);
                self.write(&name);
            }
        }
    }
}
