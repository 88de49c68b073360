//! Statements.
//!
//! Compound bodies carry the comments written between their children, read
//! back from the source text between sibling ranges.

use cpp2d_ir::{DeclId, DeclKind, SourceLoc, StmtId, StmtKind};

use super::Printer;
use crate::error::TranslateError;
use crate::output::Separator;

impl Printer<'_> {
    pub(super) fn render_stmt(&mut self, id: StmtId) {
        let unit = self.unit;
        let stmt = unit.stmt(id);
        match &stmt.kind {
            StmtKind::Compound { .. } => self.print_compound_with(id, |_| {}),
            StmtKind::Try { block, handlers } => self.print_try_with(*block, handlers, |_| {}),
            StmtKind::Catch { decl, body } => {
                self.write("catch");
                if let Some(decl) = decl {
                    self.write("(");
                    self.print_decl(*decl);
                    self.write(")");
                }
                self.newline();
                self.write_indent();
                self.print_stmt(*body);
            }
            StmtKind::If {
                cond,
                then,
                otherwise,
            } => {
                self.write("if(");
                self.print_stmt(*cond);
                self.write(")\n");
                self.print_compound_or_not(*then);
                if let Some(otherwise) = otherwise {
                    self.newline();
                    self.write_indent();
                    self.write("else ");
                    if matches!(unit.stmt(*otherwise).kind, StmtKind::If { .. }) {
                        self.print_stmt(*otherwise);
                    } else {
                        self.newline();
                        self.print_compound_or_not(*otherwise);
                    }
                }
            }
            StmtKind::For {
                init,
                cond,
                inc,
                body,
            } => {
                self.write("for(");
                self.flags.split_multi_decl = false;
                if let Some(init) = init {
                    self.print_stmt(*init);
                }
                self.flags.split_multi_decl = true;
                self.write("; ");
                if let Some(cond) = cond {
                    self.print_stmt(*cond);
                }
                self.write("; ");
                if let Some(inc) = inc {
                    self.print_stmt(*inc);
                }
                self.write(")\n");
                self.print_compound_or_not(*body);
            }
            StmtKind::RangeFor { var, range, body } => {
                self.write("foreach(");
                self.flags.ref_accepted = true;
                self.flags.in_for_range_init = true;
                self.print_decl(*var);
                self.flags.in_for_range_init = false;
                self.flags.ref_accepted = false;
                self.write("; ");
                self.print_stmt(*range);
                if self.iterates_map(*range) {
                    self.write(".byKeyValue");
                }
                self.write(")\n");
                self.print_compound_or_not(*body);
            }
            StmtKind::While { cond, body } => {
                self.write("while(");
                self.print_stmt(*cond);
                self.write(")\n");
                self.print_compound_or_not(*body);
            }
            StmtKind::Do { body, cond } => {
                self.write("do\n");
                self.print_compound_or_not(*body);
                self.write("while(");
                self.print_stmt(*cond);
                self.write(")");
            }
            StmtKind::Switch { cond, body } => {
                self.write("switch(");
                self.print_stmt(*cond);
                self.write(")\n");
                self.write_indent();
                self.print_stmt(*body);
            }
            StmtKind::Case { value, body } => {
                self.write("case ");
                self.print_stmt(*value);
                self.write(":\n");
                self.print_labeled(*body);
            }
            StmtKind::Default { body } => {
                self.write("default:\n");
                self.print_labeled(*body);
            }
            StmtKind::Break => self.write("break"),
            StmtKind::Continue => self.write("continue"),
            StmtKind::Return(value) => {
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.print_stmt(*value);
                }
            }
            StmtKind::Null => {}
            StmtKind::DeclStmt(decls) => self.print_decl_stmt(decls),
            _ => self.render_expr(id, stmt),
        }
    }

    /// `{ ... }` with the comments between children; `init` writes extra
    /// statements right after the opening brace.
    pub(super) fn print_compound_with(&mut self, id: StmtId, init: impl FnOnce(&mut Self)) {
        let unit = self.unit;
        let StmtKind::Compound {
            body,
            lbrace,
            rbrace,
        } = &unit.stmt(id).kind
        else {
            self.fail(TranslateError::UnexpectedStmt {
                context: "block",
                expected: "compound statement",
                found: unit.stmt(id).kind.kind_name(),
            });
            return;
        };
        let mut start = match lbrace {
            SourceLoc::File(offset) => SourceLoc::File(offset + 1),
            other => *other,
        };
        self.write("{");
        self.indent();
        init(self);
        for &child in body {
            let range = unit.stmt(child).range;
            self.print_stmt_comment(&mut start, range.begin, range.end);
            self.write_indent();
            self.print_stmt(child);
            if self.stmt_needs_semicolon(child) {
                self.write(";");
            }
            self.sync_output();
        }
        self.print_stmt_comment(&mut start, *rbrace, SourceLoc::Invalid);
        self.dedent();
        self.write_indent();
        self.write("}");
    }

    pub(super) fn print_try_with(
        &mut self,
        block: StmtId,
        handlers: &[StmtId],
        init: impl FnOnce(&mut Self),
    ) {
        self.write("try\n");
        self.write_indent();
        self.print_compound_with(block, init);
        for &handler in handlers {
            self.newline();
            self.write_indent();
            self.print_stmt(handler);
        }
    }

    /// Loop and branch bodies: a block as is, anything else indented on
    /// its own line.
    fn print_compound_or_not(&mut self, id: StmtId) {
        let kind = &self.unit.stmt(id).kind;
        if matches!(kind, StmtKind::Compound { .. }) {
            self.write_indent();
            self.print_stmt(id);
            return;
        }
        let is_null = matches!(kind, StmtKind::Null);
        self.indent();
        self.write_indent();
        if is_null {
            self.write("{}");
        }
        self.print_stmt(id);
        if self.stmt_needs_semicolon(id) {
            self.write(";");
        }
        self.dedent();
    }

    fn print_labeled(&mut self, body: StmtId) {
        self.indent();
        self.write_indent();
        self.print_stmt(body);
        self.dedent();
    }

    fn print_decl_stmt(&mut self, decls: &[DeclId]) {
        let unit = self.unit;
        if let [single] = decls {
            self.print_decl(*single);
            return;
        }
        if self.flags.split_multi_decl {
            for (index, &decl) in decls.iter().enumerate() {
                self.print_decl(decl);
                if index + 1 != decls.len() {
                    self.write(";\n");
                    self.write_indent();
                }
            }
            return;
        }
        let mut sep = Separator::new(", ");
        for &decl in decls {
            self.flags.print_type = sep.is_first();
            sep.next(&mut self.out);
            self.print_decl(decl);
            if matches!(unit.decl(decl).kind, DeclKind::Record(_)) {
                self.newline();
                self.write_indent();
                sep.reset();
            }
        }
        self.flags.print_type = true;
    }

    fn stmt_needs_semicolon(&self, id: StmtId) -> bool {
        !self.unit.stmt(id).kind.is_self_terminating()
    }

    /// The range of a `foreach` is an associative container.
    fn iterates_map(&self, range: StmtId) -> bool {
        let unit = self.unit;
        unit.stmt(range)
            .ty
            .and_then(|ty| unit.record_of(unit.non_reference(ty)))
            .is_some_and(|record| unit.decl(record).qualified().contains("std::unordered_map"))
    }
}
