//! Functions, methods, constructors, destructors and conversions.
//!
//! All kinds share one skeleton: a kind-specific "begin" that writes the
//! attributes, return type and name (or decides the function is not
//! printed at all), the template part, the parameter list and the body.
//! The whole function is rendered into a capture buffer so an implicit
//! special member can be dropped unless its body turned out to need it.

use cpp2d_ir::{
    CtorInit, CtorInitTarget, Decl, DeclId, DeclKind, FunctionDecl, FunctionFlags, FunctionKind,
    FunctionTemplateKind, OverloadedOperator, SourceLoc, StmtKind, TagKind, TypeKind,
};

use super::Printer;
use crate::diagnostics::DiagnosticCode;
use crate::error::TranslateError;
use crate::names::mangle_name;
use crate::operators::{operator_method, Operand, OperatorSide};
use crate::semantic::{classify, Semantic};

/// Name of the placeholder the pre-expander declares for variadic macros.
const DUMMY_VARIADIC: &str = "cpp2d_dummy_variadic";

/// Statements injected at the top of a function body.
struct Prologue<'p> {
    /// `alias <param> = this;` for the parameter standing in for `this`.
    alias_this: Option<Option<DeclId>>,
    ctor_inits: &'p [CtorInit],
}

impl Printer<'_> {
    /// Render a function declaration.
    ///
    /// `this_param` is set when a free operator is re-emitted as a method of
    /// one of its operands: the parameter at that index becomes `this`.
    pub(super) fn print_function(&mut self, id: DeclId, this_param: Option<usize>) {
        let unit = self.unit;
        let decl = unit.decl(id);
        let DeclKind::Function(function) = &decl.kind else {
            self.fail(TranslateError::UnexpectedDecl {
                context: "function template",
                expected: "function",
                found: decl.kind.kind_name(),
            });
            return;
        };
        if function.has(FunctionFlags::DELETED) {
            return;
        }
        if decl.implicit && function.body.is_none() {
            return;
        }
        let is_specialization_definition =
            matches!(function.template, FunctionTemplateKind::Specialization { .. })
                && function.has(FunctionFlags::DEFINITION);
        if unit.canonical_decl(id) != id && !is_specialization_definition {
            return;
        }

        self.out.push();
        self.flags.ref_accepted = true;
        let Some(template_param) = self.print_function_begin(id, decl, function, this_param)
        else {
            self.flags.ref_accepted = false;
            self.out.pop();
            return;
        };

        match &function.template {
            FunctionTemplateKind::Template { params } => {
                self.print_template_params(params, template_param.as_deref().unwrap_or(""));
            }
            FunctionTemplateKind::Specialization {
                primary_params,
                args,
            } => self.print_template_binding(
                id,
                primary_params,
                args,
                None,
                template_param.as_deref(),
            ),
            FunctionTemplateKind::NonTemplate | FunctionTemplateKind::MemberSpecialization => {
                if let Some(template_param) = &template_param {
                    self.write("(");
                    self.write(template_param);
                    self.write(")");
                }
            }
        }

        let semantic = match function.parent {
            Some(parent) if function.is_member() && !function.has(FunctionFlags::STATIC) => {
                self.record_semantic(parent)
            }
            _ => Semantic::Reference,
        };
        let is_copy_ctor = matches!(function.kind, FunctionKind::Constructor { .. })
            && function.has(FunctionFlags::COPY_CONSTRUCTOR);
        let is_const_method = self.print_params(function, this_param, semantic, is_copy_ctor);
        if self.config.port_const
            && (is_const_method || (function.is_member() && function.has(FunctionFlags::CONST)))
        {
            self.write(" const");
        }
        self.flags.ref_accepted = false;
        self.flags.in_func_args = false;
        self.this_function_useful = false;

        if let Some(body) = function.body {
            self.newline();
            let alias = if is_copy_ctor && semantic == Semantic::Value {
                Some(0)
            } else {
                this_param
            };
            let prologue = Prologue {
                alias_this: alias.map(|index| function.params.get(index).copied()),
                ctor_inits: match &function.kind {
                    FunctionKind::Constructor { inits } => inits,
                    _ => &[],
                },
            };
            match &unit.stmt(body).kind {
                StmtKind::Try { block, handlers } => {
                    self.write_indent();
                    self.write("{\n");
                    self.indent();
                    self.write_indent();
                    self.print_try_with(*block, handlers, |p| p.print_prologue(&prologue));
                    self.newline();
                    self.dedent();
                    self.write_indent();
                    self.write("}");
                }
                StmtKind::Compound { .. } => {
                    self.write_indent();
                    self.print_compound_with(body, |p| p.print_prologue(&prologue));
                }
                other => self.fail(TranslateError::UnexpectedStmt {
                    context: "function body",
                    expected: "compound statement",
                    found: other.kind_name(),
                }),
            }
        } else {
            self.write(";");
        }

        let text = self.out.pop();
        if !decl.implicit || self.this_function_useful {
            self.write(&text);
        }
    }

    /// Everything before the template part. `None` skips the function;
    /// otherwise carries the template parameter the name implies (operators
    /// and conversions).
    fn print_function_begin(
        &mut self,
        id: DeclId,
        decl: &Decl,
        function: &FunctionDecl,
        this_param: Option<usize>,
    ) -> Option<Option<String>> {
        match &function.kind {
            FunctionKind::Free => self.print_free_begin(decl, function, this_param),
            FunctionKind::Method => {
                if !function.has(FunctionFlags::PURE) && function.body.is_none() {
                    return None;
                }
                if decl.implicit
                    || function.has(FunctionFlags::MOVE_ASSIGNMENT)
                    || function.operator == Some(OverloadedOperator::ExclaimEqual)
                {
                    return None;
                }
                self.print_method_attributes(decl, function);
                self.print_free_begin(decl, function, this_param)
            }
            FunctionKind::Conversion { target } => {
                self.print_method_attributes(decl, function);
                if let Some(parent) = function.parent {
                    if self.unit.canonical_spelling(*target) == "bool" {
                        let parent = self.unit.canonical_decl(parent);
                        self.class_info.entry(parent).has_bool_conv = true;
                    }
                }
                self.print_type(*target);
                self.write(" opCast");
                let target_text = self.capture(|p| p.print_type(*target));
                Some(Some(format!("T : {target_text}")))
            }
            FunctionKind::Constructor { .. } => {
                if function.has(FunctionFlags::MOVE_CONSTRUCTOR) || function.body.is_none() {
                    return None;
                }
                let tag = function
                    .parent
                    .and_then(|parent| self.unit.record(parent))
                    .map(|record| record.tag);
                if matches!(tag, Some(TagKind::Struct | TagKind::Union)) {
                    if function.has(FunctionFlags::DEFAULT_CONSTRUCTOR) && function.params.is_empty()
                    {
                        if function.has(FunctionFlags::EXPLICIT)
                            && !function.has(FunctionFlags::DEFAULTED)
                        {
                            let owner = self.owner_name(function);
                            self.report(
                                DiagnosticCode::T2005,
                                format!(
                                    "{owner} declares a default constructor, which a struct cannot have"
                                ),
                            );
                        }
                        return None;
                    }
                } else if decl.implicit && !function.has(FunctionFlags::DEFAULT_CONSTRUCTOR) {
                    return None;
                }
                tracing::trace!(function = ?id, "rendering constructor");
                self.write("this");
                Some(None)
            }
            FunctionKind::Destructor => {
                if decl.implicit || function.body.is_none() {
                    return None;
                }
                self.write("~this");
                Some(None)
            }
        }
    }

    fn print_method_attributes(&mut self, decl: &Decl, function: &FunctionDecl) {
        if function.has(FunctionFlags::STATIC) {
            self.write("static ");
        }
        let tag = function
            .parent
            .and_then(|parent| self.unit.record(parent))
            .map(|record| record.tag);
        if tag == Some(TagKind::Class) {
            if function.has(FunctionFlags::PURE) {
                self.write("abstract ");
            }
            if function.has(FunctionFlags::OVERRIDES) {
                self.write("override ");
            } else if !function.has(FunctionFlags::VIRTUAL) {
                self.write("final ");
            }
        } else {
            let owner = self.owner_name(function);
            if function.has(FunctionFlags::PURE) {
                self.report(
                    DiagnosticCode::T2003,
                    format!("{owner}::{} is abstract, which a struct method cannot be", decl.name),
                );
                self.write("abstract ");
            }
            if function.has(FunctionFlags::VIRTUAL) {
                self.report(
                    DiagnosticCode::T2004,
                    format!("{owner}::{} is virtual, which a struct method cannot be", decl.name),
                );
                self.write("virtual ");
            }
            if function.has(FunctionFlags::OVERRIDES) {
                self.write("override ");
            }
        }
    }

    /// Return type and name of a free function or method. Operators are
    /// renamed to their operator-overloading method and recorded for
    /// `opCmp` / `opCast` synthesis.
    fn print_free_begin(
        &mut self,
        decl: &Decl,
        function: &FunctionDecl,
        this_param: Option<usize>,
    ) -> Option<Option<String>> {
        if decl.implicit
            || function.operator == Some(OverloadedOperator::ExclaimEqual)
            || decl.name == DUMMY_VARIADIC
        {
            return None;
        }
        self.print_type(function.return_type);
        self.write(" ");
        let Some(op) = function.operator else {
            self.write(&mangle_name(&decl.name));
            return Some(None);
        };
        let (lhs, rhs) = self.operator_sides(function);
        let arity = function.params.len() + usize::from(this_param.is_none());
        let method = operator_method(op, arity, this_param == Some(1));
        self.class_info.record_operator(op, lhs, rhs);
        self.write(&method.name);
        Some(method.template_param)
    }

    /// The two operands of an operator declaration.
    fn operator_sides(&self, function: &FunctionDecl) -> (OperatorSide, OperatorSide) {
        let unit = self.unit;
        let side = |index: usize| {
            function
                .params
                .get(index)
                .and_then(|&param| match &unit.decl(param).kind {
                    DeclKind::Param(p) => Some(OperatorSide {
                        record: self.operand_record(p.ty),
                        operand: Some(Operand::Type(p.ty)),
                    }),
                    _ => None,
                })
                .unwrap_or_default()
        };
        if function.is_member() {
            let parent = function.parent.map(|parent| unit.canonical_decl(parent));
            let this = OperatorSide {
                record: parent,
                operand: parent.map(Operand::This),
            };
            (this, side(0))
        } else {
            (side(0), side(1))
        }
    }

    /// The parameter list, including the comments written between
    /// parameters. Returns whether the `this` stand-in parameter is const.
    fn print_params(
        &mut self,
        function: &FunctionDecl,
        this_param: Option<usize>,
        semantic: Semantic,
        is_copy_ctor: bool,
    ) -> bool {
        let unit = self.unit;
        self.write("(");
        self.flags.in_func_args = true;
        let mut is_const_method = false;
        if !function.params.is_empty() {
            let mut start = next_loc(function.lparen);
            self.indent();
            let variadic = function.has(FunctionFlags::VARIADIC);
            let count =
                (function.params.len() + usize::from(variadic)) - usize::from(this_param.is_some());
            let mut index = 0;
            for (position, &param) in function.params.iter().enumerate() {
                let param_decl = unit.decl(param);
                if Some(position) == this_param {
                    if let DeclKind::Param(p) = &param_decl.kind {
                        is_const_method = match unit.canonical_kind(p.ty) {
                            TypeKind::LValueRef(pointee) => unit.canonical_type(*pointee).is_const,
                            _ => unit.canonical_type(p.ty).is_const,
                        };
                    }
                    continue;
                }
                if count != 1 {
                    self.print_stmt_comment(
                        &mut start,
                        param_decl.range.begin,
                        param_decl.range.end,
                    );
                    self.write_indent();
                }
                if is_copy_ctor && semantic == Semantic::Value {
                    self.write("this");
                } else {
                    let is_ctor = matches!(function.kind, FunctionKind::Constructor { .. });
                    if index == 0 && semantic == Semantic::Value && is_ctor {
                        self.flags.print_default_value = false;
                    }
                    self.print_decl(param);
                    self.flags.print_default_value = true;
                }
                if index + 1 != count {
                    self.write(",");
                }
                index += 1;
            }
            if variadic {
                if count != 1 {
                    self.newline();
                    self.write_indent();
                }
                self.write("...");
            }
            let comment = self.capture(|p| {
                if function.rparen.is_valid() {
                    p.print_stmt_comment(&mut start, function.rparen, SourceLoc::Invalid);
                }
            });
            self.dedent();
            if comment.len() > 2 {
                self.write(&comment);
                self.write_indent();
            }
        }
        self.write(")");
        is_const_method
    }

    /// Body prologue: the `this` alias, then member initializers.
    fn print_prologue(&mut self, prologue: &Prologue<'_>) {
        if let Some(param) = prologue.alias_this {
            self.newline();
            if let Some(param) = param {
                let name = mangle_name(&self.decl_name(param));
                self.write_indent();
                self.write("alias ");
                self.write(&name);
                self.write(" = this;");
            }
        }
        for init in prologue.ctor_inits {
            let text = self.capture(|p| p.print_ctor_init(init));
            if text.is_empty() {
                continue;
            }
            self.newline();
            self.write_indent();
            self.write(&text);
            if !text.ends_with("= ") {
                self.write(";");
            }
        }
    }

    /// A member or base initializer from a constructor's init list.
    fn print_ctor_init(&mut self, init: &CtorInit) {
        let unit = self.unit;
        let expr = unit.stmt(init.init);
        match &init.target {
            CtorInitTarget::Member(field) => {
                if matches!(expr.kind, StmtKind::DefaultInit) {
                    return;
                }
                let field_decl = unit.decl(*field);
                let DeclKind::Field(data) = &field_decl.kind else {
                    return;
                };
                let semantic = classify(unit, data.ty);
                self.write(&mangle_name(&field_decl.name));
                self.write(" = ");
                if semantic == Semantic::Value {
                    let wrap = match &expr.kind {
                        StmtKind::ParenList(items) => items.len() > 1,
                        StmtKind::Construct { args, .. } => args.len() > 1,
                        _ => false,
                    };
                    if wrap {
                        self.print_type(data.ty);
                        self.write("(");
                    }
                    self.print_stmt(init.init);
                    if wrap {
                        self.write(")");
                    }
                    return;
                }
                self.this_function_useful = true;
                if let StmtKind::Construct { args, .. } = &expr.kind {
                    if let [arg] = args.as_slice() {
                        let arg_ty = unit.stmt(*arg).ty.map(|t| unit.canonical_type(t).unqualified());
                        if arg_ty == Some(unit.canonical_type(data.ty).unqualified()) {
                            self.print_stmt(init.init);
                            self.write(".dup()");
                            return;
                        }
                    } else if args.is_empty() && semantic == Semantic::AssocArray {
                        return;
                    }
                }
                self.write("new ");
                self.print_type(data.ty);
                self.write("(");
                self.print_stmt(init.init);
                self.write(")");
            }
            CtorInitTarget::Base(_) => {
                if init.written {
                    self.write("super(");
                    self.print_stmt(init.init);
                    self.write(")");
                }
            }
        }
    }

    fn owner_name(&self, function: &FunctionDecl) -> String {
        function
            .parent
            .map(|parent| self.unit.decl(parent).name.clone())
            .unwrap_or_default()
    }
}

/// The location just past `loc`.
fn next_loc(loc: SourceLoc) -> SourceLoc {
    match loc {
        SourceLoc::File(offset) => SourceLoc::File(offset.saturating_add(1)),
        SourceLoc::Macro(offset) => SourceLoc::Macro(offset.saturating_add(1)),
        SourceLoc::Invalid => SourceLoc::Invalid,
    }
}
