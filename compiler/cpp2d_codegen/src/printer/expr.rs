//! Expressions and literals.
//!
//! Most of the work is in the operators: pointers become slices, so
//! pointer arithmetic turns into slicing and `popFront`, and class values
//! are references, so assignment between them duplicates explicitly.

use cpp2d_ir::{
    BinaryOp, CastKind, DeclKind, FloatWidth, Lambda, MemberName, NestedName, NewInit,
    OverloadedOperator, QualType, Qualifier, Stmt, StmtId, StmtKind, TraitArg, TraitKind, TypeKind,
    UnaryOp,
};

use super::Printer;
use crate::diagnostics::DiagnosticCode;
use crate::error::TranslateError;
use crate::names::mangle_name;
use crate::semantic::{classify, Semantic};

impl Printer<'_> {
    pub(super) fn render_expr(&mut self, id: StmtId, stmt: &Stmt) {
        let unit = self.unit;
        match &stmt.kind {
            StmtKind::IntegerLiteral(value) => self.write(&value.to_string()),
            StmtKind::FloatLiteral { bits, width } => {
                self.write(&float_literal(f64::from_bits(*bits), *width));
            }
            StmtKind::CharLiteral(c) => self.write(&char_literal(*c)),
            StmtKind::StringLiteral { value } => self.write(&string_literal(value)),
            StmtKind::BoolLiteral(value) => self.write(if *value { "true" } else { "false" }),
            StmtKind::NullPtrLiteral => self.write("null"),

            StmtKind::DeclRef {
                decl,
                qualifier,
                template_args,
            } => self.print_decl_ref(*decl, qualifier.as_ref(), template_args),
            StmtKind::DependentScopeDeclRef {
                qualifier,
                name,
                template_args,
            } => {
                self.print_qualifier(qualifier);
                self.write(name);
                if !template_args.is_empty() {
                    self.print_template_arg_list(template_args);
                }
            }
            StmtKind::UnresolvedLookup {
                name,
                template_args,
            } => {
                self.write(&mangle_name(name));
                if let Some(args) = template_args {
                    self.print_template_arg_list(args);
                }
            }
            StmtKind::Member {
                base,
                name,
                template_args,
            } => {
                let is_this = match base {
                    None => true,
                    Some(base) => matches!(unit.stmt(*base).kind, StmtKind::This),
                };
                if let (false, Some(base)) = (is_this, base) {
                    self.print_stmt(*base);
                }
                match name {
                    MemberName::Conversion(target) => {
                        if !is_this {
                            self.write(".");
                        }
                        self.write("opCast!(");
                        self.print_type(*target);
                        self.write(")");
                    }
                    MemberName::Operator(op) => {
                        self.write(" ");
                        self.write(op.spelling());
                        self.write(" ");
                    }
                    MemberName::Identifier(name) => {
                        if !name.is_empty() && !is_this {
                            self.write(".");
                        }
                        self.write(&mangle_name(name));
                    }
                }
                if !template_args.is_empty() {
                    self.print_template_arg_list(template_args);
                }
            }

            StmtKind::Call { callee, args } => {
                self.dont_take_ptr.insert(*callee);
                self.print_stmt(*callee);
                self.dont_take_ptr.remove(callee);
                self.print_call_args(args);
            }
            StmtKind::MemberCall { callee, args } => {
                self.print_stmt(*callee);
                self.print_call_args(args);
            }
            StmtKind::OperatorCall { op, args } => self.print_operator_call(*op, args),
            StmtKind::Binary { op, lhs, rhs } => self.print_binary(*op, *lhs, *rhs),
            StmtKind::Unary { op, operand } => self.print_unary(*op, *operand),
            StmtKind::Conditional {
                cond,
                then,
                otherwise,
            } => {
                self.print_stmt(*cond);
                self.write("? ");
                self.print_stmt(*then);
                self.write(": ");
                self.print_stmt(*otherwise);
            }
            StmtKind::Paren(inner) => {
                self.write("(");
                self.print_stmt(*inner);
                self.write(")");
            }
            StmtKind::ParenList(items) => self.print_comma_list(items),
            StmtKind::InitList { inits, is_array } => self.print_init_list(inits, *is_array),
            StmtKind::ArraySubscript { base, index } => {
                self.print_stmt(*base);
                self.write("[");
                self.print_stmt(*index);
                self.write("]");
            }

            StmtKind::ImplicitCast { kind, operand } => match kind {
                CastKind::FunctionToPointerDecay => {
                    if !self.dont_take_ptr.contains(&id) {
                        self.write("&");
                    }
                    self.print_stmt(*operand);
                }
                CastKind::ConstructorConversion => {
                    let Some(ty) = stmt.ty.or_else(|| self.expr_type(*operand)) else {
                        self.print_stmt(*operand);
                        return;
                    };
                    if classify(unit, ty) == Semantic::Reference {
                        self.write("new ");
                    }
                    self.print_type(ty);
                    self.write("(");
                    self.print_stmt(*operand);
                    self.write(")");
                }
                CastKind::Other => self.print_stmt(*operand),
            },
            StmtKind::CStyleCast { ty, operand } | StmtKind::StaticCast { ty, operand } => {
                self.write("cast(");
                self.print_type(*ty);
                self.write(")");
                self.print_stmt(*operand);
            }
            StmtKind::FunctionalCast { ty, operand } => {
                if classify(unit, *ty) == Semantic::Reference {
                    self.write("new ");
                }
                self.print_type(*ty);
                self.write("(");
                self.print_stmt(*operand);
                self.write(")");
            }
            StmtKind::Construct {
                args,
                list_init,
                std_init_list,
            } => {
                let braces = *list_init && !*std_init_list;
                if braces {
                    self.write("{");
                }
                self.print_construct_args(args);
                if braces {
                    self.write("}");
                }
            }
            StmtKind::TemporaryObject { args } => {
                if let Some(ty) = stmt.ty {
                    self.print_type(ty);
                }
                self.write("(");
                self.print_construct_args(args);
                self.write(")");
            }
            StmtKind::UnresolvedConstruct { ty, args } => {
                self.print_type(*ty);
                self.write("(");
                let args: Vec<StmtId> = args
                    .iter()
                    .copied()
                    .filter(|&arg| !matches!(unit.stmt(arg).kind, StmtKind::DefaultArg(_)))
                    .collect();
                self.print_comma_list(&args);
                self.write(")");
            }
            StmtKind::New {
                allocated,
                array_size,
                init,
            } => {
                self.write("new ");
                if let Some(size) = array_size {
                    self.print_type(*allocated);
                    self.write("[");
                    self.print_stmt(*size);
                    self.write("]");
                } else {
                    match init {
                        NewInit::None => self.print_type(*allocated),
                        NewInit::Call(construct) => {
                            self.print_type(*allocated);
                            self.write("(");
                            self.print_stmt(*construct);
                            self.write(")");
                        }
                        NewInit::List(list) => self.print_stmt(*list),
                    }
                }
            }
            StmtKind::Delete(operand) => {
                self.print_stmt(*operand);
                self.write(" = null");
            }
            StmtKind::This => {
                let pointee = stmt.ty.and_then(|ty| unit.pointee(ty));
                if pointee.is_some_and(|p| classify(unit, p) == Semantic::Value) {
                    self.write("(&this)[0..1]");
                } else {
                    self.write("this");
                }
            }
            StmtKind::Throw(operand) => {
                self.write("throw ");
                if let Some(operand) = operand {
                    self.print_stmt(*operand);
                }
            }
            StmtKind::Lambda(lambda) => self.print_lambda(lambda),
            StmtKind::TypeTrait { trait_kind, arg } => {
                match arg {
                    TraitArg::Type(ty) => self.print_type(*ty),
                    TraitArg::Expr(expr) => self.print_stmt(*expr),
                }
                self.write(match trait_kind {
                    TraitKind::SizeOf => ".sizeof",
                    TraitKind::AlignOf => ".alignof",
                });
            }

            StmtKind::DefaultArg(inner)
            | StmtKind::SubstNonTypeTemplateParam(inner)
            | StmtKind::Transparent(inner) => self.print_stmt(*inner),
            StmtKind::DefaultInit | StmtKind::ImplicitValueInit => {}
            StmtKind::PredefinedName => self.write("__PRETTY_FUNCTION__"),
            StmtKind::MacroExpr {
                name,
                args,
                expansion,
            } => {
                self.write("(mixin(");
                self.write(name);
                self.write("!(");
                self.print_macro_args(args);
                self.write(")))");
                // Rendered for the imports it registers only.
                let _ = self.capture(|p| p.print_stmt(*expansion));
            }
            StmtKind::Unsupported { kind } => {
                self.write("/*");
                self.write(kind);
                self.write(" Stmt*/");
                self.report(
                    DiagnosticCode::T1001,
                    format!("no rendering for `{kind}` statement"),
                );
            }

            // Statements are handled by `render_stmt`.
            StmtKind::Compound { .. }
            | StmtKind::Try { .. }
            | StmtKind::Catch { .. }
            | StmtKind::If { .. }
            | StmtKind::For { .. }
            | StmtKind::RangeFor { .. }
            | StmtKind::While { .. }
            | StmtKind::Do { .. }
            | StmtKind::Switch { .. }
            | StmtKind::Case { .. }
            | StmtKind::Default { .. }
            | StmtKind::Break
            | StmtKind::Continue
            | StmtKind::Return(_)
            | StmtKind::Null
            | StmtKind::DeclStmt(_) => self.fail(TranslateError::UnexpectedStmt {
                context: "expression",
                expected: "expression",
                found: stmt.kind.kind_name(),
            }),
        }
    }

    fn print_decl_ref(
        &mut self,
        decl: cpp2d_ir::DeclId,
        qualifier: Option<&NestedName>,
        template_args: &[cpp2d_ir::TemplateArgId],
    ) {
        let unit = self.unit;
        if let Some(qualifier) = qualifier {
            self.print_qualifier(qualifier);
        }
        if let DeclKind::Enumerator { ty, .. } = &unit.decl(decl).kind {
            let scope = qualifier
                .and_then(|q| q.last())
                .and_then(|segment| match segment {
                    Qualifier::Type(qt) => Some(unit.canonical_type(*qt).unqualified()),
                    _ => None,
                });
            if scope != Some(unit.canonical_type(*ty).unqualified()) {
                self.print_type(*ty);
                self.write(".");
            }
        }
        let name = match self.renames.lookup(decl) {
            Some(renamed) => renamed.to_owned(),
            None => self.mangle_var(decl),
        };
        self.write(&name);
        if !template_args.is_empty() {
            self.print_template_arg_list(template_args);
        }
    }

    /// `(a, b)`, stopping at the first defaulted argument.
    fn print_call_args(&mut self, args: &[StmtId]) {
        let unit = self.unit;
        self.write("(");
        for (index, &arg) in args.iter().enumerate() {
            if matches!(unit.stmt(arg).kind, StmtKind::DefaultArg(_)) {
                break;
            }
            if index != 0 {
                self.write(", ");
            }
            self.print_stmt(arg);
        }
        self.write(")");
    }

    fn print_comma_list(&mut self, items: &[StmtId]) {
        for (index, &item) in items.iter().enumerate() {
            if index != 0 {
                self.write(", ");
            }
            self.print_stmt(item);
        }
    }

    /// Constructor arguments; trailing defaulted arguments are dropped
    /// (a lone defaulted argument is kept).
    fn print_construct_args(&mut self, args: &[StmtId]) {
        let unit = self.unit;
        for (index, &arg) in args.iter().enumerate() {
            if index != 0 && matches!(unit.stmt(arg).kind, StmtKind::DefaultArg(_)) {
                break;
            }
            if index != 0 {
                self.write(", ");
            }
            self.print_stmt(arg);
        }
    }

    /// Initializer of a directly initialized variable: the copied value
    /// for a copy, otherwise `T(args)`.
    pub(super) fn print_construct_params(&mut self, construct: StmtId) {
        let unit = self.unit;
        let stmt = unit.stmt(construct);
        let StmtKind::Construct { args, .. } = &stmt.kind else {
            self.print_stmt(construct);
            return;
        };
        let Some(ty) = stmt.ty else {
            self.fail(TranslateError::UnexpectedStmt {
                context: "direct initialization",
                expected: "typed constructor call",
                found: stmt.kind.kind_name(),
            });
            return;
        };
        if let [arg] = args.as_slice() {
            if unit.stmt(*arg).ty == Some(ty.with_const(true)) {
                self.print_stmt(*arg);
                return;
            }
        }
        let semantic = classify(unit, ty);
        self.print_type(ty);
        self.write("(");
        for (index, &arg) in args.iter().enumerate() {
            if matches!(unit.stmt(arg).kind, StmtKind::DefaultArg(_))
                && (index != 0 || semantic != Semantic::Value)
            {
                break;
            }
            if index != 0 {
                self.write(", ");
            }
            self.print_stmt(arg);
        }
        self.write(")");
    }

    fn print_operator_call(&mut self, op: OverloadedOperator, args: &[StmtId]) {
        let unit = self.unit;
        let Some((&first, rest)) = args.split_first() else {
            self.write(op.spelling());
            return;
        };
        match op {
            OverloadedOperator::Call | OverloadedOperator::Subscript => {
                let (open, close) = if op == OverloadedOperator::Call {
                    ("(", ")")
                } else {
                    ("[", "]")
                };
                self.print_stmt(first);
                self.write(open);
                let rest: Vec<StmtId> = rest
                    .iter()
                    .copied()
                    .filter(|&arg| !matches!(unit.stmt(arg).kind, StmtKind::DefaultArg(_)))
                    .collect();
                self.print_comma_list(&rest);
                self.write(close);
            }
            OverloadedOperator::Arrow => self.print_stmt(first),
            OverloadedOperator::Equal => {
                let last = rest.last().copied().unwrap_or(first);
                let is_shared = |ty: Option<QualType>| {
                    ty.is_some_and(|ty| {
                        !unit.is_pointer(ty) && classify(unit, ty) != Semantic::Value
                    })
                };
                let dup = is_shared(self.expr_type(first)) && is_shared(self.expr_type(last));
                self.print_stmt(first);
                self.write(" = ");
                self.print_stmt(last);
                if dup {
                    self.this_function_useful = true;
                    self.write(".dup()");
                }
            }
            OverloadedOperator::PlusPlus | OverloadedOperator::MinusMinus => {
                if args.len() == 2 {
                    self.print_stmt(first);
                    self.write(op.spelling());
                } else {
                    self.write(op.spelling());
                    self.print_stmt(first);
                }
            }
            _ => {
                let binary = args.len() == 2;
                if binary {
                    self.print_stmt(first);
                    self.write(" ");
                }
                self.write(op.spelling());
                if binary {
                    self.write(" ");
                }
                if let Some(&last) = args.last() {
                    self.print_stmt(last);
                }
            }
        }
    }

    fn print_binary(&mut self, op: BinaryOp, lhs: StmtId, rhs: StmtId) {
        let unit = self.unit;
        let lhs_pointer = self.expr_type(lhs).is_some_and(|ty| unit.is_pointer(ty));
        let rhs_pointer = self.expr_type(rhs).is_some_and(|ty| unit.is_pointer(ty));
        if lhs_pointer && op == BinaryOp::Add {
            self.print_stmt(lhs);
            self.write("[");
            self.print_stmt(rhs);
            self.write("..$]");
            return;
        }
        if lhs_pointer && op == BinaryOp::AddAssign {
            self.add_import("std.range.primitives", "popFrontN");
            self.print_stmt(lhs);
            self.write(".popFrontN(");
            self.print_stmt(rhs);
            self.write(")");
            return;
        }
        self.print_stmt(lhs);
        let spelling = match op {
            BinaryOp::Eq if lhs_pointer && rhs_pointer => " is ",
            BinaryOp::Ne if lhs_pointer && rhs_pointer => " !is ",
            _ => "",
        };
        if spelling.is_empty() {
            self.write(" ");
            self.write(op.spelling());
            self.write(" ");
        } else {
            self.write(spelling);
        }
        self.print_stmt(rhs);
    }

    fn print_unary(&mut self, op: UnaryOp, operand: StmtId) {
        let unit = self.unit;
        let ty = self.expr_type(operand);
        if op.is_increment() && ty.is_some_and(|ty| unit.is_pointer(ty)) {
            self.add_import("std.range.primitives", "popFront");
            self.print_stmt(operand);
            self.write(".popFront");
            return;
        }
        if op.is_postfix() {
            self.print_stmt(operand);
            self.write(op.spelling());
            return;
        }
        // Markers are only needed where a value type became a slice.
        let show = ty.is_none_or(|ty| {
            let target = if unit.has_pointer_representation(ty) {
                unit.pointee(ty).unwrap_or(ty)
            } else {
                ty
            };
            classify(unit, target) == Semantic::Value
        });
        match op {
            UnaryOp::AddrOf => {
                if show {
                    self.write("(&");
                }
                self.print_stmt(operand);
                if show {
                    self.write(")[0..1]");
                }
            }
            UnaryOp::Deref => {
                if matches!(unit.stmt(operand).kind, StmtKind::This) {
                    self.write("this");
                    return;
                }
                self.print_stmt(operand);
                if show {
                    self.write("[0]");
                }
            }
            _ => {
                self.write(op.spelling());
                self.print_stmt(operand);
            }
        }
    }

    /// Brace or bracket initializer lists, one element per line. A list
    /// wrapping a single nested list prints only the inner one.
    fn print_init_list(&mut self, inits: &[StmtId], is_array: bool) {
        let unit = self.unit;
        let explicit = !matches!(
            inits,
            [single] if matches!(unit.stmt(*single).kind, StmtKind::InitList { .. })
        );
        if explicit {
            self.write(if is_array { "[" } else { "{" });
            self.write(" \n");
        }
        self.indent();
        for &init in inits {
            let text = self.capture(|p| p.print_stmt(init));
            if !text.is_empty() {
                self.write_indent();
                self.write(&text);
                if explicit {
                    self.write(",\n");
                }
            }
            self.sync_output();
        }
        self.dedent();
        if explicit {
            self.write_indent();
            self.write(if is_array { "]" } else { "}" });
        }
    }

    fn print_lambda(&mut self, lambda: &Lambda) {
        let unit = self.unit;
        let has_auto = lambda.explicit_params
            && lambda.params.iter().any(|&param| match &unit.decl(param).kind {
                DeclKind::Param(p) => {
                    matches!(unit.type_kind(p.ty.ty), TypeKind::TemplateTypeParam { .. })
                }
                _ => false,
            });
        if has_auto {
            self.add_import("cpp_std", "toFunctor");
            self.write("toFunctor!(");
        }
        if let Some(result) = lambda.result {
            self.write("function ");
            self.print_type(result);
        }
        if lambda.explicit_params {
            self.write("(");
            self.flags.in_func_args = true;
            self.flags.ref_accepted = true;
            for (index, &param) in lambda.params.iter().enumerate() {
                if index != 0 {
                    self.write(", ");
                }
                self.print_decl(param);
            }
            if lambda.variadic {
                if !lambda.params.is_empty() {
                    self.write(", ");
                }
                self.write("...");
            }
            self.write(")");
            self.flags.in_func_args = false;
            self.flags.ref_accepted = false;
        }
        self.newline();
        self.write_indent();
        self.print_stmt(lambda.body);
        if has_auto {
            self.write(")()");
        }
    }

    /// Type of an expression, looking through untyped wrappers.
    fn expr_type(&self, id: StmtId) -> Option<QualType> {
        let unit = self.unit;
        let stmt = unit.stmt(id);
        match (&stmt.ty, &stmt.kind) {
            (Some(ty), _) => Some(*ty),
            (None, StmtKind::Paren(inner) | StmtKind::Transparent(inner)) => {
                self.expr_type(*inner)
            }
            (None, _) => None,
        }
    }
}

fn float_literal(value: f64, width: FloatWidth) -> String {
    let mut text = match width {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a float literal holds a value representable as f32"
        )]
        FloatWidth::Float => (value as f32).to_string(),
        FloatWidth::Double | FloatWidth::LongDouble => value.to_string(),
    };
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        text.push_str(".0");
    }
    match width {
        FloatWidth::Float => text.push('f'),
        FloatWidth::LongDouble => text.push('l'),
        FloatWidth::Double => {}
    }
    text
}

fn char_literal(c: u32) -> String {
    let body = match c {
        0 => "\\0".to_owned(),
        0x0A => "\\n".to_owned(),
        0x09 => "\\t".to_owned(),
        0x0D => "\\r".to_owned(),
        _ => char::from_u32(c)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string(),
    };
    format!("'{body}'")
}

/// D string literal with an explicit terminating NUL, so it can still be
/// passed where C code expects a C string.
fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 5);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out.push_str("\\0\"");
    out
}

#[cfg(test)]
mod tests {
    use super::{char_literal, float_literal, string_literal};
    use cpp2d_ir::FloatWidth;
    use pretty_assertions::assert_eq;

    #[test]
    fn float_literals_keep_a_fraction_and_suffix() {
        assert_eq!(float_literal(1.0, FloatWidth::Double), "1.0");
        assert_eq!(float_literal(1.5, FloatWidth::Float), "1.5f");
        assert_eq!(float_literal(2.0, FloatWidth::LongDouble), "2.0l");
        assert_eq!(float_literal(-3.0, FloatWidth::Double), "-3.0");
    }

    #[test]
    fn char_literals_escape_control_characters() {
        assert_eq!(char_literal(0), "'\\0'");
        assert_eq!(char_literal(u32::from('\n')), "'\\n'");
        assert_eq!(char_literal(u32::from('a')), "'a'");
    }

    #[test]
    fn string_literals_are_escaped_and_nul_terminated() {
        assert_eq!(string_literal("a\"b"), "\"a\\\"b\\0\"");
        assert_eq!(string_literal("x\\y\n"), "\"x\\\\y\\n\\0\"");
    }
}
