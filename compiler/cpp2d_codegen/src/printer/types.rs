//! Type rendering.
//!
//! Pointers and references to value types become slices (`int[]`);
//! pointers and references to classes print as the class itself, since
//! classes are already references on the target side.

use cpp2d_ir::{
    BuiltinKind, DeclKind, NestedName, QualType, Qualifier, RecordTemplate, TypeId, TypeKind,
};

use super::Printer;
use crate::diagnostics::DiagnosticCode;
use crate::names::mangle_name;
use crate::semantic::{classify, is_std_array, is_std_unordered_map, Semantic};
use crate::templates::Unresolved;

impl Printer<'_> {
    pub(super) fn render_qual_type(&mut self, qt: QualType) {
        let unit = self.unit;
        let port_const = self.config.port_const;
        if let TypeKind::Auto { .. } = unit.type_kind(qt.ty) {
            if qt.is_const && port_const {
                self.write("const ");
            }
            self.print_type_node(qt.ty);
            return;
        }
        let wrap = qt.is_const && (port_const || unit.is_builtin(qt));
        if wrap {
            self.write("const(");
        }
        self.print_type_node(qt.ty);
        if wrap {
            self.write(")");
        }
    }

    pub(super) fn render_type(&mut self, id: TypeId) {
        let unit = self.unit;
        match unit.type_kind(id) {
            TypeKind::Builtin(kind) => self.write(builtin_name(*kind)),
            TypeKind::Pointer(pointee) | TypeKind::MemberPointer(pointee) => {
                if let TypeKind::Paren(inner) = unit.type_kind(pointee.ty) {
                    if let TypeKind::FunctionProto { .. } = unit.type_kind(inner.ty) {
                        self.print_type_node(inner.ty);
                        return;
                    }
                }
                self.print_pointee(*pointee);
            }
            TypeKind::LValueRef(pointee) => {
                if self.flags.ref_accepted {
                    if classify(unit, *pointee) == Semantic::Value
                        && (!self.flags.in_func_args || !unit.canonical_type(*pointee).is_const)
                    {
                        self.write("ref ");
                    }
                    self.print_type(*pointee);
                } else {
                    self.print_pointee(*pointee);
                }
            }
            TypeKind::RValueRef(pointee) => {
                self.print_type(*pointee);
                self.write("/*&&*/");
            }
            TypeKind::Record(decl) => {
                let name = self.mangle_type(*decl);
                self.write(&name);
                if let DeclKind::Record(record) = &unit.decl(*decl).kind {
                    if let RecordTemplate::Specialization { args, .. } = &record.template {
                        self.print_template_arg_list(args);
                    }
                }
            }
            TypeKind::Enum(decl) => self.write(&mangle_name(&unit.decl(*decl).name)),
            TypeKind::Typedef(decl) => {
                let name = self.mangle_type(*decl);
                self.write(&name);
            }
            TypeKind::Elaborated { qualifier, named } => {
                self.print_qualifier(qualifier);
                self.print_type(*named);
            }
            TypeKind::TemplateSpecialization { template, args, .. } => {
                let qt = QualType::new(id);
                match args.as_slice() {
                    [element, size, ..] if is_std_array(unit, qt) => {
                        self.print_template_arg(*element);
                        self.write("[");
                        self.print_template_arg(*size);
                        self.write("]");
                    }
                    [key, value, ..] if is_std_unordered_map(unit, qt) => {
                        self.print_template_arg(*value);
                        self.write("[");
                        self.print_template_arg(*key);
                        self.write("]");
                    }
                    _ => {
                        let name = self.mangle_type(*template);
                        self.write(&name);
                        self.print_template_arg_list(args);
                    }
                }
            }
            TypeKind::TemplateTypeParam { decl, depth, index } => {
                if let Some(decl) = decl {
                    self.print_decl(*decl);
                } else {
                    self.print_template_param_ref(*depth, *index);
                }
            }
            TypeKind::SubstTemplateTypeParam { replacement } => self.print_type(*replacement),
            TypeKind::Auto { .. } => {
                if !self.flags.in_for_range_init {
                    self.write("auto");
                }
            }
            TypeKind::Decltype(expr) => {
                self.write("typeof(");
                self.print_stmt(*expr);
                self.write(")");
            }
            TypeKind::ConstantArray { element, size } => {
                self.print_type(*element);
                self.write("[");
                self.write(&size.to_string());
                self.write("]");
            }
            TypeKind::IncompleteArray(element) => {
                self.print_type(*element);
                self.write("[]");
            }
            TypeKind::FunctionProto {
                result,
                params,
                variadic,
            } => {
                self.print_type(*result);
                self.write(" function(");
                for (index, &param) in params.iter().enumerate() {
                    if index != 0 {
                        self.write(", ");
                    }
                    self.print_type(param);
                }
                if *variadic {
                    if !params.is_empty() {
                        self.write(", ");
                    }
                    self.write("...");
                }
                self.write(")");
            }
            TypeKind::Paren(inner)
            | TypeKind::Attributed(inner)
            | TypeKind::Decayed(inner)
            | TypeKind::InjectedClassName(inner) => self.print_type(*inner),
            TypeKind::DependentName { qualifier, name } => {
                self.print_qualifier(qualifier);
                self.write(name);
            }
            TypeKind::Unsupported(kind) => {
                self.write("/*");
                self.write(kind);
                self.write(" Type*/");
                self.report(
                    DiagnosticCode::T1001,
                    format!("no rendering for `{kind}` type"),
                );
            }
        }
    }

    /// `T[]` for a pointer to a value type, `T` for a pointer to a class.
    fn print_pointee(&mut self, pointee: QualType) {
        self.print_type(pointee);
        if classify(self.unit, pointee) == Semantic::Value {
            self.write("[]");
        }
    }

    /// A canonical template parameter type, resolved through the enclosing
    /// template parameter lists.
    fn print_template_param_ref(&mut self, depth: u32, index: u32) {
        let unit = self.unit;
        match self.template_scopes.resolve(depth, index) {
            Ok(param) => {
                let name = match self.renames.lookup(param) {
                    Some(renamed) => renamed.to_owned(),
                    None => unit.decl(param).name.clone(),
                };
                if name.is_empty() {
                    self.write("cant_find_name");
                } else {
                    self.write(&name);
                }
            }
            Err(unresolved) => {
                tracing::debug!(depth, index, "unresolved template parameter");
                match unresolved {
                    Unresolved::Depth(depth) => self.write(&format!("/* getDepth : {depth}*/")),
                    Unresolved::Index(index) => self.write(&format!("/* getIndex : {index}*/")),
                }
                self.write("cant_find_name");
            }
        }
    }

    /// `Outer.Inner.` for the type and dependent segments of a qualifier;
    /// namespaces vanish since they are flattened into the module.
    pub(super) fn print_qualifier(&mut self, qualifier: &NestedName) {
        for segment in qualifier {
            match segment {
                Qualifier::Type(qt) => {
                    self.print_type(*qt);
                    self.write(".");
                }
                Qualifier::Identifier(name) => {
                    self.write(name);
                    self.write(".");
                }
                Qualifier::Global | Qualifier::Namespace(_) | Qualifier::NamespaceAlias(_) => {}
            }
        }
    }
}

fn builtin_name(kind: BuiltinKind) -> &'static str {
    match kind {
        BuiltinKind::Void => "void",
        BuiltinKind::Bool => "bool",
        BuiltinKind::CharS | BuiltinKind::CharU | BuiltinKind::SChar => "char",
        BuiltinKind::UChar => "ubyte",
        BuiltinKind::WCharS | BuiltinKind::WCharU | BuiltinKind::Char16 => "wchar",
        BuiltinKind::Char32 => "dchar",
        BuiltinKind::Short => "short",
        BuiltinKind::UShort => "ushort",
        BuiltinKind::Int => "int",
        BuiltinKind::UInt => "uint",
        BuiltinKind::Long | BuiltinKind::LongLong => "long",
        BuiltinKind::ULong | BuiltinKind::ULongLong => "ulong",
        BuiltinKind::Int128 => "cent",
        BuiltinKind::UInt128 => "ucent",
        BuiltinKind::Half => "half",
        BuiltinKind::Float => "float",
        BuiltinKind::Double => "double",
        BuiltinKind::LongDouble => "real",
        BuiltinKind::NullPtr => "nullptr_t",
        BuiltinKind::Dependent => "<dependent type>",
    }
}
