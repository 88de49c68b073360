//! Type nodes and the type interner.
//!
//! Types are hash-consed: interning a structurally equal [`TypeKind`] twice
//! yields the same [`TypeId`]. Const-qualification lives outside the
//! interned node in [`QualType`], so `const Foo` and `Foo` share a node.

use rustc_hash::FxHashMap;

use crate::ids::next_index;
use crate::{DeclId, StmtId, TemplateArgId, TypeId};

/// Built-in arithmetic and special types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Void,
    Bool,
    /// Plain `char` on a target where it is signed.
    CharS,
    /// Plain `char` on a target where it is unsigned.
    CharU,
    SChar,
    UChar,
    WCharS,
    WCharU,
    Char16,
    Char32,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Int128,
    UInt128,
    Half,
    Float,
    Double,
    LongDouble,
    NullPtr,
    /// Type of a value-dependent expression inside a template.
    Dependent,
}

impl BuiltinKind {
    /// The C++ spelling used in canonical type names.
    pub const fn cpp_spelling(self) -> &'static str {
        use BuiltinKind::*;
        match self {
            Void => "void",
            Bool => "bool",
            CharS | CharU => "char",
            SChar => "signed char",
            UChar => "unsigned char",
            WCharS | WCharU => "wchar_t",
            Char16 => "char16_t",
            Char32 => "char32_t",
            Short => "short",
            UShort => "unsigned short",
            Int => "int",
            UInt => "unsigned int",
            Long => "long",
            ULong => "unsigned long",
            LongLong => "long long",
            ULongLong => "unsigned long long",
            Int128 => "__int128",
            UInt128 => "unsigned __int128",
            Half => "half",
            Float => "float",
            Double => "double",
            LongDouble => "long double",
            NullPtr => "std::nullptr_t",
            Dependent => "<dependent type>",
        }
    }
}

/// One segment of a nested name specifier (`a::B<int>::`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// `::` at the start of a name.
    Global,
    Namespace(String),
    NamespaceAlias(String),
    Type(QualType),
    /// Dependent identifier segment (`typename T::inner::`).
    Identifier(String),
}

/// A qualifier chain, outermost first.
pub type NestedName = Vec<Qualifier>;

/// A type node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Builtin(BuiltinKind),
    Pointer(QualType),
    MemberPointer(QualType),
    LValueRef(QualType),
    RValueRef(QualType),
    Record(DeclId),
    Enum(DeclId),
    /// Reference to a typedef or alias declaration.
    Typedef(DeclId),
    /// Type written with a qualifier or an elaborated keyword.
    Elaborated {
        qualifier: NestedName,
        named: QualType,
    },
    TemplateSpecialization {
        /// The class or alias template being specialized.
        template: DeclId,
        args: Vec<TemplateArgId>,
        /// Sugar-free type this specialization names, when resolved.
        aliased: Option<QualType>,
    },
    TemplateTypeParam {
        /// Declaring parameter, absent for canonical parameter types.
        decl: Option<DeclId>,
        depth: u32,
        index: u32,
    },
    /// A template parameter replaced by its argument during instantiation.
    SubstTemplateTypeParam {
        replacement: QualType,
    },
    Auto {
        deduced: Option<QualType>,
    },
    Decltype(StmtId),
    ConstantArray {
        element: QualType,
        size: u64,
    },
    IncompleteArray(QualType),
    FunctionProto {
        result: QualType,
        params: Vec<QualType>,
        variadic: bool,
    },
    Paren(QualType),
    Attributed(QualType),
    /// Parameter type after array/function decay; keeps the written type.
    Decayed(QualType),
    /// The class name used inside its own template definition.
    InjectedClassName(QualType),
    /// `typename T::name`.
    DependentName {
        qualifier: NestedName,
        name: String,
    },
    /// A type form the translator has no rendering for.
    Unsupported(String),
}

impl TypeKind {
    /// Short kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeKind::Builtin(_) => "Builtin",
            TypeKind::Pointer(_) => "Pointer",
            TypeKind::MemberPointer(_) => "MemberPointer",
            TypeKind::LValueRef(_) => "LValueReference",
            TypeKind::RValueRef(_) => "RValueReference",
            TypeKind::Record(_) => "Record",
            TypeKind::Enum(_) => "Enum",
            TypeKind::Typedef(_) => "Typedef",
            TypeKind::Elaborated { .. } => "Elaborated",
            TypeKind::TemplateSpecialization { .. } => "TemplateSpecialization",
            TypeKind::TemplateTypeParam { .. } => "TemplateTypeParm",
            TypeKind::SubstTemplateTypeParam { .. } => "SubstTemplateTypeParm",
            TypeKind::Auto { .. } => "Auto",
            TypeKind::Decltype(_) => "Decltype",
            TypeKind::ConstantArray { .. } => "ConstantArray",
            TypeKind::IncompleteArray(_) => "IncompleteArray",
            TypeKind::FunctionProto { .. } => "FunctionProto",
            TypeKind::Paren(_) => "Paren",
            TypeKind::Attributed(_) => "Attributed",
            TypeKind::Decayed(_) => "Decayed",
            TypeKind::InjectedClassName(_) => "InjectedClassName",
            TypeKind::DependentName { .. } => "DependentName",
            TypeKind::Unsupported(_) => "Unsupported",
        }
    }
}

/// A type reference plus its top-level `const`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualType {
    pub ty: TypeId,
    pub is_const: bool,
}

impl QualType {
    #[inline]
    pub const fn new(ty: TypeId) -> Self {
        QualType {
            ty,
            is_const: false,
        }
    }

    #[inline]
    pub const fn constant(ty: TypeId) -> Self {
        QualType { ty, is_const: true }
    }

    /// Same type without its top-level qualifier.
    #[inline]
    pub const fn unqualified(self) -> Self {
        QualType::new(self.ty)
    }

    #[inline]
    #[must_use]
    pub const fn with_const(self, is_const: bool) -> Self {
        QualType {
            ty: self.ty,
            is_const: self.is_const || is_const,
        }
    }
}

impl From<TypeId> for QualType {
    fn from(ty: TypeId) -> Self {
        QualType::new(ty)
    }
}

/// Hash-consing storage for [`TypeKind`] nodes.
#[derive(Clone, Debug, Default)]
pub struct TypeArena {
    map: FxHashMap<TypeKind, TypeId>,
    types: Vec<TypeKind>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a type, returning the existing id for an equal node.
    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.map.get(&kind) {
            return id;
        }
        let id = TypeId::new(next_index(self.types.len()));
        self.types.push(kind.clone());
        self.map.insert(kind, id);
        id
    }

    /// Look up a type without interning it.
    pub fn find(&self, kind: &TypeKind) -> Option<TypeId> {
        self.map.get(kind).copied()
    }

    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeKind {
        &self.types[id.index()]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
