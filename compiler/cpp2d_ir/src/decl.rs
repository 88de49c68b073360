//! Declaration nodes.

use bitflags::bitflags;

use crate::source::{Access, RawComment, SourceLoc, SourceRange};
use crate::ty::{NestedName, QualType};
use crate::{DeclId, OverloadedOperator, StmtId, TemplateArgId};

/// Ordered template parameter declarations.
pub type TemplateParamList = Vec<DeclId>;

/// A declaration plus the attributes every declaration kind shares.
#[derive(Clone, Debug, PartialEq)]
pub struct Decl {
    pub kind: DeclKind,
    /// Unqualified name; empty for anonymous declarations.
    pub name: String,
    /// Fully qualified name (`boost::optional`). Falls back to `name` when empty.
    pub qualified_name: String,
    pub range: SourceRange,
    pub access: Access,
    /// Path of the file the declaration was written in.
    pub file: Option<String>,
    pub comment: Option<RawComment>,
    /// First declaration of the entity; `INVALID` when this is it.
    pub canonical: DeclId,
    /// Compiler-generated (implicit special members, injected names).
    pub implicit: bool,
}

impl Decl {
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Decl {
            kind,
            name: name.into(),
            qualified_name: String::new(),
            range: SourceRange::INVALID,
            access: Access::None,
            file: None,
            comment: None,
            canonical: DeclId::INVALID,
            implicit: false,
        }
    }

    #[must_use]
    pub fn with_qualified_name(mut self, qualified: impl Into<String>) -> Self {
        self.qualified_name = qualified.into();
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: SourceRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: RawComment) -> Self {
        self.comment = Some(comment);
        self
    }

    #[must_use]
    pub fn with_canonical(mut self, canonical: DeclId) -> Self {
        self.canonical = canonical;
        self
    }

    #[must_use]
    pub fn implicit(mut self) -> Self {
        self.implicit = true;
        self
    }

    /// Qualified name, or the plain name when none was recorded.
    pub fn qualified(&self) -> &str {
        if self.qualified_name.is_empty() {
            &self.name
        } else {
            &self.qualified_name
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DeclKind {
    TranslationUnit { decls: Vec<DeclId> },
    Namespace { decls: Vec<DeclId> },
    NamespaceAlias,
    Using,
    UsingDirective,
    Empty,
    AccessSpec,
    Typedef { underlying: QualType },
    TypeAlias { underlying: QualType },
    AliasTemplate { params: TemplateParamList, underlying: QualType },
    Record(RecordDecl),
    /// `template<...> class X`; `pattern` is the templated record.
    ClassTemplate { params: TemplateParamList, pattern: DeclId },
    Field(FieldDecl),
    Function(FunctionDecl),
    /// `template<...> f(...)`; `pattern` is the templated function.
    FunctionTemplate { pattern: DeclId },
    Param(ParamDecl),
    Var(VarDecl),
    Enum(EnumDecl),
    Enumerator {
        /// The enclosing enum's type.
        ty: QualType,
        init: Option<StmtId>,
    },
    TemplateTypeParam { default: Option<QualType> },
    NonTypeTemplateParam { ty: QualType, default: Option<StmtId> },
    TemplateTemplateParam { default: Option<TemplateArgId> },
    LinkageSpec { language: Linkage, braces: bool, decls: Vec<DeclId> },
    Friend(FriendTarget),
    StaticAssert { cond: StmtId, message: Option<StmtId> },
    /// Marker the macro pre-expander leaves around a macro used as a statement.
    MacroMarker(MacroMarker),
    /// Declaration kind with no rendering rule; carries the front end's name.
    Unsupported { kind: String },
}

impl DeclKind {
    /// Kind name used in placeholders and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DeclKind::TranslationUnit { .. } => "TranslationUnit",
            DeclKind::Namespace { .. } => "Namespace",
            DeclKind::NamespaceAlias => "NamespaceAlias",
            DeclKind::Using => "Using",
            DeclKind::UsingDirective => "UsingDirective",
            DeclKind::Empty => "Empty",
            DeclKind::AccessSpec => "AccessSpec",
            DeclKind::Typedef { .. } => "Typedef",
            DeclKind::TypeAlias { .. } => "TypeAlias",
            DeclKind::AliasTemplate { .. } => "TypeAliasTemplate",
            DeclKind::Record(record) => match record.template {
                RecordTemplate::Specialization { partial: Some(_), .. } => {
                    "ClassTemplatePartialSpecialization"
                }
                RecordTemplate::Specialization { .. } => "ClassTemplateSpecialization",
                RecordTemplate::None | RecordTemplate::Pattern => "CXXRecord",
            },
            DeclKind::ClassTemplate { .. } => "ClassTemplate",
            DeclKind::Field(_) => "Field",
            DeclKind::Function(function) => match function.kind {
                FunctionKind::Free => "Function",
                FunctionKind::Method => "CXXMethod",
                FunctionKind::Constructor { .. } => "CXXConstructor",
                FunctionKind::Destructor => "CXXDestructor",
                FunctionKind::Conversion { .. } => "CXXConversion",
            },
            DeclKind::FunctionTemplate { .. } => "FunctionTemplate",
            DeclKind::Param(_) => "ParmVar",
            DeclKind::Var(_) => "Var",
            DeclKind::Enum(_) => "Enum",
            DeclKind::Enumerator { .. } => "EnumConstant",
            DeclKind::TemplateTypeParam { .. } => "TemplateTypeParm",
            DeclKind::NonTypeTemplateParam { .. } => "NonTypeTemplateParm",
            DeclKind::TemplateTemplateParam { .. } => "TemplateTemplateParm",
            DeclKind::LinkageSpec { .. } => "LinkageSpec",
            DeclKind::Friend(_) => "Friend",
            DeclKind::StaticAssert { .. } => "StaticAssert",
            DeclKind::MacroMarker(_) => "MacroMarker",
            DeclKind::Unsupported { .. } => "Unsupported",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    Class,
    Struct,
    Union,
}

impl TagKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            TagKind::Class => "class",
            TagKind::Struct => "struct",
            TagKind::Union => "union",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordDecl {
    pub tag: TagKind,
    /// Members in declaration order.
    pub members: Vec<DeclId>,
    /// Direct bases followed by virtual bases.
    pub bases: Vec<BaseSpec>,
    /// This declaration carries the body.
    pub complete: bool,
    /// A body exists somewhere in the unit (possibly on another declaration).
    pub has_definition: bool,
    /// The class gets a compiler-generated copy constructor.
    pub has_implicit_copy_ctor: bool,
    pub template: RecordTemplate,
}

impl RecordDecl {
    pub fn new(tag: TagKind) -> Self {
        RecordDecl {
            tag,
            members: Vec::new(),
            bases: Vec::new(),
            complete: true,
            has_definition: true,
            has_implicit_copy_ctor: false,
            template: RecordTemplate::None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RecordTemplate {
    None,
    /// The record described by a class template.
    Pattern,
    Specialization {
        /// The `ClassTemplate` declaration being specialized.
        template: DeclId,
        args: Vec<TemplateArgId>,
        kind: SpecializationKind,
        /// Own parameters of a partial specialization.
        partial: Option<TemplateParamList>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecializationKind {
    ImplicitInstantiation,
    ExplicitSpecialization,
    ExplicitInstantiationDeclaration,
    ExplicitInstantiationDefinition,
}

impl SpecializationKind {
    /// Instantiations are produced by the compiler and are never emitted.
    pub const fn is_instantiation(self) -> bool {
        !matches!(self, SpecializationKind::ExplicitSpecialization)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BaseSpec {
    pub ty: QualType,
    pub access: Access,
    pub is_virtual: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub ty: QualType,
    pub bit_width: Option<BitWidth>,
    pub init: Option<StmtId>,
    pub mutable: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitWidth {
    /// The width expression as written.
    pub expr: StmtId,
    /// Its evaluated value.
    pub value: u32,
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FunctionFlags: u32 {
        const VARIADIC = 1 << 0;
        const DELETED = 1 << 1;
        const DEFAULTED = 1 << 2;
        /// This declaration carries the body.
        const DEFINITION = 1 << 3;
        const STATIC = 1 << 4;
        const CONST = 1 << 5;
        const VIRTUAL = 1 << 6;
        const PURE = 1 << 7;
        /// Overrides at least one base method.
        const OVERRIDES = 1 << 8;
        const EXPLICIT = 1 << 9;
        const MOVE_ASSIGNMENT = 1 << 10;
        const COPY_CONSTRUCTOR = 1 << 11;
        const MOVE_CONSTRUCTOR = 1 << 12;
        const DEFAULT_CONSTRUCTOR = 1 << 13;
        /// Member defined outside its class body.
        const OUT_OF_LINE = 1 << 14;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub kind: FunctionKind,
    pub return_type: QualType,
    pub params: Vec<DeclId>,
    pub body: Option<StmtId>,
    pub flags: FunctionFlags,
    pub operator: Option<OverloadedOperator>,
    /// Enclosing record for members.
    pub parent: Option<DeclId>,
    pub template: FunctionTemplateKind,
    /// Location of `(` in the declarator.
    pub lparen: SourceLoc,
    /// Location of `)` in the declarator.
    pub rparen: SourceLoc,
}

impl FunctionDecl {
    pub fn new(kind: FunctionKind, return_type: QualType) -> Self {
        FunctionDecl {
            kind,
            return_type,
            params: Vec::new(),
            body: None,
            flags: FunctionFlags::empty(),
            operator: None,
            parent: None,
            template: FunctionTemplateKind::NonTemplate,
            lparen: SourceLoc::Invalid,
            rparen: SourceLoc::Invalid,
        }
    }

    #[inline]
    pub fn has(&self, flag: FunctionFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Member of a record (method, constructor, destructor, conversion).
    #[inline]
    pub fn is_member(&self) -> bool {
        !matches!(self.kind, FunctionKind::Free)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionKind {
    Free,
    Method,
    Constructor { inits: Vec<CtorInit> },
    Destructor,
    Conversion { target: QualType },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CtorInit {
    pub target: CtorInitTarget,
    pub init: StmtId,
    /// Written in source rather than synthesized.
    pub written: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CtorInitTarget {
    Member(DeclId),
    Base(QualType),
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionTemplateKind {
    NonTemplate,
    MemberSpecialization,
    /// Pattern of a function template.
    Template { params: TemplateParamList },
    Specialization {
        primary_params: TemplateParamList,
        args: Vec<TemplateArgId>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParamDecl {
    pub ty: QualType,
    pub default: Option<StmtId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub ty: QualType,
    pub init: Option<VarInit>,
    pub storage: Storage,
    pub qualifier: Option<NestedName>,
    /// Out-of-line definition of a static data member.
    pub out_of_line: bool,
    /// For an in-class declaration, its out-of-line definition.
    pub definition: Option<DeclId>,
}

impl VarDecl {
    pub fn new(ty: QualType) -> Self {
        VarDecl {
            ty,
            init: None,
            storage: Storage::Automatic,
            qualifier: None,
            out_of_line: false,
            definition: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VarInit {
    pub expr: StmtId,
    /// `T x(args)` rather than `T x = expr`.
    pub direct: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Storage {
    Automatic,
    StaticLocal,
    StaticMember,
    Global,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumDecl {
    /// Underlying type when written (`enum E : uint8_t`).
    pub fixed: Option<QualType>,
    pub enumerators: Vec<DeclId>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Linkage {
    C,
    Cxx,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FriendTarget {
    Type(QualType),
    Decl(DeclId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum MacroMarker {
    Begin { name: String, args: Vec<MacroArg> },
    End,
}

/// One argument of a macro use, as captured by the pre-expander.
#[derive(Clone, Debug, PartialEq)]
pub enum MacroArg {
    Expr(StmtId),
    Type(TemplateArgId),
    /// Raw identifier text.
    Name(String),
}
