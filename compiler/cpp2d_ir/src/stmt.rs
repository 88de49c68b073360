//! Statement and expression nodes.
//!
//! Expressions are statements, as in the front end: an expression used as
//! a statement is simply a `StmtKind` expression variant in a compound body.

use crate::decl::MacroArg;
use crate::source::{SourceLoc, SourceRange};
use crate::ty::{NestedName, QualType};
use crate::{BinaryOp, DeclId, OverloadedOperator, StmtId, TemplateArgId, UnaryOp};

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub range: SourceRange,
    /// Type of an expression node.
    pub ty: Option<QualType>,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Stmt {
            kind,
            range: SourceRange::INVALID,
            ty: None,
        }
    }

    #[must_use]
    pub fn with_ty(mut self, ty: QualType) -> Self {
        self.ty = Some(ty);
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: SourceRange) -> Self {
        self.range = range;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    // Statements
    Compound {
        body: Vec<StmtId>,
        lbrace: SourceLoc,
        rbrace: SourceLoc,
    },
    Try {
        block: StmtId,
        handlers: Vec<StmtId>,
    },
    Catch {
        decl: Option<DeclId>,
        body: StmtId,
    },
    If {
        cond: StmtId,
        then: StmtId,
        otherwise: Option<StmtId>,
    },
    For {
        init: Option<StmtId>,
        cond: Option<StmtId>,
        inc: Option<StmtId>,
        body: StmtId,
    },
    RangeFor {
        var: DeclId,
        range: StmtId,
        body: StmtId,
    },
    While {
        cond: StmtId,
        body: StmtId,
    },
    Do {
        body: StmtId,
        cond: StmtId,
    },
    Switch {
        cond: StmtId,
        body: StmtId,
    },
    Case {
        value: StmtId,
        body: StmtId,
    },
    Default {
        body: StmtId,
    },
    Break,
    Continue,
    Return(Option<StmtId>),
    Null,
    DeclStmt(Vec<DeclId>),

    // Literals
    IntegerLiteral(i128),
    FloatLiteral {
        /// `f64::to_bits` of the value.
        bits: u64,
        width: FloatWidth,
    },
    CharLiteral(u32),
    StringLiteral {
        value: String,
    },
    BoolLiteral(bool),
    NullPtrLiteral,

    // Names
    DeclRef {
        decl: DeclId,
        qualifier: Option<NestedName>,
        template_args: Vec<TemplateArgId>,
    },
    DependentScopeDeclRef {
        qualifier: NestedName,
        name: String,
        template_args: Vec<TemplateArgId>,
    },
    UnresolvedLookup {
        name: String,
        template_args: Option<Vec<TemplateArgId>>,
    },
    Member {
        /// `None` for implicit `this` access.
        base: Option<StmtId>,
        name: MemberName,
        template_args: Vec<TemplateArgId>,
    },

    // Calls and operators
    Call {
        callee: StmtId,
        args: Vec<StmtId>,
    },
    MemberCall {
        callee: StmtId,
        args: Vec<StmtId>,
    },
    OperatorCall {
        op: OverloadedOperator,
        args: Vec<StmtId>,
    },
    Binary {
        op: BinaryOp,
        lhs: StmtId,
        rhs: StmtId,
    },
    Unary {
        op: UnaryOp,
        operand: StmtId,
    },
    Conditional {
        cond: StmtId,
        then: StmtId,
        otherwise: StmtId,
    },
    Paren(StmtId),
    ParenList(Vec<StmtId>),
    InitList {
        inits: Vec<StmtId>,
        /// Initializes an array temporary.
        is_array: bool,
    },
    ArraySubscript {
        base: StmtId,
        index: StmtId,
    },

    // Conversions and construction
    ImplicitCast {
        kind: CastKind,
        operand: StmtId,
    },
    CStyleCast {
        ty: QualType,
        operand: StmtId,
    },
    StaticCast {
        ty: QualType,
        operand: StmtId,
    },
    FunctionalCast {
        ty: QualType,
        operand: StmtId,
    },
    /// Constructor call; the constructed type is the node's `ty`.
    Construct {
        args: Vec<StmtId>,
        list_init: bool,
        std_init_list: bool,
    },
    /// `T(args)` temporary; the type is the node's `ty`.
    TemporaryObject {
        args: Vec<StmtId>,
    },
    UnresolvedConstruct {
        ty: QualType,
        args: Vec<StmtId>,
    },
    New {
        allocated: QualType,
        array_size: Option<StmtId>,
        init: NewInit,
    },
    Delete(StmtId),
    This,
    Throw(Option<StmtId>),
    Lambda(Lambda),
    TypeTrait {
        trait_kind: TraitKind,
        arg: TraitArg,
    },

    // Wrappers
    DefaultArg(StmtId),
    DefaultInit,
    ImplicitValueInit,
    SubstNonTypeTemplateParam(StmtId),
    PredefinedName,
    /// Cleanups, bound and materialized temporaries: rendered as their operand.
    Transparent(StmtId),
    /// Expression produced by a macro the pre-expander recognized.
    MacroExpr {
        name: String,
        args: Vec<MacroArg>,
        /// The expanded expression; visited for its imports only.
        expansion: StmtId,
    },
    Unsupported {
        kind: String,
    },
}

impl StmtKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            StmtKind::Compound { .. } => "CompoundStmt",
            StmtKind::Try { .. } => "CXXTryStmt",
            StmtKind::Catch { .. } => "CXXCatchStmt",
            StmtKind::If { .. } => "IfStmt",
            StmtKind::For { .. } => "ForStmt",
            StmtKind::RangeFor { .. } => "CXXForRangeStmt",
            StmtKind::While { .. } => "WhileStmt",
            StmtKind::Do { .. } => "DoStmt",
            StmtKind::Switch { .. } => "SwitchStmt",
            StmtKind::Case { .. } => "CaseStmt",
            StmtKind::Default { .. } => "DefaultStmt",
            StmtKind::Break => "BreakStmt",
            StmtKind::Continue => "ContinueStmt",
            StmtKind::Return(_) => "ReturnStmt",
            StmtKind::Null => "NullStmt",
            StmtKind::DeclStmt(_) => "DeclStmt",
            StmtKind::IntegerLiteral(_) => "IntegerLiteral",
            StmtKind::FloatLiteral { .. } => "FloatingLiteral",
            StmtKind::CharLiteral(_) => "CharacterLiteral",
            StmtKind::StringLiteral { .. } => "StringLiteral",
            StmtKind::BoolLiteral(_) => "CXXBoolLiteralExpr",
            StmtKind::NullPtrLiteral => "CXXNullPtrLiteralExpr",
            StmtKind::DeclRef { .. } => "DeclRefExpr",
            StmtKind::DependentScopeDeclRef { .. } => "DependentScopeDeclRefExpr",
            StmtKind::UnresolvedLookup { .. } => "UnresolvedLookupExpr",
            StmtKind::Member { .. } => "MemberExpr",
            StmtKind::Call { .. } => "CallExpr",
            StmtKind::MemberCall { .. } => "CXXMemberCallExpr",
            StmtKind::OperatorCall { .. } => "CXXOperatorCallExpr",
            StmtKind::Binary { .. } => "BinaryOperator",
            StmtKind::Unary { .. } => "UnaryOperator",
            StmtKind::Conditional { .. } => "ConditionalOperator",
            StmtKind::Paren(_) => "ParenExpr",
            StmtKind::ParenList(_) => "ParenListExpr",
            StmtKind::InitList { .. } => "InitListExpr",
            StmtKind::ArraySubscript { .. } => "ArraySubscriptExpr",
            StmtKind::ImplicitCast { .. } => "ImplicitCastExpr",
            StmtKind::CStyleCast { .. } => "CStyleCastExpr",
            StmtKind::StaticCast { .. } => "CXXStaticCastExpr",
            StmtKind::FunctionalCast { .. } => "CXXFunctionalCastExpr",
            StmtKind::Construct { .. } => "CXXConstructExpr",
            StmtKind::TemporaryObject { .. } => "CXXTemporaryObjectExpr",
            StmtKind::UnresolvedConstruct { .. } => "CXXUnresolvedConstructExpr",
            StmtKind::New { .. } => "CXXNewExpr",
            StmtKind::Delete(_) => "CXXDeleteExpr",
            StmtKind::This => "CXXThisExpr",
            StmtKind::Throw(_) => "CXXThrowExpr",
            StmtKind::Lambda(_) => "LambdaExpr",
            StmtKind::TypeTrait { .. } => "UnaryExprOrTypeTraitExpr",
            StmtKind::DefaultArg(_) => "CXXDefaultArgExpr",
            StmtKind::DefaultInit => "CXXDefaultInitExpr",
            StmtKind::ImplicitValueInit => "ImplicitValueInitExpr",
            StmtKind::SubstNonTypeTemplateParam(_) => "SubstNonTypeTemplateParmExpr",
            StmtKind::PredefinedName => "PredefinedExpr",
            StmtKind::Transparent(_) => "MaterializeTemporaryExpr",
            StmtKind::MacroExpr { .. } => "MacroExpr",
            StmtKind::Unsupported { .. } => "Unsupported",
        }
    }

    /// Statements that close themselves and take no trailing `;`.
    pub fn is_self_terminating(&self) -> bool {
        matches!(
            self,
            StmtKind::For { .. }
                | StmtKind::If { .. }
                | StmtKind::RangeFor { .. }
                | StmtKind::While { .. }
                | StmtKind::Compound { .. }
                | StmtKind::Catch { .. }
                | StmtKind::Try { .. }
                | StmtKind::Null
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    Float,
    Double,
    LongDouble,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemberName {
    Identifier(String),
    /// `operator T`.
    Conversion(QualType),
    /// `operator+` and friends.
    Operator(OverloadedOperator),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CastKind {
    FunctionToPointerDecay,
    ConstructorConversion,
    Other,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NewInit {
    None,
    /// `new T(args)`: a `Construct` expression.
    Call(StmtId),
    /// `new T{...}`: an `InitList` expression.
    List(StmtId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lambda {
    pub params: Vec<DeclId>,
    /// A parameter list was written (`[]() {}` vs `[] {}`).
    pub explicit_params: bool,
    /// Explicitly written return type.
    pub result: Option<QualType>,
    pub variadic: bool,
    pub body: StmtId,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraitKind {
    SizeOf,
    AlignOf,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TraitArg {
    Type(QualType),
    Expr(StmtId),
}
