//! cpp2d IR - the typed input tree
//!
//! The front end hands the translator one immutable [`TranslationUnit`] per
//! source file. Everything is flattened into arenas:
//! - declarations (`DeclId`), statements and expressions (`StmtId`)
//! - hash-consed types (`TypeId`) with `const` kept in [`QualType`]
//! - template arguments (`TemplateArgId`)
//!
//! Ids are `Copy + Hash + Eq` and double as node identities for every
//! identity-keyed table in the code generator.

mod decl;
mod ids;
mod operators;
mod source;
mod stmt;
mod template;
mod ty;
mod unit;

pub use decl::{
    BaseSpec, BitWidth, CtorInit, CtorInitTarget, Decl, DeclKind, EnumDecl, FieldDecl,
    FriendTarget, FunctionDecl, FunctionFlags, FunctionKind, FunctionTemplateKind, Linkage,
    MacroArg, MacroMarker, ParamDecl, RecordDecl, RecordTemplate, SpecializationKind, Storage,
    TagKind, TemplateParamList, VarDecl, VarInit,
};
pub use ids::{DeclId, StmtId, TemplateArgId, TypeId};
pub use operators::{BinaryOp, OverloadedOperator, UnaryOp};
pub use source::{Access, RawComment, SourceLoc, SourceRange};
pub use stmt::{
    CastKind, FloatWidth, Lambda, MemberName, NewInit, Stmt, StmtKind, TraitArg, TraitKind,
};
pub use template::TemplateArgKind;
pub use ty::{BuiltinKind, NestedName, QualType, Qualifier, TypeArena, TypeKind};
pub use unit::{TranslationUnit, TreeBuilder};
