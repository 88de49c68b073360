//! Tree-building helpers shared by the integration tests.

#![allow(dead_code, reason = "each test file uses a different subset")]

use cpp2d_codegen::{translate_unit, IncludeSet, NoOverrides, OverrideTable, PrinterConfig, Translation};
use cpp2d_ir::{
    Access, BuiltinKind, Decl, DeclId, DeclKind, FieldDecl, FunctionDecl, FunctionFlags,
    FunctionKind, ParamDecl, QualType, RecordDecl, SourceLoc, Stmt, StmtId, StmtKind, TagKind,
    TranslationUnit, TreeBuilder,
};

pub const MAIN: &str = "src/demo.cpp";

pub fn translate(unit: &TranslationUnit) -> Translation {
    translate_with(unit, &IncludeSet::new(), &NoOverrides)
}

pub fn translate_with(
    unit: &TranslationUnit,
    includes: &IncludeSet,
    overrides: &dyn OverrideTable,
) -> Translation {
    translate_unit(unit, includes, overrides, PrinterConfig::default()).unwrap()
}

pub fn record(b: &mut TreeBuilder, tag: TagKind, name: &str) -> (DeclId, QualType) {
    let id = b.add_main_decl(Decl::new(DeclKind::Record(RecordDecl::new(tag)), name));
    (id, b.record_type(id))
}

pub fn field(b: &mut TreeBuilder, record: DeclId, name: &str, ty: QualType) -> DeclId {
    field_with(b, record, name, ty, Access::Public)
}

pub fn field_with(
    b: &mut TreeBuilder,
    record: DeclId,
    name: &str,
    ty: QualType,
    access: Access,
) -> DeclId {
    let id = b.add_main_decl(
        Decl::new(
            DeclKind::Field(FieldDecl {
                ty,
                bit_width: None,
                init: None,
                mutable: false,
            }),
            name,
        )
        .with_access(access),
    );
    b.push_member(record, id);
    id
}

pub fn param(b: &mut TreeBuilder, name: &str, ty: QualType) -> DeclId {
    b.add_decl(Decl::new(
        DeclKind::Param(ParamDecl { ty, default: None }),
        name,
    ))
}

pub fn block(b: &mut TreeBuilder, body: Vec<StmtId>) -> StmtId {
    b.add_stmt(Stmt::new(StmtKind::Compound {
        body,
        lbrace: SourceLoc::Invalid,
        rbrace: SourceLoc::Invalid,
    }))
}

pub fn ret(b: &mut TreeBuilder, value: Option<StmtId>) -> StmtId {
    b.add_stmt(Stmt::new(StmtKind::Return(value)))
}

pub fn bool_lit(b: &mut TreeBuilder, value: bool) -> StmtId {
    let ty = b.builtin(BuiltinKind::Bool);
    b.expr(StmtKind::BoolLiteral(value), ty)
}

pub fn int_lit(b: &mut TreeBuilder, value: i128) -> StmtId {
    let ty = b.builtin(BuiltinKind::Int);
    b.expr(StmtKind::IntegerLiteral(value), ty)
}

pub fn name_ref(b: &mut TreeBuilder, decl: DeclId, ty: QualType) -> StmtId {
    b.expr(
        StmtKind::DeclRef {
            decl,
            qualifier: None,
            template_args: Vec::new(),
        },
        ty,
    )
}

/// A function definition; members are linked to `parent`.
pub fn function(
    b: &mut TreeBuilder,
    parent: Option<DeclId>,
    mut data: FunctionDecl,
    name: &str,
    body: Option<StmtId>,
) -> DeclId {
    data.body = body;
    if body.is_some() {
        data.flags |= FunctionFlags::DEFINITION;
    }
    let access = if parent.is_some() {
        Access::Public
    } else {
        Access::None
    };
    let id = b.add_main_decl(Decl::new(DeclKind::Function(data), name).with_access(access));
    if let Some(parent) = parent {
        b.push_member(parent, id);
    }
    id
}

/// A method whose body is `return <value>;`.
pub fn returning_method(
    b: &mut TreeBuilder,
    parent: DeclId,
    name: &str,
    mut data: FunctionDecl,
    value: bool,
) -> DeclId {
    let value = bool_lit(b, value);
    let ret = ret(b, Some(value));
    let body = block(b, vec![ret]);
    data.kind = FunctionKind::Method;
    function(b, Some(parent), data, name, Some(body))
}
