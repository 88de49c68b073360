#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
//! Whole-unit translation: top-level framing, comments, imports and the
//! statement forms of function bodies.

mod common;

use common::{
    block, bool_lit, field, function, int_lit, name_ref, param, record, ret, translate,
    translate_with, MAIN,
};
use cpp2d_codegen::{DiagnosticCode, IncludeSet, NoOverrides};
use cpp2d_ir::{
    BinaryOp, BuiltinKind, Decl, DeclId, DeclKind, EnumDecl, FunctionDecl, FunctionKind,
    Linkage, MacroArg, MacroMarker, QualType, RawComment, RecordDecl, SourceLoc, SourceRange,
    Stmt, StmtKind, TagKind, TreeBuilder, TypeKind, VarDecl,
};
use pretty_assertions::assert_eq;

fn typedef(b: &mut TreeBuilder, name: &str, kind: BuiltinKind) -> DeclId {
    let underlying = b.builtin(kind);
    b.add_main_decl(Decl::new(DeclKind::Typedef { underlying }, name))
}

#[test]
fn typedefs_carry_their_comments() {
    let mut b = TreeBuilder::new(MAIN);
    let id = typedef(&mut b, "Id", BuiltinKind::Int);
    b.decl_mut(id).comment = Some(RawComment::leading("/// identifier"));
    let count = typedef(&mut b, "Count", BuiltinKind::UInt);
    b.decl_mut(count).comment = Some(RawComment::trailing("// how many"));
    let unit = b.finish(vec![id, count]);

    assert_eq!(
        translate(&unit).code,
        "\n/// identifier\nalias Id = int;\n\n\nalias Count = uint;\t// how many\n\n"
    );
}

#[test]
fn only_declarations_of_the_main_file_are_printed() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let foreign = b.add_decl(
        Decl::new(DeclKind::Typedef { underlying: int }, "Foreign").with_file("include/other.h"),
    );
    let header = b.add_decl(
        Decl::new(DeclKind::Typedef { underlying: int }, "Own").with_file("include/demo.h"),
    );
    let unit = b.finish(vec![foreign, header]);

    assert_eq!(translate(&unit).code, "\nalias Own = int;\n\n");
}

#[test]
fn namespaces_flatten_between_markers() {
    let mut b = TreeBuilder::new(MAIN);
    let id = typedef(&mut b, "Id", BuiltinKind::Int);
    let util = b.add_main_decl(Decl::new(DeclKind::Namespace { decls: vec![id] }, "util"));
    let unit = b.finish(vec![util]);

    assert_eq!(
        translate(&unit).code,
        "\n// -> module util;\n\nalias Id = int;\n\n// <- module util end\n\n\n"
    );
}

#[test]
fn enums_list_one_enumerator_per_line() {
    let mut b = TreeBuilder::new(MAIN);
    let color = b.reserve_decl();
    let color_ty = QualType::new(b.intern(TypeKind::Enum(color)));
    let red = b.add_decl(Decl::new(
        DeclKind::Enumerator {
            ty: color_ty,
            init: None,
        },
        "Red",
    ));
    let two = int_lit(&mut b, 2);
    let green = b.add_decl(Decl::new(
        DeclKind::Enumerator {
            ty: color_ty,
            init: Some(two),
        },
        "Green",
    ));
    b.define_decl(
        color,
        Decl::new(
            DeclKind::Enum(EnumDecl {
                fixed: None,
                enumerators: vec![red, green],
            }),
            "Color",
        )
        .with_file(MAIN),
    );
    let unit = b.finish(vec![color]);

    assert_eq!(
        translate(&unit).code,
        "\nenum Color\n{\n    Red,\n    Green = 2,\n}\n\n"
    );
}

#[test]
fn function_parameters_go_on_their_own_lines() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let a = param(&mut b, "a", int);
    let c = param(&mut b, "b", int);
    let lhs = name_ref(&mut b, a, int);
    let rhs = name_ref(&mut b, c, int);
    let sum = b.expr(
        StmtKind::Binary {
            op: BinaryOp::Add,
            lhs,
            rhs,
        },
        int,
    );
    let ret = ret(&mut b, Some(sum));
    let body = block(&mut b, vec![ret]);
    let mut add = FunctionDecl::new(FunctionKind::Free, int);
    add.params = vec![a, c];
    let add = function(&mut b, None, add, "add", Some(body));
    let unit = b.finish(vec![add]);

    assert_eq!(
        translate(&unit).code,
        "\nint add(\n    int a,\n    int b)\n{\n    return a + b;\n}\n\n"
    );
}

#[test]
fn branches_and_loops_indent_single_statements() {
    let mut b = TreeBuilder::new(MAIN);
    let void = b.builtin(BuiltinKind::Void);

    let cond = bool_lit(&mut b, true);
    let then = ret(&mut b, None);
    let brk = b.add_stmt(Stmt::new(StmtKind::Break));
    let otherwise = block(&mut b, vec![brk]);
    let branch = b.add_stmt(Stmt::new(StmtKind::If {
        cond,
        then,
        otherwise: Some(otherwise),
    }));

    let cond = bool_lit(&mut b, false);
    let cont = b.add_stmt(Stmt::new(StmtKind::Continue));
    let lp = b.add_stmt(Stmt::new(StmtKind::While { cond, body: cont }));

    let body = block(&mut b, vec![branch, lp]);
    let f = function(
        &mut b,
        None,
        FunctionDecl::new(FunctionKind::Free, void),
        "f",
        Some(body),
    );
    let unit = b.finish(vec![f]);

    assert_eq!(
        translate(&unit).code,
        "\nvoid f()\n{\n    if(true)\n        return;\n    else \n    {\n        break;\n    }\n    while(false)\n        continue;\n}\n\n"
    );
}

#[test]
fn comments_between_statements_are_kept() {
    let source = "void f() {\n    1; // one\n    2;\n}\n";
    let offset = |needle: &str| u32::try_from(source.find(needle).unwrap()).unwrap();

    let mut b = TreeBuilder::new(MAIN);
    b.set_source(source);
    let void = b.builtin(BuiltinKind::Void);
    let one = int_lit(&mut b, 1);
    b.stmt_mut(one).range = SourceRange::file(offset("1;"), offset("1;") + 1);
    let two = int_lit(&mut b, 2);
    b.stmt_mut(two).range = SourceRange::file(offset("2;"), offset("2;") + 1);
    let body = b.add_stmt(Stmt::new(StmtKind::Compound {
        body: vec![one, two],
        lbrace: SourceLoc::File(offset("{")),
        rbrace: SourceLoc::File(offset("}")),
    }));
    let f = function(
        &mut b,
        None,
        FunctionDecl::new(FunctionKind::Free, void),
        "f",
        Some(body),
    );
    let unit = b.finish(vec![f]);

    assert_eq!(
        translate(&unit).code,
        "\nvoid f()\n{ \n    1; // one\n    2; \n}\n\n"
    );
}

#[test]
fn linkage_blocks_keep_their_declarations() {
    let mut b = TreeBuilder::new(MAIN);
    let void = b.builtin(BuiltinKind::Void);
    let f = b.add_decl(Decl::new(
        DeclKind::Function(FunctionDecl::new(FunctionKind::Free, void)),
        "f",
    ));
    let linkage = b.add_main_decl(Decl::new(
        DeclKind::LinkageSpec {
            language: Linkage::C,
            braces: true,
            decls: vec![f],
        },
        "",
    ));
    let unit = b.finish(vec![linkage]);

    assert_eq!(
        translate(&unit).code,
        "\nextern (C) \n{\n    void f();\n};\n\n"
    );
}

#[test]
fn included_declarations_become_imports() {
    let mut b = TreeBuilder::new(MAIN);
    let thing = b.add_decl(
        Decl::new(
            DeclKind::Record(RecordDecl::new(TagKind::Class)),
            "Thing",
        )
        .with_file("/usr/include/lib/thing.h"),
    );
    let thing_ty = b.record_type(thing);
    let thing_ptr = b.pointer(thing_ty);
    let (holder, _) = record(&mut b, TagKind::Struct, "Holder");
    field(&mut b, holder, "a", thing_ty);
    field(&mut b, holder, "b", thing_ptr);
    let unit = b.finish(vec![thing, holder]);

    let includes: IncludeSet = ["lib/thing.h"].into_iter().collect();
    let out = translate_with(&unit, &includes, &NoOverrides);
    assert_eq!(
        out.code,
        "\nstruct Holder\n{\n    Thing a = new Thing;\n    Thing b;\n}\n\n"
    );
    assert_eq!(out.imports.len(), 1);
    assert_eq!(out.render_imports(), "import lib.thing; //Thing \n");
}

#[test]
fn macro_expansions_collapse_to_a_mixin() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let thing = b.add_decl(
        Decl::new(
            DeclKind::Record(RecordDecl::new(TagKind::Class)),
            "Thing",
        )
        .with_file("/usr/include/lib/thing.h"),
    );
    let thing_ty = b.record_type(thing);
    let begin = b.add_main_decl(Decl::new(
        DeclKind::MacroMarker(MacroMarker::Begin {
            name: "DECLARE".into(),
            args: vec![MacroArg::Name("x".into())],
        }),
        "",
    ));
    let hidden = b.add_main_decl(Decl::new(DeclKind::Var(VarDecl::new(thing_ty)), "x"));
    let end = b.add_main_decl(Decl::new(DeclKind::MacroMarker(MacroMarker::End), ""));
    let shown = b.add_main_decl(Decl::new(DeclKind::Var(VarDecl::new(int)), "shown"));
    let unit = b.finish(vec![begin, hidden, end, shown]);

    let includes: IncludeSet = ["lib/thing.h"].into_iter().collect();
    let out = translate_with(&unit, &includes, &NoOverrides);
    assert_eq!(out.code, "\nmixin(DECLARE!(q{x}));\n\n\nint shown;\n\n");
    assert!(out.imports.is_empty());
}

#[test]
fn unsupported_declarations_leave_a_placeholder() {
    let mut b = TreeBuilder::new(MAIN);
    let foo = b.add_main_decl(Decl::new(
        DeclKind::Unsupported { kind: "Foo".into() },
        "",
    ));
    let unit = b.finish(vec![foo]);

    let out = translate(&unit);
    assert_eq!(out.code, "\n/*Foo Decl*/;\n\n");
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].code, DiagnosticCode::T1001);
    assert_eq!(out.error_count(), 0);
}
