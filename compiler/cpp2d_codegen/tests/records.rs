#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
//! Record translation through the public entry point.
//!
//! Each test builds a small unit, translates it and compares the full
//! module body, so the framing around members is covered as well.

mod common;

use common::{
    bool_lit, block, field, field_with, function, int_lit, name_ref, param, record, ret,
    returning_method, translate, translate_with, MAIN,
};
use cpp2d_codegen::{DiagnosticCode, IncludeSet, MatchOverrides};
use cpp2d_ir::{
    Access, BaseSpec, BitWidth, BuiltinKind, CtorInit, CtorInitTarget, DeclId, DeclKind,
    FunctionDecl, FunctionFlags, FunctionKind, MemberName, OverloadedOperator, QualType, StmtKind,
    TagKind, TreeBuilder,
};
use pretty_assertions::assert_eq;

fn bitfield(b: &mut TreeBuilder, record: DeclId, name: &str, width: u32, access: Access) {
    let uint = b.builtin(BuiltinKind::UInt);
    let id = field_with(b, record, name, uint, access);
    let expr = int_lit(b, i128::from(width));
    if let DeclKind::Field(data) = &mut b.decl_mut(id).kind {
        data.bit_width = Some(BitWidth { expr, value: width });
    }
}

#[test]
fn struct_fields_keep_their_initializers() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let (point, _) = record(&mut b, TagKind::Struct, "Point");
    field(&mut b, point, "x", int);
    let y = field(&mut b, point, "y", int);
    let zero = int_lit(&mut b, 0);
    if let DeclKind::Field(data) = &mut b.decl_mut(y).kind {
        data.init = Some(zero);
    }
    let unit = b.finish(vec![point]);

    let out = translate(&unit);
    assert_eq!(out.code, "\nstruct Point\n{\n    int x;\n    int y = 0;\n}\n\n");
    assert!(out.diagnostics.is_empty());
}

#[test]
fn class_fields_are_allocated_and_pointers_flattened() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let int_ptr = b.pointer(int);
    let (_, widget_ty) = record(&mut b, TagKind::Class, "Widget");
    let (holder, _) = record(&mut b, TagKind::Struct, "Holder");
    field(&mut b, holder, "values", int_ptr);
    field(&mut b, holder, "owner", widget_ty);
    let unit = b.finish(vec![holder]);

    assert_eq!(
        translate(&unit).code,
        "\nstruct Holder\n{\n    int[] values;\n    Widget owner = new Widget;\n}\n\n"
    );
}

#[test]
fn visibility_labels_are_written_on_change() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let (widget, _) = record(&mut b, TagKind::Class, "Widget");
    field_with(&mut b, widget, "a", int, Access::Private);
    field_with(&mut b, widget, "b", int, Access::Public);
    field_with(&mut b, widget, "c", int, Access::Public);
    let unit = b.finish(vec![widget]);

    assert_eq!(
        translate(&unit).code,
        "\nclass Widget\n{\n    int a;\npublic:\n    int b;\n    int c;\n}\n\n"
    );
}

#[test]
fn bitfield_runs_are_packed_and_padded() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let (flags, _) = record(&mut b, TagKind::Struct, "Flags");
    bitfield(&mut b, flags, "a", 3, Access::Public);
    bitfield(&mut b, flags, "b", 4, Access::Public);
    field(&mut b, flags, "c", int);
    let unit = b.finish(vec![flags]);

    let out = translate(&unit);
    assert_eq!(
        out.code,
        "\nstruct Flags\n{\n    mixin(bitfields!(\n    \tuint, \"a\", 3,\n    \tuint, \"b\", 4,\n    \tuint, \"\", 1));\n    int c;\n}\n\n"
    );
    assert!(out.imports.contains("std.bitmanip"));
}

#[test]
fn bitfield_run_closes_before_a_visibility_label() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let (flags, _) = record(&mut b, TagKind::Struct, "Flags");
    bitfield(&mut b, flags, "a", 3, Access::Public);
    bitfield(&mut b, flags, "b", 4, Access::Public);
    field_with(&mut b, flags, "c", int, Access::Private);
    let unit = b.finish(vec![flags]);

    assert_eq!(
        translate(&unit).code,
        "\nstruct Flags\n{\n    mixin(bitfields!(\n    \tuint, \"a\", 3,\n    \tuint, \"b\", 4,\n    \tuint, \"\", 1));\nprivate:\n    int c;\n}\n\n"
    );
}

#[test]
fn visibility_change_inside_a_bitfield_run_splits_it() {
    let mut b = TreeBuilder::new(MAIN);
    let (flags, _) = record(&mut b, TagKind::Struct, "Flags");
    bitfield(&mut b, flags, "a", 3, Access::Public);
    bitfield(&mut b, flags, "b", 4, Access::Private);
    let unit = b.finish(vec![flags]);

    assert_eq!(
        translate(&unit).code,
        "\nstruct Flags\n{\n    mixin(bitfields!(\n    \tuint, \"a\", 3,\n    \tuint, \"\", 5));\nprivate:\n    mixin(bitfields!(\n    \tuint, \"b\", 4,\n    \tuint, \"\", 4));\n}\n\n"
    );
}

#[test]
fn bitfield_run_closing_the_body_needs_no_padding_at_a_byte() {
    let mut b = TreeBuilder::new(MAIN);
    let ubyte = b.builtin(BuiltinKind::UChar);
    let (flags, _) = record(&mut b, TagKind::Struct, "Byte");
    let id = field(&mut b, flags, "bits", ubyte);
    let expr = int_lit(&mut b, 8);
    if let DeclKind::Field(data) = &mut b.decl_mut(id).kind {
        data.bit_width = Some(BitWidth { expr, value: 8 });
    }
    let unit = b.finish(vec![flags]);

    assert_eq!(
        translate(&unit).code,
        "\nstruct Byte\n{\n    mixin(bitfields!(\n    \tubyte, \"bits\", 8,\n    ));\n}\n\n"
    );
}

#[test]
fn constructor_initializers_become_assignments() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let void = b.builtin(BuiltinKind::Void);
    let (counter, _) = record(&mut b, TagKind::Class, "Counter");
    let count = field_with(&mut b, counter, "count", int, Access::Private);

    let start = param(&mut b, "start", int);
    let start_ref = name_ref(&mut b, start, int);
    let mut ctor = FunctionDecl::new(
        FunctionKind::Constructor {
            inits: vec![CtorInit {
                target: CtorInitTarget::Member(count),
                init: start_ref,
                written: true,
            }],
        },
        void,
    );
    ctor.params = vec![start];
    let body = block(&mut b, Vec::new());
    function(&mut b, Some(counter), ctor, "Counter", Some(body));

    let member = b.expr(
        StmtKind::Member {
            base: None,
            name: MemberName::Identifier("count".into()),
            template_args: Vec::new(),
        },
        int,
    );
    let ret = ret(&mut b, Some(member));
    let body = block(&mut b, vec![ret]);
    let mut get = FunctionDecl::new(FunctionKind::Method, int);
    get.flags = FunctionFlags::CONST;
    function(&mut b, Some(counter), get, "get", Some(body));
    let unit = b.finish(vec![counter]);

    let out = translate(&unit);
    assert_eq!(
        out.code,
        "\nclass Counter\n{\n    int count;\npublic:\n    this(int start)\n    {\n        count = start;\n    }\n    final int get()\n    {\n        return count;\n    }\n}\n\n"
    );
    assert!(out.diagnostics.is_empty());
}

#[test]
fn comparison_operators_synthesize_op_cmp() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let bool_ty = b.builtin(BuiltinKind::Bool);
    let (version, version_ty) = record(&mut b, TagKind::Struct, "Version");
    let operand = b.lvalue_ref(QualType::constant(version_ty.ty));
    field(&mut b, version, "major", int);

    for (op, name) in [
        (OverloadedOperator::Less, "operator<"),
        (OverloadedOperator::EqualEqual, "operator=="),
        (OverloadedOperator::ExclaimEqual, "operator!="),
    ] {
        let o = param(&mut b, "o", operand);
        let mut method = FunctionDecl::new(FunctionKind::Method, bool_ty);
        method.operator = Some(op);
        method.params = vec![o];
        method.flags = FunctionFlags::CONST;
        returning_method(&mut b, version, name, method, true);
    }
    let unit = b.finish(vec![version]);

    assert_eq!(
        translate(&unit).code,
        "\nstruct Version\n{\n    int major;\n    bool _opLess(Version o)\n    {\n        return true;\n    }\n    bool opEquals(Version o)\n    {\n        return true;\n    }\n    int opCmp(ref in Version other)\n    {\n        return _opLess(other) ? -1: ((this == other)? 0: 1);\n    }\n}\n\n"
    );
}

#[test]
fn negation_without_bool_conversion_synthesizes_op_cast() {
    let mut b = TreeBuilder::new(MAIN);
    let bool_ty = b.builtin(BuiltinKind::Bool);
    let (handle, _) = record(&mut b, TagKind::Struct, "Handle");
    let mut method = FunctionDecl::new(FunctionKind::Method, bool_ty);
    method.operator = Some(OverloadedOperator::Exclaim);
    method.flags = FunctionFlags::CONST;
    returning_method(&mut b, handle, "operator!", method, false);
    let unit = b.finish(vec![handle]);

    assert_eq!(
        translate(&unit).code,
        "\nstruct Handle\n{\n    bool _opExclaim()\n    {\n        return false;\n    }\n    bool opCast(T : bool)()\n    {\n        return !_opExclaim();\n    }\n}\n\n"
    );
}

#[test]
fn free_operator_moves_into_its_left_operand() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let bool_ty = b.builtin(BuiltinKind::Bool);
    let (point, point_ty) = record(&mut b, TagKind::Struct, "Point");
    field(&mut b, point, "x", int);
    let operand = b.lvalue_ref(QualType::constant(point_ty.ty));

    let a = param(&mut b, "a", operand);
    let rhs = param(&mut b, "b", operand);
    let value = bool_lit(&mut b, true);
    let ret = ret(&mut b, Some(value));
    let body = block(&mut b, vec![ret]);
    let mut equal = FunctionDecl::new(FunctionKind::Free, bool_ty);
    equal.operator = Some(OverloadedOperator::EqualEqual);
    equal.params = vec![a, rhs];
    let equal = function(&mut b, None, equal, "operator==", Some(body));
    let unit = b.finish(vec![point, equal]);

    let overrides = MatchOverrides::from_unit(&unit);
    let out = translate_with(&unit, &IncludeSet::new(), &overrides);
    assert_eq!(
        out.code,
        "\nstruct Point\n{\n    int x;\n    bool opEquals(Point b)\n    {\n        alias a = this;\n        return true;\n    }\n}\n\n"
    );
}

#[test]
fn free_operator_with_a_distinct_right_operand_moves_into_both() {
    let mut b = TreeBuilder::new(MAIN);
    let int = b.builtin(BuiltinKind::Int);
    let (point, point_ty) = record(&mut b, TagKind::Struct, "Point");
    field(&mut b, point, "x", int);
    let (offset, offset_ty) = record(&mut b, TagKind::Struct, "Offset");
    field(&mut b, offset, "dx", int);

    let p = param(&mut b, "p", point_ty);
    let o = param(&mut b, "o", offset_ty);
    let value = name_ref(&mut b, p, point_ty);
    let ret = ret(&mut b, Some(value));
    let body = block(&mut b, vec![ret]);
    let mut plus = FunctionDecl::new(FunctionKind::Free, point_ty);
    plus.operator = Some(OverloadedOperator::Plus);
    plus.params = vec![p, o];
    let plus = function(&mut b, None, plus, "operator+", Some(body));
    let unit = b.finish(vec![point, offset, plus]);

    let overrides = MatchOverrides::from_unit(&unit);
    let out = translate_with(&unit, &IncludeSet::new(), &overrides);
    assert_eq!(
        out.code,
        "\nstruct Point\n{\n    int x;\n    Point opBinary(string op: \"+\")(Offset o)\n    {\n        alias p = this;\n        return p;\n    }\n}\n\n\nstruct Offset\n{\n    int dx;\n    Point opBinaryRight(string op: \"+\")(Point p)\n    {\n        alias o = this;\n        return p;\n    }\n}\n\n"
    );
}

#[test]
fn restricted_bases_and_copyable_classes_are_reported() {
    let mut b = TreeBuilder::new(MAIN);
    let (_, base_ty) = record(&mut b, TagKind::Class, "Base");
    let (derived, _) = record(&mut b, TagKind::Class, "Derived");
    if let DeclKind::Record(data) = &mut b.decl_mut(derived).kind {
        data.has_implicit_copy_ctor = true;
        data.bases.push(BaseSpec {
            ty: base_ty,
            access: Access::Protected,
            is_virtual: false,
        });
    }
    let unit = b.finish(vec![derived]);

    let out = translate(&unit);
    assert_eq!(out.code, "\nclass Derived : /*protected*/ Base\n{\n}\n\n");
    let codes: Vec<_> = out.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![DiagnosticCode::T2002, DiagnosticCode::T2001]);
    assert_eq!(out.error_count(), 2);
}

#[test]
fn virtual_struct_methods_are_reported() {
    let mut b = TreeBuilder::new(MAIN);
    let void = b.builtin(BuiltinKind::Void);
    let (shape, _) = record(&mut b, TagKind::Struct, "Shape");
    let body = block(&mut b, Vec::new());
    let mut draw = FunctionDecl::new(FunctionKind::Method, void);
    draw.flags = FunctionFlags::VIRTUAL;
    function(&mut b, Some(shape), draw, "draw", Some(body));
    let unit = b.finish(vec![shape]);

    let out = translate(&unit);
    assert_eq!(
        out.code,
        "\nstruct Shape\n{\n    virtual void draw()\n    {\n    }\n}\n\n"
    );
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].code, DiagnosticCode::T2004);
}
