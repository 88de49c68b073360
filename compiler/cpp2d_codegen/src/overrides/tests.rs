use cpp2d_ir::{
    BuiltinKind, Decl, DeclId, DeclKind, FunctionDecl, FunctionKind, OverloadedOperator,
    ParamDecl, QualType, RecordDecl, RecordTemplate, SpecializationKind, StmtId, TagKind,
    TreeBuilder,
};
use pretty_assertions::assert_eq;

use super::*;

fn param(b: &mut TreeBuilder, name: &str, ty: QualType) -> DeclId {
    b.add_decl(Decl::new(
        DeclKind::Param(ParamDecl { ty, default: None }),
        name,
    ))
}

fn free_operator(
    b: &mut TreeBuilder,
    op: OverloadedOperator,
    params: Vec<DeclId>,
) -> DeclId {
    let bool_ty = b.builtin(BuiltinKind::Bool);
    let mut function = FunctionDecl::new(FunctionKind::Free, bool_ty);
    function.operator = Some(op);
    function.params = params;
    b.add_main_decl(Decl::new(
        DeclKind::Function(function),
        format!("operator{}", op.spelling()),
    ))
}

#[test]
fn no_overrides_is_empty() {
    let table = NoOverrides;
    assert!(table.decl(DeclId::new(0)).is_none());
    assert!(table.stmt(StmtId::new(0)).is_none());
    assert!(table.free_operators(DeclId::new(0)).is_empty());
}

#[test]
fn registered_callbacks_are_found_by_id() {
    let mut map = OverrideMap::new();
    assert!(map.is_empty());
    map.on_decl(DeclId::new(3), |printer, _| printer.write("x"));
    map.suppress_decl(DeclId::new(4));
    assert!(!map.is_empty());
    assert!(map.decl(DeclId::new(3)).is_some());
    assert!(map.decl(DeclId::new(4)).is_some());
    assert!(map.decl(DeclId::new(5)).is_none());
    assert!(map.stmt(StmtId::new(3)).is_none());
}

#[test]
fn free_operators_move_into_their_operands() {
    let mut b = TreeBuilder::new("demo.cpp");
    let point = b.add_main_decl(Decl::new(
        DeclKind::Record(RecordDecl::new(TagKind::Struct)),
        "Point",
    ));
    let point_ty = b.record_type(point);
    let point_ref = b.lvalue_ref(QualType::constant(point_ty.ty));
    let offset = b.add_main_decl(Decl::new(
        DeclKind::Record(RecordDecl::new(TagKind::Struct)),
        "Offset",
    ));
    let offset_ty = b.record_type(offset);

    let lhs = param(&mut b, "a", point_ref);
    let rhs = param(&mut b, "b", point_ref);
    let equal = free_operator(&mut b, OverloadedOperator::EqualEqual, vec![lhs, rhs]);

    let lhs = param(&mut b, "p", point_ty);
    let rhs = param(&mut b, "o", offset_ty);
    let plus = free_operator(&mut b, OverloadedOperator::Plus, vec![lhs, rhs]);

    let size = param(&mut b, "size", point_ty);
    let new = free_operator(&mut b, OverloadedOperator::New, vec![size]);
    let unit = b.finish(Vec::new());

    let overrides = MatchOverrides::from_unit(&unit);
    assert_eq!(overrides.free_operators(point), &[equal, plus]);
    assert!(overrides.free_operators_right(point).is_empty());
    assert_eq!(overrides.free_operators_right(offset), &[plus]);
    assert!(overrides.free_operators(offset).is_empty());

    assert!(overrides.decl(equal).is_some());
    assert!(overrides.decl(plus).is_some());
    assert!(overrides.decl(new).is_none());
}

#[test]
fn hash_specializations_are_suppressed() {
    let mut b = TreeBuilder::new("demo.cpp");
    let point = b.add_main_decl(Decl::new(
        DeclKind::Record(RecordDecl::new(TagKind::Struct)),
        "Point",
    ));
    let point_ty = b.record_type(point);
    let template = b.add_decl(
        Decl::new(
            DeclKind::ClassTemplate {
                params: Vec::new(),
                pattern: DeclId::INVALID,
            },
            "hash",
        )
        .with_qualified_name("std::hash"),
    );
    let arg = b.type_arg(point_ty);
    let specialization = |with_call: bool, b: &mut TreeBuilder| {
        let mut data = RecordDecl::new(TagKind::Struct);
        data.template = RecordTemplate::Specialization {
            template,
            args: vec![arg],
            kind: SpecializationKind::ExplicitSpecialization,
            partial: None,
        };
        let id = b.add_main_decl(
            Decl::new(DeclKind::Record(data), "hash").with_qualified_name("std::hash"),
        );
        if with_call {
            let size_t = b.builtin(BuiltinKind::ULong);
            let mut call = FunctionDecl::new(FunctionKind::Method, size_t);
            call.operator = Some(OverloadedOperator::Call);
            let call = b.add_decl(Decl::new(DeclKind::Function(call), "operator()"));
            b.push_member(id, call);
        }
        id
    };
    let hasher = specialization(true, &mut b);
    let empty = specialization(false, &mut b);
    let unit = b.finish(Vec::new());

    let overrides = MatchOverrides::from_unit(&unit);
    assert!(overrides.decl(hasher).is_some());
    assert!(overrides.decl(empty).is_none());
    assert!(overrides.decl(point).is_none());
}

#[test]
fn extra_overrides_stack_on_the_built_in_ones() {
    let unit = TreeBuilder::new("demo.cpp").finish(Vec::new());
    let mut overrides = MatchOverrides::from_unit(&unit);
    assert!(overrides.decl(unit.root()).is_none());
    overrides.map_mut().suppress_decl(unit.root());
    assert!(overrides.decl(unit.root()).is_some());
}
