use pretty_assertions::assert_eq;

use crate::{
    BuiltinKind, Decl, DeclKind, QualType, RecordDecl, RecordTemplate, SourceLoc,
    SpecializationKind, TagKind, TreeBuilder, TypeKind,
};

fn vector_of_int(b: &mut TreeBuilder) -> QualType {
    let int = b.builtin(BuiltinKind::Int);
    let template = b.add_decl(
        Decl::new(
            DeclKind::ClassTemplate {
                params: Vec::new(),
                pattern: crate::DeclId::INVALID,
            },
            "vector",
        )
        .with_qualified_name("std::vector"),
    );
    let arg = b.type_arg(int);
    let mut record = RecordDecl::new(TagKind::Class);
    record.template = RecordTemplate::Specialization {
        template,
        args: vec![arg],
        kind: SpecializationKind::ImplicitInstantiation,
        partial: None,
    };
    let spec = b.add_decl(
        Decl::new(DeclKind::Record(record), "vector").with_qualified_name("std::vector"),
    );
    b.record_type(spec)
}

#[test]
fn canonical_spelling_sees_through_typedefs() {
    let mut b = TreeBuilder::new("src/demo.cpp");
    let vec = vector_of_int(&mut b);
    let alias = b.add_decl(Decl::new(DeclKind::Typedef { underlying: vec }, "IntVec"));
    let alias_ty = QualType::constant(b.intern(TypeKind::Typedef(alias)));
    let unit = b.finish(Vec::new());

    assert_eq!(unit.canonical_spelling(alias_ty), "class std::vector<int>");
    assert!(unit.canonical_type(alias_ty).is_const);
}

#[test]
fn nested_specializations_get_a_space_before_closing() {
    let mut b = TreeBuilder::new("demo.cpp");
    let inner = vector_of_int(&mut b);
    let template = b.add_decl(Decl::new(DeclKind::Empty, "box").with_qualified_name("lib::box"));
    let arg = b.type_arg(inner);
    let mut record = RecordDecl::new(TagKind::Struct);
    record.template = RecordTemplate::Specialization {
        template,
        args: vec![arg],
        kind: SpecializationKind::ImplicitInstantiation,
        partial: None,
    };
    let outer = b.add_decl(Decl::new(DeclKind::Record(record), "box").with_qualified_name("lib::box"));
    let ty = b.record_type(outer);
    let unit = b.finish(Vec::new());

    assert_eq!(
        unit.canonical_spelling(ty),
        "struct lib::box<class std::vector<int> >"
    );
}

#[test]
fn pointer_queries() {
    let mut b = TreeBuilder::new("demo.cpp");
    let int = b.builtin(BuiltinKind::Int);
    let ptr = b.pointer(int);
    let r = b.lvalue_ref(int);
    let unit = b.finish(Vec::new());

    assert!(unit.is_pointer(ptr));
    assert!(!unit.is_pointer(r));
    assert!(unit.has_pointer_representation(r));
    assert_eq!(unit.pointee(ptr), Some(int));
    assert_eq!(unit.non_reference(r), int);
    assert_eq!(unit.canonical_spelling(ptr), "int *");
}

#[test]
fn main_file_membership_uses_the_stem() {
    let mut b = TreeBuilder::new("/work/demo.cpp");
    let local = b.add_main_decl(Decl::new(DeclKind::Empty, "a"));
    let header = b.add_decl(Decl::new(DeclKind::Empty, "b").with_file("/work/demo.h"));
    let other = b.add_decl(Decl::new(DeclKind::Empty, "c").with_file("/work/other.h"));
    let unit = b.finish(vec![local, header, other]);

    assert_eq!(unit.module_name(), "demo");
    assert!(unit.is_in_main_file(local));
    assert!(unit.is_in_main_file(header));
    assert!(!unit.is_in_main_file(other));
}

#[test]
fn text_between_respects_location_kinds() {
    let mut b = TreeBuilder::new("demo.cpp");
    b.set_source("int a; // note\nint b;");
    let unit = b.finish(Vec::new());

    assert_eq!(
        unit.text_between(SourceLoc::File(6), SourceLoc::File(15)),
        Some(" // note\n")
    );
    assert_eq!(unit.text_between(SourceLoc::Macro(0), SourceLoc::File(3)), None);
    assert_eq!(unit.text_between(SourceLoc::File(3), SourceLoc::Invalid), None);
    assert_eq!(unit.text_between(SourceLoc::File(9), SourceLoc::File(2)), Some(""));
}

#[test]
fn canonical_decl_defaults_to_self() {
    let mut b = TreeBuilder::new("demo.cpp");
    let first = b.add_decl(Decl::new(DeclKind::Empty, "f"));
    let second = b.add_decl(Decl::new(DeclKind::Empty, "f").with_canonical(first));
    let unit = b.finish(Vec::new());

    assert_eq!(unit.canonical_decl(first), first);
    assert_eq!(unit.canonical_decl(second), first);
}
