use cpp2d_ir::DeclId;

use super::*;

fn names(id: DeclId) -> &'static str {
    match id.raw() {
        0 => "T",
        1 => "U",
        2 => "T",
        3 => "V",
        _ => "",
    }
}

#[test]
fn only_colliding_params_are_renamed() {
    let primary = [DeclId::new(0), DeclId::new(1)];
    let extra = [DeclId::new(2), DeclId::new(3), DeclId::new(4)];
    let mut renames = RenameTable::new();
    renames.push_scope();
    renames.register_collisions(&primary, &extra, names);

    assert_eq!(renames.lookup(DeclId::new(2)), Some("T_"));
    assert_eq!(renames.lookup(DeclId::new(3)), None);
    assert_eq!(renames.lookup(DeclId::new(4)), None);
    // primary parameters keep their names
    assert_eq!(renames.lookup(DeclId::new(0)), None);
}

#[test]
fn renames_end_with_their_scope() {
    let mut renames = RenameTable::new();
    renames.push_scope();
    renames.register_collisions(&[DeclId::new(0)], &[DeclId::new(2)], names);
    renames.push_scope();
    assert_eq!(renames.lookup(DeclId::new(2)), Some("T_"));
    renames.pop_scope();
    renames.pop_scope();
    assert_eq!(renames.lookup(DeclId::new(2)), None);
    assert_eq!(renames.depth(), 0);
}

#[test]
fn positional_resolution() {
    let mut scopes = TemplateScopes::new();
    scopes.push(vec![DeclId::new(5), DeclId::new(6)]);
    assert_eq!(scopes.resolve(0, 1), Ok(DeclId::new(6)));
    assert_eq!(scopes.resolve(0, 2), Err(Unresolved::Index(2)));
    assert_eq!(scopes.resolve(1, 0), Err(Unresolved::Depth(1)));
    scopes.pop();
    assert_eq!(scopes.resolve(0, 0), Err(Unresolved::Depth(0)));
}
