use super::*;

#[test]
fn invalid_is_default() {
    assert_eq!(DeclId::default(), DeclId::INVALID);
    assert!(!StmtId::INVALID.is_valid());
    assert!(TypeId::new(0).is_valid());
}

#[test]
fn debug_shows_index_or_sentinel() {
    assert_eq!(format!("{:?}", DeclId::new(7)), "DeclId(7)");
    assert_eq!(format!("{:?}", TemplateArgId::INVALID), "TemplateArgId::INVALID");
}

#[test]
fn ids_round_trip_their_index() {
    let id = StmtId::new(42);
    assert_eq!(id.index(), 42);
    assert_eq!(id.raw(), 42);
}

#[test]
fn next_index_follows_length() {
    assert_eq!(next_index(0), 0);
    assert_eq!(next_index(12), 12);
}
