//! Value/reference classification of C++ types.
//!
//! A D `class` is a reference type while a C++ class is a value type, so
//! the printer needs to know, for every type it renders, which side of
//! that line the translated type lands on.

use cpp2d_ir::{DeclKind, QualType, TagKind, TranslationUnit, TypeKind};


/// How values of a translated type behave in the target language.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Semantic {
    /// Copied on assignment (structs, scalars).
    Value,
    /// Handle to a heap object (classes, functions).
    Reference,
    /// Built-in associative array.
    AssocArray,
}

/// Library templates whose translation does not follow the class rule.
/// Matched as prefixes of the canonical spelling.
const KNOWN_TYPES: &[(&str, Semantic)] = &[
    ("class SafeInt<", Semantic::Value),
    ("class boost::array<", Semantic::Value),
    ("class std::basic_string<", Semantic::Value),
    ("class boost::optional<", Semantic::Value),
    ("class boost::property_tree::basic_ptree<", Semantic::Value),
    ("class std::vector<", Semantic::Value),
    ("class std::shared_ptr<", Semantic::Value),
    ("class std::scoped_ptr<", Semantic::Value),
    ("class std::unordered_map<", Semantic::AssocArray),
];

/// Classify `qt`. Pure: the same type always yields the same answer.
pub fn classify(unit: &TranslationUnit, qt: QualType) -> Semantic {
    let spelling = unit.canonical_spelling(qt);
    if let Some(semantic) = known_semantic(&spelling) {
        return semantic;
    }
    if let TypeKind::Auto { .. } = unit.type_kind(qt.ty) {
        return Semantic::Value;
    }
    if is_class(unit, qt) || is_function(unit, qt) {
        Semantic::Reference
    } else {
        Semantic::Value
    }
}

/// Table lookup on a canonical spelling.
pub fn known_semantic(spelling: &str) -> Option<Semantic> {
    KNOWN_TYPES
        .iter()
        .find(|(prefix, _)| spelling.starts_with(prefix))
        .map(|(_, semantic)| *semantic)
}

/// Record declared with the `class` keyword.
fn is_class(unit: &TranslationUnit, qt: QualType) -> bool {
    match unit.canonical_kind(qt) {
        TypeKind::Record(decl) => matches!(
            &unit.decl(*decl).kind,
            DeclKind::Record(record) if record.tag == TagKind::Class
        ),
        _ => false,
    }
}

fn is_function(unit: &TranslationUnit, qt: QualType) -> bool {
    matches!(unit.canonical_kind(qt), TypeKind::FunctionProto { .. })
}

/// Fixed-size array look-alike, rendered `T[N]`.
pub fn is_std_array(unit: &TranslationUnit, qt: QualType) -> bool {
    let spelling = unit.canonical_spelling(qt);
    spelling.starts_with("class std::array<") || spelling.starts_with("class boost::array<")
}

/// Hash map look-alike, rendered `V[K]`.
pub fn is_std_unordered_map(unit: &TranslationUnit, qt: QualType) -> bool {
    unit.canonical_spelling(qt)
        .starts_with("class std::unordered_map<")
}
