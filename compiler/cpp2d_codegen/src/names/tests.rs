use pretty_assertions::assert_eq;

use super::*;

#[test]
fn reserved_words_get_suffix() {
    assert_eq!(mangle_name("version"), "version_");
    assert_eq!(mangle_name("Exception"), "Exception_");
    assert_eq!(mangle_name("function"), "function_");
    assert_eq!(mangle_name("value"), "value");
    assert_eq!(mangle_name("exception"), "exception");
}

#[test]
fn anonymous_names() {
    assert_eq!(anonymous_name(12), "var12");
}

#[test]
fn remap_with_module() {
    assert_eq!(
        remap_type("std::set"),
        Some(RemappedType {
            module: Some("std.container.rbtree"),
            symbol: "RedBlackTree",
        })
    );
    assert_eq!(
        remap_type("uint8_t"),
        Some(RemappedType {
            module: Some("core.stdc.stdint"),
            symbol: "uint8_t",
        })
    );
}

#[test]
fn remap_builtin_target() {
    assert_eq!(
        remap_type("std::string"),
        Some(RemappedType {
            module: None,
            symbol: "string",
        })
    );
    assert_eq!(remap_type("std::list"), None);
}

#[test]
fn include_normalization() {
    assert_eq!(include_to_module("Foo/Bar.hpp"), "foo.bar");
    assert_eq!(include_to_module("util\\Strings.h"), "util.strings");
    assert_eq!(include_to_module("vector"), "vector");
}

#[test]
fn include_match_needs_path_boundary() {
    let includes: IncludeSet = ["bar.h", "lib/util.hpp"].into_iter().collect();
    assert_eq!(includes.module_for("/src/bar.h").as_deref(), Some("bar"));
    assert_eq!(includes.module_for("bar.h").as_deref(), Some("bar"));
    assert_eq!(includes.module_for("/src/foobar.h"), None);
    assert_eq!(
        includes.module_for("C:\\proj\\lib/util.hpp").as_deref(),
        Some("lib.util")
    );
    assert_eq!(includes.module_for("/src/bar.hpp"), None);
}

#[test]
fn imports_are_deduplicated_and_ordered() {
    let mut imports = ImportSet::new();
    imports.add("std.range.primitives", "popFront");
    imports.add("foo.bar", "Bar");
    imports.add("std.range.primitives", "popFront");
    imports.add("std.range.primitives", "popFrontN");
    assert_eq!(imports.len(), 2);
    assert_eq!(
        imports.render(),
        "import foo.bar; //Bar \nimport std.range.primitives; //popFront popFrontN \n"
    );
}
