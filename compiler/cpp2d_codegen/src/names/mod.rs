//! Identifier mangling and import bookkeeping.
//!
//! Names that collide with target keywords get a trailing `_`. Names whose
//! declaration lives in one of the unit's includes are recorded against the
//! module that include translates to, and a fixed table maps well-known
//! library types onto their target counterparts.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

#[cfg(test)]
mod tests;

/// Identifiers that are keywords or reserved in the target.
const RESERVED: &[&str] = &[
    "version",
    "out",
    "in",
    "ref",
    "debug",
    "function",
    "Exception",
];

/// Qualified C++ name to qualified target name.
const TYPE_REMAP: &[(&str, &str)] = &[
    ("boost::optional", "std.typecons.Nullable"),
    ("std::vector", "cpp_std.vector"),
    ("std::set", "std.container.rbtree.RedBlackTree"),
    ("boost::shared_mutex", "core.sync.rwmutex.ReadWriteMutex"),
    ("boost::mutex", "core.sync.mutex.Mutex"),
    ("std::allocator", "cpp_std.allocator"),
    ("time_t", "core.stdc.time.time_t"),
    ("intptr_t", "core.stdc.stdint.intptr_t"),
    ("int8_t", "core.stdc.stdint.int8_t"),
    ("uint8_t", "core.stdc.stdint.uint8_t"),
    ("int16_t", "core.stdc.stdint.int16_t"),
    ("uint16_t", "core.stdc.stdint.uint16_t"),
    ("int32_t", "core.stdc.stdint.int32_t"),
    ("uint32_t", "core.stdc.stdint.uint32_t"),
    ("int64_t", "core.stdc.stdint.int64_t"),
    ("uint64_t", "core.stdc.stdint.uint64_t"),
    ("SafeInt", "std.experimental.safeint.SafeInt"),
    ("RedBlackTree", "std.container.rbtree"),
    ("std::map", "cpp_std.map"),
    ("std::string", "string"),
    ("std::ostream", "std.stdio.File"),
];

/// Rename identifiers that are reserved in the target.
pub fn mangle_name(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{name}_")
    } else {
        name.to_owned()
    }
}

/// Name given to an anonymous declaration.
pub fn anonymous_name(raw_id: u32) -> String {
    format!("var{raw_id}")
}

/// Where a remapped library type comes from in the target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RemappedType {
    /// Module to import; `None` for types the target has built in.
    pub module: Option<&'static str>,
    /// Name to print.
    pub symbol: &'static str,
}

/// Look up a qualified C++ name in the remap table.
pub fn remap_type(qualified: &str) -> Option<RemappedType> {
    let (_, target) = TYPE_REMAP.iter().find(|(cpp, _)| *cpp == qualified)?;
    Some(match target.rsplit_once('.') {
        Some((module, symbol)) => RemappedType {
            module: Some(module),
            symbol,
        },
        None => RemappedType {
            module: None,
            symbol: target,
        },
    })
}

/// Include paths written in the unit, as spelled in the `#include`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IncludeSet {
    includes: BTreeSet<String>,
}

impl IncludeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, include: impl Into<String>) {
        self.includes.insert(include.into());
    }

    pub fn len(&self) -> usize {
        self.includes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
    }

    /// Module of the first include `file` ends with, on a path boundary.
    pub fn module_for(&self, file: &str) -> Option<String> {
        self.includes
            .iter()
            .find(|include| is_path_suffix(file, include))
            .map(|include| include_to_module(include))
    }
}

impl<S: Into<String>> FromIterator<S> for IncludeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        IncludeSet {
            includes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn is_path_suffix(file: &str, include: &str) -> bool {
    let Some(prefix) = file.strip_suffix(include) else {
        return false;
    };
    prefix.is_empty() || prefix.ends_with('/') || prefix.ends_with('\\')
}

/// `Foo/Bar.hpp` becomes `foo.bar`.
pub fn include_to_module(include: &str) -> String {
    let stem = include
        .strip_suffix(".h")
        .or_else(|| include.strip_suffix(".hpp"))
        .unwrap_or(include);
    stem.chars()
        .map(|c| match c {
            '/' | '\\' => '.',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Modules to import, each with the symbols that caused the import.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSet {
    modules: BTreeMap<String, BTreeSet<String>>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, module: impl Into<String>, symbol: impl Into<String>) {
        self.modules
            .entry(module.into())
            .or_default()
            .insert(symbol.into());
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    pub fn symbols(&self, module: &str) -> Option<&BTreeSet<String>> {
        self.modules.get(module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.modules.iter().map(|(m, s)| (m.as_str(), s))
    }

    /// One `import m; //sym sym ` line per module.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (module, symbols) in &self.modules {
            let _ = write!(out, "import {module}; //");
            for symbol in symbols {
                out.push_str(symbol);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}
