//! Bookkeeping for template parameter names.
//!
//! A partial specialization may introduce a parameter spelled like one of
//! the primary template's parameters. Both appear in the binding list
//! (`struct S(T : T_*, T_)`), so the specialization's own parameter gets a
//! new name for the time its specialization is rendered.

use cpp2d_ir::DeclId;
use rustc_hash::FxHashMap;

#[cfg(test)]
mod tests;

/// Scoped parameter renames, keyed by parameter declaration.
#[derive(Clone, Debug, Default)]
pub struct RenameTable {
    scopes: Vec<FxHashMap<DeclId, String>>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Drop every rename registered since the matching `push_scope`.
    pub fn pop_scope(&mut self) {
        debug_assert!(!self.scopes.is_empty(), "pop_scope without push_scope");
        self.scopes.pop();
    }

    /// Rename each of `extra` whose name is taken by one of `primary`.
    /// `name_of` maps a parameter to its written name.
    pub fn register_collisions<'a>(
        &mut self,
        primary: &[DeclId],
        extra: &[DeclId],
        name_of: impl Fn(DeclId) -> &'a str,
    ) {
        if self.scopes.is_empty() {
            self.push_scope();
        }
        for &param in extra {
            let name = name_of(param);
            if name.is_empty() {
                continue;
            }
            if primary.iter().any(|&p| name_of(p) == name) {
                let renamed = format!("{name}_");
                if let Some(scope) = self.scopes.last_mut() {
                    scope.insert(param, renamed);
                }
            }
        }
    }

    pub fn lookup(&self, param: DeclId) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&param))
            .map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

/// Why a parameter reference by position could not be resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Unresolved {
    Depth(u32),
    Index(u32),
}

/// Parameter lists of the enclosing specializations, outermost first.
///
/// Canonical parameter types only carry `(depth, index)`; inside a
/// specialization body that is enough to find the declaration.
#[derive(Clone, Debug, Default)]
pub struct TemplateScopes {
    stack: Vec<Vec<DeclId>>,
}

impl TemplateScopes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, params: Vec<DeclId>) {
        self.stack.push(params);
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.stack.is_empty(), "pop without push");
        self.stack.pop();
    }

    pub fn resolve(&self, depth: u32, index: u32) -> Result<DeclId, Unresolved> {
        let params = self
            .stack
            .get(depth as usize)
            .ok_or(Unresolved::Depth(depth))?;
        params
            .get(index as usize)
            .copied()
            .ok_or(Unresolved::Index(index))
    }
}
