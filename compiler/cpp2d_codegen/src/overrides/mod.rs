//! Identity-keyed rendering overrides.
//!
//! Before rendering any node the printer asks the override table whether
//! something else should print it. A hit replaces the default rendering
//! entirely; the callback may still call back into the printer for
//! children. Free operator functions are also routed through here: the
//! table lists, per aggregate, the operators to re-emit as its methods.

use cpp2d_ir::{
    DeclId, DeclKind, FunctionKind, OverloadedOperator, RecordDecl, RecordTemplate, StmtId,
    TemplateArgId, TranslationUnit, TypeId,
};
use rustc_hash::FxHashMap;

use crate::printer::Printer;

#[cfg(test)]
mod tests;

/// A replacement renderer for one node.
pub type RenderFn<Id> = dyn Fn(&mut Printer<'_>, Id);

/// Overrides consulted by the printer. Every lookup defaults to "none".
pub trait OverrideTable {
    fn decl(&self, _id: DeclId) -> Option<&RenderFn<DeclId>> {
        None
    }

    fn stmt(&self, _id: StmtId) -> Option<&RenderFn<StmtId>> {
        None
    }

    fn ty(&self, _id: TypeId) -> Option<&RenderFn<TypeId>> {
        None
    }

    fn template_arg(&self, _id: TemplateArgId) -> Option<&RenderFn<TemplateArgId>> {
        None
    }

    /// Free operators whose left operand is `record`.
    fn free_operators(&self, _record: DeclId) -> &[DeclId] {
        &[]
    }

    /// Free operators whose right operand is `record` (and differs from the left).
    fn free_operators_right(&self, _record: DeclId) -> &[DeclId] {
        &[]
    }
}

/// No overrides at all.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOverrides;

impl OverrideTable for NoOverrides {}

/// Overrides built by registering callbacks per node.
#[derive(Default)]
pub struct OverrideMap {
    decls: FxHashMap<DeclId, Box<RenderFn<DeclId>>>,
    stmts: FxHashMap<StmtId, Box<RenderFn<StmtId>>>,
    types: FxHashMap<TypeId, Box<RenderFn<TypeId>>>,
    template_args: FxHashMap<TemplateArgId, Box<RenderFn<TemplateArgId>>>,
    free_left: FxHashMap<DeclId, Vec<DeclId>>,
    free_right: FxHashMap<DeclId, Vec<DeclId>>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_decl(&mut self, id: DeclId, render: impl Fn(&mut Printer<'_>, DeclId) + 'static) {
        self.decls.insert(id, Box::new(render));
    }

    pub fn on_stmt(&mut self, id: StmtId, render: impl Fn(&mut Printer<'_>, StmtId) + 'static) {
        self.stmts.insert(id, Box::new(render));
    }

    pub fn on_type(&mut self, id: TypeId, render: impl Fn(&mut Printer<'_>, TypeId) + 'static) {
        self.types.insert(id, Box::new(render));
    }

    pub fn on_template_arg(
        &mut self,
        id: TemplateArgId,
        render: impl Fn(&mut Printer<'_>, TemplateArgId) + 'static,
    ) {
        self.template_args.insert(id, Box::new(render));
    }

    /// Print nothing for `id`.
    pub fn suppress_decl(&mut self, id: DeclId) {
        self.on_decl(id, |_, _| {});
    }

    pub fn add_free_operator(&mut self, record: DeclId, function: DeclId) {
        self.free_left.entry(record).or_default().push(function);
    }

    pub fn add_free_operator_right(&mut self, record: DeclId, function: DeclId) {
        self.free_right.entry(record).or_default().push(function);
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
            && self.stmts.is_empty()
            && self.types.is_empty()
            && self.template_args.is_empty()
            && self.free_left.is_empty()
            && self.free_right.is_empty()
    }
}

impl OverrideTable for OverrideMap {
    fn decl(&self, id: DeclId) -> Option<&RenderFn<DeclId>> {
        self.decls.get(&id).map(|render| &**render)
    }

    fn stmt(&self, id: StmtId) -> Option<&RenderFn<StmtId>> {
        self.stmts.get(&id).map(|render| &**render)
    }

    fn ty(&self, id: TypeId) -> Option<&RenderFn<TypeId>> {
        self.types.get(&id).map(|render| &**render)
    }

    fn template_arg(&self, id: TemplateArgId) -> Option<&RenderFn<TemplateArgId>> {
        self.template_args.get(&id).map(|render| &**render)
    }

    fn free_operators(&self, record: DeclId) -> &[DeclId] {
        self.free_left.get(&record).map_or(&[], Vec::as_slice)
    }

    fn free_operators_right(&self, record: DeclId) -> &[DeclId] {
        self.free_right.get(&record).map_or(&[], Vec::as_slice)
    }
}

/// The overrides every translated unit needs.
///
/// - `std::hash<T>` specializations defining `operator()` have no target
///   counterpart and are dropped.
/// - Free operator functions are moved into the aggregate of their left
///   operand and, when it differs, of their right operand.
pub struct MatchOverrides {
    map: OverrideMap,
}

impl MatchOverrides {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn from_unit(unit: &TranslationUnit) -> Self {
        let mut map = OverrideMap::new();
        for (id, decl) in unit.decls() {
            match &decl.kind {
                DeclKind::Record(record) if is_std_hash(unit, decl.qualified(), record) => {
                    tracing::trace!(decl = decl.qualified(), "suppressing hash specialization");
                    map.suppress_decl(id);
                }
                DeclKind::Function(function)
                    if matches!(function.kind, FunctionKind::Free)
                        && function.operator.is_some_and(is_member_like_operator) =>
                {
                    map.suppress_decl(id);
                    let operand = |index: usize| {
                        function.params.get(index).and_then(|&param| {
                            match &unit.decl(param).kind {
                                DeclKind::Param(p) => unit
                                    .record_of(unit.non_reference(p.ty))
                                    .map(|record| unit.canonical_decl(record)),
                                _ => None,
                            }
                        })
                    };
                    let left = operand(0);
                    if let Some(left) = left {
                        map.add_free_operator(left, id);
                    }
                    if let Some(right) = operand(1) {
                        if Some(right) != left {
                            map.add_free_operator_right(right, id);
                        }
                    }
                }
                _ => {}
            }
        }
        MatchOverrides { map }
    }

    /// Register further overrides on top of the built-in ones.
    pub fn map_mut(&mut self) -> &mut OverrideMap {
        &mut self.map
    }
}

fn is_std_hash(unit: &TranslationUnit, qualified: &str, record: &RecordDecl) -> bool {
    let RecordTemplate::Specialization { args, .. } = &record.template else {
        return false;
    };
    qualified == "std::hash"
        && args.len() == 1
        && record.members.iter().any(|&member| {
            matches!(
                &unit.decl(member).kind,
                DeclKind::Function(f) if f.operator == Some(OverloadedOperator::Call)
            )
        })
}

/// Operators written as symbols (not `new`, `delete` or `,`).
fn is_member_like_operator(op: OverloadedOperator) -> bool {
    !matches!(
        op,
        OverloadedOperator::New
            | OverloadedOperator::Delete
            | OverloadedOperator::ArrayNew
            | OverloadedOperator::ArrayDelete
            | OverloadedOperator::Comma
    )
}

impl OverrideTable for MatchOverrides {
    fn decl(&self, id: DeclId) -> Option<&RenderFn<DeclId>> {
        self.map.decl(id)
    }

    fn stmt(&self, id: StmtId) -> Option<&RenderFn<StmtId>> {
        self.map.stmt(id)
    }

    fn ty(&self, id: TypeId) -> Option<&RenderFn<TypeId>> {
        self.map.ty(id)
    }

    fn template_arg(&self, id: TemplateArgId) -> Option<&RenderFn<TemplateArgId>> {
        self.map.template_arg(id)
    }

    fn free_operators(&self, record: DeclId) -> &[DeclId] {
        self.map.free_operators(record)
    }

    fn free_operators_right(&self, record: DeclId) -> &[DeclId] {
        self.map.free_operators_right(record)
    }
}
