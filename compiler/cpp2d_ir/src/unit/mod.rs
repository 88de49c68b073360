//! The immutable translation unit handed to the code generator.

mod builder;
mod spelling;

pub use builder::TreeBuilder;

use crate::decl::{Decl, DeclKind, RecordDecl};
use crate::source::SourceLoc;
use crate::stmt::Stmt;
use crate::template::TemplateArgKind;
use crate::ty::{QualType, TypeArena, TypeKind};
use crate::{DeclId, StmtId, TemplateArgId, TypeId};

/// One parsed and type-checked compilation unit.
///
/// Built once by a [`TreeBuilder`] and read-only afterwards; every node is
/// addressed by its arena id.
#[derive(Clone, Debug)]
pub struct TranslationUnit {
    decls: Vec<Decl>,
    stmts: Vec<Stmt>,
    types: TypeArena,
    template_args: Vec<TemplateArgKind>,
    root: DeclId,
    main_file: String,
    module_name: String,
    source: String,
}

impl TranslationUnit {
    #[inline]
    pub fn root(&self) -> DeclId {
        self.root
    }

    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn type_kind(&self, id: TypeId) -> &TypeKind {
        self.types.get(id)
    }

    #[inline]
    pub fn template_arg(&self, id: TemplateArgId) -> &TemplateArgKind {
        &self.template_args[id.index()]
    }

    /// Find an already interned type.
    pub fn find_type(&self, kind: &TypeKind) -> Option<TypeId> {
        self.types.find(kind)
    }

    /// Path of the main file as given to the front end.
    pub fn main_file(&self) -> &str {
        &self.main_file
    }

    /// Stem of the main file; the target module name.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// Iterate every declaration with its id.
    pub fn decls(&self) -> impl Iterator<Item = (DeclId, &Decl)> {
        self.decls.iter().enumerate().map(|(index, decl)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "arena indices are bounded by u32 at insertion"
            )]
            let id = DeclId::new(index as u32);
            (id, decl)
        })
    }

    /// Main-file text between two locations, `begin` inclusive, `end` exclusive.
    ///
    /// `None` when either location is invalid or comes from a macro expansion.
    pub fn text_between(&self, begin: SourceLoc, end: SourceLoc) -> Option<&str> {
        let begin = begin.file_offset()? as usize;
        let end = end.file_offset()? as usize;
        if begin >= end {
            return Some("");
        }
        self.source.get(begin..end.min(self.source.len()))
    }

    /// The first declaration of the entity `id` declares.
    pub fn canonical_decl(&self, id: DeclId) -> DeclId {
        let canonical = self.decl(id).canonical;
        if canonical.is_valid() {
            canonical
        } else {
            id
        }
    }

    /// Declaration was written in the main file.
    pub fn is_in_main_file(&self, id: DeclId) -> bool {
        self.decl(id)
            .file
            .as_deref()
            .is_some_and(|file| file_stem(file) == self.module_name)
    }

    pub fn record(&self, id: DeclId) -> Option<&RecordDecl> {
        match &self.decl(id).kind {
            DeclKind::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Strip all type sugar, keeping accumulated `const`.
    pub fn canonical_type(&self, qt: QualType) -> QualType {
        let mut current = qt;
        loop {
            let next = match self.type_kind(current.ty) {
                TypeKind::Typedef(decl) => match &self.decl(*decl).kind {
                    DeclKind::Typedef { underlying } | DeclKind::TypeAlias { underlying } => {
                        *underlying
                    }
                    _ => return current,
                },
                TypeKind::Elaborated { named, .. } => *named,
                TypeKind::Paren(inner)
                | TypeKind::Attributed(inner)
                | TypeKind::Decayed(inner)
                | TypeKind::InjectedClassName(inner)
                | TypeKind::SubstTemplateTypeParam { replacement: inner } => *inner,
                TypeKind::TemplateSpecialization {
                    aliased: Some(aliased),
                    ..
                } => *aliased,
                TypeKind::Auto {
                    deduced: Some(deduced),
                } => *deduced,
                _ => return current,
            };
            current = next.with_const(current.is_const);
        }
    }

    /// Canonical form of the type, as a type kind.
    pub fn canonical_kind(&self, qt: QualType) -> &TypeKind {
        self.type_kind(self.canonical_type(qt).ty)
    }

    /// Pointer type (not reference, not member pointer).
    pub fn is_pointer(&self, qt: QualType) -> bool {
        matches!(self.canonical_kind(qt), TypeKind::Pointer(_))
    }

    /// Pointer, reference or member pointer: anything with a pointee.
    pub fn pointee(&self, qt: QualType) -> Option<QualType> {
        match self.canonical_kind(qt) {
            TypeKind::Pointer(pointee)
            | TypeKind::MemberPointer(pointee)
            | TypeKind::LValueRef(pointee)
            | TypeKind::RValueRef(pointee) => Some(*pointee),
            _ => None,
        }
    }

    /// Pointer or reference, but not member pointer.
    pub fn has_pointer_representation(&self, qt: QualType) -> bool {
        matches!(
            self.canonical_kind(qt),
            TypeKind::Pointer(_) | TypeKind::LValueRef(_) | TypeKind::RValueRef(_)
        )
    }

    /// The type with one level of reference removed.
    pub fn non_reference(&self, qt: QualType) -> QualType {
        match self.canonical_kind(qt) {
            TypeKind::LValueRef(pointee) | TypeKind::RValueRef(pointee) => *pointee,
            _ => qt,
        }
    }

    /// Record declaration the type names, if it names one.
    pub fn record_of(&self, qt: QualType) -> Option<DeclId> {
        match self.canonical_kind(qt) {
            TypeKind::Record(decl) => Some(*decl),
            _ => None,
        }
    }

    pub fn is_builtin(&self, qt: QualType) -> bool {
        matches!(self.canonical_kind(qt), TypeKind::Builtin(_))
    }

    /// The type a record declaration declares, if one was interned.
    pub fn record_type(&self, record: DeclId) -> Option<TypeId> {
        self.find_type(&TypeKind::Record(record))
    }

    /// Parameters of a class template or alias template declaration.
    pub fn template_params(&self, template: DeclId) -> Option<&[DeclId]> {
        match &self.decl(template).kind {
            DeclKind::ClassTemplate { params, .. } | DeclKind::AliasTemplate { params, .. } => {
                Some(params)
            }
            _ => None,
        }
    }
}

fn file_stem(path: &str) -> &str {
    std::path::Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests;
