//! Incremental construction of a [`TranslationUnit`].

use super::{file_stem, TranslationUnit};
use crate::decl::{Decl, DeclKind};
use crate::ids::next_index;
use crate::stmt::{Stmt, StmtKind};
use crate::template::TemplateArgKind;
use crate::ty::{BuiltinKind, QualType, TypeArena, TypeKind};
use crate::{DeclId, StmtId, TemplateArgId, TypeId};

/// Collects nodes for one unit; [`finish`](TreeBuilder::finish) freezes them.
#[derive(Debug)]
pub struct TreeBuilder {
    decls: Vec<Decl>,
    stmts: Vec<Stmt>,
    types: TypeArena,
    template_args: Vec<TemplateArgKind>,
    main_file: String,
    source: String,
}

impl TreeBuilder {
    pub fn new(main_file: impl Into<String>) -> Self {
        TreeBuilder {
            decls: Vec::new(),
            stmts: Vec::new(),
            types: TypeArena::new(),
            template_args: Vec::new(),
            main_file: main_file.into(),
            source: String::new(),
        }
    }

    /// Main-file text used to recover comments between nodes.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    pub fn main_file(&self) -> &str {
        &self.main_file
    }

    pub fn add_decl(&mut self, decl: Decl) -> DeclId {
        let id = DeclId::new(next_index(self.decls.len()));
        self.decls.push(decl);
        id
    }

    /// Add a declaration written in the main file.
    pub fn add_main_decl(&mut self, decl: Decl) -> DeclId {
        let file = self.main_file.clone();
        self.add_decl(decl.with_file(file))
    }

    /// Reserve an id for a declaration that refers to itself (records and
    /// their types); fill it with [`define_decl`](TreeBuilder::define_decl).
    pub fn reserve_decl(&mut self) -> DeclId {
        self.add_decl(Decl::new(DeclKind::Empty, ""))
    }

    pub fn define_decl(&mut self, id: DeclId, decl: Decl) {
        self.decls[id.index()] = decl;
    }

    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.index()]
    }

    /// Append `member` to a record body and link methods back to it.
    pub fn push_member(&mut self, record: DeclId, member: DeclId) {
        if let DeclKind::Function(function) = &mut self.decls[member.index()].kind {
            if function.is_member() {
                function.parent = Some(record);
            }
        }
        if let DeclKind::Record(data) = &mut self.decls[record.index()].kind {
            data.members.push(member);
        }
    }

    pub fn add_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(next_index(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// Add an expression of type `ty`.
    pub fn expr(&mut self, kind: StmtKind, ty: QualType) -> StmtId {
        self.add_stmt(Stmt::new(kind).with_ty(ty))
    }

    pub fn stmt_mut(&mut self, id: StmtId) -> &mut Stmt {
        &mut self.stmts[id.index()]
    }

    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        self.types.intern(kind)
    }

    pub fn type_kind(&self, id: TypeId) -> &TypeKind {
        self.types.get(id)
    }

    pub fn builtin(&mut self, kind: BuiltinKind) -> QualType {
        QualType::new(self.intern(TypeKind::Builtin(kind)))
    }

    pub fn pointer(&mut self, pointee: QualType) -> QualType {
        QualType::new(self.intern(TypeKind::Pointer(pointee)))
    }

    pub fn lvalue_ref(&mut self, pointee: QualType) -> QualType {
        QualType::new(self.intern(TypeKind::LValueRef(pointee)))
    }

    pub fn record_type(&mut self, record: DeclId) -> QualType {
        QualType::new(self.intern(TypeKind::Record(record)))
    }

    pub fn template_arg(&mut self, kind: TemplateArgKind) -> TemplateArgId {
        let id = TemplateArgId::new(next_index(self.template_args.len()));
        self.template_args.push(kind);
        id
    }

    pub fn type_arg(&mut self, qt: QualType) -> TemplateArgId {
        self.template_arg(TemplateArgKind::Type(qt))
    }

    /// Freeze the unit with `top_level` as the root's children.
    pub fn finish(mut self, top_level: Vec<DeclId>) -> TranslationUnit {
        let root = self.add_decl(Decl::new(
            DeclKind::TranslationUnit { decls: top_level },
            "",
        ));
        let module_name = file_stem(&self.main_file).to_owned();
        TranslationUnit {
            decls: self.decls,
            stmts: self.stmts,
            types: self.types,
            template_args: self.template_args,
            root,
            main_file: self.main_file,
            module_name,
            source: self.source,
        }
    }
}
