//! Template arguments.

use crate::{DeclId, QualType, StmtId, TemplateArgId};

#[derive(Clone, Debug, PartialEq)]
pub enum TemplateArgKind {
    Null,
    Declaration(DeclId),
    Integral(i128),
    NullPtr,
    Type(QualType),
    /// Argument pack: a nested list.
    Pack(Vec<TemplateArgId>),
    Expression(StmtId),
    /// A template used as an argument (`template<template<class> class C>`).
    Template(DeclId),
}

impl TemplateArgKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            TemplateArgKind::Null => "Null",
            TemplateArgKind::Declaration(_) => "Declaration",
            TemplateArgKind::Integral(_) => "Integral",
            TemplateArgKind::NullPtr => "NullPtr",
            TemplateArgKind::Type(_) => "Type",
            TemplateArgKind::Pack(_) => "Pack",
            TemplateArgKind::Expression(_) => "Expression",
            TemplateArgKind::Template(_) => "Template",
        }
    }
}
