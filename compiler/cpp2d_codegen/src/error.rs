//! Fatal translation errors.
//!
//! These signal a defect in the translator or an inconsistent input tree,
//! never a property of the C++ program. The first one aborts the run.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("specialization of `{template}` binds {args} argument(s) to {params} parameter(s)")]
    TemplateArityMismatch {
        template: String,
        params: usize,
        args: usize,
    },

    #[error("{context}: expected {expected}, found `{found}` declaration")]
    UnexpectedDecl {
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{context}: expected {expected}, found `{found}` statement")]
    UnexpectedStmt {
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}
