//! Unfolding errors.

use tern_ir::Span;
use tern_types::ResolveError;

/// The statement does not have the shape the requested unfolding needs.
///
/// These are caller defects: `classify` never approves such a statement.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Precondition {
    #[error("statement is not an assignment, return or declaration of a branched expression")]
    NotUnfoldable,

    #[error("expression is not an `if` or `when`")]
    NotBranched,

    #[error("conditional has no catch-all branch")]
    MissingCatchAll,

    #[error("branch at {span:?} does not end in an expression")]
    UnresolvedTail { span: Span },

    #[error("declaration is not local to a block")]
    NotLocal,

    #[error("declaration has no initializer")]
    MissingInitializer,
}

/// Why an unfolding was not applied. The tree is unchanged in every case.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnfoldError {
    #[error("cannot unfold: {0}")]
    Precondition(#[from] Precondition),

    #[error(transparent)]
    Resolution(#[from] ResolveError),
}
