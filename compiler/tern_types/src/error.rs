//! Resolution errors.

use std::path::PathBuf;

use tern_ir::ExprId;

/// Why a type could not be asked for at all.
///
/// A type that is merely unknown is `Ok(None)`, not an error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("cannot analyse `{}`: {count} parse error(s)", path.display())]
    ParseErrors { path: PathBuf, count: usize },

    #[error("expression {expr:?} is not part of the analysed tree")]
    StaleTree { expr: ExprId },

    #[error("type information unavailable: {reason}")]
    Unavailable { reason: String },
}
