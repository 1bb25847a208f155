//! The type-resolution seam.

use tern_ir::{ExprId, SourceFile, StringInterner};
use tracing::debug;

use crate::{AnalysisCache, ResolveError, Type};

/// Answers "what is the type of this expression?".
///
/// `Ok(None)` means the type could not be determined; an `Err` means no
/// answer can be given for this file at all.
pub trait TypeResolver {
    fn resolve_expr_type(
        &mut self,
        file: &SourceFile,
        expr: ExprId,
    ) -> Result<Option<Type>, ResolveError>;
}

/// Resolver backed by in-tree analysis, memoized in an [`AnalysisCache`].
pub struct LocalResolver<'c> {
    cache: &'c mut AnalysisCache,
    interner: &'c StringInterner,
}

impl<'c> LocalResolver<'c> {
    pub fn new(cache: &'c mut AnalysisCache, interner: &'c StringInterner) -> Self {
        LocalResolver { cache, interner }
    }
}

impl TypeResolver for LocalResolver<'_> {
    #[tracing::instrument(level = "debug", skip(self, file))]
    fn resolve_expr_type(
        &mut self,
        file: &SourceFile,
        expr: ExprId,
    ) -> Result<Option<Type>, ResolveError> {
        if file.has_errors() {
            return Err(ResolveError::ParseErrors {
                path: file.path().to_path_buf(),
                count: file.error_count,
            });
        }
        if !file.tree.contains_expr(expr) {
            return Err(ResolveError::StaleTree { expr });
        }
        let analysis = self.cache.analysis(file, self.interner);
        if !analysis.covers(expr) {
            return Err(ResolveError::StaleTree { expr });
        }
        let ty = analysis.expr_type(expr).cloned();
        debug!(resolved = ty.is_some(), "expression type");
        Ok(ty)
    }
}
