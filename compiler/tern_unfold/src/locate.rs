//! Branch tail lookup.

use tern_ir::{ExprId, ExprKind, StmtKind, SyntaxTree};

use crate::Precondition;

/// The expression that produces a branch body's value.
///
/// Descends through trailing blocks only; a nested conditional is a tail
/// like any other expression.
pub fn locate_tail(tree: &SyntaxTree, body: ExprId) -> Result<ExprId, Precondition> {
    let mut current = body;
    loop {
        let ExprKind::Block(range) = tree.expr_kind(current) else {
            return Ok(current);
        };
        let Some(&last) = tree.stmt_list(range).last() else {
            return Err(Precondition::UnresolvedTail {
                span: tree.expr_span(current),
            });
        };
        let stmt = tree.stmt(last);
        match stmt.kind {
            StmtKind::Expr(expr) => current = expr,
            StmtKind::Decl(_) => {
                return Err(Precondition::UnresolvedTail { span: stmt.span });
            }
        }
    }
}
