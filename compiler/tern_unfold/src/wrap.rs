//! Distributing a consuming operation into every branch.

use tern_ir::{AssignOp, Expr, ExprId, ExprKind, Name, SyntaxTree};

use crate::{locate_tail, BranchedExpr, Precondition};

/// Builds the node that consumes a branch's value.
pub trait WrapTail {
    /// Node kind to put at the tail's position. `tail` is a fresh copy of
    /// the tail node, detached from any parent.
    fn wrap(&mut self, tree: &mut SyntaxTree, tail: ExprId) -> ExprKind;
}

/// `target op tail`, with a separate copy of `target` per branch.
pub struct AssignTail {
    pub target: ExprId,
    pub op: AssignOp,
}

impl WrapTail for AssignTail {
    fn wrap(&mut self, tree: &mut SyntaxTree, tail: ExprId) -> ExprKind {
        ExprKind::Assign {
            target: tree.clone_expr(self.target),
            op: self.op,
            value: tail,
        }
    }
}

/// `return tail`
pub struct ReturnTail;

impl WrapTail for ReturnTail {
    fn wrap(&mut self, _tree: &mut SyntaxTree, tail: ExprId) -> ExprKind {
        ExprKind::Return(tail)
    }
}

/// `name = tail`, for a variable whose declaration lost its initializer.
pub struct BindTail {
    pub name: Name,
}

impl WrapTail for BindTail {
    fn wrap(&mut self, tree: &mut SyntaxTree, tail: ExprId) -> ExprKind {
        let span = tree.expr_span(tail);
        ExprKind::Assign {
            target: tree.alloc_expr(Expr::new(ExprKind::Ident(self.name), span)),
            op: AssignOp::Assign,
            value: tail,
        }
    }
}

/// Copy `branched` and rewrite the copy's branch tails with `wrap`.
///
/// Returns the root of the detached copy. The nodes reachable from the
/// original are not modified; on error the caller discards the copy.
pub fn distribute<W: WrapTail + ?Sized>(
    tree: &mut SyntaxTree,
    branched: &BranchedExpr,
    wrap: &mut W,
) -> Result<ExprId, Precondition> {
    let root = tree.clone_expr(branched.id());
    let copy = BranchedExpr::of(tree, root)?;
    for body in copy.bodies() {
        let tail = locate_tail(tree, body)?;
        let Expr { kind, span } = *tree.expr(tail);
        let moved = tree.alloc_expr(Expr::new(kind, span));
        let wrapped = wrap.wrap(tree, moved);
        tree.set_expr(tail, Expr::new(wrapped, span));
    }
    Ok(root)
}
