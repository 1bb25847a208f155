//! Shape classification.

use tern_ir::visitor::{walk_stmt, Visitor};
use tern_ir::{ExprId, ExprKind, SourceFile, StmtId, StmtKind, SyntaxTree};
use tracing::debug;

use crate::kind::{Consumer, Shape, UnfoldableKind};
use crate::BranchedExpr;

/// Panic message for an assignment node without a target.
pub const UNFOLD_WITHOUT_CHECK: &str = "Expression must be checked before unfolding";

/// Which unfolding, if any, applies to `stmt`. Never mutates the tree.
///
/// # Panics
///
/// If `stmt` is an assignment without a target.
pub fn classify(tree: &SyntaxTree, stmt: StmtId) -> Option<UnfoldableKind> {
    if !tree.contains_stmt(stmt) {
        return None;
    }
    let (consumer, value) = match tree.stmt(stmt).kind {
        StmtKind::Expr(expr) => match tree.expr_kind(expr) {
            ExprKind::Assign { target, value, .. } => {
                assert!(target.is_valid(), "{UNFOLD_WITHOUT_CHECK}");
                (Consumer::Assignment, value)
            }
            ExprKind::Return(value) => (Consumer::Return, value),
            _ => return None,
        },
        StmtKind::Decl(decl) => {
            tree.block_position(stmt)?;
            (Consumer::Declaration, decl.init)
        }
    };
    let kind = shape_of(tree, value).map(|shape| UnfoldableKind::new(consumer, shape));
    debug!(?stmt, ?kind, "classified");
    kind
}

fn shape_of(tree: &SyntaxTree, value: ExprId) -> Option<Shape> {
    if !value.is_valid() {
        return None;
    }
    BranchedExpr::of(tree, value).ok().map(|branched| branched.shape())
}

/// Collects unfoldable statements reachable from the module.
struct Candidates {
    offset: Option<u32>,
    found: Vec<(StmtId, UnfoldableKind)>,
}

impl<'ast> Visitor<'ast> for Candidates {
    fn visit_stmt(&mut self, id: StmtId, tree: &'ast SyntaxTree) {
        let covers = self
            .offset
            .map_or(true, |offset| tree.stmt(id).span.contains(offset));
        if covers {
            if let Some(kind) = classify(tree, id) {
                self.found.push((id, kind));
            }
        }
        walk_stmt(self, id, tree);
    }
}

/// Every unfoldable statement in `file`, in source order.
pub fn unfoldable_statements(file: &SourceFile) -> Vec<(StmtId, UnfoldableKind)> {
    let mut candidates = Candidates {
        offset: None,
        found: Vec::new(),
    };
    candidates.visit_module(&file.module, &file.tree);
    candidates.found
}

/// The innermost unfoldable statement whose span contains `offset`.
pub fn find_candidate(file: &SourceFile, offset: u32) -> Option<(StmtId, UnfoldableKind)> {
    let mut candidates = Candidates {
        offset: Some(offset),
        found: Vec::new(),
    };
    candidates.visit_module(&file.module, &file.tree);
    // Containing statements nest, and the walk is pre-order.
    candidates.found.pop()
}
