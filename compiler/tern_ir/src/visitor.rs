//! Syntax tree visitor.
//!
//! Nodes are visited by ID so that visitors can record positions
//! (`StmtId`, `ExprId`) that stay valid across in-place edits.
//!
//! Default implementations call `walk_*` functions that traverse children.
//! Override `visit_*` methods to add behavior at specific nodes; call the
//! matching `walk_*` function to continue into children.
//!
//! # Example
//!
//! ```text
//! struct CountReturns {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountReturns {
//!     fn visit_expr(&mut self, id: ExprId, tree: &'ast SyntaxTree) {
//!         if let ExprKind::Return(_) = tree.expr_kind(id) {
//!             self.count += 1;
//!         }
//!         walk_expr(self, id, tree);
//!     }
//! }
//! ```

use crate::ast::{ExprKind, Function, Item, Module, StmtKind};
use crate::{ExprId, StmtId, SyntaxTree};

/// Syntax tree visitor trait.
///
/// The visitor can mutate its own state during traversal. The tree itself
/// remains immutable.
pub trait Visitor<'ast> {
    fn visit_module(&mut self, module: &'ast Module, tree: &'ast SyntaxTree) {
        walk_module(self, module, tree);
    }

    fn visit_function(&mut self, function: &'ast Function, tree: &'ast SyntaxTree) {
        walk_function(self, function, tree);
    }

    /// Visit a statement: block member or member-level property.
    fn visit_stmt(&mut self, id: StmtId, tree: &'ast SyntaxTree) {
        walk_stmt(self, id, tree);
    }

    fn visit_expr(&mut self, id: ExprId, tree: &'ast SyntaxTree) {
        walk_expr(self, id, tree);
    }
}

// Walk Functions
//
// Depth-first, left-to-right, in source order. Invalid child IDs (absent
// optional children) are skipped.

/// Walk a module's items in declaration order.
pub fn walk_module<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    module: &'ast Module,
    tree: &'ast SyntaxTree,
) {
    for item in &module.items {
        match item {
            Item::Function(function) => visitor.visit_function(function, tree),
            Item::Property(stmt) => visitor.visit_stmt(*stmt, tree),
        }
    }
}

pub fn walk_function<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    function: &'ast Function,
    tree: &'ast SyntaxTree,
) {
    visit_opt(visitor, function.body, tree);
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    id: StmtId,
    tree: &'ast SyntaxTree,
) {
    match tree.stmt(id).kind {
        StmtKind::Expr(expr) => visitor.visit_expr(expr, tree),
        StmtKind::Decl(decl) => visit_opt(visitor, decl.init, tree),
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    id: ExprId,
    tree: &'ast SyntaxTree,
) {
    match tree.expr_kind(id) {
        ExprKind::Int(_)
        | ExprKind::Double(_)
        | ExprKind::Bool(_)
        | ExprKind::Str(_)
        | ExprKind::Char(_)
        | ExprKind::Null
        | ExprKind::Ident(_)
        | ExprKind::Error => {}

        ExprKind::Field { receiver, .. } => visitor.visit_expr(receiver, tree),
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand, tree),
        ExprKind::Cast { expr, .. } => visitor.visit_expr(expr, tree),
        ExprKind::Return(value) => visit_opt(visitor, value, tree),

        ExprKind::Call { callee, args } => {
            visitor.visit_expr(callee, tree);
            for &arg in tree.expr_list(args) {
                visitor.visit_expr(arg, tree);
            }
        }
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left, tree);
            visitor.visit_expr(right, tree);
        }
        ExprKind::Assign { target, value, .. } => {
            visit_opt(visitor, target, tree);
            visitor.visit_expr(value, tree);
        }

        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(cond, tree);
            visitor.visit_expr(then_branch, tree);
            visit_opt(visitor, else_branch, tree);
        }
        ExprKind::When {
            subject,
            arms,
            else_body,
        } => {
            visit_opt(visitor, subject, tree);
            for arm in tree.arms(arms) {
                for &cond in tree.expr_list(arm.conditions) {
                    visitor.visit_expr(cond, tree);
                }
                visitor.visit_expr(arm.body, tree);
            }
            visit_opt(visitor, else_body, tree);
        }
        ExprKind::Block(stmts) => {
            for &stmt in tree.stmt_list(stmts) {
                visitor.visit_stmt(stmt, tree);
            }
        }
    }
}

fn visit_opt<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    id: ExprId,
    tree: &'ast SyntaxTree,
) {
    if id.is_valid() {
        visitor.visit_expr(id, tree);
    }
}
