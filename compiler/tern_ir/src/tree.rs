//! Syntax tree arena.
//!
//! [`SyntaxTree`] stores every node of a file in flat tables indexed by
//! [`ExprId`], [`StmtId`] and [`TypeRefId`]. Child lists (call arguments,
//! block bodies, `when` arms) live in side tables addressed by ranges.
//!
//! # Editing Model
//!
//! - Nodes are replaced in place (`set_expr`, `set_stmt`, `type_ref_mut`);
//!   IDs stay stable across edits, so a caller holding a `StmtId` keeps
//!   pointing at "the statement in that position".
//! - `clone_expr` deep-copies a subtree into fresh nodes that nothing refers
//!   to yet (a detached copy).
//! - `checkpoint`/`rollback` discard everything allocated after the
//!   checkpoint. Rollback only truncates: in-place replacements of nodes
//!   older than the checkpoint are not undone, so editors must prepare
//!   detached nodes first and touch live nodes last.

use crate::ast::{Expr, ExprKind, Stmt, StmtKind, TypeRef, TypeRefKind, WhenArm};
use crate::stack::ensure_sufficient_stack;
use crate::{ArmRange, ExprId, ExprRange, Span, StmtId, StmtRange, TypeRefId};

/// Convert a table length to a `u32` index.
///
/// # Panics
/// Panics if a table exceeds `u32::MAX` entries; source files that large
/// are rejected by the lexer long before this point.
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("too many {what}: {len} exceeds u32::MAX"))
}

/// Arena holding all nodes of one source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    type_refs: Vec<TypeRef>,
    /// Flattened expression lists (indexed by `ExprRange`).
    expr_lists: Vec<ExprId>,
    /// Flattened statement lists (indexed by `StmtRange`).
    stmt_lists: Vec<StmtId>,
    /// `when` arms (indexed by `ArmRange`).
    arms: Vec<WhenArm>,
}

/// Table lengths captured by [`SyntaxTree::checkpoint`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    exprs: usize,
    stmts: usize,
    type_refs: usize,
    expr_lists: usize,
    stmt_lists: usize,
    arms: usize,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree pre-allocated based on source length.
    ///
    /// Heuristic: ~1 expression per 8 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 8;
        SyntaxTree {
            exprs: Vec::with_capacity(estimated),
            stmts: Vec::with_capacity(estimated / 4),
            ..Self::default()
        }
    }

    // ─── Expressions ─────────────────────────────────────────────────

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_kind(&self, id: ExprId) -> ExprKind {
        self.exprs[id.index()].kind
    }

    #[inline]
    pub fn expr_span(&self, id: ExprId) -> Span {
        self.exprs[id.index()].span
    }

    /// Replace an expression node in place.
    pub fn set_expr(&mut self, id: ExprId, expr: Expr) {
        self.exprs[id.index()] = expr;
    }

    /// Returns `true` if `id` names an allocated expression.
    #[inline]
    pub fn contains_expr(&self, id: ExprId) -> bool {
        id.is_valid() && id.index() < self.exprs.len()
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ─── Statements ──────────────────────────────────────────────────

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(stmt);
        id
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// Replace a statement node in place.
    pub fn set_stmt(&mut self, id: StmtId, stmt: Stmt) {
        self.stmts[id.index()] = stmt;
    }

    #[inline]
    pub fn contains_stmt(&self, id: StmtId) -> bool {
        id.is_valid() && id.index() < self.stmts.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    // ─── Type references ─────────────────────────────────────────────

    pub fn alloc_type_ref(&mut self, ty: TypeRef) -> TypeRefId {
        let id = TypeRefId::new(to_u32(self.type_refs.len(), "type references"));
        self.type_refs.push(ty);
        id
    }

    #[inline]
    pub fn type_ref(&self, id: TypeRefId) -> &TypeRef {
        &self.type_refs[id.index()]
    }

    #[inline]
    pub fn type_ref_mut(&mut self, id: TypeRefId) -> &mut TypeRef {
        &mut self.type_refs[id.index()]
    }

    /// All type references in allocation order.
    pub fn type_refs(&self) -> impl Iterator<Item = (TypeRefId, &TypeRef)> {
        self.type_refs
            .iter()
            .enumerate()
            .map(|(i, ty)| (TypeRefId::new(to_u32(i, "type references")), ty))
    }

    // ─── Side tables ─────────────────────────────────────────────────

    pub fn alloc_expr_list(&mut self, ids: &[ExprId]) -> ExprRange {
        if ids.is_empty() {
            return ExprRange::EMPTY;
        }
        let start = to_u32(self.expr_lists.len(), "expression lists");
        self.expr_lists.extend_from_slice(ids);
        ExprRange::new(start, to_u32(ids.len(), "list entries"))
    }

    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.to_range()]
    }

    pub fn alloc_stmt_list(&mut self, ids: &[StmtId]) -> StmtRange {
        if ids.is_empty() {
            return StmtRange::EMPTY;
        }
        let start = to_u32(self.stmt_lists.len(), "statement lists");
        self.stmt_lists.extend_from_slice(ids);
        StmtRange::new(start, to_u32(ids.len(), "list entries"))
    }

    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.to_range()]
    }

    pub fn alloc_arms(&mut self, arms: &[WhenArm]) -> ArmRange {
        if arms.is_empty() {
            return ArmRange::EMPTY;
        }
        let start = to_u32(self.arms.len(), "when arms");
        self.arms.extend_from_slice(arms);
        ArmRange::new(start, to_u32(arms.len(), "list entries"))
    }

    pub fn arms(&self, range: ArmRange) -> &[WhenArm] {
        &self.arms[range.to_range()]
    }

    // ─── Structural queries ──────────────────────────────────────────

    /// Find the block expression whose statement list holds `stmt`, and the
    /// statement's index in that list.
    ///
    /// Returns `None` for member-level statements, which belong to no block.
    pub fn block_position(&self, stmt: StmtId) -> Option<(ExprId, usize)> {
        self.exprs.iter().enumerate().find_map(|(index, expr)| {
            let ExprKind::Block(range) = expr.kind else {
                return None;
            };
            let pos = self.stmt_list(range).iter().position(|&s| s == stmt)?;
            Some((ExprId::new(to_u32(index, "expressions")), pos))
        })
    }

    /// Insert `stmt` into `block`'s statement list at `index`.
    ///
    /// The block node keeps its ID; its statement list is reallocated.
    /// Does nothing if `block` is not a block expression.
    pub fn insert_stmt(&mut self, block: ExprId, index: usize, stmt: StmtId) {
        let Expr {
            kind: ExprKind::Block(range),
            span,
        } = *self.expr(block)
        else {
            debug_assert!(false, "insert_stmt on non-block {block:?}");
            return;
        };
        let mut stmts = self.stmt_list(range).to_vec();
        stmts.insert(index.min(stmts.len()), stmt);
        let range = self.alloc_stmt_list(&stmts);
        self.set_expr(block, Expr::new(ExprKind::Block(range), span));
    }

    // ─── Checkpoints ─────────────────────────────────────────────────

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            exprs: self.exprs.len(),
            stmts: self.stmts.len(),
            type_refs: self.type_refs.len(),
            expr_lists: self.expr_lists.len(),
            stmt_lists: self.stmt_lists.len(),
            arms: self.arms.len(),
        }
    }

    /// Discard every node and list entry allocated after `checkpoint`.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.exprs.truncate(checkpoint.exprs);
        self.stmts.truncate(checkpoint.stmts);
        self.type_refs.truncate(checkpoint.type_refs);
        self.expr_lists.truncate(checkpoint.expr_lists);
        self.stmt_lists.truncate(checkpoint.stmt_lists);
        self.arms.truncate(checkpoint.arms);
    }

    // ─── Deep copies ─────────────────────────────────────────────────

    /// Deep-copy the subtree rooted at `id` into fresh, detached nodes.
    ///
    /// Invalid IDs copy to `ExprId::INVALID`.
    pub fn clone_expr(&mut self, id: ExprId) -> ExprId {
        if !id.is_valid() {
            return ExprId::INVALID;
        }
        ensure_sufficient_stack(|| self.clone_expr_inner(id))
    }

    fn clone_expr_inner(&mut self, id: ExprId) -> ExprId {
        let Expr { kind, span } = *self.expr(id);
        let kind = match kind {
            ExprKind::Int(_)
            | ExprKind::Double(_)
            | ExprKind::Bool(_)
            | ExprKind::Str(_)
            | ExprKind::Char(_)
            | ExprKind::Null
            | ExprKind::Ident(_)
            | ExprKind::Error => kind,
            ExprKind::Field { receiver, name } => ExprKind::Field {
                receiver: self.clone_expr(receiver),
                name,
            },
            ExprKind::Call { callee, args } => ExprKind::Call {
                callee: self.clone_expr(callee),
                args: self.clone_expr_list(args),
            },
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op,
                operand: self.clone_expr(operand),
            },
            ExprKind::Binary { op, left, right } => ExprKind::Binary {
                op,
                left: self.clone_expr(left),
                right: self.clone_expr(right),
            },
            ExprKind::Cast { expr, ty } => ExprKind::Cast {
                expr: self.clone_expr(expr),
                ty: self.clone_type_ref(ty),
            },
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => ExprKind::If {
                cond: self.clone_expr(cond),
                then_branch: self.clone_expr(then_branch),
                else_branch: self.clone_expr(else_branch),
            },
            ExprKind::When {
                subject,
                arms,
                else_body,
            } => {
                let subject = self.clone_expr(subject);
                let source: Vec<WhenArm> = self.arms(arms).to_vec();
                let copies: Vec<WhenArm> = source
                    .into_iter()
                    .map(|arm| WhenArm {
                        conditions: self.clone_expr_list(arm.conditions),
                        body: self.clone_expr(arm.body),
                        span: arm.span,
                    })
                    .collect();
                ExprKind::When {
                    subject,
                    arms: self.alloc_arms(&copies),
                    else_body: self.clone_expr(else_body),
                }
            }
            ExprKind::Block(stmts) => {
                let source: Vec<StmtId> = self.stmt_list(stmts).to_vec();
                let copies: Vec<StmtId> = source.into_iter().map(|s| self.clone_stmt(s)).collect();
                ExprKind::Block(self.alloc_stmt_list(&copies))
            }
            ExprKind::Assign { target, op, value } => ExprKind::Assign {
                target: self.clone_expr(target),
                op,
                value: self.clone_expr(value),
            },
            ExprKind::Return(value) => ExprKind::Return(self.clone_expr(value)),
        };
        self.alloc_expr(Expr::new(kind, span))
    }

    /// Deep-copy a statement into a fresh, detached node.
    pub fn clone_stmt(&mut self, id: StmtId) -> StmtId {
        let Stmt { kind, span } = *self.stmt(id);
        let kind = match kind {
            StmtKind::Expr(expr) => StmtKind::Expr(self.clone_expr(expr)),
            StmtKind::Decl(mut decl) => {
                decl.ty = self.clone_type_ref(decl.ty);
                decl.init = self.clone_expr(decl.init);
                StmtKind::Decl(decl)
            }
        };
        self.alloc_stmt(Stmt::new(kind, span))
    }

    /// Deep-copy a type reference (including type arguments).
    pub fn clone_type_ref(&mut self, id: TypeRefId) -> TypeRefId {
        if !id.is_valid() {
            return TypeRefId::INVALID;
        }
        let TypeRef { kind, span } = self.type_ref(id).clone();
        let kind = match kind {
            TypeRefKind::Named {
                path,
                args,
                nullable,
            } => TypeRefKind::Named {
                path,
                args: args.into_iter().map(|a| self.clone_type_ref(a)).collect(),
                nullable,
            },
            TypeRefKind::Placeholder => TypeRefKind::Placeholder,
        };
        self.alloc_type_ref(TypeRef::new(kind, span))
    }

    fn clone_expr_list(&mut self, range: ExprRange) -> ExprRange {
        let source: Vec<ExprId> = self.expr_list(range).to_vec();
        let copies: Vec<ExprId> = source.into_iter().map(|e| self.clone_expr(e)).collect();
        self.alloc_expr_list(&copies)
    }
}
