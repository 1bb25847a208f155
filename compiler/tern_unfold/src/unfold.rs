//! The unfolders.
//!
//! Each unfolder prepares the rewritten conditional as a detached copy,
//! then commits it to the live tree in a final step that cannot fail. Any
//! error before the commit rolls the arena back to its state at the start
//! of the call.

use tern_ir::{
    Decl, ExprId, ExprKind, SourceFile, Span, Stmt, StmtId, StmtKind, StringInterner, TypeRef,
    TypeRefId, TypeRefKind,
};
use tern_types::{shorten_references, type_to_ref, Builtins, TypeResolver};
use tracing::debug;

use crate::classify::UNFOLD_WITHOUT_CHECK;
use crate::kind::{Consumer, UnfoldableKind};
use crate::wrap::{distribute, AssignTail, BindTail, ReturnTail, WrapTail};
use crate::{classify, BranchedExpr, Precondition, UnfoldError};

/// Knobs for library callers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnfoldOptions {
    /// Shorten freshly written type annotations against the file's imports.
    pub shorten_references: bool,
}

impl Default for UnfoldOptions {
    fn default() -> Self {
        UnfoldOptions {
            shorten_references: true,
        }
    }
}

/// Result of a successful unfolding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Unfolded {
    pub kind: UnfoldableKind,
    /// Root of the conditional now in the tree.
    pub root: ExprId,
    /// Statement holding `root`.
    pub statement: StmtId,
    /// The rebuilt declaration (declaration kinds only).
    pub declaration: Option<StmtId>,
    /// Suggested cursor position: where the rewritten statement starts.
    pub caret: u32,
}

/// Applies unfoldings to source files.
pub struct Unfolder<'a> {
    interner: &'a StringInterner,
    options: UnfoldOptions,
}

impl<'a> Unfolder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Unfolder {
            interner,
            options: UnfoldOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: UnfoldOptions) -> Self {
        self.options = options;
        self
    }

    /// Classify `stmt` and apply the matching unfolding.
    pub fn unfold(
        &self,
        file: &mut SourceFile,
        stmt: StmtId,
        resolver: &mut dyn TypeResolver,
    ) -> Result<Unfolded, UnfoldError> {
        let kind = classify(&file.tree, stmt).ok_or(Precondition::NotUnfoldable)?;
        match kind.consumer() {
            Consumer::Assignment => self.unfold_assignment(file, stmt),
            Consumer::Return => self.unfold_return(file, stmt),
            Consumer::Declaration => self.unfold_declaration(file, stmt, resolver),
        }
    }

    /// `x op= if (c) a else b` becomes `if (c) x op= a else x op= b`.
    #[tracing::instrument(level = "debug", skip_all, fields(stmt = ?stmt))]
    pub fn unfold_assignment(
        &self,
        file: &mut SourceFile,
        stmt: StmtId,
    ) -> Result<Unfolded, UnfoldError> {
        let (expr, span) = expr_stmt(file, stmt)?;
        let ExprKind::Assign { target, op, value } = file.tree.expr_kind(expr) else {
            return Err(Precondition::NotUnfoldable.into());
        };
        assert!(target.is_valid(), "{UNFOLD_WITHOUT_CHECK}");
        let branched = BranchedExpr::of(&file.tree, value)?;
        let kind = UnfoldableKind::new(Consumer::Assignment, branched.shape());
        self.replace(file, stmt, span, kind, &branched, &mut AssignTail { target, op })
    }

    /// `return if (c) a else b` becomes `if (c) return a else return b`.
    #[tracing::instrument(level = "debug", skip_all, fields(stmt = ?stmt))]
    pub fn unfold_return(
        &self,
        file: &mut SourceFile,
        stmt: StmtId,
    ) -> Result<Unfolded, UnfoldError> {
        let (expr, span) = expr_stmt(file, stmt)?;
        let ExprKind::Return(value) = file.tree.expr_kind(expr) else {
            return Err(Precondition::NotUnfoldable.into());
        };
        let branched = BranchedExpr::of(&file.tree, value)?;
        let kind = UnfoldableKind::new(Consumer::Return, branched.shape());
        self.replace(file, stmt, span, kind, &branched, &mut ReturnTail)
    }

    /// Replace the expression statement `stmt` with the distributed copy.
    fn replace(
        &self,
        file: &mut SourceFile,
        stmt: StmtId,
        span: Span,
        kind: UnfoldableKind,
        branched: &BranchedExpr,
        wrap: &mut dyn WrapTail,
    ) -> Result<Unfolded, UnfoldError> {
        let checkpoint = file.tree.checkpoint();
        let root = match distribute(&mut file.tree, branched, wrap) {
            Ok(root) => root,
            Err(err) => {
                file.tree.rollback(checkpoint);
                return Err(err.into());
            }
        };

        file.tree.set_stmt(stmt, Stmt::new(StmtKind::Expr(root), span));
        file.mark_edited();
        debug!(?kind, ?root, "unfolded");
        Ok(Unfolded {
            kind,
            root,
            statement: stmt,
            declaration: None,
            caret: span.start,
        })
    }

    /// `val y = if (c) a else b` becomes `val y: T` followed by
    /// `if (c) y = a else y = b`.
    ///
    /// An explicit annotation is kept as written. Otherwise the
    /// initializer's type is resolved before anything is changed; an
    /// unknown type is written as `_`.
    #[tracing::instrument(level = "debug", skip_all, fields(stmt = ?stmt))]
    pub fn unfold_declaration(
        &self,
        file: &mut SourceFile,
        stmt: StmtId,
        resolver: &mut dyn TypeResolver,
    ) -> Result<Unfolded, UnfoldError> {
        if !file.tree.contains_stmt(stmt) {
            return Err(Precondition::NotUnfoldable.into());
        }
        let Stmt {
            kind: StmtKind::Decl(decl),
            span,
        } = *file.tree.stmt(stmt)
        else {
            return Err(Precondition::NotUnfoldable.into());
        };
        let (block, position) = file
            .tree
            .block_position(stmt)
            .ok_or(Precondition::NotLocal)?;
        if !decl.init.is_valid() {
            return Err(Precondition::MissingInitializer.into());
        }
        let branched = BranchedExpr::of(&file.tree, decl.init)?;
        let kind = UnfoldableKind::new(Consumer::Declaration, branched.shape());

        let resolved = if decl.ty.is_valid() {
            None
        } else {
            let ty = resolver.resolve_expr_type(file, decl.init)?;
            debug!(resolved = ty.is_some(), "initializer type");
            Some(ty)
        };

        let checkpoint = file.tree.checkpoint();
        let root = match distribute(&mut file.tree, &branched, &mut BindTail { name: decl.name }) {
            Ok(root) => root,
            Err(err) => {
                file.tree.rollback(checkpoint);
                return Err(err.into());
            }
        };
        let (ty, fresh) = match resolved {
            None => (decl.ty, false),
            Some(ty) => {
                let builtins = Builtins::new(self.interner);
                match ty.and_then(|ty| type_to_ref(&mut file.tree, &ty, &builtins)) {
                    Some(id) => (id, true),
                    None => (placeholder(file, span), false),
                }
            }
        };
        let inserted = file
            .tree
            .alloc_stmt(Stmt::new(StmtKind::Expr(root), span));

        // Commit.
        file.tree.insert_stmt(block, position + 1, inserted);
        file.tree.set_stmt(
            stmt,
            Stmt::new(
                StmtKind::Decl(Decl {
                    ty,
                    init: ExprId::INVALID,
                    ..decl
                }),
                span,
            ),
        );
        if fresh && self.options.shorten_references {
            shorten_references(file, self.interner, &[ty]);
        }
        file.mark_edited();
        debug!(?kind, ?root, "unfolded declaration");

        Ok(Unfolded {
            kind,
            root,
            statement: inserted,
            declaration: Some(stmt),
            caret: span.start,
        })
    }
}

/// The expression of an expression statement, with the statement's span.
fn expr_stmt(file: &SourceFile, stmt: StmtId) -> Result<(ExprId, Span), Precondition> {
    if !file.tree.contains_stmt(stmt) {
        return Err(Precondition::NotUnfoldable);
    }
    match *file.tree.stmt(stmt) {
        Stmt {
            kind: StmtKind::Expr(expr),
            span,
        } => Ok((expr, span)),
        Stmt {
            kind: StmtKind::Decl(_),
            ..
        } => Err(Precondition::NotUnfoldable),
    }
}

fn placeholder(file: &mut SourceFile, span: Span) -> TypeRefId {
    file.tree
        .alloc_type_ref(TypeRef::new(TypeRefKind::Placeholder, span))
}
