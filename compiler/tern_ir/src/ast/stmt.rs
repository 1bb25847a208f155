//! Statement Types
//!
//! Statement node and variants for block bodies and member-level properties.

use std::fmt;

use crate::{ExprId, Name, Span, TypeRefId};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Expression statement (including assignments and `return`).
    Expr(ExprId),

    /// `val`/`var` declaration.
    Decl(Decl),
}

/// Variable declaration: `val name: Type = init`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Decl {
    pub name: Name,
    /// `TypeRefId::INVALID` = no annotation.
    pub ty: TypeRefId,
    /// `ExprId::INVALID` = no initializer.
    pub init: ExprId,
    /// `var` (true) or `val` (false).
    pub mutable: bool,
}
