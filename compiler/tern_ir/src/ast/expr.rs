//! Expression Types
//!
//! Core expression nodes and variants.
//!
//! # Design Notes
//! - No `Box<Expr>`, children are `ExprId(u32)` indices into the tree
//! - Every variant is `Copy`, so replacing a node in place is a plain store
//! - Assignments and `return` are expressions (they appear as branch bodies
//!   of `if`/`when`); only statement position accepts them from the parser

use std::fmt;

use super::operators::{AssignOp, BinaryOp, UnaryOp};
use crate::{ArmRange, ExprId, ExprRange, Name, Span, StmtRange, TypeRefId};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal: 42
    Int(i64),

    /// Floating-point literal: 2.5 (stored as bits for Hash)
    Double(u64),

    /// Boolean literal: true, false
    Bool(bool),

    /// String literal (interned, unescaped)
    Str(Name),

    /// Character literal: 'a'
    Char(char),

    /// `null`
    Null,

    /// Variable or function reference
    Ident(Name),

    /// Member access: receiver.name
    Field { receiver: ExprId, name: Name },

    /// Call: callee(args...)
    Call { callee: ExprId, args: ExprRange },

    /// Unary operation: op operand
    Unary { op: UnaryOp, operand: ExprId },

    /// Binary operation: left op right
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Cast: expr as Type
    Cast { expr: ExprId, ty: TypeRefId },

    /// Conditional: if (cond) then_branch else else_branch
    If {
        cond: ExprId,
        then_branch: ExprId,
        /// `ExprId::INVALID` = no else branch.
        else_branch: ExprId,
    },

    /// Multi-arm conditional: when (subject) { arms; else -> else_body }
    ///
    /// The catch-all arm is not part of `arms`: it is the designated
    /// `else_body`, always the last arm in source order. The parser rejects
    /// a second `else` arm, so a `when` has zero or one catch-all.
    When {
        /// `ExprId::INVALID` = subject-less `when`.
        subject: ExprId,
        arms: ArmRange,
        /// `ExprId::INVALID` = no catch-all arm.
        else_body: ExprId,
    },

    /// Block: { stmts } whose value is produced by the last statement
    Block(StmtRange),

    /// Assignment: target op value
    Assign {
        target: ExprId,
        op: AssignOp,
        value: ExprId,
    },

    /// Return: `return value`; `ExprId::INVALID` = bare `return`.
    Return(ExprId),

    /// Parse error placeholder
    Error,
}

/// A conditional arm of a `when` expression: `c1, c2 -> body`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct WhenArm {
    /// Comma-separated arm conditions (never empty).
    pub conditions: ExprRange,
    pub body: ExprId,
    pub span: Span,
}
