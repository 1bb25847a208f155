//! Tern IR - syntax tree types
//!
//! This crate contains the core data structures shared by the Tern crates:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Tokens and `TokenList` for lexer output, comments in `CommentList`
//! - AST nodes (Expr, Stmt, Function, etc.)
//! - The `SyntaxTree` arena and `SourceFile`
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32)
//! - **Flatten Everything**: No Box<Expr>, use ExprId(u32) indices
//! - **Stable IDs**: Edits replace nodes in place, so IDs survive rewrites
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod comment;
mod file;
mod ids;
mod interner;
mod name;
mod span;
pub mod stack;
mod token;
mod tree;
pub mod visitor;

pub use ast::{
    AssignOp, BinaryOp, Decl, Expr, ExprKind, Function, Import, Item, Module, Param,
    QualifiedPath, Stmt, StmtKind, TypeRef, TypeRefKind, UnaryOp, WhenArm,
};
pub use comment::{Comment, CommentKind, CommentList};
pub use file::{FileRevision, SourceFile};
pub use ids::{ArmRange, ExprId, ExprRange, StmtId, StmtRange, TypeRefId};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList};
pub use tree::{Checkpoint, SyntaxTree};

static_assert_size!(Span, 8);
static_assert_size!(ExprId, 4);
static_assert_size!(Name, 4);
