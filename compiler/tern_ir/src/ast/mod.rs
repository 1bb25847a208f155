//! AST node definitions.

mod expr;
mod items;
mod operators;
mod stmt;
mod types;

pub use expr::{Expr, ExprKind, WhenArm};
pub use items::{Function, Import, Item, Module, Param, QualifiedPath};
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use stmt::{Decl, Stmt, StmtKind};
pub use types::{TypeRef, TypeRefKind};
