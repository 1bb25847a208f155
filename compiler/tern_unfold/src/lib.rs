//! Branched-expression unfolding.
//!
//! Rewrites a statement that consumes the value of an `if`/`when` so the
//! consuming operation moves into every branch:
//!
//! ```text
//! x += if (c) 1 else 2        =>  if (c) x += 1 else x += 2
//! return when (n) { ... }     =>  when (n) { 1 -> return a ... }
//! val y = if (c) a else b     =>  val y: T
//!                                 if (c) y = a else y = b
//! ```
//!
//! [`classify`] decides which of the six [`UnfoldableKind`]s applies to a
//! statement; [`Unfolder`] performs the rewrite. All three rewrites share
//! one algorithm, [`distribute`], parameterized by a [`WrapTail`] strategy.
//!
//! Only conditionals with a catch-all qualify: an `if` needs an `else`,
//! exactly as a `when` needs an `else` arm. An `if` without `else` is
//! rejected with [`Precondition::MissingCatchAll`].
//!
//! An unfolding either applies completely or leaves the tree exactly as it
//! was.

mod branched;
mod classify;
mod error;
mod kind;
mod locate;
mod unfold;
mod wrap;

pub use branched::{BranchedExpr, Bodies};
pub use classify::{classify, find_candidate, unfoldable_statements, UNFOLD_WITHOUT_CHECK};
pub use error::{Precondition, UnfoldError};
pub use kind::{Consumer, Shape, UnfoldableKind};
pub use locate::locate_tail;
pub use unfold::{UnfoldOptions, Unfolded, Unfolder};
pub use wrap::{distribute, AssignTail, BindTail, ReturnTail, WrapTail};

#[cfg(test)]
mod tests;
