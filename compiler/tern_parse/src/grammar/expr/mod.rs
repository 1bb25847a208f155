//! Expression parsing.
//!
//! - `mod.rs`: entry point (`expr`) and binary operator precedence climbing
//! - `operators.rs`: operator matching helpers
//! - `primary.rs`: literals, names, parentheses, `if`, `when`, `return`
//! - `postfix.rs`: calls, field access, `as` casts, prefix operators
//!
//! Newlines end an expression except after a binary operator and inside
//! parentheses.

mod operators;
mod postfix;
mod primary;

use tern_ir::stack::ensure_sufficient_stack;
use tern_ir::{ExprId, ExprKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression (no assignment).
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow on deeply
    /// nested expressions.
    pub(crate) fn expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.binary(1))
    }

    /// Precedence climbing over `BinaryOp::precedence` (left-associative).
    fn binary(&mut self, min_prec: u8) -> Result<ExprId, ParseError> {
        let mut left = self.prefix()?;

        while let Some(op) = self.match_binary_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            self.skip_newlines();
            let right = self.binary(prec + 1)?;
            let span = self.tree.expr_span(left).merge(self.tree.expr_span(right));
            left = self.alloc(ExprKind::Binary { op, left, right }, span);
        }

        Ok(left)
    }
}
