//! Prefix operators, casts, calls and field access.

use tern_ir::stack::ensure_sufficient_stack;
use tern_ir::{ExprId, ExprKind, ExprRange, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `!x`, `-x`, then `as` casts.
    pub(crate) fn prefix(&mut self) -> Result<ExprId, ParseError> {
        if let Some(op) = self.match_unary_op() {
            let start = self.advance().span;
            let operand = ensure_sufficient_stack(|| self.prefix())?;
            let span = start.merge(self.tree.expr_span(operand));
            return Ok(self.alloc(ExprKind::Unary { op, operand }, span));
        }

        let mut expr = self.postfix()?;
        while self.check(TokenKind::As) {
            self.advance();
            let ty = self.type_ref()?;
            let span = self.span_from(self.tree.expr_span(expr));
            expr = self.alloc(ExprKind::Cast { expr, ty }, span);
        }
        Ok(expr)
    }

    /// Primary expression followed by calls and field accesses.
    fn postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.primary()?;
        loop {
            match self.current_kind() {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.call_args()?;
                    let span = self.span_from(self.tree.expr_span(expr));
                    expr = self.alloc(ExprKind::Call { callee: expr, args }, span);
                }
                TokenKind::Dot => {
                    self.advance();
                    let name = self.expect_ident()?;
                    let span = self.span_from(self.tree.expr_span(expr));
                    expr = self.alloc(ExprKind::Field { receiver: expr, name }, span);
                }
                // A call chain may continue on the next line: `a\n    .b()`
                TokenKind::Newline if self.cursor.peek_past_newlines() == TokenKind::Dot => {
                    self.skip_newlines();
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Arguments after `(`, through the closing `)`.
    fn call_args(&mut self) -> Result<ExprRange, ParseError> {
        let mut args = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenKind::RParen) {
                break;
            }
            args.push(self.expr()?);
            self.skip_newlines();
            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(self.tree.alloc_expr_list(&args))
    }
}
