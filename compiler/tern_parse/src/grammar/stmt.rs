//! Blocks, statements, declarations and assignments.

use tern_ir::{AssignOp, Decl, ExprId, ExprKind, Stmt, StmtId, StmtKind, TokenKind, TypeRefId};

use crate::recovery::{synchronize, STMT_BOUNDARY};
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `{ stmt (NL | ;) ... }`
    pub(crate) fn block(&mut self) -> Result<ExprId, ParseError> {
        let open = self.expect(TokenKind::LBrace)?.span;
        let mut stmts = Vec::new();

        loop {
            self.cursor.skip_separators();
            match self.current_kind() {
                TokenKind::RBrace => break,
                TokenKind::Eof => {
                    return Err(ParseError::new("unclosed block", self.current_span())
                        .with_context(format!("block opened at offset {}", open.start)));
                }
                _ => {}
            }

            match self.statement() {
                Ok(stmt) => {
                    stmts.push(stmt);
                    if !matches!(
                        self.current_kind(),
                        TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace
                    ) {
                        let found = self.current_kind().display_name();
                        let span = self.current_span();
                        self.error(ParseError::new(
                            format!("expected newline or `;` after statement, found {found}"),
                            span,
                        ));
                        synchronize(&mut self.cursor, STMT_BOUNDARY);
                    }
                }
                Err(e) => {
                    self.error(e);
                    synchronize(&mut self.cursor, STMT_BOUNDARY);
                }
            }
        }

        self.expect(TokenKind::RBrace)?;
        let range = self.tree.alloc_stmt_list(&stmts);
        let span = self.span_from(open);
        Ok(self.alloc(ExprKind::Block(range), span))
    }

    /// A declaration, or an expression possibly followed by an assignment.
    pub(crate) fn statement(&mut self) -> Result<StmtId, ParseError> {
        if matches!(self.current_kind(), TokenKind::Val | TokenKind::Var) {
            return self.declaration();
        }
        let expr = self.expr_or_assign()?;
        let span = self.tree.expr_span(expr);
        Ok(self.tree.alloc_stmt(Stmt::new(StmtKind::Expr(expr), span)))
    }

    /// `val name: Type = init` / `var name = init`
    pub(crate) fn declaration(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        let mutable = match self.current_kind() {
            TokenKind::Var => true,
            TokenKind::Val => false,
            other => {
                return Err(ParseError::new(
                    format!("expected `val` or `var`, found {}", other.display_name()),
                    start,
                ))
            }
        };
        self.advance();
        let name = self.expect_ident()?;

        let ty = if self.check(TokenKind::Colon) {
            self.advance();
            self.type_ref()?
        } else {
            TypeRefId::INVALID
        };

        let init = if self.check(TokenKind::Eq) {
            self.advance();
            self.skip_newlines();
            self.expr()?
        } else {
            ExprId::INVALID
        };

        let decl = Decl {
            name,
            ty,
            init,
            mutable,
        };
        let span = self.span_from(start);
        Ok(self.tree.alloc_stmt(Stmt::new(StmtKind::Decl(decl), span)))
    }

    /// An expression, or `target op= value` when an assignment operator
    /// follows. Accepted in statement position and as a branch body.
    pub(crate) fn expr_or_assign(&mut self) -> Result<ExprId, ParseError> {
        let target = self.expr()?;
        let Some(op) = self.match_assign_op() else {
            return Ok(target);
        };

        let target_span = self.tree.expr_span(target);
        if !matches!(
            self.tree.expr_kind(target),
            ExprKind::Ident(_) | ExprKind::Field { .. }
        ) {
            return Err(ParseError::new("invalid assignment target", target_span)
                .with_context("only names and fields can be assigned"));
        }

        self.advance();
        self.skip_newlines();
        let value = self.expr()?;
        let span = target_span.merge(self.tree.expr_span(value));
        Ok(self.alloc(ExprKind::Assign { target, op, value }, span))
    }

    /// Body of an `if` branch or a `when` arm: a block or a single
    /// expression/assignment.
    pub(crate) fn branch_body(&mut self) -> Result<ExprId, ParseError> {
        if self.check(TokenKind::LBrace) {
            self.block()
        } else {
            self.expr_or_assign()
        }
    }

    fn match_assign_op(&self) -> Option<AssignOp> {
        match self.current_kind() {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::Add),
            TokenKind::MinusEq => Some(AssignOp::Sub),
            TokenKind::StarEq => Some(AssignOp::Mul),
            TokenKind::SlashEq => Some(AssignOp::Div),
            TokenKind::PercentEq => Some(AssignOp::Rem),
            _ => None,
        }
    }
}
