//! Primary expressions: literals, names, parentheses, `if`, `when`, `return`.

use tern_ir::{ExprId, ExprKind, Span, TokenKind, WhenArm};

use crate::recovery::{synchronize, STMT_BOUNDARY};
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        let kind = match token.kind {
            TokenKind::Int(n) => ExprKind::Int(n),
            TokenKind::Double(bits) => ExprKind::Double(bits),
            TokenKind::Str(name) => ExprKind::Str(name),
            TokenKind::Char(c) => ExprKind::Char(c),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Ident(name) => ExprKind::Ident(name),
            TokenKind::LParen => return self.parenthesized(),
            TokenKind::If => return self.if_expr(),
            TokenKind::When => return self.when_expr(),
            TokenKind::Return => return self.return_expr(),
            other => {
                return Err(ParseError::new(
                    format!("expected expression, found {}", other.display_name()),
                    token.span,
                ))
            }
        };
        self.advance();
        Ok(self.alloc(kind, token.span))
    }

    fn parenthesized(&mut self) -> Result<ExprId, ParseError> {
        self.expect(TokenKind::LParen)?;
        self.skip_newlines();
        let inner = self.expr()?;
        self.skip_newlines();
        self.expect(TokenKind::RParen)?;
        Ok(inner)
    }

    /// `if (cond) then else other`
    ///
    /// `else` may follow on a later line.
    fn if_expr(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::If)?.span;
        self.expect(TokenKind::LParen)?;
        self.skip_newlines();
        let cond = self.expr()?;
        self.skip_newlines();
        self.expect(TokenKind::RParen)?;
        self.skip_newlines();
        let then_branch = self.branch_body()?;

        let else_branch = if self.cursor.peek_past_newlines() == TokenKind::Else {
            self.skip_newlines();
            self.advance();
            self.skip_newlines();
            self.branch_body()?
        } else {
            ExprId::INVALID
        };

        let span = self.span_from(start);
        Ok(self.alloc(
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    /// `when (subject)? { c1, c2 -> body ... else -> body }`
    ///
    /// At most one `else` arm is accepted, and it must come last.
    fn when_expr(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::When)?.span;
        let subject = if self.check(TokenKind::LParen) {
            self.parenthesized()?
        } else {
            ExprId::INVALID
        };
        self.skip_newlines();
        self.expect(TokenKind::LBrace)?;

        let mut arms = Vec::new();
        let mut else_body = ExprId::INVALID;
        let mut else_span: Option<Span> = None;

        loop {
            self.cursor.skip_separators();
            match self.current_kind() {
                TokenKind::RBrace => break,
                TokenKind::Eof => {
                    return Err(ParseError::new("unclosed `when`", self.current_span()));
                }
                _ => {}
            }

            let arm_start = self.current_span();
            if self.check(TokenKind::Else) {
                match self.else_arm() {
                    Ok(body) => {
                        if let Some(first) = else_span {
                            self.error(
                                ParseError::new("duplicate `else` arm in `when`", arm_start)
                                    .with_context(format!(
                                        "first `else` arm at offset {}",
                                        first.start
                                    )),
                            );
                        } else {
                            else_body = body;
                            else_span = Some(arm_start);
                        }
                    }
                    Err(e) => self.recover_arm(e),
                }
                continue;
            }

            match self.when_arm() {
                Ok(arm) => {
                    if else_span.is_some() {
                        self.error(ParseError::new(
                            "`else` must be the last arm of `when`",
                            arm.span,
                        ));
                    }
                    arms.push(arm);
                }
                Err(e) => self.recover_arm(e),
            }
        }

        self.expect(TokenKind::RBrace)?;
        let arms = self.tree.alloc_arms(&arms);
        let span = self.span_from(start);
        Ok(self.alloc(
            ExprKind::When {
                subject,
                arms,
                else_body,
            },
            span,
        ))
    }

    fn recover_arm(&mut self, error: ParseError) {
        self.error(error);
        synchronize(&mut self.cursor, STMT_BOUNDARY);
    }

    fn else_arm(&mut self) -> Result<ExprId, ParseError> {
        self.expect(TokenKind::Else)?;
        self.expect(TokenKind::Arrow)?;
        self.skip_newlines();
        self.branch_body()
    }

    fn when_arm(&mut self) -> Result<WhenArm, ParseError> {
        let start = self.current_span();
        let mut conditions = vec![self.expr()?];
        while self.check(TokenKind::Comma) {
            self.advance();
            self.skip_newlines();
            conditions.push(self.expr()?);
        }
        self.expect(TokenKind::Arrow)?;
        self.skip_newlines();
        let body = self.branch_body()?;
        Ok(WhenArm {
            conditions: self.tree.alloc_expr_list(&conditions),
            body,
            span: self.span_from(start),
        })
    }

    /// `return` with an optional value on the same line.
    fn return_expr(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::Return)?.span;
        let value = match self.current_kind() {
            TokenKind::Newline
            | TokenKind::Semicolon
            | TokenKind::RBrace
            | TokenKind::RParen
            | TokenKind::Comma
            | TokenKind::Else
            | TokenKind::Eof => ExprId::INVALID,
            _ => self.expr()?,
        };
        let span = self.span_from(start);
        Ok(self.alloc(ExprKind::Return(value), span))
    }
}
