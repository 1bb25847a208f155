//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use std::mem::discriminant;

use tern_ir::{Name, Span, StringInterner, Token, TokenKind, TokenList};

use crate::ParseError;

/// Cursor over a `TokenList`.
///
/// Invariant: the position is always valid; the last token is `Eof` and is
/// never consumed past.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        debug_assert!(
            matches!(tokens.as_slice().last(), Some(t) if t.kind == TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Current position; compare before and after parsing to detect progress.
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    /// Span of the most recently consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Check the current token's kind, ignoring literal payloads.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        discriminant(&self.current_kind()) == discriminant(&kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Check whether the current token is the identifier `text`.
    pub fn check_ident_text(&self, text: &str) -> bool {
        match self.current_kind() {
            TokenKind::Ident(name) => self.interner.lookup(name) == text,
            _ => false,
        }
    }

    /// Kind of the first token at or after the cursor that is not a newline.
    pub fn peek_past_newlines(&self) -> TokenKind {
        self.tokens.as_slice()[self.pos..]
            .iter()
            .map(|t| t.kind)
            .find(|k| *k != TokenKind::Newline)
            .unwrap_or(TokenKind::Eof)
    }

    /// Advance to the next token and return the consumed token.
    ///
    /// Never moves past `Eof`.
    #[inline]
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn skip_newlines(&mut self) {
        while self.current_kind() == TokenKind::Newline {
            self.advance();
        }
    }

    /// Skip statement separators: newlines and `;`.
    pub fn skip_separators(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline | TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Expect the current token to be of the given kind, advance and return it.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: TokenKind) -> ParseError {
        ParseError::new(
            format!(
                "expected {}, found {}",
                kind.display_name(),
                self.current_kind().display_name()
            ),
            self.current_span(),
        )
    }

    /// Expect and consume an identifier, returning its interned name.
    pub fn expect_ident(&mut self) -> Result<Name, ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            self.advance();
            Ok(name)
        } else {
            Err(ParseError::new(
                format!(
                    "expected identifier, found {}",
                    self.current_kind().display_name()
                ),
                self.current_span(),
            ))
        }
    }
}
