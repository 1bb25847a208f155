//! Recursive descent parser for Tern.
//!
//! Produces a flat [`SyntaxTree`] plus the module's items. Parsing never
//! stops at the first error: errors are collected and the parser resumes at
//! the next statement or item boundary.

mod cursor;
mod error;
mod grammar;
mod recovery;

use std::path::Path;

pub use cursor::Cursor;
pub use error::ParseError;

use tern_ir::{
    Expr, ExprId, ExprKind, Module, Name, SourceFile, Span, StringInterner, SyntaxTree, Token,
    TokenKind, TokenList,
};
use tern_lexer::LexOutput;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    tree: SyntaxTree,
    errors: Vec<ParseError>,
}

/// Result of parsing a token list.
#[derive(Debug)]
pub struct ParseResult {
    pub module: Module,
    pub tree: SyntaxTree,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A parsed file together with the errors found while parsing it.
#[derive(Debug)]
pub struct ParseOutput {
    pub file: SourceFile,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            tree: SyntaxTree::with_capacity(tokens.len() * 4),
            errors: Vec::new(),
        }
    }

    // Cursor delegation

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    #[inline]
    fn skip_newlines(&mut self) {
        self.cursor.skip_newlines();
    }

    #[inline]
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.cursor.expect(kind)
    }

    #[inline]
    fn expect_ident(&mut self) -> Result<Name, ParseError> {
        self.cursor.expect_ident()
    }

    // Tree helpers

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.tree.alloc_expr(Expr::new(kind, span))
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }

    fn error(&mut self, error: ParseError) {
        tracing::trace!(message = %error.message, span = ?error.span, "parse error");
        self.errors.push(error);
    }

    /// Parse a whole module.
    pub fn parse_module(mut self) -> ParseResult {
        let module = self.module();
        ParseResult {
            module,
            tree: self.tree,
            errors: self.errors,
        }
    }
}

/// Parse a token list into a module and its syntax tree.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> ParseResult {
    Parser::new(tokens, interner).parse_module()
}

/// Lex and parse `text` as the file at `path`.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file(path: impl AsRef<Path>, text: &str, interner: &StringInterner) -> ParseOutput {
    let LexOutput { tokens, comments } = tern_lexer::lex(text, interner);
    let ParseResult {
        module,
        tree,
        errors,
    } = parse(&tokens, interner);
    tracing::debug!(
        tokens = tokens.len(),
        comments = comments.len(),
        exprs = tree.expr_count(),
        errors = errors.len(),
        "parsed"
    );
    let mut file = SourceFile::new(path.as_ref(), text, tree, module);
    file.comments = comments;
    file.error_count = errors.len();
    ParseOutput { file, errors }
}

#[cfg(test)]
mod tests;
