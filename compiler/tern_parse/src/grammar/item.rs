//! Module-level parsing: package header, imports, functions, properties.

use tern_ir::{Function, Import, Item, Module, Param, QualifiedPath, TokenKind, TypeRefId};

use crate::recovery::{synchronize, ITEM_BOUNDARY};
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a module: `package`? `import`* (`fun` | `val` | `var`)*
    pub(crate) fn module(&mut self) -> Module {
        let mut module = Module::new();
        self.cursor.skip_separators();

        if self.check(TokenKind::Package) {
            match self.package_header() {
                Ok(path) => module.package = Some(path),
                Err(e) => self.recover_item(e),
            }
        }

        loop {
            self.cursor.skip_separators();
            if !self.check(TokenKind::Import) {
                break;
            }
            match self.import() {
                Ok(import) => module.imports.push(import),
                Err(e) => self.recover_item(e),
            }
        }

        loop {
            self.cursor.skip_separators();
            if self.cursor.is_at_end() {
                break;
            }
            let start = self.cursor.position();
            if self.check(TokenKind::Import) {
                let span = self.current_span();
                self.error(ParseError::new("imports must come before declarations", span));
                match self.import() {
                    Ok(import) => module.imports.push(import),
                    Err(e) => self.recover_item(e),
                }
                continue;
            }
            match self.item() {
                Ok(item) => {
                    module.items.push(item);
                    if let Err(e) = self.item_terminator() {
                        self.recover_item(e);
                    }
                }
                Err(e) => self.recover_item(e),
            }
            if self.cursor.position() == start {
                // No progress: drop the offending token.
                self.advance();
            }
        }

        module
    }

    fn recover_item(&mut self, error: ParseError) {
        self.error(error);
        synchronize(&mut self.cursor, ITEM_BOUNDARY);
    }

    fn item_terminator(&mut self) -> Result<(), ParseError> {
        match self.current_kind() {
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof => Ok(()),
            other => Err(ParseError::new(
                format!("expected newline after declaration, found {}", other.display_name()),
                self.current_span(),
            )),
        }
    }

    fn item(&mut self) -> Result<Item, ParseError> {
        match self.current_kind() {
            TokenKind::Fun => self.function().map(Item::Function),
            TokenKind::Val | TokenKind::Var => self.declaration().map(Item::Property),
            other => Err(ParseError::new(
                format!(
                    "expected `fun`, `val` or `var` declaration, found {}",
                    other.display_name()
                ),
                self.current_span(),
            )),
        }
    }

    fn package_header(&mut self) -> Result<QualifiedPath, ParseError> {
        self.expect(TokenKind::Package)?;
        let start = self.current_span();
        let mut segments = vec![self.expect_ident()?];
        while self.check(TokenKind::Dot) {
            self.advance();
            segments.push(self.expect_ident()?);
        }
        Ok(QualifiedPath {
            segments,
            span: self.span_from(start),
        })
    }

    /// `import a.b.C`, `import a.b.C as D`, `import a.b.*`
    fn import(&mut self) -> Result<Import, ParseError> {
        let start = self.expect(TokenKind::Import)?.span;
        let mut path = vec![self.expect_ident()?];
        let mut star = false;
        while self.check(TokenKind::Dot) {
            self.advance();
            if self.check(TokenKind::Star) {
                self.advance();
                star = true;
                break;
            }
            path.push(self.expect_ident()?);
        }
        let alias = if !star && self.check(TokenKind::As) {
            self.advance();
            Some(self.expect_ident()?)
        } else {
            None
        };
        Ok(Import {
            path,
            star,
            alias,
            span: self.span_from(start),
        })
    }

    /// `fun name(p: T, ...): R { ... }` or `fun name(...) = expr`
    fn function(&mut self) -> Result<Function, ParseError> {
        let start = self.expect(TokenKind::Fun)?.span;
        let name = self.expect_ident()?;
        let params = self.params()?;

        let ret = if self.check(TokenKind::Colon) {
            self.advance();
            self.type_ref()?
        } else {
            TypeRefId::INVALID
        };

        let (body, expr_body) = if self.check(TokenKind::Eq) {
            self.advance();
            self.skip_newlines();
            (self.expr()?, true)
        } else {
            (self.block()?, false)
        };

        Ok(Function {
            name,
            params,
            ret,
            body,
            expr_body,
            span: self.span_from(start),
        })
    }

    fn params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenKind::RParen) {
                break;
            }
            let start = self.current_span();
            let name = self.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.type_ref()?;
            params.push(Param {
                name,
                ty,
                span: self.span_from(start),
            });
            self.skip_newlines();
            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.skip_newlines();
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }
}
