//! Type reference parsing: `a.b.C<T, U>?` and the placeholder `_`.

use tern_ir::{TokenKind, TypeRef, TypeRefId, TypeRefKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn type_ref(&mut self) -> Result<TypeRefId, ParseError> {
        let start = self.current_span();
        if self.cursor.check_ident_text("_") {
            self.advance();
            return Ok(self
                .tree
                .alloc_type_ref(TypeRef::new(TypeRefKind::Placeholder, start)));
        }

        let mut path = vec![self.expect_ident()?];
        while self.check(TokenKind::Dot) {
            self.advance();
            path.push(self.expect_ident()?);
        }

        let mut args = Vec::new();
        if self.check(TokenKind::Lt) {
            self.advance();
            loop {
                args.push(self.type_ref()?);
                if self.check(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
            self.expect(TokenKind::Gt)?;
        }

        let nullable = self.check(TokenKind::Question);
        if nullable {
            self.advance();
        }

        let kind = TypeRefKind::Named {
            path,
            args,
            nullable,
        };
        let span = self.span_from(start);
        Ok(self.tree.alloc_type_ref(TypeRef::new(kind, span)))
    }
}
