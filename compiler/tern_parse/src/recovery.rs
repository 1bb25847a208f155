//! Error recovery for the parser.
//!
//! After an error the parser skips to a synchronization point so that one
//! mistake produces one diagnostic.

use std::mem::discriminant;

use tern_ir::TokenKind;

use crate::cursor::Cursor;

/// Tokens that end a statement.
pub(crate) const STMT_BOUNDARY: &[TokenKind] =
    &[TokenKind::Newline, TokenKind::Semicolon, TokenKind::RBrace];

/// Tokens that start a top-level item.
pub(crate) const ITEM_BOUNDARY: &[TokenKind] = &[
    TokenKind::Fun,
    TokenKind::Val,
    TokenKind::Var,
    TokenKind::Import,
];

fn contains(set: &[TokenKind], kind: TokenKind) -> bool {
    set.iter().any(|k| discriminant(k) == discriminant(&kind))
}

/// Skip tokens until one in `stop` is reached outside any nested
/// parentheses or braces. The stop token is not consumed.
pub(crate) fn synchronize(cursor: &mut Cursor<'_>, stop: &[TokenKind]) {
    let mut depth = 0usize;
    while !cursor.is_at_end() {
        let kind = cursor.current_kind();
        if depth == 0 && contains(stop, kind) {
            return;
        }
        match kind {
            TokenKind::LBrace | TokenKind::LParen => depth += 1,
            TokenKind::RBrace | TokenKind::RParen => depth = depth.saturating_sub(1),
            _ => {}
        }
        cursor.advance();
    }
}
