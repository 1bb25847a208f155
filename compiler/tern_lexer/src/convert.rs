//! Token Conversion
//!
//! Converts raw logos tokens to final `TokenKind` with string interning.

use tern_ir::{StringInterner, TokenKind};

use crate::escape::{unescape_char, unescape_string};
use crate::raw_token::RawToken;

/// Convert a raw token to a `TokenKind`, interning strings.
///
/// Returns `None` for trivia (comments); newlines are significant and are
/// converted like any other token.
pub(crate) fn convert_token(
    raw: RawToken,
    slice: &str,
    interner: &StringInterner,
) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::LineComment | RawToken::BlockComment => return None,
        RawToken::Newline => TokenKind::Newline,

        // Literals
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::Double(f) => TokenKind::Double(f.to_bits()),
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(interner.intern(&unescape_string(content)))
        }
        RawToken::Char => TokenKind::Char(unescape_char(&slice[1..slice.len() - 1])),
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        // Keywords
        RawToken::Package => TokenKind::Package,
        RawToken::Import => TokenKind::Import,
        RawToken::Fun => TokenKind::Fun,
        RawToken::Val => TokenKind::Val,
        RawToken::Var => TokenKind::Var,
        RawToken::Return => TokenKind::Return,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::When => TokenKind::When,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::As => TokenKind::As,

        // Delimiters
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::Question => TokenKind::Question,

        // Assignment operators
        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,

        // Operators
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::Bang => TokenKind::Bang,
    };
    Some(kind)
}
