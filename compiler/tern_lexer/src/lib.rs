//! Lexer for Tern using logos with string interning.
//!
//! Newlines are significant (they terminate statements) and are emitted as
//! `TokenKind::Newline`. Horizontal whitespace is dropped; comments are
//! collected into a `CommentList` beside the tokens.

mod convert;
mod escape;
mod raw_token;

use logos::Logos;
use tern_ir::{
    Comment, CommentKind, CommentList, Span, StringInterner, Token, TokenKind, TokenList,
};

use crate::convert::convert_token;
use crate::raw_token::RawToken;

pub use escape::{escape_char, escape_string};

/// Output of [`lex`].
#[derive(Clone, Debug)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub comments: CommentList,
}

/// Lex source code into tokens and comments.
///
/// Unrecognized input, including an unterminated block comment, becomes
/// `TokenKind::Error`; the token list always ends with `Eof`.
///
/// # Panics
/// Panics if the source exceeds `u32::MAX` bytes.
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    let mut tokens = TokenList::with_capacity(source.len() / 3);
    let mut comments = CommentList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = to_span(logos.span());
        match token_result {
            Ok(RawToken::LineComment) => comments.push(Comment::new(
                interner.intern(logos.slice()),
                span,
                CommentKind::Line,
            )),
            Ok(RawToken::BlockComment) => comments.push(Comment::new(
                interner.intern(logos.slice()),
                span,
                CommentKind::Block,
            )),
            Ok(raw) => {
                if let Some(kind) = convert_token(raw, logos.slice(), interner) {
                    tokens.push(Token::new(kind, span));
                }
            }
            Err(()) => tokens.push(Token::new(TokenKind::Error, span)),
        }
    }

    let eof_pos = u32::try_from(source.len())
        .unwrap_or_else(|_| panic!("source file exceeds {} bytes", u32::MAX));
    tokens.push(Token::new(TokenKind::Eof, Span::point(eof_pos)));

    LexOutput { tokens, comments }
}

fn to_span(range: std::ops::Range<usize>) -> Span {
    Span::try_from_range(range).unwrap_or_else(|e| panic!("{e}"))
}
