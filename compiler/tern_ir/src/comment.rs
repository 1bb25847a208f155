//! Source comments.
//!
//! Comments are captured by the lexer separately from tokens, so the parser
//! never sees them. The printer re-attaches them to the tree by position.

use std::fmt;

use super::{Name, Span};

/// A source comment with its span and verbatim text.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Comment {
    /// The whole comment including its `//` or `/* */` delimiters.
    pub text: Name,
    pub span: Span,
    pub kind: CommentKind,
}

impl Comment {
    #[inline]
    pub fn new(text: Name, span: Span, kind: CommentKind) -> Self {
        Comment { text, span, kind }
    }
}

impl fmt::Debug for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?} ({:?})", self.text, self.span, self.kind)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentKind {
    /// `// ...` up to the end of the line.
    Line,
    /// `/* ... */`, possibly spanning lines.
    Block,
}

/// All comments of a file, in source order.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct CommentList {
    comments: Vec<Comment>,
}

impl CommentList {
    #[inline]
    pub fn new() -> Self {
        CommentList {
            comments: Vec::new(),
        }
    }

    /// Push a comment. Comments must be pushed in source order.
    #[inline]
    pub fn push(&mut self, comment: Comment) {
        debug_assert!(
            self.comments
                .last()
                .is_none_or(|last| last.span.end <= comment.span.start),
            "comments pushed out of order"
        );
        self.comments.push(comment);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Comment] {
        &self.comments
    }
}

impl fmt::Debug for CommentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommentList({} comments)", self.comments.len())
    }
}

impl std::ops::Index<usize> for CommentList {
    type Output = Comment;

    fn index(&self, index: usize) -> &Comment {
        &self.comments[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StringInterner;

    #[test]
    fn test_comment_list_keeps_source_order() {
        let interner = StringInterner::new();
        let mut list = CommentList::new();
        assert!(list.is_empty());

        list.push(Comment::new(
            interner.intern("// a"),
            Span::new(0, 4),
            CommentKind::Line,
        ));
        list.push(Comment::new(
            interner.intern("/* b */"),
            Span::new(10, 17),
            CommentKind::Block,
        ));

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].kind, CommentKind::Block);
        assert_eq!(
            list.as_slice().iter().map(|c| c.span.start).collect::<Vec<_>>(),
            vec![0, 10]
        );
    }
}
