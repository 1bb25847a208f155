//! Comment Re-attachment
//!
//! The tree holds no comments, so the printer asks a [`CommentIndex`] for
//! them by source position as it walks nodes in source order. Each comment
//! is handed out once. Rewritten nodes keep the spans of the source they
//! came from, which keeps their comments next to them.

use tern_ir::{Comment, CommentList};

pub(crate) struct CommentIndex<'a> {
    comments: &'a [Comment],
    /// Source the comment spans point into.
    text: &'a str,
    consumed: Vec<bool>,
}

impl<'a> CommentIndex<'a> {
    pub(crate) fn new(comments: &'a CommentList, text: &'a str) -> Self {
        CommentIndex {
            comments: comments.as_slice(),
            text,
            consumed: vec![false; comments.len()],
        }
    }

    pub(crate) fn empty() -> Self {
        CommentIndex {
            comments: &[],
            text: "",
            consumed: Vec::new(),
        }
    }

    /// Take every unconsumed comment that ends at or before `pos`.
    pub(crate) fn take_before(&mut self, pos: u32) -> Vec<Comment> {
        self.take_where(|c| c.span.end <= pos)
    }

    /// Take unconsumed comments that start at or after `end` on the same
    /// source line. Nodes without a source position (`end == 0`) have none.
    pub(crate) fn take_trailing(&mut self, end: u32) -> Vec<Comment> {
        let Some(rest) = self.text.get(end as usize..).filter(|_| end > 0) else {
            return Vec::new();
        };
        let line_end = rest
            .find('\n')
            .map_or(self.text.len(), |i| end as usize + i);
        self.take_where(|c| c.span.start >= end && (c.span.start as usize) < line_end)
    }

    /// Take everything not yet handed out.
    pub(crate) fn take_remaining(&mut self) -> Vec<Comment> {
        self.take_where(|_| true)
    }

    fn take_where(&mut self, mut pred: impl FnMut(&Comment) -> bool) -> Vec<Comment> {
        let mut taken = Vec::new();
        for (comment, consumed) in self.comments.iter().zip(self.consumed.iter_mut()) {
            if !*consumed && pred(comment) {
                *consumed = true;
                taken.push(*comment);
            }
        }
        taken
    }
}
