//! Parsed source files.

use std::hash::Hasher;
use std::path::{Path, PathBuf};

use rustc_hash::FxHasher;

use crate::ast::Module;
use crate::{CommentList, SyntaxTree};

/// Identity of one state of a file's tree.
///
/// `content` hashes the text the tree was parsed from; `edits` counts
/// in-place tree edits made since. Two trees with equal revisions for the
/// same path are interchangeable for analysis purposes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FileRevision {
    pub content: u64,
    pub edits: u32,
}

impl FileRevision {
    pub fn of_text(text: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write(text.as_bytes());
        FileRevision {
            content: hasher.finish(),
            edits: 0,
        }
    }
}

/// A parsed file: its text, syntax tree and module items.
///
/// `text` is the text the tree was parsed from; after an edit it no longer
/// matches the tree. Print the tree to obtain current source.
#[derive(Clone, Debug)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    revision: FileRevision,
    pub tree: SyntaxTree,
    pub module: Module,
    /// Comments of `text`, which the tree does not hold.
    pub comments: CommentList,
    /// Number of errors reported while parsing.
    pub error_count: usize,
}

impl SourceFile {
    pub fn new(
        path: impl Into<PathBuf>,
        text: impl Into<String>,
        tree: SyntaxTree,
        module: Module,
    ) -> Self {
        let text = text.into();
        SourceFile {
            path: path.into(),
            revision: FileRevision::of_text(&text),
            text,
            tree,
            module,
            comments: CommentList::new(),
            error_count: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn revision(&self) -> FileRevision {
        self.revision
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Record that the tree was edited in place.
    ///
    /// Analysis results keyed by the previous revision become stale.
    pub fn mark_edited(&mut self) {
        self.revision.edits = self.revision.edits.wrapping_add(1);
    }
}
