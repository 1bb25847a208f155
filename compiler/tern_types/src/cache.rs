//! Memoized file analyses.

use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tern_ir::{FileRevision, SourceFile, StringInterner};
use tracing::debug;

use crate::Analysis;

/// Identity of an analysed file state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub path: PathBuf,
    pub revision: FileRevision,
}

impl FileKey {
    pub fn of(file: &SourceFile) -> Self {
        FileKey {
            path: file.path().to_path_buf(),
            revision: file.revision(),
        }
    }
}

/// Hit and miss counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Analyses keyed by file revision.
///
/// At most one revision per path is kept: analysing a new revision evicts
/// the previous one.
#[derive(Default)]
pub struct AnalysisCache {
    entries: FxHashMap<FileKey, Analysis>,
    stats: CacheStats,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analysis of the file's current revision, computing it on a miss.
    pub fn analysis(&mut self, file: &SourceFile, interner: &StringInterner) -> &Analysis {
        let key = FileKey::of(file);
        if !self.entries.contains_key(&key) {
            let before = self.entries.len();
            self.entries.retain(|cached, _| cached.path != key.path);
            if self.entries.len() < before {
                debug!(path = %key.path.display(), "evicted stale analysis");
            }
        }
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                entry.insert(Analysis::of(file, interner))
            }
        }
    }

    /// Drop every analysis of `path`.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.retain(|cached, _| cached.path != path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, key: &FileKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
