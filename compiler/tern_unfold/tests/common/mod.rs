//! Shared helpers for the unfolding tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use tern_ir::{SourceFile, StmtId, StringInterner};
use tern_parse::parse_file;
use tern_types::{AnalysisCache, LocalResolver};
use tern_unfold::{UnfoldError, UnfoldOptions, Unfolded, Unfolder};

pub fn parse(source: &str, interner: &StringInterner) -> SourceFile {
    let output = parse_file("test.tn", source, interner);
    assert!(!output.has_errors(), "{source}\n{:?}", output.errors);
    output.file
}

/// The statement starting at the first occurrence of `needle`.
pub fn stmt_at(file: &SourceFile, needle: &str) -> StmtId {
    let offset = offset_of(file, needle);
    let count = u32::try_from(file.tree.stmt_count()).unwrap_or(u32::MAX);
    (0..count)
        .map(StmtId::new)
        .find(|&id| file.tree.stmt(id).span.start == offset)
        .unwrap_or_else(|| panic!("no statement starts at `{needle}`"))
}

pub fn offset_of(file: &SourceFile, needle: &str) -> u32 {
    let offset = file
        .text()
        .find(needle)
        .unwrap_or_else(|| panic!("`{needle}` not in source"));
    u32::try_from(offset).unwrap_or(u32::MAX)
}

pub fn print(file: &SourceFile, interner: &StringInterner) -> String {
    tern_fmt::format_file(file, interner)
}

/// Unfold the statement at `needle` with a fresh local resolver.
pub fn unfold_at(
    file: &mut SourceFile,
    interner: &StringInterner,
    needle: &str,
    options: UnfoldOptions,
) -> Result<Unfolded, UnfoldError> {
    let stmt = stmt_at(file, needle);
    let mut cache = AnalysisCache::new();
    let mut resolver = LocalResolver::new(&mut cache, interner);
    Unfolder::new(interner)
        .with_options(options)
        .unfold(file, stmt, &mut resolver)
}

/// Parse `source`, unfold the statement at `needle`, and print the result.
pub fn unfolded(source: &str, needle: &str) -> String {
    unfolded_with(source, needle, UnfoldOptions::default())
}

pub fn unfolded_with(source: &str, needle: &str, options: UnfoldOptions) -> String {
    let interner = StringInterner::new();
    let mut file = parse(source, &interner);
    if let Err(err) = unfold_at(&mut file, &interner, needle, options) {
        panic!("unfolding `{needle}` failed: {err}");
    }
    print(&file, &interner)
}
