//! The `check` command: parse a file and list its unfoldable statements.

use tern_ir::StringInterner;
use tern_unfold::unfoldable_statements;

use super::load;
use crate::position::line_col;

/// Parse `path` and print one line per unfoldable statement.
pub fn check_file(path: &str) {
    let interner = StringInterner::new();
    let file = load(path, &interner);
    let candidates = unfoldable_statements(&file);
    for (stmt, kind) in &candidates {
        let (line, col) = line_col(file.text(), file.tree.stmt(*stmt).span.start);
        println!("{path}:{line}:{col}: {kind}");
    }
    println!("OK: {path} ({} unfoldable statement(s))", candidates.len());
}
