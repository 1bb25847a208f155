//! The `unfold` command: rewrite the statement under the caret.

use tern_ir::StringInterner;
use tern_types::{AnalysisCache, LocalResolver};
use tern_unfold::{find_candidate, Unfolder};

use super::load;
use crate::position::{line_col, Position};

/// Unfold the innermost candidate at `position` in `path`.
///
/// Prints the rewritten file, or writes it back with `write`. The applied
/// action and the new caret, as a position in the rewritten file, go to
/// stderr.
pub fn unfold_file(path: &str, position: Position, write: bool) {
    let interner = StringInterner::new();
    let mut file = load(path, &interner);

    let Some(offset) = position.to_offset(file.text()) else {
        eprintln!("{path}: position {position:?} is outside the file");
        std::process::exit(1);
    };
    let Some((stmt, kind)) = find_candidate(&file, offset) else {
        let (line, col) = line_col(file.text(), offset);
        eprintln!("{path}:{line}:{col}: nothing to unfold here");
        std::process::exit(1);
    };

    let mut cache = AnalysisCache::new();
    let mut resolver = LocalResolver::new(&mut cache, &interner);
    let unfolded = match Unfolder::new(&interner).unfold(&mut file, stmt, &mut resolver) {
        Ok(unfolded) => unfolded,
        Err(err) => {
            eprintln!("{path}: {kind}: {err}");
            std::process::exit(1);
        }
    };
    tracing::info!(%kind, caret = unfolded.caret, "applied");

    let anchor = unfolded.declaration.unwrap_or(unfolded.statement);
    let (output, printed_at) = tern_fmt::format_file_at(&file, &interner, anchor);
    let (line, col) = match printed_at.and_then(|at| u32::try_from(at).ok()) {
        Some(at) => line_col(&output, at),
        None => line_col(file.text(), unfolded.caret),
    };
    eprintln!("{path}:{line}:{col}: {kind}");
    if write {
        if let Err(e) = std::fs::write(path, &output) {
            eprintln!("error writing '{path}': {e}");
            std::process::exit(1);
        }
    } else {
        print!("{output}");
    }
}
