//! The `fmt` command.

use tern_ir::StringInterner;

use super::load;

/// Print `path` in canonical layout.
pub fn format_file(path: &str) {
    let interner = StringInterner::new();
    let file = load(path, &interner);
    print!("{}", tern_fmt::format_file(&file, &interner));
}
