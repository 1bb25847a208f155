//! Tern Printer
//!
//! Renders a syntax tree back to source text. Used to show the result of a
//! rewrite and to write edited files back to disk.
//!
//! Layout is fixed rather than width-driven: blocks always break, `when`
//! prints one arm per line, everything else stays on one line. Parentheses
//! are inserted from operator precedence, so trees built by rewrites print
//! correctly without source parentheses.
//!
//! Comments are printed where they were written: before the statement, arm
//! or item that follows them, after the one whose line they end, or before
//! the closing brace of their block.
//!
//! # Modules
//!
//! - `comments`: Re-attaching source comments to printed nodes
//! - [`emitter`]: Output abstraction
//! - `printer`: Rendering of modules, statements, expressions and types

mod comments;
pub mod emitter;
mod printer;

pub use emitter::{Emitter, StringEmitter, INDENT_WIDTH};
pub use printer::{
    format_expr, format_file, format_file_at, format_stmt, format_type_ref, Printer,
};
