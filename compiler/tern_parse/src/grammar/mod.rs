//! Grammar rules, split by syntactic category.
//!
//! - `item.rs`: package header, imports, functions, properties
//! - `stmt.rs`: blocks, statements, declarations, assignments
//! - `expr/`: expressions
//! - `ty.rs`: type references

mod expr;
mod item;
mod stmt;
mod ty;
