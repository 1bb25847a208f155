//! Types for Tern.
//!
//! - `Type`: semantic types with fully-qualified names
//! - `TypeResolver`: the seam the unfolding engine asks for expression types
//! - `LocalResolver` + `AnalysisCache`: whole-file inference, memoized per
//!   file revision
//! - `ImportScope` + `shorten_references`: rewriting qualified type
//!   references to their shortest unambiguous spelling
//!
//! Built-in types live in the `kotlin` and `kotlin.collections` packages,
//! which every file imports implicitly.

mod analysis;
mod builtins;
mod cache;
mod error;
mod lower;
mod resolver;
mod scope;
mod shorten;
mod ty;

pub use analysis::Analysis;
pub use builtins::Builtins;
pub use cache::{AnalysisCache, CacheStats, FileKey};
pub use error::ResolveError;
pub use lower::{ref_to_type, type_to_ref};
pub use resolver::{LocalResolver, TypeResolver};
pub use scope::{ImportScope, Resolution};
pub use shorten::shorten_references;
pub use ty::{Type, TypeDisplay};
