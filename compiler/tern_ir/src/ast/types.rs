//! Type references as written in source.
//!
//! A `TypeRef` is the unresolved spelling of a type annotation
//! (`kotlin.collections.List<User>?`). Resolution to semantic types happens
//! in `tern_types`; reference shortening rewrites `path` in place.

use crate::{Name, Span, TypeRefId};

/// Type reference node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeRef {
    pub kind: TypeRefKind,
    pub span: Span,
}

impl TypeRef {
    pub fn new(kind: TypeRefKind, span: Span) -> Self {
        TypeRef { kind, span }
    }

    /// A named reference without type arguments.
    pub fn named(path: Vec<Name>, span: Span) -> Self {
        TypeRef {
            kind: TypeRefKind::Named {
                path,
                args: Vec::new(),
                nullable: false,
            },
            span,
        }
    }
}

/// Type reference variants.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeRefKind {
    /// `a.b.C<Args>?`
    Named {
        /// Dot-separated segments, at least one.
        path: Vec<Name>,
        args: Vec<TypeRefId>,
        nullable: bool,
    },

    /// `_`: stands in for a type that could not be determined.
    Placeholder,
}
