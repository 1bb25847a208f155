//! Conversion between written type references and semantic types.

use tern_ir::{Span, SyntaxTree, TypeRef, TypeRefId, TypeRefKind};

use crate::{Builtins, ImportScope, Type};

/// Resolve a written reference. `None` for `_`, for ambiguous names and for
/// references whose arguments do not resolve.
pub fn ref_to_type(tree: &SyntaxTree, id: TypeRefId, scope: &ImportScope) -> Option<Type> {
    if !id.is_valid() {
        return None;
    }
    match &tree.type_ref(id).kind {
        TypeRefKind::Placeholder => None,
        TypeRefKind::Named {
            path,
            args,
            nullable,
        } => {
            let path = scope.qualify(path)?;
            let args = args
                .iter()
                .map(|&arg| ref_to_type(tree, arg, scope))
                .collect::<Option<Vec<_>>>()?;
            let ty = Type::Named { path, args };
            Some(if *nullable { ty.nullable() } else { ty })
        }
    }
}

/// Allocate a fully-qualified reference spelling `ty`.
///
/// Function and error types have no written form; they yield `None`.
pub fn type_to_ref(tree: &mut SyntaxTree, ty: &Type, builtins: &Builtins) -> Option<TypeRefId> {
    let (ty, nullable) = match ty {
        Type::Nullable(inner) => (&**inner, true),
        other => (other, false),
    };
    let (path, args) = match ty {
        Type::Named { path, args } => {
            let args = args
                .iter()
                .map(|arg| type_to_ref(tree, arg, builtins))
                .collect::<Option<Vec<_>>>()?;
            (path.clone(), args)
        }
        Type::Nothing => (builtins.nothing_path().to_vec(), Vec::new()),
        Type::Nullable(_) | Type::Function { .. } | Type::Error => return None,
    };
    Some(tree.alloc_type_ref(TypeRef::new(
        TypeRefKind::Named {
            path,
            args,
            nullable,
        },
        Span::DUMMY,
    )))
}
