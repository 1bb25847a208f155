//! Reference shortening.

use tern_ir::{SourceFile, StringInterner, TypeRefId, TypeRefKind};
use tracing::debug;

use crate::{Builtins, ImportScope};

/// Rewrite each reference under `roots` in place to the shortest spelling
/// that resolves to the same fully-qualified name in `file`.
///
/// Type arguments are shortened too. References whose names cannot be
/// resolved unambiguously keep their written spelling.
#[tracing::instrument(level = "debug", skip_all, fields(roots = roots.len()))]
pub fn shorten_references(file: &mut SourceFile, interner: &StringInterner, roots: &[TypeRefId]) {
    let builtins = Builtins::new(interner);
    let scope = ImportScope::of_file(file, &builtins, interner);
    for &root in roots {
        shorten(file, &scope, root);
    }
}

fn shorten(file: &mut SourceFile, scope: &ImportScope, id: TypeRefId) {
    if !id.is_valid() {
        return;
    }
    let TypeRefKind::Named { path, args, .. } = &file.tree.type_ref(id).kind else {
        return;
    };
    let args = args.clone();
    let short = scope
        .qualify(path)
        .map(|fqn| scope.shortest(&fqn));

    for arg in args {
        shorten(file, scope, arg);
    }

    if let Some(short) = short {
        if let TypeRefKind::Named { path, .. } = &mut file.tree.type_ref_mut(id).kind {
            if short.len() < path.len() {
                debug!(from = path.len(), to = short.len(), "shortened reference");
                *path = short;
            }
        }
    }
}
