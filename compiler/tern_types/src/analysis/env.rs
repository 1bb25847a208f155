//! Lexical scopes for local bindings.

use rustc_hash::FxHashMap;
use tern_ir::Name;

use crate::Type;

/// Stack of block scopes.
///
/// A binding whose type is unknown is still recorded (as `None`) so it
/// shadows outer bindings of the same name.
#[derive(Default)]
pub(super) struct TypeEnv {
    frames: Vec<FxHashMap<Name, Option<Type>>>,
}

impl TypeEnv {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn push_scope(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub(super) fn pop_scope(&mut self) {
        self.frames.pop();
    }

    /// Bind in the innermost scope, opening one if none is open.
    pub(super) fn bind(&mut self, name: Name, ty: Option<Type>) {
        if self.frames.is_empty() {
            self.push_scope();
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, ty);
        }
    }

    pub(super) fn lookup(&self, name: Name) -> Option<&Option<Type>> {
        self.frames.iter().rev().find_map(|frame| frame.get(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_ir::StringInterner;

    #[test]
    fn test_inner_scope_shadows_then_pops() {
        let interner = StringInterner::new();
        let x = interner.intern("x");
        let int = Type::named(vec![interner.intern("Int")]);

        let mut env = TypeEnv::new();
        env.bind(x, Some(int.clone()));
        env.push_scope();
        env.bind(x, None);
        assert_eq!(env.lookup(x), Some(&None));
        env.pop_scope();
        assert_eq!(env.lookup(x), Some(&Some(int)));
        assert_eq!(env.lookup(interner.intern("y")), None);
    }
}
