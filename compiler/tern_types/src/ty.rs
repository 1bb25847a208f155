//! Semantic types.

use std::fmt;

use tern_ir::{Name, StringInterner};

/// A resolved type. Named types always carry their fully-qualified path.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    /// `kotlin.collections.List<kotlin.String>`
    Named { path: Vec<Name>, args: Vec<Type> },

    /// `T?`; never wraps another `Nullable`.
    Nullable(Box<Type>),

    /// Type of a function reference.
    Function { params: Vec<Type>, ret: Box<Type> },

    /// Type of expressions that never produce a value (`return`).
    Nothing,

    /// Error recovery.
    Error,
}

impl Type {
    pub fn named(path: Vec<Name>) -> Self {
        Type::Named {
            path,
            args: Vec::new(),
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Type::Nothing)
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Type::Nullable(_))
    }

    /// `T?` for `T`; already-nullable types are returned unchanged.
    #[must_use]
    pub fn nullable(self) -> Type {
        match self {
            Type::Nullable(_) => self,
            other => Type::Nullable(Box::new(other)),
        }
    }

    /// `T` for `T?`.
    pub fn non_null(&self) -> &Type {
        match self {
            Type::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Fully-qualified path of a named type, looking through `?`.
    pub fn path(&self) -> Option<&[Name]> {
        match self.non_null() {
            Type::Named { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Common type of the values several control paths produce.
    ///
    /// Paths that never complete (`Nothing`) are ignored; `null` joined with
    /// `T` gives `T?`. Any unknown input, or two distinct value types, makes
    /// the join unknown.
    pub fn join<'t>(types: impl IntoIterator<Item = Option<&'t Type>>) -> Option<Type> {
        let mut nullable = false;
        let mut base: Option<&Type> = None;
        for ty in types {
            let ty = ty?;
            if ty.is_nothing() {
                continue;
            }
            if ty.is_nullable() {
                nullable = true;
            }
            let inner = ty.non_null();
            if inner.is_nothing() {
                continue;
            }
            match base {
                None => base = Some(inner),
                Some(seen) if seen == inner => {}
                Some(_) => return None,
            }
        }
        let joined = match base {
            Some(ty) => ty.clone(),
            None => Type::Nothing,
        };
        Some(if nullable { joined.nullable() } else { joined })
    }

    /// Render using the interner for names.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> TypeDisplay<'a> {
        TypeDisplay { ty: self, interner }
    }
}

/// `Display` adapter for [`Type`].
pub struct TypeDisplay<'a> {
    ty: &'a Type,
    interner: &'a StringInterner,
}

impl TypeDisplay<'_> {
    fn write(&self, ty: &Type, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ty {
            Type::Named { path, args } => {
                for (i, segment) in path.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(self.interner.lookup(*segment))?;
                }
                if !args.is_empty() {
                    f.write_str("<")?;
                    self.list(args, f)?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Type::Nullable(inner) => {
                let parens = matches!(**inner, Type::Function { .. });
                if parens {
                    f.write_str("(")?;
                }
                self.write(inner, f)?;
                if parens {
                    f.write_str(")")?;
                }
                f.write_str("?")
            }
            Type::Function { params, ret } => {
                f.write_str("(")?;
                self.list(params, f)?;
                f.write_str(") -> ")?;
                self.write(ret, f)
            }
            Type::Nothing => f.write_str("kotlin.Nothing"),
            Type::Error => f.write_str("<error>"),
        }
    }

    fn list(&self, types: &[Type], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.write(ty, f)?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(self.ty, f)
    }
}
