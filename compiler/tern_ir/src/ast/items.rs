//! Module-level items: package header, imports, functions, properties.

use crate::{ExprId, Name, Span, StmtId, TypeRefId};

/// A parsed module.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Module {
    /// `package a.b`; `None` = default package.
    pub package: Option<QualifiedPath>,
    pub imports: Vec<Import>,
    pub items: Vec<Item>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Package segments, empty for the default package.
    pub fn package_path(&self) -> &[Name] {
        match &self.package {
            Some(path) => &path.segments,
            None => &[],
        }
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(f) => Some(f),
            Item::Property(_) => None,
        })
    }

    /// Member-level property statements.
    pub fn properties(&self) -> impl Iterator<Item = StmtId> + '_ {
        self.items.iter().filter_map(|item| match item {
            Item::Property(stmt) => Some(*stmt),
            Item::Function(_) => None,
        })
    }
}

/// A dotted name with its span.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct QualifiedPath {
    pub segments: Vec<Name>,
    pub span: Span,
}

/// `import a.b.C`, `import a.b.C as D`, `import a.b.*`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Import {
    pub path: Vec<Name>,
    pub star: bool,
    pub alias: Option<Name>,
    pub span: Span,
}

impl Import {
    /// The simple name this import makes visible (`None` for star imports).
    pub fn visible_name(&self) -> Option<Name> {
        if self.star {
            return None;
        }
        self.alias.or_else(|| self.path.last().copied())
    }
}

/// Top-level item.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Item {
    Function(Function),
    /// Member-level `val`/`var`, stored as a `StmtKind::Decl` statement.
    Property(StmtId),
}

/// `fun name(params): Ret { body }` or `fun name(params) = expr`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Function {
    pub name: Name,
    pub params: Vec<Param>,
    /// `TypeRefId::INVALID` = no declared return type.
    pub ret: TypeRefId,
    pub body: ExprId,
    /// `true` for the `= expr` form.
    pub expr_body: bool,
    pub span: Span,
}

/// Function parameter: `name: Type`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    pub ty: TypeRefId,
    pub span: Span,
}
