//! Name visibility for type references.
//!
//! Lookup of a simple name goes through four levels, first match wins:
//! explicit imports, the file's own package, star imports, then the
//! default packages. Two different candidates on the same level make the
//! name ambiguous.
//!
//! Package contents are a closed world: a package is taken to contain the
//! default types plus every fully-qualified name the file mentions or the
//! caller registers.

use rustc_hash::FxHashSet;
use tern_ir::{Module, Name, SourceFile, StringInterner, TypeRefKind};

use crate::Builtins;

/// Outcome of looking up a simple name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Unique(Vec<Name>),
    Ambiguous,
    Unknown,
}

/// The names visible in one file.
#[derive(Clone, Debug)]
pub struct ImportScope {
    package: Vec<Name>,
    /// `(visible name, imported path)`
    explicit: Vec<(Name, Vec<Name>)>,
    stars: Vec<Vec<Name>>,
    defaults: Vec<Vec<Name>>,
    known: FxHashSet<Vec<Name>>,
}

impl ImportScope {
    /// Scope of a module's header alone.
    pub fn new(module: &Module, builtins: &Builtins, interner: &StringInterner) -> Self {
        let mut scope = ImportScope {
            package: module.package_path().to_vec(),
            explicit: Vec::new(),
            stars: Vec::new(),
            defaults: builtins.default_packages().to_vec(),
            known: FxHashSet::default(),
        };
        for path in builtins.default_types(interner) {
            scope.register(&path);
        }
        for import in &module.imports {
            if import.star {
                scope.stars.push(import.path.clone());
            } else if let Some(name) = import.visible_name() {
                scope.explicit.push((name, import.path.clone()));
                scope.register(&import.path);
            }
        }
        scope
    }

    /// Scope of a file: its header plus every qualified reference written in
    /// its tree.
    pub fn of_file(file: &SourceFile, builtins: &Builtins, interner: &StringInterner) -> Self {
        let mut scope = Self::new(&file.module, builtins, interner);
        let qualified: Vec<Vec<Name>> = file
            .tree
            .type_refs()
            .filter_map(|(_, ty)| match &ty.kind {
                TypeRefKind::Named { path, .. } if path.len() > 1 => Some(path.clone()),
                _ => None,
            })
            .collect();
        for path in qualified {
            let fqn = scope.qualify(&path).unwrap_or(path);
            scope.register(&fqn);
        }
        scope
    }

    /// Record that `fqn` exists, along with its enclosing prefixes.
    pub fn register(&mut self, fqn: &[Name]) {
        for len in 1..=fqn.len() {
            if !self.known.contains(&fqn[..len]) {
                self.known.insert(fqn[..len].to_vec());
            }
        }
    }

    pub fn package(&self) -> &[Name] {
        &self.package
    }

    fn member(&self, package: &[Name], name: Name) -> Option<Vec<Name>> {
        let mut path = package.to_vec();
        path.push(name);
        self.known.contains(&path).then_some(path)
    }

    /// Look `name` up level by level.
    pub fn resolve(&self, name: Name) -> Resolution {
        let explicit: Vec<Vec<Name>> = self
            .explicit
            .iter()
            .filter(|(visible, _)| *visible == name)
            .map(|(_, path)| path.clone())
            .collect();
        let package: Vec<Vec<Name>> = self.member(&self.package, name).into_iter().collect();
        let stars: Vec<Vec<Name>> = self
            .stars
            .iter()
            .filter_map(|star| self.member(star, name))
            .collect();
        let defaults: Vec<Vec<Name>> = self
            .defaults
            .iter()
            .filter_map(|package| self.member(package, name))
            .collect();

        for mut level in [explicit, package, stars, defaults] {
            level.sort();
            level.dedup();
            match level.len() {
                0 => {}
                1 => return level.pop().map_or(Resolution::Unknown, Resolution::Unique),
                _ => return Resolution::Ambiguous,
            }
        }
        Resolution::Unknown
    }

    /// Fully-qualified path of a reference as written in source.
    ///
    /// An unknown simple name is taken to live in the file's package.
    /// Returns `None` if the head of the reference is ambiguous.
    pub fn qualify(&self, path: &[Name]) -> Option<Vec<Name>> {
        let (&head, rest) = path.split_first()?;
        match self.resolve(head) {
            Resolution::Unique(mut fqn) => {
                fqn.extend_from_slice(rest);
                Some(fqn)
            }
            Resolution::Ambiguous => None,
            Resolution::Unknown if rest.is_empty() => {
                let mut fqn = self.package.clone();
                fqn.push(head);
                Some(fqn)
            }
            Resolution::Unknown => Some(path.to_vec()),
        }
    }

    /// Shortest spelling that resolves back to `fqn`: a suffix of it, or an
    /// import alias followed by the rest of the path.
    pub fn shortest(&self, fqn: &[Name]) -> Vec<Name> {
        let mut best = fqn.to_vec();
        for head in (1..fqn.len()).rev() {
            if self.resolve(fqn[head]) == Resolution::Unique(fqn[..=head].to_vec()) {
                best = fqn[head..].to_vec();
                break;
            }
        }
        for (alias, path) in &self.explicit {
            let Some(rest) = fqn.strip_prefix(path.as_slice()) else {
                continue;
            };
            if rest.len() + 1 < best.len() && self.resolve(*alias) == Resolution::Unique(path.clone())
            {
                best = std::iter::once(*alias).chain(rest.iter().copied()).collect();
            }
        }
        best
    }
}
