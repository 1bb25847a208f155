//! Well-known types and the implicitly imported packages.

use tern_ir::{Name, StringInterner};

use crate::Type;

/// Types of the `kotlin` package every file sees.
const KOTLIN_TYPES: &[&str] = &[
    "Any", "Array", "Boolean", "Byte", "Char", "Double", "Float", "Int", "Long", "Nothing",
    "Number", "Pair", "Short", "String", "Unit",
];

/// Types of the `kotlin.collections` package every file sees.
const COLLECTION_TYPES: &[&str] = &[
    "Collection",
    "Iterable",
    "List",
    "Map",
    "MutableList",
    "MutableMap",
    "MutableSet",
    "Set",
];

/// Interned names of built-in types and functions.
pub struct Builtins {
    pub kotlin: Name,
    pub collections: Name,
    pub int: Type,
    pub double: Type,
    pub boolean: Type,
    pub string: Type,
    pub char: Type,
    pub unit: Type,
    nothing: Vec<Name>,
    list: Vec<Name>,
    mutable_list: Vec<Name>,
    pub list_of: Name,
    pub mutable_list_of: Name,
    pub println: Name,
    pub size: Name,
    pub length: Name,
    pub to_string: Name,
}

impl Builtins {
    pub fn new(interner: &StringInterner) -> Self {
        let kotlin = interner.intern("kotlin");
        let collections = interner.intern("collections");
        let core = |name: &str| Type::named(vec![kotlin, interner.intern(name)]);
        Builtins {
            kotlin,
            collections,
            int: core("Int"),
            double: core("Double"),
            boolean: core("Boolean"),
            string: core("String"),
            char: core("Char"),
            unit: core("Unit"),
            nothing: vec![kotlin, interner.intern("Nothing")],
            list: vec![kotlin, collections, interner.intern("List")],
            mutable_list: vec![kotlin, collections, interner.intern("MutableList")],
            list_of: interner.intern("listOf"),
            mutable_list_of: interner.intern("mutableListOf"),
            println: interner.intern("println"),
            size: interner.intern("size"),
            length: interner.intern("length"),
            to_string: interner.intern("toString"),
        }
    }

    /// Packages imported into every file, in lookup order.
    pub fn default_packages(&self) -> [Vec<Name>; 2] {
        [vec![self.kotlin], vec![self.kotlin, self.collections]]
    }

    /// Fully-qualified paths of every type in the default packages.
    pub fn default_types(&self, interner: &StringInterner) -> Vec<Vec<Name>> {
        let [kotlin, collections] = self.default_packages();
        let in_package = |package: &[Name], names: &[&str]| -> Vec<Vec<Name>> {
            names
                .iter()
                .map(|name| {
                    let mut path = package.to_vec();
                    path.push(interner.intern(name));
                    path
                })
                .collect()
        };
        let mut all = in_package(&kotlin, KOTLIN_TYPES);
        all.extend(in_package(&collections, COLLECTION_TYPES));
        all
    }

    /// `kotlin.Nothing`, the written form of [`Type::Nothing`].
    pub fn nothing_path(&self) -> &[Name] {
        &self.nothing
    }

    pub fn list_type(&self, element: Type) -> Type {
        Type::Named {
            path: self.list.clone(),
            args: vec![element],
        }
    }

    pub fn mutable_list_type(&self, element: Type) -> Type {
        Type::Named {
            path: self.mutable_list.clone(),
            args: vec![element],
        }
    }

    /// `List` or `MutableList`, with or without arguments.
    pub fn is_list(&self, ty: &Type) -> bool {
        ty.path()
            .is_some_and(|path| path == self.list.as_slice() || path == self.mutable_list.as_slice())
    }

    pub fn is_numeric(&self, ty: &Type) -> bool {
        *ty == self.int || *ty == self.double
    }
}
