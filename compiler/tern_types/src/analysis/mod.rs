//! Whole-file type analysis.
//!
//! One pass over a parsed file records the type of every expression it can
//! determine. Signatures are collected first so calls can see functions
//! declared later in the file; the return type of an expression-bodied
//! function without an annotation is inferred on first use.

mod env;
mod infer;

use rustc_hash::FxHashMap;
use tern_ir::{
    ExprId, Function, Name, SourceFile, StmtId, StmtKind, StringInterner, SyntaxTree,
};
use tracing::debug;

use crate::{ref_to_type, Builtins, ImportScope, Type};
use env::TypeEnv;

/// Types recorded for one revision of a file.
#[derive(Clone, Debug, Default)]
pub struct Analysis {
    expr_count: usize,
    types: FxHashMap<ExprId, Type>,
}

impl Analysis {
    #[tracing::instrument(level = "debug", skip_all, fields(path = %file.path().display()))]
    pub fn of(file: &SourceFile, interner: &StringInterner) -> Self {
        let builtins = Builtins::new(interner);
        let scope = ImportScope::of_file(file, &builtins, interner);
        let mut analyzer = Analyzer::new(&file.tree, builtins, scope);

        let functions: Vec<&Function> = file.module.functions().collect();
        analyzer.collect_signatures(&functions);
        for stmt in file.module.properties() {
            analyzer.property(stmt);
        }
        for index in 0..analyzer.signatures.len() {
            analyzer.function(index);
        }

        debug!(
            typed = analyzer.types.len(),
            exprs = file.tree.expr_count(),
            "analysed file"
        );
        Analysis {
            expr_count: file.tree.expr_count(),
            types: analyzer.types,
        }
    }

    /// Whether `id` existed when the file was analysed.
    pub fn covers(&self, id: ExprId) -> bool {
        id.is_valid() && id.index() < self.expr_count
    }

    pub fn expr_type(&self, id: ExprId) -> Option<&Type> {
        self.types.get(&id)
    }
}

/// Return type of a function as far as it is known.
#[derive(Clone)]
enum Return {
    Known(Option<Type>),
    /// Expression body without annotation, not yet inferred.
    Infer,
    InProgress,
}

struct Signature {
    params: Vec<(Name, Option<Type>)>,
    body: ExprId,
    ret: Return,
}

struct Analyzer<'a> {
    tree: &'a SyntaxTree,
    builtins: Builtins,
    scope: ImportScope,
    env: TypeEnv,
    properties: FxHashMap<Name, Option<Type>>,
    signatures: Vec<Signature>,
    /// Function name to index into `signatures`; the last declaration wins.
    functions: FxHashMap<Name, usize>,
    types: FxHashMap<ExprId, Type>,
}

impl<'a> Analyzer<'a> {
    fn new(tree: &'a SyntaxTree, builtins: Builtins, scope: ImportScope) -> Self {
        Analyzer {
            tree,
            builtins,
            scope,
            env: TypeEnv::new(),
            properties: FxHashMap::default(),
            signatures: Vec::new(),
            functions: FxHashMap::default(),
            types: FxHashMap::default(),
        }
    }

    fn collect_signatures(&mut self, functions: &[&Function]) {
        for function in functions {
            let params = function
                .params
                .iter()
                .map(|param| (param.name, ref_to_type(self.tree, param.ty, &self.scope)))
                .collect();
            let ret = if function.ret.is_valid() {
                Return::Known(ref_to_type(self.tree, function.ret, &self.scope))
            } else if function.expr_body {
                Return::Infer
            } else {
                Return::Known(Some(self.builtins.unit.clone()))
            };
            self.functions.insert(function.name, self.signatures.len());
            self.signatures.push(Signature {
                params,
                body: function.body,
                ret,
            });
        }
    }

    fn property(&mut self, stmt: StmtId) {
        if let StmtKind::Decl(decl) = self.tree.stmt(stmt).kind {
            let ty = self.declaration(decl);
            self.properties.insert(decl.name, ty);
        }
    }

    /// Analyse one function body; returns the body's type.
    fn analyse_body(&mut self, index: usize) -> Option<Type> {
        let Some(signature) = self.signatures.get(index) else {
            return None;
        };
        let params = signature.params.clone();
        let body = signature.body;

        let saved = std::mem::replace(&mut self.env, TypeEnv::new());
        self.env.push_scope();
        for (name, ty) in params {
            self.env.bind(name, ty);
        }
        let ty = self.infer(body);
        self.env = saved;
        ty
    }

    fn function(&mut self, index: usize) {
        match self.signatures[index].ret {
            Return::Infer => {
                self.return_type(index);
            }
            Return::Known(_) | Return::InProgress => {
                self.analyse_body(index);
            }
        }
    }

    /// Return type of the function at `index`, inferring it if needed.
    ///
    /// A function whose inferred type depends on itself is unknown.
    fn return_type(&mut self, index: usize) -> Option<Type> {
        match self.signatures[index].ret.clone() {
            Return::Known(ty) => ty,
            Return::InProgress => None,
            Return::Infer => {
                self.signatures[index].ret = Return::InProgress;
                let ty = self.analyse_body(index);
                self.signatures[index].ret = Return::Known(ty.clone());
                ty
            }
        }
    }

    /// Type a `val`/`var` and bind its name in the current scope.
    fn declaration(&mut self, decl: tern_ir::Decl) -> Option<Type> {
        let inferred = self.infer(decl.init);
        let declared = ref_to_type(self.tree, decl.ty, &self.scope);
        let ty = declared.or(inferred);
        self.env.bind(decl.name, ty.clone());
        ty
    }
}
