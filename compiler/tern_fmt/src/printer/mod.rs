//! Tree-to-text rendering.

mod literals;
#[cfg(test)]
mod tests;

use tern_ir::stack::ensure_sufficient_stack;
use tern_ir::{
    Comment, CommentList, ExprId, ExprKind, Function, Item, Module, SourceFile, StmtId, StmtKind,
    StringInterner, SyntaxTree, TypeRefId, TypeRefKind,
};

use crate::comments::CommentIndex;
use crate::emitter::{Emitter, StringEmitter};

/// Binding strength used for parenthesization.
///
/// Binary operators use `BinaryOp::precedence` (1..=6).
const PREC_STATEMENT_LIKE: u8 = 0;
const PREC_CAST: u8 = 7;
const PREC_PREFIX: u8 = 8;
const PREC_POSTFIX: u8 = 9;

fn precedence(kind: ExprKind) -> u8 {
    match kind {
        ExprKind::If { .. }
        | ExprKind::When { .. }
        | ExprKind::Assign { .. }
        | ExprKind::Return(_)
        | ExprKind::Block(_) => PREC_STATEMENT_LIKE,
        ExprKind::Binary { op, .. } => op.precedence(),
        ExprKind::Cast { .. } => PREC_CAST,
        ExprKind::Unary { .. } => PREC_PREFIX,
        _ => PREC_POSTFIX,
    }
}

/// Renders tree nodes to an [`Emitter`].
pub struct Printer<'a, E: Emitter> {
    tree: &'a SyntaxTree,
    interner: &'a StringInterner,
    out: E,
    indent: usize,
    comments: CommentIndex<'a>,
    /// Statement whose output offset is recorded in `anchor_offset`.
    anchor: StmtId,
    anchor_offset: Option<usize>,
}

impl<'a, E: Emitter> Printer<'a, E> {
    pub fn new(tree: &'a SyntaxTree, interner: &'a StringInterner, out: E) -> Self {
        Printer {
            tree,
            interner,
            out,
            indent: 0,
            comments: CommentIndex::empty(),
            anchor: StmtId::INVALID,
            anchor_offset: None,
        }
    }

    /// Print `comments` of `text` next to the nodes they were written at.
    ///
    /// Node spans must point into `text`.
    #[must_use]
    pub fn with_comments(mut self, comments: &'a CommentList, text: &'a str) -> Self {
        self.comments = CommentIndex::new(comments, text);
        self
    }

    /// Record where `stmt` starts in the output; see [`Printer::anchor_offset`].
    #[must_use]
    pub fn with_anchor(mut self, stmt: StmtId) -> Self {
        self.anchor = stmt;
        self
    }

    /// Output offset at which the anchor statement was printed.
    pub fn anchor_offset(&self) -> Option<usize> {
        self.anchor_offset
    }

    /// Start at an indentation level (continuation lines are indented
    /// relative to it; the first line is not).
    #[must_use]
    pub fn with_indent(mut self, level: usize) -> Self {
        self.indent = level;
        self
    }

    pub fn finish(self) -> E {
        self.out
    }

    fn text(&mut self, text: &str) {
        self.out.emit(text);
    }

    fn name(&mut self, name: tern_ir::Name) {
        let s = self.interner.lookup(name);
        self.out.emit(s);
    }

    fn newline(&mut self) {
        self.out.emit_newline();
        self.out.emit_indent(self.indent);
    }

    fn comment(&mut self, comment: Comment) {
        let text = self.interner.lookup(comment.text);
        self.out.emit(text);
    }

    /// Comments written before `pos`, each on its own line, then a line
    /// break at the current indentation.
    fn leading_comments(&mut self, pos: u32) {
        for comment in self.comments.take_before(pos) {
            self.comment(comment);
            self.newline();
        }
    }

    /// Comments written after `end` on the same line.
    fn trailing_comments(&mut self, end: u32) {
        for comment in self.comments.take_trailing(end) {
            self.text(" ");
            self.comment(comment);
        }
    }

    /// Comments written before `pos` that belong inside a closing brace,
    /// each on a fresh line. Returns whether any were printed.
    fn closing_comments(&mut self, pos: u32) -> bool {
        let comments = self.comments.take_before(pos);
        for &comment in &comments {
            self.newline();
            self.comment(comment);
        }
        !comments.is_empty()
    }

    // ─── Module level ────────────────────────────────────────────────

    pub fn module(&mut self, module: &Module) {
        let mut first = true;
        let blank_line = |this: &mut Self, first: &mut bool| {
            if !*first {
                this.out.emit_newline();
                this.out.emit_newline();
            }
            *first = false;
        };

        if let Some(package) = &module.package {
            blank_line(self, &mut first);
            self.leading_comments(package.span.start);
            self.text("package ");
            self.path(&package.segments);
            self.trailing_comments(package.span.end);
        }

        if !module.imports.is_empty() {
            blank_line(self, &mut first);
            for (i, import) in module.imports.iter().enumerate() {
                if i > 0 {
                    self.out.emit_newline();
                }
                self.leading_comments(import.span.start);
                self.text("import ");
                self.path(&import.path);
                if import.star {
                    self.text(".*");
                } else if let Some(alias) = import.alias {
                    self.text(" as ");
                    self.name(alias);
                }
                self.trailing_comments(import.span.end);
            }
        }

        let mut previous_was_property = false;
        for item in &module.items {
            match item {
                Item::Function(function) => {
                    blank_line(self, &mut first);
                    self.leading_comments(function.span.start);
                    self.function(function);
                    self.trailing_comments(function.span.end);
                    previous_was_property = false;
                }
                Item::Property(stmt) => {
                    if previous_was_property {
                        self.out.emit_newline();
                    } else {
                        blank_line(self, &mut first);
                    }
                    self.stmt_line(*stmt);
                    previous_was_property = true;
                }
            }
        }

        let rest = self.comments.take_remaining();
        if !rest.is_empty() {
            blank_line(self, &mut first);
            for (i, &comment) in rest.iter().enumerate() {
                if i > 0 {
                    self.out.emit_newline();
                }
                self.comment(comment);
            }
        }
        self.out.emit_newline();
    }

    fn path(&mut self, segments: &[tern_ir::Name]) {
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                self.text(".");
            }
            self.name(*segment);
        }
    }

    fn function(&mut self, function: &Function) {
        self.text("fun ");
        self.name(function.name);
        self.text("(");
        for (i, param) in function.params.iter().enumerate() {
            if i > 0 {
                self.text(", ");
            }
            self.name(param.name);
            self.text(": ");
            self.type_ref(param.ty);
        }
        self.text(")");
        if function.ret.is_valid() {
            self.text(": ");
            self.type_ref(function.ret);
        }
        if function.expr_body {
            self.text(" = ");
            self.expr(function.body);
        } else {
            self.text(" ");
            self.block(function.body);
        }
    }

    // ─── Statements ──────────────────────────────────────────────────

    pub fn stmt(&mut self, id: StmtId) {
        if id == self.anchor {
            self.anchor_offset = Some(self.out.position());
        }
        match self.tree.stmt(id).kind {
            StmtKind::Expr(expr) => self.expr(expr),
            StmtKind::Decl(decl) => {
                self.text(if decl.mutable { "var " } else { "val " });
                self.name(decl.name);
                if decl.ty.is_valid() {
                    self.text(": ");
                    self.type_ref(decl.ty);
                }
                if decl.init.is_valid() {
                    self.text(" = ");
                    self.expr(decl.init);
                }
            }
        }
    }

    /// A statement on its own line, with the comments around it.
    fn stmt_line(&mut self, id: StmtId) {
        let span = self.tree.stmt(id).span;
        self.leading_comments(span.start);
        self.stmt(id);
        self.trailing_comments(span.end);
    }

    fn block(&mut self, id: ExprId) {
        let tree = self.tree;
        let ExprKind::Block(range) = tree.expr_kind(id) else {
            self.expr(id);
            return;
        };
        let stmts = tree.stmt_list(range);
        self.text("{");
        self.indent += 1;
        for &stmt in stmts {
            self.newline();
            self.stmt_line(stmt);
        }
        let commented = self.closing_comments(tree.expr(id).span.end);
        self.indent -= 1;
        if !stmts.is_empty() || commented {
            self.newline();
        }
        self.text("}");
    }

    /// A branch body: blocks break, anything else stays inline.
    fn branch(&mut self, id: ExprId) {
        if matches!(self.tree.expr_kind(id), ExprKind::Block(_)) {
            self.block(id);
        } else {
            self.expr(id);
        }
    }

    /// Render `id` in braces even though it is not a block.
    fn braced(&mut self, id: ExprId) {
        self.text("{");
        self.indent += 1;
        self.newline();
        self.expr(id);
        self.indent -= 1;
        self.newline();
        self.text("}");
    }

    /// An `if` chain that ends without `else` would capture a following
    /// `else` when printed inline.
    fn ends_in_open_if(&self, id: ExprId) -> bool {
        match self.tree.expr_kind(id) {
            ExprKind::If { else_branch, .. } if !else_branch.is_valid() => true,
            ExprKind::If { else_branch, .. } => self.ends_in_open_if(else_branch),
            _ => false,
        }
    }

    // ─── Expressions ─────────────────────────────────────────────────

    pub fn expr(&mut self, id: ExprId) {
        ensure_sufficient_stack(|| self.expr_inner(id));
    }

    /// Render `id`, parenthesized if it binds looser than `min`.
    fn operand(&mut self, id: ExprId, min: u8) {
        if precedence(self.tree.expr_kind(id)) < min {
            self.text("(");
            self.expr(id);
            self.text(")");
        } else {
            self.expr(id);
        }
    }

    fn expr_inner(&mut self, id: ExprId) {
        if !id.is_valid() {
            return;
        }
        let tree = self.tree;
        let kind = tree.expr_kind(id);
        match kind {
            ExprKind::Int(n) => self.text(&n.to_string()),
            ExprKind::Double(bits) => self.text(&literals::double(bits)),
            ExprKind::Bool(b) => self.text(if b { "true" } else { "false" }),
            ExprKind::Str(name) => {
                let s = literals::string(self.interner.lookup(name));
                self.text(&s);
            }
            ExprKind::Char(c) => self.text(&literals::char(c)),
            ExprKind::Null => self.text("null"),
            ExprKind::Ident(name) => self.name(name),
            ExprKind::Error => self.text("<error>"),

            ExprKind::Field { receiver, name } => {
                self.operand(receiver, PREC_POSTFIX);
                self.text(".");
                self.name(name);
            }
            ExprKind::Call { callee, args } => {
                self.operand(callee, PREC_POSTFIX);
                self.text("(");
                for (i, &arg) in tree.expr_list(args).iter().enumerate() {
                    if i > 0 {
                        self.text(", ");
                    }
                    self.expr(arg);
                }
                self.text(")");
            }
            ExprKind::Unary { op, operand } => {
                self.text(op.as_symbol());
                self.operand(operand, PREC_PREFIX);
            }
            ExprKind::Binary { op, left, right } => {
                let prec = op.precedence();
                self.operand(left, prec);
                self.text(" ");
                self.text(op.as_symbol());
                self.text(" ");
                self.operand(right, prec + 1);
            }
            ExprKind::Cast { expr, ty } => {
                self.operand(expr, PREC_CAST);
                self.text(" as ");
                self.type_ref(ty);
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.text("if (");
                self.expr(cond);
                self.text(") ");
                if else_branch.is_valid() && self.ends_in_open_if(then_branch) {
                    self.braced(then_branch);
                } else {
                    self.branch(then_branch);
                }
                if else_branch.is_valid() {
                    self.text(" else ");
                    self.branch(else_branch);
                }
            }
            ExprKind::When {
                subject,
                arms,
                else_body,
            } => {
                self.text("when ");
                if subject.is_valid() {
                    self.text("(");
                    self.expr(subject);
                    self.text(") ");
                }
                self.text("{");
                self.indent += 1;
                for arm in tree.arms(arms) {
                    self.newline();
                    self.leading_comments(arm.span.start);
                    for (i, &cond) in tree.expr_list(arm.conditions).iter().enumerate() {
                        if i > 0 {
                            self.text(", ");
                        }
                        self.expr(cond);
                    }
                    self.text(" -> ");
                    self.branch(arm.body);
                    self.trailing_comments(arm.span.end);
                }
                if else_body.is_valid() {
                    let span = tree.expr(else_body).span;
                    self.newline();
                    self.leading_comments(span.start);
                    self.text("else -> ");
                    self.branch(else_body);
                    self.trailing_comments(span.end);
                }
                self.closing_comments(tree.expr(id).span.end);
                self.indent -= 1;
                self.newline();
                self.text("}");
            }
            ExprKind::Block(_) => self.block(id),
            ExprKind::Assign { target, op, value } => {
                self.expr(target);
                self.text(" ");
                self.text(op.as_symbol());
                self.text(" ");
                self.expr(value);
            }
            ExprKind::Return(value) => {
                self.text("return");
                if value.is_valid() {
                    self.text(" ");
                    self.expr(value);
                }
            }
        }
    }

    // ─── Types ───────────────────────────────────────────────────────

    pub fn type_ref(&mut self, id: TypeRefId) {
        if !id.is_valid() {
            return;
        }
        let tree = self.tree;
        match &tree.type_ref(id).kind {
            TypeRefKind::Placeholder => self.text("_"),
            TypeRefKind::Named {
                path,
                args,
                nullable,
            } => {
                self.path(path);
                if !args.is_empty() {
                    self.text("<");
                    for (i, &arg) in args.iter().enumerate() {
                        if i > 0 {
                            self.text(", ");
                        }
                        self.type_ref(arg);
                    }
                    self.text(">");
                }
                if *nullable {
                    self.text("?");
                }
            }
        }
    }
}

/// Render a whole file from its current tree, with its comments.
pub fn format_file(file: &SourceFile, interner: &StringInterner) -> String {
    format_file_at(file, interner, StmtId::INVALID).0
}

/// Like [`format_file`], also returning the output offset at which
/// `anchor` starts (`None` if it is not printed).
pub fn format_file_at(
    file: &SourceFile,
    interner: &StringInterner,
    anchor: StmtId,
) -> (String, Option<usize>) {
    let out = StringEmitter::with_capacity(file.text().len() + 64);
    let mut printer = Printer::new(&file.tree, interner, out)
        .with_comments(&file.comments, file.text())
        .with_anchor(anchor);
    printer.module(&file.module);
    let offset = printer.anchor_offset();
    let mut out = printer.finish();
    out.ensure_trailing_newline();
    (out.output(), offset)
}

/// Render one statement at indentation level 0.
pub fn format_stmt(tree: &SyntaxTree, stmt: StmtId, interner: &StringInterner) -> String {
    let mut printer = Printer::new(tree, interner, StringEmitter::new());
    printer.stmt(stmt);
    printer.finish().output()
}

pub fn format_expr(tree: &SyntaxTree, expr: ExprId, interner: &StringInterner) -> String {
    let mut printer = Printer::new(tree, interner, StringEmitter::new());
    printer.expr(expr);
    printer.finish().output()
}

pub fn format_type_ref(tree: &SyntaxTree, ty: TypeRefId, interner: &StringInterner) -> String {
    let mut printer = Printer::new(tree, interner, StringEmitter::new());
    printer.type_ref(ty);
    printer.finish().output()
}
