use super::*;
use pretty_assertions::assert_eq;
use tern_ir::{AssignOp, BinaryOp, Item, StmtId, StmtKind, TypeRefKind, UnaryOp};

fn parse_source(source: &str) -> (ParseOutput, StringInterner) {
    let interner = StringInterner::new();
    let output = parse_file("test.tn", source, &interner);
    (output, interner)
}

/// Statements of the first function's block body.
fn body_stmts(output: &ParseOutput) -> Vec<StmtId> {
    let function = output
        .file
        .module
        .functions()
        .next()
        .unwrap_or_else(|| panic!("no function parsed"));
    match output.file.tree.expr_kind(function.body) {
        ExprKind::Block(range) => output.file.tree.stmt_list(range).to_vec(),
        other => panic!("expected block body, found {other:?}"),
    }
}

fn stmt_expr(output: &ParseOutput, stmt: StmtId) -> ExprKind {
    match output.file.tree.stmt(stmt).kind {
        StmtKind::Expr(id) => output.file.tree.expr_kind(id),
        StmtKind::Decl(decl) => panic!("expected expression statement, found {decl:?}"),
    }
}

#[test]
fn test_parse_compound_assignment_from_if() {
    let (out, _) = parse_source("fun f() {\n    x += if (a) 1 else 2\n}\n");
    assert!(!out.has_errors(), "{:?}", out.errors);

    let stmts = body_stmts(&out);
    assert_eq!(stmts.len(), 1);
    let ExprKind::Assign { op, value, .. } = stmt_expr(&out, stmts[0]) else {
        panic!("expected assignment");
    };
    assert_eq!(op, AssignOp::Add);
    let ExprKind::If { else_branch, .. } = out.file.tree.expr_kind(value) else {
        panic!("expected if");
    };
    assert!(else_branch.is_valid());
}

#[test]
fn test_parse_when_with_subject_and_else() {
    let source = "fun f(n: Int) {\n    return when (n) {\n        1, 2 -> \"small\"\n        else -> \"big\"\n    }\n}\n";
    let (out, _) = parse_source(source);
    assert!(!out.has_errors(), "{:?}", out.errors);

    let stmts = body_stmts(&out);
    let ExprKind::Return(value) = stmt_expr(&out, stmts[0]) else {
        panic!("expected return");
    };
    let ExprKind::When {
        subject,
        arms,
        else_body,
    } = out.file.tree.expr_kind(value)
    else {
        panic!("expected when");
    };
    assert!(subject.is_valid());
    assert!(else_body.is_valid());
    let arms = out.file.tree.arms(arms);
    assert_eq!(arms.len(), 1);
    assert_eq!(out.file.tree.expr_list(arms[0].conditions).len(), 2);
}

#[test]
fn test_parse_when_without_subject_or_else() {
    let (out, _) = parse_source("fun f() {\n    val y = when {\n        a -> 1\n        b -> 2\n    }\n}\n");
    assert!(!out.has_errors(), "{:?}", out.errors);
    let stmts = body_stmts(&out);
    let StmtKind::Decl(decl) = out.file.tree.stmt(stmts[0]).kind else {
        panic!("expected declaration");
    };
    let ExprKind::When {
        subject, else_body, ..
    } = out.file.tree.expr_kind(decl.init)
    else {
        panic!("expected when");
    };
    assert!(!subject.is_valid());
    assert!(!else_body.is_valid());
}

#[test]
fn test_duplicate_else_arm_is_rejected() {
    let (out, _) = parse_source("fun f() {\n    when {\n        else -> 1\n        else -> 2\n    }\n}\n");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].message, "duplicate `else` arm in `when`");
}

#[test]
fn test_else_arm_must_be_last() {
    let (out, _) = parse_source("fun f() {\n    when {\n        else -> 1\n        a -> 2\n    }\n}\n");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].message, "`else` must be the last arm of `when`");
}

#[test]
fn test_else_on_next_line_belongs_to_if() {
    let (out, _) = parse_source("fun f() {\n    x = if (a) {\n        1\n    }\n    else {\n        2\n    }\n}\n");
    assert!(!out.has_errors(), "{:?}", out.errors);
    let stmts = body_stmts(&out);
    assert_eq!(stmts.len(), 1);
}

#[test]
fn test_assignments_in_branch_bodies() {
    let (out, _) = parse_source("fun f() {\n    if (a) x = 1 else x -= 2\n}\n");
    assert!(!out.has_errors(), "{:?}", out.errors);
    let stmts = body_stmts(&out);
    let ExprKind::If {
        then_branch,
        else_branch,
        ..
    } = stmt_expr(&out, stmts[0])
    else {
        panic!("expected if");
    };
    assert!(matches!(
        out.file.tree.expr_kind(then_branch),
        ExprKind::Assign {
            op: AssignOp::Assign,
            ..
        }
    ));
    assert!(matches!(
        out.file.tree.expr_kind(else_branch),
        ExprKind::Assign {
            op: AssignOp::Sub,
            ..
        }
    ));
}

#[test]
fn test_precedence_and_newline_after_operator() {
    let (out, _) = parse_source("fun f() = a + b *\n    c == d && !e\n");
    assert!(!out.has_errors(), "{:?}", out.errors);
    let function = out.file.module.functions().next().unwrap_or_else(|| panic!("no function"));
    assert!(function.expr_body);

    let tree = &out.file.tree;
    let ExprKind::Binary {
        op: BinaryOp::And,
        left,
        right,
    } = tree.expr_kind(function.body)
    else {
        panic!("expected &&");
    };
    assert!(matches!(
        tree.expr_kind(right),
        ExprKind::Unary {
            op: UnaryOp::Not,
            ..
        }
    ));
    let ExprKind::Binary {
        op: BinaryOp::Eq,
        left: sum,
        ..
    } = tree.expr_kind(left)
    else {
        panic!("expected ==");
    };
    let ExprKind::Binary {
        op: BinaryOp::Add,
        right: product,
        ..
    } = tree.expr_kind(sum)
    else {
        panic!("expected +");
    };
    assert!(matches!(
        tree.expr_kind(product),
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn test_bare_return_and_return_value() {
    let (out, _) = parse_source("fun f() {\n    return\n    return g(1, 2)\n}\n");
    assert!(!out.has_errors(), "{:?}", out.errors);
    let stmts = body_stmts(&out);
    assert_eq!(stmt_expr(&out, stmts[0]), ExprKind::Return(ExprId::INVALID));
    let ExprKind::Return(value) = stmt_expr(&out, stmts[1]) else {
        panic!("expected return");
    };
    assert!(matches!(out.file.tree.expr_kind(value), ExprKind::Call { .. }));
}

#[test]
fn test_package_imports_and_property() {
    let source = "package com.example\n\nimport a.b.User\nimport a.b.Other as O\nimport c.d.*\n\nval limit: kotlin.collections.List<User>? = null\n";
    let (out, interner) = parse_source(source);
    assert!(!out.has_errors(), "{:?}", out.errors);

    let module = &out.file.module;
    let package: Vec<&str> = module
        .package_path()
        .iter()
        .map(|n| interner.lookup(*n))
        .collect();
    assert_eq!(package, vec!["com", "example"]);
    assert_eq!(module.imports.len(), 3);
    assert_eq!(module.imports[1].visible_name(), Some(interner.intern("O")));
    assert!(module.imports[2].star);

    let Some(Item::Property(stmt)) = module.items.first() else {
        panic!("expected property");
    };
    let StmtKind::Decl(decl) = out.file.tree.stmt(*stmt).kind else {
        panic!("expected declaration");
    };
    assert!(!decl.mutable);
    let TypeRefKind::Named {
        path,
        args,
        nullable,
    } = &out.file.tree.type_ref(decl.ty).kind
    else {
        panic!("expected named type");
    };
    assert_eq!(path.len(), 3);
    assert_eq!(args.len(), 1);
    assert!(*nullable);
}

#[test]
fn test_placeholder_type() {
    let (out, _) = parse_source("fun f() {\n    val x: _ = 1\n}\n");
    assert!(!out.has_errors(), "{:?}", out.errors);
    let stmts = body_stmts(&out);
    let StmtKind::Decl(decl) = out.file.tree.stmt(stmts[0]).kind else {
        panic!("expected declaration");
    };
    assert_eq!(out.file.tree.type_ref(decl.ty).kind, TypeRefKind::Placeholder);
}

#[test]
fn test_invalid_assignment_target() {
    let (out, _) = parse_source("fun f() {\n    1 = 2\n    x = 3\n}\n");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].message, "invalid assignment target");
    // Recovery resumes at the next statement.
    assert_eq!(body_stmts(&out).len(), 1);
}

#[test]
fn test_recovery_continues_with_next_item() {
    let (out, _) = parse_source("fun f() {\n    val = 1\n}\n# junk\nfun g() = 2\n");
    assert!(out.has_errors());
    assert_eq!(out.file.error_count, out.errors.len());
    assert_eq!(out.file.module.functions().count(), 2);
}

#[test]
fn test_statement_spans_cover_source() {
    let source = "fun f() {\n    x += if (a) 1 else 2\n}\n";
    let (out, _) = parse_source(source);
    let stmts = body_stmts(&out);
    let span = out.file.tree.stmt(stmts[0]).span;
    assert_eq!(&source[span.to_range()], "x += if (a) 1 else 2");
}

#[test]
fn test_comments_are_kept_beside_the_tree() {
    let source = "// header\nfun f() {\n    x = 1 /* why */\n}\n";
    let (out, interner) = parse_source(source);
    assert!(!out.has_errors());
    assert_eq!(body_stmts(&out).len(), 1);

    let texts: Vec<&str> = out
        .file
        .comments
        .as_slice()
        .iter()
        .map(|c| interner.lookup(c.text))
        .collect();
    assert_eq!(texts, vec!["// header", "/* why */"]);
}
