use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tern_ir::{AssignOp, BinaryOp, Expr, Span, UnaryOp};
use tern_parse::parse_file;

fn round_trip(source: &str) -> String {
    let interner = StringInterner::new();
    let output = parse_file("test.tn", source, &interner);
    assert!(!output.has_errors(), "{:?}", output.errors);
    format_file(&output.file, &interner)
}

fn ident(tree: &mut SyntaxTree, interner: &StringInterner, name: &str) -> ExprId {
    tree.alloc_expr(Expr::new(ExprKind::Ident(interner.intern(name)), Span::DUMMY))
}

fn alloc(tree: &mut SyntaxTree, kind: ExprKind) -> ExprId {
    tree.alloc_expr(Expr::new(kind, Span::DUMMY))
}

#[test]
fn test_canonical_file_is_stable() {
    let source = "\
package com.example

import a.b.User
import a.b.Other as O
import c.d.*

val limit: Int = 10
var count = 0

fun f(x: Int, u: User?): Int {
    var total = 0
    total += if (x > 0) x else -x
    val label: kotlin.collections.List<String>? = when (x) {
        1, 2 -> \"small\"
        else -> {
            count += 1
            \"big\"
        }
    }
    return total
}

fun g() = (a + b) * c
";
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_layout_is_normalized() {
    let source = "fun f(){\nx=if(a)1 else 2\nreturn}";
    assert_eq!(round_trip(source), "fun f() {\n    x = if (a) 1 else 2\n    return\n}\n");
}

#[test]
fn test_empty_block() {
    assert_eq!(round_trip("fun f() {\n}\n"), "fun f() {}\n");
}

#[test]
fn test_comments_are_printed_where_written() {
    let source = "\
// header
package p // pkg

import a.B // used

/* doc */
fun f(x: Int) {
    // leading
    val y = x // trailing
    when (x) {
        // first
        1 -> y // one
        else -> 0
        // after the last arm
    }
    /* closing */
}

// end of file
";
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_comment_keeps_empty_block_open() {
    let source = "fun f() {\n    // nothing yet\n}\n";
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_inline_comment_moves_before_next_statement() {
    let source = "fun f() {\n    x = if (a) /* odd */ 1 else 2\n    y = 3\n}\n";
    assert_eq!(
        round_trip(source),
        "fun f() {\n    x = if (a) 1 else 2\n    /* odd */\n    y = 3\n}\n"
    );
}

#[test]
fn test_format_file_at_reports_anchor_offset() {
    let interner = StringInterner::new();
    let output = parse_file("test.tn", "fun f() {\n    // note\n    x  =  1\n}\n", &interner);
    let file = &output.file;
    let body = file.module.functions().next().map(|f| f.body);
    let Some(ExprKind::Block(range)) = body.map(|b| file.tree.expr_kind(b)) else {
        panic!("expected a block body");
    };
    let stmt = file.tree.stmt_list(range)[0];

    let (text, at) = format_file_at(file, &interner, stmt);
    assert_eq!(text, "fun f() {\n    // note\n    x = 1\n}\n");
    assert_eq!(at, text.find("x = 1"));
    assert_eq!(format_file_at(file, &interner, StmtId::INVALID).1, None);
}

#[test]
fn test_when_without_subject() {
    let source = "fun f() {\n    when {\n        a -> x = 1\n        b -> return\n    }\n}\n";
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_literals() {
    let source = "fun f() = g(1, 2.5, true, null, 'c', \"a\\n\\\"b\\\"\")\n";
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_parenthesization_follows_precedence() {
    let interner = StringInterner::new();
    let mut tree = SyntaxTree::new();
    let a = ident(&mut tree, &interner, "a");
    let b = ident(&mut tree, &interner, "b");
    let c = ident(&mut tree, &interner, "c");

    // a - (b - c)
    let inner = alloc(
        &mut tree,
        ExprKind::Binary {
            op: BinaryOp::Sub,
            left: b,
            right: c,
        },
    );
    let outer = alloc(
        &mut tree,
        ExprKind::Binary {
            op: BinaryOp::Sub,
            left: a,
            right: inner,
        },
    );
    assert_eq!(format_expr(&tree, outer, &interner), "a - (b - c)");

    // -(a as Int).x
    let ty = tree.alloc_type_ref(tern_ir::TypeRef::named(
        vec![interner.intern("Int")],
        Span::DUMMY,
    ));
    let cast = alloc(&mut tree, ExprKind::Cast { expr: a, ty });
    let field = alloc(
        &mut tree,
        ExprKind::Field {
            receiver: cast,
            name: interner.intern("x"),
        },
    );
    let neg = alloc(
        &mut tree,
        ExprKind::Unary {
            op: UnaryOp::Neg,
            operand: field,
        },
    );
    assert_eq!(format_expr(&tree, neg, &interner), "-(a as Int).x");
}

#[test]
fn test_dangling_else_gets_braces() {
    let interner = StringInterner::new();
    let mut tree = SyntaxTree::new();
    let a = ident(&mut tree, &interner, "a");
    let b = ident(&mut tree, &interner, "b");
    let x = ident(&mut tree, &interner, "x");
    let one = alloc(&mut tree, ExprKind::Int(1));
    let assign_one = alloc(
        &mut tree,
        ExprKind::Assign {
            target: x,
            op: AssignOp::Assign,
            value: one,
        },
    );
    let inner = alloc(
        &mut tree,
        ExprKind::If {
            cond: b,
            then_branch: assign_one,
            else_branch: ExprId::INVALID,
        },
    );
    let x2 = tree.clone_expr(x);
    let two = alloc(&mut tree, ExprKind::Int(2));
    let assign_two = alloc(
        &mut tree,
        ExprKind::Assign {
            target: x2,
            op: AssignOp::Assign,
            value: two,
        },
    );
    let outer = alloc(
        &mut tree,
        ExprKind::If {
            cond: a,
            then_branch: inner,
            else_branch: assign_two,
        },
    );
    assert_eq!(
        format_expr(&tree, outer, &interner),
        "if (a) {\n    if (b) x = 1\n} else x = 2"
    );
}

#[test]
fn test_with_indent_applies_to_continuation_lines() {
    let interner = StringInterner::new();
    let output = parse_file("t.tn", "fun f() {\n    x = if (a) {\n        1\n    } else 2\n}\n", &interner);
    let function = output
        .file
        .module
        .functions()
        .next()
        .unwrap_or_else(|| panic!("no function"));
    let ExprKind::Block(range) = output.file.tree.expr_kind(function.body) else {
        panic!("expected block");
    };
    let stmt = output.file.tree.stmt_list(range)[0];

    let mut printer = Printer::new(&output.file.tree, &interner, StringEmitter::new()).with_indent(1);
    printer.stmt(stmt);
    assert_eq!(printer.finish().output(), "x = if (a) {\n        1\n    } else 2");
    assert_eq!(
        format_stmt(&output.file.tree, stmt, &interner),
        "x = if (a) {\n    1\n} else 2"
    );
}

#[test]
fn test_format_type_ref() {
    let interner = StringInterner::new();
    let output = parse_file("t.tn", "val m: Map<String, List<Int>?>? = null\n", &interner);
    let stmt = output.file.module.properties().next().unwrap_or_else(|| panic!("no property"));
    let StmtKind::Decl(decl) = output.file.tree.stmt(stmt).kind else {
        panic!("expected declaration");
    };
    assert_eq!(
        format_type_ref(&output.file.tree, decl.ty, &interner),
        "Map<String, List<Int>?>?"
    );
}

/// Structure of an expression with spans erased.
fn shape(tree: &SyntaxTree, interner: &StringInterner, id: ExprId) -> String {
    match tree.expr_kind(id) {
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Ident(name) => interner.lookup(name).to_owned(),
        ExprKind::Unary { op, operand } => {
            format!("({} {})", op.as_symbol(), shape(tree, interner, operand))
        }
        ExprKind::Binary { op, left, right } => format!(
            "({} {} {})",
            op.as_symbol(),
            shape(tree, interner, left),
            shape(tree, interner, right)
        ),
        other => format!("{other:?}"),
    }
}

#[derive(Clone, Debug)]
enum Arith {
    Leaf(u8),
    Neg(Box<Arith>),
    Bin(BinaryOp, Box<Arith>, Box<Arith>),
}

fn arith() -> impl Strategy<Value = Arith> {
    let leaf = (0u8..6).prop_map(Arith::Leaf);
    leaf.prop_recursive(5, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| Arith::Neg(Box::new(e))),
            (
                prop_oneof![
                    Just(BinaryOp::Add),
                    Just(BinaryOp::Sub),
                    Just(BinaryOp::Mul),
                    Just(BinaryOp::Div),
                    Just(BinaryOp::Lt),
                    Just(BinaryOp::Eq),
                    Just(BinaryOp::And),
                    Just(BinaryOp::Or),
                ],
                inner.clone(),
                inner
            )
                .prop_map(|(op, l, r)| Arith::Bin(op, Box::new(l), Box::new(r))),
        ]
    })
}

fn build(tree: &mut SyntaxTree, interner: &StringInterner, e: &Arith) -> ExprId {
    match e {
        Arith::Leaf(n) if n % 2 == 0 => alloc(tree, ExprKind::Int(i64::from(*n))),
        Arith::Leaf(n) => ident(tree, interner, &format!("v{n}")),
        Arith::Neg(inner) => {
            let operand = build(tree, interner, inner);
            alloc(
                tree,
                ExprKind::Unary {
                    op: UnaryOp::Neg,
                    operand,
                },
            )
        }
        Arith::Bin(op, l, r) => {
            let left = build(tree, interner, l);
            let right = build(tree, interner, r);
            alloc(
                tree,
                ExprKind::Binary {
                    op: *op,
                    left,
                    right,
                },
            )
        }
    }
}

proptest! {
    #[test]
    fn printed_operators_reparse_to_same_tree(e in arith()) {
        let interner = StringInterner::new();
        let mut tree = SyntaxTree::new();
        let root = build(&mut tree, &interner, &e);
        let printed = format_expr(&tree, root, &interner);

        let output = parse_file("p.tn", &format!("fun f() = {printed}\n"), &interner);
        prop_assert!(!output.has_errors(), "{printed}: {:?}", output.errors);
        let function = output.file.module.functions().next();
        prop_assert!(function.is_some());
        if let Some(function) = function {
            prop_assert_eq!(
                shape(&output.file.tree, &interner, function.body),
                shape(&tree, &interner, root)
            );
        }
    }
}
