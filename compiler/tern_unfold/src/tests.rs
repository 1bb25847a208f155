use super::*;
use pretty_assertions::assert_eq;
use tern_ir::{
    AssignOp, Decl, Expr, ExprId, ExprKind, Span, Stmt, StmtId, StmtKind, StringInterner,
    SyntaxTree,
};

fn span() -> Span {
    Span::new(0, 1)
}

fn alloc(tree: &mut SyntaxTree, kind: ExprKind) -> ExprId {
    tree.alloc_expr(Expr::new(kind, span()))
}

fn block(tree: &mut SyntaxTree, exprs: &[ExprId]) -> ExprId {
    let stmts: Vec<StmtId> = exprs
        .iter()
        .map(|&e| tree.alloc_stmt(Stmt::new(StmtKind::Expr(e), span())))
        .collect();
    let range = tree.alloc_stmt_list(&stmts);
    alloc(tree, ExprKind::Block(range))
}

#[test]
fn test_locate_tail_through_three_nested_blocks() {
    let mut tree = SyntaxTree::new();
    let e = alloc(&mut tree, ExprKind::Int(7));
    let innermost = block(&mut tree, &[e]);
    let noise = alloc(&mut tree, ExprKind::Int(0));
    let middle = block(&mut tree, &[noise, innermost]);
    let outer = block(&mut tree, &[middle]);

    assert_eq!(locate_tail(&tree, outer), Ok(e));
    assert_eq!(locate_tail(&tree, e), Ok(e));
}

#[test]
fn test_locate_tail_rejects_empty_block_and_trailing_declaration() {
    let interner = StringInterner::new();
    let mut tree = SyntaxTree::new();
    let empty = block(&mut tree, &[]);
    assert_eq!(
        locate_tail(&tree, empty),
        Err(Precondition::UnresolvedTail { span: span() })
    );

    let one = alloc(&mut tree, ExprKind::Int(1));
    let decl = tree.alloc_stmt(Stmt::new(
        StmtKind::Decl(Decl {
            name: interner.intern("t"),
            ty: tern_ir::TypeRefId::INVALID,
            init: one,
            mutable: false,
        }),
        Span::new(4, 9),
    ));
    let range = tree.alloc_stmt_list(&[decl]);
    let ends_in_decl = alloc(&mut tree, ExprKind::Block(range));
    assert_eq!(
        locate_tail(&tree, ends_in_decl),
        Err(Precondition::UnresolvedTail {
            span: Span::new(4, 9)
        })
    );
}

#[test]
fn test_locate_tail_stops_at_nested_conditional() {
    let mut tree = SyntaxTree::new();
    let cond = alloc(&mut tree, ExprKind::Bool(true));
    let a = alloc(&mut tree, ExprKind::Int(1));
    let inner_if = alloc(
        &mut tree,
        ExprKind::If {
            cond,
            then_branch: a,
            else_branch: ExprId::INVALID,
        },
    );
    let body = block(&mut tree, &[inner_if]);
    assert_eq!(locate_tail(&tree, body), Ok(inner_if));
}

#[test]
fn test_branched_view_requires_catch_all() {
    let mut tree = SyntaxTree::new();
    let cond = alloc(&mut tree, ExprKind::Bool(true));
    let a = alloc(&mut tree, ExprKind::Int(1));
    let b = alloc(&mut tree, ExprKind::Int(2));
    let open_if = alloc(
        &mut tree,
        ExprKind::If {
            cond,
            then_branch: a,
            else_branch: ExprId::INVALID,
        },
    );
    assert_eq!(
        BranchedExpr::of(&tree, open_if),
        Err(Precondition::MissingCatchAll)
    );
    assert_eq!(BranchedExpr::of(&tree, a), Err(Precondition::NotBranched));
    assert_eq!(
        BranchedExpr::of(&tree, ExprId::INVALID),
        Err(Precondition::NotBranched)
    );

    let conditions = tree.alloc_expr_list(&[cond]);
    let arms = tree.alloc_arms(&[tern_ir::WhenArm {
        conditions,
        body: a,
        span: span(),
    }]);
    let open_when = alloc(
        &mut tree,
        ExprKind::When {
            subject: ExprId::INVALID,
            arms,
            else_body: ExprId::INVALID,
        },
    );
    assert_eq!(
        BranchedExpr::of(&tree, open_when),
        Err(Precondition::MissingCatchAll)
    );

    let closed_when = alloc(
        &mut tree,
        ExprKind::When {
            subject: ExprId::INVALID,
            arms,
            else_body: b,
        },
    );
    let view = BranchedExpr::of(&tree, closed_when).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(view.shape(), Shape::When);
    assert_eq!(view.bodies().as_slice(), &[a, b]);
}

#[test]
fn test_distribute_leaves_original_untouched() {
    let interner = StringInterner::new();
    let mut tree = SyntaxTree::new();
    let cond = alloc(&mut tree, ExprKind::Bool(true));
    let a = alloc(&mut tree, ExprKind::Int(1));
    let b = alloc(&mut tree, ExprKind::Int(2));
    let if_expr = alloc(
        &mut tree,
        ExprKind::If {
            cond,
            then_branch: a,
            else_branch: b,
        },
    );
    let x = alloc(&mut tree, ExprKind::Ident(interner.intern("x")));
    let before = tree.clone();

    let view = BranchedExpr::of(&tree, if_expr).unwrap_or_else(|e| panic!("{e}"));
    let root = distribute(
        &mut tree,
        &view,
        &mut AssignTail {
            target: x,
            op: AssignOp::Mul,
        },
    )
    .unwrap_or_else(|e| panic!("{e}"));

    assert_ne!(root, if_expr);
    for id in [cond, a, b, if_expr, x] {
        assert_eq!(tree.expr(id), before.expr(id));
    }

    let ExprKind::If {
        then_branch,
        else_branch,
        ..
    } = tree.expr_kind(root)
    else {
        panic!("expected if");
    };
    for (branch, value) in [(then_branch, 1), (else_branch, 2)] {
        let ExprKind::Assign { target, op, value: v } = tree.expr_kind(branch) else {
            panic!("expected assignment");
        };
        assert_eq!(op, AssignOp::Mul);
        assert_ne!(target, x);
        assert_eq!(tree.expr_kind(target), ExprKind::Ident(interner.intern("x")));
        assert_eq!(tree.expr_kind(v), ExprKind::Int(value));
    }
}

#[test]
fn test_classify_ignores_unknown_statement_ids() {
    let tree = SyntaxTree::new();
    assert_eq!(classify(&tree, StmtId::new(3)), None);
    assert_eq!(classify(&tree, StmtId::INVALID), None);
}

#[test]
#[should_panic(expected = "Expression must be checked before unfolding")]
fn test_classify_panics_on_assignment_without_target() {
    let mut tree = SyntaxTree::new();
    let cond = alloc(&mut tree, ExprKind::Bool(true));
    let a = alloc(&mut tree, ExprKind::Int(1));
    let b = alloc(&mut tree, ExprKind::Int(2));
    let value = alloc(
        &mut tree,
        ExprKind::If {
            cond,
            then_branch: a,
            else_branch: b,
        },
    );
    let assign = alloc(
        &mut tree,
        ExprKind::Assign {
            target: ExprId::INVALID,
            op: AssignOp::Assign,
            value,
        },
    );
    let stmt = tree.alloc_stmt(Stmt::new(StmtKind::Expr(assign), span()));
    classify(&tree, stmt);
}
