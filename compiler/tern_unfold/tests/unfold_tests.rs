#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end unfolding: parse, classify, unfold, print.

mod common;

use common::{offset_of, parse, print, stmt_at, unfold_at, unfolded, unfolded_with};
use pretty_assertions::assert_eq;
use tern_ir::{ExprId, SourceFile, StmtKind, StringInterner};
use tern_types::{ResolveError, Type, TypeResolver};
use tern_unfold::{
    classify, find_candidate, unfoldable_statements, Precondition, UnfoldError, UnfoldOptions,
    UnfoldableKind, Unfolder,
};

/// A resolver whose backend is never available.
struct Offline;

impl TypeResolver for Offline {
    fn resolve_expr_type(
        &mut self,
        _file: &SourceFile,
        _expr: ExprId,
    ) -> Result<Option<Type>, ResolveError> {
        Err(ResolveError::Unavailable {
            reason: "offline".to_owned(),
        })
    }
}

const ALL_KINDS: &str = "\
fun f(c: Boolean, n: Int): Int {
    var x = 0
    x = if (c) 1 else 2
    x += when (n) {
        1 -> 10
        else -> 20
    }
    val a = if (c) 1 else 2
    val b = when {
        c -> 1
        else -> 2
    }
    if (c) {
        return if (n > 0) n else -n
    }
    return when (n) {
        0 -> 1
        else -> x
    }
}
";

#[test]
fn classifies_all_six_kinds() {
    let interner = StringInterner::new();
    let file = parse(ALL_KINDS, &interner);
    let cases = [
        ("x = if", UnfoldableKind::AssignmentToIf),
        ("x += when", UnfoldableKind::AssignmentToWhen),
        ("val a", UnfoldableKind::DeclarationToIf),
        ("val b", UnfoldableKind::DeclarationToWhen),
        ("return if", UnfoldableKind::ReturnToIf),
        ("return when", UnfoldableKind::ReturnToWhen),
    ];
    for (needle, kind) in cases {
        assert_eq!(classify(&file.tree, stmt_at(&file, needle)), Some(kind), "{needle}");
    }
    let found: Vec<UnfoldableKind> = unfoldable_statements(&file)
        .into_iter()
        .map(|(_, kind)| kind)
        .collect();
    assert_eq!(found, cases.map(|(_, kind)| kind).to_vec());
}

#[test]
fn rejects_statements_without_catch_all_or_conditional() {
    let source = "\
fun f(c: Boolean, n: Int): Int {
    var x = 0
    x = if (c) 1
    x *= when (n) {
        1 -> 2
    }
    val a = when {
        c -> 1
    }
    x = n + 1
    val b = 3
    println(if (c) 1 else 2)
    return when (n) {
        1 -> 2
    }
}
";
    let interner = StringInterner::new();
    let file = parse(source, &interner);
    for needle in [
        "x = if",
        "x *= when",
        "val a",
        "x = n",
        "val b",
        "println",
        "return when",
    ] {
        assert_eq!(classify(&file.tree, stmt_at(&file, needle)), None, "{needle}");
    }
    assert!(unfoldable_statements(&file).is_empty());
}

#[test]
fn member_properties_are_not_candidates() {
    let source = "val top = if (flag) 1 else 2\n\nfun f() {}\n";
    let interner = StringInterner::new();
    let mut file = parse(source, &interner);
    let stmt = stmt_at(&file, "val top");
    assert_eq!(classify(&file.tree, stmt), None);

    let before = file.tree.clone();
    let result = Unfolder::new(&interner).unfold_declaration(&mut file, stmt, &mut Offline);
    assert_eq!(result, Err(UnfoldError::Precondition(Precondition::NotLocal)));
    assert_eq!(file.tree, before);
}

#[test]
fn classification_does_not_touch_the_tree() {
    let interner = StringInterner::new();
    let file = parse(ALL_KINDS, &interner);
    let before = file.clone();
    let first = unfoldable_statements(&file);
    let second = unfoldable_statements(&file);
    assert_eq!(first, second);
    assert_eq!(file.tree, before.tree);
    assert_eq!(file.revision(), before.revision());
}

#[test]
fn unfolds_assignment_of_if() {
    let source = "\
fun f(c: Boolean) {
    var x = 0
    x += if (c) 1 else 2
}
";
    assert_eq!(
        unfolded(source, "x +="),
        "\
fun f(c: Boolean) {
    var x = 0
    if (c) x += 1 else x += 2
}
"
    );
}

#[test]
fn comments_survive_unfolding() {
    let source = "\
// Copyright notice
fun f(c: Boolean) {
    // keep me
    var x = 0
    x = if (c) 1 else 2 // why
}
";
    assert_eq!(
        unfolded(source, "x = if"),
        "\
// Copyright notice
fun f(c: Boolean) {
    // keep me
    var x = 0
    if (c) x = 1 else x = 2 // why
}
"
    );
}

#[test]
fn comments_inside_a_declaration_stay_with_their_arms() {
    let source = "\
fun f(n: Int) {
    val y = when (n) { // pick
        0 -> 1 // zero
        else -> 2
    }
    /* done */
}
";
    assert_eq!(
        unfolded(source, "val y"),
        "\
fun f(n: Int) {
    val y: Int
    when (n) {
        // pick
        0 -> y = 1 // zero
        else -> y = 2
    }
    /* done */
}
"
    );
}

#[test]
fn unfolds_assignment_of_when_into_block_tails() {
    let source = "\
fun f(n: Int) {
    var x = 0
    x -= when (n) {
        1 -> 10
        2, 3 -> {
            log(n)
            20
        }
        else -> 30
    }
}
";
    assert_eq!(
        unfolded(source, "x -="),
        "\
fun f(n: Int) {
    var x = 0
    when (n) {
        1 -> x -= 10
        2, 3 -> {
            log(n)
            x -= 20
        }
        else -> x -= 30
    }
}
"
    );
}

#[test]
fn preserves_every_assignment_operator() {
    for op in ["=", "+=", "-=", "*=", "/=", "%="] {
        let source = format!("fun f(c: Boolean) {{\n    x {op} if (c) a else b\n}}\n");
        let expected = format!("fun f(c: Boolean) {{\n    if (c) x {op} a else x {op} b\n}}\n");
        assert_eq!(unfolded(&source, "x "), expected, "{op}");
    }
}

#[test]
fn copies_complex_targets_into_each_branch() {
    let source = "\
fun f(c: Boolean) {
    owner().items.size = if (c) 1 else 2
}
";
    assert_eq!(
        unfolded(source, "owner()"),
        "\
fun f(c: Boolean) {
    if (c) owner().items.size = 1 else owner().items.size = 2
}
"
    );
}

#[test]
fn unfolds_returns() {
    let source = "\
fun sign(n: Int): Int {
    return if (n < 0) -1 else if (n == 0) 0 else 1
}
";
    assert_eq!(
        unfolded(source, "return"),
        "\
fun sign(n: Int): Int {
    if (n < 0) return -1 else return if (n == 0) 0 else 1
}
"
    );

    let source = "\
fun name(n: Int): String {
    return when {
        n > 1 -> \"many\"
        else -> {
            val s = \"one\"
            s
        }
    }
}
";
    assert_eq!(
        unfolded(source, "return"),
        "\
fun name(n: Int): String {
    when {
        n > 1 -> return \"many\"
        else -> {
            val s = \"one\"
            return s
        }
    }
}
"
    );
}

#[test]
fn declaration_keeps_explicit_type() {
    let source = "\
fun f(c: Boolean) {
    val y: Number = if (c) 1 else 2
    println(y)
}
";
    let interner = StringInterner::new();
    let mut file = parse(source, &interner);
    let unfolded = unfold_at(&mut file, &interner, "val y", UnfoldOptions::default())
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(unfolded.kind, UnfoldableKind::DeclarationToIf);
    assert_eq!(unfolded.declaration, Some(stmt_at(&file, "val y")));
    assert_eq!(unfolded.caret, offset_of(&file, "val y"));
    assert_eq!(
        print(&file, &interner),
        "\
fun f(c: Boolean) {
    val y: Number
    if (c) y = 1 else y = 2
    println(y)
}
"
    );
}

#[test]
fn declaration_writes_inferred_type() {
    let source = "\
fun f(n: Int) {
    var total = n
    val y = when (n) {
        0 -> 1
        else -> {
            total += 1
            total
        }
    }
}
";
    assert_eq!(
        unfolded(source, "val y"),
        "\
fun f(n: Int) {
    var total = n
    val y: Int
    when (n) {
        0 -> y = 1
        else -> {
            total += 1
            y = total
        }
    }
}
"
    );
    let long = UnfoldOptions {
        shorten_references: false,
    };
    assert_eq!(
        unfolded_with(source, "val y", long).lines().nth(2),
        Some("    val y: kotlin.Int")
    );
}

#[test]
fn declaration_shortens_generic_types_against_imports() {
    let source = "\
package app

import model.User

fun users(): List<User?> = load()

fun f(c: Boolean) {
    var y = if (c) users() else mutableListOf()
}
";
    // The empty `mutableListOf()` has no element type, so the join is unknown.
    assert!(unfolded(source, "var y").contains("    var y: _\n"));

    let source = source.replace("mutableListOf()", "users()");
    let text = unfolded(&source, "var y");
    assert!(text.contains("    var y: List<User?>\n    if (c) y = users() else y = users()\n"), "{text}");

    let long = UnfoldOptions {
        shorten_references: false,
    };
    let text = unfolded_with(&source, "var y", long);
    assert!(text.contains("    var y: kotlin.collections.List<model.User?>\n"), "{text}");
}

#[test]
fn declaration_with_unknown_type_gets_placeholder() {
    let source = "\
fun f(c: Boolean) {
    val y = if (c) 1 else \"one\"
}
";
    assert_eq!(
        unfolded(source, "val y"),
        "\
fun f(c: Boolean) {
    val y: _
    if (c) y = 1 else y = \"one\"
}
"
    );
}

#[test]
fn resolution_failure_leaves_file_untouched() {
    let source = "\
fun f(c: Boolean) {
    val y = if (c) 1 else 2
}
";
    let interner = StringInterner::new();
    let mut file = parse(source, &interner);
    let before = file.clone();
    let stmt = stmt_at(&file, "val y");

    let result = Unfolder::new(&interner).unfold(&mut file, stmt, &mut Offline);
    assert_eq!(
        result,
        Err(UnfoldError::Resolution(ResolveError::Unavailable {
            reason: "offline".to_owned()
        }))
    );
    assert_eq!(file.tree, before.tree);
    assert_eq!(file.module, before.module);
    assert_eq!(file.revision(), before.revision());
}

#[test]
fn unresolvable_tail_leaves_file_untouched() {
    let source = "\
fun f(c: Boolean) {
    var x = 0
    x = if (c) {
        val t = 1
    } else 2
    x = when {
        c -> {}
        else -> 3
    }
}
";
    let interner = StringInterner::new();
    let mut file = parse(source, &interner);
    let before = file.clone();

    for (needle, tail) in [("x = if", "val t"), ("x = when", "{}")] {
        let result = unfold_at(&mut file, &interner, needle, UnfoldOptions::default());
        let Err(UnfoldError::Precondition(Precondition::UnresolvedTail { span })) = &result else {
            panic!("expected an unresolved tail for `{needle}`, got {result:?}");
        };
        assert_eq!(span.start, offset_of(&file, tail));
        assert_eq!(file.tree, before.tree);
        assert_eq!(file.revision(), before.revision());
    }
}

#[test]
fn direct_calls_check_their_preconditions() {
    let source = "\
fun f(c: Boolean): Int {
    var x = 0
    x = 5
    x = if (c) 1
    val y = 1
    return x
}
";
    let interner = StringInterner::new();
    let mut file = parse(source, &interner);
    let before = file.tree.clone();
    let unfolder = Unfolder::new(&interner);

    let assign = stmt_at(&file, "x = 5");
    assert_eq!(
        unfolder.unfold_assignment(&mut file, assign),
        Err(UnfoldError::from(Precondition::NotBranched))
    );
    let open = stmt_at(&file, "x = if");
    assert_eq!(
        unfolder.unfold_assignment(&mut file, open),
        Err(UnfoldError::from(Precondition::MissingCatchAll))
    );
    let ret = stmt_at(&file, "return");
    assert_eq!(
        unfolder.unfold_return(&mut file, ret),
        Err(UnfoldError::from(Precondition::NotBranched))
    );
    assert_eq!(
        unfolder.unfold_return(&mut file, assign),
        Err(UnfoldError::from(Precondition::NotUnfoldable))
    );
    let decl = stmt_at(&file, "val y");
    assert_eq!(
        unfolder.unfold_declaration(&mut file, decl, &mut Offline),
        Err(UnfoldError::from(Precondition::NotBranched))
    );
    assert_eq!(
        unfolder.unfold(&mut file, decl, &mut Offline),
        Err(UnfoldError::from(Precondition::NotUnfoldable))
    );
    assert_eq!(file.tree, before);
}

#[test]
fn finds_innermost_candidate() {
    let source = "\
fun f(c: Boolean, d: Boolean) {
    var x = 0
    var y = 0
    x = if (c) {
        y = if (d) 1 else 2
        y
    } else 3
}
";
    let interner = StringInterner::new();
    let mut file = parse(source, &interner);
    let outer = stmt_at(&file, "x = if");
    let inner = stmt_at(&file, "y = if");

    assert_eq!(
        find_candidate(&file, offset_of(&file, "y = if")),
        Some((inner, UnfoldableKind::AssignmentToIf))
    );
    assert_eq!(
        find_candidate(&file, offset_of(&file, "else 3")),
        Some((outer, UnfoldableKind::AssignmentToIf))
    );
    assert_eq!(find_candidate(&file, offset_of(&file, "var y")), None);
    assert_eq!(unfoldable_statements(&file).len(), 2);

    unfold_at(&mut file, &interner, "x = if", UnfoldOptions::default())
        .unwrap_or_else(|e| panic!("{e}"));
    // The inner statement now lives in the rewritten copy.
    let remaining = unfoldable_statements(&file);
    assert_eq!(remaining.len(), 1);
    assert_ne!(remaining[0].0, inner);
    assert_eq!(
        print(&file, &interner),
        "\
fun f(c: Boolean, d: Boolean) {
    var x = 0
    var y = 0
    if (c) {
        y = if (d) 1 else 2
        x = y
    } else x = 3
}
"
    );
}

#[test]
fn unfolded_output_reparses_to_same_text() {
    let interner = StringInterner::new();
    let mut file = parse(ALL_KINDS, &interner);
    while let Some((stmt, _)) = unfoldable_statements(&file).into_iter().next() {
        let mut cache = tern_types::AnalysisCache::new();
        let mut resolver = tern_types::LocalResolver::new(&mut cache, &interner);
        Unfolder::new(&interner)
            .unfold(&mut file, stmt, &mut resolver)
            .unwrap_or_else(|e| panic!("{e}"));
    }
    let text = print(&file, &interner);
    let reparsed = parse(&text, &interner);
    assert_eq!(print(&reparsed, &interner), text);
    assert!(unfoldable_statements(&reparsed).is_empty());

    let declarations = reparsed
        .module
        .functions()
        .flat_map(|f| match reparsed.tree.expr_kind(f.body) {
            tern_ir::ExprKind::Block(range) => reparsed.tree.stmt_list(range).to_vec(),
            _ => Vec::new(),
        })
        .filter(|&s| matches!(reparsed.tree.stmt(s).kind, StmtKind::Decl(d) if !d.init.is_valid()))
        .count();
    assert_eq!(declarations, 2);
}
