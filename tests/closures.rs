// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Closure-capture classification over lambdas and anonymous methods.

mod support;

use alloc_hound::{
    Capture, CaptureSet, FactOracle, NodeId, SymbolFacts, SyntaxKind, SyntaxTree, TreeBuilder,
};
use support::*;

/// `x => ...` with the arrow anchored at position 10.
fn simple_lambda() -> (SyntaxTree, NodeId) {
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 40));
    let lambda = b.push(root, SyntaxKind::SimpleLambda, span(8, 30));
    b.set_anchor(lambda, span(10, 12));
    let body = b.push(lambda, SyntaxKind::Block, span(13, 30));
    let _stmt = b.push(body, SyntaxKind::IdentifierName, span(14, 19));
    (b.finish(), lambda)
}

fn local_capture(name: &str, at: u32) -> Capture {
    Capture {
        name: name.into(),
        spans: vec![span(at, at + name.len() as u32)],
        is_enclosing_instance: false,
    }
}

fn self_capture(at: u32) -> Capture {
    Capture {
        name: "this".into(),
        spans: vec![span(at, at + 4)],
        is_enclosing_instance: true,
    }
}

#[test]
fn capture_free_lambda_is_silent() {
    let (tree, lambda) = simple_lambda();
    let mut oracle = FactOracle::new();
    oracle.set_captures(lambda, CaptureSet::default());

    let outcome = analyze(&tree, &oracle);
    assert!(outcome.findings.is_empty());
}

#[test]
fn unanalyzed_lambda_is_silent() {
    let (tree, _) = simple_lambda();
    let outcome = analyze(&tree, &FactOracle::new());
    assert!(outcome.findings.is_empty());
}

#[test]
fn one_local_capture_reports_the_site_and_the_source() {
    let (tree, lambda) = simple_lambda();
    let mut oracle = FactOracle::new();
    oracle.set_captures(
        lambda,
        CaptureSet {
            captured: vec![local_capture("counter", 14)],
        },
    );

    let outcome = analyze(&tree, &oracle);
    assert_single_finding_at(&outcome, "closure-capture", 14);
    // The source finding lands on the arrow and names the captures.
    let source: Vec<_> = outcome
        .findings
        .iter()
        .filter(|f| f.rule_id == "closure-source")
        .collect();
    assert_eq!(source.len(), 1);
    assert_eq!(source[0].span.lo, 10);
    assert_eq!(source[0].args, vec!["counter".to_string()]);
}

#[test]
fn every_capture_site_is_reported() {
    let (tree, lambda) = simple_lambda();
    let mut oracle = FactOracle::new();
    oracle.set_captures(
        lambda,
        CaptureSet {
            captured: vec![
                Capture {
                    name: "a".into(),
                    spans: vec![span(14, 15), span(20, 21)],
                    is_enclosing_instance: false,
                },
                local_capture("b", 24),
            ],
        },
    );

    let outcome = analyze(&tree, &oracle);
    assert_eq!(rule_count(&outcome, "closure-capture"), 3);
    let source = outcome
        .findings
        .iter()
        .find(|f| f.rule_id == "closure-source")
        .unwrap();
    assert_eq!(source.args, vec!["a,b".to_string()]);
}

#[test]
fn self_only_capture_degrades_to_a_delegate_allocation() {
    let (tree, lambda) = simple_lambda();
    let mut oracle = FactOracle::new();
    oracle.set_captures(
        lambda,
        CaptureSet {
            captured: vec![self_capture(14)],
        },
    );

    let outcome = analyze(&tree, &oracle);
    assert_single_finding_at(&outcome, "method-group", 14);
    assert_no_finding(&outcome, "closure-capture");
    assert_no_finding(&outcome, "closure-source");
}

#[test]
fn self_only_capture_in_constructor_argument_is_free() {
    // new Widget(() => this.Refresh())
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 40));
    let creation = b.push(root, SyntaxKind::ObjectCreation, span(0, 33));
    let list = b.push(creation, SyntaxKind::ArgumentList, span(10, 33));
    let arg = b.push(list, SyntaxKind::Argument, span(11, 32));
    let lambda = b.push(arg, SyntaxKind::ParenthesizedLambda, span(11, 32));
    b.set_anchor(lambda, span(14, 16));
    let tree = b.finish();

    let mut oracle = FactOracle::new();
    oracle.set_captures(
        lambda,
        CaptureSet {
            captured: vec![self_capture(17)],
        },
    );

    let outcome = analyze(&tree, &oracle);
    assert_no_finding(&outcome, "method-group");
    assert_no_finding(&outcome, "closure-capture");
}

#[test]
fn self_plus_local_still_builds_a_display_class() {
    let (tree, lambda) = simple_lambda();
    let mut oracle = FactOracle::new();
    oracle.set_captures(
        lambda,
        CaptureSet {
            captured: vec![self_capture(14), local_capture("total", 20)],
        },
    );

    let outcome = analyze(&tree, &oracle);
    assert_eq!(rule_count(&outcome, "closure-capture"), 2);
    assert_no_finding(&outcome, "method-group");
}

#[test]
fn delegate_inside_a_generic_method_always_allocates() {
    let (tree, lambda) = simple_lambda();
    let mut oracle = FactOracle::new();
    oracle
        .set_symbol(lambda, SymbolFacts::method("Sort").in_generic_method(1))
        .set_captures(lambda, CaptureSet::default());

    let outcome = analyze(&tree, &oracle);
    assert_single_finding_at(&outcome, "generic-method-delegate", 10);
}

#[test]
fn bodiless_anonymous_method_is_not_a_delegate() {
    // delegate { } parses but produces no delegate object
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 30));
    let anon = b.push(root, SyntaxKind::AnonymousMethod, span(8, 20));
    b.set_anchor(anon, span(8, 16));
    let _empty_body = b.push(anon, SyntaxKind::Block, span(17, 20));
    let tree = b.finish();

    let mut oracle = FactOracle::new();
    oracle
        .set_symbol(anon, SymbolFacts::method("Run").in_generic_method(1))
        .set_captures(
            anon,
            CaptureSet {
                captured: vec![local_capture("x", 18)],
            },
        );

    let outcome = analyze(&tree, &oracle);
    assert!(outcome.findings.is_empty());
}

#[test]
fn anonymous_method_with_a_body_reports_like_a_lambda() {
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 30));
    let anon = b.push(root, SyntaxKind::AnonymousMethod, span(8, 28));
    b.set_anchor(anon, span(8, 16));
    let body = b.push(anon, SyntaxKind::Block, span(17, 28));
    let _stmt = b.push(body, SyntaxKind::IdentifierName, span(18, 23));
    let tree = b.finish();

    let mut oracle = FactOracle::new();
    oracle.set_captures(
        anon,
        CaptureSet {
            captured: vec![local_capture("state", 18)],
        },
    );

    let outcome = analyze(&tree, &oracle);
    assert_single_finding_at(&outcome, "closure-capture", 18);
    assert_single_finding_at(&outcome, "closure-source", 8);
}
