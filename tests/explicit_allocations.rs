// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Explicit allocation shapes: object/array/anonymous creations, implicit
//! arrays, initializers and query let clauses.

mod support;

use alloc_hound::{FactOracle, SyntaxKind, TreeBuilder, TypeFacts};
use support::*;

#[test]
fn new_reference_type_reports_at_the_new_keyword() {
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 30));
    let creation = b.push(root, SyntaxKind::ObjectCreation, span(10, 27));
    b.set_anchor(creation, span(10, 13));
    let tree = b.finish();

    let mut oracle = FactOracle::new();
    oracle.set_converted_type(creation, TypeFacts::reference("Widget"));

    let outcome = analyze(&tree, &oracle);
    assert_single_finding_at(&outcome, "new-object", 10);
}

#[test]
fn new_struct_is_a_stack_allocation() {
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 30));
    let creation = b.push(root, SyntaxKind::ObjectCreation, span(10, 27));
    b.set_anchor(creation, span(10, 13));
    let tree = b.finish();

    let mut oracle = FactOracle::new();
    oracle.set_converted_type(creation, TypeFacts::value("Point"));

    let outcome = analyze(&tree, &oracle);
    assert!(outcome.findings.is_empty());
}

#[test]
fn unresolved_creation_target_is_skipped() {
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 30));
    let creation = b.push(root, SyntaxKind::ObjectCreation, span(10, 27));
    b.set_anchor(creation, span(10, 13));
    let tree = b.finish();

    let mut oracle = FactOracle::new();
    oracle.set_converted_type(creation, TypeFacts::reference("Wdiget").with_error());

    let outcome = analyze(&tree, &oracle);
    assert!(outcome.findings.is_empty());
}

#[test]
fn array_creations_report_at_their_anchor() {
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 60));
    let explicit = b.push(root, SyntaxKind::ArrayCreation, span(5, 20));
    b.set_anchor(explicit, span(5, 8));
    let implicit = b.push(root, SyntaxKind::ImplicitArrayCreation, span(30, 50));
    b.set_anchor(implicit, span(30, 33));
    let tree = b.finish();

    let outcome = analyze(&tree, &FactOracle::new());
    assert_single_finding_at(&outcome, "new-array", 5);
    assert_single_finding_at(&outcome, "implicit-array", 30);
}

#[test]
fn anonymous_object_reports_at_its_anchor() {
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 40));
    let anon = b.push(root, SyntaxKind::AnonymousObjectCreation, span(8, 35));
    b.set_anchor(anon, span(8, 11));
    let tree = b.finish();

    let outcome = analyze(&tree, &FactOracle::new());
    assert_single_finding_at(&outcome, "new-anonymous-object", 8);
}

#[test]
fn query_let_clause_reports_at_the_let_keyword() {
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 60));
    let let_clause = b.push(root, SyntaxKind::LetClause, span(20, 45));
    b.set_anchor(let_clause, span(20, 23));
    let tree = b.finish();

    let outcome = analyze(&tree, &FactOracle::new());
    assert_single_finding_at(&outcome, "let-clause", 20);
}

#[test]
fn initializer_on_a_declared_variable_reports_both_allocations() {
    // var widget = new Widget { Name = "Bob" };
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 45));
    let decl = b.push(root, SyntaxKind::LocalDeclaration, span(0, 41));
    let declarator = b.push(decl, SyntaxKind::VariableDeclarator, span(4, 40));
    b.set_anchor(declarator, span(4, 10));
    let clause = b.push(declarator, SyntaxKind::EqualsValueClause, span(11, 40));
    let creation = b.push(clause, SyntaxKind::ObjectCreation, span(13, 40));
    b.set_anchor(creation, span(13, 16));
    let initializer = b.push(creation, SyntaxKind::ObjectInitializer, span(24, 40));
    let tree = b.finish();

    let mut oracle = FactOracle::new();
    oracle.set_converted_type(creation, TypeFacts::reference("Widget"));

    let outcome = analyze(&tree, &oracle);
    assert_single_finding_at(&outcome, "initializer", 4);
    assert_single_finding_at(&outcome, "new-object", 13);
}

#[test]
fn initializer_without_a_declarator_shape_stays_quiet() {
    // widget = new Widget { Name = "Bob" }; (plain assignment)
    let mut b = TreeBuilder::new("program.cs");
    let root = b.root(SyntaxKind::CompilationUnit, span(0, 45));
    let assign = b.push(root, SyntaxKind::SimpleAssignment, span(0, 41));
    let _target = b.push(assign, SyntaxKind::IdentifierName, span(0, 6));
    let creation = b.push(assign, SyntaxKind::ObjectCreation, span(9, 40));
    b.set_anchor(creation, span(9, 12));
    let _initializer = b.push(creation, SyntaxKind::ObjectInitializer, span(20, 40));
    let tree = b.finish();

    let mut oracle = FactOracle::new();
    oracle.set_converted_type(creation, TypeFacts::reference("Widget"));

    let outcome = analyze(&tree, &oracle);
    assert_no_finding(&outcome, "initializer");
    assert_single_finding_at(&outcome, "new-object", 9);
}
