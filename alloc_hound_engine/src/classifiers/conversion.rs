// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Boxing and method-group/delegate conversion classification.
//!
//! Covers the nine syntactic contexts where the compiler silently inserts
//! a value-to-reference conversion or materializes a delegate from a bare
//! method reference: call arguments, return statements, yield returns,
//! null-coalescing and `as` binaries, conditionals, casts, initializer
//! clauses, interpolated-string holes and expression-bodied arrows.

use crate::dispatch::{AllocationClassifier, ClassifyContext};
use crate::rules;
use crate::semantics::{ConversionKind, SymbolKind};
use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};
use alloc_hound_common::finding::Finding;

pub struct ConversionClassifier;

const INTERESTS: &[SyntaxKind] = &[
    SyntaxKind::Argument,
    SyntaxKind::ReturnStatement,
    SyntaxKind::YieldReturnStatement,
    SyntaxKind::CoalesceExpression,
    SyntaxKind::AsExpression,
    SyntaxKind::ConditionalExpression,
    SyntaxKind::CastExpression,
    SyntaxKind::EqualsValueClause,
    SyntaxKind::Interpolation,
    SyntaxKind::ArrowExpressionClause,
];

impl AllocationClassifier for ConversionClassifier {
    fn name(&self) -> &'static str {
        "conversion"
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        INTERESTS
    }

    fn classify(&self, cx: &ClassifyContext<'_>, out: &mut Vec<Finding>) -> anyhow::Result<()> {
        let tree = cx.tree;
        match cx.kind() {
            // The conditional checks both arms; children are
            // [condition, when-true, when-false].
            SyntaxKind::ConditionalExpression => {
                for index in [1, 2] {
                    if let Some(arm) = tree.child(cx.node, index) {
                        self.check_expression(cx, arm, false, out);
                    }
                }
            }
            // The coalesce only converts its right operand.
            SyntaxKind::CoalesceExpression => {
                if let Some(right) = tree.child(cx.node, 1) {
                    self.check_expression(cx, right, false, out);
                }
            }
            SyntaxKind::EqualsValueClause => {
                if let Some(value) = tree.child(cx.node, 0) {
                    let readonly_slot = in_readonly_declaration(tree, cx.node);
                    self.check_expression(cx, value, readonly_slot, out);
                }
            }
            // Everything else converts its sole significant child:
            // the argument/return/yield expression, the cast or `as`
            // operand, the interpolation hole, the arrow body.
            _ => {
                if let Some(expr) = tree.child(cx.node, 0) {
                    self.check_expression(cx, expr, false, out);
                }
            }
        }
        Ok(())
    }
}

impl ConversionClassifier {
    fn check_expression(
        &self,
        cx: &ClassifyContext<'_>,
        expr: NodeId,
        readonly_slot: bool,
        out: &mut Vec<Finding>,
    ) {
        // A compile-time constant needs no runtime conversion.
        if cx.oracle.constant_value(expr).is_some() {
            return;
        }

        match cx.oracle.conversion_at(expr) {
            ConversionKind::Boxing => {
                let Some(facts) = cx.oracle.expression_type(expr) else {
                    return;
                };
                if !facts.special.is_optimized_value() {
                    out.push(rules::BOXING.finding(cx.tree.span(expr)));
                }
            }
            ConversionKind::MethodGroup => {
                self.check_method_group(cx, expr, readonly_slot, out);
            }
            _ => {}
        }
    }

    fn check_method_group(
        &self,
        cx: &ClassifyContext<'_>,
        expr: NodeId,
        readonly_slot: bool,
        out: &mut Vec<Finding>,
    ) {
        if !cx.tree.kind(expr).is_method_reference_shape() {
            return;
        }
        let Some(symbol) = cx.oracle.resolved_symbol(expr) else {
            return;
        };
        if symbol.kind != SymbolKind::Method {
            return;
        }

        // Converting a value-type instance method to a delegate boxes the
        // receiver whether the delegate creation is implicit or explicit.
        if !symbol.is_static && symbol.receiver.as_ref().is_some_and(|r| !r.is_reference) {
            out.push(rules::DELEGATE_ON_STRUCT.finding(cx.tree.span(expr)));
        }

        // An explicit delegate-constructor call is the programmer's own
        // `new`; the explicit classifier reports that one.
        if in_explicit_delegate_creation(cx, expr) {
            return;
        }

        // A one-time assignment into a readonly slot is still an
        // allocation, but a distinct, static-cost one. Reported even for
        // static targets.
        if readonly_slot {
            out.push(rules::READONLY_METHOD_GROUP.finding(cx.tree.span(expr)));
            return;
        }

        if symbol.is_static {
            let exempt = !symbol.is_local_function
                || cx
                    .config
                    .language_revision
                    .static_local_functions_are_allocation_free();
            if exempt {
                return;
            }
        }

        out.push(rules::METHOD_GROUP.finding(cx.tree.span(expr)));
    }
}

/// True when the clause initializes a `readonly` (or `static readonly`)
/// field, or a get-only auto property.
fn in_readonly_declaration(tree: &SyntaxTree, clause: NodeId) -> bool {
    tree.ancestors(clause).any(|a| {
        matches!(
            tree.kind(a),
            SyntaxKind::FieldDeclaration | SyntaxKind::PropertyDeclaration
        ) && tree.flags(a).is_readonly
    })
}

/// True when `expr` is an argument of an object creation whose type is a
/// delegate type, i.e. `new SomeDelegate(expr)`.
fn in_explicit_delegate_creation(cx: &ClassifyContext<'_>, expr: NodeId) -> bool {
    let tree = cx.tree;
    let Some(arg) = tree.parent(expr).filter(|p| tree.kind(*p) == SyntaxKind::Argument) else {
        return false;
    };
    let Some(list) = tree
        .parent(arg)
        .filter(|p| tree.kind(*p) == SyntaxKind::ArgumentList)
    else {
        return false;
    };
    let Some(creation) = tree
        .parent(list)
        .filter(|p| tree.kind(*p) == SyntaxKind::ObjectCreation)
    else {
        return false;
    };
    cx.oracle
        .expression_type(creation)
        .or_else(|| cx.oracle.converted_type(creation))
        .is_some_and(|t| t.is_delegate)
}
