// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Closure-capture classification.
//!
//! For every lambda and anonymous method, asks the oracle which outer
//! variables the body captures and decides whether the compiler must
//! synthesize a display class to carry them.
//!
//! Known accepted limitation, inherited from the oracle's data-flow
//! contract: captures are attributed to the lexical scope of the lambda's
//! introducing block, not the narrower block that actually needs them, so
//! a capturing and a non-capturing lambda sharing an outer block can
//! over-report.

use crate::dispatch::{AllocationClassifier, ClassifyContext};
use crate::rules;
use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};
use alloc_hound_common::finding::Finding;

pub struct ClosureCaptureClassifier;

const INTERESTS: &[SyntaxKind] = &[
    SyntaxKind::SimpleLambda,
    SyntaxKind::ParenthesizedLambda,
    SyntaxKind::AnonymousMethod,
];

impl AllocationClassifier for ClosureCaptureClassifier {
    fn name(&self) -> &'static str {
        "closure_capture"
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        INTERESTS
    }

    fn classify(&self, cx: &ClassifyContext<'_>, out: &mut Vec<Finding>) -> anyhow::Result<()> {
        let tree = cx.tree;
        let node = cx.node;

        // An anonymous method without a body produces nothing.
        if cx.kind() == SyntaxKind::AnonymousMethod && !has_nonempty_block(tree, node) {
            return Ok(());
        }

        // Anchor: the arrow token, or the `delegate` keyword.
        let anchor = tree.anchor(node);

        // A delegate created inside a generic method cannot be cached per
        // call site; it allocates on every invocation regardless of what
        // the body captures.
        if let Some(symbol) = cx.oracle.resolved_symbol(node) {
            if symbol.containing_method_arity > 0 {
                out.push(rules::GENERIC_METHOD_DELEGATE.finding(anchor));
            }
        }

        let Some(captures) = cx.oracle.captures(node) else {
            return Ok(());
        };
        if captures.is_empty() {
            return Ok(());
        }

        if captures.is_only_enclosing_instance() {
            // No display class is synthesized for a capture of the
            // enclosing instance alone; the cost degrades to a delegate
            // allocation, except in constructor-argument position where
            // the generated binding code needs none.
            if !in_constructor_argument(tree, node) {
                let capture = &captures.captured[0];
                let span = capture.spans.first().copied().unwrap_or(anchor);
                out.push(rules::METHOD_GROUP.finding(span));
            }
            return Ok(());
        }

        for capture in &captures.captured {
            if cx.cancel.is_set() {
                return Ok(());
            }
            for span in &capture.spans {
                out.push(rules::CLOSURE_CAPTURE.finding(*span));
            }
        }
        out.push(rules::CLOSURE_SOURCE.finding_with_args(anchor, vec![captures.joined_names()]));

        Ok(())
    }
}

fn has_nonempty_block(tree: &SyntaxTree, node: NodeId) -> bool {
    tree.children(node)
        .iter()
        .any(|c| tree.kind(*c) == SyntaxKind::Block && !tree.children(*c).is_empty())
}

/// True when the lambda's immediate contextual use is a
/// constructor-argument position: `new Widget(() => ...)`.
fn in_constructor_argument(tree: &SyntaxTree, node: NodeId) -> bool {
    let Some(arg) = tree.parent(node).filter(|p| tree.kind(*p) == SyntaxKind::Argument) else {
        return false;
    };
    let Some(list) = tree
        .parent(arg)
        .filter(|p| tree.kind(*p) == SyntaxKind::ArgumentList)
    else {
        return false;
    };
    tree.parent(list)
        .is_some_and(|p| tree.kind(p) == SyntaxKind::ObjectCreation)
}
