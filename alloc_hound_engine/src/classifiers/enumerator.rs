// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Reference-type enumerator classification.
//!
//! Iterating a source whose enumerator factory returns a reference type
//! allocates an enumerator per iteration start; value-type enumerator
//! patterns avoid that. The platform string type is exempt, the compiler
//! special-cases its iteration with no allocation at all.

use crate::dispatch::{AllocationClassifier, ClassifyContext};
use crate::rules;
use crate::semantics::{SpecialKind, TypeFacts};
use crate::syntax::SyntaxKind;
use alloc_hound_common::finding::Finding;

pub struct EnumeratorClassifier;

const INTERESTS: &[SyntaxKind] = &[
    SyntaxKind::ForEachStatement,
    SyntaxKind::InvocationExpression,
];

impl AllocationClassifier for EnumeratorClassifier {
    fn name(&self) -> &'static str {
        "enumerator"
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        INTERESTS
    }

    fn classify(&self, cx: &ClassifyContext<'_>, out: &mut Vec<Finding>) -> anyhow::Result<()> {
        match cx.kind() {
            SyntaxKind::ForEachStatement => self.check_iteration(cx, out),
            SyntaxKind::InvocationExpression => self.check_invocation(cx, out),
            _ => {}
        }
        Ok(())
    }
}

impl EnumeratorClassifier {
    fn check_iteration(&self, cx: &ClassifyContext<'_>, out: &mut Vec<Finding>) {
        let tree = cx.tree;
        let Some(iterated) = tree.child(cx.node, 0) else {
            return;
        };
        let Some(facts) = cx.oracle.expression_type(iterated) else {
            return;
        };
        if facts.is_platform_string() {
            return;
        }

        // Enumerator-factory lookup, first hit wins: a member declared on
        // the type itself, then on the type after the site's implicit
        // conversion, then through an implemented enumerable interface.
        let factory_return = facts
            .declared_enumerator
            .as_deref()
            .or_else(|| {
                cx.oracle
                    .converted_type(iterated)
                    .and_then(|t| t.declared_enumerator.as_deref())
            })
            .or_else(|| enumerable_interface_factory(facts));

        if let Some(ret) = factory_return {
            if ret.is_reference && ret.special != SpecialKind::BaseEnumerator {
                // Anchor: the `in` keyword of the iteration statement.
                out.push(rules::REFERENCE_ENUMERATOR.finding(tree.anchor(cx.node)));
            }
        }
    }

    fn check_invocation(&self, cx: &ClassifyContext<'_>, out: &mut Vec<Finding>) {
        let Some(symbol) = cx.oracle.resolved_symbol(cx.node) else {
            return;
        };
        let Some(ret) = &symbol.return_type else {
            return;
        };
        let implements_enumerator = ret.interface_specials.iter().any(|s| {
            matches!(
                s,
                SpecialKind::BaseEnumerator | SpecialKind::GenericEnumerator
            )
        });
        if ret.is_reference && implements_enumerator {
            out.push(rules::REFERENCE_ENUMERATOR.finding(cx.span()));
        }
    }
}

fn enumerable_interface_factory(facts: &TypeFacts) -> Option<&TypeFacts> {
    facts
        .interfaces
        .iter()
        .find(|i| i.name == "IEnumerable")
        .and_then(|i| i.declared_enumerator.as_deref())
}
