// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! String-concatenation chain classification.
//!
//! A chain is analyzed exactly once, from its outermost add/add-assign
//! expression; links are then visited innermost first. Constant-valued
//! links are folded by the compiler and skipped. A chain whose string
//! link count exceeds the configured threshold gets a single finding at
//! the outermost expression; boxed operands are reported individually.

use crate::dispatch::{AllocationClassifier, ClassifyContext};
use crate::rules;
use crate::semantics::ConversionKind;
use crate::syntax::SyntaxKind;
use alloc_hound_common::finding::Finding;

pub struct ConcatenationClassifier;

const INTERESTS: &[SyntaxKind] = &[
    SyntaxKind::AddExpression,
    SyntaxKind::AddAssignmentExpression,
];

impl AllocationClassifier for ConcatenationClassifier {
    fn name(&self) -> &'static str {
        "concatenation"
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        INTERESTS
    }

    fn classify(&self, cx: &ClassifyContext<'_>, out: &mut Vec<Finding>) -> anyhow::Result<()> {
        let tree = cx.tree;

        // Interior links are handled by their chain's outermost node.
        if tree
            .parent(cx.node)
            .is_some_and(|p| tree.kind(p).is_concatenation_link())
        {
            return Ok(());
        }

        let mut links: Vec<_> = tree
            .descendants_and_self(cx.node)
            .into_iter()
            .filter(|n| tree.kind(*n).is_concatenation_link())
            .collect();
        // Innermost expressions first.
        links.reverse();

        let mut string_concatenations = 0usize;
        for link in links {
            if cx.cancel.is_set() {
                return Ok(());
            }
            let (Some(left), Some(right)) = (tree.child(link, 0), tree.child(link, 1)) else {
                continue;
            };

            // The compiler folds constant chains; no runtime allocation.
            if cx.oracle.constant_value(link).is_some() {
                continue;
            }

            let left_is_string = cx
                .oracle
                .expression_type(left)
                .is_some_and(|t| t.is_platform_string());
            let right_is_string = cx
                .oracle
                .expression_type(right)
                .is_some_and(|t| t.is_platform_string());
            if left_is_string || right_is_string {
                string_concatenations += 1;
            }

            for operand in [left, right] {
                if cx.oracle.conversion_at(operand) != ConversionKind::Boxing {
                    continue;
                }
                let Some(facts) = cx.oracle.expression_type(operand) else {
                    continue;
                };
                if !facts.special.is_optimized_value() {
                    out.push(rules::BOXING_IN_CONCATENATION.finding_with_args(
                        tree.span(operand),
                        vec![facts.display.clone()],
                    ));
                }
            }
        }

        if string_concatenations > cx.config.concat_threshold {
            out.push(rules::STRING_CONCATENATION.finding(cx.span()));
        }

        Ok(())
    }
}
