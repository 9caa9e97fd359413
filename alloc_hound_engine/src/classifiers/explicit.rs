// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Explicit-allocation classification.
//!
//! Purely informational: the programmer already wrote the allocation, so
//! these fire at Info severity and exist to make allocation density
//! visible. One rule per syntactic shape, mutually exclusive by shape.

use crate::dispatch::{AllocationClassifier, ClassifyContext};
use crate::rules;
use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};
use alloc_hound_common::finding::Finding;

pub struct ExplicitAllocationClassifier;

const INTERESTS: &[SyntaxKind] = &[
    SyntaxKind::ObjectCreation,
    SyntaxKind::AnonymousObjectCreation,
    SyntaxKind::ArrayCreation,
    SyntaxKind::ImplicitArrayCreation,
    SyntaxKind::ObjectInitializer,
    SyntaxKind::LetClause,
];

impl AllocationClassifier for ExplicitAllocationClassifier {
    fn name(&self) -> &'static str {
        "explicit_allocation"
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        INTERESTS
    }

    fn classify(&self, cx: &ClassifyContext<'_>, out: &mut Vec<Finding>) -> anyhow::Result<()> {
        let tree = cx.tree;
        match cx.kind() {
            // var widget = new Widget { Name = "Bob" };
            //              |            |--------------| object initializer
            //              |---------------------------| object creation
            // Anchored on the declared identifier so the creation's own
            // visit still reports the `new` separately.
            SyntaxKind::ObjectInitializer => {
                if let Some(declarator) = initializer_assigned_to_declarator(cx, cx.node) {
                    out.push(rules::INITIALIZER.finding(tree.anchor(declarator)));
                }
            }
            SyntaxKind::ImplicitArrayCreation => {
                out.push(rules::IMPLICIT_ARRAY.finding(tree.anchor(cx.node)));
            }
            SyntaxKind::AnonymousObjectCreation => {
                out.push(rules::NEW_ANONYMOUS_OBJECT.finding(tree.anchor(cx.node)));
            }
            SyntaxKind::ArrayCreation => {
                out.push(rules::NEW_ARRAY.finding(tree.anchor(cx.node)));
            }
            SyntaxKind::ObjectCreation => {
                if has_valid_reference_target(cx, cx.node) {
                    out.push(rules::NEW_OBJECT.finding(tree.anchor(cx.node)));
                }
            }
            SyntaxKind::LetClause => {
                out.push(rules::LET_CLAUSE.finding(tree.anchor(cx.node)));
            }
            _ => {}
        }
        Ok(())
    }
}

/// The declarator for the `new T { ... }` directly-assigned initializer
/// shape, if this initializer sits in one.
fn initializer_assigned_to_declarator(
    cx: &ClassifyContext<'_>,
    initializer: NodeId,
) -> Option<NodeId> {
    let tree = cx.tree;
    let creation = parent_of_kind(tree, initializer, SyntaxKind::ObjectCreation)?;
    if !has_valid_reference_target(cx, creation) {
        return None;
    }
    let clause = parent_of_kind(tree, creation, SyntaxKind::EqualsValueClause)?;
    parent_of_kind(tree, clause, SyntaxKind::VariableDeclarator)
}

fn parent_of_kind(tree: &SyntaxTree, node: NodeId, kind: SyntaxKind) -> Option<NodeId> {
    tree.parent(node).filter(|p| tree.kind(*p) == kind)
}

/// The creation's converted target type is a valid, non-error reference
/// type.
fn has_valid_reference_target(cx: &ClassifyContext<'_>, creation: NodeId) -> bool {
    cx.oracle
        .converted_type(creation)
        .is_some_and(|t| t.is_reference && !t.is_error)
}
