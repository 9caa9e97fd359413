// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Immutable syntax trees.
//!
//! Nodes live in an arena owned by the tree; children are owned top-down
//! and parent links are plain arena indices, so navigation both ways is
//! cheap and no ownership cycle exists. Trees are produced once by a host
//! front end (or a [`TreeBuilder`] in tests) and never mutated afterwards.

mod kind;

pub use kind::SyntaxKind;

use alloc_hound_common::span::SourceSpan;

/// Index of a node inside its [`SyntaxTree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Declaration facts a front end records directly on the node that
/// declares them (the semantic oracle covers everything else).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeFlags {
    /// `static` modifier on the enclosing declaration
    pub is_static: bool,
    /// `readonly` field, or a get-only auto property
    pub is_readonly: bool,
}

#[derive(Debug)]
struct SyntaxNode {
    kind: SyntaxKind,
    span: SourceSpan,
    /// Span of the kind's significant token (`new`, the arrow, `in`,
    /// `let`, `delegate`, a declared identifier), when distinct from the
    /// node's own span.
    anchor: Option<SourceSpan>,
    flags: NodeFlags,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// One parsed compilation unit.
#[derive(Debug)]
pub struct SyntaxTree {
    file_path: String,
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.nodes[id.index()].kind
    }

    pub fn span(&self, id: NodeId) -> SourceSpan {
        self.nodes[id.index()].span
    }

    /// The node's anchor token span, falling back to its full span when
    /// the front end recorded none.
    pub fn anchor(&self, id: NodeId) -> SourceSpan {
        self.nodes[id.index()].anchor.unwrap_or(self.nodes[id.index()].span)
    }

    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.nodes[id.index()].flags
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes[id.index()].children.get(index).copied()
    }

    /// Walk upward from `id`'s parent to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |n| self.parent(*n))
    }

    /// Depth-first preorder over the whole tree; this is the document
    /// order the dispatcher guarantees.
    pub fn preorder(&self) -> Vec<NodeId> {
        self.descendants_and_self(self.root())
    }

    /// Depth-first preorder over `id`'s subtree, including `id`.
    pub fn descendants_and_self(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            for child in self.children(n).iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// First ancestor of the given kind, if any.
    pub fn ancestor_of_kind(&self, id: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.ancestors(id).find(|n| self.kind(*n) == kind)
    }
}

/// Builds a [`SyntaxTree`] front to back. The first node pushed becomes
/// the root; all later nodes name an existing parent.
#[derive(Debug)]
pub struct TreeBuilder {
    file_path: String,
    nodes: Vec<SyntaxNode>,
}

impl TreeBuilder {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            nodes: Vec::new(),
        }
    }

    /// Push the root node. Panics if a root already exists.
    pub fn root(&mut self, kind: SyntaxKind, span: SourceSpan) -> NodeId {
        assert!(self.nodes.is_empty(), "tree already has a root");
        self.nodes.push(SyntaxNode {
            kind,
            span,
            anchor: None,
            flags: NodeFlags::default(),
            parent: None,
            children: Vec::new(),
        });
        NodeId(0)
    }

    /// Push a child of `parent` in document order.
    pub fn push(&mut self, parent: NodeId, kind: SyntaxKind, span: SourceSpan) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            kind,
            span,
            anchor: None,
            flags: NodeFlags::default(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn set_anchor(&mut self, id: NodeId, anchor: SourceSpan) {
        self.nodes[id.index()].anchor = Some(anchor);
    }

    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        self.nodes[id.index()].flags = flags;
    }

    pub fn finish(self) -> SyntaxTree {
        assert!(!self.nodes.is_empty(), "tree has no root");
        SyntaxTree {
            file_path: self.file_path,
            nodes: self.nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(lo: u32, hi: u32) -> SourceSpan {
        SourceSpan::new(lo, hi)
    }

    #[test]
    fn preorder_follows_document_order() {
        let mut b = TreeBuilder::new("unit.cs");
        let root = b.root(SyntaxKind::CompilationUnit, span(0, 100));
        let first = b.push(root, SyntaxKind::Block, span(0, 50));
        let inner = b.push(first, SyntaxKind::ReturnStatement, span(10, 20));
        let second = b.push(root, SyntaxKind::Block, span(50, 100));
        let tree = b.finish();

        assert_eq!(tree.preorder(), vec![root, first, inner, second]);
    }

    #[test]
    fn parent_links_navigate_upward_without_owning() {
        let mut b = TreeBuilder::new("unit.cs");
        let root = b.root(SyntaxKind::CompilationUnit, span(0, 30));
        let arg_list = b.push(root, SyntaxKind::ArgumentList, span(5, 25));
        let arg = b.push(arg_list, SyntaxKind::Argument, span(6, 24));
        let tree = b.finish();

        assert_eq!(tree.parent(arg), Some(arg_list));
        assert_eq!(
            tree.ancestors(arg).collect::<Vec<_>>(),
            vec![arg_list, root]
        );
        assert_eq!(
            tree.ancestor_of_kind(arg, SyntaxKind::CompilationUnit),
            Some(root)
        );
    }

    #[test]
    fn anchor_falls_back_to_full_span() {
        let mut b = TreeBuilder::new("unit.cs");
        let root = b.root(SyntaxKind::CompilationUnit, span(0, 20));
        let with_anchor = b.push(root, SyntaxKind::ObjectCreation, span(2, 18));
        b.set_anchor(with_anchor, span(2, 5));
        let without = b.push(root, SyntaxKind::Literal, span(19, 20));
        let tree = b.finish();

        assert_eq!(tree.anchor(with_anchor), span(2, 5));
        assert_eq!(tree.anchor(without), span(19, 20));
    }

    #[test]
    fn descendants_of_subtree_exclude_siblings() {
        let mut b = TreeBuilder::new("unit.cs");
        let root = b.root(SyntaxKind::CompilationUnit, span(0, 40));
        let left = b.push(root, SyntaxKind::AddExpression, span(0, 20));
        let left_inner = b.push(left, SyntaxKind::AddExpression, span(0, 10));
        let _right = b.push(root, SyntaxKind::Literal, span(30, 40));
        let tree = b.finish();

        assert_eq!(tree.descendants_and_self(left), vec![left, left_inner]);
    }
}
