// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Node-kind dispatch.
//!
//! The engine walks a tree once in depth-first document order and offers
//! each node to every classifier whose interest set contains the node's
//! kind. Classifiers are stateless and never talk to each other; a
//! classifier failure on one node is isolated and recorded, not fatal.

use crate::semantics::SemanticOracle;
use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};
use alloc_hound_common::finding::Finding;
use alloc_hound_common::span::SourceSpan;
use alloc_hound_config::AnalyzerConfig;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation signal shared between the host and a running
/// analysis. Cancellation is not an error: dispatch stops promptly and
/// findings already emitted remain valid.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything a classifier gets for one node: the node, the tree it lives
/// in, the semantic oracle, the process-wide config and the cancellation
/// signal.
pub struct ClassifyContext<'a> {
    pub node: NodeId,
    pub tree: &'a SyntaxTree,
    pub oracle: &'a dyn SemanticOracle,
    pub config: &'a AnalyzerConfig,
    pub cancel: &'a CancelFlag,
}

impl ClassifyContext<'_> {
    pub fn kind(&self) -> SyntaxKind {
        self.tree.kind(self.node)
    }

    pub fn span(&self) -> SourceSpan {
        self.tree.span(self.node)
    }
}

/// Trait for defining allocation classifiers.
///
/// Implementations hold no per-analysis state: everything they need
/// arrives through the context, so the host may invoke them concurrently
/// across units and across classifiers for the same node.
pub trait AllocationClassifier: Send + Sync {
    fn name(&self) -> &'static str;

    /// Node kinds this classifier wants to see.
    fn interests(&self) -> &'static [SyntaxKind];

    /// Inspect one node and append zero or more findings.
    ///
    /// Findings from a single call are appended in a fixed, deterministic
    /// order. An `Err` is a classifier-internal fault; the dispatcher
    /// records it and moves on.
    fn classify(&self, cx: &ClassifyContext<'_>, out: &mut Vec<Finding>) -> anyhow::Result<()>;
}

/// A classifier fault isolated by the dispatcher: a diagnostic-producer
/// error, never a code finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerError {
    pub classifier: &'static str,
    pub span: SourceSpan,
    pub message: String,
}

/// Result of analyzing one compilation unit.
#[derive(Debug, Default)]
pub struct AnalysisOutcome {
    pub findings: Vec<Finding>,
    pub producer_errors: Vec<ProducerError>,
}

/// Routes each node of a tree to every interested classifier.
pub struct AllocationEngine {
    classifiers: Vec<Box<dyn AllocationClassifier>>,
    config: AnalyzerConfig,
}

impl AllocationEngine {
    pub fn new(classifiers: Vec<Box<dyn AllocationClassifier>>, config: AnalyzerConfig) -> Self {
        Self {
            classifiers,
            config,
        }
    }

    /// Engine with the full default classifier set.
    pub fn with_default_classifiers(config: AnalyzerConfig) -> Self {
        Self::new(crate::classifiers::default_classifiers(), config)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one unit. Nodes are visited in depth-first document order;
    /// dispatch order across classifiers for the same node is
    /// unspecified, and callers needing a stable overall order sort the
    /// findings themselves.
    pub fn run(&self, tree: &SyntaxTree, oracle: &dyn SemanticOracle) -> AnalysisOutcome {
        self.run_with_cancel(tree, oracle, &CancelFlag::new())
    }

    pub fn run_with_cancel(
        &self,
        tree: &SyntaxTree,
        oracle: &dyn SemanticOracle,
        cancel: &CancelFlag,
    ) -> AnalysisOutcome {
        let mut outcome = AnalysisOutcome::default();

        for node in tree.preorder() {
            if cancel.is_set() {
                break;
            }
            let kind = tree.kind(node);
            for classifier in &self.classifiers {
                if !classifier.interests().contains(&kind) {
                    continue;
                }
                let cx = ClassifyContext {
                    node,
                    tree,
                    oracle,
                    config: &self.config,
                    cancel,
                };
                if let Err(fault) = classifier.classify(&cx, &mut outcome.findings) {
                    outcome.producer_errors.push(ProducerError {
                        classifier: classifier.name(),
                        span: tree.span(node),
                        message: format!("{fault:#}"),
                    });
                }
            }
        }

        outcome
    }
}
