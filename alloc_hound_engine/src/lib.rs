// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Core allocation-classification engine.
//!
//! A host front end parses one compilation unit into a [`syntax::SyntaxTree`]
//! and answers semantic questions about it through a [`semantics::SemanticOracle`].
//! The [`dispatch::AllocationEngine`] walks the tree once in document order
//! and offers every node to each registered classifier that declared interest
//! in the node's kind; classifiers emit [`alloc_hound_common::Finding`]s.

pub mod classifiers;
pub mod dispatch;
pub mod facts;
pub mod rules;
pub mod semantics;
pub mod suppress;
pub mod syntax;

// Re-export our public API
pub use classifiers::default_classifiers;
pub use dispatch::{
    AllocationClassifier, AllocationEngine, AnalysisOutcome, CancelFlag, ClassifyContext,
    ProducerError,
};
pub use facts::FactOracle;
pub use semantics::{
    Capture, CaptureSet, ConstValue, ConversionKind, SemanticOracle, SpecialKind, SymbolFacts,
    SymbolKind, TypeFacts,
};
pub use suppress::SuppressionPolicy;
pub use syntax::{NodeFlags, NodeId, SyntaxKind, SyntaxTree, TreeBuilder};
