// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! alloc-hound: a static auditor for implicit heap allocations in
//! managed-language code.
//!
//! The host front end supplies a parsed [`SyntaxTree`] and a
//! [`SemanticOracle`] per compilation unit; an [`AnalysisSession`] applies
//! the suppression policy, runs the classification engine, and returns
//! findings in a deterministic order. Presentation is the host's job;
//! [`report`] offers text and JSON renderings for hosts that want them.

mod session;

pub use session::AnalysisSession;

pub use alloc_hound_common::finding::{Finding, Rule, Severity};
pub use alloc_hound_common::report;
pub use alloc_hound_common::span::{SourceSpan, SourceText};
pub use alloc_hound_config::{AnalyzerConfig, IgnoredAttribute, LanguageRevision};
pub use alloc_hound_engine::{
    AllocationClassifier, AllocationEngine, AnalysisOutcome, CancelFlag, Capture, CaptureSet,
    ClassifyContext, ConstValue, ConversionKind, FactOracle, NodeFlags, NodeId, ProducerError,
    SemanticOracle, SpecialKind, SuppressionPolicy, SymbolFacts, SymbolKind, SyntaxKind,
    SyntaxTree, TreeBuilder, TypeFacts, default_classifiers, rules,
};
