// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.
#![allow(dead_code)]

use alloc_hound::{
    AnalysisOutcome, AnalysisSession, AnalyzerConfig, FactOracle, SemanticOracle, SourceSpan,
    SyntaxTree,
};

pub fn span(lo: u32, hi: u32) -> SourceSpan {
    SourceSpan::new(lo, hi)
}

/// Run the default session over a scripted unit.
pub fn analyze(tree: &SyntaxTree, oracle: &FactOracle) -> AnalysisOutcome {
    analyze_with(AnalyzerConfig::default(), tree, oracle)
}

pub fn analyze_with(
    config: AnalyzerConfig,
    tree: &SyntaxTree,
    oracle: &FactOracle,
) -> AnalysisOutcome {
    let session = AnalysisSession::new(config).expect("default config must compile");
    session.run(tree, oracle as &dyn SemanticOracle)
}

pub fn rule_count(outcome: &AnalysisOutcome, rule_id: &str) -> usize {
    outcome
        .findings
        .iter()
        .filter(|f| f.rule_id == rule_id)
        .count()
}

/// Assert exactly one finding for `rule_id` and that it starts at `lo`.
pub fn assert_single_finding_at(outcome: &AnalysisOutcome, rule_id: &str, lo: u32) {
    let matches: Vec<_> = outcome
        .findings
        .iter()
        .filter(|f| f.rule_id == rule_id)
        .collect();
    assert_eq!(
        matches.len(),
        1,
        "expected exactly one '{rule_id}' finding, got {:?}",
        outcome.findings
    );
    assert_eq!(
        matches[0].span.lo, lo,
        "'{rule_id}' anchored at wrong position: {:?}",
        matches[0].span
    );
}

pub fn assert_no_finding(outcome: &AnalysisOutcome, rule_id: &str) {
    assert_eq!(
        rule_count(outcome, rule_id),
        0,
        "expected no '{rule_id}' findings, got {:?}",
        outcome.findings
    );
}
