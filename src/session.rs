// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use alloc_hound_config::AnalyzerConfig;
use alloc_hound_engine::{
    AllocationEngine, AnalysisOutcome, CancelFlag, SemanticOracle, SuppressionPolicy, SyntaxTree,
};

/// One configured analysis pipeline: suppression policy in front of the
/// engine, deterministic finding order behind it.
///
/// Construct once per process (or per config change) and feed it units;
/// the session holds no per-unit state.
pub struct AnalysisSession {
    engine: AllocationEngine,
    suppression: SuppressionPolicy,
}

impl AnalysisSession {
    /// Build a session with the default classifier set. Fails only on an
    /// invalid suppression pattern in the config.
    pub fn new(config: AnalyzerConfig) -> anyhow::Result<Self> {
        let suppression = SuppressionPolicy::from_config(&config)?;
        let engine = AllocationEngine::with_default_classifiers(config);
        Ok(Self {
            engine,
            suppression,
        })
    }

    pub fn suppression(&self) -> &SuppressionPolicy {
        &self.suppression
    }

    /// Analyze one unit. A unit whose file path the suppression policy
    /// matches yields an empty outcome without running any classifier.
    /// Findings come back sorted by position then rule id, so repeated
    /// runs over the same inputs produce the identical list.
    pub fn run(&self, tree: &SyntaxTree, oracle: &dyn SemanticOracle) -> AnalysisOutcome {
        self.run_with_cancel(tree, oracle, &CancelFlag::new())
    }

    pub fn run_with_cancel(
        &self,
        tree: &SyntaxTree,
        oracle: &dyn SemanticOracle,
        cancel: &CancelFlag,
    ) -> AnalysisOutcome {
        if self.suppression.is_ignored_file(tree.file_path()) {
            return AnalysisOutcome::default();
        }
        let mut outcome = self.engine.run_with_cancel(tree, oracle, cancel);
        outcome
            .findings
            .sort_by(|a, b| a.span.cmp(&b.span).then(a.rule_id.cmp(b.rule_id)));
        outcome
    }
}
