// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Suppression policy: the host-side filter applied *before* classifiers
//! run. The core never special-cases generated code itself; it is handed
//! trees the policy already admitted.

use alloc_hound_config::AnalyzerConfig;
use anyhow::Context;
use regex::Regex;

/// Compiled suppression rules: generated-file path patterns plus the
/// attribute table marking compiler-generated symbols.
#[derive(Debug)]
pub struct SuppressionPolicy {
    file_patterns: Vec<Regex>,
    ignored_attributes: Vec<(String, String)>,
}

impl SuppressionPolicy {
    /// Compile the policy from config. Invalid patterns fail here, at
    /// session construction, never mid-analysis.
    pub fn from_config(config: &AnalyzerConfig) -> anyhow::Result<Self> {
        let file_patterns = config
            .ignored_file_patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("invalid ignored-file pattern '{p}'")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let ignored_attributes = config
            .ignored_attributes
            .iter()
            .map(|a| (a.namespace.clone(), a.name.clone()))
            .collect();
        Ok(Self {
            file_patterns,
            ignored_attributes,
        })
    }

    /// True when the whole unit at `path` is outside the audit.
    pub fn is_ignored_file(&self, path: &str) -> bool {
        self.file_patterns.iter().any(|p| p.is_match(path))
    }

    /// True when a symbol carrying the attribute is outside the audit.
    pub fn is_ignored_attribute(&self, namespace: &str, name: &str) -> bool {
        self.ignored_attributes
            .iter()
            .any(|(ns, n)| ns == namespace && n == name)
    }
}
