// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use anyhow::Context;
use ron::ser::{PrettyConfig, to_writer_pretty};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Revision of the audited language accepted by the host compiler.
///
/// The only behavioral difference the engine cares about: the modern
/// revision compiles a `static` local function referenced by name without
/// allocating a delegate, the classic one does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LanguageRevision {
    Classic,
    #[default]
    Modern,
}

impl LanguageRevision {
    pub fn static_local_functions_are_allocation_free(&self) -> bool {
        matches!(self, LanguageRevision::Modern)
    }
}

/// An attribute that marks a symbol as outside the audit, identified by
/// containing namespace and attribute type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoredAttribute {
    pub namespace: String,
    pub name: String,
}

impl IgnoredAttribute {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

/// Process-wide analyzer configuration. Constructed once before analysis
/// begins and passed by reference into every classifier invocation; never
/// mutated during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// String-concatenation count beyond which a chain is flagged.
    /// Carried over from observed behavior; nothing mandates exactly 3.
    #[serde(default = "default_concat_threshold")]
    pub concat_threshold: usize,
    #[serde(default)]
    pub language_revision: LanguageRevision,
    /// Regex patterns for generated-file paths to skip entirely.
    #[serde(default = "default_ignored_file_patterns")]
    pub ignored_file_patterns: Vec<String>,
    /// Attributes whose carriers the host filters out before analysis.
    #[serde(default = "default_ignored_attributes")]
    pub ignored_attributes: Vec<IgnoredAttribute>,
}

fn default_concat_threshold() -> usize {
    3
}

fn default_ignored_file_patterns() -> Vec<String> {
    vec![r"\.g\.cs$".to_string(), r"\.generated\.cs$".to_string()]
}

fn default_ignored_attributes() -> Vec<IgnoredAttribute> {
    vec![
        IgnoredAttribute::new("System.Runtime.CompilerServices", "CompilerGeneratedAttribute"),
        IgnoredAttribute::new("System.CodeDom.Compiler", "GeneratedCodeAttribute"),
    ]
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            concat_threshold: default_concat_threshold(),
            language_revision: LanguageRevision::default(),
            ignored_file_patterns: default_ignored_file_patterns(),
            ignored_attributes: default_ignored_attributes(),
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concat_threshold(mut self, threshold: usize) -> Self {
        self.concat_threshold = threshold;
        self
    }

    pub fn with_language_revision(mut self, revision: LanguageRevision) -> Self {
        self.language_revision = revision;
        self
    }

    pub fn with_ignored_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ignored_file_patterns.push(pattern.into());
        self
    }

    pub fn with_ignored_attribute(mut self, attribute: IgnoredAttribute) -> Self {
        self.ignored_attributes.push(attribute);
        self
    }

    // Method to write the config to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("failed creating {}", path.as_ref().display()))?;
        to_writer_pretty(file, self, PrettyConfig::default())
            .context("failed serializing analyzer config")?;
        Ok(())
    }

    // Method to read the config from a file
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("failed opening {}", path.as_ref().display()))?;
        let config = ron::de::from_reader(file).context("failed parsing analyzer config")?;
        Ok(config)
    }
}
