// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::span::SourceSpan;
use serde::{Deserialize, Serialize};

/// Severity levels for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warning",
            Severity::Error => "error",
        }
    }
}

/// A catalogue entry for one allocation rule: stable identifier, human
/// title, message template and default severity.
///
/// Rules are process-wide immutable data, defined once in the engine's
/// catalogue. Message templates use `{0}`, `{1}`, ... placeholders that
/// are substituted from a finding's argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub id: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub severity: Severity,
}

impl Rule {
    /// Build a finding for this rule with no message arguments.
    pub fn finding(&self, span: SourceSpan) -> Finding {
        self.finding_with_args(span, Vec::new())
    }

    /// Build a finding for this rule, substituting `args` into the
    /// message template.
    pub fn finding_with_args(&self, span: SourceSpan, args: Vec<String>) -> Finding {
        let message = format_template(self.message, &args);
        Finding {
            rule_id: self.id,
            severity: self.severity,
            span,
            args,
            message,
        }
    }
}

fn format_template(template: &str, args: &[String]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

/// The engine's sole output unit: an immutable record tying a rule to a
/// source location. Findings reference a span, they do not own any part
/// of the tree that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Stable identifier of the rule that fired ('boxing', 'closure-capture', ...)
    pub rule_id: &'static str,
    pub severity: Severity,
    pub span: SourceSpan,
    /// Ordered substitution arguments that produced `message`
    pub args: Vec<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_RULE: Rule = Rule {
        id: "test-rule",
        title: "Test rule",
        message: "Value type ({0}) is boxed near {1}",
        severity: Severity::Warn,
    };

    #[test]
    fn finding_substitutes_template_args() {
        let f = TEST_RULE.finding_with_args(
            SourceSpan::new(3, 9),
            vec!["System.Int32".into(), "call site".into()],
        );
        assert_eq!(f.message, "Value type (System.Int32) is boxed near call site");
        assert_eq!(f.rule_id, "test-rule");
        assert_eq!(f.severity, Severity::Warn);
    }

    #[test]
    fn finding_without_args_keeps_template_verbatim() {
        let f = TEST_RULE.finding(SourceSpan::new(0, 1));
        assert_eq!(f.message, TEST_RULE.message);
        assert!(f.args.is_empty());
    }

    #[test]
    fn severity_orders_info_below_error() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }
}
