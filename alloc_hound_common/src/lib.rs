// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod finding;
pub mod report;
pub mod span;

pub use finding::{Finding, Rule, Severity};
pub use span::{SourceSpan, SourceText};
