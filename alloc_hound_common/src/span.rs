// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use serde::{Deserialize, Serialize};

/// Half-open byte range into a single source unit.
///
/// Spans are plain value data: the tree hands them out, findings carry
/// them, and `SourceText` turns them back into line/column coordinates
/// for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub lo: u32,
    pub hi: u32,
}

impl SourceSpan {
    pub fn new(lo: u32, hi: u32) -> Self {
        debug_assert!(lo <= hi, "span lo must not exceed hi");
        Self { lo, hi }
    }

    pub fn len(&self) -> u32 {
        self.hi - self.lo
    }

    pub fn is_empty(&self) -> bool {
        self.lo == self.hi
    }

    /// True when `other` lies entirely inside this span.
    pub fn contains(&self, other: SourceSpan) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }
}

/// One-based line/column position, the form reports print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

/// The text of one analyzed source unit, with offset-to-line resolution.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    line_starts: Vec<u32>,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0u32];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self { text, line_starts }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Resolve a byte offset to a one-based line/column pair. Offsets past
    /// the end of the text clamp to the final position.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let offset = offset.min(self.text.len() as u32);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        LineCol {
            line: line_idx as u32 + 1,
            column: offset - self.line_starts[line_idx] + 1,
        }
    }

    /// The source snippet covered by `span`, clamped to the text bounds.
    pub fn snippet(&self, span: SourceSpan) -> &str {
        let lo = (span.lo as usize).min(self.text.len());
        let hi = (span.hi as usize).min(self.text.len());
        &self.text[lo..hi]
    }

    /// The full line of text containing `offset`, without its newline.
    pub fn line_text(&self, offset: u32) -> &str {
        let lc = self.line_col(offset);
        let start = self.line_starts[lc.line as usize - 1] as usize;
        let end = self
            .line_starts
            .get(lc.line as usize)
            .map(|s| *s as usize)
            .unwrap_or(self.text.len());
        self.text[start..end].trim_end_matches(['\n', '\r'])
    }
}
