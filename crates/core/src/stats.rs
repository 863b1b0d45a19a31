use core::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::scanner::{ScanInput, Span, SpanKind};

/// Counts over one span sequence, independent of where the text came from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Number of spans.
    pub spans: usize,
    /// Bytes in code spans.
    pub code_bytes: usize,
    /// Bytes in comment spans, delimiters included.
    pub comment_bytes: usize,
    /// Bytes in string literal and docstring spans, quotes included.
    pub string_bytes: usize,
    pub line_comments: usize,
    pub block_comments: usize,
    /// Line or block comments opened with a doc marker.
    pub doc_comments: usize,
    /// String literals, docstrings included.
    pub string_literals: usize,
    pub docstrings: usize,
    /// Distinct lines touched by at least one comment.
    pub comment_lines: usize,
    /// Constructs still open at end of input.
    pub unterminated: usize,
}

impl ScanStats {
    #[must_use]
    pub fn from_spans<T: ?Sized + ScanInput>(spans: &[Span<'_, T>]) -> Self {
        let mut stats = Self::default();
        // 直前に数えたコメント行 (1始まり、0は未カウント)
        let mut last_counted = 0usize;

        for span in spans {
            stats.spans += 1;
            if span.is_unterminated() {
                stats.unterminated += 1;
            }
            match span.kind {
                SpanKind::Code => stats.code_bytes += span.len(),
                SpanKind::StringLiteral | SpanKind::DocString => {
                    stats.string_bytes += span.len();
                    stats.string_literals += 1;
                    if span.kind == SpanKind::DocString {
                        stats.docstrings += 1;
                    }
                }
                SpanKind::LineComment(_) | SpanKind::BlockComment(_) => {
                    stats.comment_bytes += span.len();
                    if matches!(span.kind, SpanKind::LineComment(_)) {
                        stats.line_comments += 1;
                    } else {
                        stats.block_comments += 1;
                    }
                    if span.kind.is_doc() {
                        stats.doc_comments += 1;
                    }

                    // 行コメントは末尾の改行を含むため、終端行は1つ前
                    let last_line = if span.text.as_raw().ends_with(b"\n") {
                        span.end.line - 1
                    } else {
                        span.end.line
                    };
                    let first_line = span.start.line.max(last_counted + 1);
                    if last_line >= first_line {
                        stats.comment_lines += last_line - first_line + 1;
                        last_counted = last_line;
                    }
                }
            }
        }
        stats
    }

    #[must_use]
    pub const fn comments(&self) -> usize {
        self.line_comments + self.block_comments
    }

    #[must_use]
    pub const fn total_bytes(&self) -> usize {
        self.code_bytes + self.comment_bytes + self.string_bytes
    }

    /// Share of bytes spent on comments, `0.0` for empty input.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn comment_ratio(&self) -> f64 {
        match self.total_bytes() {
            0 => 0.0,
            total => self.comment_bytes as f64 / total as f64,
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.spans += other.spans;
        self.code_bytes += other.code_bytes;
        self.comment_bytes += other.comment_bytes;
        self.string_bytes += other.string_bytes;
        self.line_comments += other.line_comments;
        self.block_comments += other.block_comments;
        self.doc_comments += other.doc_comments;
        self.string_literals += other.string_literals;
        self.docstrings += other.docstrings;
        self.comment_lines += other.comment_lines;
        self.unterminated += other.unterminated;
    }
}

impl AddAssign<&Self> for ScanStats {
    fn add_assign(&mut self, rhs: &Self) {
        self.merge(rhs);
    }
}

impl<'s> FromIterator<&'s ScanStats> for ScanStats {
    fn from_iter<I: IntoIterator<Item = &'s ScanStats>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut acc, stats| {
            acc.merge(stats);
            acc
        })
    }
}
