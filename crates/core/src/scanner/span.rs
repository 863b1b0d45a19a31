// crates/core/src/scanner/span.rs
//! スパン: 分類済みの連続した入力範囲

use core::fmt;

use serde::{Deserialize, Serialize};

use super::position::Position;

/// コメントの種類 (通常 / ドキュメント)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentFlavor {
    Regular,
    Doc,
}

impl CommentFlavor {
    #[must_use]
    pub const fn from_doc(doc: bool) -> Self {
        if doc { Self::Doc } else { Self::Regular }
    }
}

/// スパンの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Code,
    LineComment(CommentFlavor),
    BlockComment(CommentFlavor),
    StringLiteral,
    /// A fenced string standing alone on its line (Python `"""doc"""`).
    DocString,
}

impl SpanKind {
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment(_) | Self::BlockComment(_))
    }

    #[must_use]
    pub const fn is_doc(self) -> bool {
        matches!(
            self,
            Self::LineComment(CommentFlavor::Doc)
                | Self::BlockComment(CommentFlavor::Doc)
                | Self::DocString
        )
    }

    #[must_use]
    pub const fn is_code(self) -> bool {
        matches!(self, Self::Code)
    }

    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::StringLiteral | Self::DocString)
    }

    /// Comments and docstrings; everything stripping may remove.
    #[must_use]
    pub const fn is_removable(self) -> bool {
        self.is_comment() || matches!(self, Self::DocString)
    }
}

/// 未終端の構文
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    UnterminatedBlockComment,
    UnterminatedStringLiteral,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedBlockComment => f.write_str("unterminated block comment"),
            Self::UnterminatedStringLiteral => f.write_str("unterminated string literal"),
        }
    }
}

/// A recoverable problem found while scanning; `position` is where the
/// unterminated construct began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanWarning {
    pub kind: WarningKind,
    pub position: Position,
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} starting at {}", self.kind, self.position)
    }
}

/// 入力の一区間
///
/// `text` は常に `&input[start.offset..end.offset]` と一致し、長さ0のスパンは生成されない。
/// `T` is `str` for [`crate::scanner::scan`] and `[u8]` for
/// [`crate::scanner::scan_bytes`].
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Span<'a, T: ?Sized = str> {
    pub kind: SpanKind,
    pub start: Position,
    pub end: Position,
    pub text: &'a T,
    /// Set only on the final span of an input that ended inside a block comment or string.
    pub warning: Option<ScanWarning>,
}

impl<T: ?Sized> Clone for Span<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Span<'_, T> {}

impl<T: ?Sized> Span<'_, T> {
    /// Byte length.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of line breaks inside the span.
    #[must_use]
    pub fn newline_count(&self) -> usize {
        self.end.line - self.start.line
    }

    #[must_use]
    pub const fn is_unterminated(&self) -> bool {
        self.warning.is_some()
    }
}
