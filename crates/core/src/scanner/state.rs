use serde::{Deserialize, Serialize};

use super::position::Position;
use super::span::{CommentFlavor, SpanKind, WarningKind};

/// スキャナの内部状態
///
/// Each variant carries only what it needs: the closing quote of the open
/// literal, the index of the open fence or block delimiter, and a block
/// comment's nesting depth. A fence's `doc` flag records that it opened at
/// the start of a line; it becomes a docstring only if nothing but a comment
/// follows the closing fence on that line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    #[default]
    Code,
    LineComment {
        doc: bool,
    },
    BlockComment {
        delimiter: usize,
        depth: usize,
        doc: bool,
    },
    String {
        quote: char,
    },
    StringEscape {
        quote: char,
    },
    Fence {
        fence: usize,
        doc: bool,
    },
    FenceEscape {
        fence: usize,
        doc: bool,
    },
}

impl ScanState {
    /// The kind of the span this state is building.
    #[must_use]
    pub const fn span_kind(self) -> SpanKind {
        match self {
            Self::Code => SpanKind::Code,
            Self::LineComment { doc } => SpanKind::LineComment(CommentFlavor::from_doc(doc)),
            Self::BlockComment { doc, .. } => SpanKind::BlockComment(CommentFlavor::from_doc(doc)),
            Self::Fence { doc: true, .. } | Self::FenceEscape { doc: true, .. } => {
                SpanKind::DocString
            }
            Self::String { .. }
            | Self::StringEscape { .. }
            | Self::Fence { .. }
            | Self::FenceEscape { .. } => SpanKind::StringLiteral,
        }
    }

    /// 入力終端でこの状態のままなら報告すべき警告
    #[must_use]
    pub const fn unterminated(self) -> Option<WarningKind> {
        match self {
            Self::BlockComment { .. } => Some(WarningKind::UnterminatedBlockComment),
            Self::String { .. }
            | Self::StringEscape { .. }
            | Self::Fence { .. }
            | Self::FenceEscape { .. } => Some(WarningKind::UnterminatedStringLiteral),
            Self::Code | Self::LineComment { .. } => None,
        }
    }
}

/// スキャンを中断・再開するためのスナップショット
///
/// `span_start` is where the still-open span began, `cursor` is where scanning
/// continues. Both index the same input buffer the scan was started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checkpoint {
    pub state: ScanState,
    pub span_start: Position,
    pub cursor: Position,
}
