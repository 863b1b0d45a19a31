use serde::{Deserialize, Serialize};

/// コメント除去の挙動設定
///
/// Everything is off by default except [`StripOptions::keep_shebang`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripOptions {
    /// Replace a removed multi-line block comment with as many line breaks
    /// as it spanned, so line numbers of the remaining code do not move.
    pub preserve_line_numbers: bool,
    /// `/** */`, `///` などの doc コメントと docstring を残す
    pub keep_doc_comments: bool,
    /// Keep comments mentioning `TODO` or `FIXME` (case-insensitive).
    pub keep_todo: bool,
    /// 入力先頭の `#!` 行を残す (既定で有効)
    pub keep_shebang: bool,
    /// Trim trailing whitespace on every line and, unless line numbers are
    /// preserved, collapse runs of blank lines into one.
    pub tidy: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            preserve_line_numbers: false,
            keep_doc_comments: false,
            keep_todo: false,
            keep_shebang: true,
            tidy: false,
        }
    }
}
