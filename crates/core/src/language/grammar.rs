// crates/core/src/language/grammar.rs
//! # Grammar Descriptor
//!
//! A language's comment and string delimiters as plain data.
//!
//! The scanner never hard-codes `//` or `/* */`; it asks the descriptor which
//! sequence (if any) opens a construct at the current offset. Construction goes
//! through [`GrammarBuilder`], which rejects tables the scanner could not
//! resolve by longest-match.
//!
//! ```rust
//! use comment_cleaner_core::language::GrammarBuilder;
//!
//! let grammar = GrammarBuilder::new("c")
//!     .line_comment("//")
//!     .block_comment("/*", "*/")
//!     .quote('"')
//!     .quote('\'')
//!     .escape('\\')
//!     .build()
//!     .unwrap();
//! assert_eq!(grammar.line_comments(), ["//"]);
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::error::{ConfigError, Result};
use crate::scanner::input::next_unit;

/// ブロックコメントの開始/終了デリミタ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDelimiter {
    open: String,
    close: String,
    nests: bool,
}

impl BlockDelimiter {
    /// Non-nesting pair (C family).
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            nests: false,
        }
    }

    /// Nesting pair (Rust, Haskell): an inner `open` must be closed before the outer one.
    #[must_use]
    pub fn nesting(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            nests: true,
            ..Self::new(open, close)
        }
    }

    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }

    #[must_use]
    pub const fn nests(&self) -> bool {
        self.nests
    }
}

/// 複数文字で開閉する文字列 (`"""..."""`)
///
/// A docstring fence marks literals that stand alone on their line as
/// documentation, the way Python treats `"""` at the start of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringFence {
    delimiter: String,
    doc: bool,
}

impl StringFence {
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    #[must_use]
    pub const fn is_doc(&self) -> bool {
        self.doc
    }
}

/// Which construct an opening sequence starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Opener {
    Quote(char),
    Fence(usize),
    Line,
    Block(usize),
}

/// `'\u{10FFFF}'` まで収まる幅
const CHAR_LITERAL_WINDOW: usize = 12;

#[derive(Debug, Clone)]
struct OpenerEntry {
    text: String,
    opener: Opener,
}

/// 言語ごとの字句規則 (不変)
///
/// 1つのインスタンスを複数スレッドのスキャンで共有できる (`Send + Sync`)。
#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    line_comments: Vec<String>,
    block_comments: Vec<BlockDelimiter>,
    quotes: Vec<char>,
    char_quotes: Vec<char>,
    fences: Vec<StringFence>,
    escape: Option<char>,
    doc_line_markers: Vec<String>,
    doc_block_markers: Vec<String>,
    /// Longest sequence first; ties keep declaration order (quotes, fences, line, block).
    openers: Vec<OpenerEntry>,
    first_bytes: HashSet<u8>,
}

impl Grammar {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> GrammarBuilder {
        GrammarBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn line_comments(&self) -> &[String] {
        &self.line_comments
    }

    #[must_use]
    pub fn block_comments(&self) -> &[BlockDelimiter] {
        &self.block_comments
    }

    #[must_use]
    pub fn quotes(&self) -> &[char] {
        &self.quotes
    }

    /// Quotes that open only a complete one-character literal (`'x'`, `'\n'`).
    #[must_use]
    pub fn char_quotes(&self) -> &[char] {
        &self.char_quotes
    }

    #[must_use]
    pub fn fences(&self) -> &[StringFence] {
        &self.fences
    }

    #[must_use]
    pub const fn escape(&self) -> Option<char> {
        self.escape
    }

    pub(crate) fn block(&self, index: usize) -> Option<&BlockDelimiter> {
        self.block_comments.get(index)
    }

    pub(crate) fn fence(&self, index: usize) -> Option<&StringFence> {
        self.fences.get(index)
    }

    /// `rest` の先頭で始まる最長の開始デリミタを返す
    ///
    /// Returns the opener and its byte length.
    pub(crate) fn match_opener(&self, rest: &[u8]) -> Option<(Opener, usize)> {
        let first = rest.first()?;
        if !self.first_bytes.contains(first) {
            return None;
        }
        self.openers
            .iter()
            .find(|entry| rest.starts_with(entry.text.as_bytes()))
            .map(|entry| (entry.opener, entry.text.len()))
    }

    /// Does `quote` at the start of `rest` open a literal here?
    ///
    /// Plain quotes always do. A char quote opens only a literal that closes
    /// after one character or one escape sequence, and never right after a
    /// digit, so lifetimes (`'a`) and digit separators (`1'000`) stay code.
    pub(crate) fn opens_quote(&self, quote: char, rest: &[u8], before: Option<u8>) -> bool {
        if !self.char_quotes.contains(&quote) {
            return true;
        }
        if before.is_some_and(|b| b.is_ascii_digit()) {
            return false;
        }
        let mut buf = [0u8; 4];
        let quote = quote.encode_utf8(&mut buf).as_bytes();
        let Some(body) = rest.get(quote.len()..) else {
            return false;
        };
        let Some((first, width)) = next_unit(body) else {
            return false;
        };
        let tail = &body[width..];

        if first.is_some() && first == self.escape {
            let window = &tail[..tail.len().min(CHAR_LITERAL_WINDOW)];
            let window = window
                .iter()
                .position(|&b| b == b'\n')
                .map_or(window, |newline| &window[..newline]);
            // エスケープ直後の1文字は閉じクォートになれない
            return (1..window.len()).any(|i| window[i..].starts_with(quote));
        }
        if body.starts_with(quote) || first == Some('\n') {
            return false;
        }
        tail.starts_with(quote)
    }

    /// `rest` starts with a line comment opener; is it a documentation comment?
    pub(crate) fn is_doc_line(&self, rest: &[u8]) -> bool {
        self.doc_line_markers
            .iter()
            .any(|marker| starts_with_doc_marker(rest, marker))
    }

    /// `rest` starts with `block.open()`; is it a documentation comment?
    pub(crate) fn is_doc_block(&self, rest: &[u8], block: &BlockDelimiter) -> bool {
        // `/**/` is an empty comment, not a doc comment
        if rest
            .get(block.open.len()..)
            .is_some_and(|after| after.starts_with(block.close.as_bytes()))
        {
            return false;
        }
        self.doc_block_markers
            .iter()
            .filter(|marker| marker.starts_with(block.open.as_str()))
            .any(|marker| starts_with_doc_marker(rest, marker))
    }
}

/// `///` は doc、`////` は通常コメント (マーカー末尾の文字が続く場合は除外)
fn starts_with_doc_marker(rest: &[u8], marker: &str) -> bool {
    let Some(after) = rest.strip_prefix(marker.as_bytes()) else {
        return false;
    };
    let mut buf = [0u8; 4];
    marker
        .chars()
        .last()
        .is_some_and(|last| !after.starts_with(last.encode_utf8(&mut buf).as_bytes()))
}

/// [`Grammar`] の構築と検証
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    name: String,
    line_comments: Vec<String>,
    block_comments: Vec<BlockDelimiter>,
    quotes: Vec<char>,
    char_quotes: Vec<char>,
    fences: Vec<StringFence>,
    escape: Option<char>,
    doc_line_markers: Vec<String>,
    doc_block_markers: Vec<String>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn line_comment(mut self, start: impl Into<String>) -> Self {
        self.line_comments.push(start.into());
        self
    }

    #[must_use]
    pub fn block_comment(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.block_comments.push(BlockDelimiter::new(open, close));
        self
    }

    #[must_use]
    pub fn nesting_block_comment(
        mut self,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        self.block_comments.push(BlockDelimiter::nesting(open, close));
        self
    }

    #[must_use]
    pub fn quote(mut self, quote: char) -> Self {
        self.quotes.push(quote);
        self
    }

    /// A quote that delimits one-character literals only (C `'x'`, Rust `'\n'`).
    #[must_use]
    pub fn char_quote(mut self, quote: char) -> Self {
        self.quotes.push(quote);
        self.char_quotes.push(quote);
        self
    }

    /// Multi-character string delimiter that closes with the same sequence.
    #[must_use]
    pub fn string_fence(mut self, delimiter: impl Into<String>) -> Self {
        self.fences.push(StringFence {
            delimiter: delimiter.into(),
            doc: false,
        });
        self
    }

    /// Like [`GrammarBuilder::string_fence`], but a literal standing alone on
    /// its line is classified as a docstring.
    #[must_use]
    pub fn docstring_fence(mut self, delimiter: impl Into<String>) -> Self {
        self.fences.push(StringFence {
            delimiter: delimiter.into(),
            doc: true,
        });
        self
    }

    #[must_use]
    pub const fn escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    #[must_use]
    pub fn doc_line_marker(mut self, marker: impl Into<String>) -> Self {
        self.doc_line_markers.push(marker.into());
        self
    }

    #[must_use]
    pub fn doc_block_marker(mut self, marker: impl Into<String>) -> Self {
        self.doc_block_markers.push(marker.into());
        self
    }

    /// Validates the table and freezes it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a delimiter is empty, two openers are
    /// identical, the escape character is also a quote, or no comment syntax
    /// is declared at all.
    pub fn build(self) -> Result<Grammar> {
        let name = self.name;

        if self.line_comments.is_empty() && self.block_comments.is_empty() {
            return Err(ConfigError::NoDelimiters { grammar: name });
        }

        let empty = |role: &'static str| ConfigError::EmptyDelimiter {
            grammar: name.clone(),
            role,
        };
        if self.line_comments.iter().any(String::is_empty) {
            return Err(empty("line comment"));
        }
        for block in &self.block_comments {
            if block.open.is_empty() {
                return Err(empty("block comment open"));
            }
            if block.close.is_empty() {
                return Err(empty("block comment close"));
            }
        }
        if self.fences.iter().any(|fence| fence.delimiter.is_empty()) {
            return Err(empty("string fence"));
        }
        if self
            .doc_line_markers
            .iter()
            .chain(&self.doc_block_markers)
            .any(String::is_empty)
        {
            return Err(empty("doc marker"));
        }

        if let Some(escape) = self.escape {
            if self.quotes.contains(&escape)
                || self
                    .fences
                    .iter()
                    .any(|fence| fence.delimiter.starts_with(escape))
            {
                return Err(ConfigError::EscapeIsQuote {
                    grammar: name,
                    escape,
                });
            }
        }

        let mut openers: Vec<(OpenerEntry, &'static str)> = Vec::new();
        openers.extend(self.quotes.iter().map(|&q| {
            let entry = OpenerEntry {
                text: q.to_string(),
                opener: Opener::Quote(q),
            };
            (entry, "quote")
        }));
        openers.extend(self.fences.iter().enumerate().map(|(i, fence)| {
            let entry = OpenerEntry {
                text: fence.delimiter.clone(),
                opener: Opener::Fence(i),
            };
            (entry, "string fence")
        }));
        openers.extend(self.line_comments.iter().map(|start| {
            let entry = OpenerEntry {
                text: start.clone(),
                opener: Opener::Line,
            };
            (entry, "line comment")
        }));
        openers.extend(self.block_comments.iter().enumerate().map(|(i, block)| {
            let entry = OpenerEntry {
                text: block.open.clone(),
                opener: Opener::Block(i),
            };
            (entry, "block comment")
        }));

        for (i, (a, first)) in openers.iter().enumerate() {
            if let Some((_, second)) = openers[i + 1..].iter().find(|(b, _)| b.text == a.text) {
                return Err(ConfigError::DuplicateOpener {
                    grammar: name,
                    sequence: a.text.clone(),
                    first: *first,
                    second: *second,
                });
            }
        }

        let mut openers: Vec<OpenerEntry> = openers.into_iter().map(|(entry, _)| entry).collect();
        // stable: 同じ長さなら宣言順を維持
        openers.sort_by(|a, b| b.text.len().cmp(&a.text.len()));
        let first_bytes = openers
            .iter()
            .filter_map(|entry| entry.text.bytes().next())
            .collect();

        Ok(Grammar {
            name,
            line_comments: self.line_comments,
            block_comments: self.block_comments,
            quotes: self.quotes,
            char_quotes: self.char_quotes,
            fences: self.fences,
            escape: self.escape,
            doc_line_markers: self.doc_line_markers,
            doc_block_markers: self.doc_block_markers,
            openers,
            first_bytes,
        })
    }
}
