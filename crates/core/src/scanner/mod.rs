//! コメント/文字列リテラルのスパン分割
//!
//! [`scan`] partitions an input into [`Span`]s under one [`Grammar`]. The
//! partition is lossless: concatenating every span's text in order gives back
//! the input byte for byte. [`scan_bytes`] does the same for input that is not
//! known to be UTF-8.

pub(crate) mod input;
mod machine;
mod position;
mod span;
mod state;

pub use input::ScanInput;
pub use machine::Scanner;
pub use position::Position;
pub use span::{CommentFlavor, ScanWarning, Span, SpanKind, WarningKind};
pub use state::{Checkpoint, ScanState};

use alloc::vec::Vec;

use serde::Serialize;

use crate::language::Grammar;

/// 完了したスキャンの結果
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ScanOutput<'a, T: ?Sized = str> {
    pub spans: Vec<Span<'a, T>>,
    pub warnings: Vec<ScanWarning>,
}

impl<T: ?Sized> Default for ScanOutput<'_, T> {
    fn default() -> Self {
        Self {
            spans: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl<T: ?Sized> Clone for ScanOutput<'_, T> {
    fn clone(&self) -> Self {
        Self {
            spans: self.spans.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

impl<'a, T: ?Sized + ScanInput> ScanOutput<'a, T> {
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn comments(&self) -> impl Iterator<Item = &Span<'a, T>> {
        self.spans.iter().filter(|span| span.kind.is_comment())
    }

    /// Concatenates every span; always equal to the scanned input.
    #[must_use]
    pub fn reassemble(&self) -> T::Buf {
        let mut out = T::Buf::default();
        for span in &self.spans {
            T::push(&mut out, span.text);
        }
        out
    }
}

impl<'a, T: ?Sized> FromIterator<Span<'a, T>> for ScanOutput<'a, T> {
    fn from_iter<I: IntoIterator<Item = Span<'a, T>>>(iter: I) -> Self {
        let mut output = Self::default();
        for span in iter {
            if let Some(warning) = span.warning {
                output.warnings.push(warning);
            }
            output.spans.push(span);
        }
        output
    }
}

/// 入力全体をスキャンしてスパン列を返す
///
/// Never fails: a [`Grammar`] is validated when it is built, and unterminated
/// constructs are reported through [`ScanOutput::warnings`].
#[must_use]
pub fn scan<'a>(input: &'a str, grammar: &'a Grammar) -> ScanOutput<'a> {
    Scanner::new(input, grammar).collect()
}

/// バイト列をスキャン (UTF-8 でなくてもよい)
///
/// Bytes outside valid UTF-8 sequences never open or close a construct: in
/// code they are code, inside a comment or literal they belong to it. The
/// partition stays lossless.
#[must_use]
pub fn scan_bytes<'a>(input: &'a [u8], grammar: &'a Grammar) -> ScanOutput<'a, [u8]> {
    Scanner::new(input, grammar).collect()
}
