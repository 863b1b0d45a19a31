// crates/core/src/strip.rs
//! # Span Reassembly
//!
//! Pure functions over a span sequence: rebuild the text without comments,
//! pull out only the comments, or tidy the result. Nothing here looks at the
//! scanner's internal state. Every function works on text spans and on byte
//! spans from [`crate::scanner::scan_bytes`] alike.
//!
//! ```rust
//! use comment_cleaner_core::language::Language;
//! use comment_cleaner_core::scanner::scan;
//! use comment_cleaner_core::strip::strip;
//! use comment_cleaner_core::StripOptions;
//!
//! let grammar = Language::C.grammar().unwrap();
//! let output = scan("int x = 1; // one\n", &grammar);
//! assert_eq!(strip(&output.spans, &StripOptions::default()), "int x = 1; \n");
//! ```

use alloc::vec::Vec;
use core::ops::Range;

use crate::config::StripOptions;
use crate::scanner::{ScanInput, Span, SpanKind};

/// 除去対象のコメントを残すかどうかの判定
///
/// Consulted for comments and docstrings only; code and string literals are
/// always kept.
pub trait CommentPolicy<T: ?Sized = str> {
    /// `true` keeps `comment` in the stripped output.
    fn keep(&self, comment: &Span<'_, T>) -> bool;
}

/// Keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripAll;

impl<T: ?Sized> CommentPolicy<T> for StripAll {
    fn keep(&self, _comment: &Span<'_, T>) -> bool {
        false
    }
}

impl<T: ?Sized + ScanInput> CommentPolicy<T> for StripOptions {
    fn keep(&self, comment: &Span<'_, T>) -> bool {
        let text = comment.text.as_raw();
        (self.keep_doc_comments && comment.kind.is_doc())
            || (self.keep_todo && mentions_todo(text))
            || (self.keep_shebang && is_shebang(comment.kind, comment.start.offset, text))
    }
}

fn is_shebang(kind: SpanKind, offset: usize, text: &[u8]) -> bool {
    offset == 0
        && matches!(kind, SpanKind::LineComment(_))
        && (text.starts_with(b"#!") || text.starts_with(b"# !"))
}

/// `TODO` / `FIXME` を大文字小文字を区別せずに検出
#[must_use]
pub fn mentions_todo(text: impl AsRef<[u8]>) -> bool {
    let text = text.as_ref();
    contains_ignore_ascii_case(text, b"todo") || contains_ignore_ascii_case(text, b"fixme")
}

fn contains_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

/// コメントを除去したテキストを再構築
#[must_use]
pub fn strip<T: ?Sized + ScanInput>(spans: &[Span<'_, T>], options: &StripOptions) -> T::Buf {
    strip_with(spans, options, &StripAll)
}

/// [`strip`], additionally keeping every comment `policy` retains.
///
/// A removed line comment leaves its line terminator behind. A removed block
/// comment or docstring leaves nothing, or its line breaks with
/// [`StripOptions::preserve_line_numbers`], or a single space when it sat
/// between two identifier characters (`a/**/b` → `a b`).
///
/// [`StripOptions::tidy`] never touches the inside of a string literal.
#[must_use]
pub fn strip_with<T: ?Sized + ScanInput>(
    spans: &[Span<'_, T>],
    options: &StripOptions,
    policy: &dyn CommentPolicy<T>,
) -> T::Buf {
    let mut out = T::Buf::default();
    // 出力中の文字列リテラルの範囲
    let mut literals: Vec<Range<usize>> = Vec::new();

    for (i, span) in spans.iter().enumerate() {
        if !span.kind.is_removable() || options.keep(span) || policy.keep(span) {
            if span.kind.is_string() {
                let start = T::view(&out).as_raw().len();
                literals.push(start..start + span.len());
            }
            T::push(&mut out, span.text);
            continue;
        }

        let text = span.text.as_raw();
        if let SpanKind::LineComment(_) = span.kind {
            T::push_ascii(&mut out, line_terminator(text));
        } else if options.preserve_line_numbers && text.contains(&b'\n') {
            push_line_breaks::<T>(&mut out, text);
        } else if needs_separator(T::view(&out).as_raw(), spans.get(i + 1)) {
            T::push_ascii(&mut out, " ");
        }
    }

    if options.tidy {
        tidy_around(T::view(&out), &literals, !options.preserve_line_numbers)
    } else {
        out
    }
}

/// コメントスパンのみを抽出
#[must_use]
pub fn extract<'a, T: ?Sized>(spans: &[Span<'a, T>]) -> Vec<Span<'a, T>> {
    spans
        .iter()
        .filter(|span| span.kind.is_comment())
        .copied()
        .collect()
}

/// 行末の空白を除去し、`collapse_blank_lines` なら連続する空行を1行にまとめる
///
/// Only ASCII whitespace is trimmed.
#[must_use]
pub fn tidy<T: ?Sized + ScanInput>(text: &T, collapse_blank_lines: bool) -> T::Buf {
    tidy_around(text, &[], collapse_blank_lines)
}

/// `literals` (sorted, disjoint byte ranges of `text`) are copied verbatim:
/// a line is trimmed only up to the end of a literal on it, and a line that
/// a literal touches is never dropped as blank.
fn tidy_around<T: ?Sized + ScanInput>(
    text: &T,
    literals: &[Range<usize>],
    collapse_blank_lines: bool,
) -> T::Buf {
    let raw = text.as_raw();
    let mut out = T::Buf::default();
    let mut blank_run = 0usize;
    let mut next_literal = 0usize;
    let mut start = 0usize;

    while start < raw.len() {
        let end = raw[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(raw.len(), |newline| start + newline + 1);
        let body_end = end - line_terminator(&raw[start..end]).len();

        while literals
            .get(next_literal)
            .is_some_and(|literal| literal.end <= start)
        {
            next_literal += 1;
        }
        let on_line = literals[next_literal..]
            .iter()
            .take_while(|literal| literal.start < end);
        let touched = on_line.clone().next().is_some();
        let floor = on_line
            .map(|literal| literal.end.min(body_end))
            .fold(start, usize::max);
        let kept = (start + raw[start..body_end].trim_ascii_end().len()).max(floor);

        if kept == start && !touched {
            blank_run += 1;
            if collapse_blank_lines && blank_run > 1 {
                start = end;
                continue;
            }
        } else {
            blank_run = 0;
        }
        T::push(&mut out, text.slice(start..kept));
        T::push(&mut out, text.slice(body_end..end));
        start = end;
    }
    out
}

fn line_terminator(text: &[u8]) -> &'static str {
    if text.ends_with(b"\r\n") {
        "\r\n"
    } else if text.ends_with(b"\n") {
        "\n"
    } else {
        ""
    }
}

fn push_line_breaks<T: ?Sized + ScanInput>(out: &mut T::Buf, text: &[u8]) {
    for (idx, _) in text.iter().enumerate().filter(|&(_, &b)| b == b'\n') {
        if idx > 0 && text[idx - 1] == b'\r' {
            T::push_ascii(out, "\r\n");
        } else {
            T::push_ascii(out, "\n");
        }
    }
}

/// 非 ASCII バイトは識別子の一部とみなす
#[inline]
const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || !b.is_ascii()
}

fn needs_separator<T: ?Sized + ScanInput>(out: &[u8], next: Option<&Span<'_, T>>) -> bool {
    let before = out.last().copied();
    let after = next.and_then(|span| span.text.as_raw().first().copied());
    matches!((before, after), (Some(b), Some(a)) if is_ident_byte(b) && is_ident_byte(a))
}
