// crates/core/src/scanner/machine.rs
//! # Span Scanner
//!
//! Single left-to-right pass over the input, one state transition per
//! consumed character or delimiter. No backtracking.
//!
//! | State | Leaves on |
//! |-------|-----------|
//! | `Code` | longest opener (quote, fence, line comment, block comment) |
//! | `LineComment` | `\n` (included in the span) or end of input |
//! | `BlockComment` | this delimiter's closer at depth 1 |
//! | `String` | escape char (→ `StringEscape`) or its own quote |
//! | `StringEscape` | any single character (→ `String`) |
//! | `Fence` | escape char (→ `FenceEscape`) or its own delimiter |
//! | `FenceEscape` | any single character (→ `Fence`) |
//!
//! Openers are consumed lazily: when one is found after pending code, the
//! code span is emitted first and the opener is matched again on the next
//! call. Between two calls to `next` the open span therefore always starts at
//! the cursor, unless the scan was paused mid-span.
//!
//! The machine reads raw bytes. Valid UTF-8 advances one character at a time;
//! any other byte is consumed alone and never matches a delimiter.

use log::debug;

use super::input::{ScanInput, next_unit};
use super::position::Position;
use super::span::{ScanWarning, Span};
use super::state::{Checkpoint, ScanState};
use crate::error::{ConfigError, Result};
use crate::language::grammar::{Grammar, Opener};

/// 遅延評価のスパン列 (`Iterator<Item = Span>`)
///
/// Cloning a scanner forks the scan; a fresh [`Scanner::new`] restarts it.
#[derive(Debug)]
pub struct Scanner<'a, T: ?Sized + ScanInput = str> {
    input: &'a T,
    grammar: &'a Grammar,
    state: ScanState,
    span_start: Position,
    cursor: Position,
    pause_at: Option<usize>,
}

impl<T: ?Sized + ScanInput> Clone for Scanner<'_, T> {
    fn clone(&self) -> Self {
        Self {
            input: self.input,
            grammar: self.grammar,
            state: self.state,
            span_start: self.span_start,
            cursor: self.cursor,
            pause_at: self.pause_at,
        }
    }
}

impl<'a, T: ?Sized + ScanInput> Scanner<'a, T> {
    #[must_use]
    pub const fn new(input: &'a T, grammar: &'a Grammar) -> Self {
        Self {
            input,
            grammar,
            state: ScanState::Code,
            span_start: Position::START,
            cursor: Position::START,
            pause_at: None,
        }
    }

    /// Continues a scan of `input` from a [`Checkpoint`] taken on the same input.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCheckpoint`] when the checkpoint offsets fall
    /// outside `input` or off a character boundary, or when its state refers to
    /// a block delimiter or fence `grammar` does not declare.
    pub fn resume(input: &'a T, grammar: &'a Grammar, checkpoint: Checkpoint) -> Result<Self> {
        let invalid = |reason: &'static str| ConfigError::InvalidCheckpoint {
            offset: checkpoint.cursor.offset,
            reason,
        };
        let Checkpoint {
            state,
            span_start,
            cursor,
        } = checkpoint;

        if cursor.offset > input.as_raw().len() {
            return Err(invalid("cursor past end of input"));
        }
        if span_start.offset > cursor.offset {
            return Err(invalid("span start after cursor"));
        }
        if !input.is_boundary(cursor.offset) || !input.is_boundary(span_start.offset) {
            return Err(invalid("not on a character boundary"));
        }
        match state {
            ScanState::BlockComment {
                delimiter, depth, ..
            } => {
                if grammar.block(delimiter).is_none() {
                    return Err(invalid("unknown block delimiter"));
                }
                if depth == 0 {
                    return Err(invalid("block comment depth is zero"));
                }
            }
            ScanState::Fence { fence, .. } | ScanState::FenceEscape { fence, .. } => {
                if grammar.fence(fence).is_none() {
                    return Err(invalid("unknown string fence"));
                }
            }
            _ => {}
        }

        Ok(Self {
            input,
            grammar,
            state,
            span_start,
            cursor,
            pause_at: None,
        })
    }

    /// Stops iteration once the cursor reaches `offset`, leaving the open span
    /// unfinished so [`Scanner::checkpoint`] can capture it. `None` scans to the end.
    #[must_use]
    pub const fn pause_at(mut self, offset: Option<usize>) -> Self {
        self.pause_at = offset;
        self
    }

    #[must_use]
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            state: self.state,
            span_start: self.span_start,
            cursor: self.cursor,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// `true` once the whole input has been consumed and emitted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.span_start.offset == self.input.as_raw().len()
    }

    fn stop_offset(&self) -> usize {
        let len = self.input.as_raw().len();
        self.pause_at.map_or(len, |offset| offset.min(len))
    }

    fn step(&mut self) -> Option<Span<'a, T>> {
        let grammar = self.grammar;
        let input = self.input;
        let rest = &input.as_raw()[self.cursor.offset..];

        match self.state {
            ScanState::Code => self.step_code(rest),
            ScanState::LineComment { .. } => {
                if let Some(newline) = rest.iter().position(|&b| b == b'\n') {
                    self.cursor.advance_bytes(&rest[..=newline]);
                    return Some(self.close_span());
                }
                self.cursor.advance_bytes(rest);
                None
            }
            ScanState::BlockComment {
                delimiter,
                depth,
                doc,
            } => {
                let block = &grammar.block_comments()[delimiter];
                if rest.starts_with(block.close().as_bytes()) {
                    self.cursor.advance_bytes(block.close().as_bytes());
                    if depth > 1 {
                        self.state = ScanState::BlockComment {
                            delimiter,
                            depth: depth - 1,
                            doc,
                        };
                        return None;
                    }
                    return Some(self.close_span());
                }
                if block.nests() && rest.starts_with(block.open().as_bytes()) {
                    self.cursor.advance_bytes(block.open().as_bytes());
                    self.state = ScanState::BlockComment {
                        delimiter,
                        depth: depth + 1,
                        doc,
                    };
                    return None;
                }
                self.bump(rest);
                None
            }
            ScanState::String { quote } => {
                let (unit, width) = next_unit(rest)?;
                self.cursor.advance_unit(unit, width);
                if unit.is_some() && unit == grammar.escape() {
                    self.state = ScanState::StringEscape { quote };
                } else if unit == Some(quote) {
                    return Some(self.close_span());
                }
                None
            }
            ScanState::StringEscape { quote } => {
                // エスケープ直後の1文字は無条件に消費 (`\"`, `\\`)
                self.bump(rest);
                self.state = ScanState::String { quote };
                None
            }
            ScanState::Fence { fence, doc } => {
                let delimiter = grammar.fences()[fence].delimiter().as_bytes();
                if rest.starts_with(delimiter) {
                    self.cursor.advance_bytes(delimiter);
                    let after = &rest[delimiter.len()..];
                    self.state = ScanState::Fence {
                        fence,
                        doc: doc && self.ends_statement(after),
                    };
                    return Some(self.close_span());
                }
                let (unit, width) = next_unit(rest)?;
                self.cursor.advance_unit(unit, width);
                if unit.is_some() && unit == grammar.escape() {
                    self.state = ScanState::FenceEscape { fence, doc };
                }
                None
            }
            ScanState::FenceEscape { fence, doc } => {
                self.bump(rest);
                self.state = ScanState::Fence { fence, doc };
                None
            }
        }
    }

    fn step_code(&mut self, rest: &[u8]) -> Option<Span<'a, T>> {
        let grammar = self.grammar;
        let Some((opener, len)) = grammar.match_opener(rest) else {
            self.bump(rest);
            return None;
        };
        if let Opener::Quote(quote) = opener {
            if !grammar.opens_quote(quote, rest, self.previous_byte()) {
                self.bump(rest);
                return None;
            }
        }

        if self.cursor.offset > self.span_start.offset {
            return Some(self.close_span());
        }

        self.state = match opener {
            Opener::Quote(quote) => ScanState::String { quote },
            Opener::Fence(fence) => ScanState::Fence {
                fence,
                doc: grammar.fences()[fence].is_doc() && self.starts_statement(),
            },
            Opener::Line => ScanState::LineComment {
                doc: grammar.is_doc_line(rest),
            },
            Opener::Block(delimiter) => ScanState::BlockComment {
                delimiter,
                depth: 1,
                doc: grammar.is_doc_block(rest, &grammar.block_comments()[delimiter]),
            },
        };
        self.cursor.advance_bytes(&rest[..len]);
        None
    }

    fn previous_byte(&self) -> Option<u8> {
        self.input.as_raw()[..self.cursor.offset].last().copied()
    }

    /// Only blanks precede the cursor on its line.
    fn starts_statement(&self) -> bool {
        let before = &self.input.as_raw()[..self.cursor.offset];
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |newline| newline + 1);
        before[line_start..].iter().all(|&b| b == b' ' || b == b'\t')
    }

    /// Only blanks, optionally followed by a line comment, remain on the line.
    fn ends_statement(&self, after: &[u8]) -> bool {
        let line = after
            .iter()
            .position(|&b| b == b'\n')
            .map_or(after, |newline| &after[..newline]);
        let line = line.trim_ascii_start();
        line.is_empty()
            || matches!(self.grammar.match_opener(line), Some((Opener::Line, _)))
    }

    #[inline]
    fn bump(&mut self, rest: &[u8]) {
        if let Some((unit, width)) = next_unit(rest) {
            self.cursor.advance_unit(unit, width);
        }
    }

    fn close_span(&mut self) -> Span<'a, T> {
        let input = self.input;
        let span = Span {
            kind: self.state.span_kind(),
            start: self.span_start,
            end: self.cursor,
            text: input.slice(self.span_start.offset..self.cursor.offset),
            warning: None,
        };
        self.span_start = self.cursor;
        self.state = ScanState::Code;
        span
    }

    fn finish(&mut self) -> Option<Span<'a, T>> {
        if self.span_start.offset == self.cursor.offset {
            return None;
        }
        let warning = self.state.unterminated().map(|kind| {
            debug!(
                "{kind} at {} in {} input",
                self.span_start,
                self.grammar.name()
            );
            ScanWarning {
                kind,
                position: self.span_start,
            }
        });
        // 閉じられなかったフェンスは docstring と判定しない
        if let ScanState::Fence { fence, .. } | ScanState::FenceEscape { fence, .. } = self.state {
            self.state = ScanState::Fence { fence, doc: false };
        }
        let mut span = self.close_span();
        span.warning = warning;
        Some(span)
    }
}

impl<'a, T: ?Sized + ScanInput> Iterator for Scanner<'a, T> {
    type Item = Span<'a, T>;

    fn next(&mut self) -> Option<Span<'a, T>> {
        while self.cursor.offset < self.stop_offset() {
            if let Some(span) = self.step() {
                return Some(span);
            }
        }
        if self.cursor.offset < self.input.as_raw().len() {
            // paused
            return None;
        }
        self.finish()
    }
}
