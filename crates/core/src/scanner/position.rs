use core::fmt;

use serde::{Deserialize, Serialize};

use super::input::next_unit;

/// 入力中の位置
///
/// `offset` is a zero-based byte offset; `line` and `column` are 1-based and
/// columns count characters, not bytes. A byte that is not part of valid
/// UTF-8 counts as one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    #[inline]
    pub(crate) fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    #[inline]
    pub(crate) fn advance_unit(&mut self, unit: Option<char>, width: usize) {
        match unit {
            Some(ch) => self.advance(ch),
            None => {
                self.offset += width;
                self.column += 1;
            }
        }
    }

    pub(crate) fn advance_bytes(&mut self, bytes: &[u8]) {
        let mut rest = bytes;
        while let Some((unit, width)) = next_unit(rest) {
            self.advance_unit(unit, width);
            rest = &rest[width..];
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
