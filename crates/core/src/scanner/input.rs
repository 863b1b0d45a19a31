// crates/core/src/scanner/input.rs
//! スキャン対象の入力: UTF-8 テキストまたは任意のバイト列

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

/// Text the scanner can partition.
///
/// The scanner walks the raw bytes, so `str` and `[u8]` share one state
/// machine. For `[u8]`, bytes that do not form valid UTF-8 are consumed one
/// at a time as inert content of whatever span is open.
pub trait ScanInput {
    /// Owned buffer that reassembly and stripping write into.
    type Buf: Default;

    fn as_raw(&self) -> &[u8];

    /// Sub-slice between two offsets the scanner stopped at.
    fn slice(&self, range: Range<usize>) -> &Self;

    /// `offset` is a valid place to resume scanning.
    fn is_boundary(&self, offset: usize) -> bool;

    fn view(buf: &Self::Buf) -> &Self;

    fn push(buf: &mut Self::Buf, text: &Self);

    fn push_ascii(buf: &mut Self::Buf, text: &'static str);
}

impl ScanInput for str {
    type Buf = String;

    #[inline]
    fn as_raw(&self) -> &[u8] {
        self.as_bytes()
    }

    #[inline]
    fn slice(&self, range: Range<usize>) -> &Self {
        &self[range]
    }

    fn is_boundary(&self, offset: usize) -> bool {
        self.is_char_boundary(offset)
    }

    fn view(buf: &String) -> &Self {
        buf
    }

    fn push(buf: &mut String, text: &Self) {
        buf.push_str(text);
    }

    fn push_ascii(buf: &mut String, text: &'static str) {
        buf.push_str(text);
    }
}

impl ScanInput for [u8] {
    type Buf = Vec<u8>;

    #[inline]
    fn as_raw(&self) -> &[u8] {
        self
    }

    #[inline]
    fn slice(&self, range: Range<usize>) -> &Self {
        &self[range]
    }

    fn is_boundary(&self, offset: usize) -> bool {
        offset <= self.len()
    }

    fn view(buf: &Vec<u8>) -> &Self {
        buf
    }

    fn push(buf: &mut Vec<u8>, text: &Self) {
        buf.extend_from_slice(text);
    }

    fn push_ascii(buf: &mut Vec<u8>, text: &'static str) {
        buf.extend_from_slice(text.as_bytes());
    }
}

/// 先頭の1文字をデコード
///
/// Returns the character (`None` for a byte that starts no valid UTF-8
/// sequence) and how many bytes it occupies.
#[inline]
pub(crate) fn next_unit(bytes: &[u8]) -> Option<(Option<char>, usize)> {
    let &lead = bytes.first()?;
    let width = match lead {
        0x00..=0x7F => return Some((Some(char::from(lead)), 1)),
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Some((None, 1)),
    };
    let decoded = bytes
        .get(..width)
        .and_then(|seq| core::str::from_utf8(seq).ok())
        .and_then(|seq| seq.chars().next());
    Some(decoded.map_or((None, 1), |ch| (Some(ch), width)))
}
