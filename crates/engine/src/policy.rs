use comment_cleaner_core::scanner::Span;
use comment_cleaner_core::strip::CommentPolicy;
use regex::RegexSet;
use regex::bytes::RegexSet as BytesRegexSet;

use crate::error::Result;

/// ユーザー指定の正規表現に一致するコメントを残すポリシー
///
/// Each pattern is compiled twice: once for UTF-8 text and once for raw
/// bytes, where `.` and classes still match whole UTF-8 characters.
#[derive(Debug, Clone)]
pub struct PreservePatterns {
    set: RegexSet,
    bytes: BytesRegexSet,
}

impl PreservePatterns {
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::Regex`] for the first pattern that
    /// fails to compile.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(|pattern| pattern.as_ref().to_string())
            .collect();
        Ok(Self {
            set: RegexSet::new(&patterns)?,
            bytes: BytesRegexSet::new(&patterns)?,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }
}

impl CommentPolicy for PreservePatterns {
    fn keep(&self, comment: &Span<'_>) -> bool {
        self.set.is_match(comment.text)
    }
}

impl CommentPolicy<[u8]> for PreservePatterns {
    fn keep(&self, comment: &Span<'_, [u8]>) -> bool {
        self.bytes.is_match(comment.text)
    }
}
