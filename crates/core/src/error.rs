// crates/core/src/error.rs
//! 文法記述子の構築・スキャン再開時のエラー定義

use alloc::string::String;

use thiserror::Error;

/// Grammar Descriptor の構築失敗、またはチェックポイントの不整合
///
/// スキャン開始前にのみ発生する。スキャン中の未終端コメント/文字列は
/// エラーではなく [`crate::scanner::WarningKind`] として報告される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grammar '{grammar}' declares an empty {role} delimiter")]
    EmptyDelimiter { grammar: String, role: &'static str },

    #[error("grammar '{grammar}' declares '{sequence}' as both {first} and {second}")]
    DuplicateOpener {
        grammar: String,
        sequence: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("grammar '{grammar}' uses '{escape}' as both escape and quote character")]
    EscapeIsQuote { grammar: String, escape: char },

    #[error("grammar '{grammar}' declares no comment delimiters")]
    NoDelimiters { grammar: String },

    #[error("checkpoint at offset {offset} is not valid for this input ({reason})")]
    InvalidCheckpoint { offset: usize, reason: &'static str },
}

pub type Result<T> = core::result::Result<T, ConfigError>;
