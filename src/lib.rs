//! コメント除去エンジン
//!
//! Re-exports the `no_std` scanner core and the cleaning engine under one
//! crate.
//!
//! ```rust
//! use comment_cleaner::{CleanConfig, Cleaner, SourceText};
//!
//! let cleaner = Cleaner::new(CleanConfig::default()).unwrap();
//! let source = SourceText::new("main.c", "puts(\"// kept\"); // dropped\n");
//! let report = cleaner.clean(&source).unwrap();
//! assert_eq!(report.content, "puts(\"// kept\"); \n");
//! ```
#![allow(clippy::multiple_crate_versions)]

pub use comment_cleaner_core::{
    BlockDelimiter, CommentPolicy, ConfigError, Grammar, GrammarBuilder, Language, ScanInput,
    ScanOutput, ScanStats, ScanWarning, Scanner, Span, SpanKind, StringFence, StripOptions, config,
    error as core_error, extract, language, scan, scan_bytes, scanner, stats, strip, strip_with,
};
pub use comment_cleaner_engine::{
    BatchResult,
    cleaner::{CleanReport, Cleaner, SourceText},
    config::{CleanConfig, CleanConfigBuilder},
    error::EngineError,
    policy::PreservePatterns,
    run,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
