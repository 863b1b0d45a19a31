#![no_std]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod language;
pub mod scanner;
pub mod stats;
pub mod strip;

pub use config::StripOptions;
pub use error::ConfigError;
pub use language::{BlockDelimiter, Grammar, GrammarBuilder, Language, StringFence};
pub use scanner::{ScanInput, ScanOutput, ScanWarning, Scanner, Span, SpanKind, scan, scan_bytes};
pub use stats::ScanStats;
pub use strip::{CommentPolicy, extract, strip, strip_with};
