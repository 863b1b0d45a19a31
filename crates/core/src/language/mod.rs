pub mod grammar;
pub mod preset;

pub use grammar::{BlockDelimiter, Grammar, GrammarBuilder, StringFence};
pub use preset::{Language, UnknownLanguage};
