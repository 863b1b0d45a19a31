// tests/common/mod.rs
//! 共通テストユーティリティ
#![allow(dead_code)]

use comment_cleaner::{Language, SpanKind, scan};

pub const C_FIXTURE: &str = include_str!("../fixtures/test_c.c");
pub const CPP_FIXTURE: &str = include_str!("../fixtures/test_cpp.cpp");
pub const RUST_FIXTURE: &str = include_str!("../fixtures/test_rust.rs");
pub const PYTHON_FIXTURE: &str = include_str!("../fixtures/test_python.py");
pub const JS_FIXTURE: &str = include_str!("../fixtures/test_js.js");

/// 文字列リテラルの本文をすべて取り出す
pub fn string_literals(language: Language, input: &str) -> Vec<String> {
    let grammar = language.grammar().unwrap();
    scan(input, &grammar)
        .spans
        .iter()
        .filter(|span| span.kind == SpanKind::StringLiteral)
        .map(|span| span.text.to_string())
        .collect()
}

/// 除去後のテキストにコメントが残っていないことを確認
pub fn assert_comment_free(language: Language, text: &str) {
    let grammar = language.grammar().unwrap();
    let output = scan(text, &grammar);
    let left: Vec<&str> = output.comments().map(|span| span.text).collect();
    assert!(left.is_empty(), "comments left behind: {left:?}");
    assert!(!output.has_warnings(), "warnings: {:?}", output.warnings);
}
