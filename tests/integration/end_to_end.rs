// tests/integration/end_to_end.rs
use comment_cleaner::{
    CleanConfigBuilder, Cleaner, Language, ScanStats, SourceText, StripOptions, scan, strip,
};

#[path = "../common/mod.rs"]
mod common;
use common::{
    C_FIXTURE, CPP_FIXTURE, JS_FIXTURE, PYTHON_FIXTURE, RUST_FIXTURE, assert_comment_free,
    string_literals,
};

fn strip_fixture(language: Language, input: &str, options: &StripOptions) -> String {
    let grammar = language.grammar().unwrap();
    let output = scan(input, &grammar);
    assert_eq!(output.reassemble(), input);
    assert!(!output.has_warnings());
    strip(&output.spans, options)
}

fn tidy() -> StripOptions {
    StripOptions {
        tidy: true,
        ..StripOptions::default()
    }
}

#[test]
fn test_c_fixture_loses_every_comment() {
    let out = strip_fixture(Language::C, C_FIXTURE, &tidy());

    assert_comment_free(Language::C, &out);
    assert_eq!(
        string_literals(Language::C, &out),
        string_literals(Language::C, C_FIXTURE)
    );
    assert!(out.starts_with("\n#include <stdio.h>\n"));
    assert!(out.contains("int factorial(int n) {\n\n    if (n <= 1) return 1;\n"));
    assert!(out.contains("    printf(\"Factorial of 5: %d\\n\", factorial(5));\n"));
    assert!(out.contains("createPerson(\"John Doe\", 30, 1.75);\n"));
    assert!(out.contains("    newPerson->name[49] = '\\0';\n"));
    assert!(out.contains("    char name[50];\n"));
    assert!(!out.contains("Counter"));
    assert!(!out.contains("TODO"));
    assert!(out.ends_with("    return 0;\n}\n\n"));
}

#[test]
fn test_c_fixture_stats() {
    let grammar = Language::C.grammar().unwrap();
    let stats = ScanStats::from_spans(&scan(C_FIXTURE, &grammar).spans);
    assert_eq!(stats.line_comments, 20);
    assert_eq!(stats.block_comments, 8);
    assert_eq!(stats.doc_comments, 1);
    assert_eq!(stats.string_literals, 4);
    assert_eq!(stats.comment_lines, 44);
    assert_eq!(stats.unterminated, 0);
    assert_eq!(stats.total_bytes(), C_FIXTURE.len());
}

#[test]
fn test_c_fixture_preserves_line_numbers() {
    let options = StripOptions {
        preserve_line_numbers: true,
        ..StripOptions::default()
    };
    let out = strip_fixture(Language::C, C_FIXTURE, &options);

    assert_eq!(out.matches('\n').count(), C_FIXTURE.matches('\n').count());
    // 各行はコメント部分を除いた元の行の先頭部分
    for (original, stripped) in C_FIXTURE.split('\n').zip(out.split('\n')) {
        assert!(
            original.starts_with(stripped),
            "{stripped:?} is not a prefix of {original:?}"
        );
    }
}

#[test]
fn test_c_fixture_keep_todo() {
    let options = StripOptions {
        keep_todo: true,
        ..StripOptions::default()
    };
    let out = strip_fixture(Language::C, C_FIXTURE, &options);
    assert!(out.contains("// TODO: Add error handling module\n"));
    assert!(out.contains("// FIXME: Fix memory leaks in array functions\n"));
    assert!(out.contains("return NULL; // FIXME: Add proper error handling\n"));
    assert!(!out.contains("Base case"));
    assert!(!out.contains("Multi-line C comment"));
}

#[test]
fn test_c_fixture_keep_doc_comments() {
    let options = StripOptions {
        keep_doc_comments: true,
        ..StripOptions::default()
    };
    let out = strip_fixture(Language::C, C_FIXTURE, &options);
    assert!(out.contains("/**\n * Calculates the factorial of a number\n"));
    assert!(!out.contains("Multi-line C comment"));
    assert!(!out.contains("Recursive case"));
}

#[test]
fn test_cpp_fixture() {
    let out = strip_fixture(Language::Cpp, CPP_FIXTURE, &tidy());

    assert_comment_free(Language::Cpp, &out);
    assert_eq!(
        string_literals(Language::Cpp, &out),
        ["\"Name: \"", "\", Email: \"", "\"John\"", "\"john@example.com\""]
    );
    assert!(out.contains("    User user(\"John\", \"john@example.com\", 30);\n"));
    assert!(out.contains("        : name(name),\n          email(email),\n          age(age)\n"));
    assert!(!out.contains("Debug mode enabled"));
    assert!(!out.contains("User's"));
}

#[test]
fn test_cpp_fixture_stats() {
    let grammar = Language::Cpp.grammar().unwrap();
    let stats = ScanStats::from_spans(&scan(CPP_FIXTURE, &grammar).spans);
    assert_eq!(stats.line_comments, 22);
    assert_eq!(stats.block_comments, 4);
    assert_eq!(stats.doc_comments, 1);
    assert_eq!(stats.string_literals, 4);
}

#[test]
fn test_rust_fixture_keeps_doc_comments() {
    let options = StripOptions {
        keep_doc_comments: true,
        tidy: true,
        ..StripOptions::default()
    };
    let out = strip_fixture(Language::Rust, RUST_FIXTURE, &options);
    assert_eq!(out.matches("///").count(), 8);
    assert!(out.contains("/// Documentation comment for struct\n"));
    assert!(out.contains("    name: String,\n"));
    assert!(out.contains("User::new(\"John\", \"john@example.com\", 30);"));
    assert!(!out.contains("fn unused"));
    assert!(!out.contains("FIXME"));
}

#[test]
fn test_python_fixture_keeps_shebang_drops_docstrings() {
    let out = strip_fixture(Language::Python, PYTHON_FIXTURE, &StripOptions::default());
    assert!(out.starts_with("#!/usr/bin/env python3\n\n"));
    assert!(!out.contains("coding"));
    assert!(out.contains("    x = 42  \n"));
    assert!(out.contains("return \"Hello, world!\"  \n"));
    assert!(out.contains("class ExampleClass:\n"));
    assert!(out.contains("        self.value = 100  \n"));
    assert!(!out.contains("module docstring"));
    assert!(!out.contains("Constructor docstring"));
    assert!(!out.contains("This is a multi-line comment"));
    assert!(!out.contains("print(\"This is commented out code\")"));
}

#[test]
fn test_python_fixture_keep_doc_comments() {
    let options = StripOptions {
        keep_doc_comments: true,
        ..StripOptions::default()
    };
    let out = strip_fixture(Language::Python, PYTHON_FIXTURE, &options);
    assert!(out.contains("\"\"\"\nThis is a module docstring\n"));
    assert!(out.contains("        \"\"\"Method docstring\"\"\"  \n"));
    assert!(!out.contains("# Single line comment"));
}

#[test]
fn test_python_fixture_stats() {
    let grammar = Language::Python.grammar().unwrap();
    let stats = ScanStats::from_spans(&scan(PYTHON_FIXTURE, &grammar).spans);
    assert_eq!(stats.docstrings, 9);
    assert_eq!(stats.string_literals, 10);
    assert_eq!(stats.unterminated, 0);
}

#[test]
fn test_js_fixture_keep_todo() {
    let options = StripOptions {
        keep_todo: true,
        ..StripOptions::default()
    };
    let out = strip_fixture(Language::JavaScript, JS_FIXTURE, &options);
    assert!(out.contains("const str = \"This is a string with // comment markers\";"));
    assert!(out.contains("const str2 = 'Also a string with /* block comment */ markers';"));
    assert!(out.contains(
        "const template = `Template string with // comments and /* block comments */`;"
    ));
    assert!(out.contains("// TODO: Test that this comment remains\n"));
    assert!(out.contains("/* FIXME: Block comment with FIXME\n"));
    assert!(out.contains(" * FIXME: With a FIXME that should be preserved\n"));
    assert!(!out.contains("@param {string} name"));
}

#[test]
fn test_engine_matches_direct_strip() {
    let config = CleanConfigBuilder::default().strip(tidy()).build().unwrap();
    let cleaner = Cleaner::new(config).unwrap();
    let report = cleaner
        .clean(&SourceText::new("fixtures/test_c.c", C_FIXTURE))
        .unwrap();

    assert_eq!(report.content, strip_fixture(Language::C, C_FIXTURE, &tidy()));
    assert_eq!(report.comments_removed, 28);
    assert_eq!(report.original_size, C_FIXTURE.len());
    assert!(report.reduction_percent() > 30.0);
}
