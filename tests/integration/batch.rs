// tests/integration/batch.rs
use comment_cleaner::{CleanConfig, EngineError, Language, SourceText, run};
use serde_json::Value;

#[path = "../common/mod.rs"]
mod common;
use common::{C_FIXTURE, CPP_FIXTURE, JS_FIXTURE, RUST_FIXTURE, assert_comment_free};

fn fixtures() -> Vec<SourceText> {
    vec![
        SourceText::new("test_c.c", C_FIXTURE),
        SourceText::new("test_cpp.cpp", CPP_FIXTURE),
        SourceText::new("test_rust.rs", RUST_FIXTURE),
        SourceText::new("test_js.js", JS_FIXTURE),
        SourceText::new("README", "plain text"),
    ]
}

#[test]
fn test_batch_over_fixtures() {
    let config = CleanConfig::from_json(r#"{ "strip": { "tidy": true } }"#).unwrap();
    let result = run(config, &fixtures()).unwrap();

    assert_eq!(result.errors.len(), 1);
    assert!(matches!(
        result.errors[0].1,
        EngineError::UnknownExtension { .. }
    ));

    let languages: Vec<_> = result.reports.iter().map(|r| r.language).collect();
    assert_eq!(
        languages,
        [
            Some(Language::C),
            Some(Language::Cpp),
            Some(Language::Rust),
            Some(Language::JavaScript),
        ]
    );
    for report in &result.reports {
        assert_comment_free(report.language.unwrap(), &report.content);
        assert!(report.warnings.is_empty());
    }

    let stats = result.stats();
    assert_eq!(stats.comments(), result.comments_removed());
    assert!(result.cleaned_size() < result.original_size());
}

#[test]
fn test_batch_json_report() {
    let config = CleanConfig::from_json(r#"{ "force": true, "map_ext": { "h": "cpp" } }"#).unwrap();
    let sources = [
        SourceText::new("widget.h", "class W {}; // decl\n"),
        SourceText::new("README", "plain text"),
    ];
    let result = run(config, &sources).unwrap();
    assert!(result.errors.is_empty());

    let value: Value = serde_json::from_str(&result.reports[0].to_json().unwrap()).unwrap();
    assert_eq!(value["language"], "cpp");
    assert_eq!(value["content"], "class W {}; \n");
    assert_eq!(value["comments_removed"], 1);
    assert_eq!(value["stats"]["line_comments"], 1);

    let value: Value = serde_json::from_str(&result.reports[1].to_json().unwrap()).unwrap();
    assert_eq!(value["language"], Value::Null);
    assert_eq!(value["content"], "plain text");
}
