// tests/integration/resume.rs
use comment_cleaner::scanner::Checkpoint;
use comment_cleaner::{Language, Scanner, Span, scan};

#[path = "../common/mod.rs"]
mod common;
use common::{C_FIXTURE, CPP_FIXTURE};

fn assert_resumable_everywhere(language: Language, input: &str) {
    let grammar = language.grammar().unwrap();
    let full: Vec<Span<'_>> = scan(input, &grammar).spans;

    for (offset, _) in input.char_indices().step_by(7) {
        let mut head = Scanner::new(input, &grammar).pause_at(Some(offset));
        let mut spans: Vec<Span<'_>> = head.by_ref().collect();

        // チェックポイントは JSON を経由しても同じ位置から再開できる
        let json = serde_json::to_string(&head.checkpoint()).unwrap();
        let checkpoint: Checkpoint = serde_json::from_str(&json).unwrap();
        spans.extend(Scanner::resume(input, &grammar, checkpoint).unwrap());

        assert_eq!(spans, full, "resumed at byte {offset}");
    }
}

#[test]
fn test_resume_c_fixture_at_any_offset() {
    assert_resumable_everywhere(Language::C, C_FIXTURE);
}

#[test]
fn test_resume_cpp_fixture_at_any_offset() {
    assert_resumable_everywhere(Language::Cpp, CPP_FIXTURE);
}

#[test]
fn test_resume_nested_rust_comment() {
    assert_resumable_everywhere(Language::Rust, "a /* b /* c */ d */ e // f\n\"g\"");
}

#[test]
fn test_chained_pauses() {
    let grammar = Language::C.grammar().unwrap();
    let full = scan(C_FIXTURE, &grammar).spans;

    let mut spans = Vec::new();
    let mut checkpoint = Scanner::new(C_FIXTURE, &grammar).checkpoint();
    for stop in (0..=C_FIXTURE.len()).step_by(256).skip(1) {
        let mut scanner = Scanner::resume(C_FIXTURE, &grammar, checkpoint)
            .unwrap()
            .pause_at(Some(stop));
        spans.extend(scanner.by_ref());
        checkpoint = scanner.checkpoint();
    }
    spans.extend(Scanner::resume(C_FIXTURE, &grammar, checkpoint).unwrap());
    assert_eq!(spans, full);
}
